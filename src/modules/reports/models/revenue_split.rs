use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::MinorUnits;

/// Who receives a share of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ParticipantType {
    PlatformFee,
    Tenant,
    Affiliate,
    Industry,
    Factory,
    Coproducer,
    GatewayFee,
    /// Unrecognised participant; excluded from every total
    Unknown,
}

impl ParticipantType {
    /// Participant types that have a bucket in [`SplitTotals`](super::SplitTotals)
    pub const KNOWN: [ParticipantType; 7] = [
        ParticipantType::PlatformFee,
        ParticipantType::Tenant,
        ParticipantType::Affiliate,
        ParticipantType::Industry,
        ParticipantType::Factory,
        ParticipantType::Coproducer,
        ParticipantType::GatewayFee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantType::PlatformFee => "platform_fee",
            ParticipantType::Tenant => "tenant",
            ParticipantType::Affiliate => "affiliate",
            ParticipantType::Industry => "industry",
            ParticipantType::Factory => "factory",
            ParticipantType::Coproducer => "coproducer",
            ParticipantType::GatewayFee => "gateway_fee",
            ParticipantType::Unknown => "unknown",
        }
    }
}

impl From<&str> for ParticipantType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "platform_fee" | "platform" => ParticipantType::PlatformFee,
            "tenant" | "seller" => ParticipantType::Tenant,
            "affiliate" => ParticipantType::Affiliate,
            "industry" => ParticipantType::Industry,
            "factory" => ParticipantType::Factory,
            "coproducer" | "co_producer" => ParticipantType::Coproducer,
            "gateway_fee" | "gateway" => ParticipantType::GatewayFee,
            _ => ParticipantType::Unknown,
        }
    }
}

impl From<String> for ParticipantType {
    fn from(value: String) -> Self {
        ParticipantType::from(value.as_str())
    }
}

impl std::fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant's share of one sale
///
/// Shares of a sale are not checked against the sale total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSplit {
    pub sale_id: String,
    pub participant_type: ParticipantType,
    pub net_amount: MinorUnits,
    /// Informational; totals are built from `net_amount`
    pub percentage: Decimal,
    /// Display ordering hint
    pub priority: i32,
    pub liable_for_refund: bool,
    pub liable_for_chargeback: bool,
    pub created_at: DateTime<Utc>,
}
