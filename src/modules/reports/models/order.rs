use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::MinorUnits;

/// Order lifecycle status
///
/// Parsing never fails; unrecognised values become [`OrderStatus::Unknown`],
/// which counts as an unsettled order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum OrderStatus {
    Pending,
    Paid,
    Approved,
    PaymentConfirmed,
    Dispatched,
    Delivered,
    CartAbandoned,
    Cancelled,
    Refunded,
    Failed,
    Unknown,
}

impl OrderStatus {
    /// Payment has been captured or confirmed
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            OrderStatus::Paid
                | OrderStatus::Approved
                | OrderStatus::PaymentConfirmed
                | OrderStatus::Delivered
                | OrderStatus::Dispatched
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Approved => "approved",
            OrderStatus::PaymentConfirmed => "payment_confirmed",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::CartAbandoned => "cart_abandoned",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
            OrderStatus::Unknown => "unknown",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "paid" => OrderStatus::Paid,
            "approved" => OrderStatus::Approved,
            "payment_confirmed" => OrderStatus::PaymentConfirmed,
            "dispatched" => OrderStatus::Dispatched,
            "delivered" => OrderStatus::Delivered,
            "cart_abandoned" => OrderStatus::CartAbandoned,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            "refunded" => OrderStatus::Refunded,
            "failed" => OrderStatus::Failed,
            _ => OrderStatus::Unknown,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        OrderStatus::from(value.as_str())
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the buyer paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    Boleto,
    Unknown,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Boleto => "boleto",
            PaymentMethod::Unknown => "unknown",
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pix" => PaymentMethod::Pix,
            "credit_card" => PaymentMethod::CreditCard,
            "boleto" => PaymentMethod::Boleto,
            _ => PaymentMethod::Unknown,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        PaymentMethod::from(value.as_str())
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales channel an order came through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum OrderSource {
    Storefront,
    LandingPage,
    StandaloneCheckout,
    Unknown,
}

impl OrderSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSource::Storefront => "storefront",
            OrderSource::LandingPage => "landing_page",
            OrderSource::StandaloneCheckout => "standalone_checkout",
            OrderSource::Unknown => "unknown",
        }
    }
}

impl From<&str> for OrderSource {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "storefront" => OrderSource::Storefront,
            "landing_page" => OrderSource::LandingPage,
            "standalone_checkout" => OrderSource::StandaloneCheckout,
            _ => OrderSource::Unknown,
        }
    }
}

impl From<String> for OrderSource {
    fn from(value: String) -> Self {
        OrderSource::from(value.as_str())
    }
}

impl std::fmt::Display for OrderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checkout order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub total_amount: MinorUnits,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub source: OrderSource,
    pub created_at: DateTime<Utc>,
    /// Sale created when the order was paid, if any
    pub sale_id: Option<String>,
}
