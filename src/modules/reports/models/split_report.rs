use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{money, AppError, MinorUnits, Result};
use crate::modules::reports::models::{
    AggregationWindow, OrderSource, OrderStatus, ParticipantType, PaymentMethod,
};

/// Net split amounts per participant type, in minor units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTotals {
    pub platform_fee: MinorUnits,
    pub tenant: MinorUnits,
    pub affiliate: MinorUnits,
    pub industry: MinorUnits,
    pub factory: MinorUnits,
    pub coproducer: MinorUnits,
    pub gateway_fee: MinorUnits,
}

impl SplitTotals {
    /// Add `amount` to the participant's bucket
    ///
    /// Returns `false` and leaves the totals untouched for
    /// [`ParticipantType::Unknown`].
    pub fn add(&mut self, participant: ParticipantType, amount: MinorUnits) -> bool {
        let bucket = match participant {
            ParticipantType::PlatformFee => &mut self.platform_fee,
            ParticipantType::Tenant => &mut self.tenant,
            ParticipantType::Affiliate => &mut self.affiliate,
            ParticipantType::Industry => &mut self.industry,
            ParticipantType::Factory => &mut self.factory,
            ParticipantType::Coproducer => &mut self.coproducer,
            ParticipantType::GatewayFee => &mut self.gateway_fee,
            ParticipantType::Unknown => return false,
        };
        *bucket = bucket.saturating_add(amount);
        true
    }

    pub fn get(&self, participant: ParticipantType) -> MinorUnits {
        match participant {
            ParticipantType::PlatformFee => self.platform_fee,
            ParticipantType::Tenant => self.tenant,
            ParticipantType::Affiliate => self.affiliate,
            ParticipantType::Industry => self.industry,
            ParticipantType::Factory => self.factory,
            ParticipantType::Coproducer => self.coproducer,
            ParticipantType::GatewayFee => self.gateway_fee,
            ParticipantType::Unknown => 0,
        }
    }

    pub fn merge(&mut self, other: &SplitTotals) {
        for participant in ParticipantType::KNOWN {
            self.add(participant, other.get(participant));
        }
    }

    /// Sum across every bucket
    pub fn total(&self) -> MinorUnits {
        ParticipantType::KNOWN
            .iter()
            .fold(0, |acc: MinorUnits, p| acc.saturating_add(self.get(*p)))
    }
}

/// Order counts and amounts for one payment method or source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBreakdown {
    pub count: u64,
    pub total_amount: MinorUnits,
    pub settled_count: u64,
    pub settled_amount: MinorUnits,
    /// `settled_count / count`, zero for an empty channel
    pub conversion_rate: Decimal,
}

impl ChannelBreakdown {
    pub fn record(&mut self, amount: MinorUnits, settled: bool) {
        self.count += 1;
        self.total_amount = self.total_amount.saturating_add(amount);
        if settled {
            self.settled_count += 1;
            self.settled_amount = self.settled_amount.saturating_add(amount);
        }
        self.conversion_rate = money::ratio(self.settled_count, self.count);
    }
}

/// Per-sale line of the split report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReportRow {
    pub sale_id: String,
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub source: OrderSource,
    pub status: OrderStatus,
    pub installment_count: u32,
    pub total_amount: MinorUnits,
    pub interest: MinorUnits,
    pub gateway_fee: MinorUnits,
    /// The gateway did not report a fee and it was estimated
    pub gateway_fee_estimated: bool,
    pub anticipation_cost: MinorUnits,
    pub splits: SplitTotals,
}

/// Split and profitability report over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub window: AggregationWindow,
    pub order_count: u64,
    pub settled_order_count: u64,
    pub conversion_rate: Decimal,
    pub total_gmv: MinorUnits,
    pub paid_gmv: MinorUnits,
    pub split_totals: SplitTotals,
    pub total_interest_revenue: MinorUnits,
    pub total_gateway_cost: MinorUnits,
    pub total_anticipation_cost: MinorUnits,
    /// Platform share plus interest, less gateway and anticipation costs; may be negative
    pub platform_profit: MinorUnits,
    pub by_payment_method: BTreeMap<PaymentMethod, ChannelBreakdown>,
    pub by_source: BTreeMap<OrderSource, ChannelBreakdown>,
    /// Splits dropped because their participant type was not recognised
    pub ignored_split_count: u64,
    pub rows: Vec<SaleReportRow>,
}

const CSV_HEADER: [&str; 20] = [
    "sale_id",
    "order_id",
    "created_at",
    "payment_method",
    "source",
    "status",
    "installment_count",
    "total_amount",
    "interest",
    "gateway_fee",
    "gateway_fee_estimated",
    "anticipation_cost",
    "platform_fee",
    "tenant",
    "affiliate",
    "industry",
    "factory",
    "coproducer",
    "split_gateway_fee",
    "split_total",
];

impl AggregationResult {
    /// All-zero report for `window`
    pub fn empty(window: AggregationWindow) -> Self {
        Self {
            window,
            order_count: 0,
            settled_order_count: 0,
            conversion_rate: Decimal::ZERO,
            total_gmv: 0,
            paid_gmv: 0,
            split_totals: SplitTotals::default(),
            total_interest_revenue: 0,
            total_gateway_cost: 0,
            total_anticipation_cost: 0,
            platform_profit: 0,
            by_payment_method: BTreeMap::new(),
            by_source: BTreeMap::new(),
            ignored_split_count: 0,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Per-sale rows as CSV, amounts in minor units
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        csv.write_record(CSV_HEADER)?;

        for row in &self.rows {
            csv.write_record(&[
                row.sale_id.clone(),
                row.order_id.clone(),
                row.created_at.to_rfc3339(),
                row.payment_method.to_string(),
                row.source.to_string(),
                row.status.to_string(),
                row.installment_count.to_string(),
                row.total_amount.to_string(),
                row.interest.to_string(),
                row.gateway_fee.to_string(),
                row.gateway_fee_estimated.to_string(),
                row.anticipation_cost.to_string(),
                row.splits.platform_fee.to_string(),
                row.splits.tenant.to_string(),
                row.splits.affiliate.to_string(),
                row.splits.industry.to_string(),
                row.splits.factory.to_string(),
                row.splits.coproducer.to_string(),
                row.splits.gateway_fee.to_string(),
                row.splits.total().to_string(),
            ])?;
        }

        csv.into_inner()
            .map_err(|e| AppError::internal(format!("CSV flush error: {}", e.error())))
    }
}
