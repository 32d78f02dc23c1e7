use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{money, MinorUnits};
use crate::modules::reports::models::PaymentMethod;

/// Captured sale backing a settled order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    /// Amount charged, interest included
    pub total_amount: MinorUnits,
    /// Base price before installment interest
    pub subtotal_amount: MinorUnits,
    pub payment_method: PaymentMethod,
    pub installment_count: u32,
    pub gateway_transaction_id: Option<String>,
    /// Processing fee reported by the gateway; estimated when absent
    pub gateway_fee: Option<MinorUnits>,
    pub created_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Installment interest collected on top of the base price
    pub fn interest(&self) -> MinorUnits {
        money::non_negative(self.total_amount)
            .saturating_sub(money::non_negative(self.subtotal_amount))
            .max(0)
    }
}
