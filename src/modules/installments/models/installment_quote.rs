use serde::{Deserialize, Serialize};

use crate::core::MinorUnits;

/// Price of paying a total in `installment_count` installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentQuote {
    pub installment_count: u32,
    /// Floor value of each installment, as displayed to the buyer
    pub installment_value: MinorUnits,
    /// Amount the buyer pays across all installments
    pub total_with_interest: MinorUnits,
}

impl InstallmentQuote {
    /// Minor units left over after `installment_value * installment_count`
    ///
    /// Always smaller than `installment_count`.
    pub fn remainder(&self) -> MinorUnits {
        self.total_with_interest - self.installment_value * MinorUnits::from(self.installment_count)
    }

    /// Per-installment values; the first installment carries the remainder
    ///
    /// The values always sum to `total_with_interest`.
    pub fn itemize(&self) -> Vec<MinorUnits> {
        let count = self.installment_count.max(1) as usize;
        let mut items = vec![self.installment_value; count];
        items[0] += self.remainder();
        items
    }
}
