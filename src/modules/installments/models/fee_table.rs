use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee percentage charged per installment count
///
/// Keys are installment counts, values are percentages (`2.5` means 2.5%).
/// Counts without an entry carry no fee, and a single installment is always
/// fee-free whatever the table says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallmentFeeTable(BTreeMap<u32, Decimal>);

impl InstallmentFeeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and tenant setting screens
    pub fn with_fee(mut self, installment_count: u32, fee_percent: Decimal) -> Self {
        self.0.insert(installment_count, fee_percent);
        self
    }

    /// Fee percentage applied to `installment_count` installments
    ///
    /// Missing entries and negative percentages read as zero.
    pub fn fee_for(&self, installment_count: u32) -> Decimal {
        if installment_count <= 1 {
            return Decimal::ZERO;
        }
        self.0
            .get(&installment_count)
            .copied()
            .filter(|fee| fee.is_sign_positive())
            .unwrap_or(Decimal::ZERO)
    }
}

impl FromIterator<(u32, Decimal)> for InstallmentFeeTable {
    fn from_iter<I: IntoIterator<Item = (u32, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Who pays the installment fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentPolicy {
    /// The fee inflates the amount charged to the buyer
    PassedToBuyer,
    /// The seller absorbs the fee; the buyer pays the flat total
    #[default]
    Absorbed,
}

impl InstallmentPolicy {
    pub fn fee_passed_to_buyer(&self) -> bool {
        matches!(self, InstallmentPolicy::PassedToBuyer)
    }
}

impl From<bool> for InstallmentPolicy {
    fn from(fee_passed_to_buyer: bool) -> Self {
        if fee_passed_to_buyer {
            InstallmentPolicy::PassedToBuyer
        } else {
            InstallmentPolicy::Absorbed
        }
    }
}

/// Tenant installment configuration as stored in tenant settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentSettings {
    pub max_installments: u32,
    pub fee_table: InstallmentFeeTable,
    pub policy: InstallmentPolicy,
}

impl Default for InstallmentSettings {
    /// Tenants that never configured installments sell in a single payment
    fn default() -> Self {
        Self {
            max_installments: 1,
            fee_table: InstallmentFeeTable::new(),
            policy: InstallmentPolicy::Absorbed,
        }
    }
}
