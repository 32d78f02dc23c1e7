use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::{self, MinorUnits};
use crate::modules::installments::models::{InstallmentFeeTable, InstallmentPolicy, InstallmentQuote};

/// Installment-with-interest pricing
///
/// Pure and total: negative totals are priced as zero and installment counts
/// below one are priced as a single installment. Tenant configuration is
/// always passed in explicitly.
pub struct InstallmentPricer;

impl InstallmentPricer {
    /// Quote a single installment count
    pub fn quote(
        total_amount: MinorUnits,
        installment_count: u32,
        fee_table: &InstallmentFeeTable,
        policy: InstallmentPolicy,
    ) -> InstallmentQuote {
        let count = installment_count.max(1);
        let total_with_interest =
            Self::effective_total(money::non_negative(total_amount), count, fee_table, policy);
        let installment_value = total_with_interest / MinorUnits::from(count);

        InstallmentQuote {
            installment_count: count,
            installment_value,
            total_with_interest,
        }
    }

    /// Quote every installment count from 1 to `max_installments`
    pub fn quote_all(
        total_amount: MinorUnits,
        max_installments: u32,
        fee_table: &InstallmentFeeTable,
        policy: InstallmentPolicy,
    ) -> Vec<InstallmentQuote> {
        let max = max_installments.max(1);
        debug!(
            total_amount,
            max_installments = max,
            ?policy,
            "Quoting installment options"
        );

        (1..=max)
            .map(|count| Self::quote(total_amount, count, fee_table, policy))
            .collect()
    }

    /// Amount the buyer pays in total for `count` installments
    ///
    /// `total_amount` must already be non-negative.
    fn effective_total(
        total_amount: MinorUnits,
        count: u32,
        fee_table: &InstallmentFeeTable,
        policy: InstallmentPolicy,
    ) -> MinorUnits {
        let fee_percent = fee_table.fee_for(count);
        if count == 1 || fee_percent.is_zero() || !policy.fee_passed_to_buyer() {
            return total_amount;
        }

        let factor = Decimal::ONE + fee_percent / Decimal::ONE_HUNDRED;
        money::mul_round(total_amount, factor)
    }
}
