use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::money::{self, MinorUnits};
use crate::modules::reports::models::{
    AggregationResult, AggregationWindow, OrderRecord, PaymentMethod, RevenueSplit, SaleRecord,
    SaleReportRow, SplitTotals,
};

/// Estimated gateway processing rate when the gateway reports no fee (0.88%)
pub const GATEWAY_FEE_RATE: Decimal = Decimal::from_parts(88, 0, 0, false, 4);
/// Fixed per-transaction part of the estimated gateway fee
pub const GATEWAY_FIXED_FEE: MinorUnits = 9;
/// Monthly anticipation rate, in percent
pub const MONTHLY_ANTICIPATION_RATE_PERCENT: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Card receivables settle at D+30 and are anticipated to D+2
pub const ANTICIPATION_DAYS: u32 = 28;
pub const DAYS_PER_MONTH: u32 = 30;

/// Gateway and anticipation costs of one settled sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleCosts {
    pub interest: MinorUnits,
    pub gateway_fee: MinorUnits,
    pub gateway_fee_estimated: bool,
    pub anticipation_cost: MinorUnits,
}

impl SaleCosts {
    pub fn for_sale(sale: &SaleRecord) -> Self {
        let (gateway_fee, gateway_fee_estimated) = match sale.gateway_fee {
            Some(fee) => (money::non_negative(fee), false),
            None => (estimate_gateway_fee(sale.total_amount), true),
        };

        Self {
            interest: sale.interest(),
            gateway_fee,
            gateway_fee_estimated,
            anticipation_cost: anticipation_cost(sale.payment_method, sale.total_amount),
        }
    }
}

/// `round(total * 0.0088) + 9`
pub fn estimate_gateway_fee(total_amount: MinorUnits) -> MinorUnits {
    money::mul_round(money::non_negative(total_amount), GATEWAY_FEE_RATE)
        .saturating_add(GATEWAY_FIXED_FEE)
}

/// Cost of anticipating card receivables; zero for every other method
pub fn anticipation_cost(method: PaymentMethod, total_amount: MinorUnits) -> MinorUnits {
    if method != PaymentMethod::CreditCard {
        return 0;
    }

    // rate/30 per day, over 28 days, as a percentage
    let factor = MONTHLY_ANTICIPATION_RATE_PERCENT * Decimal::from(ANTICIPATION_DAYS)
        / (Decimal::from(DAYS_PER_MONTH) * Decimal::ONE_HUNDRED);
    money::mul_round(money::non_negative(total_amount), factor)
}

/// Gateway revenue-split aggregation
///
/// Pure and total: empty inputs give an all-zero report and malformed values
/// (negative amounts, unknown enum values) are clamped or skipped.
pub struct SplitAggregator;

impl SplitAggregator {
    pub fn aggregate(
        orders: &[OrderRecord],
        sales: &[SaleRecord],
        splits: &[RevenueSplit],
        window: &AggregationWindow,
    ) -> AggregationResult {
        let mut result = AggregationResult::empty(*window);

        let sales_by_id: HashMap<&str, &SaleRecord> = sales
            .iter()
            .filter(|sale| window.contains(sale.created_at))
            .map(|sale| (sale.id.as_str(), sale))
            .collect();

        let mut splits_by_sale: HashMap<&str, Vec<&RevenueSplit>> = HashMap::new();
        for split in splits.iter().filter(|split| window.contains(split.created_at)) {
            splits_by_sale
                .entry(split.sale_id.as_str())
                .or_default()
                .push(split);
        }

        let mut seen_sales: HashSet<&str> = HashSet::new();

        for order in orders.iter().filter(|order| window.contains(order.created_at)) {
            let amount = money::non_negative(order.total_amount);
            let settled = order.status.is_settled();

            result.order_count += 1;
            result.total_gmv = result.total_gmv.saturating_add(amount);
            result
                .by_payment_method
                .entry(order.payment_method)
                .or_default()
                .record(amount, settled);
            result
                .by_source
                .entry(order.source)
                .or_default()
                .record(amount, settled);

            if !settled {
                continue;
            }
            result.settled_order_count += 1;
            result.paid_gmv = result.paid_gmv.saturating_add(amount);

            let Some(sale) = order
                .sale_id
                .as_deref()
                .and_then(|sale_id| sales_by_id.get(sale_id).copied())
            else {
                continue;
            };
            // Several orders may point at one sale; count it once
            if !seen_sales.insert(sale.id.as_str()) {
                continue;
            }

            let costs = SaleCosts::for_sale(sale);
            result.total_interest_revenue = result.total_interest_revenue.saturating_add(costs.interest);
            result.total_gateway_cost = result.total_gateway_cost.saturating_add(costs.gateway_fee);
            result.total_anticipation_cost =
                result.total_anticipation_cost.saturating_add(costs.anticipation_cost);

            let mut sale_splits = SplitTotals::default();
            for split in splits_by_sale.get(sale.id.as_str()).into_iter().flatten() {
                if !sale_splits.add(split.participant_type, money::non_negative(split.net_amount)) {
                    result.ignored_split_count += 1;
                    debug!(sale_id = %split.sale_id, "Ignoring split with unknown participant type");
                }
            }
            result.split_totals.merge(&sale_splits);

            result.rows.push(SaleReportRow {
                sale_id: sale.id.clone(),
                order_id: order.id.clone(),
                created_at: sale.created_at,
                payment_method: sale.payment_method,
                source: order.source,
                status: order.status,
                installment_count: sale.installment_count,
                total_amount: money::non_negative(sale.total_amount),
                interest: costs.interest,
                gateway_fee: costs.gateway_fee,
                gateway_fee_estimated: costs.gateway_fee_estimated,
                anticipation_cost: costs.anticipation_cost,
                splits: sale_splits,
            });
        }

        result.conversion_rate = money::ratio(result.settled_order_count, result.order_count);
        result.platform_profit = result
            .split_totals
            .platform_fee
            .saturating_add(result.total_interest_revenue)
            .saturating_sub(result.total_gateway_cost)
            .saturating_sub(result.total_anticipation_cost);

        result
    }
}
