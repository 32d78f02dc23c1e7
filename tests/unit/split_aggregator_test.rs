// Split aggregation and profitability tests

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::Duration;
use helpers::TestDataFactory as Data;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vitrine::reports::models::{
    AggregationWindow, OrderSource, OrderStatus, ParticipantType, PaymentMethod, SplitTotals,
};
use vitrine::reports::SplitAggregator;

#[test]
fn test_empty_input_gives_zero_report() {
    let result = SplitAggregator::aggregate(&[], &[], &[], &Data::window());

    assert_eq!(result.split_totals, SplitTotals::default());
    for participant in ParticipantType::KNOWN {
        assert_eq!(result.split_totals.get(participant), 0);
    }
    assert_eq!(result.total_gmv, 0);
    assert_eq!(result.paid_gmv, 0);
    assert_eq!(result.conversion_rate, Decimal::ZERO);
    assert_eq!(result.platform_profit, 0);
    assert!(result.by_payment_method.is_empty());
    assert!(result.rows.is_empty());
    assert!(result.is_empty());
}

#[test]
fn test_unsettled_order_only_counts_toward_gmv() {
    let (mut order, sale) = Data::paid_sale("order-1", "sale-1", 20000, PaymentMethod::CreditCard);
    order.status = OrderStatus::CartAbandoned;
    let splits = vec![
        Data::split("sale-1", ParticipantType::PlatformFee, 1000),
        Data::split("sale-1", ParticipantType::Tenant, 18000),
    ];

    let result = SplitAggregator::aggregate(&[order], &[sale], &splits, &Data::window());

    assert_eq!(result.order_count, 1);
    assert_eq!(result.total_gmv, 20000);
    assert_eq!(result.settled_order_count, 0);
    assert_eq!(result.paid_gmv, 0);
    assert_eq!(result.split_totals.total(), 0);
    assert_eq!(result.total_gateway_cost, 0);
    assert_eq!(result.total_anticipation_cost, 0);
    assert_eq!(result.platform_profit, 0);
    assert!(result.rows.is_empty());
}

#[test]
fn test_every_settled_status_is_counted() {
    let statuses = [
        OrderStatus::Paid,
        OrderStatus::Approved,
        OrderStatus::PaymentConfirmed,
        OrderStatus::Delivered,
        OrderStatus::Dispatched,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
        OrderStatus::Failed,
        OrderStatus::from("something_new"),
    ];
    let orders: Vec<_> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let mut order = Data::order(&format!("order-{}", i), 1000);
            order.status = *status;
            order
        })
        .collect();

    let result = SplitAggregator::aggregate(&orders, &[], &[], &Data::window());

    assert_eq!(result.order_count, 10);
    assert_eq!(result.settled_order_count, 5);
    assert_eq!(result.total_gmv, 10000);
    assert_eq!(result.paid_gmv, 5000);
    assert_eq!(result.conversion_rate, dec!(0.5));
}

#[test]
fn test_window_is_half_open() {
    let window = Data::window();

    let (mut at_start, mut sale_at_start) = Data::paid_sale("order-start", "sale-start", 10000, PaymentMethod::Pix);
    at_start.created_at = window.start();
    sale_at_start.created_at = window.start();

    let (mut at_end, mut sale_at_end) = Data::paid_sale("order-end", "sale-end", 30000, PaymentMethod::Pix);
    at_end.created_at = window.end();
    sale_at_end.created_at = window.end();

    let (mut before, mut sale_before) = Data::paid_sale("order-before", "sale-before", 70000, PaymentMethod::Pix);
    before.created_at = window.start() - Duration::seconds(1);
    sale_before.created_at = before.created_at;

    let mut split_at_end = Data::split("sale-end", ParticipantType::PlatformFee, 900);
    split_at_end.created_at = window.end();

    let result = SplitAggregator::aggregate(
        &[at_start, at_end, before],
        &[sale_at_start, sale_at_end, sale_before],
        &[
            Data::split("sale-start", ParticipantType::PlatformFee, 500),
            split_at_end,
        ],
        &window,
    );

    assert_eq!(result.order_count, 1);
    assert_eq!(result.total_gmv, 10000);
    assert_eq!(result.split_totals.platform_fee, 500);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].sale_id, "sale-start");
}

#[test]
fn test_sale_outside_window_is_excluded_even_for_inside_order() {
    let window = Data::window();
    let (order, mut sale) = Data::paid_sale("order-1", "sale-1", 50000, PaymentMethod::CreditCard);
    sale.created_at = window.end() + Duration::days(2);

    let result = SplitAggregator::aggregate(
        &[order],
        &[sale],
        &[Data::split("sale-1", ParticipantType::PlatformFee, 2500)],
        &window,
    );

    // The order still counts as paid GMV, but nothing from the sale
    assert_eq!(result.paid_gmv, 50000);
    assert_eq!(result.total_gateway_cost, 0);
    assert_eq!(result.total_anticipation_cost, 0);
    assert_eq!(result.split_totals.total(), 0);
    assert!(result.rows.is_empty());
}

#[test]
fn test_gateway_fee_fallback() {
    let (order, sale) = Data::paid_sale("order-1", "sale-1", 50000, PaymentMethod::Pix);

    let result = SplitAggregator::aggregate(&[order], &[sale], &[], &Data::window());

    assert_eq!(result.total_gateway_cost, 449);
    assert!(result.rows[0].gateway_fee_estimated);
}

#[test]
fn test_stored_gateway_fee_wins() {
    let (order, mut sale) = Data::paid_sale("order-1", "sale-1", 50000, PaymentMethod::Pix);
    sale.gateway_fee = Some(199);

    let result = SplitAggregator::aggregate(&[order], &[sale], &[], &Data::window());

    assert_eq!(result.total_gateway_cost, 199);
    assert!(!result.rows[0].gateway_fee_estimated);
}

#[test]
fn test_anticipation_only_for_credit_card() {
    let (pix_order, pix_sale) = Data::paid_sale("order-pix", "sale-pix", 100000, PaymentMethod::Pix);
    let (boleto_order, boleto_sale) = Data::paid_sale("order-boleto", "sale-boleto", 100000, PaymentMethod::Boleto);
    let (card_order, card_sale) = Data::paid_sale("order-card", "sale-card", 100000, PaymentMethod::CreditCard);

    let result = SplitAggregator::aggregate(
        &[pix_order, boleto_order, card_order],
        &[pix_sale, boleto_sale, card_sale],
        &[],
        &Data::window(),
    );

    for row in &result.rows {
        match row.payment_method {
            PaymentMethod::CreditCard => assert_eq!(row.anticipation_cost, 1400),
            _ => assert_eq!(row.anticipation_cost, 0),
        }
    }
    assert_eq!(result.total_anticipation_cost, 1400);
}

#[test]
fn test_profitability_for_installment_card_sale() {
    let (mut order, mut sale) = Data::paid_sale("order-1", "sale-1", 10350, PaymentMethod::CreditCard);
    order.source = OrderSource::LandingPage;
    sale.subtotal_amount = 10000;
    sale.installment_count = 3;
    sale.gateway_fee = Some(120);

    let splits = vec![
        Data::split("sale-1", ParticipantType::PlatformFee, 517),
        Data::split("sale-1", ParticipantType::Tenant, 8000),
        Data::split("sale-1", ParticipantType::Affiliate, 1000),
        Data::split("sale-1", ParticipantType::GatewayFee, 120),
        Data::split("sale-1", ParticipantType::from("mystery_partner"), 99),
    ];

    let result = SplitAggregator::aggregate(&[order], &[sale], &splits, &Data::window());

    // 10350 * 0.014 = 144.9
    assert_eq!(result.total_anticipation_cost, 145);
    assert_eq!(result.total_interest_revenue, 350);
    assert_eq!(result.total_gateway_cost, 120);
    assert_eq!(result.platform_profit, 517 + 350 - 120 - 145);
    assert_eq!(result.split_totals.tenant, 8000);
    assert_eq!(result.split_totals.affiliate, 1000);
    assert_eq!(result.split_totals.gateway_fee, 120);
    assert_eq!(result.ignored_split_count, 1);

    let row = &result.rows[0];
    assert_eq!(row.installment_count, 3);
    assert_eq!(row.source, OrderSource::LandingPage);
    assert_eq!(row.splits.platform_fee, 517);
}

#[test]
fn test_profit_can_go_negative() {
    let (order, sale) = Data::paid_sale("order-1", "sale-1", 100000, PaymentMethod::CreditCard);

    let result = SplitAggregator::aggregate(&[order], &[sale], &[], &Data::window());

    assert_eq!(result.platform_profit, -(889 + 1400));
}

#[test]
fn test_channel_breakdowns() {
    let (card_paid, card_sale) = Data::paid_sale("order-1", "sale-1", 30000, PaymentMethod::CreditCard);
    let mut card_abandoned = Data::order("order-2", 10000);
    card_abandoned.payment_method = PaymentMethod::CreditCard;
    card_abandoned.status = OrderStatus::CartAbandoned;
    card_abandoned.source = OrderSource::StandaloneCheckout;
    let mut pix_pending = Data::order("order-3", 5000);
    pix_pending.status = OrderStatus::Pending;

    let result = SplitAggregator::aggregate(
        &[card_paid, card_abandoned, pix_pending],
        &[card_sale],
        &[],
        &Data::window(),
    );

    let card = result.by_payment_method[&PaymentMethod::CreditCard];
    assert_eq!(card.count, 2);
    assert_eq!(card.total_amount, 40000);
    assert_eq!(card.settled_count, 1);
    assert_eq!(card.settled_amount, 30000);
    assert_eq!(card.conversion_rate, dec!(0.5));

    let pix = result.by_payment_method[&PaymentMethod::Pix];
    assert_eq!(pix.count, 1);
    assert_eq!(pix.conversion_rate, Decimal::ZERO);

    let storefront = result.by_source[&OrderSource::Storefront];
    assert_eq!(storefront.count, 2);
    assert_eq!(storefront.settled_count, 1);
    assert_eq!(result.by_source[&OrderSource::StandaloneCheckout].count, 1);

    assert_eq!(result.conversion_rate, dec!(0.3333));
}

#[test]
fn test_splits_without_linked_order_are_ignored() {
    let (order, sale) = Data::paid_sale("order-1", "sale-1", 10000, PaymentMethod::Pix);
    let orphan = Data::sale("sale-orphan", 99000);

    let result = SplitAggregator::aggregate(
        &[order],
        &[sale, orphan],
        &[
            Data::split("sale-1", ParticipantType::PlatformFee, 300),
            Data::split("sale-orphan", ParticipantType::PlatformFee, 5000),
        ],
        &Data::window(),
    );

    assert_eq!(result.split_totals.platform_fee, 300);
    assert_eq!(result.rows.len(), 1);
}

#[test]
fn test_split_sums_pass_through_unchecked() {
    let (order, sale) = Data::paid_sale("order-1", "sale-1", 1000, PaymentMethod::Pix);

    let result = SplitAggregator::aggregate(
        &[order],
        &[sale],
        &[
            Data::split("sale-1", ParticipantType::Tenant, 900),
            Data::split("sale-1", ParticipantType::Industry, 900),
        ],
        &Data::window(),
    );

    assert_eq!(result.split_totals.total(), 1800);
}

fn method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Pix),
        Just(PaymentMethod::CreditCard),
        Just(PaymentMethod::Boleto),
        Just(PaymentMethod::Unknown),
    ]
}

proptest! {
    /// Property: anything created outside the window leaves the report empty
    #[test]
    fn prop_out_of_window_records_are_excluded(
        total in 1i64..10_000_000i64,
        offset_secs in 0i64..10_000_000i64,
        after in any::<bool>(),
        method in method_strategy(),
    ) {
        let window: AggregationWindow = Data::window();
        let at = if after {
            window.end() + Duration::seconds(offset_secs)
        } else {
            window.start() - Duration::seconds(offset_secs + 1)
        };

        let (mut order, mut sale) = Data::paid_sale("order-1", "sale-1", total, method);
        let mut split = Data::split("sale-1", ParticipantType::PlatformFee, total / 10);
        order.created_at = at;
        sale.created_at = at;
        split.created_at = at;

        let result = SplitAggregator::aggregate(&[order], &[sale], &[split], &window);

        prop_assert!(result.is_empty());
        prop_assert_eq!(result.total_gmv, 0);
        prop_assert_eq!(result.split_totals.total(), 0);
        prop_assert_eq!(result.total_gateway_cost, 0);
    }

    /// Property: pix and boleto sales never carry anticipation cost
    #[test]
    fn prop_non_card_sales_have_no_anticipation(
        total in 0i64..1_000_000_000i64,
        boleto in any::<bool>(),
    ) {
        let method = if boleto { PaymentMethod::Boleto } else { PaymentMethod::Pix };
        let (order, sale) = Data::paid_sale("order-1", "sale-1", total, method);

        let result = SplitAggregator::aggregate(&[order], &[sale], &[], &Data::window());

        prop_assert_eq!(result.total_anticipation_cost, 0);
    }

    /// Property: paid GMV never exceeds total GMV
    #[test]
    fn prop_paid_gmv_bounded_by_total(
        amounts in prop::collection::vec((0i64..1_000_000i64, any::<bool>()), 0..20),
    ) {
        let orders: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(i, (amount, settled))| {
                let mut order = Data::order(&format!("order-{}", i), *amount);
                if !settled {
                    order.status = OrderStatus::Pending;
                }
                order
            })
            .collect();

        let result = SplitAggregator::aggregate(&orders, &[], &[], &Data::window());

        prop_assert!(result.paid_gmv <= result.total_gmv);
        prop_assert!(result.conversion_rate <= Decimal::ONE);
        prop_assert_eq!(result.order_count, amounts.len() as u64);
    }
}
