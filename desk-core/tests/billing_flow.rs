// desk-core/tests/billing_flow.rs
// Billing flows against the in-memory gateway

mod common;

use common::{FakeGateway, Submitted, date, order, prior};
use desk_core::billing::{self, BillingAggregator, BillingError};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{PaymentStatus, PersistedBilling, PersistedLineItem};

fn gateway() -> FakeGateway {
    let mut paid = order("c", "cust-1", 300);
    paid.payment_status = PaymentStatus::Paid;

    FakeGateway::new()
        .with_order(order("a", "cust-1", 1000), vec![prior("b-1", 400)])
        .with_order(order("b", "cust-1", 500), vec![prior("b-2", 500)])
        .with_order(paid, vec![prior("b-3", 300)])
        .with_order(order("d", "cust-1", 250), vec![])
        .with_order(order("x", "cust-2", 80), vec![])
}

#[tokio::test]
async fn test_scenario_discount_then_tax() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::from(13));
    let billing = aggregator.start(date(2024, 5, 1));
    assert_eq!(billing.tax_percent, Decimal::from(13));

    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    let billing = billing::with_discount_percent(&billing, Decimal::from(10)).unwrap();

    assert_eq!(billing.taxable_amount, Decimal::from(900));
    assert_eq!(billing.tax_amount, Decimal::from(117));
    assert_eq!(billing.final_total, Decimal::from(1017));
    assert_eq!(billing.previous_paid_amount, Decimal::from(400));
    assert_eq!(billing.remaining_amount, Decimal::from(617));
}

#[tokio::test]
async fn test_fully_paid_order_rejected() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));
    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    let before = billing.clone();

    let err = aggregator.add_order(&billing, "b").await.unwrap_err();
    assert_eq!(err, BillingError::PaymentAlreadyComplete("SO-b".to_string()));

    let err = aggregator.add_order(&billing, "c").await.unwrap_err();
    assert!(matches!(err, BillingError::PaymentAlreadyComplete(_)));
    assert_eq!(billing, before);
}

#[tokio::test]
async fn test_second_customer_rejected() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));
    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    let before = billing.clone();

    let err = aggregator.add_order(&billing, "x").await.unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::CustomerMismatch);
    assert_eq!(billing, before);
}

#[tokio::test]
async fn test_duplicate_add_skips_lookup() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));
    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    assert_eq!(aggregator.gateway().lookup_count(), 1);

    // by id and by order code
    let again = aggregator.add_order(&billing, "a").await.unwrap();
    let by_code = aggregator.add_order(&billing, "SO-a").await.unwrap();
    assert_eq!(again, billing);
    assert_eq!(by_code, billing);
    assert_eq!(aggregator.gateway().lookup_count(), 1);
}

#[tokio::test]
async fn test_remove_and_readd_round_trip() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::from(13));
    let billing = aggregator.start(date(2024, 5, 1));
    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    let billing = aggregator.add_order(&billing, "d").await.unwrap();

    let removed = aggregator.remove_order(&billing, "d");
    assert_eq!(removed.line_items.len(), 1);
    let readded = aggregator.add_order(&removed, "d").await.unwrap();
    assert_eq!(readded, billing);

    let only_a = aggregator.remove_order(&billing, "d");
    let emptied = aggregator.remove_order(&only_a, "a");
    assert_eq!(emptied.total_amount, Decimal::ZERO);
    assert_eq!(emptied.remaining_amount, Decimal::ZERO);
}

#[tokio::test]
async fn test_lookup_failure_passes_message_through() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));
    aggregator.gateway().fail_with("Service order service unavailable");

    let err = aggregator.add_order(&billing, "a").await.unwrap_err();
    assert_eq!(err.to_string(), "Service order service unavailable");
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::NetworkFailure);
}

#[tokio::test]
async fn test_submit_fresh_billing_posts() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));

    assert_eq!(
        aggregator.submit(&billing).await.unwrap_err(),
        BillingError::EmptyLineItems
    );
    assert!(aggregator.gateway().submitted().is_empty());

    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    let billing = billing::with_paid_amount(&billing, Decimal::from(600)).unwrap();
    let receipt = aggregator.submit(&billing).await.unwrap();
    assert_eq!(receipt.record_id(), Some("b-new"));

    match aggregator.gateway().submitted().as_slice() {
        [Submitted::CreateBilling(submission)] => {
            assert_eq!(submission.customer_id, "cust-1");
            assert_eq!(submission.line_items.len(), 1);
            assert_eq!(submission.remaining_amount, Decimal::ZERO);
            assert_eq!(submission.payment_status, PaymentStatus::Paid);
        }
        other => panic!("unexpected submissions: {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_failure_keeps_billing() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));
    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    let before = billing.clone();

    aggregator.gateway().fail_with("Paid amount exceeds balance");
    let err = aggregator.submit(&billing).await.unwrap_err();
    assert_eq!(err.to_string(), "Paid amount exceeds balance");
    assert_eq!(billing, before);
    assert!(aggregator.gateway().submitted().is_empty());
}

#[tokio::test]
async fn test_reopen_edit_and_patch() {
    let persisted = PersistedBilling {
        id: "b-3".to_string(),
        date: date(2024, 3, 1),
        customer_id: "cust-1".to_string(),
        line_items: vec![PersistedLineItem {
            service_order_id: "c".to_string(),
            order_id: "SO-c".to_string(),
            order: None,
            customer_id: None,
            service_charge: Decimal::from(300),
            prior_paid_amount: Decimal::ZERO,
        }],
        discount_percent: Decimal::ZERO,
        tax_percent: Decimal::ZERO,
        paid_amount: Decimal::from(300),
    };
    let aggregator = BillingAggregator::new(gateway().with_billing(persisted), Decimal::ZERO);

    let billing = aggregator.reopen("b-3").await.unwrap();
    assert!(billing.is_edit());
    assert_eq!(billing.remaining_amount, Decimal::ZERO);

    // paid orders may be added while editing; b-1 still counts as prior payment
    let billing = aggregator.add_order(&billing, "a").await.unwrap();
    assert_eq!(billing.line_items["a"].prior_paid_amount, Decimal::from(400));
    assert_eq!(billing.total_amount, Decimal::from(1300));

    aggregator.submit(&billing).await.unwrap();
    match aggregator.gateway().submitted().as_slice() {
        [Submitted::UpdateBilling(id, submission)] => {
            assert_eq!(id, "b-3");
            assert_eq!(submission.line_items.len(), 2);
        }
        other => panic!("unexpected submissions: {other:?}"),
    }
}

#[tokio::test]
async fn test_reopen_missing_billing() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let err = aggregator.reopen("nope").await.unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::BillingNotFound);
}

#[tokio::test]
async fn test_selectable_orders_excludes_line_items() {
    let aggregator = BillingAggregator::new(gateway(), Decimal::ZERO);
    let billing = aggregator.start(date(2024, 5, 1));
    let billing = aggregator.add_order(&billing, "a").await.unwrap();

    let ids: Vec<String> = aggregator
        .selectable_orders(&billing)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["b", "c", "d", "x"]);
}
