// desk-core/tests/schedule_flow.rs
// Service order creation flows against the in-memory gateway

mod common;

use common::{FakeGateway, Submitted, date, order};
use desk_core::schedule::{OrderCreationMode, OrderScheduler, ScheduleError};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{ServiceDefinition, ServiceOrderStatus};

fn gateway() -> FakeGateway {
    let mut recurring = order("so-1", "cust-1", 1000);
    recurring.service_id = "svc-pest".to_string();
    recurring.is_recurring = true;
    recurring.interval = 30;
    recurring.next_service_date = Some(date(2024, 1, 31));
    recurring.contact_number = Some("555-0101".to_string());
    recurring.status = ServiceOrderStatus::Completed;

    FakeGateway::new()
        .with_order(recurring, vec![])
        .with_order(order("so-2", "cust-2", 120), vec![])
        .with_service(ServiceDefinition {
            id: "svc-ac".to_string(),
            name: "AC maintenance".to_string(),
            is_recurring: true,
            interval: 90,
            charge: Some(Decimal::from(80)),
        })
}

fn reorder(id: &str) -> OrderCreationMode {
    OrderCreationMode::Reorder {
        source_order_id: id.to_string(),
    }
}

fn continuation(id: &str) -> OrderCreationMode {
    OrderCreationMode::RecurringContinuation {
        parent_id: id.to_string(),
    }
}

#[tokio::test]
async fn test_create_needs_no_lookup() {
    let scheduler = OrderScheduler::new(gateway());
    let draft = scheduler.prepare(&OrderCreationMode::Create).await.unwrap();
    assert!(draft.customer_id.is_none());
    assert!(draft.can_seed());
    assert_eq!(scheduler.gateway().lookup_count(), 0);
}

#[tokio::test]
async fn test_seed_then_submit_fresh_order() {
    let scheduler = OrderScheduler::new(gateway());
    let mode = OrderCreationMode::Create;
    let mut draft = scheduler.prepare(&mode).await.unwrap();
    draft.customer_id = Some("cust-9".to_string());
    draft.set_date(Some(date(2024, 1, 1)));

    assert!(scheduler.seed_from_service(&mut draft, "svc-ac").await.unwrap());
    assert_eq!(draft.next_service_date(), Some(date(2024, 3, 31)));

    // second selection keeps the seeded cadence
    assert!(!scheduler.seed_from_service(&mut draft, "svc-other").await.unwrap());
    assert_eq!(draft.service_id.as_deref(), Some("svc-other"));
    assert_eq!(draft.interval(), 90);

    let receipt = scheduler.submit(&draft, &mode).await.unwrap();
    assert_eq!(receipt.record_id(), Some("so-new"));

    match scheduler.gateway().submitted().as_slice() {
        [Submitted::CreateServiceOrder(payload)] => {
            assert_eq!(payload.status, ServiceOrderStatus::Pending);
            assert_eq!(payload.service_charge, Some(Decimal::from(80)));
            assert_eq!(payload.next_service_date, Some(date(2024, 3, 31)));
            assert!(payload.order.is_none());
            assert!(payload.parent_service_order_id.is_none());
        }
        other => panic!("unexpected submissions: {other:?}"),
    }
}

#[tokio::test]
async fn test_reorder_submits_source_reference() {
    let scheduler = OrderScheduler::new(gateway());
    let mode = reorder("so-2");
    let mut draft = scheduler.prepare(&mode).await.unwrap();
    assert_eq!(draft.customer_id.as_deref(), Some("cust-2"));

    assert!(scheduler.seed_from_service(&mut draft, "svc-ac").await.unwrap());
    draft.set_date(Some(date(2024, 6, 1)));
    scheduler.submit(&draft, &mode).await.unwrap();

    match scheduler.gateway().submitted().as_slice() {
        [Submitted::CreateServiceOrder(payload)] => {
            assert_eq!(payload.order.as_deref(), Some("so-2"));
            assert_eq!(payload.order_id.as_deref(), Some("SO-so-2"));
            assert!(payload.parent_service_order_id.is_none());
        }
        other => panic!("unexpected submissions: {other:?}"),
    }
}

#[tokio::test]
async fn test_continuation_inherits_locked_cadence() {
    let scheduler = OrderScheduler::new(gateway());
    let mode = continuation("so-1");
    let mut draft = scheduler.prepare(&mode).await.unwrap();

    assert_eq!(draft.date(), Some(date(2024, 1, 31)));
    assert_eq!(draft.next_service_date(), Some(date(2024, 3, 1)));
    assert!(!scheduler.seed_from_service(&mut draft, "svc-ac").await.unwrap());
    assert_eq!(draft.service_id.as_deref(), Some("svc-pest"));
    assert_eq!(draft.set_interval(7), Err(ScheduleError::CadenceLocked));

    scheduler.submit(&draft, &mode).await.unwrap();
    match scheduler.gateway().submitted().as_slice() {
        [Submitted::CreateServiceOrder(payload)] => {
            assert_eq!(payload.parent_service_order_id.as_deref(), Some("so-1"));
            assert!(payload.order.is_none() && payload.order_id.is_none());
            assert_eq!(payload.interval, 30);
        }
        other => panic!("unexpected submissions: {other:?}"),
    }
}

#[tokio::test]
async fn test_continuation_of_one_off_order_rejected() {
    let scheduler = OrderScheduler::new(gateway());
    let err = scheduler.prepare(&continuation("so-2")).await.unwrap_err();
    assert_eq!(err, ScheduleError::NotRecurring("SO-so-2".to_string()));
}

#[tokio::test]
async fn test_missing_source_order() {
    let scheduler = OrderScheduler::new(gateway());
    let err = scheduler.prepare(&reorder("so-404")).await.unwrap_err();
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ServiceOrderNotFound);
}

#[tokio::test]
async fn test_invalid_draft_never_submitted() {
    let scheduler = OrderScheduler::new(gateway());
    let mode = OrderCreationMode::Create;
    let mut draft = scheduler.prepare(&mode).await.unwrap();
    draft.customer_id = Some("cust-9".to_string());
    draft.service_id = Some("svc-ac".to_string());
    draft.set_date(Some(date(2024, 1, 1)));
    draft.set_recurring(true).unwrap();

    let err = scheduler.submit(&draft, &mode).await.unwrap_err();
    assert_eq!(err, ScheduleError::InvalidInterval(0));
    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::InvalidInterval);
    assert!(scheduler.gateway().submitted().is_empty());
}

#[tokio::test]
async fn test_submit_failure_passes_message_through() {
    let scheduler = OrderScheduler::new(gateway());
    let mode = OrderCreationMode::Create;
    let mut draft = scheduler.prepare(&mode).await.unwrap();
    draft.customer_id = Some("cust-9".to_string());
    draft.service_id = Some("svc-ac".to_string());
    draft.set_date(Some(date(2024, 1, 1)));

    scheduler.gateway().fail_with("Customer is blocked");
    let err = scheduler.submit(&draft, &mode).await.unwrap_err();
    assert_eq!(err.to_string(), "Customer is blocked");
    assert!(scheduler.gateway().submitted().is_empty());
}
