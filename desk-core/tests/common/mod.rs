// Shared fixtures for the async flow tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use desk_core::{OrderLookup, Persistence};
use rust_decimal::Decimal;
use serde_json::json;
use shared::AppResult;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    BillingSubmission, PaymentStatus, PersistedBilling, PriorBilling, ServiceDefinition,
    ServiceOrder, ServiceOrderLookup, ServiceOrderPayload, ServiceOrderStatus,
    ServiceOrderSummary, SubmissionReceipt,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn order(id: &str, customer: &str, charge: i64) -> ServiceOrder {
    ServiceOrder {
        id: id.to_string(),
        order_id: format!("SO-{}", id),
        customer_id: customer.to_string(),
        service_id: "svc-1".to_string(),
        date: date(2024, 1, 1),
        service_charge: Decimal::from(charge),
        is_recurring: false,
        interval: 0,
        next_service_date: None,
        parent_service_order_id: None,
        order: None,
        contact_number: None,
        address: None,
        payment_status: PaymentStatus::Unpaid,
        status: ServiceOrderStatus::Pending,
    }
}

pub fn prior(id: &str, paid: i64) -> PriorBilling {
    PriorBilling {
        id: id.to_string(),
        date: date(2024, 2, 1),
        paid_amount: Decimal::from(paid),
    }
}

/// Recorded write calls
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    CreateBilling(BillingSubmission),
    UpdateBilling(String, BillingSubmission),
    CreateServiceOrder(ServiceOrderPayload),
}

/// In-memory gateway
#[derive(Default)]
pub struct FakeGateway {
    orders: Mutex<HashMap<String, ServiceOrderLookup>>,
    billings: Mutex<HashMap<String, PersistedBilling>>,
    services: Mutex<HashMap<String, ServiceDefinition>>,
    submitted: Mutex<Vec<Submitted>>,
    lookups: Mutex<usize>,
    /// When set, every call fails with this message
    failure: Mutex<Option<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(self, order: ServiceOrder, previous: Vec<PriorBilling>) -> Self {
        self.orders.lock().unwrap().insert(
            order.id.clone(),
            ServiceOrderLookup {
                service_order: order,
                previous_billings: previous,
            },
        );
        self
    }

    pub fn with_billing(self, billing: PersistedBilling) -> Self {
        self.billings
            .lock()
            .unwrap()
            .insert(billing.id.clone(), billing);
        self
    }

    pub fn with_service(self, service: ServiceDefinition) -> Self {
        self.services
            .lock()
            .unwrap()
            .insert(service.id.clone(), service);
        self
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn submitted(&self) -> Vec<Submitted> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        *self.lookups.lock().unwrap()
    }

    fn check(&self) -> AppResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(AppError::network(message)),
            None => Ok(()),
        }
    }

    fn receipt(id: &str) -> SubmissionReceipt {
        SubmissionReceipt {
            success: true,
            message: Some("Saved".to_string()),
            data: Some(json!({ "_id": id })),
        }
    }
}

#[async_trait]
impl OrderLookup for FakeGateway {
    async fn service_order(&self, id: &str) -> AppResult<ServiceOrderLookup> {
        *self.lookups.lock().unwrap() += 1;
        self.check()?;
        let orders = self.orders.lock().unwrap();
        orders
            .get(id)
            .or_else(|| orders.values().find(|l| l.service_order.order_id == id))
            .cloned()
            .ok_or_else(|| AppError::with_message(ErrorCode::ServiceOrderNotFound, "Service order not found"))
    }

    async fn service_order_mini_list(&self) -> AppResult<Vec<ServiceOrderSummary>> {
        self.check()?;
        let mut list: Vec<ServiceOrderSummary> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .map(|l| ServiceOrderSummary {
                id: l.service_order.id.clone(),
                order_id: l.service_order.order_id.clone(),
            })
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    async fn service_billing(&self, id: &str) -> AppResult<PersistedBilling> {
        self.check()?;
        self.billings
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::BillingNotFound))
    }

    async fn service(&self, id: &str) -> AppResult<ServiceDefinition> {
        self.check()?;
        self.services
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("service {}", id)))
    }
}

#[async_trait]
impl Persistence for FakeGateway {
    async fn create_billing(&self, submission: &BillingSubmission) -> AppResult<SubmissionReceipt> {
        self.check()?;
        self.submitted
            .lock()
            .unwrap()
            .push(Submitted::CreateBilling(submission.clone()));
        Ok(Self::receipt("b-new"))
    }

    async fn update_billing(
        &self,
        id: &str,
        submission: &BillingSubmission,
    ) -> AppResult<SubmissionReceipt> {
        self.check()?;
        self.submitted
            .lock()
            .unwrap()
            .push(Submitted::UpdateBilling(id.to_string(), submission.clone()));
        Ok(Self::receipt(id))
    }

    async fn create_service_order(
        &self,
        payload: &ServiceOrderPayload,
    ) -> AppResult<SubmissionReceipt> {
        self.check()?;
        self.submitted
            .lock()
            .unwrap()
            .push(Submitted::CreateServiceOrder(payload.clone()));
        Ok(Self::receipt("so-new"))
    }
}
