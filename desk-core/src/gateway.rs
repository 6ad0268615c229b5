//! Collaborator seams: order/service lookup and persistence submission
//!
//! The billing and scheduling workflows only see these traits. The REST
//! implementation over [`DeskApi`] converts client errors into [`AppError`]
//! so backend messages reach the caller verbatim.

use async_trait::async_trait;
use desk_client::{ClientError, DeskApi, HttpClient};
use shared::AppResult;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    BillingSubmission, PersistedBilling, ServiceDefinition, ServiceOrderLookup,
    ServiceOrderPayload, ServiceOrderSummary, SubmissionReceipt,
};

/// Read side: fetch orders, billings and catalog services
#[async_trait]
pub trait OrderLookup: Send + Sync {
    /// Service order plus every billing recorded against it
    async fn service_order(&self, id: &str) -> AppResult<ServiceOrderLookup>;

    async fn service_order_mini_list(&self) -> AppResult<Vec<ServiceOrderSummary>>;

    async fn service_billing(&self, id: &str) -> AppResult<PersistedBilling>;

    async fn service(&self, id: &str) -> AppResult<ServiceDefinition>;
}

/// Write side: accept finalized payloads
#[async_trait]
pub trait Persistence: Send + Sync {
    async fn create_billing(&self, submission: &BillingSubmission)
    -> AppResult<SubmissionReceipt>;

    async fn update_billing(
        &self,
        id: &str,
        submission: &BillingSubmission,
    ) -> AppResult<SubmissionReceipt>;

    async fn create_service_order(
        &self,
        payload: &ServiceOrderPayload,
    ) -> AppResult<SubmissionReceipt>;
}

/// Both collaborator sides
pub trait Gateway: OrderLookup + Persistence {}

impl<T: OrderLookup + Persistence> Gateway for T {}

/// Narrow a generic not-found into the resource-specific code
fn not_found_as(code: ErrorCode, id: &str) -> impl FnOnce(ClientError) -> AppError {
    move |err| {
        let err = AppError::from(err);
        if err.code == ErrorCode::NotFound {
            AppError::with_message(code, err.message).with_detail("id", id)
        } else {
            err
        }
    }
}

#[async_trait]
impl<H: HttpClient> OrderLookup for DeskApi<H> {
    async fn service_order(&self, id: &str) -> AppResult<ServiceOrderLookup> {
        DeskApi::service_order(self, id)
            .await
            .map_err(not_found_as(ErrorCode::ServiceOrderNotFound, id))
    }

    async fn service_order_mini_list(&self) -> AppResult<Vec<ServiceOrderSummary>> {
        DeskApi::service_order_mini_list(self)
            .await
            .map_err(AppError::from)
    }

    async fn service_billing(&self, id: &str) -> AppResult<PersistedBilling> {
        DeskApi::service_billing(self, id)
            .await
            .map_err(not_found_as(ErrorCode::BillingNotFound, id))
    }

    async fn service(&self, id: &str) -> AppResult<ServiceDefinition> {
        DeskApi::service(self, id).await.map_err(AppError::from)
    }
}

#[async_trait]
impl<H: HttpClient> Persistence for DeskApi<H> {
    async fn create_billing(
        &self,
        submission: &BillingSubmission,
    ) -> AppResult<SubmissionReceipt> {
        DeskApi::create_billing(self, submission)
            .await
            .map_err(AppError::from)
    }

    async fn update_billing(
        &self,
        id: &str,
        submission: &BillingSubmission,
    ) -> AppResult<SubmissionReceipt> {
        DeskApi::update_billing(self, id, submission)
            .await
            .map_err(AppError::from)
    }

    async fn create_service_order(
        &self,
        payload: &ServiceOrderPayload,
    ) -> AppResult<SubmissionReceipt> {
        DeskApi::create_service_order(self, payload)
            .await
            .map_err(AppError::from)
    }
}
