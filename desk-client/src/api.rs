//! Typed endpoints of the service desk backend
//!
//! Only the calls the billing and scheduling core depend on:
//!
//! | Call | Endpoint |
//! |------|----------|
//! | [`DeskApi::service_order`] | `GET service-order/{id}` |
//! | [`DeskApi::service_order_mini_list`] | `GET service-order/mini-list` |
//! | [`DeskApi::service_billing`] | `GET service-billing/{id}` |
//! | [`DeskApi::service`] | `GET service/{id}` |
//! | [`DeskApi::create_billing`] | `POST service-billing` |
//! | [`DeskApi::update_billing`] | `PATCH service-billing/{id}` |
//! | [`DeskApi::create_service_order`] | `POST service-order` |

use serde::Deserialize;
use serde_json::Value;
use urlencoding::encode;
use shared::ApiResponse;
use shared::models::{
    BillingSubmission, PersistedBilling, ServiceDefinition, ServiceOrderLookup,
    ServiceOrderPayload, ServiceOrderSummary, SubmissionReceipt,
};

use crate::{ClientConfig, ClientError, ClientResult, HttpClient, NetworkHttpClient};

const SERVICE_ORDER: &str = "service-order";
const SERVICE_ORDER_MINI_LIST: &str = "service-order/mini-list";
const SERVICE_BILLING: &str = "service-billing";
const SERVICE: &str = "service";

/// `collection/{id}` with the id percent-encoded as one path segment
fn resource_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, encode(id))
}

/// Body that is either bare or wrapped in the backend envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Bare(T),
    Wrapped(ApiResponse<T>),
}

impl<T> Payload<T> {
    fn into_inner(self) -> ClientResult<T> {
        match self {
            Payload::Bare(data) => Ok(data),
            Payload::Wrapped(envelope) if !envelope.is_success() => Err(ClientError::Api {
                status: 200,
                message: envelope.message,
            }),
            Payload::Wrapped(envelope) => envelope.data.ok_or_else(|| {
                ClientError::InvalidResponse("response envelope has no data".to_string())
            }),
        }
    }
}

/// Turn a submission response into a receipt
///
/// A body carrying `success: false` is an error even on a 2xx status.
fn into_receipt(body: Value) -> ClientResult<SubmissionReceipt> {
    let is_envelope = body
        .as_object()
        .is_some_and(|o| o.contains_key("success") || o.contains_key("message"));

    if !is_envelope {
        return Ok(SubmissionReceipt {
            success: true,
            message: None,
            data: (!body.is_null()).then_some(body),
        });
    }

    let envelope: ApiResponse<Value> = serde_json::from_value(body)?;
    if !envelope.is_success() {
        return Err(ClientError::Api {
            status: 200,
            message: envelope.message,
        });
    }
    Ok(SubmissionReceipt::from(envelope))
}

/// Service desk API over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct DeskApi<H: HttpClient = NetworkHttpClient> {
    http: H,
}

impl DeskApi<NetworkHttpClient> {
    /// Build the API from client configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_http_client()?))
    }
}

impl<H: HttpClient> DeskApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Underlying HTTP client
    pub fn http(&self) -> &H {
        &self.http
    }

    /// Service order with every billing recorded against it
    pub async fn service_order(&self, id: &str) -> ClientResult<ServiceOrderLookup> {
        let path = resource_path(SERVICE_ORDER, id);
        self.http
            .get::<Payload<ServiceOrderLookup>>(&path)
            .await?
            .into_inner()
    }

    /// `{id, orderId}` pairs for selection lists
    pub async fn service_order_mini_list(&self) -> ClientResult<Vec<ServiceOrderSummary>> {
        self.http
            .get::<Payload<Vec<ServiceOrderSummary>>>(SERVICE_ORDER_MINI_LIST)
            .await?
            .into_inner()
    }

    /// Stored billing, for re-opening in edit mode
    pub async fn service_billing(&self, id: &str) -> ClientResult<PersistedBilling> {
        let path = resource_path(SERVICE_BILLING, id);
        self.http
            .get::<Payload<PersistedBilling>>(&path)
            .await?
            .into_inner()
    }

    /// Catalog service with its default cadence
    pub async fn service(&self, id: &str) -> ClientResult<ServiceDefinition> {
        let path = resource_path(SERVICE, id);
        self.http
            .get::<Payload<ServiceDefinition>>(&path)
            .await?
            .into_inner()
    }

    pub async fn create_billing(
        &self,
        submission: &BillingSubmission,
    ) -> ClientResult<SubmissionReceipt> {
        let body: Value = self.http.post(SERVICE_BILLING, submission).await?;
        into_receipt(body)
    }

    pub async fn update_billing(
        &self,
        id: &str,
        submission: &BillingSubmission,
    ) -> ClientResult<SubmissionReceipt> {
        let path = resource_path(SERVICE_BILLING, id);
        let body: Value = self.http.patch(&path, submission).await?;
        into_receipt(body)
    }

    pub async fn create_service_order(
        &self,
        payload: &ServiceOrderPayload,
    ) -> ClientResult<SubmissionReceipt> {
        let body: Value = self.http.post(SERVICE_ORDER, payload).await?;
        into_receipt(body)
    }
}
