//! Service Order Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::billing::PriorBilling;

/// Work status of a service order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceOrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
    Delayed,
}

/// Payment status of a service order
///
/// Orthogonal to [`ServiceOrderStatus`]; only billing moves it forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partial,
    Paid,
}

/// Service order entity (one schedulable, billable unit of work)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    #[serde(alias = "_id")]
    pub id: String,
    /// Human-readable order code
    pub order_id: String,
    pub customer_id: String,
    pub service_id: String,
    #[serde(with = "crate::util::date")]
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    #[serde(default)]
    pub is_recurring: bool,
    /// Cadence in days
    #[serde(default)]
    pub interval: i64,
    #[serde(default, with = "crate::util::date_option")]
    pub next_service_date: Option<NaiveDate>,
    /// Set when spawned as a recurring continuation
    #[serde(default)]
    pub parent_service_order_id: Option<String>,
    /// Id of the order this one was reordered from
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub status: ServiceOrderStatus,
}

/// Mini-list entry used by selection UIs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub order_id: String,
}

/// Lookup response: the order plus every billing recorded against it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderLookup {
    pub service_order: ServiceOrder,
    #[serde(default)]
    pub previous_billings: Vec<PriorBilling>,
}

/// Service order creation body
///
/// Carries at most one lineage marker: `order`/`orderId` for a reorder,
/// `parentServiceOrderId` for a recurring continuation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderPayload {
    pub service_id: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(with = "crate::util::date")]
    pub date: NaiveDate,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub service_charge: Option<Decimal>,
    pub is_recurring: bool,
    pub interval: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::util::date_option"
    )]
    pub next_service_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_service_order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub status: ServiceOrderStatus,
}
