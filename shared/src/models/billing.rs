//! Billing Model
//!
//! A billing aggregates the remaining balances of one customer's service
//! orders and records a new payment against them. The computed fields are
//! owned by the aggregator in `desk-core`; this module only defines shapes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::service_order::PaymentStatus;

/// A billing previously recorded against a service order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriorBilling {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(with = "crate::util::date")]
    pub date: NaiveDate,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
}

/// A service order as seen by the billing aggregator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillingLineItem {
    pub service_order_id: String,
    /// Human-readable order code
    pub order_id: String,
    #[serde(default)]
    pub order: Option<String>,
    pub customer_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    /// Sum of payments recorded against this order by other billings
    #[serde(default, with = "rust_decimal::serde::float")]
    pub prior_paid_amount: Decimal,
    /// max(service_charge - prior_paid_amount, 0)
    #[serde(default, with = "rust_decimal::serde::float")]
    pub remaining_balance: Decimal,
    /// Prior billings that contributed to `prior_paid_amount`
    #[serde(default)]
    pub prior_billings: Vec<PriorBilling>,
}

/// The payable record being constructed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    /// Present only when an existing billing was re-opened for edit
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(with = "crate::util::date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Keyed by service order id; insert-if-absent keeps lines unique
    #[serde(default)]
    pub line_items: BTreeMap<String, BillingLineItem>,

    // === Inputs ===
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax_percent: Decimal,
    /// The new payment being recorded now
    #[serde(default, with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,

    // === Computed Fields ===
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub previous_paid_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub taxable_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub final_total: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub remaining_amount: Decimal,
}

impl Billing {
    /// Empty fresh billing for the given date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: None,
            date,
            customer_id: None,
            line_items: BTreeMap::new(),
            discount_percent: Decimal::ZERO,
            tax_percent: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            previous_paid_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            taxable_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            final_total: Decimal::ZERO,
            remaining_amount: Decimal::ZERO,
        }
    }

    /// Whether this billing re-opens an existing record
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Whether the order is already one of the line items, by id or by code
    pub fn contains_order(&self, order_ref: &str) -> bool {
        self.line_items.contains_key(order_ref)
            || self.line_items.values().any(|l| l.order_id == order_ref)
    }
}

/// Line item stored with a persisted billing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLineItem {
    pub service_order_id: String,
    pub order_id: String,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub service_charge: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub prior_paid_amount: Decimal,
}

/// Billing as stored by the backend, loaded when re-opening for edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBilling {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(with = "crate::util::date")]
    pub date: NaiveDate,
    pub customer_id: String,
    #[serde(default)]
    pub line_items: Vec<PersistedLineItem>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub tax_percent: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
}

/// Minimal line reference sent on submission; the server recomputes the rest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillingLineRef {
    pub service_order_id: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Finalized billing handed to the persistence API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillingSubmission {
    /// Routing only: `Some` means PATCH the existing record
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(with = "crate::util::date")]
    pub date: NaiveDate,
    pub customer_id: String,
    pub line_items: Vec<BillingLineRef>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub previous_paid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub taxable_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_percent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_amount: Decimal,
    pub payment_status: PaymentStatus,
}
