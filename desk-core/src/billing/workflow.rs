use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Billing, ServiceOrderSummary, SubmissionReceipt};

use super::aggregator;
use super::error::BillingResult;
use crate::audit_log;
use crate::gateway::Gateway;

/// Async billing flows over a [`Gateway`]
///
/// Local validation always runs before the collaborator is called. Failures
/// are reported once, without retry, and never modify the caller's billing.
pub struct BillingAggregator<G> {
    gateway: G,
    default_tax_percent: Decimal,
}

impl<G: Gateway> BillingAggregator<G> {
    pub fn new(gateway: G, default_tax_percent: Decimal) -> Self {
        Self {
            gateway,
            default_tax_percent,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fresh billing seeded with the default tax percent
    pub fn start(&self, date: NaiveDate) -> Billing {
        let mut billing = Billing::new(date);
        billing.tax_percent = self.default_tax_percent;
        aggregator::recompute_totals(&billing)
    }

    /// Look up an order by id or code and add it
    pub async fn add_order(&self, current: &Billing, order_ref: &str) -> BillingResult<Billing> {
        if current.contains_order(order_ref) {
            tracing::debug!(order_ref = %order_ref, "Service order already in billing");
            return Ok(current.clone());
        }

        let lookup = self.gateway.service_order(order_ref).await.map_err(|e| {
            tracing::warn!(order_ref = %order_ref, error = %e, "Service order lookup failed");
            e
        })?;
        aggregator::apply_lookup(current, lookup)
    }

    pub fn remove_order(&self, current: &Billing, service_order_id: &str) -> Billing {
        aggregator::remove_order(current, service_order_id)
    }

    /// Load a stored billing for edit
    pub async fn reopen(&self, billing_id: &str) -> BillingResult<Billing> {
        let persisted = self.gateway.service_billing(billing_id).await?;
        let billing = aggregator::from_persisted(persisted);
        tracing::info!(
            billing_id = %billing_id,
            line_items = billing.line_items.len(),
            "Billing reopened for edit"
        );
        Ok(billing)
    }

    /// Mini-list entries not yet in the billing
    pub async fn selectable_orders(
        &self,
        current: &Billing,
    ) -> BillingResult<Vec<ServiceOrderSummary>> {
        let list = self.gateway.service_order_mini_list().await?;
        Ok(list
            .into_iter()
            .filter(|s| !current.contains_order(&s.id) && !current.contains_order(&s.order_id))
            .collect())
    }

    /// Finalize and persist; edits are PATCHed, fresh billings POSTed
    pub async fn submit(&self, current: &Billing) -> BillingResult<SubmissionReceipt> {
        let submission = aggregator::finalize(current)?;

        let result = match &submission.id {
            Some(id) => self.gateway.update_billing(id, &submission).await,
            None => self.gateway.create_billing(&submission).await,
        };

        let receipt = result.map_err(|e| {
            tracing::warn!(error = %e, "Billing submission failed");
            e
        })?;

        let action = if submission.id.is_some() { "update" } else { "create" };
        let record = receipt
            .record_id()
            .or(submission.id.as_deref())
            .unwrap_or_default()
            .to_string();
        audit_log!(
            action,
            "service-billing",
            format!(
                "record={} customer={} final_total={} paid={}",
                record, submission.customer_id, submission.final_total, submission.paid_amount
            )
        );
        tracing::info!(
            action = action,
            customer_id = %submission.customer_id,
            line_items = submission.line_items.len(),
            "Billing submitted"
        );
        Ok(receipt)
    }
}
