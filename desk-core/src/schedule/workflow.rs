use shared::models::SubmissionReceipt;

use super::error::ScheduleResult;
use super::lineage::{OrderCreationMode, ServiceOrderDraft, derive_order_mode, project_submission};
use crate::audit_log;
use crate::gateway::Gateway;

/// Async service order creation flows over a [`Gateway`]
pub struct OrderScheduler<G> {
    gateway: G,
}

impl<G: Gateway> OrderScheduler<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Initial draft for the mode, fetching the source order when needed
    pub async fn prepare(&self, mode: &OrderCreationMode) -> ScheduleResult<ServiceOrderDraft> {
        let source = match mode.source_id() {
            Some(id) => Some(self.gateway.service_order(id).await?.service_order),
            None => None,
        };
        let draft = derive_order_mode(source.as_ref(), mode)?;
        tracing::debug!(?mode, "Service order draft prepared");
        Ok(draft)
    }

    /// Seed the draft's cadence from a catalog service on first load
    ///
    /// Returns whether the cadence was seeded. A locked draft keeps its
    /// inherited service; an already seeded draft only takes the new service
    /// id. Neither triggers a lookup.
    pub async fn seed_from_service(
        &self,
        draft: &mut ServiceOrderDraft,
        service_id: &str,
    ) -> ScheduleResult<bool> {
        if draft.is_cadence_locked() {
            return Ok(false);
        }
        if !draft.can_seed() {
            draft.service_id = Some(service_id.to_string());
            return Ok(false);
        }
        let service = self.gateway.service(service_id).await?;
        Ok(draft.seed_from_service(&service))
    }

    /// Project and create the order as `pending`
    pub async fn submit(
        &self,
        draft: &ServiceOrderDraft,
        mode: &OrderCreationMode,
    ) -> ScheduleResult<SubmissionReceipt> {
        let payload = project_submission(draft, mode)?;

        let receipt = self
            .gateway
            .create_service_order(&payload)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Service order submission failed");
                e
            })?;

        audit_log!(
            "create",
            "service-order",
            format!(
                "record={} customer={} recurring={} next={:?}",
                receipt.record_id().unwrap_or_default(),
                payload.customer_id,
                payload.is_recurring,
                payload.next_service_date
            )
        );
        tracing::info!(
            customer_id = %payload.customer_id,
            service_id = %payload.service_id,
            "Service order submitted"
        );
        Ok(receipt)
    }
}
