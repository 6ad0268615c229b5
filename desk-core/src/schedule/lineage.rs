//! Order creation modes and the service order draft
//!
//! A new order is either created from scratch, reordered from an earlier
//! order (shares customer context only), or spawned as the recurring
//! continuation of a parent (inherits service and a locked cadence). The
//! submission payload carries at most one lineage marker, chosen by the mode.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{ServiceDefinition, ServiceOrder, ServiceOrderPayload, ServiceOrderStatus};

use super::error::{ScheduleError, ScheduleResult};
use super::recurrence::{compute_next_service_date, validate_cadence};

/// How a new service order comes into being
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum OrderCreationMode {
    Create,
    #[serde(rename_all = "camelCase")]
    Reorder { source_order_id: String },
    #[serde(rename_all = "camelCase")]
    RecurringContinuation { parent_id: String },
}

impl OrderCreationMode {
    /// Id of the order this mode derives from
    pub fn source_id(&self) -> Option<&str> {
        match self {
            OrderCreationMode::Create => None,
            OrderCreationMode::Reorder { source_order_id } => Some(source_order_id),
            OrderCreationMode::RecurringContinuation { parent_id } => Some(parent_id),
        }
    }
}

/// Service order being edited before submission
///
/// Cadence fields are private so every change re-derives `next_service_date`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOrderDraft {
    pub service_id: Option<String>,
    pub customer_id: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub service_charge: Option<Decimal>,
    /// Id of the order this draft was reordered from
    pub reorder_of: Option<String>,
    /// Code of the order this draft was reordered from
    pub reorder_code: Option<String>,
    pub parent_service_order_id: Option<String>,
    date: Option<NaiveDate>,
    is_recurring: bool,
    interval: i64,
    next_service_date: Option<NaiveDate>,
    cadence_locked: bool,
    cadence_seeded: bool,
}

impl ServiceOrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn is_recurring(&self) -> bool {
        self.is_recurring
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    pub fn next_service_date(&self) -> Option<NaiveDate> {
        self.next_service_date
    }

    pub fn is_cadence_locked(&self) -> bool {
        self.cadence_locked
    }

    /// Whether a catalog service may still seed the cadence
    pub fn can_seed(&self) -> bool {
        !self.cadence_locked && !self.cadence_seeded
    }

    fn refresh_next_service_date(&mut self) {
        self.next_service_date =
            compute_next_service_date(self.date, self.is_recurring, self.interval);
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
        self.refresh_next_service_date();
    }

    pub fn set_recurring(&mut self, is_recurring: bool) -> ScheduleResult<()> {
        if self.cadence_locked {
            return Err(ScheduleError::CadenceLocked);
        }
        self.is_recurring = is_recurring;
        self.refresh_next_service_date();
        Ok(())
    }

    pub fn set_interval(&mut self, interval: i64) -> ScheduleResult<()> {
        if self.cadence_locked {
            return Err(ScheduleError::CadenceLocked);
        }
        self.interval = interval;
        self.refresh_next_service_date();
        Ok(())
    }

    /// Take the selected service's default cadence, once
    ///
    /// Returns `false` when the draft was already seeded or its cadence is
    /// inherited; the draft is then left unchanged.
    pub fn seed_from_service(&mut self, service: &ServiceDefinition) -> bool {
        if !self.can_seed() {
            return false;
        }
        self.service_id = Some(service.id.clone());
        self.is_recurring = service.is_recurring;
        self.interval = service.interval;
        if self.service_charge.is_none() {
            self.service_charge = service.charge;
        }
        self.cadence_seeded = true;
        self.refresh_next_service_date();
        true
    }
}

fn check_source<'a>(
    source: Option<&'a ServiceOrder>,
    expected: &str,
) -> ScheduleResult<&'a ServiceOrder> {
    let source = source.ok_or(ScheduleError::MissingSource)?;
    if source.id != expected {
        return Err(ScheduleError::SourceMismatch {
            expected: expected.to_string(),
            found: source.id.clone(),
        });
    }
    Ok(source)
}

/// Initial draft for a creation mode
pub fn derive_order_mode(
    source: Option<&ServiceOrder>,
    mode: &OrderCreationMode,
) -> ScheduleResult<ServiceOrderDraft> {
    match mode {
        OrderCreationMode::Create => Ok(ServiceOrderDraft::new()),
        OrderCreationMode::Reorder { source_order_id } => {
            let source = check_source(source, source_order_id)?;
            Ok(ServiceOrderDraft {
                customer_id: Some(source.customer_id.clone()),
                contact_number: source.contact_number.clone(),
                address: source.address.clone(),
                reorder_of: Some(source.id.clone()),
                reorder_code: Some(source.order_id.clone()),
                ..ServiceOrderDraft::default()
            })
        }
        OrderCreationMode::RecurringContinuation { parent_id } => {
            let source = check_source(source, parent_id)?;
            let next = source
                .next_service_date
                .filter(|_| source.is_recurring)
                .ok_or_else(|| ScheduleError::NotRecurring(source.order_id.clone()))?;
            // the inherited cadence is locked, so it must already be valid
            validate_cadence(source.is_recurring, source.interval)?;

            let mut draft = ServiceOrderDraft {
                service_id: Some(source.service_id.clone()),
                customer_id: Some(source.customer_id.clone()),
                contact_number: source.contact_number.clone(),
                address: source.address.clone(),
                parent_service_order_id: Some(source.id.clone()),
                date: Some(next),
                is_recurring: source.is_recurring,
                interval: source.interval,
                cadence_locked: true,
                cadence_seeded: true,
                ..ServiceOrderDraft::default()
            };
            draft.refresh_next_service_date();
            Ok(draft)
        }
    }
}

/// Minimal creation payload for the draft under the given mode
///
/// Required fields and cadence are validated first; the lineage marker
/// that does not belong to the mode is never emitted.
pub fn project_submission(
    draft: &ServiceOrderDraft,
    mode: &OrderCreationMode,
) -> ScheduleResult<ServiceOrderPayload> {
    let customer_id = draft
        .customer_id
        .clone()
        .ok_or(ScheduleError::MissingField("customerId"))?;
    let service_id = draft
        .service_id
        .clone()
        .ok_or(ScheduleError::MissingField("serviceId"))?;
    let date = draft.date.ok_or(ScheduleError::MissingField("date"))?;
    validate_cadence(draft.is_recurring, draft.interval)?;

    let (order, order_id, parent_service_order_id) = match mode {
        OrderCreationMode::Create => (None, None, None),
        OrderCreationMode::Reorder { source_order_id } => (
            Some(source_order_id.clone()),
            draft.reorder_code.clone(),
            None,
        ),
        OrderCreationMode::RecurringContinuation { parent_id } => {
            (None, None, Some(parent_id.clone()))
        }
    };

    Ok(ServiceOrderPayload {
        service_id,
        customer_id,
        contact_number: draft.contact_number.clone(),
        address: draft.address.clone(),
        date,
        service_charge: draft.service_charge,
        is_recurring: draft.is_recurring,
        interval: if draft.is_recurring { draft.interval } else { 0 },
        next_service_date: compute_next_service_date(
            Some(date),
            draft.is_recurring,
            draft.interval,
        ),
        parent_service_order_id,
        order,
        order_id,
        status: ServiceOrderStatus::Pending,
    })
}
