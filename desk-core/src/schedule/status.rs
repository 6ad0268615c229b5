//! Work status lifecycle of a service order
//!
//! ```text
//! Draft → Pending → Completed
//!                 → Cancelled
//!                 → Delayed → Completed
//!                           → Cancelled
//! ```
//!
//! Payment status is a separate axis moved only by billing.

use serde::{Deserialize, Serialize};
use shared::models::ServiceOrderStatus;

use super::error::{ScheduleError, ScheduleResult};

/// Status including the pre-submission draft stage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Draft,
    Pending,
    Completed,
    Cancelled,
    Delayed,
}

impl OrderState {
    pub fn can_transition_to(self, to: OrderState) -> bool {
        use OrderState::*;
        matches!(
            (self, to),
            (Draft, Pending)
                | (Pending, Completed | Cancelled | Delayed)
                | (Delayed, Completed | Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderState::Completed | OrderState::Cancelled)
    }

    /// Persisted status; `None` for drafts
    pub fn as_status(self) -> Option<ServiceOrderStatus> {
        match self {
            OrderState::Draft => None,
            OrderState::Pending => Some(ServiceOrderStatus::Pending),
            OrderState::Completed => Some(ServiceOrderStatus::Completed),
            OrderState::Cancelled => Some(ServiceOrderStatus::Cancelled),
            OrderState::Delayed => Some(ServiceOrderStatus::Delayed),
        }
    }
}

impl From<ServiceOrderStatus> for OrderState {
    fn from(status: ServiceOrderStatus) -> Self {
        match status {
            ServiceOrderStatus::Pending => OrderState::Pending,
            ServiceOrderStatus::Completed => OrderState::Completed,
            ServiceOrderStatus::Cancelled => OrderState::Cancelled,
            ServiceOrderStatus::Delayed => OrderState::Delayed,
        }
    }
}

pub fn ensure_transition(from: OrderState, to: OrderState) -> ScheduleResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(ScheduleError::InvalidTransition { from, to })
    }
}

/// Next persisted status for an existing order
pub fn advance(current: ServiceOrderStatus, to: ServiceOrderStatus) -> ScheduleResult<ServiceOrderStatus> {
    ensure_transition(current.into(), to.into())?;
    Ok(to)
}
