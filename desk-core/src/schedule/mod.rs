//! Recurring-service scheduling
//!
//! Derives next service dates, shapes new orders by creation mode and
//! guards the work status lifecycle.

pub mod error;
pub mod lineage;
pub mod recurrence;
pub mod status;
pub mod workflow;

pub use error::{ScheduleError, ScheduleResult};
pub use lineage::{OrderCreationMode, ServiceOrderDraft, derive_order_mode, project_submission};
pub use recurrence::{compute_next_service_date, validate_cadence};
pub use status::{OrderState, advance, ensure_transition};
pub use workflow::OrderScheduler;
