//! Billing aggregation
//!
//! - [`aggregator`]: pure operations over an owned [`Billing`](shared::models::Billing)
//! - [`money`]: decimal totals pipeline and input validation
//! - [`workflow`]: async flows that call the lookup and persistence collaborators

pub mod aggregator;
pub mod error;
pub mod money;
pub mod workflow;

pub use aggregator::{
    apply_lookup, finalize, from_persisted, payment_history, recompute_aggregate,
    recompute_totals, remove_order, with_date, with_discount_percent, with_paid_amount,
    with_tax_percent,
};
pub use error::{BillingError, BillingResult};
pub use workflow::BillingAggregator;
