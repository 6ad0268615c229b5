use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::status::OrderState;

/// Scheduling rejections
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Interval must be a positive number of days when recurring, got {0}")]
    InvalidInterval(i64),

    #[error("Cadence is inherited from the parent order and cannot be edited")]
    CadenceLocked,

    #[error("Service order {0} has no next service date to continue from")]
    NotRecurring(String),

    #[error("Source order {found} does not match requested {expected}")]
    SourceMismatch { expected: String, found: String },

    #[error("Source order is required for this creation mode")]
    MissingSource,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderState, to: OrderState },

    /// Lookup or submission failed; carries the collaborator's error as-is
    #[error("{0}")]
    NetworkFailure(AppError),
}

impl From<AppError> for ScheduleError {
    fn from(err: AppError) -> Self {
        ScheduleError::NetworkFailure(err)
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        let message = err.to_string();
        match err {
            ScheduleError::InvalidInterval(interval) => {
                AppError::with_message(ErrorCode::InvalidInterval, message)
                    .with_detail("interval", interval)
            }
            ScheduleError::CadenceLocked => {
                AppError::with_message(ErrorCode::CadenceLocked, message)
            }
            ScheduleError::NotRecurring(order_id) => {
                AppError::with_message(ErrorCode::SourceNotRecurring, message)
                    .with_detail("orderId", order_id)
            }
            ScheduleError::SourceMismatch { expected, found } => {
                AppError::with_message(ErrorCode::SourceMismatch, message)
                    .with_detail("expected", expected)
                    .with_detail("found", found)
            }
            ScheduleError::MissingSource => {
                AppError::with_message(ErrorCode::RequiredField, message)
                    .with_detail("field", "source")
            }
            ScheduleError::MissingField(field) => {
                AppError::with_message(ErrorCode::RequiredField, message)
                    .with_detail("field", field)
            }
            ScheduleError::InvalidTransition { .. } => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, message)
            }
            ScheduleError::NetworkFailure(e) => e,
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
