use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Billing rejections
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BillingError {
    #[error("Service order {order_id} belongs to customer {found}, billing is for {expected}")]
    CustomerMismatch {
        expected: String,
        found: String,
        order_id: String,
    },

    #[error("Service order already fully paid: {0}")]
    PaymentAlreadyComplete(String),

    #[error("Billing has no line items")]
    EmptyLineItems,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Lookup or submission failed; carries the collaborator's error as-is
    #[error("{0}")]
    NetworkFailure(AppError),
}

impl From<AppError> for BillingError {
    fn from(err: AppError) -> Self {
        BillingError::NetworkFailure(err)
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::CustomerMismatch {
                expected,
                found,
                order_id,
            } => AppError::with_message(
                ErrorCode::CustomerMismatch,
                format!(
                    "Service order {} belongs to customer {}, billing is for {}",
                    order_id, found, expected
                ),
            )
            .with_detail("expected", expected)
            .with_detail("found", found)
            .with_detail("orderId", order_id),
            BillingError::PaymentAlreadyComplete(order_id) => AppError::with_message(
                ErrorCode::PaymentAlreadyComplete,
                format!("Service order already fully paid: {}", order_id),
            )
            .with_detail("orderId", order_id),
            BillingError::EmptyLineItems => AppError::new(ErrorCode::EmptyLineItems),
            BillingError::InvalidAmount(msg) => {
                AppError::with_message(ErrorCode::InvalidAmount, msg)
            }
            BillingError::NetworkFailure(e) => e,
        }
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
