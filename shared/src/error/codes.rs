//! Unified error codes for the service desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Gateway errors (lookup / submission collaborators)
//! - 4xxx: Service order errors
//! - 5xxx: Billing errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the form layer can localize messages
/// without parsing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Gateway ====================
    /// Collaborator could not be reached or answered with an error
    NetworkFailure = 1001,
    /// Collaborator answered with a body we could not understand
    InvalidResponse = 1002,
    /// Collaborator refused the bearer token
    NotAuthenticated = 1003,
    /// Collaborator denied the operation
    PermissionDenied = 1004,

    // ==================== 4xxx: Service order ====================
    /// Service order not found
    ServiceOrderNotFound = 4001,
    /// Recurring order requires a positive interval
    InvalidInterval = 4002,
    /// Cadence is inherited from the parent order and cannot be edited
    CadenceLocked = 4003,
    /// Source order has no next service date to continue from
    SourceNotRecurring = 4004,
    /// Source order does not match the requested creation mode
    SourceMismatch = 4005,
    /// Status change not allowed from the current status
    InvalidStatusTransition = 4006,

    // ==================== 5xxx: Billing ====================
    /// Billing not found
    BillingNotFound = 5001,
    /// Order belongs to a different customer than the billing
    CustomerMismatch = 5002,
    /// Order has already been paid in full
    PaymentAlreadyComplete = 5003,
    /// Billing has no line items
    EmptyLineItems = 5004,
    /// Amount or percentage is invalid
    InvalidAmount = 5005,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Gateway
            ErrorCode::NetworkFailure => "Network request failed",
            ErrorCode::InvalidResponse => "Unexpected response from server",
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::PermissionDenied => "Permission denied",

            // Service order
            ErrorCode::ServiceOrderNotFound => "Service order not found",
            ErrorCode::InvalidInterval => "Interval is required and must be greater than zero",
            ErrorCode::CadenceLocked => "Cadence is inherited from the parent order",
            ErrorCode::SourceNotRecurring => "Source order has no next service date",
            ErrorCode::SourceMismatch => "Source order does not match the creation mode",
            ErrorCode::InvalidStatusTransition => "Status change is not allowed",

            // Billing
            ErrorCode::BillingNotFound => "Billing not found",
            ErrorCode::CustomerMismatch => "Order belongs to a different customer",
            ErrorCode::PaymentAlreadyComplete => "Payment for this order is already complete",
            ErrorCode::EmptyLineItems => "Billing must contain at least one order",
            ErrorCode::InvalidAmount => "Invalid amount",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Request timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            1001 => Ok(ErrorCode::NetworkFailure),
            1002 => Ok(ErrorCode::InvalidResponse),
            1003 => Ok(ErrorCode::NotAuthenticated),
            1004 => Ok(ErrorCode::PermissionDenied),

            4001 => Ok(ErrorCode::ServiceOrderNotFound),
            4002 => Ok(ErrorCode::InvalidInterval),
            4003 => Ok(ErrorCode::CadenceLocked),
            4004 => Ok(ErrorCode::SourceNotRecurring),
            4005 => Ok(ErrorCode::SourceMismatch),
            4006 => Ok(ErrorCode::InvalidStatusTransition),

            5001 => Ok(ErrorCode::BillingNotFound),
            5002 => Ok(ErrorCode::CustomerMismatch),
            5003 => Ok(ErrorCode::PaymentAlreadyComplete),
            5004 => Ok(ErrorCode::EmptyLineItems),
            5005 => Ok(ErrorCode::InvalidAmount),

            9001 => Ok(ErrorCode::InternalError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
