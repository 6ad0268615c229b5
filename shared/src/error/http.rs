//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound | Self::ServiceOrderNotFound | Self::BillingNotFound => {
                StatusCode::NOT_FOUND
            }

            Self::PaymentAlreadyComplete | Self::CustomerMismatch => StatusCode::CONFLICT,

            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::InvalidAmount
            | Self::EmptyLineItems
            | Self::InvalidInterval => StatusCode::BAD_REQUEST,

            Self::CadenceLocked
            | Self::SourceNotRecurring
            | Self::SourceMismatch
            | Self::InvalidStatusTransition => StatusCode::UNPROCESSABLE_ENTITY,

            Self::NetworkFailure | Self::InvalidResponse => StatusCode::BAD_GATEWAY,
            Self::TimeoutError => StatusCode::GATEWAY_TIMEOUT,

            Self::Unknown | Self::InternalError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
