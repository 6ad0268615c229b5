//! Submission receipt returned by the persistence API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiResponse;

/// Outcome of a billing or service order submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl SubmissionReceipt {
    /// Id of the created or updated record, when the backend echoes it
    pub fn record_id(&self) -> Option<&str> {
        let data = self.data.as_ref()?;
        data.get("id")
            .or_else(|| data.get("_id"))
            .and_then(Value::as_str)
    }
}

impl From<ApiResponse<Value>> for SubmissionReceipt {
    fn from(response: ApiResponse<Value>) -> Self {
        let message = (!response.message.is_empty()).then_some(response.message.clone());
        Self {
            success: response.is_success(),
            message,
            data: response.data,
        }
    }
}
