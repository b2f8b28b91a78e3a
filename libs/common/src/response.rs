//! Shared response envelope
//!
//! Every non-record payload returned by the services is an [`ApiMessage`]:
//! `{"message": ...}` on success, `{"error": ...}` on failure.

use serde::{Deserialize, Serialize};

/// Response envelope for confirmations and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiMessage {
    /// Success envelope
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    /// Failure envelope
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_only_present_fields() {
        let ok = serde_json::to_value(ApiMessage::message("Note deleted successfully")).unwrap();
        assert_eq!(ok, serde_json::json!({ "message": "Note deleted successfully" }));

        let err = serde_json::to_value(ApiMessage::error("Note not found")).unwrap();
        assert_eq!(err, serde_json::json!({ "error": "Note not found" }));
    }
}
