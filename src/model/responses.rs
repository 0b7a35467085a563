/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::constants::STATUS_SUCCESS;
use crate::error::{AppError, GazelleResult};
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope returned by every `ajax.php` call
///
/// A successful call looks like `{"status": "success", "response": {...}}`.
/// Anything else, including a missing `status`, is a failure.
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiResponse {
    /// Reported status, `"success"` on success
    #[serde(default)]
    pub status: Option<String>,
    /// Action specific payload
    #[serde(default)]
    pub response: Option<Value>,
    /// Error description some sites add on failure
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Reads the envelope out of any decoded JSON value
    ///
    /// Values that are not objects, or carry a non-string `status`, are kept
    /// as failures rather than rejected, so the caller still gets a message
    /// naming the action.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let status = map.get("status").map(|s| match s {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let error = map.get("error").and_then(Value::as_str).map(String::from);
        Self {
            status,
            response: map.remove("response"),
            error,
        }
    }

    /// Checks if the tracker reported success
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    /// Extracts the payload of a successful call
    ///
    /// # Errors
    /// `AppError::Protocol` naming the action and the reported status when
    /// the call did not succeed.
    pub fn into_payload(self, action: &str) -> GazelleResult<Value> {
        if !self.is_success() {
            let status = self.status.as_deref().unwrap_or("<missing>");
            let detail = self
                .error
                .as_deref()
                .map(|e| format!(" ({e})"))
                .unwrap_or_default();
            return Err(AppError::protocol(format!(
                "Gazelle API call '{action}' failed: {status}{detail}"
            )));
        }
        Ok(self.response.unwrap_or(Value::Null))
    }
}

/// Payload of the `index` action
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq, Default)]
pub struct IndexInfo {
    /// Numeric user id
    #[serde(default)]
    pub id: Option<u64>,
    /// Account name
    #[serde(default)]
    pub username: Option<String>,
    /// Per-session key required by legacy form-login requests
    #[serde(default)]
    pub authkey: Option<String>,
    /// Personal announce key
    #[serde(default)]
    pub passkey: Option<String>,
    /// Remaining fields, left uninterpreted
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
