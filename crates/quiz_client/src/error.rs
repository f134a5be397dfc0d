use quiz_core::ErrorValue;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Non-2xx response. `body` is the JSON body, the raw text as a JSON
    /// string, or `null` when the response had no body.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },
    #[error("{0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// What the user sees: the response body when there is one, otherwise the message.
    pub fn into_error_value(self) -> ErrorValue {
        match self {
            ApiError::Status { body, .. } if has_content(&body) => ErrorValue::from_body(body),
            other => ErrorValue::from_message(other.to_string()),
        }
    }
}

fn has_content(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Null => false,
        serde_json::Value::String(text) => !text.is_empty(),
        _ => true,
    }
}
