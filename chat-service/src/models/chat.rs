//! Wire types for `POST /chat`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

pub const EMPTY_MESSAGE: &str = "Message is empty";

/// Incoming chat turn. Only a JSON object is accepted; arrays are refused
/// even when their elements line up with the fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(try_from = "Map<String, Value>")]
pub struct ChatRequest {
    /// User text forwarded verbatim. Missing, `null` and `""` are all rejected.
    #[validate(
        required(message = "Message is empty"),
        length(min = 1, message = "Message is empty")
    )]
    pub message: Option<String>,

    /// How many prior attempts the caller already made for this message.
    pub retry_count: Option<i64>,
}

#[derive(Deserialize)]
struct ChatRequestFields {
    message: Option<String>,
    #[serde(default)]
    retry_count: Option<i64>,
}

impl TryFrom<Map<String, Value>> for ChatRequest {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: ChatRequestFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            message: fields.message,
            retry_count: fields.retry_count,
        })
    }
}

impl ChatRequest {
    pub fn retry_count(&self) -> i64 {
        self.retry_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

/// Error payload. `can_retry` is only present for upstream failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_retry: Option<bool>,
}
