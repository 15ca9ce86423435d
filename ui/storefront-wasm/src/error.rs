//! Client-side error type.
//!
//! None of these reach the page: dispatchers turn them into a notification
//! or a `null` return.

use sf_api_types::DecodeError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a readable response body.
    #[error("transport: {0}")]
    Transport(String),
    /// A body arrived but was not the JSON we expected.
    #[error("decode: {0}")]
    Decode(String),
    #[error("dom: {0}")]
    Dom(String),
}

impl From<DecodeError> for ClientError {
    fn from(err: DecodeError) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<JsValue> for ClientError {
    fn from(value: JsValue) -> Self {
        ClientError::Dom(describe(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
