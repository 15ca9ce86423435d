//! Wire types for the storefront `/api/*` endpoints.
//!
//! Every response carries a `success` flag; on `false` the backend adds an
//! `error` reason. [`Outcome`] is the single place that flag is interpreted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reason reported when a failed response carries no `error` string.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Fields shared by every API response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferRequest {
    pub nft_id: u32,
    pub to_username: String,
}

/// Successful transfer payload. Unknown fields are kept in `extra` so the
/// caller receives the response as the backend sent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferReceipt {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transfer_code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepositRequest {
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepositResponse {
    pub success: bool,
    #[serde(default)]
    pub payment_link: Option<String>,
}

impl DepositResponse {
    /// The payment link exactly as sent, if it is non-empty.
    pub fn link(&self) -> Option<&str> {
        self.payment_link.as_deref().filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub stats: Option<UserStats>,
}

/// Per-user dashboard numbers returned by `GET /api/stats`.
/// Missing or `null` counters read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_nfts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sold_nfts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_earned: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_spent: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response envelope: {0}")]
    Envelope(String),
    #[error("response payload: {0}")]
    Payload(String),
}

/// A decoded API response: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T: DeserializeOwned> Outcome<T> {
    /// Split a raw JSON response on its `success` flag.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let envelope = ApiEnvelope::deserialize(&value)
            .map_err(|e| DecodeError::Envelope(e.to_string()))?;

        if !envelope.success {
            let reason = envelope.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Ok(Outcome::Failure(reason));
        }

        serde_json::from_value(value)
            .map(Outcome::Success)
            .map_err(|e| DecodeError::Payload(e.to_string()))
    }
}
