//! The uniform response wrapper every API reply arrives in.
//!
//! ```json
//! {"data": ..., "pagination": {...}, "error": {"code": "...", "message": "..."}, "details": {...}}
//! ```
//!
//! Decoding happens in two phases. The envelope is read first with `data`
//! kept as raw JSON, so a populated `error` is surfaced before the payload
//! is looked at; only then is `data` decoded into the caller's type. Unknown
//! fields are ignored throughout.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::error::{ClientError, TransportError};

/// A server-reported failure. An absent or empty error means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.message.is_empty()
    }

    /// Converts a non-empty error into [`ClientError::Remote`].
    pub fn as_error(&self) -> Option<ClientError> {
        if self.is_empty() {
            return None;
        }
        Some(ClientError::Remote {
            code: self.code.clone(),
            message: self.message.clone(),
        })
    }
}

/// Page bookkeeping attached to list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_count: Option<u64>,
}

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful payload, mostly useful for building test fixtures.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            pagination: None,
            error: None,
            details: HashMap::new(),
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// The result of a list or search operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilteredResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> QueryFilteredResult<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> IntoIterator for QueryFilteredResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    details: Option<HashMap<String, String>>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decodes a response body received with `status` into an envelope.
///
/// - A body that is not an envelope is a [`TransportError::UnexpectedStatus`]
///   on non-success statuses and a [`ClientError::Codec`] otherwise.
/// - An empty body on a success status decodes as an envelope without data.
/// - A populated `error` becomes [`ClientError::Remote`] whatever the status.
/// - A non-success status without an `error` is still a transport failure.
pub fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<ApiResponse<T>, ClientError> {
    let raw: RawEnvelope = match serde_json::from_slice(body) {
        Ok(raw) => raw,
        // 204 and friends
        Err(_) if is_success(status) && body.iter().all(u8::is_ascii_whitespace) => RawEnvelope::default(),
        Err(_) if !is_success(status) => {
            return Err(TransportError::unexpected_status(status, body).into());
        }
        Err(err) => return Err(ClientError::decoding(err)),
    };

    if let Some(remote) = raw.error.as_ref().and_then(ApiError::as_error) {
        return Err(remote);
    }

    if !is_success(status) {
        return Err(TransportError::unexpected_status(status, body).into());
    }

    let data = match raw.data {
        serde_json::Value::Null => None,
        value => Some(serde_json::from_value(value).map_err(ClientError::decoding)?),
    };

    Ok(ApiResponse {
        data,
        pagination: raw.pagination,
        error: None,
        details: raw.details.unwrap_or_default(),
    })
}
