//! Error taxonomy for client operations.
//!
//! Errors fall into three layers:
//! - caller contract violations ([`ClientError::InvalidIdProvided`],
//!   [`ClientError::NilInputProvided`], [`ClientError::EmptyQueryProvided`],
//!   [`ClientError::Validation`]) are detected before any network activity;
//! - infrastructure failures ([`ClientError::InvalidUrl`],
//!   [`ClientError::InvalidHeader`], [`ClientError::Codec`],
//!   [`ClientError::Transport`]) are raised by the runtime itself;
//! - server-reported failures ([`ClientError::Remote`]) carry the code and
//!   message from the response envelope untouched.

use std::time::Duration;

use thiserror::Error;

/// Upper bound on the number of response body bytes kept in an
/// [`TransportError::UnexpectedStatus`].
pub const MAX_ERROR_BODY_BYTES: usize = 512;

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIdProvided,
    NilInputProvided,
    EmptyQueryProvided,
    Validation,
    InvalidUrl,
    InvalidHeader,
    Codec,
    Transport,
    Remote,
}

impl ErrorKind {
    /// Whether the error was caused by the caller and detected before dispatch.
    pub fn is_caller_error(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidIdProvided
                | ErrorKind::NilInputProvided
                | ErrorKind::EmptyQueryProvided
                | ErrorKind::Validation
                | ErrorKind::InvalidHeader
        )
    }
}

/// Errors returned by every [`Client`](crate::Client) operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required path ID was empty.
    #[error("invalid {name} ID provided")]
    InvalidIdProvided { name: &'static str },

    /// A required request body was absent.
    #[error("nil input provided")]
    NilInputProvided,

    /// A search operation received an empty query.
    #[error("empty search query provided")]
    EmptyQueryProvided,

    /// The request body failed its own validation.
    #[error("invalid input: {0}")]
    Validation(#[source] anyhow::Error),

    /// The request URL could not be composed from the base URL.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A header supplied through a modifier or the client configuration was malformed.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// JSON encoding of the request or decoding of the response failed.
    #[error("{context}: {source}")]
    Codec {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Sending the request or receiving the response failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response envelope carried a non-empty error.
    #[error("remote error {code}: {message}")]
    Remote { code: String, message: String },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidIdProvided { .. } => ErrorKind::InvalidIdProvided,
            ClientError::NilInputProvided => ErrorKind::NilInputProvided,
            ClientError::EmptyQueryProvided => ErrorKind::EmptyQueryProvided,
            ClientError::Validation(_) => ErrorKind::Validation,
            ClientError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ClientError::InvalidHeader { .. } => ErrorKind::InvalidHeader,
            ClientError::Codec { .. } => ErrorKind::Codec,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Remote { .. } => ErrorKind::Remote,
        }
    }

    pub(crate) fn invalid_id(name: &'static str) -> Self {
        ClientError::InvalidIdProvided { name }
    }

    pub(crate) fn encoding(source: serde_json::Error) -> Self {
        ClientError::Codec {
            context: "encoding request body",
            source,
        }
    }

    pub(crate) fn decoding(source: serde_json::Error) -> Self {
        ClientError::Codec {
            context: "decoding response body",
            source,
        }
    }

    /// The server-supplied error code, for [`ClientError::Remote`].
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            ClientError::Remote { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True when a JWT login was refused only because a TOTP code is still required.
    pub fn is_totp_required(&self) -> bool {
        match self {
            ClientError::Remote { message, .. } => message.eq_ignore_ascii_case("totp required"),
            _ => false,
        }
    }

    /// True when the call was abandoned because its cancellation token fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Transport(TransportError::Cancelled))
    }
}

/// Failures of the underlying send/receive.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP stack failed to connect, send, or read.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The caller's cancellation token fired before the response was read.
    #[error("request cancelled")]
    Cancelled,

    /// The per-call deadline elapsed before the response was read.
    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// The server answered with a non-success status and no usable envelope.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl TransportError {
    pub(crate) fn unexpected_status(status: u16, body: &[u8]) -> Self {
        let end = body.len().min(MAX_ERROR_BODY_BYTES);
        TransportError::UnexpectedStatus {
            status,
            body: String::from_utf8_lossy(&body[..end]).into_owned(),
        }
    }

    /// The HTTP status, when the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::UnexpectedStatus { status, .. } => Some(*status),
            TransportError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
