//! Per-call request options.
//!
//! A [`RequestModifier`] mutates a fully built request just before dispatch,
//! typically to add credentials or correlation headers. Modifiers run in the
//! order they were supplied, after the client's own implicit modifier.
//!
//! [`RequestOptions`] bundles the modifiers with the caller's cancellation
//! token and an optional deadline. Every operation takes one as its last
//! argument; `&RequestOptions::default()` means "no modifiers, no deadline,
//! never cancelled".

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, USER_AGENT};
use tokio_util::sync::CancellationToken;

use crate::client::error::{ClientError, TransportError};

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
pub const IMPERSONATE_USER_HEADER: &str = "X-DDB-Impersonate-User";
pub const IMPERSONATE_HOUSEHOLD_HEADER: &str = "X-DDB-Impersonate-Household";

type ModifierFn = dyn Fn(&mut reqwest::Request) + Send + Sync;

/// A function applied to a built request before it is sent.
#[derive(Clone)]
pub struct RequestModifier(Arc<ModifierFn>);

impl fmt::Debug for RequestModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestModifier(..)")
    }
}

impl RequestModifier {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut reqwest::Request) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Sets `name` to `value`, replacing any value already present.
    pub fn header(name: &str, value: &str) -> Result<Self, ClientError> {
        let (name, value) = parse_header(name, value)?;
        Ok(Self::new(move |request| {
            request.headers_mut().insert(name.clone(), value.clone());
        }))
    }

    pub fn user_agent(agent: &str) -> Result<Self, ClientError> {
        Self::header(USER_AGENT.as_str(), agent)
    }

    pub fn request_id(id: &str) -> Result<Self, ClientError> {
        Self::header(REQUEST_ID_HEADER, id)
    }

    /// Asks the server to act as `user_id`. Only honoured for service admins.
    pub fn impersonate_user(user_id: &str) -> Result<Self, ClientError> {
        Self::header(IMPERSONATE_USER_HEADER, user_id)
    }

    pub fn impersonate_household(household_id: &str) -> Result<Self, ClientError> {
        Self::header(IMPERSONATE_HOUSEHOLD_HEADER, household_id)
    }

    pub fn apply(&self, request: &mut reqwest::Request) {
        (self.0)(request)
    }
}

pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ClientError> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    let header_value = HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((header_name, header_value))
}

/// Cancellation, deadline, and modifiers for a single call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    cancellation: CancellationToken,
    timeout: Option<Duration>,
    modifiers: Vec<RequestModifier>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Fails the call with [`TransportError::DeadlineExceeded`] if the
    /// response has not been read within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_modifier(mut self, modifier: RequestModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = RequestModifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn modifiers(&self) -> &[RequestModifier] {
        &self.modifiers
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub(crate) fn apply(&self, request: &mut reqwest::Request) {
        for modifier in &self.modifiers {
            modifier.apply(request);
        }
    }

    /// Drives `fut` until it completes, the token fires, or the deadline
    /// elapses. Cancellation wins ties, and `fut` is never polled once the
    /// token has fired.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::DeadlineExceeded(limit)),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(TransportError::Cancelled),
            result = bounded => result,
        }
    }
}
