//! Span and structured-logger seam used by every operation.
//!
//! Operations open a [`Span`] through the client's [`Tracer`] and clone the
//! client's [`Logger`]; both are enriched with resource IDs and filter values
//! as the call progresses. Enrichment never touches the client's own logger,
//! and the span ends when it is dropped, whichever way the call exits.
//!
//! Everything is emitted through `tracing`, so the host application decides
//! where diagnostics go by installing a subscriber.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::client::error::ClientError;

/// Key under which the span's trace id is attached to loggers.
pub const TRACE_ID_KEY: &str = "trace_id";

/// Factory for per-operation spans.
pub trait Tracer: Send + Sync + fmt::Debug {
    fn start_span(&self, operation: &'static str) -> Span;
}

/// Opens a `debug`-level `tracing` span for each operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracer;

impl Tracer for TracingTracer {
    fn start_span(&self, operation: &'static str) -> Span {
        let inner = tracing::debug_span!(
            "ddb_client.operation",
            operation,
            attributes = tracing::field::Empty,
            error = tracing::field::Empty,
        );
        Span::new(operation, inner)
    }
}

/// Hands out disabled spans.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn start_span(&self, operation: &'static str) -> Span {
        Span::disabled(operation)
    }
}

/// A span scoped to a single operation. Dropping it ends the span.
#[derive(Debug)]
pub struct Span {
    operation: &'static str,
    inner: tracing::Span,
    attributes: Vec<(String, String)>,
    error: Option<String>,
}

impl Span {
    pub fn new(operation: &'static str, inner: tracing::Span) -> Self {
        Self {
            operation,
            inner,
            attributes: Vec::new(),
            error: None,
        }
    }

    pub fn disabled(operation: &'static str) -> Self {
        Self::new(operation, tracing::Span::none())
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Attaches a key/value pair, replacing any earlier value for `key`.
    pub fn attach(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
        self.inner
            .record("attributes", render_pairs(&self.attributes).as_str());
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn record_error(&mut self, err: &dyn StdError) {
        let rendered = err.to_string();
        self.inner.record("error", rendered.as_str());
        self.error = Some(rendered);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Identifier of the underlying `tracing` span, when a subscriber is recording it.
    pub fn trace_id(&self) -> Option<u64> {
        self.inner.id().map(|id| id.into_u64())
    }

    pub fn tracing_span(&self) -> &tracing::Span {
        &self.inner
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        self.inner.in_scope(|| {
            tracing::trace!(operation = self.operation, failed = self.error.is_some(), "span ended");
        });
    }
}

/// Cloneable structured logger.
///
/// Values accumulate through [`Logger::with_value`], which consumes and
/// returns the logger so a clone can be enriched without affecting the
/// original.
#[derive(Debug, Clone)]
pub struct Logger {
    name: Arc<str>,
    enabled: bool,
    values: Vec<(String, String)>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::silent()
    }
}

impl Logger {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            values: Vec::new(),
        }
    }

    /// A logger that discards everything.
    pub fn silent() -> Self {
        Self {
            name: Arc::from("silent"),
            enabled: false,
            values: Vec::new(),
        }
    }

    pub fn is_silent(&self) -> bool {
        !self.enabled
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    /// Adds the span's trace id, if it has one.
    pub fn with_span(self, span: &Span) -> Self {
        match span.trace_id() {
            Some(id) => self.with_value(TRACE_ID_KEY, id),
            None => self,
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn debug(&self, message: &str) {
        if self.enabled {
            tracing::debug!(logger = %self.name, context = %render_pairs(&self.values), "{message}");
        }
    }

    pub fn info(&self, message: &str) {
        if self.enabled {
            tracing::info!(logger = %self.name, context = %render_pairs(&self.values), "{message}");
        }
    }

    pub fn error(&self, err: &dyn StdError, message: &str) {
        if self.enabled {
            tracing::error!(
                logger = %self.name,
                context = %render_pairs(&self.values),
                error = %err,
                "{message}"
            );
        }
    }
}

fn render_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Records an infrastructure or remote failure on the span and logs it at
/// error level with the span's trace id.
pub(crate) fn prepare_and_log_error(
    err: ClientError,
    logger: &Logger,
    span: &mut Span,
    description: &str,
) -> ClientError {
    span.record_error(&err);
    logger.clone().with_span(span).error(&err, description);
    err
}

/// Records a caller contract violation. These are expected, so they are
/// only logged at debug level.
pub(crate) fn prepare_error(
    err: ClientError,
    logger: &Logger,
    span: &mut Span,
    description: &str,
) -> ClientError {
    span.record_error(&err);
    logger
        .clone()
        .with_value("error", &err)
        .debug(description);
    err
}

/// Shared handle to a tracer.
pub type SharedTracer = Arc<dyn Tracer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_value_leaves_the_original_untouched() {
        let base = Logger::new("test").with_value("a", 1);
        let enriched = base.clone().with_value("b", "two");

        assert_eq!(base.value("b"), None);
        assert_eq!(enriched.value("a"), Some("1"));
        assert_eq!(enriched.value("b"), Some("two"));
    }

    #[test]
    fn span_attributes_replace_existing_keys() {
        let mut span = NoopTracer.start_span("get_meal");
        span.attach("meal_id", "m_1");
        span.attach("meal_id", "m_2");

        assert_eq!(span.operation(), "get_meal");
        assert_eq!(span.attributes().count(), 1);
        assert_eq!(span.attribute("meal_id"), Some("m_2"));
    }

    #[test]
    fn caller_errors_are_recorded_on_the_span() {
        let mut span = Span::disabled("archive_meal");
        let err = prepare_error(
            ClientError::invalid_id("meal"),
            &Logger::silent(),
            &mut span,
            "validating meal ID",
        );

        assert_eq!(span.error(), Some("invalid meal ID provided"));
        assert_eq!(err.to_string(), "invalid meal ID provided");
    }

    #[test]
    fn disabled_spans_have_no_trace_id() {
        let span = Span::disabled("noop");
        let logger = Logger::new("test").with_span(&span);
        assert_eq!(span.trace_id(), None);
        assert_eq!(logger.value(TRACE_ID_KEY), None);
    }
}
