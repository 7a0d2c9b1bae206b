use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

use crate::client::envelope::{self, ApiResponse};
use crate::client::error::{ClientError, TransportError};
use crate::client::filter::{QueryFilter, QueryValues};
use crate::client::observability::{
    prepare_and_log_error, Logger, NoopTracer, SharedTracer, Span, Tracer,
};
use crate::client::request::{parse_header, RequestModifier, RequestOptions};

pub const DEFAULT_USER_AGENT: &str = concat!("ddb-client/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Readiness endpoint polled by [`Client::is_up`].
pub const HEALTH_CHECK_PATH: &str = "/_meta_/ready";

const JSON: &str = "application/json";

pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>>;

/// Sends a fully built request and yields the raw response.
///
/// Implementations must be safe to share between concurrent calls. Dropping
/// the returned future abandons the request.
pub trait Transport: Send + Sync + fmt::Debug {
    fn execute(&self, request: reqwest::Request) -> TransportFuture<'_>;
}

impl Transport for reqwest::Client {
    fn execute(&self, request: reqwest::Request) -> TransportFuture<'_> {
        Box::pin(reqwest::Client::execute(self, request))
    }
}

/// Typed client for the meal-planning API.
///
/// A `Client` is immutable once built and cheap to clone; clones share the
/// transport, logger, and tracer.
#[derive(Debug, Clone)]
pub struct Client {
    /// Origin plus optional path prefix, e.g. `https://api.example.com`
    base_url: String,
    transport: Arc<dyn Transport>,
    logger: Logger,
    tracer: SharedTracer,
    default_filter: QueryFilter,
    /// Sets the user agent and default headers ahead of any per-call modifier
    implicit: RequestModifier,
}

impl Client {
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Builds a client with the default transport, a silent logger and a no-op tracer.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn default_filter(&self) -> &QueryFilter {
        &self.default_filter
    }

    pub(crate) fn start_span(&self, operation: &'static str) -> Span {
        self.tracer.start_span(operation)
    }

    /// Joins `path` onto the base URL and appends `query` when it has values.
    pub fn build_url(&self, path: &str, query: Option<&QueryValues>) -> Result<Url, ClientError> {
        let mut raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            raw.push('?');
            raw.push_str(&query.encode());
        }

        Url::parse(&raw).map_err(|e| ClientError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Builds a request without a body.
    pub fn build_request(&self, method: Method, url: Url) -> reqwest::Request {
        let mut request = reqwest::Request::new(method, url);
        request
            .headers_mut()
            .insert(ACCEPT, reqwest::header::HeaderValue::from_static(JSON));
        request
    }

    /// Builds a request carrying `body` serialised as JSON.
    pub fn build_data_request<B>(&self, method: Method, url: Url, body: &B) -> Result<reqwest::Request, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body).map_err(ClientError::encoding)?;
        let mut request = self.build_request(method, url);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, reqwest::header::HeaderValue::from_static(JSON));
        *request.body_mut() = Some(bytes.into());
        Ok(request)
    }

    /// Applies modifiers, dispatches `request`, and decodes the response envelope.
    ///
    /// The span is entered for the duration of the dispatch. Failures are
    /// recorded on it and logged at error level before being returned.
    pub(crate) async fn fetch_and_unmarshal<T>(
        &self,
        request: reqwest::Request,
        opts: &RequestOptions,
        logger: &Logger,
        span: &mut Span,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let (status, body, logger) = self.dispatch(request, opts, logger, span).await?;
        envelope::decode(status, &body)
            .map_err(|err| prepare_and_log_error(err, &logger, span, "decoding response"))
    }

    /// Dispatches a `HEAD` style request and reports whether the resource is there.
    ///
    /// Success statuses mean yes and `404` means no. Any other status is a
    /// [`TransportError::UnexpectedStatus`].
    pub(crate) async fn check_existence(
        &self,
        request: reqwest::Request,
        opts: &RequestOptions,
        logger: &Logger,
        span: &mut Span,
    ) -> Result<bool, ClientError> {
        let (status, body, logger) = self.dispatch(request, opts, logger, span).await?;
        match status {
            200..=299 => Ok(true),
            404 => Ok(false),
            _ => Err(prepare_and_log_error(
                TransportError::unexpected_status(status, &body).into(),
                &logger,
                span,
                "checking existence",
            )),
        }
    }

    /// Reports whether the service answers its readiness check.
    ///
    /// Never fails. Anything short of a success status reads as "not up".
    pub async fn is_up(&self, opts: &RequestOptions) -> bool {
        let mut span = self.start_span("is_up");
        let logger = self.logger.clone().with_value("operation", "is_up");

        let url = match self.build_url(HEALTH_CHECK_PATH, None) {
            Ok(url) => url,
            Err(err) => {
                logger.with_value("error", &err).debug("building health check URL");
                return false;
            }
        };

        match self
            .dispatch(self.build_request(Method::GET, url), opts, &logger, &mut span)
            .await
        {
            Ok((status, _, _)) => (200..300).contains(&status),
            Err(_) => false,
        }
    }

    /// Applies the implicit and per-call modifiers, then sends `request` and
    /// reads the whole body. Returns the status, the body, and the logger
    /// enriched with the request line and status.
    async fn dispatch(
        &self,
        mut request: reqwest::Request,
        opts: &RequestOptions,
        logger: &Logger,
        span: &mut Span,
    ) -> Result<(u16, Vec<u8>, Logger), ClientError> {
        self.implicit.apply(&mut request);
        opts.apply(&mut request);

        let method = request.method().clone();
        let url = request.url().to_string();
        let logger = logger
            .clone()
            .with_value("method", &method)
            .with_value("url", &url)
            .with_span(span);

        if opts.is_cancelled() {
            return Err(prepare_and_log_error(
                TransportError::Cancelled.into(),
                &logger,
                span,
                "request cancelled before dispatch",
            ));
        }

        logger.debug("dispatching request");
        tracing::debug!("Making {} request to {}", method, url);

        let outcome = opts
            .run(exchange(self.transport.as_ref(), request))
            .instrument(span.tracing_span().clone())
            .await;

        let (status, body) = match outcome {
            Ok(received) => received,
            Err(err) => {
                return Err(prepare_and_log_error(
                    err.into(),
                    &logger,
                    span,
                    "executing request",
                ))
            }
        };

        tracing::debug!("Response status: {}", status);

        Ok((status, body, logger.with_value("status", status)))
    }
}

/// Sends `request` and reads the whole body.
async fn exchange(transport: &dyn Transport, request: reqwest::Request) -> Result<(u16, Vec<u8>), TransportError> {
    let response = transport.execute(request).await.map_err(TransportError::Request)?;
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(TransportError::Request)?;
    Ok((status, body.to_vec()))
}

/// Configuration for a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
    logger: Logger,
    tracer: SharedTracer,
    user_agent: String,
    default_headers: Vec<(String, String)>,
    timeout: Duration,
    default_filter: QueryFilter,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            transport: None,
            logger: Logger::silent(),
            tracer: Arc::new(NoopTracer),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            default_filter: QueryFilter::default(),
        }
    }

    /// Replaces the default `reqwest` transport. [`ClientBuilder::timeout`]
    /// has no effect once a transport is supplied.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn tracer<T: Tracer + 'static>(mut self, tracer: T) -> Self {
        self.tracer = Arc::new(tracer);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header sent with every request. Per-call modifiers can override it.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Filter used by list and search operations called without one.
    pub fn default_filter(mut self, filter: QueryFilter) -> Self {
        self.default_filter = filter;
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let parsed = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: self.base_url,
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        let mut headers = HeaderMap::new();
        let (_, agent) = parse_header(USER_AGENT.as_str(), &self.user_agent)?;
        headers.insert(USER_AGENT, agent);
        for (name, value) in &self.default_headers {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(TransportError::Request)?;
                Arc::new(client) as Arc<dyn Transport>
            }
        };

        tracing::debug!("Built client for {}", self.base_url);

        Ok(Client {
            base_url: self.base_url,
            transport,
            logger: self.logger,
            tracer: self.tracer,
            default_filter: self.default_filter,
            implicit: RequestModifier::new(move |request| {
                for (name, value) in &headers {
                    request.headers_mut().insert(name.clone(), value.clone());
                }
            }),
        })
    }
}

/// A transport that fails the test if anything is dispatched through it.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct PanickingTransport;

#[cfg(test)]
impl Transport for PanickingTransport {
    fn execute(&self, request: reqwest::Request) -> TransportFuture<'_> {
        panic!("unexpected dispatch of {} {}", request.method(), request.url())
    }
}

/// A client that never dispatches anything.
#[cfg(test)]
pub(crate) fn test_client() -> Client {
    Client::builder("https://ddb.test")
        .transport(PanickingTransport)
        .build()
        .expect("building test client")
}

/// A client whose base URL cannot produce a valid request URL.
#[cfg(test)]
pub(crate) fn test_client_with_invalid_url() -> Client {
    Client {
        base_url: "http://[::1".to_string(),
        ..test_client()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn joins_paths_without_duplicate_separators() {
        let client = Client::builder("https://ddb.test/prefix/")
            .transport(PanickingTransport)
            .build()
            .unwrap();

        let url = client.build_url("/api/v1/meals", None).unwrap();
        assert_eq!(url.as_str(), "https://ddb.test/prefix/api/v1/meals");

        let url = client.build_url("api/v1/meals", Some(&QueryValues::new())).unwrap();
        assert_eq!(url.as_str(), "https://ddb.test/prefix/api/v1/meals");
    }

    #[test]
    fn query_is_appended_in_key_order() {
        let client = test_client();
        let values = QueryFilter::default().with_search("onion").to_values();
        let url = client.build_url("/api/v1/meals/search", Some(&values)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ddb.test/api/v1/meals/search?limit=50&page=1&q=onion&sortBy=asc"
        );
    }

    #[test]
    fn broken_base_url_fails_url_building() {
        let client = test_client_with_invalid_url();
        let err = client.build_url("/api/v1/meals", None).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn broken_base_url_is_never_up() {
        let client = test_client_with_invalid_url();
        assert!(!client.is_up(&RequestOptions::default()).await);
    }

    #[test]
    fn builder_rejects_relative_and_non_http_urls() {
        assert!(matches!(Client::new("/api"), Err(ClientError::InvalidUrl { .. })));
        assert!(matches!(Client::new("ftp://ddb.test"), Err(ClientError::InvalidUrl { .. })));
    }

    #[test]
    fn builder_rejects_bad_default_headers() {
        let err = Client::builder("https://ddb.test")
            .default_header("X-Bad", "a\r\nb")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader { .. }));
    }

    #[test]
    fn data_requests_carry_json_headers() {
        let client = test_client();
        let url = client.build_url("/api/v1/meals", None).unwrap();
        let request = client
            .build_data_request(Method::POST, url, &serde_json::json!({"name": "Soup"}))
            .unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], JSON);
        assert_eq!(request.headers()[ACCEPT], JSON);
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, br#"{"name":"Soup"}"#);
    }

    #[test]
    fn bodyless_requests_have_no_content_type() {
        let client = test_client();
        let url = client.build_url("/api/v1/meals/m_1", None).unwrap();
        let request = client.build_request(Method::GET, url);

        assert_eq!(request.headers()[ACCEPT], JSON);
        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert!(request.body().is_none());
    }

    #[tokio::test]
    async fn implicit_headers_precede_call_modifiers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/meals/m_1"))
            .and(header("user-agent", "custom/1.0"))
            .and(header("x-tenant", "override"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"id": "m_1"}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::builder(server.uri())
            .user_agent("ddb-client/test")
            .default_header("X-Tenant", "default")
            .build()
            .unwrap();
        let opts = RequestOptions::new()
            .with_modifier(RequestModifier::user_agent("custom/1.0").unwrap())
            .with_modifier(RequestModifier::header("X-Tenant", "override").unwrap());

        let url = client.build_url("/api/v1/meals/m_1", None).unwrap();
        let request = client.build_request(Method::GET, url);
        let mut span = Span::disabled("test");
        let response: ApiResponse<serde_json::Value> = client
            .fetch_and_unmarshal(request, &opts, &Logger::silent(), &mut span)
            .await
            .unwrap();

        assert_eq!(response.data, Some(serde_json::json!({"id": "m_1"})));
    }

    #[tokio::test]
    async fn pre_cancelled_calls_never_reach_the_transport() {
        let client = test_client();
        let opts = RequestOptions::new().with_cancellation({
            let token = tokio_util::sync::CancellationToken::new();
            token.cancel();
            token
        });

        let url = client.build_url("/api/v1/meals", None).unwrap();
        let request = client.build_request(Method::GET, url);
        let mut span = Span::disabled("test");
        let err = client
            .fetch_and_unmarshal::<serde_json::Value>(request, &opts, &Logger::silent(), &mut span)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(span.error(), Some("request cancelled"));
    }

    #[tokio::test]
    async fn connection_failures_are_transport_errors() {
        // Nothing listens on the discard port.
        let client = Client::builder("http://127.0.0.1:9")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let url = client.build_url("/api/v1/meals", None).unwrap();
        let request = client.build_request(Method::GET, url);
        let mut span = Span::disabled("test");
        let err = client
            .fetch_and_unmarshal::<serde_json::Value>(request, &RequestOptions::default(), &Logger::silent(), &mut span)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Transport(TransportError::Request(_))));
    }
}
