//! # DDB HTTP Client
//!
//! This module provides a typed async client for the meal-planning REST API:
//! meals, recipes, households, the ingredient catalogue, meal plans, and the
//! account, admin, and worker endpoints around them.
//!
//! ## Modules
//!
//! - [`client`] - Client facade, URL building, request construction and execution
//! - [`request`] - Per-call options: cancellation, deadlines and request modifiers
//! - [`filter`] - Pagination, sort and search parameters
//! - [`envelope`] - The `{data, pagination, error}` response wrapper
//! - [`error`] - Error taxonomy
//! - [`observability`] - Tracer, span and structured logger seam
//! - [`auth`] - Credentials and the authentication endpoints
//! - [`types`] - Type definitions for API requests and responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use ddb_client::client::{Client, Credentials, RequestOptions, UserLoginInput};
//!
//! # async fn example() -> Result<(), ddb_client::client::ClientError> {
//! let client = Client::new("https://ddb.example.com")?;
//!
//! let login = UserLoginInput {
//!     username: "username".to_string(),
//!     password: "password".to_string(),
//!     totp_token: String::new(),
//! };
//! let jwt = client.login_for_jwt(&login, &RequestOptions::default()).await?;
//!
//! let opts = RequestOptions::new().with_modifier(jwt.credentials().into_modifier()?);
//! let meals = client.search_for_meals("soup", None, &opts).await?;
//! println!("Found {} meals", meals.pagination.filtered_count.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod observability;
mod operations;
pub mod request;
pub mod types;

pub use auth::Credentials;
pub use client::{Client, ClientBuilder, Transport, TransportFuture, HEALTH_CHECK_PATH};
pub use envelope::{ApiError, ApiResponse, Pagination, QueryFilteredResult};
pub use error::{ClientError, ErrorKind, TransportError};
pub use filter::{QueryFilter, QueryValues, SortBy};
pub use observability::{Logger, NoopTracer, Span, Tracer, TracingTracer};
pub use request::{RequestModifier, RequestOptions};
pub use types::*;
