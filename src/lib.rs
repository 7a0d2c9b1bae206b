//! # DDB Client Library
//!
//! Async Rust client for the meal-planning service's versioned HTTP+JSON API.
//!
//! Every endpoint is a method on [`Client`]. Calls validate their arguments
//! before anything touches the network, carry a per-call
//! [`RequestOptions`] (cancellation, deadline, request modifiers), and
//! return either the typed payload from the response envelope or a
//! [`ClientError`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use ddb_client::{Client, QueryFilter, RequestOptions};
//!
//! # async fn example() -> Result<(), ddb_client::ClientError> {
//! let client = Client::builder("https://ddb.example.com")
//!     .user_agent("meal-planner/1.0")
//!     .build()?;
//!
//! let filter = QueryFilter::new().with_limit(10);
//! let plans = client.get_meal_plans(&filter, &RequestOptions::default()).await?;
//! for plan in plans {
//!     println!("{}", plan.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{
    ApiError, ApiResponse, Client, ClientBuilder, ClientError, Credentials, ErrorKind, Logger,
    Pagination, QueryFilter, QueryFilteredResult, RequestModifier, RequestOptions, Transport,
    TransportError,
};
