//! The shared pipeline behind every API operation.
//!
//! Each operation is a thin method on [`Client`] stamped out by the
//! [`endpoints!`] macro from its HTTP method, path template, path IDs, and
//! input/output types. All of them funnel into [`Client::invoke`], which
//! runs the same steps in the same order:
//!
//! 1. open a span and clone the client's logger;
//! 2. reject an absent body, then a body that fails [`Validate`];
//! 3. reject empty path IDs, then an empty search query;
//! 4. fall back to the client's default filter for list and search calls;
//! 5. attach IDs and filter values to the logger and span;
//! 6. build the URL and request, then hand over to the executor.
//!
//! Steps 2 to 4 never touch the network.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::client::Client;
use crate::client::envelope::{ApiResponse, QueryFilteredResult};
use crate::client::error::ClientError;
use crate::client::filter::{QueryFilter, QUERY_KEY_SEARCH};
use crate::client::observability::{prepare_and_log_error, prepare_error, Logger, Span};
use crate::client::request::RequestOptions;
use crate::client::types::Validate;

/// The fixed shape of one operation.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint {
    pub operation: &'static str,
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub(crate) fn new(operation: &'static str, method: Method, path: &'static str) -> Self {
        Self {
            operation,
            method,
            path,
        }
    }
}

/// The request body, for operations that take one.
pub(crate) enum Input<'a, B: ?Sized> {
    None,
    Required(Option<&'a B>),
}

/// Query parameters, for operations that return pages.
pub(crate) enum Listing<'a> {
    None,
    Filtered(Option<&'a QueryFilter>),
    Search {
        query: &'a str,
        filter: Option<&'a QueryFilter>,
    },
}

/// `meal_plan_task_id` reads as `meal_plan_task` in error messages.
fn id_label(name: &'static str) -> &'static str {
    name.strip_suffix("_id").unwrap_or(name)
}

/// Substitutes `{name}` placeholders in `template` with percent-encoded IDs.
pub(crate) fn fill_path(template: &str, ids: &[(&'static str, &str)]) -> String {
    ids.iter().fold(template.to_string(), |path, (name, value)| {
        path.replace(&format!("{{{name}}}"), &urlencoding::encode(value))
    })
}

impl Client {
    pub(crate) async fn invoke<B, T>(
        &self,
        endpoint: Endpoint,
        ids: &[(&'static str, &str)],
        input: Input<'_, B>,
        listing: Listing<'_>,
        opts: &RequestOptions,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        B: Serialize + Validate + ?Sized,
        T: DeserializeOwned,
    {
        let (request, logger, mut span) = self.prepare(endpoint, ids, input, listing)?;
        self.fetch_and_unmarshal(request, opts, &logger, &mut span)
            .await
    }

    /// Like [`Client::invoke`] for bodyless existence checks: the response
    /// status is the answer and no envelope is decoded.
    pub(crate) async fn exists(
        &self,
        endpoint: Endpoint,
        ids: &[(&'static str, &str)],
        opts: &RequestOptions,
    ) -> Result<bool, ClientError> {
        let (request, logger, mut span) =
            self.prepare::<()>(endpoint, ids, Input::None, Listing::None)?;
        self.check_existence(request, opts, &logger, &mut span)
            .await
    }

    /// Runs the argument checks and builds the request. The span is handed
    /// back so it stays open until the request has been answered.
    fn prepare<B>(
        &self,
        endpoint: Endpoint,
        ids: &[(&'static str, &str)],
        input: Input<'_, B>,
        listing: Listing<'_>,
    ) -> Result<(reqwest::Request, Logger, Span), ClientError>
    where
        B: Serialize + Validate + ?Sized,
    {
        let mut span = self.start_span(endpoint.operation);
        let mut logger = self
            .logger()
            .clone()
            .with_value("operation", endpoint.operation);

        let body = match input {
            Input::None => None,
            Input::Required(None) => {
                return Err(prepare_error(
                    ClientError::NilInputProvided,
                    &logger,
                    &mut span,
                    "checking input",
                ))
            }
            Input::Required(Some(body)) => match body.validate() {
                Ok(()) => Some(body),
                Err(e) => {
                    return Err(prepare_error(
                        ClientError::Validation(e),
                        &logger,
                        &mut span,
                        "validating input",
                    ))
                }
            },
        };

        for (name, value) in ids {
            if value.is_empty() {
                return Err(prepare_error(
                    ClientError::invalid_id(id_label(*name)),
                    &logger,
                    &mut span,
                    "validating path IDs",
                ));
            }
        }

        let query = match listing {
            Listing::None => None,
            Listing::Filtered(filter) => Some((filter.unwrap_or(self.default_filter()), None)),
            Listing::Search { query, filter } => {
                if query.trim().is_empty() {
                    return Err(prepare_error(
                        ClientError::EmptyQueryProvided,
                        &logger,
                        &mut span,
                        "validating search query",
                    ));
                }
                Some((filter.unwrap_or(self.default_filter()), Some(query)))
            }
        };

        for (name, value) in ids {
            logger = logger.with_value(*name, value);
            span.attach(*name, value);
        }

        let values = query.map(|(filter, search)| {
            // `q` only ever comes from the search argument
            let filter = filter.without_search();
            logger = filter.attach_to_logger(logger.clone());
            filter.attach_to_span(&mut span);

            let mut values = filter.to_values();
            if let Some(q) = search {
                logger = logger.clone().with_value(QUERY_KEY_SEARCH, q);
                span.attach(QUERY_KEY_SEARCH, q);
                values.set(QUERY_KEY_SEARCH, q);
            }
            values
        });

        let path = fill_path(endpoint.path, ids);
        let url = self
            .build_url(&path, values.as_ref())
            .map_err(|e| prepare_and_log_error(e, &logger, &mut span, "building request URL"))?;

        let request = match body {
            Some(body) => self
                .build_data_request(endpoint.method, url, body)
                .map_err(|e| prepare_and_log_error(e, &logger, &mut span, "building request"))?,
            None => self.build_request(endpoint.method, url),
        };

        Ok((request, logger, span))
    }
}

/// Unwraps a single record, treating a missing `data` as a decoding failure.
pub(crate) fn into_record<T>(response: ApiResponse<T>) -> Result<T, ClientError> {
    response.data.ok_or_else(|| {
        ClientError::decoding(<serde_json::Error as serde::de::Error>::custom(
            "response envelope carried no data",
        ))
    })
}

pub(crate) fn into_page<T>(response: ApiResponse<Vec<T>>) -> QueryFilteredResult<T> {
    QueryFilteredResult {
        data: response.data.unwrap_or_default(),
        pagination: response.pagination.unwrap_or_default(),
    }
}

/// Stamps out operation methods on [`Client`].
///
/// ```text
/// read   GET    name[id, ..]          -> Output = "/path/{id}";   record, no body
/// act    DELETE name[id, ..]                    = "/path/{id}";   nothing, no body
/// list          name[id, ..]          -> Item   = "/path";        page of items
/// search        name[id, ..]          -> Item   = "/path/search"; page of items, `q` set
/// write  POST   name[id, ..](Input)   -> Output = "/path";        record, JSON body
/// apply  PUT    name[id, ..](Input)             = "/path";        nothing, JSON body
/// exists        name[id, ..]                    = "/path/{id}";   `HEAD`, true unless 404
/// ```
///
/// Generated methods take the path IDs as `&str` in order, then the body,
/// query, or filter, and always end with `&RequestOptions`.
macro_rules! endpoints {
    () => {};

    ($(#[$meta:meta])* read $method:ident $name:ident [$($id:ident),*] -> $out:ty = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name(
            &self,
            $($id: &str,)*
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<$out, $crate::client::error::ClientError> {
            let response = self
                .invoke::<(), $out>(
                    $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::$method, $path),
                    &[$((stringify!($id), $id)),*],
                    $crate::client::operations::Input::None,
                    $crate::client::operations::Listing::None,
                    opts,
                )
                .await?;
            $crate::client::operations::into_record(response)
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };

    ($(#[$meta:meta])* act $method:ident $name:ident [$($id:ident),*] = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name(
            &self,
            $($id: &str,)*
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<(), $crate::client::error::ClientError> {
            self.invoke::<(), ::serde::de::IgnoredAny>(
                $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::$method, $path),
                &[$((stringify!($id), $id)),*],
                $crate::client::operations::Input::None,
                $crate::client::operations::Listing::None,
                opts,
            )
            .await
            .map(|_| ())
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };

    ($(#[$meta:meta])* list $name:ident [$($id:ident),*] -> $out:ty = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name<'f>(
            &self,
            $($id: &str,)*
            filter: impl Into<Option<&'f $crate::client::filter::QueryFilter>>,
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<$crate::client::envelope::QueryFilteredResult<$out>, $crate::client::error::ClientError> {
            let response = self
                .invoke::<(), Vec<$out>>(
                    $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::GET, $path),
                    &[$((stringify!($id), $id)),*],
                    $crate::client::operations::Input::None,
                    $crate::client::operations::Listing::Filtered(filter.into()),
                    opts,
                )
                .await?;
            Ok($crate::client::operations::into_page(response))
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };

    ($(#[$meta:meta])* search $name:ident [$($id:ident),*] -> $out:ty = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name<'f>(
            &self,
            $($id: &str,)*
            query: &str,
            filter: impl Into<Option<&'f $crate::client::filter::QueryFilter>>,
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<$crate::client::envelope::QueryFilteredResult<$out>, $crate::client::error::ClientError> {
            let response = self
                .invoke::<(), Vec<$out>>(
                    $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::GET, $path),
                    &[$((stringify!($id), $id)),*],
                    $crate::client::operations::Input::None,
                    $crate::client::operations::Listing::Search {
                        query,
                        filter: filter.into(),
                    },
                    opts,
                )
                .await?;
            Ok($crate::client::operations::into_page(response))
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };

    ($(#[$meta:meta])* write $method:ident $name:ident [$($id:ident),*] ($in:ty) -> $out:ty = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name<'i>(
            &self,
            $($id: &str,)*
            input: impl Into<Option<&'i $in>>,
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<$out, $crate::client::error::ClientError> {
            let response = self
                .invoke::<$in, $out>(
                    $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::$method, $path),
                    &[$((stringify!($id), $id)),*],
                    $crate::client::operations::Input::Required(input.into()),
                    $crate::client::operations::Listing::None,
                    opts,
                )
                .await?;
            $crate::client::operations::into_record(response)
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };

    ($(#[$meta:meta])* apply $method:ident $name:ident [$($id:ident),*] ($in:ty) = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name<'i>(
            &self,
            $($id: &str,)*
            input: impl Into<Option<&'i $in>>,
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<(), $crate::client::error::ClientError> {
            self.invoke::<$in, ::serde::de::IgnoredAny>(
                $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::$method, $path),
                &[$((stringify!($id), $id)),*],
                $crate::client::operations::Input::Required(input.into()),
                $crate::client::operations::Listing::None,
                opts,
            )
            .await
            .map(|_| ())
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };
    ($(#[$meta:meta])* exists $name:ident [$($id:ident),*] = $path:literal; $($rest:tt)*) => {
        $(#[$meta])*
        pub async fn $name(
            &self,
            $($id: &str,)*
            opts: &$crate::client::request::RequestOptions,
        ) -> Result<bool, $crate::client::error::ClientError> {
            self.exists(
                $crate::client::operations::Endpoint::new(stringify!($name), ::reqwest::Method::HEAD, $path),
                &[$((stringify!($id), $id)),*],
                opts,
            )
            .await
        }

        $crate::client::operations::endpoints! { $($rest)* }
    };
}

pub(crate) use endpoints;

mod admin;
mod catalog;
mod households;
mod integrations;
mod meal_plans;
mod meals;
mod recipes;
mod users;
