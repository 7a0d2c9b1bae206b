//! Pagination, sorting, and search parameters for list operations.
//!
//! A [`QueryFilter`] serialises into [`QueryValues`], an ordered key/value map
//! whose encoded form always lists keys lexicographically. A list operation
//! given no filter uses [`QueryFilter::default`], which encodes to
//! `limit=50&page=1&sortBy=asc`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::observability::{Logger, Span};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u8 = 50;
pub const MAX_LIMIT: u8 = 250;

pub const QUERY_KEY_PAGE: &str = "page";
pub const QUERY_KEY_LIMIT: &str = "limit";
pub const QUERY_KEY_SORT_BY: &str = "sortBy";
pub const QUERY_KEY_INCLUDE_ARCHIVED: &str = "includeArchived";
pub const QUERY_KEY_CREATED_BEFORE: &str = "createdBefore";
pub const QUERY_KEY_CREATED_AFTER: &str = "createdAfter";
pub const QUERY_KEY_UPDATED_BEFORE: &str = "updatedBefore";
pub const QUERY_KEY_UPDATED_AFTER: &str = "updatedAfter";
pub const QUERY_KEY_SEARCH: &str = "q";

/// Sort direction for list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Asc,
    Desc,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Asc => "asc",
            SortBy::Desc => "desc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortBy::Asc),
            "desc" => Ok(SortBy::Desc),
            other => Err(format!("unknown sort order {other:?}")),
        }
    }
}

/// Query-string parameters, kept in lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryValues(BTreeMap<String, String>);

impl QueryValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Percent-encodes the values into `k=v&k=v` form.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parses a `k=v&k=v` query string. Later duplicates win.
    pub fn parse(query: &str) -> Self {
        let mut values = Self::new();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values.set(decode_component(key), decode_component(value));
        }
        values
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

impl fmt::Display for QueryValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Pagination, sort, time-bound, and search parameters for list operations.
///
/// Setters clamp out-of-range values instead of rejecting them: a page of `0`
/// becomes `1`, a limit of `0` becomes [`DEFAULT_LIMIT`], and limits above
/// [`MAX_LIMIT`] become [`MAX_LIMIT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    page: u64,
    limit: u8,
    sort_by: SortBy,
    include_archived: Option<bool>,
    created_before: Option<DateTime<Utc>>,
    created_after: Option<DateTime<Utc>>,
    updated_before: Option<DateTime<Utc>>,
    updated_after: Option<DateTime<Utc>>,
    search: Option<String>,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::Asc,
            include_archived: None,
            created_before: None,
            created_after: None,
            updated_before: None,
            updated_after: None,
            search: None,
        }
    }
}

fn clamp_page(page: u64) -> u64 {
    page.max(DEFAULT_PAGE)
}

fn clamp_limit(limit: u64) -> u8 {
    match limit {
        0 => DEFAULT_LIMIT,
        l if l > u64::from(MAX_LIMIT) => MAX_LIMIT,
        l => u8::try_from(l).unwrap_or(MAX_LIMIT),
    }
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = clamp_page(page);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = clamp_limit(limit);
        self
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_include_archived(mut self, include: bool) -> Self {
        self.include_archived = Some(include);
        self
    }

    pub fn created_before(mut self, at: DateTime<Utc>) -> Self {
        self.created_before = Some(at);
        self
    }

    pub fn created_after(mut self, at: DateTime<Utc>) -> Self {
        self.created_after = Some(at);
        self
    }

    pub fn updated_before(mut self, at: DateTime<Utc>) -> Self {
        self.updated_before = Some(at);
        self
    }

    pub fn updated_after(mut self, at: DateTime<Utc>) -> Self {
        self.updated_after = Some(at);
        self
    }

    /// Attaches a search term to the filter's own serialised form.
    ///
    /// Operations never send it: list operations drop it, and search
    /// operations send their `query` argument as `q` instead. It exists so a
    /// filter parsed from an incoming query string keeps its `q`.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// A copy of the filter with the search term cleared.
    pub fn without_search(&self) -> Self {
        Self {
            search: None,
            ..self.clone()
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u8 {
        self.limit
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn include_archived(&self) -> Option<bool> {
        self.include_archived
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Serialises the filter. `page`, `limit`, and `sortBy` are always
    /// present; everything else only when set.
    pub fn to_values(&self) -> QueryValues {
        let mut values = QueryValues::new();
        values.set(QUERY_KEY_PAGE, self.page.to_string());
        values.set(QUERY_KEY_LIMIT, self.limit.to_string());
        values.set(QUERY_KEY_SORT_BY, self.sort_by.as_str());

        if let Some(include) = self.include_archived {
            values.set(QUERY_KEY_INCLUDE_ARCHIVED, include.to_string());
        }

        let bounds = [
            (QUERY_KEY_CREATED_BEFORE, self.created_before),
            (QUERY_KEY_CREATED_AFTER, self.created_after),
            (QUERY_KEY_UPDATED_BEFORE, self.updated_before),
            (QUERY_KEY_UPDATED_AFTER, self.updated_after),
        ];
        for (key, bound) in bounds {
            if let Some(at) = bound {
                values.set(key, at.to_rfc3339());
            }
        }

        if let Some(q) = &self.search {
            values.set(QUERY_KEY_SEARCH, q.clone());
        }

        values
    }

    /// Rebuilds a filter from query values, clamping out-of-range numbers.
    /// Missing or unparseable entries fall back to their defaults.
    pub fn from_values(values: &QueryValues) -> Self {
        let mut filter = Self::default();

        if let Some(page) = values.get(QUERY_KEY_PAGE).and_then(|v| v.parse::<u64>().ok()) {
            filter.page = clamp_page(page);
        }
        if let Some(limit) = values.get(QUERY_KEY_LIMIT).and_then(|v| v.parse::<u64>().ok()) {
            filter.limit = clamp_limit(limit);
        }
        if let Some(sort_by) = values.get(QUERY_KEY_SORT_BY).and_then(|v| v.parse().ok()) {
            filter.sort_by = sort_by;
        }
        filter.include_archived = values
            .get(QUERY_KEY_INCLUDE_ARCHIVED)
            .and_then(|v| v.parse::<bool>().ok());

        let timestamp = |key: &str| {
            values
                .get(key)
                .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
                .map(|at| at.with_timezone(&Utc))
        };
        filter.created_before = timestamp(QUERY_KEY_CREATED_BEFORE);
        filter.created_after = timestamp(QUERY_KEY_CREATED_AFTER);
        filter.updated_before = timestamp(QUERY_KEY_UPDATED_BEFORE);
        filter.updated_after = timestamp(QUERY_KEY_UPDATED_AFTER);
        filter.search = values.get(QUERY_KEY_SEARCH).map(str::to_string);

        filter
    }

    pub fn from_query(query: &str) -> Self {
        Self::from_values(&QueryValues::parse(query))
    }

    /// Returns `logger` enriched with the filter's values.
    pub fn attach_to_logger(&self, logger: Logger) -> Logger {
        self.to_values()
            .iter()
            .fold(logger, |logger, (key, value)| logger.with_value(key, value))
    }

    pub fn attach_to_span(&self, span: &mut Span) {
        for (key, value) in self.to_values().iter() {
            span.attach(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_filter_encodes_in_key_order() {
        assert_eq!(QueryFilter::default().to_values().encode(), "limit=50&page=1&sortBy=asc");
    }

    #[test]
    fn optional_keys_are_only_emitted_when_set() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let values = QueryFilter::new()
            .with_page(3)
            .with_limit(20)
            .with_sort_by(SortBy::Desc)
            .with_include_archived(true)
            .created_after(at)
            .to_values();

        assert_eq!(values.len(), 5);
        assert_eq!(values.get(QUERY_KEY_CREATED_AFTER), Some("2024-03-01T12:00:00+00:00"));
        assert_eq!(values.get(QUERY_KEY_CREATED_BEFORE), None);
        assert_eq!(
            values.encode(),
            "createdAfter=2024-03-01T12%3A00%3A00%2B00%3A00&includeArchived=true&limit=20&page=3&sortBy=desc"
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let filter = QueryFilter::new().with_page(0).with_limit(0);
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), DEFAULT_LIMIT);

        let filter = QueryFilter::new().with_limit(10_000);
        assert_eq!(filter.limit(), MAX_LIMIT);

        let parsed = QueryFilter::from_query("page=0&limit=900");
        assert_eq!(parsed.page(), 1);
        assert_eq!(parsed.limit(), MAX_LIMIT);
    }

    #[test]
    fn round_trips_through_query_string() {
        let at = Utc.with_ymd_and_hms(2023, 11, 5, 8, 30, 0).unwrap();
        let filter = QueryFilter::new()
            .with_page(7)
            .with_limit(125)
            .with_sort_by(SortBy::Desc)
            .with_include_archived(false)
            .created_before(at)
            .created_after(at)
            .updated_before(at)
            .updated_after(at)
            .with_search("red onion & garlic");

        let parsed = QueryFilter::from_query(&filter.to_values().encode());
        assert_eq!(parsed, filter);
    }

    #[test]
    fn without_search_keeps_everything_else() {
        let filter = QueryFilter::new().with_page(4).with_search("leek");
        let cleared = filter.without_search();

        assert_eq!(cleared.search(), None);
        assert_eq!(cleared.page(), 4);
        assert_eq!(filter.search(), Some("leek"));
    }

    #[test]
    fn unknown_keys_are_ignored_when_parsing() {
        let parsed = QueryFilter::from_query("?page=2&flavour=spicy&sortBy=DESC");
        assert_eq!(parsed.page(), 2);
        assert_eq!(parsed.sort_by(), SortBy::Desc);
        assert_eq!(parsed.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn attaching_does_not_mutate_the_filter() {
        let filter = QueryFilter::new().with_page(2);
        let before = filter.clone();

        let logger = filter.attach_to_logger(Logger::silent());
        let mut span = Span::disabled("test");
        filter.attach_to_span(&mut span);

        assert_eq!(filter, before);
        assert_eq!(logger.value(QUERY_KEY_PAGE), Some("2"));
        assert_eq!(span.attribute(QUERY_KEY_SORT_BY), Some("asc"));
    }
}
