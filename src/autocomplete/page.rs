//! Page requests, page responses and the pagination cursor.
//!
//! The server paginates with `limit`/`offset` query parameters and tells the
//! client where the next page lives through a `next` URL. The component never
//! computes offsets itself: it copies `limit` and `offset` out of `next` and
//! sends them back unchanged.

use serde_json::{Map, Value};
use url::Url;

/// Caller-supplied query parameters, compared by value.
pub type Params = Map<String, Value>;

/// Reports whether two parameter sets differ in content.
///
/// Changing the parameters to an equal copy is not a context change.
pub fn params_changed(current: &Params, next: &Params) -> bool {
    current != next
}

/// Where the next page starts, as announced by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageCursor {
    /// `limit` query parameter of the `next` URL.
    pub limit: Option<String>,
    /// `offset` query parameter of the `next` URL.
    pub offset: Option<String>,
}

impl PageCursor {
    /// Extracts the cursor from a `next` URL. An unparsable URL yields
    /// `None`, which callers treat as the end of the listing.
    ///
    /// ```rust
    /// use bubbletea_autocomplete::autocomplete::PageCursor;
    ///
    /// let cursor = PageCursor::from_next_url("https://hr.example/api/users/?limit=20&offset=40").unwrap();
    /// assert_eq!(cursor.limit.as_deref(), Some("20"));
    /// assert_eq!(cursor.offset.as_deref(), Some("40"));
    /// ```
    pub fn from_next_url(next: &str) -> Option<Self> {
        let url = Url::parse(next).ok()?;
        let mut cursor = PageCursor::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "limit" => cursor.limit = Some(value.into_owned()),
                "offset" => cursor.offset = Some(value.into_owned()),
                _ => {}
            }
        }
        Some(cursor)
    }
}

/// One GET request for a page of options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageRequest {
    /// Endpoint path or URL.
    pub endpoint: String,
    /// Caller parameters.
    pub params: Params,
    /// Search filter, when the request is filtered.
    pub search: Option<String>,
    /// Position of the page; `None` asks for the first page.
    pub cursor: Option<PageCursor>,
}

const RESERVED: [&str; 3] = ["search", "limit", "offset"];

impl PageRequest {
    /// Flattens the request into query pairs.
    ///
    /// Caller parameters come first in key order. `search`, `limit` and
    /// `offset` belong to the component: caller values under those keys are
    /// dropped, and the component's own are only sent when set. Null values
    /// are skipped and arrays repeat their key.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.params {
            if RESERVED.contains(&key.as_str()) {
                continue;
            }
            push_param(&mut pairs, key, value);
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(cursor) = &self.cursor {
            if let Some(limit) = &cursor.limit {
                pairs.push(("limit".to_string(), limit.clone()));
            }
            if let Some(offset) = &cursor.offset {
                pairs.push(("offset".to_string(), offset.clone()));
            }
        }
        pairs
    }

    /// Whether the request carries a search filter.
    pub fn is_filtered(&self) -> bool {
        self.search.is_some()
    }
}

fn push_param(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for item in items {
                push_param(pairs, key, item);
            }
        }
        other => pairs.push((key.to_string(), other.to_string())),
    }
}

/// A decoded page response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Raw result entries.
    pub results: Vec<Value>,
    /// URL of the next page, if any.
    pub next: Option<String>,
}

impl Page {
    /// Interprets a response payload.
    ///
    /// `{"results": [...], "next": "..."}` is a paginated page. A bare array
    /// is the complete listing with no further pages. Anything else decodes to
    /// an empty last page.
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Object(mut map) if map.contains_key("results") => {
                let results = match map.remove("results") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                let next = match map.remove("next") {
                    Some(Value::String(s)) if !s.is_empty() => Some(s),
                    _ => None,
                };
                Page { results, next }
            }
            Value::Array(items) => Page {
                results: items,
                next: None,
            },
            _ => Page::default(),
        }
    }

    /// The cursor for the following page, if the server announced one.
    pub fn next_cursor(&self) -> Option<PageCursor> {
        self.next.as_deref().and_then(PageCursor::from_next_url)
    }
}
