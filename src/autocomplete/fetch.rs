//! The GET capability the component loads options through.
//!
//! [`Fetcher`] is the seam between the widget and the network. The widget
//! only ever reads; [`HttpFetcher`] is the stock implementation on top of
//! `reqwest`, and tests plug in their own.

use super::page::PageRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a page could not be loaded.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be turned into a URL.
    #[error("invalid endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        /// The offending endpoint.
        endpoint: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// Connection or protocol failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The body was not JSON.
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

/// Performs the GET for one page of options.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `request` and returns the raw JSON payload.
    async fn get(&self, request: &PageRequest) -> Result<Value, FetchError>;
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// [`Fetcher`] backed by a `reqwest` client.
///
/// Relative endpoints are resolved against the base URL, so one fetcher can
/// serve every auto-complete talking to the same API.
///
/// ```rust
/// use bubbletea_autocomplete::autocomplete::HttpFetcher;
///
/// let fetcher = HttpFetcher::new()
///     .unwrap()
///     .with_base_url("https://hr.example/api/v1/".parse().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    base_url: Option<Url>,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client.
    pub fn new() -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(http))
    }

    /// Creates a fetcher around an existing client, e.g. one carrying auth headers.
    pub fn with_client(http: Client) -> Self {
        Self {
            http,
            base_url: None,
        }
    }

    /// Sets the URL relative endpoints are resolved against.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Builds the full URL for `request`, query string included.
    ///
    /// Endpoints are appended to the base path whether or not they start
    /// with `/`, so `/users/` against `https://hr.example/api/v1` resolves to
    /// `https://hr.example/api/v1/users/`. Absolute endpoints are used as is.
    pub fn url_for(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let parsed = match &self.base_url {
            Some(base) => {
                let mut base = base.clone();
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(request.endpoint.trim_start_matches('/'))
            }
            None => Url::parse(&request.endpoint),
        };
        let mut url = parsed.map_err(|source| FetchError::InvalidEndpoint {
            endpoint: request.endpoint.clone(),
            source,
        })?;
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, request: &PageRequest) -> Result<Value, FetchError> {
        let url = self.url_for(request)?;
        tracing::debug!(%url, "fetching options page");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::page::PageCursor;
    use serde_json::json;

    fn request(endpoint: &str) -> PageRequest {
        PageRequest {
            endpoint: endpoint.into(),
            params: json!({"organization": "acme"}).as_object().cloned().unwrap(),
            search: None,
            cursor: Some(PageCursor {
                limit: Some("10".into()),
                offset: Some("30".into()),
            }),
        }
    }

    #[test]
    fn test_url_joins_base_and_query() {
        let fetcher = HttpFetcher::with_client(Client::new())
            .with_base_url(Url::parse("https://hr.example/api/v1/").unwrap());
        let url = fetcher.url_for(&request("users/")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hr.example/api/v1/users/?organization=acme&limit=10&offset=30"
        );
    }

    #[test]
    fn test_leading_slash_endpoint_keeps_base_path() {
        for base in ["https://hr.example/api/v1/", "https://hr.example/api/v1"] {
            let fetcher =
                HttpFetcher::with_client(Client::new()).with_base_url(Url::parse(base).unwrap());
            let req = PageRequest {
                endpoint: "/recruitment/common/country/".into(),
                ..PageRequest::default()
            };
            assert_eq!(
                fetcher.url_for(&req).unwrap().as_str(),
                "https://hr.example/api/v1/recruitment/common/country/"
            );
        }
    }

    #[test]
    fn test_absolute_endpoint_ignores_base() {
        let fetcher = HttpFetcher::with_client(Client::new())
            .with_base_url(Url::parse("https://hr.example/api/v1/").unwrap());
        let req = PageRequest {
            endpoint: "https://other.example/branches/".into(),
            ..PageRequest::default()
        };
        assert_eq!(
            fetcher.url_for(&req).unwrap().as_str(),
            "https://other.example/branches/"
        );
    }

    #[test]
    fn test_relative_endpoint_without_base_is_invalid() {
        let fetcher = HttpFetcher::with_client(Client::new());
        let err = fetcher.url_for(&request("users/")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("users/"));
    }

    #[test]
    fn test_no_trailing_question_mark_without_params() {
        let fetcher = HttpFetcher::with_client(Client::new());
        let req = PageRequest {
            endpoint: "https://hr.example/api/v1/branches/".into(),
            ..PageRequest::default()
        };
        assert_eq!(
            fetcher.url_for(&req).unwrap().as_str(),
            "https://hr.example/api/v1/branches/"
        );
    }
}
