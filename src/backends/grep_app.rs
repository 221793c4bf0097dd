//! grep.app integration
//!
//! Issues one GET per page against the search API and converts the JSON
//! payload into a per-page [`HitStore`].

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::core::error::SearchError;
use crate::core::hits::HitStore;
use crate::core::model::{next_page, PageResult, SearchRequest};
use crate::core::snippet::SnippetParser;
use crate::core::util::display_url;

/// Public search endpoint.
pub const DEFAULT_API_URL: &str = "https://grep.app/api/search";

/// Upper bound for one request, connect included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can answer a page request.
pub trait PageSource {
    fn fetch(&self, request: &SearchRequest<'_>) -> Result<PageResult, SearchError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    hits: ApiHits,
}

#[derive(Debug, Deserialize)]
struct ApiHits {
    total: u64,
    hits: Vec<ApiHit>,
}

#[derive(Debug, Deserialize)]
struct ApiHit {
    repo: RawField,
    path: RawField,
    content: ApiContent,
}

#[derive(Debug, Deserialize)]
struct ApiContent {
    snippet: String,
}

/// `repo` and `path` arrive either as a plain string or as `{"raw": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawField {
    Plain(String),
    Nested { raw: String },
}

impl RawField {
    fn into_string(self) -> String {
        match self {
            RawField::Plain(s) => s,
            RawField::Nested { raw } => raw,
        }
    }
}

/// Convert a response body into a page result.
pub fn parse_page(
    body: &str,
    page: u32,
    parser: &SnippetParser,
    url: &str,
) -> Result<PageResult, SearchError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| SearchError::malformed(url, e.to_string()))?;

    let mut hits = HitStore::new();
    for hit in response.hits.hits {
        let repo = hit.repo.into_string();
        let path = hit.path.into_string();
        let lines = parser.parse(&hit.content.snippet);
        hits.ensure_file(&repo, &path).extend(lines);
    }

    let reported_total = response.hits.total;
    Ok(PageResult {
        hits,
        reported_total,
        next_page: next_page(reported_total, page),
    })
}

/// Blocking HTTP client for the grep.app search API.
pub struct GrepAppClient {
    http: reqwest::blocking::Client,
    base_url: String,
    parser: SnippetParser,
}

impl GrepAppClient {
    pub fn new(base_url: impl Into<String>, parser: SnippetParser) -> Result<Self, SearchError> {
        let base_url = base_url.into();
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("grepgh/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SearchError::Network {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            parser,
        })
    }
}

impl PageSource for GrepAppClient {
    fn fetch(&self, request: &SearchRequest<'_>) -> Result<PageResult, SearchError> {
        let pairs = request.query_pairs();
        let url = display_url(&self.base_url, &pairs);
        debug!(%url, page = request.page, "fetching page");

        let response = self
            .http
            .get(&self.base_url)
            .query(&pairs)
            .send()
            .map_err(|source| SearchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().map_err(|source| SearchError::Network {
            url: url.clone(),
            source,
        })?;

        let result = parse_page(&body, request.page, &self.parser, &url)?;
        debug!(
            total = result.reported_total,
            next_page = ?result.next_page,
            "page parsed"
        );
        Ok(result)
    }
}
