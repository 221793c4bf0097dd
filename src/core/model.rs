//! Search request and page result model
//!
//! [`SearchOptions`] holds the immutable query settings for one invocation.
//! A [`SearchRequest`] is built from them for every page, and each fetched
//! page comes back as a [`PageResult`].

use crate::core::error::SearchError;
use crate::core::hits::HitStore;

/// Results per page. The API contract fixes this at 10; pagination math
/// depends on it.
pub const PAGE_SIZE: u64 = 10;

/// Query settings shared by every page of one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub query: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
    pub whole_words: bool,
    pub repo_filter: Option<String>,
    pub path_filter: Option<String>,
    pub lang_filter: Vec<String>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Reject option combinations the API cannot express.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.use_regex && self.whole_words {
            return Err(SearchError::invalid_argument(
                "cannot use regex (-r) and whole words (-w) together",
            ));
        }
        Ok(())
    }

    /// Split a comma-separated language list, dropping empty entries.
    pub fn parse_languages(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest<'a> {
    pub options: &'a SearchOptions,
    pub page: u32,
}

impl<'a> SearchRequest<'a> {
    pub fn new(options: &'a SearchOptions, page: u32) -> Result<Self, SearchError> {
        options.validate()?;
        if page == 0 {
            return Err(SearchError::invalid_argument("page numbers start at 1"));
        }
        Ok(Self { options, page })
    }

    /// Query parameters in the order the API expects them.
    ///
    /// `f.lang` is repeated once per language.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let options = self.options;
        let mut pairs = vec![("q", options.query.clone()), ("page", self.page.to_string())];

        if options.use_regex {
            pairs.push(("regexp", "true".to_string()));
        } else if options.whole_words {
            pairs.push(("words", "true".to_string()));
        }
        if options.case_sensitive {
            pairs.push(("case", "true".to_string()));
        }
        if let Some(repo) = &options.repo_filter {
            pairs.push(("f.repo.pattern", repo.clone()));
        }
        if let Some(path) = &options.path_filter {
            pairs.push(("f.path.pattern", path.clone()));
        }
        for lang in &options.lang_filter {
            pairs.push(("f.lang", lang.clone()));
        }

        pairs
    }
}

/// One fetched page.
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    pub hits: HitStore,
    pub reported_total: u64,
    pub next_page: Option<u32>,
}

/// Next page to request, if the reported total is not yet covered by the
/// pages fetched so far.
pub fn next_page(reported_total: u64, page: u32) -> Option<u32> {
    if reported_total > PAGE_SIZE * u64::from(page) {
        page.checked_add(1)
    } else {
        None
    }
}
