//! Pagination flow
//!
//! Fetches page 1, then keeps requesting the next page while the API reports
//! more results than the pages fetched so far cover, up to `max_pages`.
//! Requests are strictly sequential with a fixed pause between them.

use anyhow::Result;
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

use crate::backends::grep_app::PageSource;
use crate::core::hits::HitStore;
use crate::core::model::{SearchOptions, SearchRequest, PAGE_SIZE};
use crate::core::render::OutStream;

pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Pause between two page requests, to stay under the API rate limit.
pub const PACING_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub max_pages: u32,
    pub pacing: Duration,
    /// Suppress progress lines (structured output).
    pub quiet: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            pacing: PACING_DELAY,
            quiet: false,
        }
    }
}

/// Fetch every page of a search and merge them into one store.
///
/// Any fetch error aborts the whole run; nothing fetched so far is returned.
pub fn run<S: PageSource, W: Write>(
    source: &S,
    options: &SearchOptions,
    config: &DriverConfig,
    out: &mut OutStream<W>,
) -> Result<HitStore> {
    options.validate()?;

    if !config.quiet {
        out.write_line(&format!("> Fetching {}/?", PAGE_SIZE))?;
    }

    let first = source.fetch(&SearchRequest::new(options, 1)?)?;
    let total = first.reported_total;
    let mut store = first.hits;
    let mut next = first.next_page;
    let mut fetched = 1u32;

    while let Some(page) = next.filter(|page| *page <= config.max_pages) {
        thread::sleep(config.pacing);
        if !config.quiet {
            out.write_line(&format!("> Fetching {}/{}", PAGE_SIZE * u64::from(page), total))?;
        }

        let result = source.fetch(&SearchRequest::new(options, page)?)?;
        store.merge(result.hits);
        next = result.next_page;
        fetched = page;
        debug!(page, reported_total = result.reported_total, "page merged");
    }

    match next {
        Some(page) => info!(fetched, skipped_from = page, "stopped at page limit"),
        None => info!(fetched, total, "all pages fetched"),
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SearchError;
    use crate::core::model::{next_page, PageResult};
    use std::cell::RefCell;
    use std::time::Instant;

    /// Reports `totals[page - 1]` (or the last entry) and one line per page.
    struct FakeSource {
        totals: Vec<u64>,
        fail_on: Option<u32>,
        requested: RefCell<Vec<u32>>,
    }

    impl FakeSource {
        fn new(totals: Vec<u64>) -> Self {
            Self {
                totals,
                fail_on: None,
                requested: RefCell::new(Vec::new()),
            }
        }

        fn pages(&self) -> Vec<u32> {
            self.requested.borrow().clone()
        }
    }

    impl PageSource for FakeSource {
        fn fetch(&self, request: &SearchRequest<'_>) -> Result<PageResult, SearchError> {
            self.requested.borrow_mut().push(request.page);
            if self.fail_on == Some(request.page) {
                return Err(SearchError::Api {
                    status: 500,
                    url: format!("http://fake?page={}", request.page),
                });
            }

            let idx = (request.page as usize - 1).min(self.totals.len() - 1);
            let total = self.totals[idx];
            let mut hits = HitStore::new();
            hits.add("r", "p", request.page.to_string(), format!("page {}", request.page));
            hits.add("r", "shared", "1", format!("from page {}", request.page));

            Ok(PageResult {
                hits,
                reported_total: total,
                next_page: next_page(total, request.page),
            })
        }
    }

    /// Records when each page was requested; always reports 30 results.
    struct TimedSource {
        calls: RefCell<Vec<Instant>>,
    }

    impl PageSource for TimedSource {
        fn fetch(&self, request: &SearchRequest<'_>) -> Result<PageResult, SearchError> {
            self.calls.borrow_mut().push(Instant::now());
            Ok(PageResult {
                hits: HitStore::new(),
                reported_total: 30,
                next_page: next_page(30, request.page),
            })
        }
    }

    fn config(max_pages: u32, quiet: bool) -> DriverConfig {
        DriverConfig {
            max_pages,
            pacing: Duration::ZERO,
            quiet,
        }
    }

    fn drive(source: &FakeSource, config: DriverConfig) -> (Result<HitStore>, String) {
        let mut out = OutStream::new(Vec::new());
        let result = run(source, &SearchOptions::new("foo"), &config, &mut out);
        let text = String::from_utf8(out.finish().unwrap()).unwrap();
        (result, text)
    }

    #[test]
    fn test_single_page_when_total_fits() {
        let source = FakeSource::new(vec![3]);
        let (store, progress) = drive(&source, config(100, false));
        assert_eq!(source.pages(), vec![1]);
        assert_eq!(store.unwrap().summary().lines, 2);
        assert_eq!(progress, "> Fetching 10/?\n");
    }

    #[test]
    fn test_stops_when_total_covered() {
        let source = FakeSource::new(vec![25, 25, 20]);
        let (store, progress) = drive(&source, config(100, false));

        assert_eq!(source.pages(), vec![1, 2, 3]);
        assert_eq!(progress, "> Fetching 10/?\n> Fetching 20/25\n> Fetching 30/25\n");
        let store = store.unwrap();
        assert_eq!(store.get("r", "shared", "1"), Some("from page 3"));
        assert_eq!(store.get("r", "p", "2"), Some("page 2"));
    }

    #[test]
    fn test_total_shrinks_mid_run() {
        let source = FakeSource::new(vec![25, 20]);
        let _ = drive(&source, config(100, false));
        assert_eq!(source.pages(), vec![1, 2]);
    }

    #[test]
    fn test_respects_max_pages() {
        let source = FakeSource::new(vec![10_000]);
        let (store, _) = drive(&source, config(4, true));
        assert_eq!(source.pages(), vec![1, 2, 3, 4]);
        assert_eq!(store.unwrap().summary().lines, 5);
    }

    #[test]
    fn test_max_pages_one_fetches_only_first() {
        let source = FakeSource::new(vec![500]);
        let _ = drive(&source, config(1, true));
        assert_eq!(source.pages(), vec![1]);
    }

    #[test]
    fn test_quiet_suppresses_progress() {
        let source = FakeSource::new(vec![25]);
        let (_, progress) = drive(&source, config(100, true));
        assert!(progress.is_empty());
    }

    #[test]
    fn test_error_aborts_run() {
        let mut source = FakeSource::new(vec![50]);
        source.fail_on = Some(3);
        let (result, _) = drive(&source, config(100, true));

        assert_eq!(source.pages(), vec![1, 2, 3]);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SearchError>(),
            Some(SearchError::Api { status: 500, .. })
        ));
    }

    #[test]
    fn test_pacing_between_pages_only() {
        let pacing = Duration::from_millis(50);
        let source = TimedSource {
            calls: RefCell::new(Vec::new()),
        };
        let config = DriverConfig {
            max_pages: 100,
            pacing,
            quiet: true,
        };

        let started = Instant::now();
        let mut out = OutStream::new(Vec::new());
        run(&source, &SearchOptions::new("foo"), &config, &mut out).unwrap();

        let calls = source.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].duration_since(started) < pacing);
        for pair in calls.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= pacing);
        }
    }

    #[test]
    fn test_invalid_options_make_no_request() {
        let source = FakeSource::new(vec![3]);
        let mut options = SearchOptions::new("foo");
        options.use_regex = true;
        options.whole_words = true;

        let mut out = OutStream::new(Vec::new());
        let result = run(&source, &options, &config(100, false), &mut out);

        assert!(result.is_err());
        assert!(source.pages().is_empty());
        assert!(out.finish().unwrap().is_empty());
    }
}
