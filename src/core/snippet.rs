//! Snippet parsing
//!
//! grep.app returns each hit as an HTML table fragment. Every row carries a
//! `div.lineno` cell and a `pre` cell with the code; matched ranges inside the
//! code are wrapped in `<mark>` tags.
//!
//! Highlights must survive entity decoding, so each `<mark>` pair is first
//! swapped for two opaque sentinel tokens, the fragment is decoded to plain
//! text, and the sentinels are finally replaced with the palette's highlight
//! sequences (or nothing in monochrome mode).

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use uuid::Uuid;

use crate::core::hits::Lines;
use crate::core::style::Palette;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("Invalid tr selector"));
static LINENO: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.lineno").expect("Invalid lineno selector"));
static CODE: Lazy<Selector> = Lazy::new(|| Selector::parse("pre").expect("Invalid pre selector"));

/// Opening mark tag with any attributes.
static MARK_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<mark[^<]*>").expect("Invalid MARK_OPEN_RE regex"));

const MARK_OPEN: &str = "<mark";
const MARK_CLOSE: &str = "</mark>";

/// Turns snippet fragments into line number -> highlighted line text.
#[derive(Debug, Clone)]
pub struct SnippetParser {
    open_sentinel: String,
    close_sentinel: String,
    open_style: String,
    close_style: String,
}

impl SnippetParser {
    pub fn new(palette: &Palette) -> Self {
        Self {
            open_sentinel: Uuid::new_v4().simple().to_string(),
            close_sentinel: Uuid::new_v4().simple().to_string(),
            open_style: palette.highlight_open(),
            close_style: palette.highlight_close(),
        }
    }

    /// Parse one snippet. Rows without a line number, without a code cell, or
    /// without any highlight are skipped. A repeated line number keeps the
    /// last row.
    pub fn parse(&self, snippet: &str) -> Lines {
        let document = Html::parse_fragment(snippet);
        let mut lines = Lines::new();

        for row in document.select(&ROW) {
            let Some(lineno) = row.select(&LINENO).next() else {
                continue;
            };
            let Some(code) = row.select(&CODE).next() else {
                continue;
            };

            let inner = code.inner_html();
            if !inner.contains(MARK_OPEN) {
                continue;
            }

            let line_number = lineno.text().collect::<String>().trim().to_string();
            lines.insert(line_number, self.decode_line(&inner));
        }

        lines
    }

    /// Swap marks for sentinels, decode entities, then apply styling.
    fn decode_line(&self, inner_html: &str) -> String {
        let marked = MARK_OPEN_RE.replace_all(inner_html, self.open_sentinel.as_str());
        let marked = marked.replace(MARK_CLOSE, &self.close_sentinel);

        let text: String = Html::parse_fragment(&marked)
            .root_element()
            .text()
            .collect();

        text.replace(&self.open_sentinel, &self.open_style)
            .replace(&self.close_sentinel, &self.close_style)
    }
}
