//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;

use crate::backends::grep_app::{GrepAppClient, DEFAULT_API_URL};
use crate::core::model::SearchOptions;
use crate::core::render::{OutStream, OutputFormat, RenderConfig, Renderer};
use crate::core::snippet::SnippetParser;
use crate::core::style::{banner, Palette};
use crate::core::util::terminal_width;
use crate::flows::paginate::{self, DriverConfig, DEFAULT_MAX_PAGES, PACING_DELAY};

/// grepgh - search public GitHub code through the grep.app API.
#[derive(Parser, Debug)]
#[command(name = "grepgh")]
#[command(
    author,
    version,
    about,
    long_about = r#"grepgh queries the grep.app search API page by page, collects every
matched line, and prints them grouped by repository and file.

Examples:
    grepgh -q "useEffect cleanup"
    grepgh -q "async fn main" --flang Rust
    grepgh -q "import torch" --flang Python --json
    grepgh -q "def test_" --frepo "pytest-dev/pytest"
"#
)]
pub struct Cli {
    /// Query string.
    #[arg(short = 'q', long, value_name = "QUERY")]
    pub query: String,

    /// Case sensitive search.
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Treat the query as a regular expression (cannot be used with -w).
    #[arg(short = 'r', long = "regex")]
    pub use_regex: bool,

    /// Match whole words only (cannot be used with -r).
    #[arg(short = 'w', long = "words")]
    pub whole_words: bool,

    /// Filter by repository pattern (e.g. facebook/react).
    #[arg(long = "frepo", value_name = "PATTERN")]
    pub repo_filter: Option<String>,

    /// Filter by path pattern.
    #[arg(long = "fpath", value_name = "PATTERN")]
    pub path_filter: Option<String>,

    /// Filter by language, comma separated (e.g. Python,Rust,JavaScript).
    #[arg(long = "flang", value_name = "LANGS")]
    pub lang_filter: Option<String>,

    /// Print results as a single JSON document.
    #[arg(
        long,
        long_help = "Print the collected hits as one JSON document (repository -> path ->\n\
line number -> text). Progress lines, the banner and colors are suppressed so the\n\
output stays parseable."
    )]
    pub json: bool,

    /// Also write output to this file.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Monochrome output (no colors).
    #[arg(short = 'm', long)]
    pub monochrome: bool,

    /// Maximum number of pages to fetch.
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_PAGES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_pages: u32,

    /// Search endpoint.
    #[arg(
        long,
        env = "GREPGH_API_URL",
        default_value = DEFAULT_API_URL,
        value_name = "URL",
        hide_env_values = true
    )]
    pub api_url: String,

    /// Verbose mode (debug logs on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            query: self.query.clone(),
            case_sensitive: self.case_sensitive,
            use_regex: self.use_regex,
            whole_words: self.whole_words,
            repo_filter: self.repo_filter.clone(),
            path_filter: self.path_filter.clone(),
            lang_filter: self
                .lang_filter
                .as_deref()
                .map(SearchOptions::parse_languages)
                .unwrap_or_default(),
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let options = cli.search_options();
    options.validate()?;

    let format = OutputFormat::from_json_flag(cli.json);
    let palette = Palette::for_output(cli.monochrome, format.is_structured());

    let stdout = io::stdout().lock();
    let mut out = match &cli.output {
        Some(path) => OutStream::with_file(stdout, path)?,
        None => OutStream::new(stdout),
    };

    if !format.is_structured() && !palette.is_monochrome() {
        out.write_line(&banner(&palette))?;
    }

    let client = GrepAppClient::new(cli.api_url.as_str(), SnippetParser::new(&palette))?;
    let config = DriverConfig {
        max_pages: cli.max_pages,
        pacing: PACING_DELAY,
        quiet: format.is_structured(),
    };
    let store = paginate::run(&client, &options, &config, &mut out)?;

    let renderer = Renderer::with_config(RenderConfig::new(format, palette, terminal_width()));
    renderer.render(&store, &mut out)?;
    out.finish()?;

    Ok(())
}
