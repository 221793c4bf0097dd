//! Renderer module
//!
//! Renders a [`HitStore`] either as indented JSON or as colorized text with
//! a trailing summary. Every line goes through an [`OutStream`], which mirrors
//! it into an optional output file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::hits::HitStore;
use crate::core::style::Palette;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn is_structured(self) -> bool {
        self == OutputFormat::Json
    }
}

/// Primary writer plus an optional file that receives the same lines.
pub struct OutStream<W: Write> {
    primary: W,
    sink: Option<BufWriter<File>>,
}

impl<W: Write> OutStream<W> {
    pub fn new(primary: W) -> Self {
        Self {
            primary,
            sink: None,
        }
    }

    /// Also write every line to `path`, truncating it first.
    pub fn with_file(primary: W, path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self {
            primary,
            sink: Some(BufWriter::new(file)),
        })
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.primary, "{}", line).context("Failed to write to output")?;
        if let Some(sink) = self.sink.as_mut() {
            writeln!(sink, "{}", line).context("Failed to write to output file")?;
        }
        Ok(())
    }

    /// Flush both streams and close the file sink.
    pub fn finish(mut self) -> Result<W> {
        self.primary.flush().context("Failed to flush output")?;
        if let Some(mut sink) = self.sink.take() {
            sink.flush().context("Failed to flush output file")?;
        }
        Ok(self.primary)
    }
}

/// Render configuration combining format and styling
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub palette: Palette,
    /// Width of the rule line between repositories.
    pub width: usize,
}

impl RenderConfig {
    pub fn new(format: OutputFormat, palette: Palette, width: usize) -> Self {
        Self {
            format,
            palette,
            width,
        }
    }
}

/// Renderer for accumulated hits
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render<W: Write>(&self, store: &HitStore, out: &mut OutStream<W>) -> Result<()> {
        match self.config.format {
            OutputFormat::Json => self.render_json(store, out),
            OutputFormat::Human => self.render_human(store, out),
        }
    }

    /// One JSON document, indented by two spaces.
    fn render_json<W: Write>(&self, store: &HitStore, out: &mut OutStream<W>) -> Result<()> {
        let json = serde_json::to_string_pretty(store).context("Failed to serialize hits")?;
        out.write_line(&json)
    }

    fn render_human<W: Write>(&self, store: &HitStore, out: &mut OutStream<W>) -> Result<()> {
        let p = &self.config.palette;
        let separator = "_".repeat(self.config.width);

        for (repo, files) in store.repositories() {
            out.write_line(&separator)?;
            out.write_line("")?;
            out.write_line(&format!("{}{}{}", p.repo, repo, p.reset))?;
            for (path, lines) in files {
                out.write_line(&format!("    /{}", path))?;
                for (line_num, text) in lines {
                    out.write_line(&format!(
                        "      {}{:>4}:{} {}{}{}",
                        p.line_num, line_num, p.reset, p.line, text, p.reset
                    ))?;
                }
            }
        }

        let summary = store.summary();
        out.write_line(&separator)?;
        out.write_line("")?;
        out.write_line(&format!("> Repositories  {}{}{}", p.mark, summary.repositories, p.reset))?;
        out.write_line(&format!("> Files         {}{}{}", p.mark, summary.files, p.reset))?;
        out.write_line(&format!("> Matched lines {}{}{}", p.mark, summary.lines, p.reset))?;
        Ok(())
    }
}
