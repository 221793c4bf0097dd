//! Terminal styling
//!
//! All ANSI sequences live in a [`Palette`] value that is handed to the
//! snippet parser and the renderer. A monochrome palette is the same shape
//! with every sequence empty, so callers never branch on color mode.

use colored::Color;

/// SGR codes for bold and dim, combined with a foreground color.
const BOLD: &str = "1";
const DIM: &str = "2";

const RESET: &str = "\x1b[0m";

/// Escape sequences used when printing results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    pub banner: String,
    pub repo: String,
    pub line_num: String,
    pub line: String,
    pub mark: String,
    pub reset: String,
}

fn sgr(color: Color, attr: Option<&str>) -> String {
    match attr {
        Some(attr) => format!("\x1b[{};{}m", color.to_fg_str(), attr),
        None => format!("\x1b[{}m", color.to_fg_str()),
    }
}

impl Palette {
    /// Full-color palette.
    pub fn ansi() -> Self {
        Self {
            banner: sgr(Color::Magenta, Some(BOLD)),
            repo: sgr(Color::White, Some(BOLD)),
            line_num: sgr(Color::Red, None),
            line: sgr(Color::White, Some(DIM)),
            mark: sgr(Color::Green, None),
            reset: RESET.to_string(),
        }
    }

    /// Palette with every sequence empty.
    pub fn monochrome() -> Self {
        Self::default()
    }

    /// Pick a palette from the user-facing switches.
    ///
    /// Structured output always forces monochrome, escape codes would end up
    /// inside JSON strings otherwise.
    pub fn for_output(monochrome: bool, structured: bool) -> Self {
        if monochrome || structured {
            Self::monochrome()
        } else {
            Self::ansi()
        }
    }

    pub fn is_monochrome(&self) -> bool {
        self.reset.is_empty()
    }

    /// Text inserted where a highlight span opens inside a matched line.
    pub fn highlight_open(&self) -> String {
        format!("{}{}", self.reset, self.mark)
    }

    /// Text inserted where a highlight span closes, returning to line color.
    pub fn highlight_close(&self) -> String {
        format!("{}{}", self.reset, self.line)
    }
}

/// Startup banner, colored with the palette's banner color.
pub fn banner(palette: &Palette) -> String {
    let bc = &palette.banner;
    let r = &palette.reset;
    format!(
        "\n   {bc}____ ____ ____ ___  {r}____ _ ___ _  _ _  _ ___ {r}\n   \
         {bc}| __ |__/ |___ |__] {r}| __ |  |  |__| |  | |__] {r}\n   \
         {bc}|__| |  \\ |___ |   {r} |__| |  |  |  | |__| |__] {r}\n\n"
    )
}
