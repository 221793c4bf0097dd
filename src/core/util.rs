//! Common utilities

use std::io::{self, IsTerminal};

/// Rule width used when stdout is not a terminal.
pub const FALLBACK_WIDTH: usize = 80;

/// Current terminal width in columns, or [`FALLBACK_WIDTH`] when stdout
/// is redirected.
pub fn terminal_width() -> usize {
    if !io::stdout().is_terminal() {
        return FALLBACK_WIDTH;
    }
    width_for(true, crossterm::terminal::size().ok())
}

fn width_for(stdout_is_terminal: bool, size: Option<(u16, u16)>) -> usize {
    match size {
        Some((cols, _)) if stdout_is_terminal && cols > 0 => usize::from(cols),
        _ => FALLBACK_WIDTH,
    }
}

/// Full request URL for logs and error messages.
pub fn display_url(base: &str, pairs: &[(&str, String)]) -> String {
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query)
    }
}
