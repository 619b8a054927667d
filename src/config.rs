//! Demo configuration from environment variables.

use std::env;

use crate::types::TICK_MS;

/// Footprint used when neither the environment nor the terminal gives a size
pub const FALLBACK_SIZE: (u16, u16) = (40, 12);

/// Ticks played by a headless run when `CHARMAP_TICKS` is unset
pub const DEFAULT_HEADLESS_TICKS: u64 = 12;

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub width: u16,
    pub height: u16,
    /// Ticks to play before exiting; `0` runs until a quit key
    pub ticks: u64,
    pub tick_ms: u32,
    /// Row delimiter for headless dumps
    pub delimiter: String,
    /// Print dumps to stdout instead of drawing to the terminal
    pub headless: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: FALLBACK_SIZE.0,
            height: FALLBACK_SIZE.1,
            ticks: 0,
            tick_ms: TICK_MS,
            delimiter: "\n".to_string(),
            headless: false,
        }
    }
}

impl DemoConfig {
    /// Create from `CHARMAP_*` environment variables
    ///
    /// Unset or unparsable values fall back to defaults; the size falls back to
    /// the terminal size first.
    pub fn from_env() -> Self {
        let (term_w, term_h) = crossterm::terminal::size().unwrap_or(FALLBACK_SIZE);

        let width = parse_var("CHARMAP_WIDTH").unwrap_or(term_w);
        let height = parse_var("CHARMAP_HEIGHT").unwrap_or(term_h);
        let tick_ms = parse_var("CHARMAP_TICK_MS")
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let headless = env::var("CHARMAP_HEADLESS")
            .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let default_ticks = if headless { DEFAULT_HEADLESS_TICKS } else { 0 };
        let ticks = parse_var("CHARMAP_TICKS").unwrap_or(default_ticks);

        let delimiter = env::var("CHARMAP_DELIMIT")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.replace("\\n", "\n"))
            .unwrap_or_else(|| "\n".to_string());

        Self {
            width,
            height,
            ticks,
            tick_ms,
            delimiter,
            headless,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
