//! `tracing` output for the browser console.
//!
//! Events go through the fmt layer into `tracing-web`'s console writer, which
//! picks the `console` method from the event level. There is no clock on
//! `wasm32-unknown-unknown`, so timestamps are turned off.

use tracing_subscriber::EnvFilter;
use tracing_web::MakeWebConsoleWriter;

const FALLBACK_DIRECTIVE: &str = "info";

/// Install the global subscriber. Safe to call more than once.
pub fn init(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(directive))
        .with_writer(MakeWebConsoleWriter::new())
        .with_ansi(false)
        .without_time()
        .try_init();
}

/// Filter for the configured directive; a malformed one falls back to `info`.
fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))
}
