//! Execution-context binding for loggers.
//!
//! The same immutable, chain-linked context that carries span identity down a
//! call graph carries at most one logger reference per context node. Lookup
//! finds the nearest bound logger or falls back to the process default, then
//! refreshes trace identity against the looked-up context so a descendant
//! sees spans started after its ancestor bound the logger.

use std::sync::Arc;

use opentelemetry::Context;

use crate::logger::{default_logger, Logger};

/// Derived context carrying `logger` as the nearest-bound logger. `cx` is
/// not mutated.
pub fn with_logger(cx: &Context, logger: &Logger) -> Context {
    cx.with_value(logger.clone())
}

/// The nearest logger bound to `cx`, or the process-wide default.
///
/// The returned logger is re-bound to `cx`: a context-sensitive handler gets
/// a chance to re-resolve its trace identity here, and the logger carries
/// `cx` so per-record resolution sees it at emit time.
pub fn from_context(cx: &Context) -> Logger {
    let base = cx.get::<Logger>().unwrap_or_else(|| default_logger());
    let handler = base
        .handler()
        .refreshed(cx)
        .unwrap_or_else(|| Arc::clone(base.handler()));
    Logger::bound_to(handler, cx.clone())
}
