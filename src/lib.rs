//! Spanlog - trace-correlated structured logging facade
//!
//! This crate provides a minimal structured-logging front end that
//! opportunistically correlates log records with an active distributed-trace
//! span. Call sites never know about tracing: whether `trace_id`/`span_id`
//! appear in the output is entirely a property of which handler was
//! installed, and absence of a trace is a silent omission, never an error.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `attrs` - Attribute descriptors, opaque values, and the merged set
//! - `handler` - Record handlers (plain text and trace-correlating) and sinks
//! - `logger` - Logger values, levels, records, and execution-context binding
//! - `semconv` - Semantic-convention attribute helpers
//!
//! ## Usage
//!
//! Bind a logger to an execution context once, high in a call chain; every
//! descendant retrieves it with [`from_context`] and emits through it. If a
//! span is active in the descendant's context, emitted lines carry its
//! identifiers:
//!
//! ```
//! use std::sync::Arc;
//! use opentelemetry::Context;
//! use spanlog::{from_context, with_logger, Attr, BufferSink, Level, Logger, OtelHandler};
//!
//! let sink = Arc::new(BufferSink::new());
//! let logger = Logger::new(Arc::new(OtelHandler::new(sink.clone())));
//! let cx = with_logger(&Context::new(), &logger);
//!
//! from_context(&cx).log_attrs(Level::Info, "start", &[Attr::new("n", 1)]);
//! assert_eq!(sink.contents(), "start n=1\n");
//! ```

pub mod attrs;
pub mod handler;
pub mod logger;
pub mod semconv;

pub use attrs::{Attr, AttributeSet, Value};
pub use handler::{
    BufferSink, EmitError, Handler, HandlerOptions, OtelHandler, Sink, StdoutSink, TextHandler,
    TraceResolution,
};
pub use logger::{default_logger, from_context, with_logger, Level, Logger, Record};
