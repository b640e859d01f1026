//! Record handlers.
//!
//! A handler is the pluggable sink behind a `Logger`: it accepts one
//! fully-formed record per emit call and writes a rendering of it. Whether
//! trace identifiers appear in the output is entirely a property of which
//! handler was installed; the emit call site never knows about tracing.

pub mod otel;
pub mod sink;
pub mod text;

pub use otel::{OtelHandler, TraceResolution};
pub use sink::{BufferSink, Sink, StdoutSink};
pub use text::TextHandler;

use std::sync::Arc;

use opentelemetry::Context;
use thiserror::Error;

use crate::attrs::Attr;
use crate::logger::Record;

/// The only error kind the core produces. Absent or malformed trace context
/// is a recognized empty case, never an error.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Attribute rewrite hook applied before rendering; returning `None` omits
/// the attribute from the output.
pub type ReplaceAttr = Arc<dyn Fn(Attr) -> Option<Attr> + Send + Sync>;

/// Optional handler behavior.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Called on each bound and record attribute before it is written.
    pub replace_attr: Option<ReplaceAttr>,
}

/// Capability contract shared by all handler variants.
///
/// Handlers are immutable; `with_attrs` derives a new handler sharing the
/// same sink, and `refreshed` lets a context-sensitive handler re-resolve
/// its trace identity against the context a lookup is happening in.
pub trait Handler: Send + Sync {
    /// Process one record. Returns the first sink write error encountered.
    fn handle(&self, record: &Record) -> Result<(), EmitError>;

    /// Derive a handler whose bound attributes are this handler's merged
    /// with `attrs` (later attributes win on key collision).
    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler>;

    /// Re-resolve trace identity against `cx`. Handlers with nothing to
    /// re-resolve return `None` and are used as-is.
    fn refreshed(&self, cx: &Context) -> Option<Arc<dyn Handler>> {
        let _ = cx;
        None
    }
}
