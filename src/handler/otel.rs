//! Trace-correlating handler.
//!
//! Decorates the plain-text renderer: when a valid span identity can be
//! resolved, the line gains a `trace_id=... span_id=...` segment right after
//! the message. No trace in scope means plain-text output, silently.

use std::sync::Arc;

use opentelemetry::trace::{SpanContext, TraceContextExt};
use opentelemetry::Context;

use crate::attrs::Attr;
use crate::handler::{EmitError, Handler, HandlerOptions, Sink, TextHandler};
use crate::logger::Record;

/// When the handler resolves span identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceResolution {
    /// Against the execution context carried by each record, at handle time.
    /// A logger bound high in a call chain picks up spans started below it.
    PerRecord,
    /// Pinned to the span identity captured the last time the handler was
    /// refreshed against a context (see [`Handler::refreshed`]).
    AtLookup,
}

/// Handler that adds span correlation on top of [`TextHandler`] rendering.
#[derive(Clone)]
pub struct OtelHandler {
    text: TextHandler,
    resolution: TraceResolution,
    captured: Option<SpanContext>,
}

impl OtelHandler {
    /// Handler resolving span identity per record.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self::with_resolution(sink, TraceResolution::PerRecord)
    }

    pub fn with_resolution(sink: Arc<dyn Sink>, resolution: TraceResolution) -> Self {
        Self::with_options(sink, resolution, HandlerOptions::default())
    }

    pub fn with_options(
        sink: Arc<dyn Sink>,
        resolution: TraceResolution,
        options: HandlerOptions,
    ) -> Self {
        Self {
            text: TextHandler::with_options(sink, options),
            resolution,
            captured: None,
        }
    }

    pub fn resolution(&self) -> TraceResolution {
        self.resolution
    }
}

impl Handler for OtelHandler {
    fn handle(&self, record: &Record) -> Result<(), EmitError> {
        let resolved;
        let span = match self.resolution {
            TraceResolution::AtLookup => self.captured.as_ref(),
            TraceResolution::PerRecord => {
                resolved = record
                    .context()
                    .map(|cx| cx.span().span_context().clone());
                resolved.as_ref()
            }
        };
        self.text.render(record, span)
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        // Derivation preserves the resolution mode and any pinned identity.
        Arc::new(OtelHandler {
            text: self.text.merged_with(attrs),
            resolution: self.resolution,
            captured: self.captured.clone(),
        })
    }

    fn refreshed(&self, cx: &Context) -> Option<Arc<dyn Handler>> {
        if self.resolution != TraceResolution::AtLookup {
            return None;
        }
        let span_context = cx.span().span_context().clone();
        if !span_context.is_valid() {
            return None;
        }
        Some(Arc::new(OtelHandler {
            text: self.text.clone(),
            resolution: self.resolution,
            captured: Some(span_context),
        }))
    }
}
