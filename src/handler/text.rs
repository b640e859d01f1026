//! Plain-text line rendering.
//!
//! One line per record: message, then bound attributes, then record
//! attributes, each as `" key=value"`, then a newline. No trace awareness;
//! the trace-correlating handler layers that on top of this renderer.

use std::io;
use std::sync::Arc;

use opentelemetry::trace::SpanContext;

use crate::attrs::{Attr, AttributeSet};
use crate::handler::{EmitError, Handler, HandlerOptions, Sink};
use crate::logger::Record;

/// Handler that renders records as plain text lines.
#[derive(Clone)]
pub struct TextHandler {
    sink: Arc<dyn Sink>,
    bound: AttributeSet,
    options: HandlerOptions,
}

impl TextHandler {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self::with_options(sink, HandlerOptions::default())
    }

    pub fn with_options(sink: Arc<dyn Sink>, options: HandlerOptions) -> Self {
        Self {
            sink,
            bound: AttributeSet::new(),
            options,
        }
    }

    /// Copy of this handler with `attrs` folded into the bound set. Shares
    /// the sink and options with the parent.
    pub(crate) fn merged_with(&self, attrs: &[Attr]) -> TextHandler {
        TextHandler {
            sink: Arc::clone(&self.sink),
            bound: self.bound.merged(attrs),
            options: self.options.clone(),
        }
    }

    fn write_fragment(&self, first_err: &mut Option<io::Error>, bytes: &[u8]) {
        if let Err(err) = self.sink.write_all(bytes) {
            if first_err.is_none() {
                *first_err = Some(err);
            }
        }
    }

    fn write_attr(&self, first_err: &mut Option<io::Error>, attr: Attr) {
        let attr = match &self.options.replace_attr {
            Some(replace) => match replace(attr) {
                Some(attr) => attr,
                None => return,
            },
            None => attr,
        };
        let fragment = format!(" {}={}", attr.key(), attr.value());
        self.write_fragment(first_err, fragment.as_bytes());
    }

    /// Render one line, optionally correlated with a span.
    ///
    /// Writes are best-effort: a failed fragment does not abort the rest of
    /// the line, but the first failure is the call's result. The span segment
    /// is written only when `span` is present and valid.
    pub(crate) fn render(
        &self,
        record: &Record,
        span: Option<&SpanContext>,
    ) -> Result<(), EmitError> {
        let mut first_err: Option<io::Error> = None;

        self.write_fragment(&mut first_err, record.message().as_bytes());

        if let Some(sc) = span.filter(|sc| sc.is_valid()) {
            let fragment = format!(" trace_id={} span_id={}", sc.trace_id(), sc.span_id());
            self.write_fragment(&mut first_err, fragment.as_bytes());
        }

        for (key, value) in self.bound.iter() {
            self.write_attr(&mut first_err, Attr::new(key, value.clone()));
        }
        for attr in record.attrs() {
            self.write_attr(&mut first_err, attr.clone());
        }
        self.write_fragment(&mut first_err, b"\n");

        match first_err {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

impl Handler for TextHandler {
    fn handle(&self, record: &Record) -> Result<(), EmitError> {
        self.render(record, None)
    }

    fn with_attrs(&self, attrs: &[Attr]) -> Arc<dyn Handler> {
        Arc::new(self.merged_with(attrs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::BufferSink;
    use crate::logger::Level;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn record(msg: &str, attrs: Vec<Attr>) -> Record {
        Record::new(Utc::now(), Level::Info, msg, attrs, None)
    }

    #[test]
    fn test_message_and_record_attrs_in_call_order() {
        let sink = Arc::new(BufferSink::new());
        let handler = TextHandler::new(sink.clone());

        handler
            .handle(&record(
                "hello",
                vec![Attr::new("b", 2), Attr::new("a", 1)],
            ))
            .unwrap();

        assert_eq!(sink.contents(), "hello b=2 a=1\n");
    }

    #[test]
    fn test_bound_attrs_precede_record_attrs() {
        let sink = Arc::new(BufferSink::new());
        let handler = TextHandler::new(sink.clone()).with_attrs(&[Attr::new("bound", "x")]);

        handler
            .handle(&record("msg", vec![Attr::new("call", "y")]))
            .unwrap();

        assert_eq!(sink.contents(), "msg bound=x call=y\n");
    }

    #[test]
    fn test_replace_attr_can_rewrite_and_omit() {
        let sink = Arc::new(BufferSink::new());
        let options = HandlerOptions {
            replace_attr: Some(Arc::new(|attr: Attr| {
                if attr.key() == "secret" {
                    None
                } else {
                    Some(Attr::new(attr.key().to_uppercase(), attr.value().clone()))
                }
            })),
        };
        let handler = TextHandler::with_options(sink.clone(), options);

        handler
            .handle(&record(
                "msg",
                vec![Attr::new("secret", "hunter2"), Attr::new("ok", 1)],
            ))
            .unwrap();

        assert_eq!(sink.contents(), "msg OK=1\n");
    }

    /// Sink that fails exactly once, on its first write.
    struct FlakySink {
        failed: AtomicBool,
        inner: BufferSink,
    }

    impl Sink for FlakySink {
        fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
            if !self.failed.swap(true, Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "first write"));
            }
            self.inner.write_all(bytes)
        }
    }

    #[test]
    fn test_write_failure_is_best_effort() {
        let sink = Arc::new(FlakySink {
            failed: AtomicBool::new(false),
            inner: BufferSink::new(),
        });
        let handler = TextHandler::new(sink.clone());

        let result = handler.handle(&record("lost", vec![Attr::new("kept", 1)]));

        // The message write failed, but the remaining fragments were still
        // attempted and the first error is surfaced once.
        assert!(matches!(result, Err(EmitError::Io(_))));
        assert_eq!(sink.inner.contents(), " kept=1\n");
    }
}
