//! Loggers, levels, and records.
//!
//! A `Logger` is a thin immutable value over a handler. Emitting builds one
//! `Record` and hands it to the handler synchronously; nothing is buffered or
//! retained. The process-wide default logger writes trace-correlated text to
//! stdout.

pub mod context;

pub use context::{from_context, with_logger};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use opentelemetry::Context;

use crate::attrs::Attr;
use crate::handler::{EmitError, Handler, OtelHandler, StdoutSink};

/// Severity of a log record.
///
/// The numeric value is significant only for ordering and filtering by a
/// collaborator; the core performs no level-based filtering itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Error = 10,
    Warn = 20,
    Info = 30,
    Debug = 31,
}

impl Level {
    pub fn severity(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable unit of log data, created per emit call and consumed by
/// exactly one handler invocation.
#[derive(Clone)]
pub struct Record {
    time: DateTime<Utc>,
    level: Level,
    message: String,
    attrs: Vec<Attr>,
    context: Option<Context>,
}

impl Record {
    pub fn new(
        time: DateTime<Utc>,
        level: Level,
        message: impl Into<String>,
        attrs: Vec<Attr>,
        context: Option<Context>,
    ) -> Self {
        Self {
            time,
            level,
            message: message.into(),
            attrs,
            context,
        }
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Call-site attributes, in call order.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// The execution context this record's logger was retrieved from, if any.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }
}

/// Immutable logging front end over a [`Handler`].
///
/// Cheap to clone; safe to share across threads without synchronization.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    context: Option<Context>,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self {
            handler,
            context: None,
        }
    }

    pub(crate) fn bound_to(handler: Arc<dyn Handler>, cx: Context) -> Self {
        Self {
            handler,
            context: Some(cx),
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Attribute-bound clone. The receiver is untouched.
    pub fn with_attrs(&self, attrs: &[Attr]) -> Logger {
        Logger {
            handler: self.handler.with_attrs(attrs),
            context: self.context.clone(),
        }
    }

    /// Emit one record, fire-and-forget.
    ///
    /// A sink write failure is not raised to the caller; it is reported
    /// through the `log` facade so a collaborator watching for persistent
    /// sink breakage can react. Use [`Logger::try_log_attrs`] to observe the
    /// error directly.
    pub fn log_attrs(&self, level: Level, message: &str, attrs: &[Attr]) {
        if let Err(err) = self.try_log_attrs(level, message, attrs) {
            log::warn!("LOG_EMIT_FAILED level={} error={}", level, err);
        }
    }

    /// Checked emit: same record construction as [`Logger::log_attrs`], but
    /// the handler's write error is returned.
    pub fn try_log_attrs(
        &self,
        level: Level,
        message: &str,
        attrs: &[Attr],
    ) -> Result<(), EmitError> {
        let record = Record::new(
            Utc::now(),
            level,
            message,
            attrs.to_vec(),
            self.context.clone(),
        );
        self.handler.handle(&record)
    }
}

lazy_static! {
    static ref DEFAULT_LOGGER: Logger =
        Logger::new(Arc::new(OtelHandler::new(Arc::new(StdoutSink))));
}

/// The process-wide fallback logger: trace-correlated text on stdout.
/// Constructed once, never mutated; only ever read or cloned via
/// [`Logger::with_attrs`].
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{BufferSink, Sink, TextHandler};
    use std::io;

    #[test]
    fn test_level_ordering_follows_severity() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert_eq!(Level::Error.severity(), 10);
        assert_eq!(Level::Debug.severity(), 31);
    }

    #[test]
    fn test_with_attrs_produces_independent_loggers() {
        let sink = Arc::new(BufferSink::new());
        let base = Logger::new(Arc::new(TextHandler::new(sink.clone())));

        let a = base.with_attrs(&[Attr::new("who", "a")]);
        let b = base.with_attrs(&[Attr::new("who", "b")]);

        a.log_attrs(Level::Info, "from_a", &[]);
        let line_a = sink.contents();
        sink.clear();
        b.log_attrs(Level::Info, "from_b", &[]);
        let line_b = sink.contents();

        assert_eq!(line_a, "from_a who=a\n");
        assert_eq!(line_b, "from_b who=b\n");
    }

    #[test]
    fn test_sibling_calls_do_not_leak_attrs() {
        let sink = Arc::new(BufferSink::new());
        let logger = Logger::new(Arc::new(TextHandler::new(sink.clone())));

        logger.log_attrs(Level::Info, "first", &[Attr::new("iter", 1)]);
        logger.log_attrs(Level::Info, "second", &[Attr::new("iter", 2)]);

        let contents = sink.contents();
        let lines: Vec<&str> = contents.lines().map(str::trim_end).collect();
        assert_eq!(lines, vec!["first iter=1", "second iter=2"]);
        assert_eq!(lines[0].matches("iter=").count(), 1);
        assert_eq!(lines[1].matches("iter=").count(), 1);
    }

    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write_all(&self, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_try_log_attrs_surfaces_sink_failure() {
        let logger = Logger::new(Arc::new(TextHandler::new(Arc::new(BrokenSink))));

        let result = logger.try_log_attrs(Level::Error, "msg", &[]);
        assert!(matches!(result, Err(EmitError::Io(_))));
    }

    #[test]
    fn test_log_attrs_swallows_sink_failure() {
        let logger = Logger::new(Arc::new(TextHandler::new(Arc::new(BrokenSink))));

        // Must not panic or propagate; degraded logging is not fatal.
        logger.log_attrs(Level::Error, "msg", &[]);
    }

    #[test]
    fn test_default_logger_is_stable() {
        let first = default_logger();
        let second = default_logger();
        assert!(Arc::ptr_eq(first.handler(), second.handler()));
    }
}
