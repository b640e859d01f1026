//! Output sinks.
//!
//! A sink is the one blocking collaborator the core touches: a single opaque
//! write call, no timeout, no retry. Sinks that are shared across threads are
//! responsible for their own write serialization.

use std::io::{self, Write};

use parking_lot::Mutex;

/// Write capability consumed by handlers.
pub trait Sink: Send + Sync {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()>;
}

/// Sink over process stdout.
///
/// Each fragment takes the stdout lock independently; interleaving between
/// concurrent emit calls is possible and accepted, matching stdout semantics.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(bytes)
    }
}

/// In-memory sink, serialized internally.
///
/// Used by tests and benchmarks to capture rendered lines exactly.
#[derive(Debug, Default)]
pub struct BufferSink {
    buf: Mutex<Vec<u8>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8 (lossy on invalid bytes).
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

impl Sink for BufferSink {
    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        self.buf.lock().extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_accumulates() {
        let sink = BufferSink::new();
        sink.write_all(b"one ").unwrap();
        sink.write_all(b"two").unwrap();
        assert_eq!(sink.contents(), "one two");

        sink.clear();
        assert_eq!(sink.contents(), "");
    }
}
