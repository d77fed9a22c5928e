//! Log sinks writing `LEVEL: message` lines.

use std::io::Write;
use std::sync::{Arc, Mutex};

use nosg_core::{
    application::ports::LogSink,
    domain::{LogLevel, messages::format_line},
};

/// Writes every line to a `Write` implementation.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write_line(&self, level: LogLevel, message: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            // A closed pipe must not fail the operation being logged.
            let _ = writer.write_all(format_line(level, message).as_bytes());
            let _ = writer.flush();
        }
    }
}

/// Collects lines in memory. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, formatted.
    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .map(|lines| lines.concat())
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, level: LogLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format_line(level, message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_prefixes_each_line() {
        let sink = WriterSink::new(Vec::new());
        sink.log("one");
        sink.success("two");

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "LOG: one\nSUCCESS: two\n");
    }

    #[test]
    fn memory_sink_is_shared_between_clones() {
        let sink = MemorySink::new();
        let shared: Arc<dyn LogSink> = Arc::new(sink.clone());

        shared.warn("careful");

        assert_eq!(sink.contents(), "WARN: careful\n");
    }
}
