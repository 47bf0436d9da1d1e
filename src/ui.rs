//! Output sink shared by every command
//!
//! Commands never write to stdout/stderr directly. They report through a
//! [`Ui`], which the binary wires to the terminal and tests wire to a
//! [`MemoryUi`]. Formatting of the messages themselves is left to the caller.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Prefix applied to output and info lines in machine-readable mode
pub const OUTPUT_PREFIX: &str = "o:";

/// Prefix applied to error lines in machine-readable mode
pub const ERROR_PREFIX: &str = "e:";

pub trait Ui: Send + Sync {
    /// Primary command output (inventories, listings)
    fn output(&self, message: &str);

    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}

type SharedWriter = Mutex<Box<dyn Write + Send>>;

/// Writes output, info and warnings to one writer and errors to another
pub struct BasicUi {
    writer: SharedWriter,
    error_writer: SharedWriter,
}

impl BasicUi {
    pub fn new(writer: Box<dyn Write + Send>, error_writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            error_writer: Mutex::new(error_writer),
        }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    fn write_line(target: &SharedWriter, message: &str) {
        // A poisoned lock or a closed pipe leaves nowhere to report to.
        if let Ok(mut w) = target.lock() {
            let _ = writeln!(w, "{}", message);
            let _ = w.flush();
        }
    }
}

impl Ui for BasicUi {
    fn output(&self, message: &str) {
        Self::write_line(&self.writer, message);
    }

    fn info(&self, message: &str) {
        Self::write_line(&self.writer, message);
    }

    fn warn(&self, message: &str) {
        Self::write_line(&self.writer, message);
    }

    fn error(&self, message: &str) {
        Self::write_line(&self.error_writer, message);
    }
}

/// Prefixes every line so a wrapping process can tell streams apart
pub struct PrefixedUi {
    inner: Arc<dyn Ui>,
    output_prefix: String,
    error_prefix: String,
}

impl PrefixedUi {
    pub fn new(inner: Arc<dyn Ui>) -> Self {
        Self {
            inner,
            output_prefix: OUTPUT_PREFIX.to_string(),
            error_prefix: ERROR_PREFIX.to_string(),
        }
    }

    fn prefixed(prefix: &str, message: &str) -> String {
        if message.is_empty() {
            return prefix.to_string();
        }
        message
            .lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Ui for PrefixedUi {
    fn output(&self, message: &str) {
        self.inner.output(&Self::prefixed(&self.output_prefix, message));
    }

    fn info(&self, message: &str) {
        self.inner.info(&Self::prefixed(&self.output_prefix, message));
    }

    fn warn(&self, message: &str) {
        self.inner.warn(&Self::prefixed(&self.output_prefix, message));
    }

    fn error(&self, message: &str) {
        self.inner.error(&Self::prefixed(&self.error_prefix, message));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLevel {
    Output,
    Info,
    Warn,
    Error,
}

/// Captures every line in memory
#[derive(Default)]
pub struct MemoryUi {
    lines: Mutex<Vec<(UiLevel, String)>>,
}

impl MemoryUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(UiLevel, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn messages(&self, level: UiLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// Every captured line joined with newlines, regardless of level
    pub fn text(&self) -> String {
        self.lines()
            .into_iter()
            .map(|(_, m)| m)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&self, level: UiLevel, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, message.to_string()));
        }
    }
}

impl Ui for MemoryUi {
    fn output(&self, message: &str) {
        self.push(UiLevel::Output, message);
    }

    fn info(&self, message: &str) {
        self.push(UiLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(UiLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(UiLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_basic_ui_splits_streams() {
        let out = Buffer::default();
        let err = Buffer::default();
        let ui = BasicUi::new(Box::new(out.clone()), Box::new(err.clone()));

        ui.info("building");
        ui.error("failed");

        assert_eq!(out.contents(), "building\n");
        assert_eq!(err.contents(), "failed\n");
    }

    #[test]
    fn test_prefixed_ui() {
        let memory = Arc::new(MemoryUi::new());
        let ui = PrefixedUi::new(memory.clone());

        ui.info("hello");
        ui.error("boom");
        ui.output("line one\nline two");

        assert_eq!(memory.messages(UiLevel::Info), vec!["o:hello"]);
        assert_eq!(memory.messages(UiLevel::Error), vec!["e:boom"]);
        assert_eq!(
            memory.messages(UiLevel::Output),
            vec!["o:line one\no:line two"]
        );
    }

    #[test]
    fn test_prefixed_ui_empty_message() {
        let memory = Arc::new(MemoryUi::new());
        let ui = PrefixedUi::new(memory.clone());

        ui.output("");
        ui.error("");

        assert_eq!(memory.messages(UiLevel::Output), vec!["o:"]);
        assert_eq!(memory.messages(UiLevel::Error), vec!["e:"]);
    }

    #[test]
    fn test_memory_ui_text() {
        let ui = MemoryUi::new();
        ui.info("a");
        ui.warn("b");
        assert_eq!(ui.text(), "a\nb");
        assert_eq!(ui.lines().len(), 2);
    }
}
