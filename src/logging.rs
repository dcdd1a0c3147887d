//! Logging collaborator injected into the layout engine and the driver loop
//!
//! Components never reach for a global logger; they hold an
//! `Rc<dyn Logger>` handed to them at construction. Two implementations are
//! provided:
//! - [`TracingLogger`]: forwards everything to [`tracing`] with structured fields
//! - [`MemoryLogger`]: keeps a bounded history for the log pane (and for tests)
//!   and forwards to [`tracing`] as well
//!
//! Because the TUI owns the terminal, [`init_tracing`] sends subscriber output
//! to a file.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Logging and observability sink
pub trait Logger {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn warning(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }

    /// Duration of a measured operation
    fn performance(&self, operation: &str, duration: Duration) {
        self.debug(&performance_line(operation, duration));
    }

    /// Whether the layout cache was reused, and how many entries it holds
    fn cache_status(&self, hit: bool, size: usize) {
        self.debug(&cache_line(hit, size));
    }

    fn layout_update(&self, node_count: usize, modified_count: usize) {
        self.debug(&layout_line(node_count, modified_count));
    }
}

fn performance_line(operation: &str, duration: Duration) -> String {
    format!(
        "performance: {} took {:.3} ms",
        operation,
        duration.as_secs_f64() * 1000.0
    )
}

fn cache_line(hit: bool, size: usize) -> String {
    format!(
        "layout cache {} ({} entries)",
        if hit { "hit" } else { "miss" },
        size
    )
}

fn layout_line(node_count: usize, modified_count: usize) -> String {
    format!("layout updated: {} nodes, {} modified", node_count, modified_count)
}

fn emit(level: Level, message: &str) {
    match level {
        Level::ERROR => tracing::error!("{}", message),
        Level::WARN => tracing::warn!("{}", message),
        Level::INFO => tracing::info!("{}", message),
        Level::DEBUG => tracing::debug!("{}", message),
        _ => tracing::trace!("{}", message),
    }
}

/// Forwards to the installed `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        emit(level, message);
    }

    fn performance(&self, operation: &str, duration: Duration) {
        tracing::debug!(
            operation,
            duration_us = duration.as_micros() as u64,
            "performance"
        );
    }

    fn cache_status(&self, hit: bool, size: usize) {
        tracing::debug!(hit, size, "layout cache");
    }

    fn layout_update(&self, node_count: usize, modified_count: usize) {
        tracing::debug!(node_count, modified_count, "layout updated");
    }
}

/// A single entry in the in-memory log
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    /// Time since the logger was created
    pub elapsed: Duration,
}

impl LogRecord {
    /// Format as `[  1.234s] LEVEL message`
    pub fn to_line(&self) -> String {
        format!(
            "[{:>8.3}s] {:<5} {}",
            self.elapsed.as_secs_f64(),
            self.level.as_str(),
            self.message
        )
    }
}

/// Bounded in-memory log history in front of a [`TracingLogger`]
#[derive(Debug)]
pub struct MemoryLogger {
    sink: TracingLogger,
    records: RefCell<VecDeque<LogRecord>>,
    capacity: usize,
    /// Most verbose level kept in the history
    min_level: Level,
    started: Instant,
}

impl MemoryLogger {
    pub fn new(capacity: usize) -> Self {
        MemoryLogger {
            sink: TracingLogger,
            records: RefCell::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
            min_level: Level::TRACE,
            started: Instant::now(),
        }
    }

    /// Keep only records at `level` or more severe (everything still reaches `tracing`)
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().iter().cloned().collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.borrow().iter().map(LogRecord::to_line).collect()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Whether any record at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    fn record(&self, level: Level, message: &str) {
        if level > self.min_level {
            return;
        }

        let mut records = self.records.borrow_mut();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(LogRecord {
            level,
            message: message.to_string(),
            elapsed: self.started.elapsed(),
        });
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.sink.log(level, message);
        self.record(level, message);
    }

    fn performance(&self, operation: &str, duration: Duration) {
        self.sink.performance(operation, duration);
        self.record(Level::DEBUG, &performance_line(operation, duration));
    }

    fn cache_status(&self, hit: bool, size: usize) {
        self.sink.cache_status(hit, size);
        self.record(Level::DEBUG, &cache_line(hit, size));
    }

    fn layout_update(&self, node_count: usize, modified_count: usize) {
        self.sink.layout_update(node_count, modified_count);
        self.record(Level::DEBUG, &layout_line(node_count, modified_count));
    }
}

/// Install a file-backed `tracing` subscriber honoring `RUST_LOG` (default `info`)
pub fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_tracing_logger_emits_structured_fields() {
        let output = capture(|| {
            let logger = TracingLogger;
            logger.cache_status(false, 3);
            logger.layout_update(5, 1);
            logger.performance("layout", Duration::from_micros(250));
            logger.warning("drift");
        });
        assert!(output.contains("layout cache hit=false size=3"), "{}", output);
        assert!(output.contains("layout updated node_count=5 modified_count=1"));
        assert!(output.contains("performance operation=\"layout\" duration_us=250"));
        assert!(output.contains("WARN") && output.contains("drift"));
    }

    #[test]
    fn test_memory_logger_forwards_to_tracing() {
        let logger = MemoryLogger::new(10).with_min_level(Level::INFO);
        let output = capture(|| {
            logger.cache_status(true, 4);
            logger.info("ready");
        });
        assert!(output.contains("layout cache hit=true size=4"), "{}", output);
        assert!(output.contains("ready"));
        // history keeps only INFO and above
        assert_eq!(logger.lines().len(), 1);
        assert!(logger.contains(Level::INFO, "ready"));
    }

    #[test]
    fn test_memory_logger_is_bounded() {
        let logger = MemoryLogger::new(3);
        for i in 0..5 {
            logger.info(&format!("entry {}", i));
        }
        let records = logger.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].message, "entry 2");
        assert_eq!(records[2].message, "entry 4");
    }

    #[test]
    fn test_structured_calls_are_recorded() {
        let logger = MemoryLogger::new(10);
        logger.cache_status(true, 4);
        logger.layout_update(7, 2);
        logger.warning("drift");

        assert!(logger.contains(Level::DEBUG, "layout cache hit (4 entries)"));
        assert!(logger.contains(Level::DEBUG, "7 nodes, 2 modified"));
        assert!(logger.contains(Level::WARN, "drift"));
        assert!(!logger.contains(Level::ERROR, "drift"));
    }

    #[test]
    fn test_min_level_filters_history() {
        let logger = MemoryLogger::new(10).with_min_level(Level::INFO);
        logger.debug("noise");
        logger.info("kept");
        logger.error("also kept");
        assert_eq!(logger.len(), 2);
        assert!(!logger.contains(Level::DEBUG, "noise"));
    }

    #[test]
    fn test_record_line_format() {
        let record = LogRecord {
            level: Level::INFO,
            message: "ready".to_string(),
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(record.to_line(), "[   1.500s] INFO  ready");
    }
}
