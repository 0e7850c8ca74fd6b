//! Leveled logging with pluggable sinks.
//!
//! The engine only talks to [`Logger`]. Where records end up (terminal, file,
//! memory, nowhere) is decided by the sinks it fans out to. Sinks swallow their
//! own failures so logging can never fail a scan or a clean.

use chrono::Local;
use colored::Colorize;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
    Time,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warning => "WARN",
            Level::Error => "ERROR",
            Level::Time => "TIME",
        }
    }

    /// Warnings and errors, the levels that report something going wrong.
    pub fn is_problem(&self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }

    fn icon(&self) -> &'static str {
        match self {
            Level::Info => "💡",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
            Level::Time => "⏳",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log event: severity, message and optional key/value fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl Record {
    /// Message followed by `key=value` pairs, without any styling.
    pub fn plain(&self) -> String {
        let mut line = self.message.clone();
        for (key, value) in &self.fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }
}

/// Destination for log records.
pub trait LogSink: Send + Sync {
    fn write(&self, record: &Record);
}

/// Colored terminal output. Warnings and errors go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    problems_only: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only warnings and errors; stdout stays untouched.
    pub fn problems_only() -> Self {
        Self {
            problems_only: true,
        }
    }

    pub fn accepts(&self, level: Level) -> bool {
        !self.problems_only || level.is_problem()
    }
}

impl LogSink for ConsoleSink {
    fn write(&self, record: &Record) {
        if !self.accepts(record.level) {
            return;
        }
        let text = record.plain();
        let styled = match record.level {
            Level::Info => text.normal(),
            Level::Success | Level::Time => text.green(),
            Level::Warning => text.yellow(),
            Level::Error => text.red(),
        };
        match record.level {
            level if level.is_problem() => eprintln!("{} {}", record.level.icon(), styled),
            _ => println!("{} {}", record.level.icon(), styled),
        }
    }
}

/// Appends timestamped plain-text lines to a file.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) a log file in append mode.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, record: &Record) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        // Write failures are ignored
        let _ = writeln!(writer, "{} [{}] {}", timestamp, record.level, record.plain());
        let _ = writer.flush();
    }
}

/// Keeps every record in memory. Useful for inspecting what the engine reported.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records().iter().filter(|r| r.level == level).count()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _record: &Record) {}
}

/// Fan-out logger handed to the scanner and the cleaner.
#[derive(Clone, Default)]
pub struct Logger {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl Logger {
    /// Logger without any sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger writing to the terminal only.
    pub fn console() -> Self {
        Self::new().with_sink(Arc::new(ConsoleSink::new()))
    }

    /// Terminal logger that only reports warnings and errors, on stderr.
    pub fn console_problems() -> Self {
        Self::new().with_sink(Arc::new(ConsoleSink::problems_only()))
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn add_sink(&mut self, sink: Arc<dyn LogSink>) {
        self.sinks.push(sink);
    }

    pub fn log(&self, level: Level, message: impl Into<String>, fields: &[(&'static str, String)]) {
        let record = Record {
            level,
            message: message.into(),
            fields: fields.to_vec(),
        };
        for sink in &self.sinks {
            sink.write(&record);
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message, &[]);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(Level::Success, message, &[]);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message, &[]);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message, &[]);
    }

    pub fn time(&self, message: impl Into<String>) {
        self.log(Level::Time, message, &[]);
    }

    pub fn info_with(&self, message: impl Into<String>, fields: &[(&'static str, String)]) {
        self.log(Level::Info, message, fields);
    }

    pub fn warning_with(&self, message: impl Into<String>, fields: &[(&'static str, String)]) {
        self.log(Level::Warning, message, fields);
    }

    pub fn error_with(&self, message: impl Into<String>, fields: &[(&'static str, String)]) {
        self.log(Level::Error, message, fields);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
