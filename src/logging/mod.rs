//! Structured JSON-lines logging for generator construction diagnostics.
//!
//! The per-item style path is pure and hot, so it never logs; only generator
//! construction emits events, one per breakpoint tier with pattern data.

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::breakpoints::TierName;
use crate::pattern::Mirror;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// What happened, with its payload. Serialized flattened into the event
/// line under an `event` tag.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// One breakpoint tier's pattern was parsed and its column count fixed.
    TierResolved {
        tier: TierName,
        rows: usize,
        items_per_cycle: usize,
        columns: u32,
        mirror: Mirror,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, kind: EventKind) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            kind,
        }
    }

    pub fn tier_resolved(
        target: &str,
        tier: impl Into<TierName>,
        rows: usize,
        items_per_cycle: usize,
        columns: u32,
        mirror: Mirror,
    ) -> Self {
        Self::new(
            LogLevel::Debug,
            target,
            EventKind::TierResolved {
                tier: tier.into(),
                rows,
                items_per_cycle,
                columns,
                mirror,
            },
        )
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Cheap-to-clone handle over a shared sink.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        self.sink.log(&event)
    }
}

/// Appends JSON lines to a file, restarting the file once it would grow past
/// `max_bytes`. Zero disables rotation.
pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(true)
            .open(&path)?;
        Ok(Self {
            path,
            max_bytes,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut writer = self.writer.lock().expect("log sink mutex poisoned");
        if self.max_bytes > 0 {
            let current = writer.get_ref().metadata()?.len();
            if current + line.len() as u64 > self.max_bytes {
                let fresh = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&self.path)?;
                *writer = BufWriter::new(fresh);
            }
        }
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}
