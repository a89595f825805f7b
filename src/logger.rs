//! File-backed backend for the `log` facade.
//!
//! The stdio transport owns stdout, and stderr is forwarded to the MCP
//! client as out-of-band diagnostics. Records therefore append to a log
//! file; error records are additionally mirrored to stderr. One line per
//! record, no rotation, no buffering beyond the OS.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct FileLogger {
    file: Mutex<File>,
}

impl FileLogger {
    /// Open `path` for appending and install the logger globally at `Info`.
    pub fn init(path: &Path) -> io::Result<()> {
        let logger = FileLogger::open(path)?;
        log::set_boxed_logger(Box::new(logger))
            .map_err(|err| io::Error::new(io::ErrorKind::AlreadyExists, err.to_string()))?;
        log::set_max_level(LevelFilter::Info);
        Ok(())
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    fn write_record(&self, record: &Record) {
        let line = format_line(record.level(), &record.args().to_string());
        if let Ok(mut file) = self.file.lock() {
            // Nowhere sensible to report a failed append.
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if record.level() == Level::Error {
            eprint!("{}", line);
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_record(record);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_line(level: Level, message: &str) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("[{}] [{}] {}\n", timestamp, level_tag(level), message)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
