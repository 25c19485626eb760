// src/utils/logging.rs

//! Run log written to both stdout and the configured log file.
//!
//! Backs the `log` facade with the line format
//! `YYYY-MM-DD HH:MM:SS - LEVEL - message`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

struct TeeLogger {
    /// Append-mode log file; `None` when it could not be opened.
    file: Option<Mutex<File>>,
}

fn format_line(level: Level, message: &str) -> String {
    format!(
        "{} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        message
    )
}

impl log::Log for TeeLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format_line(record.level(), &record.args().to_string());
        println!("{}", line);
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the tee logger.
///
/// Falls back to stdout-only logging when the log file cannot be opened.
/// Calling this more than once leaves the first logger in place.
pub fn init(log_file: &Path, verbose: bool) {
    let file = match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => Some(Mutex::new(file)),
        Err(error) => {
            eprintln!("Could not open log file {:?}: {}", log_file, error);
            None
        }
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if log::set_boxed_logger(Box::new(TeeLogger { file })).is_ok() {
        log::set_max_level(level);
    }
}
