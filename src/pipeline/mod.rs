//! Pipeline entry point for watch runs.
//!
//! - `run_watch`: Discover, download, scan and report new gazette PDFs

pub mod watch;

pub use watch::{WatchReport, run_watch};
