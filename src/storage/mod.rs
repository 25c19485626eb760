//! Persistence for the watcher.
//!
//! Two pieces of state survive between runs:
//! - `seen_urls.json` - the set of URLs already processed (`SeenState`)
//! - `downloads/` - the per-run cache of fetched PDFs (`DocumentStore`)
//!
//! The download cache is disposable and cleared at the start of every run;
//! the seen set is the durable record that keeps runs idempotent.

pub mod documents;
pub mod state;

// Re-export for convenience
pub use documents::{DocumentStore, file_name_for};
pub use state::SeenState;
