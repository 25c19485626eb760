// src/storage/state.rs

//! Persisted set of already-processed gazette URLs.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// URLs that have already been through the pipeline.
///
/// Serialized as `{"seen": [...]}` pretty-printed JSON; the `BTreeSet` keeps
/// the persisted list sorted and duplicate-free. Successes and failures are
/// recorded alike, so a document that failed once is not retried on later
/// runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeenState {
    #[serde(default)]
    seen: BTreeSet<String>,
}

impl SeenState {
    /// Load state from disk.
    ///
    /// A missing file yields an empty state silently; an unreadable or
    /// corrupt file is logged and also yields an empty state, so a damaged
    /// state file degrades to re-notifying rather than crashing the run.
    pub async fn load(path: &Path) -> Self {
        match tokio::fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(state) => state,
                Err(error) => {
                    log::error!("Could not parse state file {:?}: {}", path, error);
                    Self::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(error) => {
                log::error!("Could not read state file {:?}: {}", path, error);
                Self::default()
            }
        }
    }

    /// Write state atomically (write to temp, then rename).
    pub async fn save(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Whether a URL has been processed before.
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Record a URL as processed.
    pub fn mark_seen(&mut self, url: impl Into<String>) {
        self.seen.insert(url.into());
    }

    /// Number of recorded URLs.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True when no URLs are recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let state = SeenState::load(&tmp.path().join("nope.json")).await;
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen_urls.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let state = SeenState::load(&path).await;
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen_urls.json");

        let mut state = SeenState::default();
        state.mark_seen("https://example.com/b.pdf");
        state.mark_seen("https://example.com/a.pdf");
        state.mark_seen("https://example.com/a.pdf");
        state.save(&path).await.unwrap();

        let loaded = SeenState::load(&path).await;
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("https://example.com/a.pdf"));
        assert!(loaded.contains("https://example.com/b.pdf"));
    }

    #[tokio::test]
    async fn test_persisted_form_is_sorted_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen_urls.json");

        let mut state = SeenState::default();
        state.mark_seen("https://example.com/c.pdf");
        state.mark_seen("https://example.com/a.pdf");
        state.save(&path).await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(text.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value["seen"],
            serde_json::json!(["https://example.com/a.pdf", "https://example.com/c.pdf"])
        );
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep/state/seen_urls.json");

        let mut state = SeenState::default();
        state.mark_seen("https://example.com/a.pdf");
        state.save(&path).await.unwrap();

        assert!(path.exists());
    }
}
