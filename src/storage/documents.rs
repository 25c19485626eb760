// src/storage/documents.rs

//! Download cache for gazette PDFs.

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::Result;
use crate::utils::http::Fetch;

/// Filesystem cache of downloaded gazette documents.
///
/// Filenames are keyed by a hash of the source URL, so distinct URLs that
/// happen to share a basename cannot overwrite each other.
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Delete the cache directory and everything in it.
    ///
    /// Failures are logged, never raised; the run proceeds either way.
    pub async fn clear(&self) {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => log::info!("Cleared download directory {:?}", self.dir),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => log::warn!(
                "Could not clear download directory {:?}: {}",
                self.dir,
                error
            ),
        }
    }

    /// Path a URL's document is stored under.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(file_name_for(url))
    }

    /// Download a document unless it is already cached, returning its path.
    pub async fn ensure_downloaded(&self, fetcher: &dyn Fetch, url: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = file_name_for(url);
        let path = self.dir.join(&name);
        if path.exists() {
            log::info!("Already downloaded: {}", name);
            return Ok(path);
        }

        let bytes = fetcher.get_bytes(url).await?;
        tokio::fs::write(&path, &bytes).await?;
        log::info!("Downloaded {} as {}", url, name);
        Ok(path)
    }
}

/// Deterministic local filename for a document URL.
///
/// `{stem}-{hash8}.{ext}`, where `hash8` is the first 8 hex chars of the
/// Sha256 of the full URL string. A URL without a usable basename falls back
/// to `gazette-{hash8}.pdf`.
pub fn file_name_for(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let hash8 = hex::encode(&digest[..4]);

    let basename = Url::parse(url)
        .ok()
        .map(|u| {
            u.path()
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or("")
                .to_string()
        })
        .unwrap_or_default();

    if basename.is_empty() {
        return format!("gazette-{}.pdf", hash8);
    }
    match basename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}-{}.{}", stem, hash8, ext),
        _ => format!("{}-{}", basename, hash8),
    }
}
