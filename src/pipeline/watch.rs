// src/pipeline/watch.rs

//! The watch run: discovery through notification, one linear pass.

use std::path::Path;

use crate::error::Result;
use crate::models::{Config, Finding};
use crate::services::mailer::Notify;
use crate::services::{TermMatcher, digest, discover_pdf_links, extract};
use crate::storage::{DocumentStore, SeenState, file_name_for};
use crate::utils::http::Fetch;

/// Per-run counters, returned to the CLI for the closing summary line.
#[derive(Debug, Default)]
pub struct WatchReport {
    /// PDF links present on the listing pages
    pub discovered: usize,

    /// Links not in the seen set at run start
    pub new_count: usize,

    /// Documents that failed downloading or extraction
    pub failures: usize,

    /// Documents with at least one term match
    pub findings: usize,

    /// Whether the digest was delivered; `None` when no digest was built
    pub digest_sent: Option<bool>,
}

/// Run the whole watch once.
///
/// Stages run strictly in sequence, one document at a time. A per-document
/// failure is contained and the document is marked seen regardless, so one
/// poison PDF can never wedge the watcher; only a total discovery failure
/// aborts the run, before any state is written.
pub async fn run_watch(
    config: &Config,
    fetcher: &dyn Fetch,
    notifier: &dyn Notify,
) -> Result<WatchReport> {
    let documents = DocumentStore::new(&config.paths.download_dir);
    documents.clear().await;

    log::info!("Starting gazette watch process.");
    let state_path = Path::new(&config.paths.state_file);
    let mut state = SeenState::load(state_path).await;
    let matcher = TermMatcher::new(&config.watch.search_terms)?;

    let pdf_urls = discover_pdf_links(fetcher, &config.watch.listing_urls).await?;

    let mut report = WatchReport {
        discovered: pdf_urls.len(),
        ..WatchReport::default()
    };

    let new_urls: Vec<&String> = pdf_urls
        .iter()
        .filter(|url| !state.contains(url.as_str()))
        .collect();
    report.new_count = new_urls.len();
    if new_urls.is_empty() {
        log::info!("No new gazette PDFs found.");
        return Ok(report);
    }

    log::info!("Found {} new gazette PDFs to process.", new_urls.len());
    let mut findings = Vec::new();

    for url in new_urls {
        log::info!("Processing new PDF: {}", url);
        match process_document(fetcher, &documents, &matcher, url).await {
            Ok(Some(finding)) => {
                log::info!(
                    "Found {} matches in {}.",
                    finding.match_count(),
                    finding.filename
                );
                findings.push(finding);
            }
            Ok(None) => {}
            Err(error) => {
                report.failures += 1;
                log::error!(
                    "An error occurred while processing {}: {}. Marking as seen to prevent retries.",
                    url,
                    error
                );
            }
        }
        state.mark_seen(url.as_str());
    }

    if let Err(error) = state.save(state_path).await {
        log::error!(
            "Failed to save state file {}: {}",
            config.paths.state_file,
            error
        );
    } else {
        log::info!("State saved to {}.", config.paths.state_file);
    }

    report.findings = findings.len();
    let Some(digest) = digest::build(&config.email.subject_prefix, &findings) else {
        log::info!("New gazettes found, but no term matches. No email sent.");
        return Ok(report);
    };

    let sent = notifier.send(&digest).await;
    if sent {
        log::info!("Successfully sent alert for {} gazette(s).", findings.len());
    } else {
        log::error!(
            "Alert for {} gazette(s) was generated but FAILED to send.",
            findings.len()
        );
    }
    report.digest_sent = Some(sent);

    Ok(report)
}

/// Download, extract and match one document.
///
/// `Ok(None)` means processed cleanly with no matches; `Err` means the
/// document failed and the caller decides what to record.
async fn process_document(
    fetcher: &dyn Fetch,
    documents: &DocumentStore,
    matcher: &TermMatcher,
    url: &str,
) -> Result<Option<Finding>> {
    let path = documents.ensure_downloaded(fetcher, url).await?;
    let pages = extract::extract_pages(&path)?;
    log::info!(
        "Extracted text from {} pages of {}.",
        pages.len(),
        path.display()
    );

    let matches = matcher.find_matches(&pages);
    if matches.is_empty() {
        return Ok(None);
    }

    Ok(Some(Finding {
        url: url.to_string(),
        filename: file_name_for(url),
        matches,
    }))
}
