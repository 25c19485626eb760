//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing pages and search terms
    #[serde(default)]
    pub watch: WatchConfig,

    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Digest delivery settings
    #[serde(default)]
    pub email: EmailConfig,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.watch.listing_urls.is_empty() {
            return Err(AppError::validation("No listing URLs defined"));
        }
        if self.watch.search_terms.is_empty() {
            return Err(AppError::validation("No search terms defined"));
        }
        if self.watch.search_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Blank search term"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.retry_count == 0 {
            return Err(AppError::validation("http.retry_count must be > 0"));
        }
        if self.email.enabled {
            if self.email.smtp_host.trim().is_empty() {
                return Err(AppError::validation("email.smtp_host is empty"));
            }
            if self.email.from.trim().is_empty() {
                return Err(AppError::validation("email.from is empty"));
            }
            if self.email.to.is_empty() {
                return Err(AppError::validation("No email recipients defined"));
            }
        }
        Ok(())
    }
}

/// Which pages to watch and which phrases to look for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Gazette listing pages scanned for PDF links
    #[serde(default = "defaults::listing_urls")]
    pub listing_urls: Vec<String>,

    /// Literal phrases searched for in extracted page text
    #[serde(default = "defaults::search_terms")]
    pub search_terms: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            listing_urls: defaults::listing_urls(),
            search_terms: defaults::search_terms(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Attempts per request before giving up
    #[serde(default = "defaults::retry_count")]
    pub retry_count: u32,

    /// Delay between attempts in seconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retry_count: defaults::retry_count(),
            retry_delay_secs: defaults::retry_delay(),
        }
    }
}

/// Digest delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether a digest is actually sent
    #[serde(default = "defaults::email_enabled")]
    pub enabled: bool,

    /// SMTP relay host
    #[serde(default = "defaults::smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port
    #[serde(default = "defaults::smtp_port")]
    pub smtp_port: u16,

    /// SMTP account name
    #[serde(default = "defaults::smtp_user")]
    pub smtp_user: String,

    /// Sender address
    #[serde(default = "defaults::email_from")]
    pub from: String,

    /// Recipient addresses
    #[serde(default = "defaults::email_to")]
    pub to: Vec<String>,

    /// Prefix for the digest subject line
    #[serde(default = "defaults::subject_prefix")]
    pub subject_prefix: String,

    /// Service name the SMTP password is stored under in the OS keychain
    #[serde(default = "defaults::keyring_service")]
    pub keyring_service: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::email_enabled(),
            smtp_host: defaults::smtp_host(),
            smtp_port: defaults::smtp_port(),
            smtp_user: defaults::smtp_user(),
            from: defaults::email_from(),
            to: defaults::email_to(),
            subject_prefix: defaults::subject_prefix(),
            keyring_service: defaults::keyring_service(),
        }
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory downloaded gazettes are written into
    #[serde(default = "defaults::download_dir")]
    pub download_dir: String,

    /// JSON file holding the set of already-processed URLs
    #[serde(default = "defaults::state_file")]
    pub state_file: String,

    /// Append-mode log file
    #[serde(default = "defaults::log_file")]
    pub log_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            download_dir: defaults::download_dir(),
            state_file: defaults::state_file(),
            log_file: defaults::log_file(),
        }
    }
}

mod defaults {
    // Watch defaults
    pub fn listing_urls() -> Vec<String> {
        vec!["https://www.gazette.vic.gov.au/gazette_bin/recent_gazettes.cfm".into()]
    }
    pub fn search_terms() -> Vec<String> {
        vec![
            "acquisition".into(),
            "declaration that a stratum".into(),
            "designation of the project area".into(),
            "designation of a project area".into(),
            "notice of intention to acquire".into(),
            "major transport projects facilitation act".into(),
        ]
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Hunt&Hunt Gazette Watcher (contact: it@example.com)".into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn retry_count() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        2
    }

    // Email defaults
    pub fn email_enabled() -> bool {
        true
    }
    pub fn smtp_host() -> String {
        "mail.smtp2go.com".into()
    }
    pub fn smtp_port() -> u16 {
        80
    }
    pub fn smtp_user() -> String {
        std::env::var("GAZETTE_SMTP_USER").unwrap_or_else(|_| "huntvic.com.au".into())
    }
    pub fn email_from() -> String {
        "mortgages@huntvic.com.au".into()
    }
    pub fn email_to() -> Vec<String> {
        vec![
            "CompulsoryAcquisitionsGroup@huntvic.com.au".into(),
            "ahaak@huntvic.com.au".into(),
        ]
    }
    pub fn subject_prefix() -> String {
        "Gazette Alert".into()
    }
    pub fn keyring_service() -> String {
        "gazette-watch".into()
    }

    // Path defaults
    pub fn download_dir() -> String {
        "downloads".into()
    }
    pub fn state_file() -> String {
        "seen_urls.json".into()
    }
    pub fn log_file() -> String {
        "gazette_watch.log".into()
    }
}
