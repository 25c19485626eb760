//! Service layer for the gazette watcher.
//!
//! This module contains the business logic for:
//! - PDF link discovery (`discovery`)
//! - Per-page text extraction (`extract`)
//! - Phrase matching (`matcher`)
//! - Digest rendering (`digest`)
//! - Digest delivery (`mailer`)

pub mod digest;
pub mod discovery;
pub mod extract;
pub mod matcher;
pub mod mailer;

pub use digest::Digest;
pub use discovery::discover_pdf_links;
pub use extract::extract_pages;
pub use matcher::TermMatcher;
pub use mailer::{KeyringSecrets, Mailer, Notify, SMTP_SECRET_KEY, SecretStore};
