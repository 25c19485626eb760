// src/services/mailer.rs

//! Digest delivery over SMTP, with the password held in the OS keychain.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::{AppError, Result};
use crate::models::EmailConfig;
use crate::services::digest::Digest;

/// Key the SMTP password is stored under in the credential store.
pub const SMTP_SECRET_KEY: &str = "smtp_password";

/// Abstraction over digest delivery so tests can observe sends.
#[async_trait]
pub trait Notify: Send + Sync {
    /// Deliver the digest.
    ///
    /// `true` means delivered, or delivery administratively disabled;
    /// `false` means a digest was generated but could not be sent. Never
    /// raises: the orchestrator treats delivery as best-effort.
    async fn send(&self, digest: &Digest) -> bool;
}

/// Read-only access to the OS credential store.
pub trait SecretStore: Send + Sync {
    /// Fetch a secret; `Ok(None)` when no entry exists.
    fn get_secret(&self, service: &str, key: &str) -> Result<Option<String>>;
}

/// Keyring-backed secret store.
pub struct KeyringSecrets;

impl SecretStore for KeyringSecrets {
    fn get_secret(&self, service: &str, key: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(service, key).map_err(AppError::credential)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(AppError::credential(error)),
        }
    }
}

/// SMTP notifier: STARTTLS relay, fixed sender and recipient list.
pub struct Mailer {
    config: EmailConfig,
    secrets: Box<dyn SecretStore>,
}

impl Mailer {
    /// Create a mailer reading its password from the OS keychain.
    pub fn new(config: EmailConfig) -> Self {
        Self::with_secrets(config, Box::new(KeyringSecrets))
    }

    /// Create a mailer with a substitute secret store.
    pub fn with_secrets(config: EmailConfig, secrets: Box<dyn SecretStore>) -> Self {
        Self { config, secrets }
    }

    async fn deliver(&self, digest: &Digest, password: &str) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.config.from.parse::<Mailbox>().map_err(AppError::mail)?)
            .subject(digest.subject.clone());
        for recipient in &self.config.to {
            builder = builder.to(recipient.parse::<Mailbox>().map_err(AppError::mail)?);
        }
        let message = builder
            .multipart(MultiPart::alternative_plain_html(
                digest.plain_body.clone(),
                digest.html_body.clone(),
            ))
            .map_err(AppError::mail)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(
            &self.config.smtp_host,
        )
        .map_err(AppError::mail)?
        .port(self.config.smtp_port)
        .credentials(Credentials::new(
            self.config.smtp_user.clone(),
            password.to_string(),
        ))
        .build();

        transport.send(message).await.map_err(AppError::mail)?;
        Ok(())
    }
}

#[async_trait]
impl Notify for Mailer {
    async fn send(&self, digest: &Digest) -> bool {
        if !self.config.enabled {
            log::info!("Email sending is disabled.");
            return true;
        }

        let password = match self
            .secrets
            .get_secret(&self.config.keyring_service, SMTP_SECRET_KEY)
        {
            Ok(secret) => secret.unwrap_or_default(),
            Err(error) => {
                log::error!(
                    "Failed to read the SMTP password from the credential store: {}",
                    error
                );
                return false;
            }
        };
        if self.config.smtp_user.is_empty() || password.is_empty() {
            log::error!(
                "SMTP account not set or no password stored for service '{}'.",
                self.config.keyring_service
            );
            return false;
        }

        match self.deliver(digest, &password).await {
            Ok(()) => {
                log::info!("Email sent successfully.");
                true
            }
            Err(error) => {
                log::error!("Failed to send email: {}", error);
                false
            }
        }
    }
}
