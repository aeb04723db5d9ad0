/// Outbound email delivery via SMTP.
///
/// The workflow talks to `EmailProvider` so tests can substitute a
/// recording fake; `SmtpEmailProvider` is the production implementation,
/// sending one message per call using lettre.
use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to build email message: {0}")]
    MessageBuildError(String),

    #[error("Failed to send email: {0}")]
    SendError(String),

    #[error("SMTP configuration error: {0}")]
    ConfigError(String),
}

/// SMTP configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    pub use_tls: bool,
}

impl SmtpConfig {
    /// Load SMTP configuration from environment variables
    pub fn from_env() -> Result<Self, EmailError> {
        let host = env::var("SMTP_HOST")
            .map_err(|_| EmailError::ConfigError("SMTP_HOST not set".to_string()))?;

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| EmailError::ConfigError("Invalid SMTP_PORT".to_string()))?;

        let username = env::var("SMTP_USERNAME")
            .map_err(|_| EmailError::ConfigError("SMTP_USERNAME not set".to_string()))?;

        let password = env::var("SMTP_PASSWORD")
            .map_err(|_| EmailError::ConfigError("SMTP_PASSWORD not set".to_string()))?;

        let from_email = env::var("SMTP_FROM_EMAIL")
            .map_err(|_| EmailError::ConfigError("SMTP_FROM_EMAIL not set".to_string()))?;

        let from_name = env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "Mailcast".to_string());

        let use_tls = env::var("SMTP_USE_TLS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name,
            use_tls,
        })
    }
}

/// Single-message send seam to the transactional-email provider.
///
/// Failure is reported as a human-readable reason string that ends up in
/// the caller-facing per-recipient error list.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), String>;

    fn provider_name(&self) -> &'static str;
}

pub struct SmtpEmailProvider {
    config: SmtpConfig,
}

impl SmtpEmailProvider {
    pub fn new(config: SmtpConfig) -> Self {
        tracing::info!(
            from = %config.from_email,
            host = %config.host,
            "SMTP provider initialized"
        );
        Self { config }
    }

    async fn send_message(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        // Reject malformed rows before touching the transport so the
        // recipient gets a clear reason instead of an SMTP error.
        if !email_address::EmailAddress::is_valid(to) {
            return Err(EmailError::MessageBuildError(format!(
                "Invalid recipient address: {}",
                to
            )));
        }

        let from_address = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(from_address.parse().map_err(|e| {
                EmailError::MessageBuildError(format!("Invalid from address: {}", e))
            })?)
            .to(to
                .parse()
                .map_err(|e| EmailError::MessageBuildError(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| EmailError::MessageBuildError(e.to_string()))?;

        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = if self.config.use_tls {
            SmtpTransport::starttls_relay(&self.config.host)
                .map_err(|e| {
                    EmailError::SendError(format!("Failed to create SMTP transport: {}", e))
                })?
                .port(self.config.port)
                .credentials(creds)
                .build()
        } else {
            SmtpTransport::builder_dangerous(&self.config.host)
                .port(self.config.port)
                .credentials(creds)
                .build()
        };

        // lettre's SmtpTransport is blocking; keep it off the async workers
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| EmailError::SendError(format!("Task join error: {}", e)))?
            .map_err(|e| EmailError::SendError(format!("SMTP send error: {}", e)))?;

        tracing::debug!(to = %to, "Email accepted by SMTP relay");

        Ok(())
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        self.send_message(to, subject, html)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "smtp"
    }
}
