//! Outbound email (SMTP)
//!
//! Welcome notifications are fire-and-forget: a delivery failure is
//! logged by the caller and never fails the provisioning request.

use async_trait::async_trait;
use lettre::message::{header, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    /// Base URL of the web frontend, used for the password-reset link.
    pub frontend_base_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: "admin@careport.example".to_string(),
            from_name: "CarePort Admin".to_string(),
            frontend_base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),
    #[error("Failed to build message: {0}")]
    Build(String),
    #[error("Failed to send email: {0}")]
    Transport(String),
}

/// Sends the account-credentials welcome email.
#[async_trait]
pub trait WelcomeMailer: Send + Sync {
    async fn send_welcome(&self, to: &str, temp_password: &str) -> Result<(), MailError>;
}

/// SMTP-backed mailer.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(transport)
    }

    fn build_message(&self, to: &str, temp_password: &str) -> Result<Message, MailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| MailError::Address(format!("from: {}", e)))?;
        let to_mailbox = to
            .parse()
            .map_err(|e| MailError::Address(format!("to: {}", e)))?;

        let reset_link = format!(
            "{}/auth/change-password?email={}",
            self.config.frontend_base_url, to
        );
        let html = welcome_html(to, temp_password, &reset_link);
        let text = format!(
            "Welcome to CarePort!\n\nYour new account has been created.\n\
             Email: {}\nPassword: {}\n\nPlease reset your password after logging in: {}\n",
            to, temp_password, reset_link
        );

        Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject("Welcome to CarePort - Your Account Credentials")
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

fn welcome_html(email: &str, temp_password: &str, reset_link: &str) -> String {
    format!(
        "<h1>Welcome to CarePort</h1>\
         <p>Your new account has been successfully created!</p>\
         <p>Here are your login credentials:</p>\
         <ul>\
             <li><strong>Email:</strong> {}</li>\
             <li><strong>Password:</strong> {}</li>\
         </ul>\
         <p>For security reasons, we highly recommend you reset your password after logging in.</p>\
         <p>Click <a href=\"{}\">here</a> to reset your password.</p>\
         <p>Best regards,<br/>The CarePort Team</p>",
        email, temp_password, reset_link
    )
}

#[async_trait]
impl WelcomeMailer for SmtpMailer {
    async fn send_welcome(&self, to: &str, temp_password: &str) -> Result<(), MailError> {
        debug!(to = %to, "Sending welcome email");

        let message = self.build_message(to, temp_password)?;
        let transport = self.build_transport()?;
        transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        info!(to = %to, "Welcome email sent");
        Ok(())
    }
}
