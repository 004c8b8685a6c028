//! Outbound email delivery.
//!
//! The registration flow only knows about [`EmailSender`]; the concrete
//! provider (SendGrid's HTTP API or an SMTP relay via lettre) is picked at
//! startup from configuration.

mod sendgrid;
mod smtp;
mod types;

use async_trait::async_trait;

pub use sendgrid::{SendGridClient, DEFAULT_SENDGRID_BASE_URL};
pub use smtp::SmtpEmailSender;
pub use types::{DeliveryError, EmailMessage, Mailbox, SmtpConfig};

#[async_trait]
pub trait EmailSender: Send + Sync {
  async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}
