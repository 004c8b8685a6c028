use std::{error::Error, sync::Arc};

use askama::Template;
use async_trait::async_trait;
use validator::Validate;

use super::{
  model::RegistrationRequest,
  template::{WelcomeEmail, WELCOME_SUBJECT},
};
use crate::{
  config::SenderConfig,
  email::{DeliveryError, EmailMessage, EmailSender, Mailbox},
};

#[derive(Debug)]
pub enum RegistrationServiceError {
  ValidationError(String),
  ConfigurationError(String),
  TemplateError(String),
  DeliveryError(DeliveryError),
}

impl Error for RegistrationServiceError {}

impl std::fmt::Display for RegistrationServiceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RegistrationServiceError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
      RegistrationServiceError::ConfigurationError(msg) => write!(f, "Configuration Error: {}", msg),
      RegistrationServiceError::TemplateError(msg) => write!(f, "Template Error: {}", msg),
      RegistrationServiceError::DeliveryError(err) => write!(f, "Delivery Error: {}", err),
    }
  }
}

impl From<DeliveryError> for RegistrationServiceError {
  fn from(err: DeliveryError) -> Self {
    RegistrationServiceError::DeliveryError(err)
  }
}

#[async_trait]
pub trait RegistrationService: Send + Sync {
  async fn register(&self, req: RegistrationRequest) -> Result<(), RegistrationServiceError>;
}

pub struct RegistrationServiceImpl {
  sender: SenderConfig,
  email_sender: Arc<dyn EmailSender>,
}

impl RegistrationServiceImpl {
  pub fn new(sender: SenderConfig, email_sender: Arc<dyn EmailSender>) -> Self {
    Self { sender, email_sender }
  }

  fn welcome_message(&self, req: &RegistrationRequest, from_email: &str) -> Result<EmailMessage, RegistrationServiceError> {
    let missing = || RegistrationServiceError::ValidationError("Missing required fields".to_string());

    let email = req.email.as_deref().ok_or_else(missing)?;
    let welcome = WelcomeEmail {
      full_name: req.full_name.as_deref().ok_or_else(missing)?,
      email,
      company: req.company.as_deref(),
      role: req.role.as_deref().ok_or_else(missing)?,
      referral_source: req.referral_source.as_deref().ok_or_else(missing)?,
    };

    let html = welcome
      .render()
      .map_err(|e| RegistrationServiceError::TemplateError(e.to_string()))?;

    Ok(EmailMessage::new(
      email.to_string(),
      Mailbox {
        email: from_email.to_string(),
        name: self.sender.from_name.clone(),
      },
      WELCOME_SUBJECT.to_string(),
      html,
    ))
  }
}

#[async_trait]
impl RegistrationService for RegistrationServiceImpl {
  async fn register(&self, req: RegistrationRequest) -> Result<(), RegistrationServiceError> {
    req
      .validate()
      .map_err(|_| RegistrationServiceError::ValidationError("Missing required fields".to_string()))?;

    let from_email = match self.sender.from_email.as_deref() {
      Some(from_email) => from_email,
      None => {
        tracing::error!("Missing email configuration: SENDGRID_FROM_EMAIL is not set");
        return Err(RegistrationServiceError::ConfigurationError(
          "Server configuration error".to_string(),
        ));
      }
    };

    let message = self.welcome_message(&req, from_email)?;

    tracing::info!("Attempting to send emails from {}", message.from);

    match self.email_sender.send(&message).await {
      Ok(()) => {
        tracing::info!("Welcome email sent to {}", message.to);
        Ok(())
      }
      Err(e) => {
        tracing::error!(
          "Failed to send welcome email: {} (status: {:?}, details: {:?})",
          e.message,
          e.code,
          e.details
        );
        Err(e.into())
      }
    }
  }
}
