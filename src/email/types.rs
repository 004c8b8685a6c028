use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
  pub host: String,
  pub port: u16,
  pub username: String,
  pub password: String,
}

impl Default for SmtpConfig {
  fn default() -> Self {
    SmtpConfig {
      host: "smtp.gmail.com".to_string(),
      port: 587,
      username: "".to_string(),
      password: "".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
  pub email: String,
  pub name: String,
}

impl fmt::Display for Mailbox {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} <{}>", self.name, self.email)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
  pub to: String,
  pub from: Mailbox,
  pub subject: String,
  pub html: String,
}

impl EmailMessage {
  pub fn new(to: String, from: Mailbox, subject: String, html: String) -> Self {
    EmailMessage {
      to,
      from,
      subject,
      html,
    }
  }
}

/// A failed hand-off to the email provider.
///
/// `details` carries whatever structured error list the provider returned
/// (SendGrid's `errors` array) and is empty for transport-level failures.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryError {
  pub message: String,
  pub code: Option<u16>,
  pub details: Vec<Value>,
}

impl DeliveryError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      code: None,
      details: Vec::new(),
    }
  }

  pub fn with_response(message: impl Into<String>, code: u16, details: Vec<Value>) -> Self {
    Self {
      message: message.into(),
      code: Some(code),
      details,
    }
  }
}

impl std::error::Error for DeliveryError {}

impl fmt::Display for DeliveryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.code {
      Some(code) => write!(f, "{} (status {})", self.message, code),
      None => write!(f, "{}", self.message),
    }
  }
}
