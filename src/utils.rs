use std::sync::Arc;

use crate::config::{AppConfig, EmailProvider};
use crate::email::{EmailSender, SendGridClient, SmtpEmailSender};

pub mod error;

pub fn init_email_service(config: &AppConfig) -> anyhow::Result<Arc<dyn EmailSender>> {
  match config.provider {
    EmailProvider::SendGrid => {
      let api_key = match &config.sendgrid_api_key {
        Some(key) => key.clone(),
        None => {
          tracing::error!("SENDGRID_API_KEY not found in environment variables");
          String::new()
        }
      };
      Ok(Arc::new(SendGridClient::new(config.sendgrid_base_url.clone(), api_key)))
    }
    EmailProvider::Smtp => {
      let smtp_config = config
        .smtp
        .clone()
        .ok_or_else(|| anyhow::anyhow!("SMTP provider selected without SMTP settings"))?;
      Ok(Arc::new(SmtpEmailSender::new(smtp_config)?))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SenderConfig;
  use crate::email::{SmtpConfig, DEFAULT_SENDGRID_BASE_URL};

  fn config(provider: EmailProvider, smtp: Option<SmtpConfig>) -> AppConfig {
    AppConfig {
      bind_address: "127.0.0.1:0".parse().unwrap(),
      provider,
      sendgrid_api_key: None,
      sendgrid_base_url: DEFAULT_SENDGRID_BASE_URL.to_string(),
      smtp,
      sender: SenderConfig::new(None),
      cors_allowed_origins: Vec::new(),
    }
  }

  #[test]
  fn test_sendgrid_without_api_key_still_starts() {
    assert!(init_email_service(&config(EmailProvider::SendGrid, None)).is_ok());
  }

  #[tokio::test]
  async fn test_smtp_provider_uses_smtp_settings() {
    let smtp = SmtpConfig {
      host: "localhost".to_string(),
      port: 1025,
      ..SmtpConfig::default()
    };
    assert!(init_email_service(&config(EmailProvider::Smtp, Some(smtp))).is_ok());
  }

  #[test]
  fn test_smtp_provider_without_settings_fails() {
    assert!(init_email_service(&config(EmailProvider::Smtp, None)).is_err());
  }
}
