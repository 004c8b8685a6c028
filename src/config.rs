use std::{env, net::SocketAddr, str::FromStr};

use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;

use crate::email::{SmtpConfig, DEFAULT_SENDGRID_BASE_URL};

pub const FROM_NAME: &str = "Royal Forge";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
  SendGrid,
  Smtp,
}

impl FromStr for EmailProvider {
  type Err = anyhow::Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "sendgrid" => Ok(EmailProvider::SendGrid),
      "smtp" => Ok(EmailProvider::Smtp),
      other => Err(anyhow!("Unknown EMAIL_PROVIDER '{}', expected 'sendgrid' or 'smtp'", other)),
    }
  }
}

/// Sender identity used for every outgoing welcome email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
  pub from_email: Option<String>,
  pub from_name: String,
}

impl SenderConfig {
  pub fn new(from_email: Option<String>) -> Self {
    Self {
      from_email,
      from_name: FROM_NAME.to_string(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub bind_address: SocketAddr,
  pub provider: EmailProvider,
  pub sendgrid_api_key: Option<String>,
  pub sendgrid_base_url: String,
  pub smtp: Option<SmtpConfig>,
  pub sender: SenderConfig,
  pub cors_allowed_origins: Vec<HeaderValue>,
}

fn non_empty_var(key: &str) -> Option<String> {
  env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn smtp_from_env() -> Result<SmtpConfig> {
  let defaults = SmtpConfig::default();

  let port = match non_empty_var("SMTP_PORT") {
    Some(port) => port.parse().with_context(|| format!("Invalid SMTP_PORT '{}'", port))?,
    None => defaults.port,
  };

  Ok(SmtpConfig {
    host: non_empty_var("SMTP_HOST").unwrap_or(defaults.host),
    port,
    username: non_empty_var("SMTP_USERNAME").context("SMTP_USERNAME environment variable must be set.")?,
    password: non_empty_var("SMTP_PASSWORD").context("SMTP_PASSWORD environment variable must be set.")?,
  })
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|origin| !origin.is_empty())
    .map(|origin| HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin '{}'", origin)))
    .collect()
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    let bind_address: SocketAddr = non_empty_var("BIND_ADDRESS")
      .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
      .parse()
      .context("Invalid BIND_ADDRESS")?;

    let provider = match non_empty_var("EMAIL_PROVIDER") {
      Some(value) => value.parse()?,
      None => EmailProvider::SendGrid,
    };

    let smtp = match provider {
      EmailProvider::Smtp => Some(smtp_from_env()?),
      EmailProvider::SendGrid => None,
    };

    let cors_allowed_origins = match non_empty_var("CORS_ALLOWED_ORIGINS") {
      Some(raw) => parse_origins(&raw)?,
      None => Vec::new(),
    };

    Ok(Self {
      bind_address,
      provider,
      sendgrid_api_key: non_empty_var("SENDGRID_API_KEY"),
      sendgrid_base_url: non_empty_var("SENDGRID_BASE_URL").unwrap_or_else(|| DEFAULT_SENDGRID_BASE_URL.to_string()),
      smtp,
      sender: SenderConfig::new(non_empty_var("SENDGRID_FROM_EMAIL")),
      cors_allowed_origins,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const KEYS: [&str; 10] = [
    "BIND_ADDRESS",
    "EMAIL_PROVIDER",
    "SENDGRID_API_KEY",
    "SENDGRID_BASE_URL",
    "SENDGRID_FROM_EMAIL",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_USERNAME",
    "SMTP_PASSWORD",
    "CORS_ALLOWED_ORIGINS",
  ];

  fn clear_env() {
    for key in KEYS {
      env::remove_var(key);
    }
  }

  #[test]
  #[serial]
  fn test_defaults_when_env_is_empty() {
    clear_env();

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.bind_address, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.provider, EmailProvider::SendGrid);
    assert_eq!(config.sendgrid_api_key, None);
    assert_eq!(config.sendgrid_base_url, DEFAULT_SENDGRID_BASE_URL);
    assert_eq!(config.sender.from_email, None);
    assert_eq!(config.sender.from_name, "Royal Forge");
    assert!(config.smtp.is_none());
    assert!(config.cors_allowed_origins.is_empty());
  }

  #[test]
  #[serial]
  fn test_reads_sendgrid_settings() {
    clear_env();
    env::set_var("SENDGRID_API_KEY", "SG.key");
    env::set_var("SENDGRID_FROM_EMAIL", "hello@royalforge.org");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://royalforge.org, https://www.royalforge.org");

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.sendgrid_api_key.as_deref(), Some("SG.key"));
    assert_eq!(config.sender.from_email.as_deref(), Some("hello@royalforge.org"));
    assert_eq!(config.cors_allowed_origins.len(), 2);

    clear_env();
  }

  #[test]
  #[serial]
  fn test_blank_from_email_counts_as_missing() {
    clear_env();
    env::set_var("SENDGRID_FROM_EMAIL", "   ");

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.sender.from_email, None);

    clear_env();
  }

  #[test]
  #[serial]
  fn test_smtp_provider_requires_credentials() {
    clear_env();
    env::set_var("EMAIL_PROVIDER", "smtp");

    let err = AppConfig::from_env().unwrap_err();
    assert!(err.to_string().contains("SMTP_USERNAME"));

    env::set_var("SMTP_USERNAME", "user");
    env::set_var("SMTP_PASSWORD", "pass");
    env::set_var("SMTP_PORT", "2525");

    let config = AppConfig::from_env().expect("config");
    let smtp = config.smtp.expect("smtp config");
    assert_eq!(config.provider, EmailProvider::Smtp);
    assert_eq!(smtp.host, "smtp.gmail.com");
    assert_eq!(smtp.port, 2525);

    clear_env();
  }

  #[test]
  #[serial]
  fn test_unknown_provider_is_rejected() {
    clear_env();
    env::set_var("EMAIL_PROVIDER", "carrier-pigeon");

    assert!(AppConfig::from_env().is_err());

    clear_env();
  }

  #[test]
  fn test_provider_parse_is_case_insensitive() {
    assert_eq!("SendGrid".parse::<EmailProvider>().unwrap(), EmailProvider::SendGrid);
    assert_eq!(" SMTP ".parse::<EmailProvider>().unwrap(), EmailProvider::Smtp);
  }
}
