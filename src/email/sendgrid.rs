use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{
  types::{DeliveryError, EmailMessage, Mailbox},
  EmailSender,
};

pub const DEFAULT_SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

#[derive(Serialize)]
struct MailSendBody<'a> {
  personalizations: [Personalization<'a>; 1],
  from: &'a Mailbox,
  subject: &'a str,
  content: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Personalization<'a> {
  to: [Recipient<'a>; 1],
}

#[derive(Serialize)]
struct Recipient<'a> {
  email: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
  #[serde(rename = "type")]
  content_type: &'a str,
  value: &'a str,
}

impl<'a> From<&'a EmailMessage> for MailSendBody<'a> {
  fn from(message: &'a EmailMessage) -> Self {
    MailSendBody {
      personalizations: [Personalization {
        to: [Recipient { email: &message.to }],
      }],
      from: &message.from,
      subject: &message.subject,
      content: [Content {
        content_type: "text/html",
        value: &message.html,
      }],
    }
  }
}

/// Client for SendGrid's v3 `mail/send` endpoint.
pub struct SendGridClient {
  client: Client,
  base_url: String,
  api_key: String,
}

impl SendGridClient {
  pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.into().trim_end_matches('/').to_string(),
      api_key: api_key.into(),
    }
  }

  fn endpoint(&self) -> String {
    format!("{}/v3/mail/send", self.base_url)
  }
}

fn error_details(body: &str) -> Vec<Value> {
  serde_json::from_str::<Value>(body)
    .ok()
    .and_then(|value| value.get("errors").and_then(Value::as_array).cloned())
    .unwrap_or_default()
}

#[async_trait]
impl EmailSender for SendGridClient {
  async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
    let response = self
      .client
      .post(self.endpoint())
      .bearer_auth(&self.api_key)
      .json(&MailSendBody::from(message))
      .send()
      .await
      .map_err(|e| DeliveryError::new(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
      return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("SendGrid rejected message with status {}: {}", status.as_u16(), body);

    let reason = status.canonical_reason().unwrap_or("Unknown error");
    Err(DeliveryError::with_response(reason, status.as_u16(), error_details(&body)))
  }
}
