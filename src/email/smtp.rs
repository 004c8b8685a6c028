use anyhow::Result;
use async_trait::async_trait;
use lettre::{
  message::{header::ContentType, Mailbox as LettreMailbox},
  transport::smtp::authentication::Credentials,
  Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{
  types::{DeliveryError, EmailMessage, SmtpConfig},
  EmailSender,
};

pub struct SmtpEmailSender {
  smtp_config: SmtpConfig,
  transporter: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
  pub fn new(smtp_config: SmtpConfig) -> Result<Self> {
    let creds = Credentials::new(smtp_config.username.clone(), smtp_config.password.clone());

    let transporter = if smtp_config.host == "localhost" || smtp_config.host == "mailhog" {
      AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp_config.host)
        .credentials(creds)
        .port(smtp_config.port)
        .build()
    } else {
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp_config.host)?
        .credentials(creds)
        .port(smtp_config.port)
        .build()
    };

    Ok(SmtpEmailSender {
      smtp_config,
      transporter,
    })
  }

  fn build_message(message: &EmailMessage) -> Result<Message, DeliveryError> {
    let from_address: Address = message
      .from
      .email
      .parse()
      .map_err(|e| DeliveryError::new(format!("Invalid sender address: {}", e)))?;
    let to_address: Address = message
      .to
      .parse()
      .map_err(|e| DeliveryError::new(format!("Invalid recipient address: {}", e)))?;

    Message::builder()
      .from(LettreMailbox::new(Some(message.from.name.clone()), from_address))
      .to(LettreMailbox::new(None, to_address))
      .subject(&message.subject)
      .header(ContentType::TEXT_HTML)
      .body(message.html.clone())
      .map_err(|e| DeliveryError::new(e.to_string()))
  }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
  async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
    let email = Self::build_message(message)?;

    self.transporter.send(email).await.map_err(|e| {
      tracing::error!("SMTP delivery via {} failed: {:?}", self.smtp_config.host, e);
      DeliveryError::new(e.to_string())
    })?;

    Ok(())
  }
}
