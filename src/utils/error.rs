use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::domains::registration::service::RegistrationServiceError;

#[derive(Debug)]
pub struct AppError {
  pub status_code: StatusCode,
  pub message: String,
  pub error: Option<String>,
  pub details: Option<Vec<Value>>,
}

#[derive(Serialize)]
struct ErrorBody {
  success: bool,
  message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  details: Option<Vec<Value>>,
}

impl AppError {
  pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
    Self {
      status_code,
      message: message.into(),
      error: None,
      details: None,
    }
  }

  pub fn bad_request(message: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, message)
  }

  pub fn internal_server_error(message: impl Into<String>) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
  }

  pub fn with_cause(mut self, error: impl Into<String>, details: Vec<Value>) -> Self {
    self.error = Some(error.into());
    self.details = Some(details);
    self
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let body = Json(ErrorBody {
      success: false,
      message: self.message,
      error: self.error,
      details: self.details,
    });

    (self.status_code, body).into_response()
  }
}

impl From<serde_json::Error> for AppError {
  fn from(error: serde_json::Error) -> Self {
    tracing::warn!("JSON error: {:?}", error);
    AppError::bad_request("Invalid JSON format")
  }
}

impl From<RegistrationServiceError> for AppError {
  fn from(error: RegistrationServiceError) -> Self {
    match error {
      RegistrationServiceError::ValidationError(msg) => AppError::bad_request(msg),
      RegistrationServiceError::ConfigurationError(msg) => AppError::internal_server_error(msg),
      RegistrationServiceError::TemplateError(_) => AppError::internal_server_error("Internal server error"),
      RegistrationServiceError::DeliveryError(e) => {
        AppError::internal_server_error("Failed to send email").with_cause(e.message, e.details)
      }
    }
  }
}
