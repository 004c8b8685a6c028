use axum::{
  body::Bytes,
  extract::State,
  response::Json as JsonResponse,
  routing::{post, Router},
};
use serde_json::Value;

use super::model::{RegistrationRequest, RegistrationResponse};
use crate::{
  state::{AppState, SharedAppState},
  AppError,
};

pub fn registration_routes() -> Router<SharedAppState> {
  Router::new().route("/register", post(register_handler))
}

/// Only a JSON object is a registration form. Derived `Deserialize` would
/// otherwise fill fields from an array by position.
fn parse_registration(body: &[u8]) -> Result<RegistrationRequest, serde_json::Error> {
  match serde_json::from_slice::<Value>(body)? {
    object @ Value::Object(_) => serde_json::from_value(object),
    _ => Err(serde::de::Error::custom("registration body must be a JSON object")),
  }
}

/// The body is parsed by hand so that a missing or wrong `Content-Type`
/// still reaches validation, and malformed JSON gets the JSON error shape.
pub async fn register_handler(
  State(state): State<SharedAppState>,
  body: Bytes,
) -> Result<JsonResponse<RegistrationResponse>, AppError> {
  let payload = parse_registration(&body)?;

  state.register(payload).await?;

  Ok(JsonResponse(RegistrationResponse::registered()))
}
