use std::sync::Arc;

use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use tower::ServiceExt;

use crate::{app::create_app, config::SenderConfig, email::EmailSender, state::SharedAppState};

pub fn app_with_sender<S>(from_email: Option<&str>, email_sender: S) -> Router
where
  S: EmailSender + 'static,
{
  let sender = SenderConfig::new(from_email.map(str::to_string));
  let state = SharedAppState::new(sender, Arc::new(email_sender));
  create_app(state)
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  let body = serde_json::to_string(body).expect("serialize request body");
  post_raw(app, uri, Some("application/json"), &body).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Bytes) {
  let mut builder = Request::builder().method("POST").uri(uri);
  if let Some(content_type) = content_type {
    builder = builder.header("content-type", content_type);
  }
  let request = builder.body(Body::from(body.to_string())).expect("build request");

  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}
