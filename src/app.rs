use axum::{
  http::{header, HeaderValue, Method},
  response::Json,
  routing::get,
  Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{domains::registration::rest::registration_routes, state::SharedAppState};

pub fn cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
  let origin = if allowed_origins.is_empty() {
    AllowOrigin::from(Any)
  } else {
    AllowOrigin::list(allowed_origins.iter().cloned())
  };

  CorsLayer::new()
    .allow_origin(origin)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE])
}

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/health", get(health_handler))
    .nest("/api", registration_routes())
    .with_state(state)
}

pub async fn health_handler() -> Json<Value> {
  Json(json!({ "status": "ok" }))
}
