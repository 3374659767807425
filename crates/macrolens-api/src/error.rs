//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error by walking its source chain: registry misses
  /// map to 404, everything else stays a 500.
  pub fn from_store(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
    let mut not_found = None;
    let mut current: Option<&(dyn std::error::Error + 'static)> =
      Some(error.as_ref());
    while let Some(err) = current {
      if let Some(core) = err.downcast_ref::<macrolens_core::Error>()
        && let macrolens_core::Error::CountryNotFound(_)
          | macrolens_core::Error::MetricNotFound(_) = core
      {
        not_found = Some(core.to_string());
        break;
      }
      current = err.source();
    }
    match not_found {
      Some(message) => Self::NotFound(message),
      None => Self::Store(error),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
