//! Handlers for the registry listing endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use macrolens_core::{country::Country, metric::Metric, store::SeriesStore};

use crate::error::ApiError;

/// `GET /countries`
pub async fn countries<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Country>>, ApiError>
where
  S: SeriesStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let all = store
    .list_countries()
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  Ok(Json(all))
}

/// `GET /metrics` — names, units and scopes.
pub async fn metrics<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Metric>>, ApiError>
where
  S: SeriesStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let all = store
    .list_metrics()
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  Ok(Json(all))
}
