//! Handlers for series reads and batch observation writes.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/series` | `?metric=..[&country=..]`; omitted country means global |
//! | `GET`  | `/series/latest` | most recent observation for the key |
//! | `POST` | `/observations` | Body: [`PutObservationsBody`]; idempotent batch insert |

use std::sync::Arc;

use axum::{Json, extract::{Query, State}};
use macrolens_core::{
  country::CountryRef,
  observation::{InsertOutcome, ObservationRecord},
  series::{Series, SeriesPoint},
  store::SeriesStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SeriesParams {
  pub metric:  String,
  /// Country code; omitted for global metrics.
  pub country: Option<String>,
}

/// `GET /series?metric=..[&country=..]`
pub async fn series<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SeriesParams>,
) -> Result<Json<Series>, ApiError>
where
  S: SeriesStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let series = store
    .materialize(&params.metric, params.country.as_deref())
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  Ok(Json(series))
}

/// `GET /series/latest?metric=..[&country=..]` — `null` when the key holds
/// no observations.
pub async fn latest<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SeriesParams>,
) -> Result<Json<Option<SeriesPoint>>, ApiError>
where
  S: SeriesStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let metric_id = store
    .resolve_metric(&params.metric)
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  let country = match params.country.as_deref() {
    Some(code) => store
      .resolve_country(code)
      .await
      .map_err(|e| ApiError::from_store(Box::new(e)))?,
    None => CountryRef::Global,
  };

  let point = store
    .query_latest(country, metric_id)
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  Ok(Json(point))
}

/// JSON body accepted by `POST /observations`.
#[derive(Debug, Deserialize)]
pub struct PutObservationsBody {
  pub country: String,
  pub metric:  String,
  pub records: Vec<ObservationRecord>,
}

/// `POST /observations` — returns the insert/skip counts. Re-posting
/// overlapping data is safe by store contract.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PutObservationsBody>,
) -> Result<Json<InsertOutcome>, ApiError>
where
  S: SeriesStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let outcome = store
    .put_observations(&body.country, &body.metric, &body.records)
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  Ok(Json(outcome))
}
