//! Handler for the rolling-correlation endpoint.

use std::sync::Arc;

use axum::{Json, extract::{Query, State}};
use macrolens_analysis::{
  AlignStrategy, CorrelationPoint, align_monthly, rolling_correlation,
};
use macrolens_core::store::SeriesStore;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

fn default_window() -> usize { 36 }

#[derive(Debug, Deserialize)]
pub struct CorrelationParams {
  /// Country-scoped metric, e.g. the policy rate.
  pub rate_metric:  String,
  pub rate_country: String,
  /// Global metric, e.g. a commodity index.
  pub index_metric: String,
  /// Trailing window length in months.
  #[serde(default = "default_window")]
  pub window:       usize,
}

#[derive(Debug, Serialize)]
pub struct CorrelationResponse {
  pub rate_label:  String,
  pub index_label: String,
  pub window:      usize,
  pub points:      Vec<CorrelationPoint>,
}

/// `GET /correlation?rate_metric=..&rate_country=..&index_metric=..[&window=..]`
///
/// The rate series gets the daily-fill/monthly-mean treatment; the index
/// series is carried onto the month grid by forward-fill. Undefined window
/// positions come back as `null` coefficients for the caller to gap.
pub async fn correlation<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<CorrelationParams>,
) -> Result<Json<CorrelationResponse>, ApiError>
where
  S: SeriesStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if params.window == 0 {
    return Err(ApiError::BadRequest("window must be at least 1".into()));
  }

  let rate = store
    .materialize(&params.rate_metric, Some(&params.rate_country))
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;
  let index = store
    .materialize(&params.index_metric, None)
    .await
    .map_err(|e| ApiError::from_store(Box::new(e)))?;

  let rate_aligned = align_monthly(&rate, AlignStrategy::DailyMean);
  let index_aligned = align_monthly(&index, AlignStrategy::ForwardFill);

  let points = rolling_correlation(&rate_aligned, &index_aligned, params.window);

  Ok(Json(CorrelationResponse {
    rate_label:  rate.label().to_owned(),
    index_label: index.label().to_owned(),
    window:      params.window,
    points,
  }))
}
