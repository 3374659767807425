//! JSON query API for macrolens.
//!
//! Exposes an axum [`Router`] backed by any
//! [`macrolens_core::store::SeriesStore`]. Transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", macrolens_api::api_router(store.clone()))
//! ```

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod observations;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use macrolens_core::{
  country::NewCountry, metric::NewMetric, source::NewSource,
  store::SeriesStore,
};
use serde::Deserialize;

pub use error::ApiError;


// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
///
/// The `countries` / `metrics` / `sources` lists are the setup-time identity
/// registry: they are applied once at startup and registration is idempotent,
/// so restarting against an existing store is a no-op.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,

  #[serde(default)]
  pub countries:  Vec<NewCountry>,
  #[serde(default)]
  pub metrics:    Vec<NewMetric>,
  #[serde(default)]
  pub sources:    Vec<NewSource>,
}

/// Apply the configured registry entries. Sources are registered last so
/// their country/metric references resolve; an unknown name in a source
/// entry fails loudly here rather than surfacing later during ingestion.
pub async fn seed_registry<S: SeriesStore>(
  store: &S,
  config: &ServerConfig,
) -> Result<(), S::Error> {
  for country in &config.countries {
    let registered = store.register_country(country.clone()).await?;
    tracing::debug!(code = %registered.code, "registered country");
  }
  for metric in &config.metrics {
    let registered = store.register_metric(metric.clone()).await?;
    tracing::debug!(name = %registered.name, "registered metric");
  }
  for source in &config.sources {
    store.register_source(source.clone()).await?;
  }
  Ok(())
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SeriesStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Registry listings
    .route("/countries", get(catalog::countries::<S>))
    .route("/metrics", get(catalog::metrics::<S>))
    // Series
    .route("/series", get(observations::series::<S>))
    .route("/series/latest", get(observations::latest::<S>))
    .route("/observations", post(observations::create::<S>))
    // Analysis
    .route("/correlation", get(analysis::correlation::<S>))
    .with_state(store)
}
