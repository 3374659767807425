//! The `SeriesStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `macrolens-store-sqlite`). Higher layers (`macrolens-api`,
//! `macrolens-ingest`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  country::{Country, CountryRef, NewCountry},
  metric::{Metric, NewMetric},
  observation::{InsertOutcome, ObservationRecord},
  series::{Series, SeriesPoint},
  source::{NewSource, Source},
};

/// Abstraction over a macrolens time-series store backend.
///
/// Countries, metrics and sources are registered once at setup and never
/// mutated. Observation writes are insert-if-absent on the
/// (country, metric, date) key, so repeated collection runs are idempotent.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SeriesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identity registry — setup-time writes ─────────────────────────────

  /// Register a country, or return the existing row if the code is already
  /// registered. Idempotent.
  fn register_country(
    &self,
    input: NewCountry,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  /// Register a metric, or return the existing row for the name. Idempotent.
  fn register_metric(
    &self,
    input: NewMetric,
  ) -> impl Future<Output = Result<Metric, Self::Error>> + Send + '_;

  /// Register the provenance record for one (country, metric) pair.
  ///
  /// Resolves the country code and metric name first; unknown names are an
  /// error. At most one source exists per pair — re-registration returns
  /// the existing row.
  fn register_source(
    &self,
    input: NewSource,
  ) -> impl Future<Output = Result<Source, Self::Error>> + Send + '_;

  // ── Identity registry — resolution ────────────────────────────────────

  /// Resolve a country code to a [`CountryRef`].
  ///
  /// The reserved code [`GLOBAL_CODE`](crate::country::GLOBAL_CODE) resolves
  /// to [`CountryRef::Global`] without a lookup; any other unregistered code
  /// is an error, never silently defaulted.
  fn resolve_country<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<CountryRef, Self::Error>> + Send + 'a;

  /// Resolve a metric name to its id. Unregistered names are an error.
  fn resolve_metric<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + 'a;

  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  fn list_metrics(
    &self,
  ) -> impl Future<Output = Result<Vec<Metric>, Self::Error>> + Send + '_;

  /// Display unit for a metric (may be empty).
  fn metric_unit<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  // ── Observations — append-only writes ─────────────────────────────────

  /// Insert a batch of records under insert-if-absent semantics.
  ///
  /// Identifiers are resolved through the registry first. Records whose
  /// (country, metric, date) key already exists are silently skipped and
  /// counted in [`InsertOutcome::skipped`]; partial overlap with earlier
  /// batches is the intended retry behavior, not an error.
  fn put_observations<'a>(
    &'a self,
    country_code: &'a str,
    metric_name: &'a str,
    records: &'a [ObservationRecord],
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All observations for a (country, metric) key, ascending by date.
  ///
  /// [`CountryRef::Global`] matches only sentinel-keyed rows, never
  /// "any country".
  fn query_range(
    &self,
    country: CountryRef,
    metric_id: i64,
  ) -> impl Future<Output = Result<Vec<SeriesPoint>, Self::Error>> + Send + '_;

  /// The observation with the maximum date for a key, if any.
  fn query_latest(
    &self,
    country: CountryRef,
    metric_id: i64,
  ) -> impl Future<Output = Result<Option<SeriesPoint>, Self::Error>> + Send + '_;

  /// Materialise the full [`Series`] for a metric.
  ///
  /// A missing `country_code` means the global scope. The materialiser
  /// sorts by date itself rather than assuming the backend returned ordered
  /// rows. An unknown key with no observations yields an empty series.
  fn materialize<'a>(
    &'a self,
    metric_name: &'a str,
    country_code: Option<&'a str>,
  ) -> impl Future<Output = Result<Series, Self::Error>> + Send + 'a;
}
