//! Metric identity.

use serde::{Deserialize, Serialize};

/// Whether a metric is keyed per country or is inherently global.
///
/// Set explicitly at registration; never inferred from the metric name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricScope {
  Global,
  Country,
}

/// A registered metric. Created once at setup, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
  pub metric_id: i64,
  /// Unique human-readable name, e.g. `"policy interest rate"`.
  pub name:      String,
  /// Display unit; may be the empty string.
  pub unit:      String,
  pub scope:     MetricScope,
}

/// Input for [`SeriesStore::register_metric`](crate::store::SeriesStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMetric {
  pub name:  String,
  pub unit:  String,
  pub scope: MetricScope,
}
