//! Provenance of a (country, metric) series.

use serde::{Deserialize, Serialize};

use crate::country::CountryRef;

/// Where the observations for one (country, metric) pair come from.
/// At most one source record exists per pair (UNIQUE at the storage layer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
  pub source_id: i64,
  pub country:   CountryRef,
  pub metric_id: i64,
  pub name:      String,
  pub url:       Option<String>,
}

/// Input for [`SeriesStore::register_source`](crate::store::SeriesStore).
/// Country and metric are given by name and resolved at registration time;
/// unknown names fail loudly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSource {
  pub country_code: String,
  pub metric_name:  String,
  pub name:         String,
  pub url:          Option<String>,
}
