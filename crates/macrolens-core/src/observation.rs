//! Observations — the append-only (country?, metric, date, value) rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::country::CountryRef;

/// One persisted data point. At most one exists per (country, metric, date)
/// triple; re-ingesting an existing key is a silent no-op, never an
/// overwrite. No update or delete path exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
  pub observation_id: i64,
  pub country:        CountryRef,
  pub metric_id:      i64,
  pub date:           NaiveDate,
  pub value:          f64,
}

/// A (date, value) pair as supplied by an ingestion collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
  pub date:  NaiveDate,
  pub value: f64,
}

/// Result of a batch insert. `skipped` counts records whose key was already
/// present — expected on repeated collection runs, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertOutcome {
  pub inserted: usize,
  pub skipped:  usize,
}
