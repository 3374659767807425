//! Error types for `macrolens-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A country code was never registered. The reserved code
  /// [`GLOBAL_CODE`](crate::country::GLOBAL_CODE) never produces this.
  #[error("country not registered: {0:?}")]
  CountryNotFound(String),

  #[error("metric not registered: {0:?}")]
  MetricNotFound(String),

  /// An ingested record could not be parsed. The ingestion layer rejects the
  /// offending record and continues with the rest of the batch.
  #[error("malformed record {line:?}: {reason}")]
  MalformedRecord { line: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
