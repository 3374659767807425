//! Error type for `macrolens-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] macrolens_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("unknown metric scope: {0:?}")]
  UnknownScope(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
