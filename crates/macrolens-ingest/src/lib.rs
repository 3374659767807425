//! CSV ingestion into a [`SeriesStore`].
//!
//! Providers deliver plain `date,value` lines. Malformed lines (unparseable
//! dates, non-numeric values, header rows) are rejected **individually** and
//! the rest of the batch proceeds — skip-and-continue, so a repeated
//! collection run keeps its idempotent partial-progress semantics. Every
//! rejection is logged at WARN and reported back to the caller.

use chrono::NaiveDate;
use macrolens_core::{
  Error, observation::ObservationRecord, store::SeriesStore,
};
use tracing::{info, warn};

/// Date formats accepted from providers: ISO, and the `20 Jan 25` style some
/// central-bank exports use.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %y"];

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// A line that failed to parse, with its 1-based position in the input.
#[derive(Debug)]
pub struct RejectedLine {
  pub line_no: usize,
  pub error:   Error,
}

/// Result of parsing one CSV payload.
#[derive(Debug, Default)]
pub struct ParseOutcome {
  pub records:  Vec<ObservationRecord>,
  pub rejected: Vec<RejectedLine>,
}

fn parse_date(token: &str) -> Option<NaiveDate> {
  DATE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Parse a single `date,value` line.
pub fn parse_record(line: &str) -> Result<ObservationRecord, Error> {
  let malformed = |reason: &str| Error::MalformedRecord {
    line:   line.to_owned(),
    reason: reason.to_owned(),
  };

  let (date_token, value_token) = line
    .split_once(',')
    .ok_or_else(|| malformed("expected `date,value`"))?;

  let date = parse_date(date_token.trim())
    .ok_or_else(|| malformed("unparseable date"))?;
  let value: f64 = value_token
    .trim()
    .parse()
    .map_err(|_| malformed("non-numeric value"))?;
  // "NaN" and "inf" parse as f64 but cannot be stored as REAL NOT NULL.
  if !value.is_finite() {
    return Err(malformed("non-finite value"));
  }

  Ok(ObservationRecord { date, value })
}

/// Parse a full payload, skipping blank lines and collecting rejects.
pub fn parse_records(text: &str) -> ParseOutcome {
  let mut outcome = ParseOutcome::default();

  for (idx, line) in text.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    match parse_record(line) {
      Ok(record) => outcome.records.push(record),
      Err(error) => {
        let line_no = idx + 1;
        warn!(line_no, %error, "rejecting malformed record");
        outcome.rejected.push(RejectedLine { line_no, error });
      }
    }
  }

  outcome
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Outcome of one CSV load: store counts plus parse rejections.
#[derive(Debug)]
pub struct LoadReport {
  pub inserted: usize,
  pub skipped:  usize,
  pub rejected: Vec<RejectedLine>,
}

/// Parse `text` and insert the well-formed records for one
/// (country, metric) key. Safe to call repeatedly with overlapping data —
/// duplicates are skipped by the store, never overwritten.
pub async fn load_csv<S: SeriesStore>(
  store: &S,
  country_code: &str,
  metric_name: &str,
  text: &str,
) -> Result<LoadReport, S::Error> {
  let ParseOutcome { records, rejected } = parse_records(text);

  let outcome = store
    .put_observations(country_code, metric_name, &records)
    .await?;

  info!(
    country_code,
    metric_name,
    inserted = outcome.inserted,
    skipped = outcome.skipped,
    rejected = rejected.len(),
    "loaded csv batch"
  );

  Ok(LoadReport {
    inserted: outcome.inserted,
    skipped:  outcome.skipped,
    rejected,
  })
}

#[cfg(test)]
mod tests;
