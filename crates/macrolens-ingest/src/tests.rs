//! Tests for CSV parsing and loading.

use chrono::NaiveDate;
use macrolens_core::{
  country::NewCountry,
  metric::{MetricScope, NewMetric},
  store::SeriesStore,
};
use macrolens_store_sqlite::SqliteStore;

use crate::{load_csv, parse_record, parse_records};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn parses_iso_lines() {
  let record = parse_record("2021-01-05, 0.1").unwrap();
  assert_eq!(record.date, d(2021, 1, 5));
  assert_eq!(record.value, 0.1);
}

#[test]
fn parses_bank_export_dates() {
  let record = parse_record("20 Jan 25,4.75").unwrap();
  assert_eq!(record.date, d(2025, 1, 20));
  assert_eq!(record.value, 4.75);
}

#[test]
fn rejects_malformed_lines_and_continues() {
  let text = "DATE,DFF\n2021-01-05,0.1\nnot-a-date,1.0\n2021-01-06,.\n\n2021-01-07,0.2\n";
  let outcome = parse_records(text);

  // Header, bad date and bad value are rejected; good lines survive.
  assert_eq!(outcome.records.len(), 2);
  assert_eq!(outcome.rejected.len(), 3);
  let line_nos: Vec<_> = outcome.rejected.iter().map(|r| r.line_no).collect();
  assert_eq!(line_nos, vec![1, 3, 4]);
}

#[test]
fn header_value_rejects_as_non_numeric() {
  // "DATE,DFF" splits fine but neither token parses.
  let err = parse_record("DATE,DFF").unwrap_err();
  assert!(matches!(err, macrolens_core::Error::MalformedRecord { .. }));
}

#[test]
fn rejects_non_finite_values() {
  for line in ["2021-01-05,NaN", "2021-01-05,inf", "2021-01-05,-inf"] {
    let err = parse_record(line).unwrap_err();
    assert!(matches!(err, macrolens_core::Error::MalformedRecord { .. }));
  }
}

#[test]
fn missing_comma_rejects() {
  let err = parse_record("2021-01-05 0.1").unwrap_err();
  assert!(matches!(err, macrolens_core::Error::MalformedRecord { .. }));
}

// ─── Loading ─────────────────────────────────────────────────────────────────

async fn seeded_store() -> SqliteStore {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store
    .register_country(NewCountry {
      code:          "UK".into(),
      name:          "United Kingdom".into(),
      currency_code: "GBP".into(),
    })
    .await
    .unwrap();
  store
    .register_metric(NewMetric {
      name:  "policy interest rate".into(),
      unit:  "%".into(),
      scope: MetricScope::Country,
    })
    .await
    .unwrap();
  store
}

#[tokio::test]
async fn load_csv_reports_all_three_counts() {
  let store = seeded_store().await;
  let text = "2021-01-05,0.1\ngarbage line\n2021-01-06,0.25\n";

  let report = load_csv(&store, "UK", "policy interest rate", text)
    .await
    .unwrap();
  assert_eq!(report.inserted, 2);
  assert_eq!(report.skipped, 0);
  assert_eq!(report.rejected.len(), 1);

  // Overlapping rerun: nothing new, everything skipped.
  let rerun = load_csv(&store, "UK", "policy interest rate", text)
    .await
    .unwrap();
  assert_eq!(rerun.inserted, 0);
  assert_eq!(rerun.skipped, 2);
}

#[tokio::test]
async fn load_csv_unknown_metric_fails_loudly() {
  let store = seeded_store().await;
  let result = load_csv(&store, "UK", "never registered", "2021-01-05,0.1").await;
  assert!(result.is_err());
}
