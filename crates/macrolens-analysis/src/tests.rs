//! Tests for alignment and rolling correlation.

use chrono::NaiveDate;
use macrolens_core::series::{Series, SeriesPoint};

use crate::{
  AlignStrategy, CorrelationPoint, align_all, align_monthly, month_start,
  rolling_correlation,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series(label: &str, points: &[(i32, u32, u32, f64)]) -> Series {
  Series::new(
    label,
    points
      .iter()
      .map(|&(y, m, day, value)| SeriesPoint { date: d(y, m, day), value })
      .collect(),
  )
}

fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

// ─── Strategy inference ──────────────────────────────────────────────────────

#[test]
fn infer_daily_gaps_as_daily_mean() {
  let s = series("rate", &[
    (2021, 1, 4, 0.1),
    (2021, 1, 5, 0.1),
    (2021, 1, 6, 0.1),
    (2021, 1, 20, 0.25), // one policy jump, still a daily series
    (2021, 1, 21, 0.25),
  ]);
  assert_eq!(AlignStrategy::infer(&s), AlignStrategy::DailyMean);
}

#[test]
fn infer_monthly_gaps_as_forward_fill() {
  let s = series("index", &[
    (2021, 1, 1, 100.0),
    (2021, 2, 1, 101.0),
    (2021, 3, 1, 102.0),
  ]);
  assert_eq!(AlignStrategy::infer(&s), AlignStrategy::ForwardFill);
}

#[test]
fn infer_single_point_falls_back_to_forward_fill() {
  let s = series("one", &[(2021, 1, 1, 1.0)]);
  assert_eq!(AlignStrategy::infer(&s), AlignStrategy::ForwardFill);
}

// ─── Daily forward-fill + monthly mean ───────────────────────────────────────

#[test]
fn daily_mean_january_is_flat_february_blends() {
  let s = series("UK rate", &[(2021, 1, 5, 1.0), (2021, 2, 10, 2.0)]);
  let aligned = align_monthly(&s, AlignStrategy::DailyMean);

  // January: 1.0 repeated from the 5th to the 31st — mean exactly 1.0.
  let jan = aligned.value_at(d(2021, 1, 1)).unwrap();
  assert!(approx(jan, 1.0));

  // February: nine days at 1.0, then 2.0 from the 10th — a blended mean.
  let feb = aligned.value_at(d(2021, 2, 1)).unwrap();
  assert!(feb > 1.0 && feb < 2.0);
  assert!(approx(feb, (9.0 * 1.0 + 1.0 * 2.0) / 10.0));

  // The grid ends at the last observation's month.
  assert_eq!(aligned.len(), 2);
}

#[test]
fn daily_mean_does_not_back_fill_before_first_observation() {
  let s = series("rate", &[(2021, 3, 15, 4.0)]);
  let aligned = align_monthly(&s, AlignStrategy::DailyMean);

  // Only March is defined; January and February never appear.
  assert_eq!(aligned.len(), 1);
  assert_eq!(aligned.first().unwrap().date, d(2021, 3, 1));
  assert!(approx(aligned.first().unwrap().value, 4.0));
}

// ─── Month-start forward-fill ────────────────────────────────────────────────

#[test]
fn quarterly_value_persists_across_covered_months() {
  let s = series("All Commodities", &[
    (2020, 1, 1, 5.0),
    (2020, 4, 1, 7.0),
  ]);
  let aligned = align_monthly(&s, AlignStrategy::ForwardFill);

  assert_eq!(aligned.value_at(d(2020, 1, 1)), Some(5.0));
  assert_eq!(aligned.value_at(d(2020, 2, 1)), Some(5.0));
  assert_eq!(aligned.value_at(d(2020, 3, 1)), Some(5.0));
  assert_eq!(aligned.value_at(d(2020, 4, 1)), Some(7.0));
  assert_eq!(aligned.len(), 4);
}

#[test]
fn gapless_monthly_series_passes_through_unchanged() {
  let s = series("Energy", &[
    (2021, 1, 1, 100.0),
    (2021, 2, 1, 101.0),
    (2021, 3, 1, 99.5),
  ]);
  let aligned = align_monthly(&s, AlignStrategy::ForwardFill);

  assert_eq!(aligned.points(), s.points());
}

#[test]
fn forward_fill_crosses_year_boundary() {
  let s = series("idx", &[(2020, 11, 1, 1.0), (2021, 2, 1, 2.0)]);
  let aligned = align_monthly(&s, AlignStrategy::ForwardFill);

  let dates: Vec<_> = aligned.iter().map(|p| p.date).collect();
  assert_eq!(dates, vec![
    d(2020, 11, 1),
    d(2020, 12, 1),
    d(2021, 1, 1),
    d(2021, 2, 1),
  ]);
  assert_eq!(aligned.value_at(d(2021, 1, 1)), Some(1.0));
}

#[test]
fn empty_series_aligns_to_empty() {
  let s = Series::new("empty", Vec::new());
  assert!(align_monthly(&s, AlignStrategy::DailyMean).is_empty());
  assert!(align_monthly(&s, AlignStrategy::ForwardFill).is_empty());
}

#[test]
fn align_all_keys_by_label() {
  let out = align_all(vec![
    (series("US rate", &[(2021, 1, 5, 1.0)]), AlignStrategy::DailyMean),
    (series("Food", &[(2021, 1, 1, 90.0)]), AlignStrategy::ForwardFill),
  ]);

  assert_eq!(out.len(), 2);
  assert!(out["US rate"].iter().all(|p| p.date == month_start(p.date)));
  assert!(out["Food"].iter().all(|p| p.date == month_start(p.date)));
}

// ─── Rolling correlation ─────────────────────────────────────────────────────

fn monthly(label: &str, start: (i32, u32), values: &[f64]) -> Series {
  let first = d(start.0, start.1, 1);
  Series::new(
    label,
    values
      .iter()
      .enumerate()
      .map(|(i, &value)| SeriesPoint {
        date: first + chrono::Months::new(i as u32),
        value,
      })
      .collect(),
  )
}

#[test]
fn identical_series_correlate_at_one() {
  let a = monthly("a", (2021, 1), &[1.0, 2.0, 4.0, 3.0, 5.0, 6.0]);
  let b = monthly("b", (2021, 1), &[1.0, 2.0, 4.0, 3.0, 5.0, 6.0]);

  let corr = rolling_correlation(&a, &b, 3);
  assert_eq!(corr.len(), 6);

  // First window-1 positions are undefined.
  assert!(corr[0].coefficient.is_none());
  assert!(corr[1].coefficient.is_none());
  for point in &corr[2..] {
    assert!(approx(point.coefficient.unwrap(), 1.0));
  }
}

#[test]
fn negated_series_correlate_at_minus_one() {
  let a = monthly("a", (2021, 1), &[1.0, 2.0, 4.0, 3.0, 5.0]);
  let b = monthly("b", (2021, 1), &[-1.0, -2.0, -4.0, -3.0, -5.0]);

  let corr = rolling_correlation(&a, &b, 3);
  for point in &corr[2..] {
    assert!(approx(point.coefficient.unwrap(), -1.0));
  }
}

#[test]
fn zero_variance_window_is_undefined_not_a_failure() {
  let a = monthly("a", (2021, 1), &[2.0, 2.0, 2.0, 2.0]);
  let b = monthly("b", (2021, 1), &[1.0, 2.0, 3.0, 4.0]);

  let corr = rolling_correlation(&a, &b, 3);
  assert!(corr.iter().all(|p| p.coefficient.is_none()));
}

#[test]
fn correlation_uses_only_shared_dates() {
  let a = monthly("a", (2021, 1), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
  let b = monthly("b", (2021, 4), &[4.0, 5.0, 6.0]);

  let corr = rolling_correlation(&a, &b, 3);
  // Shared axis: April through June.
  assert_eq!(corr.len(), 3);
  assert_eq!(corr[0].date, d(2021, 4, 1));
  assert!(corr[0].coefficient.is_none());
  assert!(corr[1].coefficient.is_none());
  assert!(approx(corr[2].coefficient.unwrap(), 1.0));
}

#[test]
fn disjoint_series_yield_empty_result() {
  let a = monthly("a", (2020, 1), &[1.0, 2.0]);
  let b = monthly("b", (2021, 1), &[1.0, 2.0]);
  assert!(rolling_correlation(&a, &b, 2).is_empty());
}

#[test]
fn zero_window_yields_empty_result() {
  let a = monthly("a", (2021, 1), &[1.0, 2.0]);
  assert!(rolling_correlation(&a, &a, 0).is_empty());
}

#[test]
fn correlation_point_serializes_undefined_as_null() {
  let point = CorrelationPoint { date: d(2021, 1, 1), coefficient: None };
  let json = serde_json::to_value(point).unwrap();
  assert!(json["coefficient"].is_null());
}
