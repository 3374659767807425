//! Resampling heterogeneous-frequency series onto a common month-start grid.
//!
//! Policy rate series are irregular and fine-grained (observations cluster on
//! days the rate moved), while index series arrive monthly or quarterly. The
//! comparison grid is month starts, end to end:
//!
//! - [`AlignStrategy::DailyMean`] reindexes to a daily grid over the series'
//!   own min..max range, forward-fills each day, then takes the arithmetic
//!   mean per month.
//! - [`AlignStrategy::ForwardFill`] buckets observations to month starts and
//!   carries the last known value across empty months (identity for gapless
//!   monthly input).
//!
//! Neither strategy extrapolates outside the series' observed bounds, and
//! gaps before the first observation stay undefined.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use macrolens_core::series::{Series, SeriesPoint};
use serde::{Deserialize, Serialize};

// ─── Month-start grid ────────────────────────────────────────────────────────

/// First calendar day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
  date.with_day(1).unwrap_or(date)
}

fn next_month(date: NaiveDate) -> NaiveDate {
  let (year, month) = if date.month() == 12 {
    (date.year() + 1, 1)
  } else {
    (date.year(), date.month() + 1)
  };
  NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

// ─── Strategy ────────────────────────────────────────────────────────────────

/// How a series is brought onto the month-start grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignStrategy {
  /// Daily forward-fill, then month-start arithmetic mean. For irregular
  /// fine-grained series such as policy rates.
  DailyMean,
  /// Month-start forward-fill, no smoothing. For monthly and coarser series
  /// such as quarterly indices.
  ForwardFill,
}

impl AlignStrategy {
  /// Pick a strategy from the series' native cadence: the lower median of
  /// positive day gaps between adjacent observations. A week or less reads
  /// as a fine-grained series; anything coarser is carried forward as-is.
  pub fn infer(series: &Series) -> Self {
    let points = series.points();
    let mut gaps: Vec<i64> = points
      .windows(2)
      .map(|w| (w[1].date - w[0].date).num_days())
      .filter(|&g| g > 0)
      .collect();
    if gaps.is_empty() {
      return Self::ForwardFill;
    }
    gaps.sort_unstable();
    let lower_median = gaps[(gaps.len() - 1) / 2];
    if lower_median <= 7 { Self::DailyMean } else { Self::ForwardFill }
  }
}

// ─── Alignment ───────────────────────────────────────────────────────────────

/// Resample one series onto the month-start grid with the given strategy.
pub fn align_monthly(series: &Series, strategy: AlignStrategy) -> Series {
  match strategy {
    AlignStrategy::DailyMean => monthly_mean(&daily_fill(series)),
    AlignStrategy::ForwardFill => monthly_fill(series),
  }
}

/// Batch entry point: align every series and key the result by label.
/// All outputs share the month-start date axis; each remains defined only
/// over its own observed range.
pub fn align_all(
  series: impl IntoIterator<Item = (Series, AlignStrategy)>,
) -> BTreeMap<String, Series> {
  series
    .into_iter()
    .map(|(s, strategy)| {
      let aligned = align_monthly(&s, strategy);
      (s.label().to_owned(), aligned)
    })
    .collect()
}

/// Reindex to a dense daily grid spanning the series' own min..max range,
/// carrying the most recent known value forward. The grid starts at the
/// first observation, so nothing is back-filled.
fn daily_fill(series: &Series) -> Series {
  let points = series.points();
  let (Some(first), Some(last)) = (series.first(), series.last()) else {
    return Series::new(series.label(), Vec::new());
  };

  let mut filled = Vec::new();
  let mut idx = 0usize;
  let mut value = first.value;

  let mut day = first.date;
  while day <= last.date {
    while idx < points.len() && points[idx].date <= day {
      value = points[idx].value;
      idx += 1;
    }
    filled.push(SeriesPoint { date: day, value });
    match day.succ_opt() {
      Some(next) => day = next,
      None => break,
    }
  }

  Series::new(series.label(), filled)
}

/// Aggregate a dense daily series to month-start buckets by arithmetic mean.
fn monthly_mean(daily: &Series) -> Series {
  let mut out: Vec<SeriesPoint> = Vec::new();
  let mut bucket: Option<(NaiveDate, f64, u32)> = None;

  for point in daily.iter() {
    let month = month_start(point.date);
    if let Some((current, sum, count)) = &mut bucket
      && *current == month
    {
      *sum += point.value;
      *count += 1;
      continue;
    }
    if let Some((date, sum, count)) = bucket.take() {
      out.push(SeriesPoint { date, value: sum / f64::from(count) });
    }
    bucket = Some((month, point.value, 1));
  }
  if let Some((date, sum, count)) = bucket {
    out.push(SeriesPoint { date, value: sum / f64::from(count) });
  }

  Series::new(daily.label(), out)
}

/// Bucket observations to month starts (last observation in a month wins,
/// which cannot happen for well-formed monthly input) and forward-fill the
/// empty months in between. No interpolation across the gap.
fn monthly_fill(series: &Series) -> Series {
  let (Some(first), Some(last)) = (series.first(), series.last()) else {
    return Series::new(series.label(), Vec::new());
  };

  let mut by_month: BTreeMap<NaiveDate, f64> = BTreeMap::new();
  for point in series.iter() {
    by_month.insert(month_start(point.date), point.value);
  }

  let mut out = Vec::new();
  let mut value = first.value;
  let mut month = month_start(first.date);
  let end = month_start(last.date);

  while month <= end {
    if let Some(&v) = by_month.get(&month) {
      value = v;
    }
    out.push(SeriesPoint { date: month, value });
    month = next_month(month);
  }

  Series::new(series.label(), out)
}
