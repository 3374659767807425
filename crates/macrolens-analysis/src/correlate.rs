//! Rolling Pearson correlation between two aligned series.

use chrono::NaiveDate;
use macrolens_core::series::Series;
use serde::{Deserialize, Serialize};

/// Variance below this is treated as zero (the coefficient is undefined).
const VARIANCE_FLOOR: f64 = 1e-12;

/// One point of a rolling-correlation result. `coefficient` is `None` where
/// the statistic is undefined: fewer than `window` trailing paired values, or
/// zero variance on either side of the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
  pub date:        NaiveDate,
  pub coefficient: Option<f64>,
}

/// Rolling-window Pearson correlation over the dates both series define.
///
/// The two series are inner-joined on date first; the window then slides
/// over the paired values, so a date only contributes where both sides have
/// data. Undefined positions carry `None` — they propagate into the result
/// sequence rather than aborting it, so a consumer can gap them visually.
pub fn rolling_correlation(
  a: &Series,
  b: &Series,
  window: usize,
) -> Vec<CorrelationPoint> {
  if window == 0 {
    return Vec::new();
  }

  let paired = inner_join(a, b);

  paired
    .iter()
    .enumerate()
    .map(|(i, &(date, _, _))| {
      let coefficient = if i + 1 < window {
        None
      } else {
        pearson(&paired[i + 1 - window..=i])
      };
      CorrelationPoint { date, coefficient }
    })
    .collect()
}

/// Merge-join two date-sorted series on equal dates.
fn inner_join(a: &Series, b: &Series) -> Vec<(NaiveDate, f64, f64)> {
  let (pa, pb) = (a.points(), b.points());
  let mut out = Vec::with_capacity(pa.len().min(pb.len()));
  let (mut i, mut j) = (0usize, 0usize);

  while i < pa.len() && j < pb.len() {
    match pa[i].date.cmp(&pb[j].date) {
      std::cmp::Ordering::Less => i += 1,
      std::cmp::Ordering::Greater => j += 1,
      std::cmp::Ordering::Equal => {
        out.push((pa[i].date, pa[i].value, pb[j].value));
        i += 1;
        j += 1;
      }
    }
  }
  out
}

/// Pearson coefficient over one window of paired values, clamped to [-1, 1].
/// `None` when either side has (numerically) zero variance.
fn pearson(pairs: &[(NaiveDate, f64, f64)]) -> Option<f64> {
  let n = pairs.len() as f64;
  let mean_a = pairs.iter().map(|p| p.1).sum::<f64>() / n;
  let mean_b = pairs.iter().map(|p| p.2).sum::<f64>() / n;

  let mut cov = 0.0;
  let mut var_a = 0.0;
  let mut var_b = 0.0;
  for &(_, x, y) in pairs {
    let (dx, dy) = (x - mean_a, y - mean_b);
    cov += dx * dy;
    var_a += dx * dx;
    var_b += dy * dy;
  }

  if var_a < VARIANCE_FLOOR || var_b < VARIANCE_FLOOR {
    return None;
  }
  Some((cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0))
}
