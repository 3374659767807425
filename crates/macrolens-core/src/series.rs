//! The materialised, date-ordered series — never stored, always derived.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated value inside a [`Series`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
  pub date:  NaiveDate,
  pub value: f64,
}

/// A dense, date-indexed sequence of values for one (metric, country?) pair.
///
/// Points are strictly increasing by date. The store's uniqueness invariant
/// guarantees no duplicate dates can reach a series, so construction only
/// needs to sort — it must not assume the rows arrived ordered.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
  label:  String,
  points: Vec<SeriesPoint>,
}

// Field-wise deserialization would bypass the sort in `new`, so the impl
// funnels through it.
impl<'de> Deserialize<'de> for Series {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    #[derive(Deserialize)]
    struct Raw {
      label:  String,
      points: Vec<SeriesPoint>,
    }

    let raw = Raw::deserialize(deserializer)?;
    Ok(Self::new(raw.label, raw.points))
  }
}

impl Series {
  pub fn new(label: impl Into<String>, mut points: Vec<SeriesPoint>) -> Self {
    points.sort_by_key(|p| p.date);
    Self { label: label.into(), points }
  }

  pub fn label(&self) -> &str { &self.label }

  pub fn points(&self) -> &[SeriesPoint] { &self.points }

  pub fn len(&self) -> usize { self.points.len() }

  pub fn is_empty(&self) -> bool { self.points.is_empty() }

  pub fn first(&self) -> Option<&SeriesPoint> { self.points.first() }

  pub fn last(&self) -> Option<&SeriesPoint> { self.points.last() }

  pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
    self.points.iter()
  }

  /// The value at an exact date, if one exists.
  pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
    self
      .points
      .binary_search_by_key(&date, |p| p.date)
      .ok()
      .map(|i| self.points[i].value)
  }
}
