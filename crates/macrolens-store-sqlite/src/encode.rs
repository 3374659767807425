//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO `YYYY-MM-DD` strings. The country sentinel is
//! stored as the integer 0; real country ids start at 1.

use chrono::NaiveDate;
use macrolens_core::{
  country::{Country, CountryRef},
  metric::{Metric, MetricScope},
  source::Source,
};

use crate::{Error, Result};

/// Date column format. Lexicographic order on the encoded form must equal
/// chronological order.
pub const DATE_FMT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FMT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FMT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── CountryRef ──────────────────────────────────────────────────────────────

pub fn encode_country_ref(c: CountryRef) -> i64 {
  match c {
    CountryRef::Global => 0,
    CountryRef::Specific(id) => id,
  }
}

pub fn decode_country_ref(id: i64) -> CountryRef {
  if id == 0 { CountryRef::Global } else { CountryRef::Specific(id) }
}

// ─── MetricScope ─────────────────────────────────────────────────────────────

pub fn encode_scope(s: MetricScope) -> &'static str {
  match s {
    MetricScope::Global => "global",
    MetricScope::Country => "country",
  }
}

pub fn decode_scope(s: &str) -> Result<MetricScope> {
  match s {
    "global" => Ok(MetricScope::Global),
    "country" => Ok(MetricScope::Country),
    other => Err(Error::UnknownScope(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `countries` row.
pub struct RawCountry {
  pub country_id:    i64,
  pub code:          String,
  pub name:          String,
  pub currency_code: String,
}

impl RawCountry {
  pub fn into_country(self) -> Country {
    Country {
      country_id:    self.country_id,
      code:          self.code,
      name:          self.name,
      currency_code: self.currency_code,
    }
  }
}

/// Raw values read directly from a `metrics` row.
pub struct RawMetric {
  pub metric_id: i64,
  pub name:      String,
  pub unit:      String,
  pub scope:     String,
}

impl RawMetric {
  pub fn into_metric(self) -> Result<Metric> {
    Ok(Metric {
      metric_id: self.metric_id,
      name:      self.name,
      unit:      self.unit,
      scope:     decode_scope(&self.scope)?,
    })
  }
}

/// Raw values read directly from a `sources` row.
pub struct RawSource {
  pub source_id:  i64,
  pub country_id: i64,
  pub metric_id:  i64,
  pub name:       String,
  pub url:        Option<String>,
}

impl RawSource {
  pub fn into_source(self) -> Source {
    Source {
      source_id: self.source_id,
      country:   decode_country_ref(self.country_id),
      metric_id: self.metric_id,
      name:      self.name,
      url:       self.url,
    }
  }
}
