//! Country identity and the global sentinel.
//!
//! Indices like commodity price baskets belong to no country at all. That
//! scope is a first-class variant of [`CountryRef`] rather than a magic
//! string, so it can never collide with a real country id.

use serde::{Deserialize, Serialize};

/// Reserved country code that always resolves to [`CountryRef::Global`]
/// without a registry lookup.
pub const GLOBAL_CODE: &str = "GLOBAL";

/// Reference to the country scope of a source or observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryRef {
  /// No specific country; used for inherently global metrics.
  Global,
  /// A registered country, by id. Real ids start at 1.
  Specific(i64),
}

impl CountryRef {
  pub fn is_global(self) -> bool { matches!(self, Self::Global) }
}

/// A registered country. Created once at setup, immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
  pub country_id:    i64,
  /// Short unique token, e.g. `"UK"`.
  pub code:          String,
  pub name:          String,
  pub currency_code: String,
}

/// Input for [`SeriesStore::register_country`](crate::store::SeriesStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCountry {
  pub code:          String,
  pub name:          String,
  pub currency_code: String,
}
