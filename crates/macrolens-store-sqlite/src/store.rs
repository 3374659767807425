//! [`SqliteStore`] — the SQLite implementation of [`SeriesStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use macrolens_core::{
  country::{Country, CountryRef, GLOBAL_CODE, NewCountry},
  metric::{Metric, NewMetric},
  observation::{InsertOutcome, ObservationRecord},
  series::{Series, SeriesPoint},
  source::{NewSource, Source},
  store::SeriesStore,
};

use crate::{
  Error, Result,
  encode::{
    RawCountry, RawMetric, RawSource, decode_date, encode_country_ref,
    encode_date, encode_scope,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A macrolens time-series store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All writes
/// funnel through one connection, matching the single-writer assumption of
/// the ingestion model.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Look up a country row by code.
  async fn country_by_code(&self, code: &str) -> Result<Option<Country>> {
    let code = code.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, code, name, currency_code
               FROM countries WHERE code = ?1",
              rusqlite::params![code],
              |row| {
                Ok(RawCountry {
                  country_id:    row.get(0)?,
                  code:          row.get(1)?,
                  name:          row.get(2)?,
                  currency_code: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawCountry::into_country))
  }

  /// Look up a metric row by name.
  async fn metric_by_name(&self, name: &str) -> Result<Option<Metric>> {
    let name = name.to_owned();

    let raw: Option<RawMetric> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT metric_id, name, unit, scope
               FROM metrics WHERE name = ?1",
              rusqlite::params![name],
              |row| {
                Ok(RawMetric {
                  metric_id: row.get(0)?,
                  name:      row.get(1)?,
                  unit:      row.get(2)?,
                  scope:     row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMetric::into_metric).transpose()
  }
}

// ─── SeriesStore impl ────────────────────────────────────────────────────────

impl SeriesStore for SqliteStore {
  type Error = Error;

  // ── Identity registry — setup-time writes ─────────────────────────────────

  async fn register_country(&self, input: NewCountry) -> Result<Country> {
    let code     = input.code.clone();
    let name     = input.name;
    let currency = input.currency_code;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO countries (code, name, currency_code)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![code, name, currency],
        )?;
        Ok(())
      })
      .await?;

    self
      .country_by_code(&input.code)
      .await?
      .ok_or_else(|| Error::Core(macrolens_core::Error::CountryNotFound(input.code)))
  }

  async fn register_metric(&self, input: NewMetric) -> Result<Metric> {
    let name      = input.name.clone();
    let unit      = input.unit;
    let scope_str = encode_scope(input.scope).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO metrics (name, unit, scope)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![name, unit, scope_str],
        )?;
        Ok(())
      })
      .await?;

    self
      .metric_by_name(&input.name)
      .await?
      .ok_or_else(|| Error::Core(macrolens_core::Error::MetricNotFound(input.name)))
  }

  async fn register_source(&self, input: NewSource) -> Result<Source> {
    // Fail-fast: both names must already be registered.
    let country   = self.resolve_country(&input.country_code).await?;
    let metric_id = self.resolve_metric(&input.metric_name).await?;

    let country_id = encode_country_ref(country);
    let name       = input.name;
    let url        = input.url;

    let raw: RawSource = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO sources (country_id, metric_id, name, url)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![country_id, metric_id, name, url],
        )?;

        Ok(conn.query_row(
          "SELECT source_id, country_id, metric_id, name, url
           FROM sources WHERE country_id = ?1 AND metric_id = ?2",
          rusqlite::params![country_id, metric_id],
          |row| {
            Ok(RawSource {
              source_id:  row.get(0)?,
              country_id: row.get(1)?,
              metric_id:  row.get(2)?,
              name:       row.get(3)?,
              url:        row.get(4)?,
            })
          },
        )?)
      })
      .await?;

    Ok(raw.into_source())
  }

  // ── Identity registry — resolution ────────────────────────────────────────

  async fn resolve_country(&self, code: &str) -> Result<CountryRef> {
    // The reserved code is never looked up.
    if code == GLOBAL_CODE {
      return Ok(CountryRef::Global);
    }

    match self.country_by_code(code).await? {
      Some(c) => Ok(CountryRef::Specific(c.country_id)),
      None => {
        Err(Error::Core(macrolens_core::Error::CountryNotFound(code.to_owned())))
      }
    }
  }

  async fn resolve_metric(&self, name: &str) -> Result<i64> {
    match self.metric_by_name(name).await? {
      Some(m) => Ok(m.metric_id),
      None => {
        Err(Error::Core(macrolens_core::Error::MetricNotFound(name.to_owned())))
      }
    }
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT country_id, code, name, currency_code
           FROM countries ORDER BY code",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCountry {
              country_id:    row.get(0)?,
              code:          row.get(1)?,
              name:          row.get(2)?,
              currency_code: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawCountry::into_country).collect())
  }

  async fn list_metrics(&self) -> Result<Vec<Metric>> {
    let raws: Vec<RawMetric> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT metric_id, name, unit, scope FROM metrics ORDER BY metric_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawMetric {
              metric_id: row.get(0)?,
              name:      row.get(1)?,
              unit:      row.get(2)?,
              scope:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMetric::into_metric).collect()
  }

  async fn metric_unit(&self, name: &str) -> Result<String> {
    self
      .metric_by_name(name)
      .await?
      .map(|m| m.unit)
      .ok_or_else(|| Error::Core(macrolens_core::Error::MetricNotFound(name.to_owned())))
  }

  // ── Observations — append-only writes ─────────────────────────────────────

  async fn put_observations(
    &self,
    country_code: &str,
    metric_name: &str,
    records: &[ObservationRecord],
  ) -> Result<InsertOutcome> {
    let country   = self.resolve_country(country_code).await?;
    let metric_id = self.resolve_metric(metric_name).await?;

    let country_id = encode_country_ref(country);
    let encoded: Vec<(String, f64)> = records
      .iter()
      .map(|r| (encode_date(r.date), r.value))
      .collect();
    let total = encoded.len();

    let inserted: usize = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        {
          let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO observations (country_id, metric_id, date, value)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for (date, value) in &encoded {
            // execute() reports 0 changed rows when the key already exists.
            inserted += stmt
              .execute(rusqlite::params![country_id, metric_id, date, value])?;
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(InsertOutcome { inserted, skipped: total - inserted })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn query_range(
    &self,
    country: CountryRef,
    metric_id: i64,
  ) -> Result<Vec<SeriesPoint>> {
    let country_id = encode_country_ref(country);

    let rows: Vec<(String, f64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT date, value FROM observations
           WHERE country_id = ?1 AND metric_id = ?2
           ORDER BY date ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![country_id, metric_id], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(date, value)| Ok(SeriesPoint { date: decode_date(&date)?, value }))
      .collect()
  }

  async fn query_latest(
    &self,
    country: CountryRef,
    metric_id: i64,
  ) -> Result<Option<SeriesPoint>> {
    let country_id = encode_country_ref(country);

    let row: Option<(String, f64)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT date, value FROM observations
               WHERE country_id = ?1 AND metric_id = ?2
               ORDER BY date DESC LIMIT 1",
              rusqlite::params![country_id, metric_id],
              |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    row
      .map(|(date, value)| Ok(SeriesPoint { date: decode_date(&date)?, value }))
      .transpose()
  }

  async fn materialize(
    &self,
    metric_name: &str,
    country_code: Option<&str>,
  ) -> Result<Series> {
    let metric_id = self.resolve_metric(metric_name).await?;
    let country = match country_code {
      Some(code) => self.resolve_country(code).await?,
      None => CountryRef::Global,
    };

    let points = self.query_range(country, metric_id).await?;

    let label = match country_code {
      Some(code) => format!("{code} {metric_name}"),
      None => metric_name.to_owned(),
    };

    // Series::new re-sorts; the store's ORDER BY is not part of the contract
    // the materialiser leans on.
    Ok(Series::new(label, points))
  }
}
