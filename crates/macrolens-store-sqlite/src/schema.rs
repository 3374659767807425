//! SQL schema for the macrolens SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The global scope is encoded as `country_id = 0` (real ids start at 1 via
/// AUTOINCREMENT). SQLite treats NULLs as distinct in UNIQUE constraints, so
/// a NULL country column could not carry the per-key uniqueness invariant.
///
/// Observation dates are ISO `YYYY-MM-DD` TEXT: lexicographic order equals
/// chronological order, which range and latest queries rely on.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS countries (
    country_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    code          TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    currency_code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS metrics (
    metric_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT NOT NULL UNIQUE,
    unit      TEXT NOT NULL DEFAULT '',
    scope     TEXT NOT NULL    -- 'global' | 'country'
);

-- At most one provenance record per (country, metric) pair.
CREATE TABLE IF NOT EXISTS sources (
    source_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id INTEGER NOT NULL,    -- 0 = global
    metric_id  INTEGER NOT NULL REFERENCES metrics(metric_id),
    name       TEXT NOT NULL,
    url        TEXT,
    UNIQUE (country_id, metric_id)
);

-- Observations are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS observations (
    observation_id INTEGER PRIMARY KEY AUTOINCREMENT,
    country_id     INTEGER NOT NULL,    -- 0 = global
    metric_id      INTEGER NOT NULL REFERENCES metrics(metric_id),
    date           TEXT NOT NULL,       -- ISO YYYY-MM-DD
    value          REAL NOT NULL,
    UNIQUE (country_id, metric_id, date)
);

CREATE INDEX IF NOT EXISTS observations_metric_idx ON observations(metric_id);

PRAGMA user_version = 1;
";
