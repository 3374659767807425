//! Core types and trait definitions for the macrolens time-series store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod country;
pub mod error;
pub mod metric;
pub mod observation;
pub mod series;
pub mod source;
pub mod store;

pub use error::{Error, Result};
