//! Frequency alignment and rolling statistics over materialised series.
//!
//! Everything here is pure computation on [`macrolens_core::series::Series`]:
//! no storage, no I/O. Undefined statistics (short or zero-variance windows)
//! are absent values in the result, never errors.

pub mod align;
pub mod correlate;

pub use align::{AlignStrategy, align_all, align_monthly, month_start};
pub use correlate::{CorrelationPoint, rolling_correlation};

#[cfg(test)]
mod tests;
