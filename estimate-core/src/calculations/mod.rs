//! Cost calculation for the construction estimate.
//!
//! [`estimate`] holds the calculator itself; [`currency`] turns its decimal
//! amounts into display text without touching the stored values.

pub mod common;
pub mod currency;
pub mod estimate;

pub use currency::{format_area, format_vnd};
pub use estimate::{ATTIC_COEFFICIENT, CONTINGENCY_RATE, compute};
