//! Embedded reference data.

pub mod doppler;

pub use doppler::{MAX_WEEK, MIN_WEEK, PercentileTable};
