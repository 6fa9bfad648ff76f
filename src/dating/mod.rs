//! LMP ⇄ EDD ⇄ gestational-age conversions.
//!
//! Everything here is pure day-granularity arithmetic on calendar dates.

pub mod convert;

pub use convert::*;
