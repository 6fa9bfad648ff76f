//! Reporting utilities: terminal summaries and the reference table listing.

pub mod format;

pub use format::{DISCLAIMER, NO_DATA, fmt_pi, format_summary, format_table, format_vessel_line};
