//! The calculator core shared by the CLI and TUI front-ends.
//!
//! - `view`: derive EDD, gestational age and the percentile row from an LMP
//! - `form`: keep the date and gestational-age controls consistent

pub mod form;
pub mod view;

pub use form::{DatingForm, GaTextOutcome, parse_week};
pub use view::{DatingView, derive_view};
