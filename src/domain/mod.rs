//! Domain types used throughout the calculator.
//!
//! This module defines:
//!
//! - calendar-day newtypes (`LmpDate`, `ReferenceDate`) and their parse error
//! - derived gestational age (`GestationalAge`)
//! - Doppler reference values (`Vessel`, `VesselPercentiles`, `PercentileRow`)

pub mod date;
pub mod types;

pub use date::*;
pub use types::*;
