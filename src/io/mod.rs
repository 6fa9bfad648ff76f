//! Input/output helpers.
//!
//! - JSON rendering and file export of dating views (`export`)

pub mod export;

pub use export::*;
