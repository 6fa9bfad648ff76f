//! `obtools` library crate.
//!
//! Pregnancy dating (LMP ⇄ EDD ⇄ gestational age) and Doppler percentile
//! lookup. The binary (`ob`) is a thin wrapper around this library so that:
//!
//! - the dating core is testable without spawning processes
//! - the CLI and the TUI share one form implementation
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod data;
pub mod dating;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod tui;
