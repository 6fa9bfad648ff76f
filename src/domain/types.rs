//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the calculator and the front-ends by value
//! - exported to JSON
//! - compared for equality in tests

use serde::{Deserialize, Serialize};

/// Gestational age derived from an LMP date and a reference date.
///
/// Invariant: `total_days == weeks * 7 + days` and `days < 7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GestationalAge {
    pub weeks: u32,
    pub days: u32,
    pub total_days: u32,
}

impl GestationalAge {
    /// Zero age, used for unset and future LMP dates.
    pub const ZERO: Self = Self {
        weeks: 0,
        days: 0,
        total_days: 0,
    };

    pub fn from_total_days(total_days: u32) -> Self {
        Self {
            weeks: total_days / 7,
            days: total_days % 7,
            total_days,
        }
    }

    /// `"W weeks, D days"`.
    pub fn display(self) -> String {
        format!("{} weeks, {} days", self.weeks, self.days)
    }
}

/// Fetal vessels with Doppler pulsatility index reference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vessel {
    /// Middle cerebral artery pulsatility index.
    McaPi,
    /// Umbilical artery pulsatility index.
    UaPi,
}

impl Vessel {
    pub const ALL: [Vessel; 2] = [Vessel::McaPi, Vessel::UaPi];

    /// Key used in the reference data and exports.
    pub fn key(self) -> &'static str {
        match self {
            Vessel::McaPi => "mca_pi",
            Vessel::UaPi => "ua_pi",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Vessel::McaPi => "MCA PI",
            Vessel::UaPi => "Umbilical Artery PI",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Vessel::McaPi => Vessel::UaPi,
            Vessel::UaPi => Vessel::McaPi,
        }
    }
}

/// 5th/50th/95th percentile values for one vessel at one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselPercentiles {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

impl VesselPercentiles {
    pub const fn new(p5: f64, p50: f64, p95: f64) -> Self {
        Self { p5, p50, p95 }
    }
}

/// One week's entry in the percentile table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileRow {
    pub week: u32,
    pub mca_pi: VesselPercentiles,
    pub ua_pi: VesselPercentiles,
}

impl PercentileRow {
    pub fn vessel(&self, vessel: Vessel) -> &VesselPercentiles {
        match vessel {
            Vessel::McaPi => &self.mca_pi,
            Vessel::UaPi => &self.ua_pi,
        }
    }
}

/// Per-vessel readings handed to the presentation layer.
///
/// `None` is the explicit "no data" indicator for a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VesselReadings {
    pub mca_pi: Option<VesselPercentiles>,
    pub ua_pi: Option<VesselPercentiles>,
}

impl VesselReadings {
    pub fn from_row(row: Option<&PercentileRow>) -> Self {
        match row {
            Some(row) => Self {
                mca_pi: Some(row.mca_pi),
                ua_pi: Some(row.ua_pi),
            },
            None => Self::default(),
        }
    }

    pub fn get(&self, vessel: Vessel) -> Option<&VesselPercentiles> {
        match vessel {
            Vessel::McaPi => self.mca_pi.as_ref(),
            Vessel::UaPi => self.ua_pi.as_ref(),
        }
    }
}
