//! Doppler pulsatility-index reference table.
//!
//! The embedded values are illustrative placeholder data, not clinically
//! validated percentiles. They exist to exercise the lookup and display paths;
//! real deployments must swap in a validated table via [`PercentileTable::new`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{PercentileRow, VesselPercentiles};

/// First gestational week covered by the reference table.
pub const MIN_WEEK: u32 = 20;
/// Last gestational week covered by the reference table.
pub const MAX_WEEK: u32 = 40;

const fn row(week: u32, mca: [f64; 3], ua: [f64; 3]) -> PercentileRow {
    PercentileRow {
        week,
        mca_pi: VesselPercentiles::new(mca[0], mca[1], mca[2]),
        ua_pi: VesselPercentiles::new(ua[0], ua[1], ua[2]),
    }
}

/// Week → `{mca_pi, ua_pi}` 5th/50th/95th percentiles.
const REFERENCE_ROWS: [PercentileRow; 21] = [
    row(20, [1.12, 1.55, 2.01], [0.88, 1.15, 1.42]),
    row(21, [1.09, 1.51, 1.98], [0.85, 1.12, 1.39]),
    row(22, [1.06, 1.47, 1.94], [0.82, 1.08, 1.35]),
    row(23, [1.03, 1.43, 1.90], [0.79, 1.04, 1.31]),
    row(24, [1.00, 1.39, 1.85], [0.76, 1.00, 1.27]),
    row(25, [0.97, 1.35, 1.81], [0.73, 0.96, 1.23]),
    row(26, [0.94, 1.31, 1.77], [0.70, 0.92, 1.19]),
    row(27, [0.91, 1.27, 1.73], [0.68, 0.89, 1.15]),
    row(28, [0.88, 1.23, 1.69], [0.65, 0.85, 1.11]),
    row(29, [0.85, 1.19, 1.65], [0.63, 0.82, 1.07]),
    row(30, [0.82, 1.15, 1.61], [0.60, 0.78, 1.03]),
    row(31, [0.79, 1.11, 1.57], [0.58, 0.75, 0.99]),
    row(32, [0.77, 1.08, 1.53], [0.56, 0.72, 0.95]),
    row(33, [0.74, 1.04, 1.49], [0.54, 0.69, 0.91]),
    row(34, [0.71, 1.00, 1.45], [0.52, 0.66, 0.88]),
    row(35, [0.69, 0.97, 1.41], [0.50, 0.63, 0.84]),
    row(36, [0.66, 0.93, 1.37], [0.48, 0.60, 0.81]),
    row(37, [0.64, 0.90, 1.33], [0.46, 0.58, 0.78]),
    row(38, [0.61, 0.86, 1.29], [0.44, 0.55, 0.75]),
    row(39, [0.59, 0.83, 1.25], [0.42, 0.53, 0.72]),
    row(40, [0.56, 0.79, 1.21], [0.40, 0.50, 0.69]),
];

/// Percentile rows keyed by integer week over a closed `[min_week, max_week]` range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileTable {
    min_week: u32,
    max_week: u32,
    rows: BTreeMap<u32, PercentileRow>,
}

impl PercentileTable {
    /// Build a table over `[min_week, max_week]`.
    ///
    /// The bounds are swapped if given in reverse. Rows outside the range are
    /// dropped; weeks inside the range without a row look up as "no data".
    pub fn new(min_week: u32, max_week: u32, rows: impl IntoIterator<Item = PercentileRow>) -> Self {
        let (min_week, max_week) = if min_week <= max_week {
            (min_week, max_week)
        } else {
            (max_week, min_week)
        };
        let rows = rows
            .into_iter()
            .filter(|r| (min_week..=max_week).contains(&r.week))
            .map(|r| (r.week, r))
            .collect();
        Self {
            min_week,
            max_week,
            rows,
        }
    }

    /// The embedded illustrative table (weeks 20..=40, dense).
    pub fn reference() -> Self {
        Self::new(MIN_WEEK, MAX_WEEK, REFERENCE_ROWS)
    }

    pub fn min_week(&self) -> u32 {
        self.min_week
    }

    pub fn max_week(&self) -> u32 {
        self.max_week
    }

    /// Clamp any week number into the table's range.
    pub fn clamp_week(&self, week: i64) -> u32 {
        let clamped = week.clamp(i64::from(self.min_week), i64::from(self.max_week));
        // In range by construction.
        clamped as u32
    }

    /// Whether `week` lies inside the table's range (no clamping needed).
    pub fn contains_week(&self, week: i64) -> bool {
        (i64::from(self.min_week)..=i64::from(self.max_week)).contains(&week)
    }

    /// Row for `week` after clamping to the table range.
    ///
    /// `None` only for sparse tables with no row at the clamped week.
    pub fn lookup(&self, week: i64) -> Option<&PercentileRow> {
        self.rows.get(&self.clamp_week(week))
    }

    /// Rows in ascending week order.
    pub fn rows(&self) -> impl Iterator<Item = &PercentileRow> {
        self.rows.values()
    }
}

impl Default for PercentileTable {
    fn default() -> Self {
        Self::reference()
    }
}
