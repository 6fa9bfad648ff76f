//! Derived dating view: EDD, gestational age and the applicable percentile row.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::PercentileTable;
use crate::dating::{edd_from_lmp, format_edd_long, ga_info_from_lmp, ga_label};
use crate::domain::{GestationalAge, LmpDate, ReferenceDate, VesselReadings};

/// Everything the presentation layer shows for one LMP value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatingView {
    pub reference_date: ReferenceDate,
    pub lmp: Option<LmpDate>,
    pub edd: Option<NaiveDate>,
    /// Long-form EDD, empty when the LMP is unset.
    pub edd_display: String,
    /// Unclamped elapsed age.
    pub gestational_age: GestationalAge,
    pub ga_display: String,
    /// Week used for the table lookup (age clamped to the table range).
    pub lookup_week: u32,
    pub percentiles: VesselReadings,
}

/// Compute the view for `lmp` on `reference`.
///
/// Total for every input: future LMPs read as zero age, and ages outside the
/// table range look up the nearest boundary row while the displayed age keeps
/// its real value.
pub fn derive_view(lmp: Option<LmpDate>, reference: ReferenceDate, table: &PercentileTable) -> DatingView {
    let edd = edd_from_lmp(lmp);
    let gestational_age = ga_info_from_lmp(lmp, reference);
    let lookup_week = table.clamp_week(i64::from(gestational_age.weeks));
    let row = table.lookup(i64::from(lookup_week));

    DatingView {
        reference_date: reference,
        lmp,
        edd,
        edd_display: edd.map(format_edd_long).unwrap_or_default(),
        gestational_age,
        ga_display: ga_label(lmp, reference),
        lookup_week,
        percentiles: VesselReadings::from_row(row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dating::lmp_from_ga;
    use crate::domain::Vessel;

    fn reference() -> ReferenceDate {
        ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn lmp(s: &str) -> Option<LmpDate> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn end_to_end_week_21() {
        let table = PercentileTable::reference();
        let view = derive_view(lmp("2025-01-01"), reference(), &table);

        assert_eq!(view.gestational_age.weeks, 21);
        assert_eq!(view.gestational_age.days, 4);
        assert_eq!(view.ga_display, "21 weeks, 4 days");
        assert_eq!(view.edd, NaiveDate::from_ymd_opt(2025, 10, 8));
        assert_eq!(view.edd_display, "October 8, 2025");
        assert_eq!(view.lookup_week, 21);
        assert_eq!(view.percentiles.get(Vessel::McaPi).unwrap().p50, 1.51);
        assert_eq!(view.percentiles.get(Vessel::UaPi).unwrap().p50, 1.12);
    }

    #[test]
    fn unset_lmp_uses_minimum_week_row() {
        let table = PercentileTable::reference();
        let view = derive_view(None, reference(), &table);

        assert_eq!(view.edd, None);
        assert_eq!(view.edd_display, "");
        assert_eq!(view.gestational_age, GestationalAge::ZERO);
        assert_eq!(view.ga_display, "0 weeks");
        assert_eq!(view.lookup_week, 20);
        assert_eq!(view.percentiles.mca_pi, Some(table.lookup(20).unwrap().mca_pi));
    }

    #[test]
    fn future_lmp_reads_zero_but_keeps_edd() {
        let table = PercentileTable::reference();
        let view = derive_view(lmp("2025-06-02"), reference(), &table);

        assert_eq!(view.gestational_age, GestationalAge::ZERO);
        assert_eq!(view.ga_display, "0 weeks");
        assert_eq!(view.edd, NaiveDate::from_ymd_opt(2026, 3, 9));
        assert_eq!(view.lookup_week, 20);
    }

    #[test]
    fn displayed_age_is_unclamped() {
        let table = PercentileTable::reference();

        let early = derive_view(lmp_from_ga(3, reference()), reference(), &table);
        assert_eq!(early.ga_display, "3 weeks, 0 days");
        assert_eq!(early.lookup_week, 20);
        assert_eq!(early.percentiles, VesselReadings::from_row(table.lookup(20)));

        let late = derive_view(lmp_from_ga(46, reference()), reference(), &table);
        assert_eq!(late.gestational_age.weeks, 46);
        assert_eq!(late.lookup_week, 40);
        assert_eq!(late.percentiles, VesselReadings::from_row(table.lookup(40)));
    }

    #[test]
    fn sparse_table_yields_no_data() {
        let rows = PercentileTable::reference()
            .rows()
            .filter(|r| r.week != 25)
            .copied()
            .collect::<Vec<_>>();
        let table = PercentileTable::new(20, 40, rows);

        let view = derive_view(lmp_from_ga(25, reference()), reference(), &table);
        assert_eq!(view.lookup_week, 25);
        assert!(view.percentiles.get(Vessel::McaPi).is_none());
        assert!(view.percentiles.get(Vessel::UaPi).is_none());
    }

    #[test]
    fn recomputation_is_idempotent() {
        let table = PercentileTable::reference();
        let a = derive_view(lmp("2025-02-14"), reference(), &table);
        let b = derive_view(lmp("2025-02-14"), reference(), &table);
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}
