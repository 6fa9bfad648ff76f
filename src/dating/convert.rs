//! Date/gestational-age conversion functions.
//!
//! All functions operate on `NaiveDate` calendar days anchored to an explicit
//! [`ReferenceDate`], so results never depend on the local timezone or the
//! time of day at which they are evaluated.

use chrono::{Days, NaiveDate, TimeDelta};

use crate::domain::{GestationalAge, LmpDate, ReferenceDate};

/// Days from LMP to the estimated due date (Naegele's rule, 40 weeks).
pub const EDD_OFFSET_DAYS: u64 = 280;

/// Long calendar format used for EDD display, e.g. "August 3, 2025".
pub const EDD_DISPLAY_FORMAT: &str = "%B %-d, %Y";

/// Sentinel shown when no gestational age has elapsed.
pub const ZERO_GA_LABEL: &str = "0 weeks";

/// LMP date that puts the pregnancy at exactly `weeks` weeks on `from`.
///
/// Defined for any week count, including negative and out-of-table values.
/// Returns `None` only when the result falls outside chrono's date range.
pub fn lmp_from_ga(weeks: i64, from: ReferenceDate) -> Option<LmpDate> {
    let days = weeks.checked_mul(7)?;
    let delta = TimeDelta::try_days(days)?;
    from.date().checked_sub_signed(delta).map(LmpDate::new)
}

/// Estimated due date: LMP + 280 days. `None` when the LMP is unset.
pub fn edd_from_lmp(lmp: Option<LmpDate>) -> Option<NaiveDate> {
    lmp?.date().checked_add_days(Days::new(EDD_OFFSET_DAYS))
}

/// Elapsed gestational age on `reference`.
///
/// An unset LMP, or one after the reference date, yields [`GestationalAge::ZERO`]
/// rather than a negative age.
pub fn ga_info_from_lmp(lmp: Option<LmpDate>, reference: ReferenceDate) -> GestationalAge {
    let Some(lmp) = lmp else {
        return GestationalAge::ZERO;
    };

    let elapsed = reference.date().signed_duration_since(lmp.date()).num_days();
    if elapsed < 0 {
        return GestationalAge::ZERO;
    }

    GestationalAge::from_total_days(u32::try_from(elapsed).unwrap_or(u32::MAX))
}

/// Format an EDD in the long calendar form ("October 8, 2025").
pub fn format_edd_long(edd: NaiveDate) -> String {
    edd.format(EDD_DISPLAY_FORMAT).to_string()
}

/// Human-readable gestational age.
///
/// Uses the `"0 weeks"` sentinel when the LMP is unset or in the future;
/// an LMP equal to the reference date reads "0 weeks, 0 days".
pub fn ga_label(lmp: Option<LmpDate>, reference: ReferenceDate) -> String {
    match lmp {
        Some(lmp) if lmp.date() <= reference.date() => ga_info_from_lmp(Some(lmp), reference).display(),
        _ => ZERO_GA_LABEL.to_string(),
    }
}
