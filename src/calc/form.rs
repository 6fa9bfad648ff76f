//! Input reconciliation between the date control and the gestational-age controls.
//!
//! The LMP date is the single source of truth. The gestational-age number field
//! is a bufferable text view over it: partial or invalid text is kept verbatim
//! and only committed when it parses to a week inside the table range. After
//! every LMP change a one-way pass (LMP → text) brings the text back in line.

use tracing::debug;

use crate::calc::view::{DatingView, derive_view};
use crate::data::PercentileTable;
use crate::dating::lmp_from_ga;
use crate::domain::{DateParseError, LmpDate, ReferenceDate};

/// What a gestational-age text edit did to the LMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaTextOutcome {
    /// The text named an in-range week and the LMP now matches it.
    Applied(u32),
    /// The text parsed but lies outside the table range; LMP unchanged.
    OutOfRange(i64),
    /// The text is empty or not an integer; LMP unchanged.
    NotANumber,
}

/// Form state: the canonical LMP, the pending GA text and the memoized view.
#[derive(Debug, Clone)]
pub struct DatingForm {
    reference: ReferenceDate,
    table: PercentileTable,
    lmp: Option<LmpDate>,
    ga_text: String,
    view: DatingView,
    recomputations: u64,
}

impl DatingForm {
    /// Start `min_week` weeks before the reference date.
    pub fn new(reference: ReferenceDate, table: PercentileTable) -> Self {
        let min_week = table.min_week();
        let lmp = lmp_from_ga(i64::from(min_week), reference);
        let view = derive_view(lmp, reference, &table);
        Self {
            reference,
            table,
            lmp,
            ga_text: min_week.to_string(),
            view,
            recomputations: 1,
        }
    }

    pub fn reference(&self) -> ReferenceDate {
        self.reference
    }

    pub fn table(&self) -> &PercentileTable {
        &self.table
    }

    pub fn lmp(&self) -> Option<LmpDate> {
        self.lmp
    }

    /// LMP as an editable ISO string (empty when unset).
    pub fn lmp_text(&self) -> String {
        self.lmp.map(|d| d.to_string()).unwrap_or_default()
    }

    /// Pending gestational-age text, exactly as typed.
    pub fn ga_text(&self) -> &str {
        &self.ga_text
    }

    /// Slider position: the pending text clamped to the table range, or the
    /// minimum week when the text is not a number.
    pub fn slider_value(&self) -> u32 {
        parse_week(&self.ga_text)
            .map(|w| self.table.clamp_week(w))
            .unwrap_or(self.table.min_week())
    }

    pub fn view(&self) -> &DatingView {
        &self.view
    }

    /// Number of times the view has been derived (including the initial one).
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Date control edit. No clamping; `None` clears the LMP.
    pub fn set_lmp(&mut self, lmp: Option<LmpDate>) {
        self.commit_lmp(lmp);
    }

    /// Date control edit from text. Empty text clears the LMP; unparseable
    /// text leaves the form untouched.
    pub fn set_lmp_text(&mut self, text: &str) -> Result<(), DateParseError> {
        let lmp = match text.parse::<LmpDate>() {
            Ok(lmp) => Some(lmp),
            Err(DateParseError::Empty) => None,
            Err(err) => return Err(err),
        };
        self.commit_lmp(lmp);
        Ok(())
    }

    /// Number field edit. The text is always kept; the LMP only moves when the
    /// text names a week inside the table range.
    pub fn set_ga_text(&mut self, text: impl Into<String>) -> GaTextOutcome {
        self.ga_text = text.into();

        let Some(weeks) = parse_week(&self.ga_text) else {
            debug!(text = %self.ga_text, "gestational age text is not a number");
            return GaTextOutcome::NotANumber;
        };
        if !self.table.contains_week(weeks) {
            debug!(weeks, "gestational age text outside table range");
            return GaTextOutcome::OutOfRange(weeks);
        }

        let week = self.table.clamp_week(weeks);
        self.commit_lmp(lmp_from_ga(weeks, self.reference));
        GaTextOutcome::Applied(week)
    }

    /// Slider edit. Out-of-range positions are clamped first.
    pub fn set_slider(&mut self, weeks: u32) {
        let week = self.table.clamp_week(i64::from(weeks));
        self.ga_text = week.to_string();
        self.commit_lmp(lmp_from_ga(i64::from(week), self.reference));
    }

    /// Move the slider by `delta` weeks.
    pub fn step_slider(&mut self, delta: i64) {
        let target = self.table.clamp_week(i64::from(self.slider_value()) + delta);
        self.set_slider(target);
    }

    fn commit_lmp(&mut self, lmp: Option<LmpDate>) {
        if lmp == self.lmp {
            return;
        }
        self.lmp = lmp;
        self.view = derive_view(lmp, self.reference, &self.table);
        self.recomputations += 1;
        debug!(
            lmp = %self.lmp_text(),
            ga = %self.view.ga_display,
            lookup_week = self.view.lookup_week,
            "recomputed dating view"
        );
        self.reconcile();
    }

    /// One-way LMP → text sync. Never touches the LMP.
    fn reconcile(&mut self) {
        let canonical = self.table.clamp_week(i64::from(self.view.gestational_age.weeks));
        let pending = parse_week(&self.ga_text);
        if self.ga_text.is_empty() || pending != Some(i64::from(canonical)) {
            debug!(from = %self.ga_text, to = canonical, "reconciled gestational age text");
            self.ga_text = canonical.to_string();
        }
    }
}

/// Integer week typed into the number field (surrounding whitespace ignored).
pub fn parse_week(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> ReferenceDate {
        ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn form() -> DatingForm {
        DatingForm::new(reference(), PercentileTable::reference())
    }

    #[test]
    fn starts_at_minimum_week() {
        let form = form();
        assert_eq!(form.lmp(), lmp_from_ga(20, reference()));
        assert_eq!(form.lmp_text(), "2025-01-12");
        assert_eq!(form.ga_text(), "20");
        assert_eq!(form.slider_value(), 20);
        assert_eq!(form.view().ga_display, "20 weeks, 0 days");
        assert_eq!(form.recomputations(), 1);
    }

    #[test]
    fn out_of_range_text_is_kept_and_lmp_untouched() {
        let mut form = form();
        let before = form.lmp();

        assert_eq!(form.set_ga_text("2"), GaTextOutcome::OutOfRange(2));
        assert_eq!(form.lmp(), before);
        assert_eq!(form.ga_text(), "2");
        assert_eq!(form.slider_value(), 20);
        assert_eq!(form.recomputations(), 1);
    }

    #[test]
    fn partial_and_garbage_text_is_kept() {
        let mut form = form();
        let before = form.lmp();

        assert_eq!(form.set_ga_text(""), GaTextOutcome::NotANumber);
        assert_eq!(form.ga_text(), "");
        assert_eq!(form.set_ga_text("2a"), GaTextOutcome::NotANumber);
        assert_eq!(form.ga_text(), "2a");
        assert_eq!(form.lmp(), before);
    }

    #[test]
    fn in_range_text_moves_lmp_and_reconciles() {
        let mut form = form();

        assert_eq!(form.set_ga_text("2"), GaTextOutcome::OutOfRange(2));
        assert_eq!(form.set_ga_text("25"), GaTextOutcome::Applied(25));
        assert_eq!(form.lmp(), lmp_from_ga(25, reference()));
        assert_eq!(form.ga_text(), "25");
        assert_eq!(form.slider_value(), 25);
        assert_eq!(form.view().lookup_week, 25);
    }

    #[test]
    fn equivalent_text_is_not_overwritten() {
        let mut form = form();
        assert_eq!(form.set_ga_text(" 30"), GaTextOutcome::Applied(30));
        assert_eq!(form.ga_text(), " 30");
    }

    #[test]
    fn slider_updates_text_and_lmp() {
        let mut form = form();
        form.set_ga_text("abc");

        form.set_slider(33);
        assert_eq!(form.ga_text(), "33");
        assert_eq!(form.lmp(), lmp_from_ga(33, reference()));

        form.set_slider(99);
        assert_eq!(form.ga_text(), "40");

        form.step_slider(-1);
        assert_eq!(form.ga_text(), "39");
        form.step_slider(100);
        assert_eq!(form.slider_value(), 40);
    }

    #[test]
    fn date_edit_reconciles_text_to_clamped_week() {
        let mut form = form();

        form.set_lmp_text("2025-01-01").unwrap();
        assert_eq!(form.view().ga_display, "21 weeks, 4 days");
        assert_eq!(form.ga_text(), "21");

        // Three weeks along: text pins to the table minimum.
        form.set_lmp(lmp_from_ga(3, reference()));
        assert_eq!(form.view().ga_display, "3 weeks, 0 days");
        assert_eq!(form.ga_text(), "20");

        form.set_lmp(lmp_from_ga(46, reference()));
        assert_eq!(form.ga_text(), "40");
    }

    #[test]
    fn date_edit_overwrites_invalid_pending_text() {
        let mut form = form();
        form.set_ga_text("2");
        form.set_lmp_text("2025-01-01").unwrap();
        assert_eq!(form.ga_text(), "21");
    }

    #[test]
    fn clearing_date_resets_to_minimum() {
        let mut form = form();
        form.set_slider(30);

        form.set_lmp_text("").unwrap();
        assert_eq!(form.lmp(), None);
        assert_eq!(form.lmp_text(), "");
        assert_eq!(form.view().edd_display, "");
        assert_eq!(form.view().ga_display, "0 weeks");
        assert_eq!(form.view().lookup_week, 20);
        assert_eq!(form.ga_text(), "20");
    }

    #[test]
    fn invalid_date_text_leaves_form_untouched() {
        let mut form = form();
        let before = form.lmp();
        let err = form.set_lmp_text("2025-13-01").unwrap_err();
        assert!(matches!(err, DateParseError::Invalid { .. }));
        assert_eq!(form.lmp(), before);
        assert_eq!(form.recomputations(), 1);
    }

    #[test]
    fn unchanged_lmp_is_not_recomputed() {
        let mut form = form();
        let lmp = form.lmp();
        let view = form.view().clone();

        form.set_lmp(lmp);
        form.set_ga_text("20");
        form.set_slider(20);

        assert_eq!(form.recomputations(), 1);
        assert_eq!(form.view(), &view);

        form.set_slider(21);
        form.set_slider(21);
        assert_eq!(form.recomputations(), 2);
    }

    #[test]
    fn parse_week_accepts_signed_integers_only() {
        assert_eq!(parse_week("25"), Some(25));
        assert_eq!(parse_week(" 25 "), Some(25));
        assert_eq!(parse_week("-3"), Some(-3));
        assert_eq!(parse_week("2.5"), None);
        assert_eq!(parse_week(""), None);
    }
}
