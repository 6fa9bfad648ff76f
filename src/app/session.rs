//! Shared form setup used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating how a session starts and how
//! one-shot inputs are fed through the same handlers the interactive form uses.

use tracing::warn;

use crate::calc::{DatingForm, GaTextOutcome};
use crate::cli::CalcArgs;
use crate::config::AppConfig;

/// Fresh form anchored to the configured reference date.
pub fn start_form(config: &AppConfig) -> DatingForm {
    DatingForm::new(config.reference, config.table.clone())
}

/// Feed `ob calc` inputs through the form handlers and return the resulting form.
///
/// `--lmp` goes through the date control, `--weeks` through the number field,
/// so rejected week text keeps the default LMP exactly as the form would.
pub fn run_calc(config: &AppConfig, args: &CalcArgs) -> DatingForm {
    let mut form = start_form(config);

    if let Some(lmp) = args.lmp {
        form.set_lmp(Some(lmp));
    }

    if let Some(text) = &args.weeks {
        let (min, max) = (form.table().min_week(), form.table().max_week());
        match form.set_ga_text(text.as_str()) {
            GaTextOutcome::Applied(_) => {}
            GaTextOutcome::OutOfRange(weeks) => {
                warn!("gestational age {weeks} is outside {min}..={max}; LMP left at its default");
            }
            GaTextOutcome::NotANumber => {
                warn!("gestational age '{text}' is not a whole number; LMP left at its default");
            }
        }
    }

    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dating::lmp_from_ga;
    use crate::domain::ReferenceDate;
    use chrono::NaiveDate;

    fn config() -> AppConfig {
        AppConfig::new(ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()))
    }

    fn args(lmp: Option<&str>, weeks: Option<&str>) -> CalcArgs {
        CalcArgs {
            lmp: lmp.map(|s| s.parse().unwrap()),
            weeks: weeks.map(str::to_string),
            json: false,
            export: None,
        }
    }

    #[test]
    fn default_is_minimum_week() {
        let form = run_calc(&config(), &args(None, None));
        assert_eq!(form.view().lookup_week, 20);
        assert_eq!(form.lmp(), lmp_from_ga(20, config().reference));
    }

    #[test]
    fn lmp_argument_sets_date() {
        let form = run_calc(&config(), &args(Some("2025-01-01"), None));
        assert_eq!(form.view().ga_display, "21 weeks, 4 days");
        assert_eq!(form.ga_text(), "21");
    }

    #[test]
    fn weeks_argument_goes_through_number_field() {
        let form = run_calc(&config(), &args(None, Some("32")));
        assert_eq!(form.lmp(), lmp_from_ga(32, config().reference));
        assert_eq!(form.view().lookup_week, 32);

        let rejected = run_calc(&config(), &args(None, Some("2")));
        assert_eq!(rejected.lmp(), lmp_from_ga(20, config().reference));
        assert_eq!(rejected.ga_text(), "2");
    }
}
