//! Formatted terminal output for the one-shot CLI.
//!
//! We keep formatting code in one place so:
//! - the dating core stays free of presentation concerns
//! - output changes are localized (and covered by the tests below)

use crate::calc::DatingView;
use crate::data::PercentileTable;
use crate::domain::{Vessel, VesselPercentiles};

/// Shown wherever percentile values are displayed.
pub const DISCLAIMER: &str = "Disclaimer: The data in this application is for illustrative purposes only \
and should not be used for medical decisions. Always consult with a qualified healthcare professional.";

/// Shown in place of a vessel's percentiles when the table has no row.
pub const NO_DATA: &str = "No data available for this week.";

/// Format the dating summary for one view.
pub fn format_summary(view: &DatingView) -> String {
    let mut out = String::new();

    out.push_str("=== OBTools - Pregnancy Dating ===\n");
    out.push_str(&format!("Reference date: {}\n", view.reference_date));
    out.push_str(&format!("First day of last period: {}\n", or_dash(&lmp_text(view))));
    out.push_str(&format!("Estimated due date: {}\n", or_dash(&view.edd_display)));
    out.push_str(&format!("Current gestational age: {}\n", view.ga_display));

    out.push_str(&format!("\nDoppler values for week {}:\n", view.lookup_week));
    for vessel in Vessel::ALL {
        out.push_str(&format_vessel_line(vessel, view.percentiles.get(vessel)));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');

    out
}

/// One vessel's percentiles on a single line, or the "no data" message.
pub fn format_vessel_line(vessel: Vessel, values: Option<&VesselPercentiles>) -> String {
    match values {
        Some(p) => format!(
            "  {:<20} 5th {} | 50th {} | 95th {}",
            vessel.display_name(),
            fmt_pi(p.p5),
            fmt_pi(p.p50),
            fmt_pi(p.p95),
        ),
        None => format!("  {:<20} {NO_DATA}", vessel.display_name()),
    }
}

/// Format the whole percentile table, one row per week.
pub fn format_table(table: &PercentileTable) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4}  {:>6} {:>6} {:>6}  {:>6} {:>6} {:>6}",
            "week", "mca5", "mca50", "mca95", "ua5", "ua50", "ua95"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!(
        "{:-<4}  {:-<6} {:-<6} {:-<6}  {:-<6} {:-<6} {:-<6}\n",
        "", "", "", "", "", "", ""
    ));

    for row in table.rows() {
        out.push_str(&format!(
            "{:>4}  {:>6} {:>6} {:>6}  {:>6} {:>6} {:>6}\n",
            row.week,
            fmt_pi(row.mca_pi.p5),
            fmt_pi(row.mca_pi.p50),
            fmt_pi(row.mca_pi.p95),
            fmt_pi(row.ua_pi.p5),
            fmt_pi(row.ua_pi.p50),
            fmt_pi(row.ua_pi.p95),
        ));
    }

    out
}

/// Pulsatility index with the source's two-decimal precision.
pub fn fmt_pi(v: f64) -> String {
    format!("{v:.2}")
}

fn lmp_text(view: &DatingView) -> String {
    view.lmp.map(|d| d.to_string()).unwrap_or_default()
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}
