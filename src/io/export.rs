//! JSON rendering and export of a dating view.
//!
//! The schema is `calc::DatingView` serialized as-is: ISO date strings, the
//! unclamped gestational age, the lookup week, and per-vessel percentiles
//! (`null` for "no data").

use std::fs::File;
use std::path::Path;

use crate::calc::DatingView;
use crate::data::PercentileTable;
use crate::error::AppError;

/// Pretty-printed JSON for one view.
pub fn view_to_json(view: &DatingView) -> Result<String, AppError> {
    serde_json::to_string_pretty(view).map_err(|e| AppError::new(4, format!("Failed to encode view JSON: {e}")))
}

/// Pretty-printed JSON for the whole percentile table.
pub fn table_to_json(table: &PercentileTable) -> Result<String, AppError> {
    serde_json::to_string_pretty(table).map_err(|e| AppError::new(4, format!("Failed to encode table JSON: {e}")))
}

/// Write a view JSON file.
pub fn write_view_json(path: &Path, view: &DatingView) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, view)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::derive_view;
    use crate::domain::ReferenceDate;
    use chrono::NaiveDate;

    fn view(lmp: Option<&str>, table: &PercentileTable) -> DatingView {
        let reference = ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        derive_view(lmp.map(|s| s.parse().unwrap()), reference, table)
    }

    #[test]
    fn view_json_shape() {
        let table = PercentileTable::reference();
        let json = view_to_json(&view(Some("2025-01-01"), &table)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["reference_date"], "2025-06-01");
        assert_eq!(value["lmp"], "2025-01-01");
        assert_eq!(value["edd"], "2025-10-08");
        assert_eq!(value["edd_display"], "October 8, 2025");
        assert_eq!(value["gestational_age"]["weeks"], 21);
        assert_eq!(value["gestational_age"]["days"], 4);
        assert_eq!(value["gestational_age"]["total_days"], 151);
        assert_eq!(value["lookup_week"], 21);
        assert_eq!(value["percentiles"]["mca_pi"]["p50"], 1.51);
        assert_eq!(value["percentiles"]["ua_pi"]["p50"], 1.12);
    }

    #[test]
    fn view_json_without_lmp_or_data() {
        let table = PercentileTable::new(20, 40, []);
        let json = view_to_json(&view(None, &table)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["lmp"].is_null());
        assert!(value["edd"].is_null());
        assert_eq!(value["ga_display"], "0 weeks");
        assert!(value["percentiles"]["mca_pi"].is_null());
        assert!(value["percentiles"]["ua_pi"].is_null());
    }

    #[test]
    fn write_view_json_to_file() {
        let table = PercentileTable::reference();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");

        let v = view(Some("2025-02-01"), &table);
        write_view_json(&path, &v).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, view_to_json(&v).unwrap());
    }

    #[test]
    fn write_view_json_reports_bad_path() {
        let table = PercentileTable::reference();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("view.json");

        let err = write_view_json(&path, &view(None, &table)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Failed to create export JSON"));
    }

    #[test]
    fn table_json_lists_rows_by_week() {
        let json = table_to_json(&PercentileTable::reference()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["min_week"], 20);
        assert_eq!(value["max_week"], 40);
        assert_eq!(value["rows"]["33"]["ua_pi"]["p5"], 0.54);
    }
}
