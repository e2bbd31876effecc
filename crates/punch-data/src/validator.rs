//! Shape checks for raw punch rows.
//!
//! Validation reports and continues: a failed check produces one
//! descriptively-labeled error entry and drops the row; it never
//! escalates past the row boundary.

use std::path::Path;

use crate::reader::RawRecord;

/// Check a trimmed raw row for presence and basic shape.
///
/// Returns the formatted diagnostic for the *first* failed check:
/// * all five fields non-empty,
/// * `emp_code` alphanumeric,
/// * `first_name` / `last_name` alphabetic only,
/// * timestamp token either all digits or containing one of `-` `/` `:`.
pub fn validate_record(raw: &RawRecord, file: &Path, row_num: usize) -> Result<(), String> {
    if raw.emp_code.is_empty()
        || raw.first_name.is_empty()
        || raw.last_name.is_empty()
        || raw.timestamp.is_empty()
        || raw.device.is_empty()
    {
        return Err(format!(
            "Row {} in file '{}' is missing required fields.",
            row_num,
            file.display()
        ));
    }

    if !raw.emp_code.chars().all(char::is_alphanumeric) {
        return Err(format!(
            "Row {} in file '{}' emp_code must be alphanumeric.",
            row_num,
            file.display()
        ));
    }

    if !raw.first_name.chars().all(char::is_alphabetic) {
        return Err(format!(
            "Row {} in file '{}' first_name must be alphabetic.",
            row_num,
            file.display()
        ));
    }

    if !raw.last_name.chars().all(char::is_alphabetic) {
        return Err(format!(
            "Row {} in file '{}' last_name must be alphabetic.",
            row_num,
            file.display()
        ));
    }

    let all_digits = raw.timestamp.bytes().all(|b| b.is_ascii_digit());
    let has_separator = raw.timestamp.contains(['-', '/', ':']);
    if !all_digits && !has_separator {
        return Err(format!(
            "Row {} in file '{}' timestamp format is invalid.",
            row_num,
            file.display()
        ));
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn raw(emp: &str, first: &str, last: &str, ts: &str, device: &str) -> RawRecord {
        RawRecord {
            emp_code: emp.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            timestamp: ts.to_string(),
            device: device.to_string(),
        }
    }

    fn check(record: &RawRecord) -> Result<(), String> {
        validate_record(record, &PathBuf::from("logs/day1.log"), 3)
    }

    #[test]
    fn test_valid_row_passes() {
        assert!(check(&raw("E001", "John", "Doe", "2024-03-01 09:15:00", "Gate A")).is_ok());
    }

    #[test]
    fn test_epoch_timestamp_passes_shape_check() {
        assert!(check(&raw("E001", "John", "Doe", "1709284500", "Gate A")).is_ok());
    }

    #[test]
    fn test_missing_field_reported() {
        let err = check(&raw("", "John", "Doe", "1709284500", "Gate A")).unwrap_err();
        assert_eq!(err, "Row 3 in file 'logs/day1.log' is missing required fields.");

        assert!(check(&raw("E001", "John", "Doe", "1709284500", "")).is_err());
    }

    #[test]
    fn test_non_alphanumeric_code_reported() {
        let err = check(&raw("E!03", "John", "Doe", "1709284500", "Gate A")).unwrap_err();
        assert!(err.contains("emp_code must be alphanumeric"));
        assert!(err.contains("Row 3"));
        assert!(err.contains("logs/day1.log"));
    }

    #[test]
    fn test_non_alphabetic_names_reported() {
        let err = check(&raw("E001", "J0hn", "Doe", "1709284500", "Gate A")).unwrap_err();
        assert!(err.contains("first_name must be alphabetic"));

        let err = check(&raw("E001", "John", "D0e", "1709284500", "Gate A")).unwrap_err();
        assert!(err.contains("last_name must be alphabetic"));
    }

    #[test]
    fn test_timestamp_shape_rejected() {
        let err = check(&raw("E001", "John", "Doe", "morning", "Gate A")).unwrap_err();
        assert!(err.contains("timestamp format is invalid"));
    }

    #[test]
    fn test_timestamp_with_separator_accepted() {
        // Shape check only; whether it actually parses is the
        // normaliser's concern.
        assert!(check(&raw("E001", "John", "Doe", "99/99/9999 10:00", "Gate A")).is_ok());
    }

    #[test]
    fn test_unicode_names_accepted() {
        assert!(check(&raw("E001", "José", "Muñoz", "1709284500", "Gate A")).is_ok());
    }
}
