//! Pure queries over the immutable summary.
//!
//! Four query shapes, all returning flat [`SearchRecord`] lists so the
//! export sinks render every kind uniformly. Date-shaped arguments may
//! arrive as Unix timestamps and are resolved through the epoch
//! plausibility window first.

use chrono::NaiveDate;
use punch_core::models::{SearchRecord, Summary};
use punch_core::settings::SearchRequest;
use punch_core::time_utils;

/// All dated records for one employee, ascending date order.
pub fn by_employee(summary: &Summary, emp_code: &str) -> Vec<SearchRecord> {
    summary
        .records()
        .filter(|(_, record)| record.emp_code == emp_code)
        .map(|(date, record)| SearchRecord::from_summary(date, record))
        .collect()
}

/// All records for one date, ascending emp_code order. Empty when the
/// date is absent from the summary.
pub fn by_date(summary: &Summary, date: &str) -> Vec<SearchRecord> {
    let Some(date) = resolve_date(date) else {
        return Vec::new();
    };
    summary
        .days
        .get(&date)
        .map(|records| {
            records
                .iter()
                .map(|record| SearchRecord::from_summary(date, record))
                .collect()
        })
        .unwrap_or_default()
}

/// At most one record for the (employee, date) pair.
pub fn by_employee_and_date(summary: &Summary, emp_code: &str, date: &str) -> Vec<SearchRecord> {
    by_date(summary, date)
        .into_iter()
        .filter(|record| record.emp_code == emp_code)
        .collect()
}

/// All of one employee's records whose date falls within the inclusive
/// [start, end] range, ascending date order. The comparison is
/// lexicographic over ISO-formatted dates, so callers must supply
/// comparably formatted bounds.
pub fn by_date_range(
    summary: &Summary,
    emp_code: &str,
    start: &str,
    end: &str,
) -> Vec<SearchRecord> {
    let start = time_utils::epoch_to_date(start);
    let end = time_utils::epoch_to_date(end);

    summary
        .records()
        .filter(|(date, record)| {
            let iso = date.to_string();
            record.emp_code == emp_code && start.as_str() <= iso.as_str() && iso.as_str() <= end.as_str()
        })
        .map(|(date, record)| SearchRecord::from_summary(date, record))
        .collect()
}

/// Execute a structured search request against the summary.
pub fn run(summary: &Summary, request: &SearchRequest) -> Vec<SearchRecord> {
    match request {
        SearchRequest::Employee { emp_code } => by_employee(summary, emp_code),
        SearchRequest::Date { date } => by_date(summary, date),
        SearchRequest::EmployeeAndDate { emp_code, date } => {
            by_employee_and_date(summary, emp_code, date)
        }
        SearchRequest::DateRange {
            emp_code,
            start,
            end,
        } => by_date_range(summary, emp_code, start, end),
    }
}

/// Resolve a single-date argument: epoch disambiguation first, then a
/// strict ISO parse. Unparseable arguments match nothing.
fn resolve_date(arg: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&time_utils::epoch_to_date(arg), "%Y-%m-%d").ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Timelike};
    use punch_core::models::DailySummaryRecord;

    fn record(code: &str, first_hm: (u32, u32), last_hm: (u32, u32)) -> DailySummaryRecord {
        let first = NaiveTime::from_hms_opt(first_hm.0, first_hm.1, 0).expect("valid");
        let last = NaiveTime::from_hms_opt(last_hm.0, last_hm.1, 0).expect("valid");
        let worked = (last.num_seconds_from_midnight() - first.num_seconds_from_midnight()) as i64;
        DailySummaryRecord {
            emp_code: code.to_string(),
            first_punch: first,
            last_punch: last,
            total_punches: 2,
            working_hours: worked,
            late_entry: false,
            early_exit: false,
            single_punch: false,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    /// E001 punches on five days; E002 on one.
    fn fixture() -> Summary {
        let mut summary = Summary::default();
        for day in ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05"] {
            summary
                .days
                .entry(date(day))
                .or_default()
                .push(record("E001", (9, 0), (17, 30)));
        }
        summary
            .days
            .entry(date("2024-03-02"))
            .or_default()
            .push(record("E002", (8, 55), (17, 45)));
        summary
    }

    // ── by_employee ───────────────────────────────────────────────────────────

    #[test]
    fn test_by_employee_all_dates_ascending() {
        let results = by_employee(&fixture(), "E001");
        assert_eq!(results.len(), 5);
        let dates: Vec<String> = results.iter().map(|r| r.date.to_string()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_by_employee_unknown_code_empty() {
        assert!(by_employee(&fixture(), "E999").is_empty());
    }

    // ── by_date ───────────────────────────────────────────────────────────────

    #[test]
    fn test_by_date_emp_code_order() {
        let results = by_date(&fixture(), "2024-03-02");
        let codes: Vec<&str> = results.iter().map(|r| r.emp_code.as_str()).collect();
        assert_eq!(codes, vec!["E001", "E002"]);
    }

    #[test]
    fn test_by_date_absent_is_empty() {
        assert!(by_date(&fixture(), "2024-04-01").is_empty());
        assert!(by_date(&fixture(), "not-a-date").is_empty());
    }

    #[test]
    fn test_by_date_accepts_epoch_argument() {
        // 1709385300 = 2024-03-02 13:15:00 UTC.
        let results = by_date(&fixture(), "1709385300");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].date, date("2024-03-02"));
    }

    // ── by_employee_and_date ──────────────────────────────────────────────────

    #[test]
    fn test_by_employee_and_date_at_most_one() {
        let results = by_employee_and_date(&fixture(), "E002", "2024-03-02");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].emp_code, "E002");
        assert_eq!(results[0].working_hours, 8.83);
    }

    #[test]
    fn test_by_employee_and_date_absent_pair_empty() {
        assert!(by_employee_and_date(&fixture(), "E002", "2024-03-01").is_empty());
    }

    // ── by_date_range ─────────────────────────────────────────────────────────

    #[test]
    fn test_by_date_range_inclusive_subset() {
        // Scenario F: 3 of E001's 5 days, ascending.
        let results = by_date_range(&fixture(), "E001", "2024-03-02", "2024-03-04");
        let dates: Vec<String> = results.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-02", "2024-03-03", "2024-03-04"]);
    }

    #[test]
    fn test_by_date_range_filters_employee() {
        let results = by_date_range(&fixture(), "E002", "2024-03-01", "2024-03-05");
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_by_date_range_epoch_bounds() {
        // Bounds given as Unix timestamps within the plausible window.
        let results = by_date_range(&fixture(), "E001", "1709337600", "1709510400");
        assert_eq!(results.len(), 3);
    }

    // ── run dispatcher ────────────────────────────────────────────────────────

    #[test]
    fn test_run_dispatches_each_kind() {
        let summary = fixture();

        let request = SearchRequest::Employee {
            emp_code: "E001".to_string(),
        };
        assert_eq!(run(&summary, &request).len(), 5);

        let request = SearchRequest::Date {
            date: "2024-03-02".to_string(),
        };
        assert_eq!(run(&summary, &request).len(), 2);

        let request = SearchRequest::EmployeeAndDate {
            emp_code: "E001".to_string(),
            date: "2024-03-02".to_string(),
        };
        assert_eq!(run(&summary, &request).len(), 1);

        let request = SearchRequest::DateRange {
            emp_code: "E001".to_string(),
            start: "2024-03-04".to_string(),
            end: "2024-03-05".to_string(),
        };
        assert_eq!(run(&summary, &request).len(), 2);
    }

    #[test]
    fn test_queries_do_not_mutate_summary() {
        let summary = fixture();
        let before = serde_json::to_string(&summary).expect("serialize");
        let _ = by_employee(&summary, "E001");
        let _ = by_date(&summary, "2024-03-02");
        let after = serde_json::to_string(&summary).expect("serialize");
        assert_eq!(before, after);
    }
}
