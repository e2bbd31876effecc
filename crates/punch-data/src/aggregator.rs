//! Deduplication and daily aggregation.
//!
//! Punches accumulate into a per-employee, per-day keyed store during
//! the single ingestion pass; a read-only reduction pass then turns
//! each day's punch list into one summary record.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use punch_core::models::{DailySummaryRecord, PunchEvent, PunchIdentity, Summary};
use punch_core::settings::ShiftPolicy;
use tracing::debug;

// ── DailyPunches ──────────────────────────────────────────────────────────────

/// The arena-style accumulator: employee → date → punch timestamps,
/// with an identity set that keeps re-ingested punches out.
///
/// Built incrementally in file-then-row order; never mutated once
/// aggregation begins.
#[derive(Debug, Default)]
pub struct DailyPunches {
    days: BTreeMap<String, BTreeMap<NaiveDate, Vec<NaiveDateTime>>>,
    seen: HashSet<PunchIdentity>,
}

impl DailyPunches {
    /// Fold one validated punch into the store.
    ///
    /// Returns `false` when the identity triple was already seen –
    /// the duplicate is dropped silently, first occurrence wins.
    pub fn record(&mut self, event: PunchEvent) -> bool {
        if !self.seen.insert(event.identity()) {
            return false;
        }

        let date = event.date();
        self.days
            .entry(event.employee_code)
            .or_default()
            .entry(date)
            .or_default()
            .push(event.timestamp);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Number of unique punches recorded.
    pub fn punch_count(&self) -> usize {
        self.seen.len()
    }

    /// The accumulated employee → date → timestamps view.
    pub fn days(&self) -> &BTreeMap<String, BTreeMap<NaiveDate, Vec<NaiveDateTime>>> {
        &self.days
    }

    /// Sorted distinct devices observed so far (diagnostic view).
    pub fn devices_seen(&self) -> Vec<String> {
        let mut devices: Vec<String> = self
            .seen
            .iter()
            .map(|(_, _, device)| device.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        devices.sort();
        devices
    }
}

// ── Reduction ─────────────────────────────────────────────────────────────────

/// Reduce the accumulated punches into the canonical [`Summary`].
///
/// Employees iterate in ascending code order, dates in ascending
/// order; each day's timestamps are sorted before computing the
/// summary fields, and every date's record list ends up sorted by
/// employee code.
pub fn summarize(punches: &DailyPunches, policy: &ShiftPolicy) -> Summary {
    let mut summary = Summary::default();

    for (emp_code, dates) in punches.days() {
        for (date, timestamps) in dates {
            let mut timestamps = timestamps.clone();
            timestamps.sort();

            let (Some(first), Some(last)) = (timestamps.first(), timestamps.last()) else {
                continue;
            };

            let worked_seconds = (*last - *first).num_seconds();
            let record = DailySummaryRecord {
                emp_code: emp_code.clone(),
                first_punch: first.time(),
                last_punch: last.time(),
                total_punches: timestamps.len() as u32,
                working_hours: worked_seconds,
                late_entry: first.time() > policy.late_threshold,
                early_exit: last.time() < policy.early_threshold,
                single_punch: timestamps.len() == 1,
            };
            summary.days.entry(*date).or_default().push(record);
        }
    }

    for records in summary.days.values_mut() {
        records.sort_by(|a, b| a.emp_code.cmp(&b.emp_code));
    }

    debug!(
        "Summarised {} punches into {} dates",
        punches.punch_count(),
        summary.day_count()
    );

    summary
}

// ── Tests ─────────────────────────────────────────────────────────────────────
