//! Medication/log reconciliation.
//!
//! # Responsibility
//! - Join medication definitions with today's intake logs into the enriched
//!   per-medication view consumed by presentation layers.
//!
//! # Invariants
//! - Exactly one output per input medication, in input order.
//! - `is_taken_today == true` forces `is_overdue == false`.
//! - Each pass is a pure function of its inputs; no shared state.

use crate::model::intake_log::IntakeLog;
use crate::model::medication::Medication;
use crate::schedule::is_overdue;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Enriched per-medication view for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationStatus {
    #[serde(flatten)]
    pub medication: Medication,
    /// Today's log entry, when the medication was already marked as taken.
    pub today_log: Option<IntakeLog>,
    pub is_taken_today: bool,
    /// Meaningful only when `is_taken_today` is false.
    pub is_overdue: bool,
}

/// Joins medications with today's logs and evaluates the overdue rule.
///
/// # Contract
/// - Output order mirrors `medications`; callers pre-sort (the repository
///   lists by `time_to_take` ascending).
/// - Matching is exact equality on `medication_id`. Should `todays_logs`
///   contain duplicates for one medication, the first entry in slice order
///   wins.
/// - A matched medication is never overdue, regardless of `now`.
pub fn reconcile(
    medications: &[Medication],
    todays_logs: &[IntakeLog],
    now: NaiveDateTime,
) -> Vec<MedicationStatus> {
    medications
        .iter()
        .map(|medication| {
            let today_log = todays_logs
                .iter()
                .find(|log| log.medication_id == medication.id)
                .cloned();
            let is_taken_today = today_log.is_some();
            let is_overdue = !is_taken_today
                && is_overdue(
                    &medication.time_to_take,
                    medication.reminder_window_minutes,
                    now,
                );
            MedicationStatus {
                medication: medication.clone(),
                today_log,
                is_taken_today,
                is_overdue,
            }
        })
        .collect()
}
