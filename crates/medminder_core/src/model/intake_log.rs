//! Intake log model.
//!
//! # Responsibility
//! - Record that one medication was taken by one user on one calendar date.
//!
//! # Invariants
//! - `date` always equals the calendar date of `taken_at`.
//! - At most one log exists per (medication, user, date); enforced by the
//!   store's unique index, pre-checked by the service.

use crate::model::medication::{MedicationId, UserId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an intake log entry.
pub type IntakeLogId = Uuid;

/// One "taken" record for a medication on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeLog {
    pub id: IntakeLogId,
    pub medication_id: MedicationId,
    pub user_id: UserId,
    /// Calendar date the intake counts against (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Instant the patient marked the medication as taken.
    pub taken_at: NaiveDateTime,
}

impl IntakeLog {
    /// Creates a log entry for `now`, anchoring `date` to `now`'s calendar
    /// date.
    pub fn new(medication_id: MedicationId, user_id: UserId, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            medication_id,
            user_id,
            date: now.date(),
            taken_at: now,
        }
    }
}
