//! Medication definition model and validation.
//!
//! # Responsibility
//! - Define the canonical medication record created by the caretaker flow.
//! - Normalize and validate caretaker input before it reaches persistence.
//!
//! # Invariants
//! - `name` and `dosage` are stored trimmed, with angle brackets stripped.
//! - `time_to_take` is a 24-hour `HH:MM` string.
//! - `reminder_window_minutes` stays within [5, 240].

use crate::schedule::{canonical_time_of_day, parse_time_of_day};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a medication definition.
pub type MedicationId = Uuid;

/// Stable identifier for the owning user (patient account).
pub type UserId = Uuid;

/// Maximum character length accepted for a medication name.
pub const NAME_MAX_CHARS: usize = 100;

/// Maximum character length accepted for a dosage description.
pub const DOSAGE_MAX_CHARS: usize = 50;

/// Inclusive bounds for the reminder window, in minutes.
pub const REMINDER_WINDOW_MINUTES: (u32, u32) = (5, 240);

/// Default reminder window applied when a draft leaves it unset.
///
/// This is a configuration default, not a validated invariant: callers may
/// supply any in-range value instead.
pub const DEFAULT_REMINDER_WINDOW_MINUTES: u32 = 30;

/// Canonical medication definition.
///
/// Created by the caretaker flow, deleted explicitly, otherwise immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Stable global ID used for log references and deletion.
    pub id: MedicationId,
    /// Owning user; every query and command is scoped to this identity.
    pub user_id: UserId,
    /// Display name, trimmed, non-empty, at most 100 characters.
    pub name: String,
    /// Dosage description, trimmed, non-empty, at most 50 characters.
    pub dosage: String,
    /// Scheduled time of day in 24-hour `HH:MM` form.
    pub time_to_take: String,
    /// Grace period in minutes after `time_to_take` before the medication
    /// counts as overdue.
    pub reminder_window_minutes: u32,
}

/// Caller-facing input for creating a medication.
///
/// Fields arrive as typed by the caretaker; normalization and validation
/// happen in [`Medication::from_draft`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MedicationDraft {
    pub name: String,
    pub dosage: String,
    pub time_to_take: String,
    /// `None` selects [`DEFAULT_REMINDER_WINDOW_MINUTES`].
    #[serde(default)]
    pub reminder_window_minutes: Option<u32>,
}

/// Field-level validation failure for medication input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MedicationValidationError {
    EmptyName,
    NameTooLong { chars: usize },
    EmptyDosage,
    DosageTooLong { chars: usize },
    InvalidTimeFormat { value: String },
    WindowOutOfRange { minutes: u32 },
}

impl MedicationValidationError {
    /// Name of the failing input field, for per-field error attachment in
    /// presentation layers.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyDosage | Self::DosageTooLong { .. } => "dosage",
            Self::InvalidTimeFormat { .. } => "time_to_take",
            Self::WindowOutOfRange { .. } => "reminder_window_minutes",
        }
    }
}

impl Display for MedicationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "medication name is required"),
            Self::NameTooLong { chars } => write!(
                f,
                "medication name must be at most {NAME_MAX_CHARS} characters, got {chars}"
            ),
            Self::EmptyDosage => write!(f, "dosage is required"),
            Self::DosageTooLong { chars } => write!(
                f,
                "dosage must be at most {DOSAGE_MAX_CHARS} characters, got {chars}"
            ),
            Self::InvalidTimeFormat { value } => {
                write!(f, "invalid time format `{value}`; expected HH:MM")
            }
            Self::WindowOutOfRange { minutes } => write!(
                f,
                "reminder window must be between {} and {} minutes, got {minutes}",
                REMINDER_WINDOW_MINUTES.0, REMINDER_WINDOW_MINUTES.1
            ),
        }
    }
}

impl Error for MedicationValidationError {}

impl Medication {
    /// Builds a validated medication from caretaker input.
    ///
    /// # Contract
    /// - Strips angle brackets and trims whitespace from `name` and `dosage`.
    /// - Canonicalizes `time_to_take` to zero-padded `HH:MM`, so the store's
    ///   text ordering by time is chronological.
    /// - Applies [`DEFAULT_REMINDER_WINDOW_MINUTES`] when the draft leaves
    ///   the window unset.
    /// - Generates a fresh stable ID.
    ///
    /// # Errors
    /// - Returns the first failing field constraint; no partial record is
    ///   observable on failure.
    pub fn from_draft(
        user_id: UserId,
        draft: MedicationDraft,
    ) -> Result<Self, MedicationValidationError> {
        let time_to_take = draft.time_to_take.trim().to_string();
        let medication = Self {
            id: Uuid::new_v4(),
            user_id,
            name: sanitize_text(&draft.name),
            dosage: sanitize_text(&draft.dosage),
            // Invalid input stays as typed so validation can report it.
            time_to_take: canonical_time_of_day(&time_to_take).unwrap_or(time_to_take),
            reminder_window_minutes: draft
                .reminder_window_minutes
                .unwrap_or(DEFAULT_REMINDER_WINDOW_MINUTES),
        };
        medication.validate()?;
        Ok(medication)
    }

    /// Checks all field constraints.
    ///
    /// Repository write paths call this before any SQL mutation; read paths
    /// call it to reject invalid persisted state instead of masking it.
    pub fn validate(&self) -> Result<(), MedicationValidationError> {
        if self.name.is_empty() {
            return Err(MedicationValidationError::EmptyName);
        }
        let name_chars = self.name.chars().count();
        if name_chars > NAME_MAX_CHARS {
            return Err(MedicationValidationError::NameTooLong { chars: name_chars });
        }

        if self.dosage.is_empty() {
            return Err(MedicationValidationError::EmptyDosage);
        }
        let dosage_chars = self.dosage.chars().count();
        if dosage_chars > DOSAGE_MAX_CHARS {
            return Err(MedicationValidationError::DosageTooLong {
                chars: dosage_chars,
            });
        }

        if parse_time_of_day(&self.time_to_take).is_none() {
            return Err(MedicationValidationError::InvalidTimeFormat {
                value: self.time_to_take.clone(),
            });
        }

        let (min, max) = REMINDER_WINDOW_MINUTES;
        if self.reminder_window_minutes < min || self.reminder_window_minutes > max {
            return Err(MedicationValidationError::WindowOutOfRange {
                minutes: self.reminder_window_minutes,
            });
        }

        Ok(())
    }
}

/// Removes angle brackets and trims surrounding whitespace.
///
/// Free-text fields are rendered by downstream UI layers; stripping `<` and
/// `>` at the model boundary keeps markup fragments out of stored data.
fn sanitize_text(value: &str) -> String {
    value.replace(['<', '>'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::sanitize_text;

    #[test]
    fn sanitize_strips_angle_brackets_and_trims() {
        assert_eq!(sanitize_text("  <b>Aspirin</b>  "), "bAspirin/b");
        assert_eq!(sanitize_text("plain"), "plain");
    }
}
