//! Medication use-case service.
//!
//! # Responsibility
//! - Provide the command entry points: add, delete, mark-as-taken, and the
//!   reconciled daily overview.
//! - Enforce the auth-first, validate-before-store command discipline.
//!
//! # Invariants
//! - Every command checks for an authenticated user before anything else.
//! - `AddMedication` validates input before any store call.
//! - `DeleteMedication` removes intake logs before the medication row; a log
//!   cleanup failure leaves the medication untouched.
//! - `MarkAsTaken`'s existence pre-check is advisory; the store's unique
//!   index is authoritative and its violation maps to `AlreadyTaken`.

use crate::model::intake_log::{IntakeLog, IntakeLogId};
use crate::model::medication::{
    Medication, MedicationDraft, MedicationId, MedicationValidationError, UserId,
};
use crate::reconcile::{reconcile, MedicationStatus};
use crate::repo::log_repo::IntakeLogRepository;
use crate::repo::medication_repo::MedicationRepository;
use crate::repo::RepoError;
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Resolved identity context passed explicitly into every command.
///
/// Session establishment itself (sign-in, token refresh) happens outside
/// this crate; commands only see the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<UserId>,
}

impl Session {
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn anonymous() -> Self {
        Self { user_id: None }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Command-level error taxonomy.
#[derive(Debug)]
pub enum ServiceError {
    /// Input violates a field constraint; raised before any store call.
    Validation(MedicationValidationError),
    /// Command invoked without an authenticated user.
    AuthRequired,
    /// An intake log already exists for this medication and date.
    AlreadyTaken {
        medication_id: MedicationId,
        date: NaiveDate,
    },
    /// Intake log cleanup failed during deletion; the medication row was
    /// never touched.
    DependencyDelete {
        medication_id: MedicationId,
        cause: RepoError,
    },
    /// The underlying store call failed; surfaced, not retried.
    Store(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::AuthRequired => write!(f, "command requires an authenticated user"),
            Self::AlreadyTaken {
                medication_id,
                date,
            } => write!(
                f,
                "medication {medication_id} is already marked as taken for {date}"
            ),
            Self::DependencyDelete {
                medication_id,
                cause,
            } => write!(
                f,
                "failed to delete intake logs for medication {medication_id}: {cause}"
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DependencyDelete { cause, .. } => Some(cause),
            Self::Store(err) => Some(err),
            Self::AuthRequired | Self::AlreadyTaken { .. } => None,
        }
    }
}

impl From<MedicationValidationError> for ServiceError {
    fn from(value: MedicationValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        // Keep the taxonomy flat: a validation failure that surfaced through
        // the repository is still a validation failure to the caller.
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Use-case service for medication commands and the daily overview.
pub struct MedicationService<M, L> {
    medications: M,
    logs: L,
}

impl<M: MedicationRepository, L: IntakeLogRepository> MedicationService<M, L> {
    /// Creates a service over the provided repository implementations.
    pub fn new(medications: M, logs: L) -> Self {
        Self { medications, logs }
    }

    /// Lists the user's medications joined with today's intake logs.
    ///
    /// # Contract
    /// - Medications arrive ordered by `time_to_take` ascending.
    /// - Output is a pure function of store contents and `now`; callers
    ///   re-invoke after each successful command instead of patching
    ///   incrementally.
    pub fn fetch_overview(
        &self,
        session: &Session,
        now: NaiveDateTime,
    ) -> ServiceResult<Vec<MedicationStatus>> {
        let user_id = require_user(session)?;
        let medications = self.medications.list_medications(user_id)?;
        let todays_logs = self.logs.list_logs_for_day(user_id, now.date())?;
        Ok(reconcile(&medications, &todays_logs, now))
    }

    /// Creates a medication definition from caretaker input.
    ///
    /// # Errors
    /// - `AuthRequired` without an authenticated user.
    /// - `Validation` before any store call when a field constraint fails.
    pub fn add_medication(
        &self,
        session: &Session,
        draft: MedicationDraft,
    ) -> ServiceResult<MedicationId> {
        let user_id = require_user(session)?;
        let medication = Medication::from_draft(user_id, draft)?;
        let id = self.medications.insert_medication(&medication)?;
        info!("event=add_medication module=service status=ok medication_id={id}");
        Ok(id)
    }

    /// Deletes a medication and all intake logs referencing it.
    ///
    /// # Contract
    /// - The user's own logs are deleted first. If that fails, the command
    ///   stops with `DependencyDelete` and the medication row is unchanged.
    /// - If the medication deletion itself fails afterwards, the logs are
    ///   already gone; there is no compensating rollback.
    /// - Both steps are scoped to `session`'s user: another user's
    ///   medication id removes nothing.
    pub fn delete_medication(
        &self,
        session: &Session,
        medication_id: MedicationId,
    ) -> ServiceResult<()> {
        let user_id = require_user(session)?;

        let removed_logs = self
            .logs
            .delete_logs_for_medication(user_id, medication_id)
            .map_err(|cause| {
                warn!(
                    "event=delete_medication module=service status=error \
                     medication_id={medication_id} step=delete_logs error={cause}"
                );
                ServiceError::DependencyDelete {
                    medication_id,
                    cause,
                }
            })?;

        self.medications.delete_medication(user_id, medication_id)?;
        info!(
            "event=delete_medication module=service status=ok \
             medication_id={medication_id} logs_removed={removed_logs}"
        );
        Ok(())
    }

    /// Records today's intake for a medication.
    ///
    /// # Contract
    /// - The existence pre-check is a fast path; a concurrent writer can
    ///   slip past it, in which case the store's unique index rejects the
    ///   insert and the result is still `AlreadyTaken`.
    pub fn mark_as_taken(
        &self,
        session: &Session,
        medication_id: MedicationId,
        now: NaiveDateTime,
    ) -> ServiceResult<IntakeLogId> {
        let user_id = require_user(session)?;
        let date = now.date();

        if self
            .logs
            .find_log_for_day(medication_id, user_id, date)?
            .is_some()
        {
            return Err(ServiceError::AlreadyTaken {
                medication_id,
                date,
            });
        }

        let log = IntakeLog::new(medication_id, user_id, now);
        match self.logs.insert_log(&log) {
            Ok(id) => {
                info!(
                    "event=mark_as_taken module=service status=ok \
                     medication_id={medication_id} date={date}"
                );
                Ok(id)
            }
            Err(RepoError::DuplicateLog {
                medication_id,
                date,
            }) => Err(ServiceError::AlreadyTaken {
                medication_id,
                date,
            }),
            Err(err) => Err(err.into()),
        }
    }
}

fn require_user(session: &Session) -> ServiceResult<UserId> {
    session.user_id.ok_or(ServiceError::AuthRequired)
}
