//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define store access contracts for medications and intake logs.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Medication::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateLog`) in
//!   addition to DB transport errors.

use crate::db::DbError;
use crate::model::medication::{MedicationId, MedicationValidationError};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod log_repo;
pub mod medication_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for medication and intake log persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(MedicationValidationError),
    Db(DbError),
    NotFound(MedicationId),
    /// The unique once-per-day index rejected an intake log insert.
    DuplicateLog {
        medication_id: MedicationId,
        date: NaiveDate,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "medication not found: {id}"),
            Self::DuplicateLog {
                medication_id,
                date,
            } => write!(
                f,
                "intake log already exists for medication {medication_id} on {date}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted row data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateLog { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<MedicationValidationError> for RepoError {
    fn from(value: MedicationValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
