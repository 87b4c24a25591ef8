//! Core domain logic for MedMinder.
//! This crate is the single source of truth for the medication-reminder
//! business invariants: the overdue rule, the medication/log reconciliation,
//! and the add/delete/mark-as-taken command contracts.

pub mod db;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::intake_log::{IntakeLog, IntakeLogId};
pub use model::medication::{
    Medication, MedicationDraft, MedicationId, MedicationValidationError, UserId,
};
pub use reconcile::{reconcile, MedicationStatus};
pub use repo::log_repo::{IntakeLogRepository, SqliteIntakeLogRepository};
pub use repo::medication_repo::{MedicationRepository, SqliteMedicationRepository};
pub use repo::{RepoError, RepoResult};
pub use schedule::{
    canonical_time_of_day, format_date_long, format_time_12h, is_overdue, parse_time_of_day,
};
pub use service::medication_service::{MedicationService, ServiceError, ServiceResult, Session};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
