//! Intake log repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable access to the `medication_logs` table.
//! - Surface the once-per-day unique index as a semantic `DuplicateLog`
//!   error instead of a raw SQLite failure.
//!
//! # Invariants
//! - `date` and `taken_at` columns round-trip through fixed text formats
//!   (`%Y-%m-%d` and `%Y-%m-%dT%H:%M:%S`).
//! - Every query and mutation is scoped to the owning user; a caller holding
//!   someone else's medication id cannot touch that user's rows.

use crate::model::intake_log::{IntakeLog, IntakeLogId};
use crate::model::medication::{MedicationId, UserId};
use crate::repo::medication_repo::parse_uuid_column;
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};

const LOG_SELECT_SQL: &str = "SELECT
    id,
    medication_id,
    user_id,
    date,
    taken_at
FROM medication_logs";

const TAKEN_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Repository interface for intake logs.
pub trait IntakeLogRepository {
    /// Inserts a log entry; the unique once-per-day index maps to
    /// [`RepoError::DuplicateLog`].
    fn insert_log(&self, log: &IntakeLog) -> RepoResult<IntakeLogId>;
    fn list_logs_for_day(&self, user_id: UserId, date: NaiveDate) -> RepoResult<Vec<IntakeLog>>;
    fn find_log_for_day(
        &self,
        medication_id: MedicationId,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Option<IntakeLog>>;
    /// Removes every log the user owns for the medication; returns the
    /// count. The cleanup step that precedes medication deletion.
    fn delete_logs_for_medication(
        &self,
        user_id: UserId,
        medication_id: MedicationId,
    ) -> RepoResult<usize>;
}

/// SQLite-backed intake log repository.
pub struct SqliteIntakeLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIntakeLogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl IntakeLogRepository for SqliteIntakeLogRepository<'_> {
    fn insert_log(&self, log: &IntakeLog) -> RepoResult<IntakeLogId> {
        let inserted = self.conn.execute(
            "INSERT INTO medication_logs (
                id,
                medication_id,
                user_id,
                date,
                taken_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                log.id.to_string(),
                log.medication_id.to_string(),
                log.user_id.to_string(),
                log.date.to_string(),
                log.taken_at.format(TAKEN_AT_FORMAT).to_string(),
            ],
        );

        match inserted {
            Ok(_) => Ok(log.id),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(RepoError::DuplicateLog {
                    medication_id: log.medication_id,
                    date: log.date,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_logs_for_day(&self, user_id: UserId, date: NaiveDate) -> RepoResult<Vec<IntakeLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOG_SELECT_SQL}
             WHERE user_id = ?1 AND date = ?2
             ORDER BY taken_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![user_id.to_string(), date.to_string()])?;
        let mut logs = Vec::new();

        while let Some(row) = rows.next()? {
            logs.push(parse_log_row(row)?);
        }

        Ok(logs)
    }

    fn find_log_for_day(
        &self,
        medication_id: MedicationId,
        user_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Option<IntakeLog>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOG_SELECT_SQL}
             WHERE medication_id = ?1 AND user_id = ?2 AND date = ?3;"
        ))?;

        let mut rows = stmt.query(params![
            medication_id.to_string(),
            user_id.to_string(),
            date.to_string()
        ])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_log_row(row)?));
        }

        Ok(None)
    }

    fn delete_logs_for_medication(
        &self,
        user_id: UserId,
        medication_id: MedicationId,
    ) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM medication_logs WHERE medication_id = ?1 AND user_id = ?2;",
            params![medication_id.to_string(), user_id.to_string()],
        )?;

        Ok(removed)
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<IntakeLog> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in medication_logs.date"
        ))
    })?;

    let taken_at_text: String = row.get("taken_at")?;
    let taken_at = NaiveDateTime::parse_from_str(&taken_at_text, TAKEN_AT_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid taken_at value `{taken_at_text}` in medication_logs.taken_at"
        ))
    })?;

    Ok(IntakeLog {
        id: parse_uuid_column(row, "id")?,
        medication_id: parse_uuid_column(row, "medication_id")?,
        user_id: parse_uuid_column(row, "user_id")?,
        date,
        taken_at,
    })
}
