//! Medication repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable access to the `medications` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Medication::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Listing returns rows ordered by `time_to_take` ascending with a
//!   deterministic `id` tie-break.

use crate::model::medication::{Medication, MedicationId, UserId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const MEDICATION_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    name,
    dosage,
    time_to_take,
    reminder_window_minutes
FROM medications";

/// Repository interface for medication definitions.
pub trait MedicationRepository {
    fn insert_medication(&self, medication: &Medication) -> RepoResult<MedicationId>;
    fn list_medications(&self, user_id: UserId) -> RepoResult<Vec<Medication>>;
    fn delete_medication(&self, user_id: UserId, id: MedicationId) -> RepoResult<()>;
}

/// SQLite-backed medication repository.
pub struct SqliteMedicationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedicationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MedicationRepository for SqliteMedicationRepository<'_> {
    fn insert_medication(&self, medication: &Medication) -> RepoResult<MedicationId> {
        medication.validate()?;

        self.conn.execute(
            "INSERT INTO medications (
                id,
                user_id,
                name,
                dosage,
                time_to_take,
                reminder_window_minutes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                medication.id.to_string(),
                medication.user_id.to_string(),
                medication.name.as_str(),
                medication.dosage.as_str(),
                medication.time_to_take.as_str(),
                medication.reminder_window_minutes,
            ],
        )?;

        Ok(medication.id)
    }

    fn list_medications(&self, user_id: UserId) -> RepoResult<Vec<Medication>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEDICATION_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY time_to_take ASC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![user_id.to_string()])?;
        let mut medications = Vec::new();

        while let Some(row) = rows.next()? {
            medications.push(parse_medication_row(row)?);
        }

        Ok(medications)
    }

    fn delete_medication(&self, user_id: UserId, id: MedicationId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM medications WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), user_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_medication_row(row: &Row<'_>) -> RepoResult<Medication> {
    let id = parse_uuid_column(row, "id")?;
    let user_id = parse_uuid_column(row, "user_id")?;

    let window: i64 = row.get("reminder_window_minutes")?;
    let reminder_window_minutes = u32::try_from(window).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid reminder window `{window}` in medications.reminder_window_minutes"
        ))
    })?;

    let medication = Medication {
        id,
        user_id,
        name: row.get("name")?,
        dosage: row.get("dosage")?,
        time_to_take: row.get("time_to_take")?,
        reminder_window_minutes,
    };
    medication.validate()?;
    Ok(medication)
}

pub(crate) fn parse_uuid_column(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in `{column}`")))
}
