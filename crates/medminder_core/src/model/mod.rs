//! Domain model for medication definitions and intake logs.
//!
//! # Responsibility
//! - Define the canonical records shared by reconciliation, repos and services.
//! - Own field-level validation for caretaker-supplied medication input.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - At most one `IntakeLog` exists per (medication, user, date); the store
//!   enforces this with a unique index, the service pre-checks it for UX.

pub mod intake_log;
pub mod medication;
