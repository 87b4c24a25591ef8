//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the add/delete/mark-as-taken commands
//!   and the daily overview query.
//! - Keep presentation layers decoupled from storage details.

pub mod medication_service;
