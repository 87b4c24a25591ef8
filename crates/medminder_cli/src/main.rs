//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `medminder_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("medminder_core version={}", medminder_core::core_version());

    // An in-memory open exercises pragmas and every registered migration.
    match medminder_core::db::open_db_in_memory() {
        Ok(_conn) => println!("medminder_core selfcheck=ok"),
        Err(err) => {
            eprintln!("medminder_core selfcheck=failed error={err}");
            std::process::exit(1);
        }
    }
}
