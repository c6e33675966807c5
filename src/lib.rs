//! rust-sqldiff: dependency-aware DDL script synthesis for SQL Server schemas
//!
//! Given a schema object graph whose nodes already carry a per-node change
//! classification (assigned by an external comparer), this library emits the
//! ordered DDL script that migrates the source schema to the target: the
//! right fragment per node, ordered so no statement runs before the objects
//! it depends on exist (or after the objects depending on it are gone), with
//! a full table rebuild substituted wherever an in-place `ALTER` cannot
//! express the change.

pub mod depend;
pub mod diff;
pub mod error;
pub mod model;
pub mod script;
mod util;

use anyhow::Result;

pub use error::SqlDiffError;

/// Options controlling script synthesis
#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    /// When true, tables classified as dropped keep their `DROP TABLE` (and
    /// the foreign key drops that would precede it) out of the script.
    pub ignore_table_drops: bool,
}

/// The synthesized migration script plus non-fatal synthesis warnings
#[derive(Debug, Clone)]
pub struct MigrationScript {
    /// Ordered script text with `GO` batch separators.
    pub sql: String,
    /// Degraded-but-safe outcomes encountered along the way, e.g. a rebuild
    /// plan that had to be abandoned.
    pub warnings: Vec<String>,
}

/// Synthesize the migration script for a compared database graph
pub fn generate_script(
    database: &model::Database,
    options: &ScriptOptions,
) -> Result<MigrationScript> {
    Ok(diff::database_diff(database, options))
}
