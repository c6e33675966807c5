//! Error types for rust-sqldiff

use thiserror::Error;

/// Errors that can occur while planning a table rebuild
#[derive(Error, Debug)]
pub enum SqlDiffError {
    #[error("table {table} has no original definition to restore storage options from")]
    MissingOriginal { table: String },

    #[error("rebuild of {table} collides with existing object {temp_name}")]
    TempTableCollision { table: String, temp_name: String },
}
