//! Table rebuild planner
//!
//! When a change cannot be expressed as an in-place `ALTER`, the table is
//! rebuilt: create a temp table with the target shape, copy the surviving
//! data across, drop the original and rename the temp table into place.

use crate::error::SqlDiffError;
use crate::model::{ChangeStatus, Database, Table};
use crate::util::two_part;

/// Outcome of planning a rebuild.
///
/// `Empty` is a legitimate result, not a failure: when no column survives
/// to carry data forward there is nothing to copy and nothing to emit.
/// Unexpected planning failures surface as `Err` from [`table_rebuild`];
/// callers decide whether to degrade or abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildPlan {
    Script {
        sql: String,
        /// Newly created xml columns that cannot be migrated directly and
        /// were left out of the copy.
        skipped_columns: Vec<String>,
    },
    Empty,
}

/// Build the three-part rebuild body for `table`.
///
/// The copy excludes dropped columns, newly created nullable columns,
/// computed columns, rowversion columns, and newly created xml or identity
/// columns. A column carrying a forced migration value is copied as
/// `ISNULL(source, forced)` when it already existed, or as the bare forced
/// value when it is new.
pub fn table_rebuild(table: &Table, database: &Database) -> Result<RebuildPlan, SqlDiffError> {
    let temp_name = format!("Temp{}", table.name);
    let temp_full = two_part(&table.owner, &temp_name);
    if database.registry.contains(&temp_full) {
        return Err(SqlDiffError::TempTableCollision {
            table: table.full_name(),
            temp_name: temp_full,
        });
    }

    let mut copy_columns: Vec<String> = Vec::new();
    let mut copy_values: Vec<String> = Vec::new();
    let mut skipped_columns: Vec<String> = Vec::new();
    let mut identity_is_new = false;

    for column in &table.columns {
        if column.status == ChangeStatus::Drop {
            continue;
        }
        if column.status == ChangeStatus::Create && column.nullable {
            continue;
        }
        if column.is_computed || column.is_timestamp() {
            continue;
        }
        if column.status == ChangeStatus::Create && (column.is_xml() || column.is_identity) {
            if column.is_identity {
                identity_is_new = true;
            }
            if column.is_xml() {
                skipped_columns.push(column.name.clone());
            }
            continue;
        }
        copy_columns.push(format!("[{}]", column.name));
        copy_values.push(match &column.force_value {
            Some(forced) if column.status != ChangeStatus::Create => {
                format!("ISNULL([{}], {})", column.name, forced)
            }
            Some(forced) => forced.clone(),
            None => format!("[{}]", column.name),
        });
    }

    if copy_columns.is_empty() {
        return Ok(RebuildPlan::Empty);
    }

    // storage options come back from the pre-change shape once the rename
    // has restored the original name
    let original = table
        .original
        .as_deref()
        .ok_or_else(|| SqlDiffError::MissingOriginal {
            table: table.full_name(),
        })?;

    let bracket_identity = table.has_identity_column() && !identity_is_new;

    let mut sql = table.to_sql_temp(&temp_name);
    if bracket_identity {
        sql.push_str(&format!("SET IDENTITY_INSERT {} ON\n", temp_full));
    }
    sql.push_str(&format!(
        "INSERT INTO {} ({}) SELECT {} FROM {}\n",
        temp_full,
        copy_columns.join(", "),
        copy_values.join(", "),
        table.full_name()
    ));
    if bracket_identity {
        sql.push_str(&format!("SET IDENTITY_INSERT {} OFF\n", temp_full));
    }
    sql.push_str("GO\n");
    sql.push_str(&table.to_sql_drop());
    sql.push_str(&format!(
        "EXEC sp_rename N'{}', N'{}', 'OBJECT'\nGO\n",
        temp_full, table.name
    ));
    sql.push_str(&original.options.to_sql(&table.full_name()));

    Ok(RebuildPlan::Script {
        sql,
        skipped_columns,
    })
}
