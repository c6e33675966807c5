//! Column diff emitter

use super::constraint::constraint_diff;
use crate::model::{ChangeStatus, Table};
use crate::script::{ScriptAction, ScriptList};

/// How the owning table's change is being realized, which decides how much
/// of a column's change the emitter still has to express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnDiffMode {
    /// Plain in-place alteration; columns and their defaults diff normally.
    Alter,
    /// Dependents are dropped and recreated around in-place column alters;
    /// default constraints ride along with the dependent sweep.
    RebuildDependencies,
    /// Full table rebuild; structural column changes are realized by the
    /// rebuild itself.
    Rebuild,
}

pub(crate) fn columns_diff(table: &Table, weight: usize, mode: ColumnDiffMode) -> ScriptList {
    let mut list = ScriptList::new();
    let full_name = table.full_name();
    for column in &table.columns {
        if mode != ColumnDiffMode::Rebuild {
            match column.status {
                ChangeStatus::Create => {
                    list.add(column.to_sql_add(&full_name), 0, ScriptAction::AddColumn);
                }
                ChangeStatus::Drop => {
                    list.add(column.to_sql_drop(&full_name), 0, ScriptAction::DropColumn);
                }
                ChangeStatus::Alter | ChangeStatus::AlterRebuildDependencies => {
                    list.add(column.to_sql_alter(&full_name), 0, ScriptAction::AlterColumn);
                }
                _ => {}
            }
        }
        if let Some(default) = &column.default_constraint {
            match mode {
                ColumnDiffMode::Alter => {
                    list.extend(constraint_diff(default, &full_name, weight));
                }
                // the dependent sweep recreates surviving defaults; only
                // outright drops still need a statement here
                ColumnDiffMode::RebuildDependencies | ColumnDiffMode::Rebuild => {
                    if default.status == ChangeStatus::Drop {
                        list.extend(constraint_diff(default, &full_name, weight));
                    }
                }
            }
        }
    }
    list
}
