//! Table diff orchestration
//!
//! State machine over the table's change status. Emitter output is composed
//! per table; the rebuild planner replaces the plain alter path when a
//! change cannot be expressed in place.

use tracing::{debug, warn};

use super::column::{columns_diff, ColumnDiffMode};
use super::constraint::constraints_diff;
use super::depends::{create_dependents, drop_dependents, resolve_dependents};
use super::index::indexes_diff;
use super::options::options_diff;
use super::rebuild::{self, RebuildPlan};
use super::trigger::triggers_diff;
use super::TableDiff;
use crate::model::{ChangeStatus, ConstraintType, Database, IndexType, Table};
use crate::script::{ScriptAction, ScriptList};
use crate::ScriptOptions;

pub(crate) fn table_diff(table: &Table, database: &Database, options: &ScriptOptions) -> TableDiff {
    let mut list = ScriptList::new();
    let mut warnings = Vec::new();
    let weight = table.dependencies_count(database);

    match table.status {
        ChangeStatus::Original | ChangeStatus::Disabled => {}
        ChangeStatus::Drop => {
            if options.ignore_table_drops {
                debug!(table = %table.full_name(), "table drop suppressed by policy");
            } else {
                list.extend(foreign_key_pre_drop(table, database));
                list.add(table.to_sql_drop(), weight, ScriptAction::DropTable);
            }
        }
        ChangeStatus::Create => {
            // foreign keys are added separately so that tables created in
            // the same batch can reference each other
            list.add(table.to_sql(false), weight, ScriptAction::AddTable);
            list.add(table.to_sql_add_fks(), weight, ScriptAction::AddConstraintFk);
        }
        ChangeStatus::Alter => {
            let storage_moved = table
                .original
                .as_deref()
                .map(|original| !Table::same_file_group(original, table))
                .unwrap_or(false);
            if storage_moved {
                file_group_diff(table, database, weight, &mut list, &mut warnings);
            } else if clustered_index_lost(table) {
                rebuild_diff(table, database, weight, &mut list, &mut warnings);
            } else {
                list.extend(columns_diff(table, weight, ColumnDiffMode::Alter));
                list.extend(constraints_diff(&table.constraints, &table.full_name(), weight));
                list.extend(indexes_diff(&table.indexes, &table.full_name(), weight));
                list.extend(options_diff(table));
                list.extend(triggers_diff(table));
            }
        }
        ChangeStatus::AlterRebuildDependencies => {
            let dependents = resolve_dependents(table, database);
            list.extend(drop_dependents(table, weight, &dependents));
            list.extend(columns_diff(table, weight, ColumnDiffMode::RebuildDependencies));
            list.extend(create_dependents(table, weight, &dependents));
            list.extend(constraints_diff(&table.constraints, &table.full_name(), weight));
            list.extend(indexes_diff(&table.indexes, &table.full_name(), weight));
            list.extend(options_diff(table));
            list.extend(triggers_diff(table));
        }
        ChangeStatus::AlterRebuild => {
            rebuild_diff(table, database, weight, &mut list, &mut warnings);
        }
    }

    TableDiff { list, warnings }
}

/// Full rebuild path: drop dependents, rebuild, recreate dependents, then
/// apply the remaining child diffs against the rebuilt table. The trigger
/// set is re-emitted wholesale since the table instance is new.
fn rebuild_diff(
    table: &Table,
    database: &Database,
    weight: usize,
    list: &mut ScriptList,
    warnings: &mut Vec<String>,
) {
    let dependents = resolve_dependents(table, database);
    list.extend(drop_dependents(table, weight, &dependents));
    match rebuild::table_rebuild(table, database) {
        Ok(RebuildPlan::Script {
            sql,
            skipped_columns,
        }) => {
            list.add(sql, weight, ScriptAction::RebuildTable);
            for column in skipped_columns {
                let message = format!(
                    "column {}.[{}] is xml and was not copied during the rebuild",
                    table.full_name(),
                    column
                );
                warn!("{}", message);
                warnings.push(message);
            }
        }
        Ok(RebuildPlan::Empty) => {}
        Err(error) => {
            let message = format!("rebuild of {} skipped: {}", table.full_name(), error);
            warn!("{}", message);
            warnings.push(message);
        }
    }
    list.extend(create_dependents(table, weight, &dependents));
    list.extend(columns_diff(table, weight, ColumnDiffMode::Rebuild));
    list.extend(constraints_diff(&table.constraints, &table.full_name(), weight));
    list.extend(indexes_diff(&table.indexes, &table.full_name(), weight));
    list.extend(options_diff(table));
    list.add(table.triggers_sql(), weight, ScriptAction::AddTrigger);
}

/// Foreign keys on other tables that target a table being dropped must go
/// first. Self-referencing keys vanish with the table itself, and a
/// referencing table that is more depended-upon than this one handles its
/// own ordering.
fn foreign_key_pre_drop(table: &Table, database: &Database) -> ScriptList {
    let mut list = ScriptList::new();
    let table_count = table.dependencies_count(database);
    for other in database.tables() {
        if other.id == table.id {
            continue;
        }
        let other_count = other.dependencies_count(database);
        if other_count > table_count {
            continue;
        }
        for constraint in &other.constraints {
            if constraint.constraint_type == ConstraintType::ForeignKey
                && constraint.referenced_table_id == Some(table.id)
            {
                list.add(
                    constraint.to_sql_drop(&other.full_name(), None),
                    other_count,
                    ScriptAction::DropConstraintFk,
                );
            }
        }
    }
    list
}

/// True when the change set removes the table's clustered index without a
/// replacement, leaving no key to reorganize the rows on.
fn clustered_index_lost(table: &Table) -> bool {
    let dropped = table
        .indexes
        .iter()
        .any(|ix| ix.index_type == IndexType::Clustered && ix.status == ChangeStatus::Drop)
        || table
            .constraints
            .iter()
            .any(|c| c.is_clustered() && c.status == ChangeStatus::Drop);
    if !dropped {
        return false;
    }
    let replacement = table
        .constraints
        .iter()
        .any(|c| c.is_clustered() && c.status == ChangeStatus::Create)
        || table
            .indexes
            .iter()
            .any(|ix| ix.index_type == IndexType::Clustered && ix.status == ChangeStatus::Create);
    !replacement
}

/// Storage relocation. Moving a table between file groups means rebuilding
/// its clustered index on the new placement; a heap with no clustered
/// constraint at all has to be rebuilt outright.
fn file_group_diff(
    table: &Table,
    database: &Database,
    weight: usize,
    list: &mut ScriptList,
    warnings: &mut Vec<String>,
) {
    let full_name = table.full_name();
    let move_to = table.file_group.as_deref();
    if let Some(clustered) = table.find_clustered_index() {
        list.add(
            clustered.to_sql_drop(&full_name, move_to),
            weight,
            ScriptAction::DropIndex,
        );
        list.add(clustered.to_sql_add(&full_name), weight, ScriptAction::AddIndex);
        return;
    }
    let mut found = false;
    for constraint in table.constraints.iter().filter(|c| c.is_clustered()) {
        list.add(
            constraint.to_sql_drop(&full_name, move_to),
            weight,
            ScriptAction::DropConstraint,
        );
        list.add(
            constraint.to_sql_add(&full_name),
            weight,
            ScriptAction::AddConstraint,
        );
        found = true;
    }
    if !found {
        rebuild_diff(table, database, weight, list, warnings);
    }
}
