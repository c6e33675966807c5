//! Dependency resolution for rebuild paths
//!
//! Turns raw dependency records into live objects with ready-made drop and
//! recreate fragments. Records that no longer resolve are skipped: the
//! referenced object does not exist in the target graph, typically because
//! it is being dropped by an unrelated change.

use std::collections::HashSet;

use crate::depend::Dependency;
use crate::model::{ChangeStatus, Database, ObjectType, Table};
use crate::script::{ScriptAction, ScriptFragment, ScriptList};

use super::constraint;

/// A dependency record resolved against the live graph.
pub(crate) struct ResolvedDependent {
    pub(crate) name: String,
    pub(crate) status: ChangeStatus,
    /// Status of the owning parent; dependents of dropped parents are not
    /// recreated.
    pub(crate) parent_status: ChangeStatus,
    pub(crate) drop: ScriptFragment,
    pub(crate) create: ScriptFragment,
}

/// Resolve the objects depending on `table`, honoring the narrowing rule:
/// for a dependencies-only rebuild the search is scoped to each altered or
/// rebuild-classified column first, widening to the whole table only when
/// no column-scoped record matches.
pub(crate) fn resolve_dependents(table: &Table, database: &Database) -> Vec<ResolvedDependent> {
    let records: Vec<&Dependency> =
        if table.status == ChangeStatus::AlterRebuildDependencies {
            let mut scoped: Vec<&Dependency> = Vec::new();
            for column in &table.columns {
                if column.status.is_altered() {
                    scoped.extend(database.dependencies.find_for_column(table.id, column.id));
                }
            }
            if scoped.is_empty() {
                database.dependencies.find(table.id).iter().collect()
            } else {
                scoped
            }
        } else {
            database.dependencies.find(table.id).iter().collect()
        };

    let weight = table.dependencies_count(database);
    records
        .into_iter()
        .filter_map(|record| resolve_record(record, table, database, weight))
        .collect()
}

fn resolve_record(
    record: &Dependency,
    table: &Table,
    database: &Database,
    weight: usize,
) -> Option<ResolvedDependent> {
    let table_full = table.full_name();
    match record.object_type {
        ObjectType::Index => {
            let index = table.index(&record.full_name)?;
            Some(ResolvedDependent {
                name: index.name.clone(),
                status: index.status,
                parent_status: table.status,
                drop: ScriptFragment::new(
                    index.to_sql_drop(&table_full, None),
                    weight,
                    ScriptAction::DropIndex,
                ),
                create: ScriptFragment::new(
                    index.to_sql_add(&table_full),
                    weight,
                    ScriptAction::AddIndex,
                ),
            })
        }
        ObjectType::Constraint => {
            let parent = database.table(record.parent_table.as_deref()?)?;
            let found = parent.constraint(&record.full_name)?;
            let parent_full = parent.full_name();
            let parent_weight = parent.dependencies_count(database);
            Some(ResolvedDependent {
                name: found.name.clone(),
                status: found.status,
                parent_status: parent.status,
                drop: constraint::drop_fragment(found, &parent_full, parent_weight),
                create: constraint::add_fragment(found, &parent_full, parent_weight),
            })
        }
        ObjectType::Default => {
            let column = table.column(&record.full_name)?;
            let default = column.default_constraint.as_ref()?;
            Some(ResolvedDependent {
                name: default.name.clone(),
                status: default.status,
                parent_status: column.status,
                drop: constraint::drop_fragment(default, &table_full, weight),
                create: constraint::add_fragment(default, &table_full, weight),
            })
        }
        ObjectType::View => {
            let view = database.view(&record.full_name)?;
            Some(ResolvedDependent {
                name: view.full_name(),
                status: view.status,
                parent_status: ChangeStatus::Original,
                drop: ScriptFragment::new(view.to_sql_drop(), 0, ScriptAction::DropView),
                create: ScriptFragment::new(view.to_sql_add(), 0, ScriptAction::AddView),
            })
        }
        ObjectType::Function => {
            let function = database.function(&record.full_name)?;
            Some(ResolvedDependent {
                name: function.full_name(),
                status: function.status,
                parent_status: ChangeStatus::Original,
                drop: ScriptFragment::new(function.to_sql_drop(), 0, ScriptAction::DropFunction),
                create: ScriptFragment::new(function.to_sql_add(), 0, ScriptAction::AddFunction),
            })
        }
        _ => None,
    }
}

/// Drop every resolved dependent that the change set is not already
/// removing, plus the default constraints of surviving columns.
pub(crate) fn drop_dependents(
    table: &Table,
    weight: usize,
    dependents: &[ResolvedDependent],
) -> ScriptList {
    let mut list = ScriptList::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for dependent in dependents {
        if dependent.status == ChangeStatus::Original && seen.insert(&dependent.name) {
            list.push(dependent.drop.clone());
        }
    }
    let table_full = table.full_name();
    for column in &table.columns {
        if let Some(default) = &column.default_constraint {
            if default.status == ChangeStatus::Original
                && column.status != ChangeStatus::Create
                && seen.insert(&default.name)
            {
                list.push(constraint::drop_fragment(default, &table_full, weight));
            }
        }
    }
    list
}

/// Recreate dependents in reverse collection order, skipping any whose
/// owning parent is itself going away, then the per-column defaults.
pub(crate) fn create_dependents(
    table: &Table,
    weight: usize,
    dependents: &[ResolvedDependent],
) -> ScriptList {
    let mut list = ScriptList::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for dependent in dependents.iter().rev() {
        if dependent.status == ChangeStatus::Original
            && dependent.parent_status != ChangeStatus::Drop
            && seen.insert(&dependent.name)
        {
            list.push(dependent.create.clone());
        }
    }
    let table_full = table.full_name();
    for column in table.columns.iter().rev() {
        if let Some(default) = &column.default_constraint {
            let can_create = matches!(
                default.status,
                ChangeStatus::Original | ChangeStatus::Create
            ) && column.status != ChangeStatus::Drop;
            if can_create && seen.insert(&default.name) {
                list.push(constraint::add_fragment(default, &table_full, weight));
            }
        }
    }
    list
}
