//! Trigger diff emitter

use crate::model::{ChangeStatus, Table, Trigger};
use crate::script::{ScriptAction, ScriptList};

/// Fragments for a single trigger. There is no partial trigger alter, so
/// `Alter` redefines by dropping and recreating. `table` is `None` for
/// database-scoped DDL triggers.
pub(crate) fn trigger_diff(trigger: &Trigger, table: Option<&Table>) -> ScriptList {
    let mut list = ScriptList::new();
    let table_full = table.map(|t| t.full_name());
    match trigger.status {
        ChangeStatus::Create => {
            list.add(trigger.to_sql_add(), 0, ScriptAction::AddTrigger);
        }
        ChangeStatus::Drop => {
            list.add(trigger.to_sql_drop(), 0, ScriptAction::DropTrigger);
        }
        ChangeStatus::Alter => {
            list.add(trigger.to_sql_drop(), 0, ScriptAction::DropTrigger);
            list.add(trigger.to_sql_add(), 0, ScriptAction::AddTrigger);
        }
        ChangeStatus::Disabled => {
            let action = if trigger.is_disabled {
                ScriptAction::DisableTrigger
            } else {
                ScriptAction::EnableTrigger
            };
            list.add(
                trigger.to_sql_enabled_disabled(table_full.as_deref()),
                0,
                action,
            );
        }
        _ => {}
    }
    list
}

pub(crate) fn triggers_diff(table: &Table) -> ScriptList {
    let mut list = ScriptList::new();
    for trigger in &table.triggers {
        list.extend(trigger_diff(trigger, Some(table)));
    }
    list
}
