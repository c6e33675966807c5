//! Table options diff emitter

use crate::model::{ChangeStatus, Table};
use crate::script::{ScriptAction, ScriptList};

/// New and changed settings are (re)applied. Removed settings are left to
/// the comparer to express as an alter back to the engine default, since
/// `sp_tableoption` has no generic reset form.
pub(crate) fn options_diff(table: &Table) -> ScriptList {
    let mut list = ScriptList::new();
    let full_name = table.full_name();
    for option in &table.options.items {
        if matches!(option.status, ChangeStatus::Create | ChangeStatus::Alter) {
            list.add(option.to_sql(&full_name), 0, ScriptAction::AlterTableOptions);
        }
    }
    list
}
