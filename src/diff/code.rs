//! View and function diff emitter

use crate::model::{ChangeStatus, CodeObject, CodeType};
use crate::script::{ScriptAction, ScriptList};

fn actions(code: &CodeObject) -> (ScriptAction, ScriptAction) {
    match code.code_type {
        CodeType::View => (ScriptAction::DropView, ScriptAction::AddView),
        CodeType::Function => (ScriptAction::DropFunction, ScriptAction::AddFunction),
    }
}

/// Code objects are redefined wholesale: `Alter` drops and recreates.
pub(crate) fn code_diff(code: &CodeObject) -> ScriptList {
    let mut list = ScriptList::new();
    let (drop_action, add_action) = actions(code);
    match code.status {
        ChangeStatus::Create => list.add(code.to_sql_add(), 0, add_action),
        ChangeStatus::Drop => list.add(code.to_sql_drop(), 0, drop_action),
        ChangeStatus::Alter => {
            list.add(code.to_sql_drop(), 0, drop_action);
            list.add(code.to_sql_add(), 0, add_action);
        }
        _ => {}
    }
    list
}
