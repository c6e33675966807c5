//! Index diff emitter

use crate::model::{ChangeStatus, Index};
use crate::script::{ScriptAction, ScriptList};

/// Fragments for a single index according to its status. Indexes have no
/// in-place alter here; a changed definition is dropped and recreated.
pub(crate) fn index_diff(index: &Index, table_full_name: &str, weight: usize) -> ScriptList {
    let mut list = ScriptList::new();
    match index.status {
        ChangeStatus::Create => {
            list.add(index.to_sql_add(table_full_name), weight, ScriptAction::AddIndex);
        }
        ChangeStatus::Drop => {
            list.add(
                index.to_sql_drop(table_full_name, None),
                weight,
                ScriptAction::DropIndex,
            );
        }
        ChangeStatus::Alter => {
            list.add(
                index.to_sql_drop(table_full_name, None),
                weight,
                ScriptAction::DropIndex,
            );
            list.add(index.to_sql_add(table_full_name), weight, ScriptAction::AddIndex);
        }
        _ => {}
    }
    list
}

pub(crate) fn indexes_diff(indexes: &[Index], table_full_name: &str, weight: usize) -> ScriptList {
    let mut list = ScriptList::new();
    for index in indexes {
        list.extend(index_diff(index, table_full_name, weight));
    }
    list
}
