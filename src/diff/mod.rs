//! Diff synthesis: per-entity emitters, table orchestration and script
//! assembly

mod code;
mod column;
mod constraint;
mod depends;
mod index;
mod options;
mod rebuild;
mod table;
mod trigger;

pub use rebuild::{table_rebuild, RebuildPlan};

use rayon::prelude::*;

use crate::model::{Database, Table};
use crate::script::ScriptList;
use crate::{MigrationScript, ScriptOptions};

/// Per-table synthesis result.
pub(crate) struct TableDiff {
    pub(crate) list: ScriptList,
    pub(crate) warnings: Vec<String>,
}

/// Walk the graph, diff every node and assemble the final ordered script.
///
/// Per-table diffs only read the shared graph and append to their own
/// fragment list, so they run in parallel; the final sort and concatenation
/// stays single-threaded to preserve the global ordering guarantee.
pub fn database_diff(database: &Database, options: &ScriptOptions) -> MigrationScript {
    let mut tables: Vec<&Table> = database.tables().collect();
    tables.sort_by(|a, b| a.cmp_for_script(b, database));

    let diffs: Vec<TableDiff> = tables
        .par_iter()
        .map(|table| table::table_diff(table, database, options))
        .collect();

    let mut list = ScriptList::new();
    let mut warnings = Vec::new();
    for diff in diffs {
        list.extend(diff.list);
        warnings.extend(diff.warnings);
    }
    for view in database.views() {
        list.extend(code::code_diff(view));
    }
    for function in database.functions() {
        list.extend(code::code_diff(function));
    }
    for trigger in database.ddl_triggers() {
        list.extend(trigger::trigger_diff(trigger, None));
    }

    MigrationScript {
        sql: list.to_sql(),
        warnings,
    }
}
