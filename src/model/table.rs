//! Table entity

use std::cmp::Ordering;

use once_cell::sync::OnceCell;

use super::{
    ChangeStatus, Column, Constraint, ConstraintType, Database, Index, IndexType, ObjectId,
    ObjectType, TableOptions, Trigger,
};
use crate::util::two_part;

/// A table and its owned child collections.
///
/// The `original` field holds the table's pre-change shape and is consulted
/// by the rebuild planner (storage options are restored from it) and by the
/// storage-relocation path. The dependency count is derived from the
/// database's dependency index on first use and memoized.
#[derive(Debug, Clone)]
pub struct Table {
    pub id: ObjectId,
    pub owner: String,
    pub name: String,
    pub status: ChangeStatus,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub indexes: Vec<Index>,
    pub triggers: Vec<Trigger>,
    pub options: TableOptions,
    /// Row storage placement.
    pub file_group: Option<String>,
    /// Large-object storage placement (`TEXTIMAGE_ON`).
    pub text_file_group: Option<String>,
    pub has_clustered_index: bool,
    /// Pre-change shape of the table, set by the comparer when a rebuild
    /// may be required.
    pub original: Option<Box<Table>>,
    dependencies_count: OnceCell<usize>,
}

impl Table {
    pub fn new(id: ObjectId, owner: &str, name: &str) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            status: ChangeStatus::Original,
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
            triggers: Vec::new(),
            options: TableOptions::default(),
            file_group: None,
            text_file_group: None,
            has_clustered_index: false,
            original: None,
            dependencies_count: OnceCell::new(),
        }
    }

    pub fn full_name(&self) -> String {
        two_part(&self.owner, &self.name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    pub fn has_identity_column(&self) -> bool {
        self.columns.iter().any(|c| c.is_identity)
    }

    pub fn has_blob_column(&self) -> bool {
        self.columns.iter().any(|c| c.is_blob())
    }

    pub fn find_clustered_index(&self) -> Option<&Index> {
        self.indexes
            .iter()
            .find(|i| i.index_type == IndexType::Clustered)
    }

    /// Number of foreign keys elsewhere in the schema that reference this
    /// table. Computed once from the dependency index and memoized.
    pub fn dependencies_count(&self, database: &Database) -> usize {
        *self.dependencies_count.get_or_init(|| {
            database
                .dependencies
                .count(self.id, ObjectType::Constraint)
        })
    }

    /// Table ordering for script generation: status first, then by how many
    /// other tables depend on each.
    pub fn cmp_for_script(&self, other: &Table, database: &Database) -> Ordering {
        if self.status == other.status {
            self.dependencies_count(database)
                .cmp(&other.dependencies_count(database))
        } else {
            other.status.cmp(&self.status)
        }
    }

    /// True unless both tables name a row file group and they differ.
    pub fn same_file_group(a: &Table, b: &Table) -> bool {
        match (&a.file_group, &b.file_group) {
            (Some(x), Some(y)) => x == y,
            _ => true,
        }
    }

    /// True unless both tables name a large-object file group and they differ.
    pub fn same_text_file_group(a: &Table, b: &Table) -> bool {
        match (&a.text_file_group, &b.text_file_group) {
            (Some(x), Some(y)) => x == y,
            _ => true,
        }
    }

    fn storage_suffix(&self) -> String {
        let mut sql = String::new();
        if let Some(fg) = &self.file_group {
            sql.push_str(&format!(" ON [{}]", fg));
        }
        if let Some(text_fg) = &self.text_file_group {
            if self.has_blob_column() {
                sql.push_str(&format!(" TEXTIMAGE_ON [{}]", text_fg));
            }
        }
        sql
    }

    fn constraints_inline(&self, constraint_type: ConstraintType) -> Vec<String> {
        self.constraints
            .iter()
            .filter(|c| c.constraint_type == constraint_type)
            .map(|c| format!("\t{}", c.to_sql()))
            .collect()
    }

    /// Full `CREATE TABLE` script: the table itself, check constraints,
    /// indexes, options and triggers. Foreign keys are included inline only
    /// when `show_fk` is set; batch creation adds them separately once every
    /// referenced table exists.
    pub fn to_sql(&self, show_fk: bool) -> String {
        if self.columns.is_empty() {
            return String::new();
        }
        let mut body: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("\t{}", c.to_sql()))
            .collect();
        body.extend(self.constraints_inline(ConstraintType::PrimaryKey));
        body.extend(self.constraints_inline(ConstraintType::Unique));
        if show_fk {
            body.extend(self.constraints_inline(ConstraintType::ForeignKey));
        }
        let mut sql = format!(
            "CREATE TABLE {}\n(\n{}\n)",
            self.full_name(),
            body.join(",\n")
        );
        sql.push_str(&self.storage_suffix());
        sql.push_str("\nGO\n");
        for check in self
            .constraints
            .iter()
            .filter(|c| c.constraint_type == ConstraintType::Check)
        {
            sql.push_str(&check.to_sql_add(&self.full_name()));
        }
        for index in self.indexes.iter().filter(|i| i.status != ChangeStatus::Drop) {
            sql.push_str(&index.to_sql_add(&self.full_name()));
        }
        sql.push_str(&self.options.to_sql(&self.full_name()));
        sql.push_str(&self.triggers_sql());
        sql
    }

    pub fn to_sql_drop(&self) -> String {
        format!("DROP TABLE {}\nGO\n", self.full_name())
    }

    /// Concatenated `ADD CONSTRAINT` statements for this table's foreign
    /// keys. Empty when there are none.
    pub fn to_sql_add_fks(&self) -> String {
        self.constraints
            .iter()
            .filter(|c| c.constraint_type == ConstraintType::ForeignKey)
            .map(|c| c.to_sql_add(&self.full_name()))
            .collect()
    }

    /// Every surviving trigger's full creation text, used when the table
    /// instance is new (create or rebuild) and diffing makes no sense.
    pub fn triggers_sql(&self) -> String {
        self.triggers
            .iter()
            .filter(|t| t.status != ChangeStatus::Drop)
            .map(|t| t.to_sql_add())
            .collect()
    }

    /// Temp-table creation script for a rebuild: every surviving column in
    /// stable id order, with the original storage placement preserved.
    pub fn to_sql_temp(&self, temp_name: &str) -> String {
        let mut surviving: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.status != ChangeStatus::Drop)
            .collect();
        surviving.sort_by_key(|c| c.id);
        let body: Vec<String> = surviving
            .iter()
            .map(|c| format!("\t{}", c.to_sql()))
            .collect();
        let mut sql = format!(
            "CREATE TABLE {}\n(\n{}\n)",
            two_part(&self.owner, temp_name),
            body.join(",\n")
        );
        sql.push_str(&self.storage_suffix());
        sql.push_str("\nGO\n");
        sql
    }
}
