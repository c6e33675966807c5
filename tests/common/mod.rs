//! Common test utilities for rust-sqldiff tests
//!
//! Graph construction helpers. Statuses default to `Original`; tests set
//! the classifications they need before inserting objects into the
//! database.

use rust_sqldiff::depend::Dependency;
use rust_sqldiff::model::{
    Column, Constraint, ConstraintType, Index, IndexColumn, IndexType, ObjectId, ObjectType, Table,
};

pub fn table(id: ObjectId, name: &str) -> Table {
    Table::new(id, "dbo", name)
}

pub fn int_column(id: ObjectId, name: &str) -> Column {
    let mut column = Column::new(id, name, "int");
    column.nullable = false;
    column
}

pub fn nvarchar_column(id: ObjectId, name: &str, size: i32) -> Column {
    let mut column = Column::new(id, name, "nvarchar");
    column.size = Some(size);
    column
}

pub fn clustered_index(id: ObjectId, name: &str, key: &str) -> Index {
    let mut index = Index::new(id, name, IndexType::Clustered);
    index.columns = vec![IndexColumn::key(key)];
    index
}

pub fn nonclustered_index(id: ObjectId, name: &str, key: &str) -> Index {
    let mut index = Index::new(id, name, IndexType::Nonclustered);
    index.columns = vec![IndexColumn::key(key)];
    index
}

pub fn foreign_key(
    id: ObjectId,
    name: &str,
    column: &str,
    referenced_table: &str,
    referenced_table_id: ObjectId,
) -> Constraint {
    let mut fk = Constraint::new(id, name, ConstraintType::ForeignKey);
    fk.columns = vec![column.to_string()];
    fk.referenced_table = Some(referenced_table.to_string());
    fk.referenced_table_id = Some(referenced_table_id);
    fk.referenced_columns = vec!["Id".to_string()];
    fk
}

/// A foreign key dependency record: both a resolvable constraint dependent
/// and a unit of the owning table's dependency count.
pub fn constraint_dependency(owner: ObjectId, name: &str, parent_table: &str) -> Dependency {
    Dependency {
        owner,
        column: None,
        object_type: ObjectType::Constraint,
        full_name: name.to_string(),
        parent_table: Some(parent_table.to_string()),
    }
}

pub fn index_dependency(owner: ObjectId, name: &str, column: Option<ObjectId>) -> Dependency {
    Dependency {
        owner,
        column,
        object_type: ObjectType::Index,
        full_name: name.to_string(),
        parent_table: None,
    }
}

pub fn view_dependency(owner: ObjectId, full_name: &str) -> Dependency {
    Dependency {
        owner,
        column: None,
        object_type: ObjectType::View,
        full_name: full_name.to_string(),
        parent_table: None,
    }
}
