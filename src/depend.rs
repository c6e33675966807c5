//! Dependency index
//!
//! Maps an owning table's identifier (optionally narrowed by a column) to
//! the records describing which other objects reference it. The index is
//! built alongside the graph by the external comparer and consumed
//! read-only during synthesis.

use std::collections::HashMap;

use crate::model::{ObjectId, ObjectType};

/// A reference from one object to another.
///
/// `full_name` identifies the dependent object within its resolution scope:
/// bare names for indexes and constraints (resolved against a table's own
/// collections, with `parent_table` naming the owning table for constraint
/// records), the owning column's name for defaults, and the two-part name
/// for views and functions.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Table whose change invalidates the dependent object.
    pub owner: ObjectId,
    /// Referenced column, when the dependency is column-scoped.
    pub column: Option<ObjectId>,
    /// Kind of the dependent object.
    pub object_type: ObjectType,
    pub full_name: String,
    /// Owning table of the dependent object, for constraint records.
    pub parent_table: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    by_owner: HashMap<ObjectId, Vec<Dependency>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, dependency: Dependency) {
        self.by_owner
            .entry(dependency.owner)
            .or_default()
            .push(dependency);
    }

    /// All records for an owning table.
    pub fn find(&self, owner: ObjectId) -> &[Dependency] {
        self.by_owner
            .get(&owner)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records narrowed to a specific referenced column.
    pub fn find_for_column(&self, owner: ObjectId, column: ObjectId) -> Vec<&Dependency> {
        self.find(owner)
            .iter()
            .filter(|d| d.column == Some(column))
            .collect()
    }

    /// Number of dependents of a given kind, e.g. foreign key constraints
    /// referencing a table.
    pub fn count(&self, owner: ObjectId, object_type: ObjectType) -> usize {
        self.find(owner)
            .iter()
            .filter(|d| d.object_type == object_type)
            .count()
    }
}
