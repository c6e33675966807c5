//! Database graph root

use indexmap::IndexMap;

use super::{CodeObject, IdentityRegistry, ObjectId, ObjectType, Table, Trigger};
use crate::depend::DependencyIndex;

/// Root of the schema object graph for one comparison run.
///
/// Insertion methods register every object under its fully-qualified name in
/// the identity registry; registration is the explicit, visible step here
/// rather than a side effect buried in child collections. Duplicate names
/// are silently skipped by the registry.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub id: ObjectId,
    pub name: String,
    tables: IndexMap<String, Table>,
    views: IndexMap<String, CodeObject>,
    functions: IndexMap<String, CodeObject>,
    ddl_triggers: Vec<Trigger>,
    pub dependencies: DependencyIndex,
    pub registry: IdentityRegistry,
}

impl Database {
    pub fn new(id: ObjectId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Insert a table, registering it and all of its children.
    pub fn insert_table(&mut self, table: Table) {
        let table_full = table.full_name();
        self.registry
            .register(&table_full, ObjectType::Table, table.id);
        for column in &table.columns {
            self.registry.register(
                &format!("{}.[{}]", table_full, column.name),
                ObjectType::Column,
                column.id,
            );
            if let Some(default) = &column.default_constraint {
                self.registry.register(
                    &format!("{}.[{}]", table_full, default.name),
                    ObjectType::Default,
                    default.id,
                );
            }
        }
        for constraint in &table.constraints {
            self.registry.register(
                &format!("{}.[{}]", table_full, constraint.name),
                ObjectType::Constraint,
                constraint.id,
            );
        }
        for index in &table.indexes {
            self.registry.register(
                &format!("{}.[{}]", table_full, index.name),
                ObjectType::Index,
                index.id,
            );
        }
        for trigger in &table.triggers {
            self.registry
                .register(&trigger.full_name(), ObjectType::Trigger, trigger.id);
        }
        self.tables.insert(table_full, table);
    }

    pub fn insert_view(&mut self, view: CodeObject) {
        self.registry
            .register(&view.full_name(), ObjectType::View, view.id);
        self.views.insert(view.full_name(), view);
    }

    pub fn insert_function(&mut self, function: CodeObject) {
        self.registry
            .register(&function.full_name(), ObjectType::Function, function.id);
        self.functions.insert(function.full_name(), function);
    }

    pub fn insert_ddl_trigger(&mut self, trigger: Trigger) {
        self.registry
            .register(&trigger.full_name(), ObjectType::Trigger, trigger.id);
        self.ddl_triggers.push(trigger);
    }

    /// Look up a table by its full name, e.g. `[dbo].[Users]`.
    pub fn table(&self, full_name: &str) -> Option<&Table> {
        self.tables.get(full_name)
    }

    pub fn view(&self, full_name: &str) -> Option<&CodeObject> {
        self.views.get(full_name)
    }

    pub fn function(&self, full_name: &str) -> Option<&CodeObject> {
        self.functions.get(full_name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn views(&self) -> impl Iterator<Item = &CodeObject> {
        self.views.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &CodeObject> {
        self.functions.values()
    }

    pub fn ddl_triggers(&self) -> impl Iterator<Item = &Trigger> {
        self.ddl_triggers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    #[test]
    fn test_insert_table_registers_children() {
        let mut db = Database::new(1, "app");
        let mut table = Table::new(10, "dbo", "Users");
        table.columns.push(Column::new(11, "Id", "int"));
        db.insert_table(table);

        assert!(db.registry.contains("[dbo].[Users]"));
        assert!(db.registry.contains("[dbo].[Users].[Id]"));
        assert!(db.table("[dbo].[Users]").is_some());
    }

    #[test]
    fn test_duplicate_table_name_keeps_first_registration() {
        let mut db = Database::new(1, "app");
        db.insert_table(Table::new(10, "dbo", "Users"));
        db.insert_table(Table::new(20, "dbo", "Users"));
        assert_eq!(db.registry.get("[dbo].[Users]").unwrap().id, 10);
    }
}
