//! Process-wide identity registry
//!
//! Maps fully-qualified names to object handles. The registry is populated
//! explicitly while the graph is assembled (see `Database::insert_table` and
//! friends) and is read-only during synthesis, which is what makes per-table
//! diff generation safe to parallelize.

use indexmap::IndexMap;

use super::{ObjectId, ObjectType};

/// Lightweight handle to a registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHandle {
    pub object_type: ObjectType,
    pub id: ObjectId,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    objects: IndexMap<String, ObjectHandle>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fully-qualified name. Returns `false` without touching the
    /// registry when the name is already taken.
    pub fn register(&mut self, full_name: &str, object_type: ObjectType, id: ObjectId) -> bool {
        if self.objects.contains_key(full_name) {
            return false;
        }
        self.objects
            .insert(full_name.to_string(), ObjectHandle { object_type, id });
        true
    }

    pub fn get(&self, full_name: &str) -> Option<&ObjectHandle> {
        self.objects.get(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.objects.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = IdentityRegistry::new();
        assert!(registry.register("[dbo].[Users]", ObjectType::Table, 10));
        let handle = registry.get("[dbo].[Users]").unwrap();
        assert_eq!(handle.id, 10);
        assert_eq!(handle.object_type, ObjectType::Table);
    }

    #[test]
    fn test_duplicate_registration_is_noop() {
        let mut registry = IdentityRegistry::new();
        assert!(registry.register("[dbo].[Users]", ObjectType::Table, 10));
        assert!(!registry.register("[dbo].[Users]", ObjectType::View, 99));
        // first registration wins
        assert_eq!(registry.get("[dbo].[Users]").unwrap().id, 10);
        assert_eq!(registry.len(), 1);
    }
}
