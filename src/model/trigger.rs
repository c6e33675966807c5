//! Trigger entity

use super::{ChangeStatus, ObjectId};
use crate::util::two_part;

/// A code-bearing trigger, either table-scoped (DML) or database-scoped (DDL).
#[derive(Debug, Clone)]
pub struct Trigger {
    pub id: ObjectId,
    pub owner: String,
    pub name: String,
    pub status: ChangeStatus,
    /// Full `CREATE TRIGGER` text.
    pub text: String,
    pub is_disabled: bool,
    pub instead_of: bool,
    pub not_for_replication: bool,
    /// Database-scoped trigger; enable/disable and drop syntax differ.
    pub is_ddl_trigger: bool,
}

impl Trigger {
    pub fn new(id: ObjectId, owner: &str, name: &str, text: &str) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            status: ChangeStatus::Original,
            text: text.to_string(),
            is_disabled: false,
            instead_of: false,
            not_for_replication: false,
            is_ddl_trigger: false,
        }
    }

    pub fn full_name(&self) -> String {
        two_part(&self.owner, &self.name)
    }

    pub fn to_sql_add(&self) -> String {
        format!("{}\nGO\n", self.text.trim_end())
    }

    pub fn to_sql_drop(&self) -> String {
        if self.is_ddl_trigger {
            format!("DROP TRIGGER {} ON DATABASE\nGO\n", self.full_name())
        } else {
            format!("DROP TRIGGER {}\nGO\n", self.full_name())
        }
    }

    /// Enable/disable toggle. Table-scoped triggers toggle through their
    /// parent table; DDL triggers use the bare statement.
    pub fn to_sql_enabled_disabled(&self, table_full_name: Option<&str>) -> String {
        let verb = if self.is_disabled { "DISABLE" } else { "ENABLE" };
        match table_full_name {
            Some(table) if !self.is_ddl_trigger => {
                format!("ALTER TABLE {} {} TRIGGER [{}]\nGO\n", table, verb, self.name)
            }
            _ => format!("{} TRIGGER [{}]\nGO\n", verb, self.name),
        }
    }
}
