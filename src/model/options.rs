//! Table storage/behavior option bag

use super::ChangeStatus;

/// A single `sp_tableoption` style setting.
#[derive(Debug, Clone)]
pub struct TableOption {
    pub name: String,
    pub value: String,
    pub status: ChangeStatus,
}

impl TableOption {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            status: ChangeStatus::Original,
        }
    }

    pub fn to_sql(&self, table_full_name: &str) -> String {
        format!(
            "EXEC sp_tableoption N'{}', N'{}', N'{}'\nGO\n",
            table_full_name, self.name, self.value
        )
    }
}

/// Options bag owned by a table.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub items: Vec<TableOption>,
}

impl TableOptions {
    /// Re-apply every current setting, used after a table rebuild.
    pub fn to_sql(&self, table_full_name: &str) -> String {
        self.items
            .iter()
            .filter(|opt| opt.status != ChangeStatus::Drop)
            .map(|opt| opt.to_sql(table_full_name))
            .collect()
    }
}
