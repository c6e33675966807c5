//! Standalone index entity

use super::{ChangeStatus, ObjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    Clustered,
    Nonclustered,
}

#[derive(Debug, Clone)]
pub struct IndexColumn {
    pub name: String,
    pub descending: bool,
    /// INCLUDE-clause column rather than a key column.
    pub included: bool,
}

impl IndexColumn {
    pub fn key(name: &str) -> Self {
        Self {
            name: name.to_string(),
            descending: false,
            included: false,
        }
    }

    pub fn included(name: &str) -> Self {
        Self {
            name: name.to_string(),
            descending: false,
            included: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Index {
    pub id: ObjectId,
    pub name: String,
    pub status: ChangeStatus,
    pub index_type: IndexType,
    pub is_unique: bool,
    pub columns: Vec<IndexColumn>,
    pub fill_factor: Option<u8>,
    pub file_group: Option<String>,
}

impl Index {
    pub fn new(id: ObjectId, name: &str, index_type: IndexType) -> Self {
        Self {
            id,
            name: name.to_string(),
            status: ChangeStatus::Original,
            index_type,
            is_unique: false,
            columns: Vec::new(),
            fill_factor: None,
            file_group: None,
        }
    }

    pub fn to_sql_add(&self, table_full_name: &str) -> String {
        let unique = if self.is_unique { "UNIQUE " } else { "" };
        let kind = match self.index_type {
            IndexType::Clustered => "CLUSTERED",
            IndexType::Nonclustered => "NONCLUSTERED",
        };
        let keys = self
            .columns
            .iter()
            .filter(|c| !c.included)
            .map(|c| {
                format!(
                    "[{}] {}",
                    c.name,
                    if c.descending { "DESC" } else { "ASC" }
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!(
            "CREATE {}{} INDEX [{}] ON {} ({})",
            unique, kind, self.name, table_full_name, keys
        );
        let included = self
            .columns
            .iter()
            .filter(|c| c.included)
            .map(|c| format!("[{}]", c.name))
            .collect::<Vec<_>>()
            .join(", ");
        if !included.is_empty() {
            sql.push_str(&format!(" INCLUDE ({})", included));
        }
        if let Some(ff) = self.fill_factor {
            sql.push_str(&format!(" WITH (FILLFACTOR = {})", ff));
        }
        if let Some(fg) = &self.file_group {
            sql.push_str(&format!(" ON [{}]", fg));
        }
        sql.push_str("\nGO\n");
        sql
    }

    /// Drop statement; `move_to` relocates the rows when dropping a
    /// clustered index.
    pub fn to_sql_drop(&self, table_full_name: &str, move_to: Option<&str>) -> String {
        let mut sql = format!("DROP INDEX [{}] ON {}", self.name, table_full_name);
        if let Some(file_group) = move_to {
            sql.push_str(&format!(" WITH (MOVE TO [{}])", file_group));
        }
        sql.push_str("\nGO\n");
        sql
    }
}
