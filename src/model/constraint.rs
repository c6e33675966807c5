//! Table and column constraint entities

use super::{ChangeStatus, IndexType, ObjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
    Default,
}

/// A constraint belonging to a table, or to a column for defaults.
///
/// Foreign keys record the identifier and full name of the table they
/// reference; primary key and unique constraints carry the type of the
/// index that backs them, which is what the clustering checks look at.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub id: ObjectId,
    pub name: String,
    pub status: ChangeStatus,
    pub constraint_type: ConstraintType,
    /// Current enforcement state for check/foreign key constraints.
    pub is_disabled: bool,
    /// Constrained column names. For defaults this holds the owning column.
    pub columns: Vec<String>,
    /// Check predicate or default expression.
    pub definition: Option<String>,
    pub referenced_table: Option<String>,
    pub referenced_table_id: Option<ObjectId>,
    pub referenced_columns: Vec<String>,
    /// Physical index backing a primary key or unique constraint.
    pub index_type: Option<IndexType>,
}

impl Constraint {
    pub fn new(id: ObjectId, name: &str, constraint_type: ConstraintType) -> Self {
        Self {
            id,
            name: name.to_string(),
            status: ChangeStatus::Original,
            constraint_type,
            is_disabled: false,
            columns: Vec::new(),
            definition: None,
            referenced_table: None,
            referenced_table_id: None,
            referenced_columns: Vec::new(),
            index_type: None,
        }
    }

    pub fn is_clustered(&self) -> bool {
        self.index_type == Some(IndexType::Clustered)
    }

    fn column_list(columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| format!("[{}]", c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Inline definition as it appears in `CREATE TABLE` and
    /// `ALTER TABLE ADD CONSTRAINT`.
    pub fn to_sql(&self) -> String {
        match self.constraint_type {
            ConstraintType::PrimaryKey | ConstraintType::Unique => {
                let kind = if self.constraint_type == ConstraintType::PrimaryKey {
                    "PRIMARY KEY"
                } else {
                    "UNIQUE"
                };
                let physical = match self.index_type {
                    Some(IndexType::Clustered) => " CLUSTERED",
                    Some(IndexType::Nonclustered) => " NONCLUSTERED",
                    None => "",
                };
                format!(
                    "CONSTRAINT [{}] {}{} ({})",
                    self.name,
                    kind,
                    physical,
                    Self::column_list(&self.columns)
                )
            }
            ConstraintType::ForeignKey => format!(
                "CONSTRAINT [{}] FOREIGN KEY ({}) REFERENCES {} ({})",
                self.name,
                Self::column_list(&self.columns),
                self.referenced_table.as_deref().unwrap_or(""),
                Self::column_list(&self.referenced_columns)
            ),
            ConstraintType::Check => format!(
                "CONSTRAINT [{}] CHECK {}",
                self.name,
                self.definition.as_deref().unwrap_or("")
            ),
            ConstraintType::Default => format!(
                "CONSTRAINT [{}] DEFAULT {} FOR [{}]",
                self.name,
                self.definition.as_deref().unwrap_or(""),
                self.columns.first().map(String::as_str).unwrap_or("")
            ),
        }
    }

    pub fn to_sql_add(&self, table_full_name: &str) -> String {
        format!("ALTER TABLE {} ADD {}\nGO\n", table_full_name, self.to_sql())
    }

    /// Drop statement; `move_to` relocates the rows when dropping a
    /// clustered primary key or unique constraint.
    pub fn to_sql_drop(&self, table_full_name: &str, move_to: Option<&str>) -> String {
        let mut sql = format!(
            "ALTER TABLE {} DROP CONSTRAINT [{}]",
            table_full_name, self.name
        );
        if let Some(file_group) = move_to {
            sql.push_str(&format!(" WITH (MOVE TO [{}])", file_group));
        }
        sql.push_str("\nGO\n");
        sql
    }

    /// Enforcement toggle for check and foreign key constraints.
    pub fn to_sql_enabled_disabled(&self, table_full_name: &str) -> String {
        let verb = if self.is_disabled { "NOCHECK" } else { "CHECK" };
        format!(
            "ALTER TABLE {} {} CONSTRAINT [{}]\nGO\n",
            table_full_name, verb, self.name
        )
    }
}
