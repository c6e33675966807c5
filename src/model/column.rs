//! Table column entity

use super::{ChangeStatus, Constraint, ObjectId};
use crate::util::eq_ci;

/// Sentinel length for `(max)` character/binary types.
pub const MAX_SIZE: i32 = -1;

/// Types that take a length argument.
const SIZED_TYPES: &[&str] = &["char", "varchar", "nchar", "nvarchar", "binary", "varbinary"];

/// Types that take precision/scale arguments.
const PRECISION_TYPES: &[&str] = &["decimal", "numeric"];

/// Large-object types stored off-row (TEXTIMAGE placement applies).
const BLOB_TYPES: &[&str] = &["text", "ntext", "image", "xml"];

/// A column belonging to exactly one table.
#[derive(Debug, Clone)]
pub struct Column {
    pub id: ObjectId,
    pub name: String,
    pub status: ChangeStatus,
    /// Base type name without arguments, e.g. `nvarchar`.
    pub data_type: String,
    /// Length for character/binary types; [`MAX_SIZE`] for `(max)`.
    pub size: Option<i32>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
    pub nullable: bool,
    pub is_identity: bool,
    pub identity_seed: i64,
    pub identity_increment: i64,
    pub is_computed: bool,
    pub computed_definition: Option<String>,
    /// The single default-value constraint owned by this column, if any.
    pub default_constraint: Option<Constraint>,
    /// Replacement value forced into the data copy during a table rebuild.
    pub force_value: Option<String>,
}

impl Column {
    pub fn new(id: ObjectId, name: &str, data_type: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            status: ChangeStatus::Original,
            data_type: data_type.to_string(),
            size: None,
            precision: None,
            scale: None,
            nullable: true,
            is_identity: false,
            identity_seed: 1,
            identity_increment: 1,
            is_computed: false,
            computed_definition: None,
            default_constraint: None,
            force_value: None,
        }
    }

    /// True for types whose data lives off-row, including `(max)` variants.
    pub fn is_blob(&self) -> bool {
        BLOB_TYPES.iter().any(|t| eq_ci(&self.data_type, t)) || self.size == Some(MAX_SIZE)
    }

    /// The rowversion pseudo-type cannot be copied between tables.
    pub fn is_timestamp(&self) -> bool {
        eq_ci(&self.data_type, "timestamp") || eq_ci(&self.data_type, "rowversion")
    }

    pub fn is_xml(&self) -> bool {
        eq_ci(&self.data_type, "xml")
    }

    fn type_sql(&self) -> String {
        let mut sql = format!("[{}]", self.data_type);
        if SIZED_TYPES.iter().any(|t| eq_ci(&self.data_type, t)) {
            match self.size {
                Some(MAX_SIZE) => sql.push_str(" (max)"),
                Some(n) => sql.push_str(&format!(" ({})", n)),
                None => {}
            }
        } else if PRECISION_TYPES.iter().any(|t| eq_ci(&self.data_type, t)) {
            if let Some(p) = self.precision {
                match self.scale {
                    Some(s) => sql.push_str(&format!(" ({}, {})", p, s)),
                    None => sql.push_str(&format!(" ({})", p)),
                }
            }
        }
        sql
    }

    /// Full column definition as used inside `CREATE TABLE` and
    /// `ALTER TABLE ADD`.
    pub fn to_sql(&self) -> String {
        self.definition(true)
    }

    fn definition(&self, include_identity: bool) -> String {
        if self.is_computed {
            let formula = self.computed_definition.as_deref().unwrap_or("");
            return format!("[{}] AS {}", self.name, formula);
        }
        let mut sql = format!("[{}] {}", self.name, self.type_sql());
        if include_identity && self.is_identity {
            sql.push_str(&format!(
                " IDENTITY ({}, {})",
                self.identity_seed, self.identity_increment
            ));
        }
        if self.nullable {
            sql.push_str(" NULL");
        } else {
            sql.push_str(" NOT NULL");
        }
        sql
    }

    pub fn to_sql_add(&self, table_full_name: &str) -> String {
        format!("ALTER TABLE {} ADD {}\nGO\n", table_full_name, self.to_sql())
    }

    pub fn to_sql_drop(&self, table_full_name: &str) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN [{}]\nGO\n",
            table_full_name, self.name
        )
    }

    /// `ALTER COLUMN` cannot restate an identity property, so the identity
    /// clause is omitted here.
    pub fn to_sql_alter(&self, table_full_name: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {}\nGO\n",
            table_full_name,
            self.definition(false)
        )
    }
}
