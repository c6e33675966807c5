//! Database-scoped code objects (views and functions)

use super::{ChangeStatus, ObjectId};
use crate::util::two_part;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    View,
    Function,
}

impl CodeType {
    fn keyword(self) -> &'static str {
        match self {
            CodeType::View => "VIEW",
            CodeType::Function => "FUNCTION",
        }
    }
}

/// A view or function. These participate in diffing and are resolvable
/// targets for table dependency records.
#[derive(Debug, Clone)]
pub struct CodeObject {
    pub id: ObjectId,
    pub owner: String,
    pub name: String,
    pub status: ChangeStatus,
    pub code_type: CodeType,
    /// Full `CREATE VIEW`/`CREATE FUNCTION` text.
    pub text: String,
}

impl CodeObject {
    pub fn new(id: ObjectId, owner: &str, name: &str, code_type: CodeType, text: &str) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            status: ChangeStatus::Original,
            code_type,
            text: text.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        two_part(&self.owner, &self.name)
    }

    pub fn to_sql_add(&self) -> String {
        format!("{}\nGO\n", self.text.trim_end())
    }

    pub fn to_sql_drop(&self) -> String {
        format!(
            "DROP {} {}\nGO\n",
            self.code_type.keyword(),
            self.full_name()
        )
    }
}
