//! Tagged units of generated DDL

/// Action kind of a script fragment.
///
/// The declaration order is the execution order of the final script:
/// drop-like and disable actions run before create-like and enable actions,
/// foreign key drops run before the table drops they unblock, and foreign
/// key adds run after every table create they might reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptAction {
    DropConstraintFk,
    DropConstraint,
    DropIndex,
    DropDefault,
    DropTrigger,
    DropView,
    DropFunction,
    DisableTrigger,
    DisableConstraint,
    DropColumn,
    DropTable,
    RebuildTable,
    AddTable,
    AlterColumn,
    AddColumn,
    AddConstraint,
    AddIndex,
    AddConstraintFk,
    AddDefault,
    AddView,
    AddFunction,
    AddTrigger,
    EnableTrigger,
    EnableConstraint,
    AlterTableOptions,
}

impl ScriptAction {
    /// Drop-like actions order more-depended-upon objects first; create-like
    /// actions the other way around.
    pub fn is_drop_like(self) -> bool {
        matches!(
            self,
            ScriptAction::DropConstraintFk
                | ScriptAction::DropConstraint
                | ScriptAction::DropIndex
                | ScriptAction::DropDefault
                | ScriptAction::DropTrigger
                | ScriptAction::DropView
                | ScriptAction::DropFunction
                | ScriptAction::DisableTrigger
                | ScriptAction::DisableConstraint
                | ScriptAction::DropColumn
                | ScriptAction::DropTable
        )
    }
}

/// A single tagged unit of generated DDL text plus its ordering metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFragment {
    pub sql: String,
    /// Number of foreign keys elsewhere referencing the owning table.
    pub weight: usize,
    pub action: ScriptAction,
}

impl ScriptFragment {
    pub fn new(sql: impl Into<String>, weight: usize, action: ScriptAction) -> Self {
        Self {
            sql: sql.into(),
            weight,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_precede_creates() {
        assert!(ScriptAction::DropTable < ScriptAction::AddTable);
        assert!(ScriptAction::DropConstraintFk < ScriptAction::DropTable);
        assert!(ScriptAction::AddTable < ScriptAction::AddConstraintFk);
        assert!(ScriptAction::RebuildTable > ScriptAction::DropIndex);
        assert!(ScriptAction::RebuildTable < ScriptAction::AddConstraint);
    }

    #[test]
    fn test_drop_like_classification() {
        assert!(ScriptAction::DropTable.is_drop_like());
        assert!(ScriptAction::DisableTrigger.is_drop_like());
        assert!(!ScriptAction::RebuildTable.is_drop_like());
        assert!(!ScriptAction::EnableConstraint.is_drop_like());
    }
}
