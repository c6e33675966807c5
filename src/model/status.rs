//! Per-node change classification

/// Change classification assigned to every graph node by the external
/// comparer before synthesis runs.
///
/// Exactly one status per node; this crate reads it and never writes it.
/// The variants are mutually exclusive by construction, so impossible
/// combinations (a node both dropped and rebuilt, say) cannot be expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeStatus {
    /// Unchanged; the node contributes nothing to the script.
    #[default]
    Original,
    Create,
    Drop,
    /// In-place `ALTER`.
    Alter,
    /// The owning table must be physically rebuilt (temp table, copy, rename).
    AlterRebuild,
    /// Only objects depending on specific altered columns must be rebuilt.
    AlterRebuildDependencies,
    /// Enable/disable toggle only (triggers, check and foreign key constraints).
    Disabled,
}

impl ChangeStatus {
    /// True when the node is altered in place, with or without a
    /// dependent-object rebuild around it.
    pub fn is_altered(self) -> bool {
        matches!(
            self,
            ChangeStatus::Alter | ChangeStatus::AlterRebuildDependencies
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_original() {
        assert_eq!(ChangeStatus::default(), ChangeStatus::Original);
    }

    #[test]
    fn test_is_altered() {
        assert!(ChangeStatus::Alter.is_altered());
        assert!(ChangeStatus::AlterRebuildDependencies.is_altered());
        assert!(!ChangeStatus::AlterRebuild.is_altered());
        assert!(!ChangeStatus::Create.is_altered());
    }
}
