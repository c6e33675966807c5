//! Fragment collector and orderer

use super::{ScriptAction, ScriptFragment};

/// Accumulates tagged fragments and produces the final ordered script.
///
/// Fragments with empty text are discarded on insert, so emitters can hand
/// over optional sections without checking first. The sort is stable and
/// total: action kind first, then weight — descending for drop-like actions
/// (more-depended-upon objects are freed first), ascending for create-like
/// ones (less-depended-upon objects exist before anything references them).
#[derive(Debug, Clone, Default)]
pub struct ScriptList {
    fragments: Vec<ScriptFragment>,
}

impl ScriptList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sql: impl Into<String>, weight: usize, action: ScriptAction) {
        let sql = sql.into();
        if !sql.is_empty() {
            self.fragments.push(ScriptFragment::new(sql, weight, action));
        }
    }

    pub fn push(&mut self, fragment: ScriptFragment) {
        if !fragment.sql.is_empty() {
            self.fragments.push(fragment);
        }
    }

    pub fn extend(&mut self, other: ScriptList) {
        self.fragments.extend(other.fragments);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptFragment> {
        self.fragments.iter()
    }

    /// Stable total ordering over (action, weight). Sorting twice yields the
    /// same sequence.
    pub fn sort(&mut self) {
        self.fragments.sort_by(|a, b| {
            a.action.cmp(&b.action).then_with(|| {
                if a.action.is_drop_like() {
                    b.weight.cmp(&a.weight)
                } else {
                    a.weight.cmp(&b.weight)
                }
            })
        });
    }

    /// Sort, then concatenate every fragment into one script. Each fragment
    /// carries its own `GO` batch separators.
    pub fn to_sql(&mut self) -> String {
        self.sort();
        self.fragments.iter().map(|f| f.sql.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_fragments_are_discarded() {
        let mut list = ScriptList::new();
        list.add("", 0, ScriptAction::AddTable);
        list.add("CREATE TABLE [dbo].[T]\nGO\n", 0, ScriptAction::AddTable);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_drops_sort_before_creates() {
        let mut list = ScriptList::new();
        list.add("create\n", 0, ScriptAction::AddTable);
        list.add("drop\n", 0, ScriptAction::DropTable);
        assert_eq!(list.to_sql(), "drop\ncreate\n");
    }

    #[test]
    fn test_drop_weights_descend_create_weights_ascend() {
        let mut list = ScriptList::new();
        list.add("drop light\n", 1, ScriptAction::DropTable);
        list.add("drop heavy\n", 5, ScriptAction::DropTable);
        list.add("create heavy\n", 5, ScriptAction::AddTable);
        list.add("create light\n", 1, ScriptAction::AddTable);
        assert_eq!(
            list.to_sql(),
            "drop heavy\ndrop light\ncreate light\ncreate heavy\n"
        );
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut list = ScriptList::new();
        list.add("first\n", 2, ScriptAction::AddConstraint);
        list.add("second\n", 2, ScriptAction::AddConstraint);
        list.add("third\n", 2, ScriptAction::AddConstraint);
        let once = list.clone().to_sql();
        let mut twice = list.clone();
        twice.sort();
        twice.sort();
        assert_eq!(once, "first\nsecond\nthird\n");
        assert_eq!(twice.to_sql(), once);
    }
}
