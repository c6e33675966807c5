//! Constraint diff emitter

use crate::model::{ChangeStatus, Constraint, ConstraintType};
use crate::script::{ScriptAction, ScriptFragment, ScriptList};

fn add_action(constraint: &Constraint) -> ScriptAction {
    match constraint.constraint_type {
        ConstraintType::ForeignKey => ScriptAction::AddConstraintFk,
        ConstraintType::Default => ScriptAction::AddDefault,
        _ => ScriptAction::AddConstraint,
    }
}

fn drop_action(constraint: &Constraint) -> ScriptAction {
    match constraint.constraint_type {
        ConstraintType::ForeignKey => ScriptAction::DropConstraintFk,
        ConstraintType::Default => ScriptAction::DropDefault,
        _ => ScriptAction::DropConstraint,
    }
}

pub(crate) fn drop_fragment(
    constraint: &Constraint,
    table_full_name: &str,
    weight: usize,
) -> ScriptFragment {
    ScriptFragment::new(
        constraint.to_sql_drop(table_full_name, None),
        weight,
        drop_action(constraint),
    )
}

pub(crate) fn add_fragment(
    constraint: &Constraint,
    table_full_name: &str,
    weight: usize,
) -> ScriptFragment {
    ScriptFragment::new(
        constraint.to_sql_add(table_full_name),
        weight,
        add_action(constraint),
    )
}

/// Fragments for a single constraint according to its status.
pub(crate) fn constraint_diff(
    constraint: &Constraint,
    table_full_name: &str,
    weight: usize,
) -> ScriptList {
    let mut list = ScriptList::new();
    match constraint.status {
        ChangeStatus::Create => list.push(add_fragment(constraint, table_full_name, weight)),
        ChangeStatus::Drop => list.push(drop_fragment(constraint, table_full_name, weight)),
        ChangeStatus::Alter => {
            list.push(drop_fragment(constraint, table_full_name, weight));
            list.push(add_fragment(constraint, table_full_name, weight));
        }
        ChangeStatus::Disabled => {
            // only enforceable constraints have an enabled state
            if matches!(
                constraint.constraint_type,
                ConstraintType::Check | ConstraintType::ForeignKey
            ) {
                let action = if constraint.is_disabled {
                    ScriptAction::DisableConstraint
                } else {
                    ScriptAction::EnableConstraint
                };
                list.add(
                    constraint.to_sql_enabled_disabled(table_full_name),
                    weight,
                    action,
                );
            }
        }
        _ => {}
    }
    list
}

/// Sweep a table's constraint collection.
pub(crate) fn constraints_diff(
    constraints: &[Constraint],
    table_full_name: &str,
    weight: usize,
) -> ScriptList {
    let mut list = ScriptList::new();
    for constraint in constraints {
        list.extend(constraint_diff(constraint, table_full_name, weight));
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alter_is_drop_then_add() {
        let mut ck = Constraint::new(1, "CK_Qty", ConstraintType::Check);
        ck.definition = Some("([Qty] > 0)".to_string());
        ck.status = ChangeStatus::Alter;
        let list = constraint_diff(&ck, "[dbo].[T]", 0);
        let actions: Vec<_> = list.iter().map(|f| f.action).collect();
        assert_eq!(
            actions,
            vec![ScriptAction::DropConstraint, ScriptAction::AddConstraint]
        );
    }

    #[test]
    fn test_foreign_key_uses_fk_actions() {
        let mut fk = Constraint::new(1, "FK_A_B", ConstraintType::ForeignKey);
        fk.referenced_table = Some("[dbo].[B]".to_string());
        fk.status = ChangeStatus::Create;
        let list = constraint_diff(&fk, "[dbo].[A]", 3);
        let fragment = list.iter().next().unwrap();
        assert_eq!(fragment.action, ScriptAction::AddConstraintFk);
        assert_eq!(fragment.weight, 3);
    }

    #[test]
    fn test_disabled_primary_key_emits_nothing() {
        let mut pk = Constraint::new(1, "PK_T", ConstraintType::PrimaryKey);
        pk.status = ChangeStatus::Disabled;
        assert!(constraint_diff(&pk, "[dbo].[T]", 0).is_empty());
    }

    #[test]
    fn test_disabled_check_toggles() {
        let mut ck = Constraint::new(1, "CK_T", ConstraintType::Check);
        ck.status = ChangeStatus::Disabled;
        ck.is_disabled = true;
        let list = constraint_diff(&ck, "[dbo].[T]", 0);
        let fragment = list.iter().next().unwrap();
        assert_eq!(fragment.action, ScriptAction::DisableConstraint);
        assert!(fragment.sql.contains("NOCHECK CONSTRAINT [CK_T]"));
    }
}
