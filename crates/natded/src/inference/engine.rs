//! Goal satisfaction dispatch.
//!
//! `satisfy(goal, ctx)` tries to establish `goal` while working on the node
//! `ctx`. Rewrites are tried first, then the rules for the goal's outermost
//! symbol, then plain membership. Every rule only ever adds to the store, so
//! repeated calls are idempotent once nothing new can be derived.

use super::derivation::NodeId;
use super::{biconditional, conjunction, disjunction, implication, predicate, quantifier, rewrite};
use crate::logic::Formula;
use crate::state::SearchState;

/// Try to establish `goal`; returns the member that establishes it.
pub fn satisfy(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    if rewrite::find_de_morgan(state, goal, ctx) || rewrite::find_material_implication(state, goal, ctx) {
        return state.lookup(goal);
    }

    let derived = match goal {
        Formula::Predicate(..) => predicate::satisfy_predicate(state, goal),
        Formula::Not(inner) if inner.is_predicate() => predicate::satisfy_predicate(state, goal),
        Formula::Implies(..) => implication::satisfy_implication(state, goal, ctx),
        Formula::And(..) => conjunction::satisfy_conjunction(state, goal, ctx),
        Formula::Or(..) => disjunction::satisfy_disjunction(state, goal, ctx),
        Formula::Iff(..) => biconditional::satisfy_biconditional(state, goal, ctx),
        Formula::Exists(..) => quantifier::satisfy_existential(state, goal, ctx),
        Formula::Forall(..) => quantifier::satisfy_universal(state, goal, ctx),
        Formula::Atom(_) | Formula::Not(_) | Formula::False => None,
    };

    derived.or_else(|| state.lookup(goal))
}

/// Is `ctx` a member whose own formula is `goal`?
///
/// Elimination rules only take apart the line they are working on.
pub(crate) fn is_own_formula(state: &SearchState, goal: &Formula, ctx: NodeId) -> bool {
    !state.is_conclusion(ctx) && state.formula(ctx) == goal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_satisfies_itself() {
        let mut state = SearchState::new(vec![Formula::atom("P")], Formula::atom("Q"));
        assert_eq!(satisfy(&mut state, &Formula::atom("P"), 0), Some(0));
        assert_eq!(satisfy(&mut state, &Formula::atom("R"), 0), None);
    }

    #[test]
    fn test_conclusion_is_not_established_by_itself() {
        let mut state = SearchState::new(vec![Formula::atom("P")], Formula::atom("Q"));
        let conclusion = state.conclusion;
        assert_eq!(satisfy(&mut state, &Formula::atom("Q"), conclusion), None);
        assert_eq!(state.store.len(), 1);
    }
}
