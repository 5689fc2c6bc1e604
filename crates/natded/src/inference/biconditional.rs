//! Biconditional elimination and introduction

use super::derivation::{NodeId, Rule, RuleFlags};
use super::engine::{is_own_formula, satisfy};
use crate::logic::Formula;
use crate::state::SearchState;

pub fn satisfy_biconditional(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    if is_own_formula(state, goal, ctx) && find_biconditional_elimination(state, goal, ctx) {
        return None;
    }

    let Formula::Iff(lhs, rhs) = goal else {
        return None;
    };
    let forward = satisfy(state, &Formula::implies((**lhs).clone(), (**rhs).clone()), ctx)?;
    let backward = satisfy(state, &Formula::implies((**rhs).clone(), (**lhs).clone()), ctx)?;

    // Both directions must talk about the same pair of formulas.
    let Formula::Implies(x, y) = state.formula(forward) else {
        return None;
    };
    if *state.formula(backward) != Formula::implies((**y).clone(), (**x).clone()) {
        return None;
    }
    let formula = Formula::iff((**x).clone(), (**y).clone());
    state.derive(formula, Rule::BiconditionalIntroduction, vec![forward, backward])
}

fn find_biconditional_elimination(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    if state.has_flag(ctx, RuleFlags::BICONDITIONAL) {
        return false;
    }
    let Formula::Iff(lhs, rhs) = goal else {
        return false;
    };
    state.set_flag(ctx, RuleFlags::BICONDITIONAL);
    let forward = Formula::implies((**lhs).clone(), (**rhs).clone());
    let backward = Formula::implies((**rhs).clone(), (**lhs).clone());
    state.derive(forward, Rule::BiconditionalElimination, vec![ctx]);
    state.derive(backward, Rule::BiconditionalElimination, vec![ctx]);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn test_elimination_yields_both_directions() {
        let bic = Formula::iff(atom("P"), atom("Q"));
        let mut state = SearchState::new(vec![bic.clone()], atom("R"));
        satisfy(&mut state, &bic, 0);
        assert!(state.lookup(&Formula::implies(atom("P"), atom("Q"))).is_some());
        assert!(state.lookup(&Formula::implies(atom("Q"), atom("P"))).is_some());
        assert!(state.has_flag(0, RuleFlags::BICONDITIONAL));
    }

    #[test]
    fn test_introduction_from_both_implications() {
        let forward = Formula::implies(atom("P"), atom("Q"));
        let backward = Formula::implies(atom("Q"), atom("P"));
        let bic = Formula::iff(atom("P"), atom("Q"));
        let mut state = SearchState::new(vec![forward, backward], bic.clone());
        let conclusion = state.conclusion;
        let id = satisfy(&mut state, &bic, conclusion).unwrap();
        assert_eq!(state.store.node(id).rule(), Rule::BiconditionalIntroduction);
        assert_eq!(state.store.node(id).parents(), &[0, 1]);
        assert!(state.has_flag(id, RuleFlags::BICONDITIONAL));
    }
}
