//! Conjunction elimination and introduction

use super::derivation::{NodeId, Rule, RuleFlags};
use super::engine::{is_own_formula, satisfy};
use crate::logic::Formula;
use crate::state::SearchState;

pub fn satisfy_conjunction(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    if is_own_formula(state, goal, ctx) && find_simplification(state, goal, ctx) {
        return None;
    }

    let Formula::And(lhs, rhs) = goal else {
        return None;
    };
    let left = satisfy(state, lhs, ctx)?;
    let right = satisfy(state, rhs, ctx)?;
    let formula = Formula::and(state.formula(left).clone(), state.formula(right).clone());
    state.derive(formula, Rule::ConjunctionIntroduction, vec![left, right])
}

/// Split a conjunction into both conjuncts.
///
/// Conjunctions built by introduction are never split again.
fn find_simplification(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    if state.has_flag(ctx, RuleFlags::CONJUNCTION_ELIM) || state.has_flag(ctx, RuleFlags::CONJUNCTION_INTRO) {
        return false;
    }
    let Formula::And(lhs, rhs) = goal else {
        return false;
    };
    state.set_flag(ctx, RuleFlags::CONJUNCTION_ELIM);
    state.derive((**lhs).clone(), Rule::ConjunctionElimination, vec![ctx]);
    state.derive((**rhs).clone(), Rule::ConjunctionElimination, vec![ctx]);
    true
}
