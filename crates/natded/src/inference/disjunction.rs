//! Disjunctive syllogism and disjunction introduction

use super::derivation::{NodeId, Rule, RuleFlags};
use super::engine::{is_own_formula, satisfy};
use crate::logic::Formula;
use crate::state::SearchState;

pub fn satisfy_disjunction(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    if is_own_formula(state, goal, ctx) && find_disjunctive_syllogism(state, goal, ctx) {
        return None;
    }

    let Formula::Or(lhs, rhs) = goal else {
        return None;
    };
    let left = satisfy(state, lhs, ctx);
    let right = match left {
        Some(_) => state.lookup(rhs),
        None => satisfy(state, rhs, ctx),
    };
    if left.is_none() && right.is_none() {
        return None;
    }

    let operand = |state: &SearchState, id: Option<NodeId>, fallback: &Formula| match id {
        Some(id) => state.formula(id).clone(),
        None => fallback.clone(),
    };
    let formula = Formula::or(operand(state, left, lhs), operand(state, right, rhs));
    let parents = left.into_iter().chain(right).collect();
    state.derive(formula, Rule::DisjunctionIntroduction, parents)
}

/// `P ∨ Q` and `¬P` give `Q`; `P ∨ Q` and `¬Q` give `P`.
///
/// Fires only when exactly one disjunct is refuted by a member.
fn find_disjunctive_syllogism(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    if state.has_flag(ctx, RuleFlags::DISJUNCTIVE_SYLLOGISM) {
        return false;
    }
    let Formula::Or(lhs, rhs) = goal else {
        return false;
    };
    let (derived, minor) = match (state.lookup(&lhs.flip()), state.lookup(&rhs.flip())) {
        (Some(minor), None) => ((**rhs).clone(), minor),
        (None, Some(minor)) => ((**lhs).clone(), minor),
        _ => return false,
    };
    state.set_flag(ctx, RuleFlags::DISJUNCTIVE_SYLLOGISM);
    state.derive(derived, Rule::DisjunctiveSyllogism, vec![ctx, minor]);
    true
}
