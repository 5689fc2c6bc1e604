//! Predicate matching.
//!
//! A goal literal `P(s1, ..., sn)` is established by a member literal
//! `P(t1, ..., tn)` of the same polarity when every `si` equals `ti` or `si`
//! is a variable and `ti` a constant. Bindings are not propagated between
//! positions.

use super::derivation::NodeId;
use crate::logic::{Formula, Term};
use crate::state::SearchState;

/// Does the member literal `candidate` establish the goal literal `goal`?
pub fn matches(goal: &Formula, candidate: &Formula) -> bool {
    match (goal, candidate) {
        (Formula::Not(goal), Formula::Not(candidate)) => predicate_matches(goal, candidate),
        (Formula::Predicate(..), Formula::Predicate(..)) => predicate_matches(goal, candidate),
        _ => false,
    }
}

fn predicate_matches(goal: &Formula, candidate: &Formula) -> bool {
    let (Formula::Predicate(name, args), Formula::Predicate(other, other_args)) = (goal, candidate) else {
        return false;
    };
    name == other
        && args.len() == other_args.len()
        && args.iter().zip(other_args).all(|(arg, other)| arg_matches(arg, other))
}

fn arg_matches(goal: &Term, candidate: &Term) -> bool {
    goal == candidate || (goal.is_variable() && candidate.is_constant())
}

/// First member, in insertion order, that establishes the literal `goal`
pub fn satisfy_predicate(state: &SearchState, goal: &Formula) -> Option<NodeId> {
    if let Some(id) = state.lookup(goal) {
        return Some(id);
    }
    state
        .store
        .member_ids()
        .find(|&id| matches(goal, state.formula(id)))
}
