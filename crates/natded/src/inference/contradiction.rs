//! Closing the search: the conclusion itself, or a contradiction.

use super::derivation::{Derivation, Rule};
use crate::logic::Formula;
use crate::state::SearchState;
use tracing::debug;

/// If the conclusion is a member, copy that member's derivation onto it.
pub fn find_conclusion(state: &mut SearchState) -> bool {
    let Some(id) = state.lookup(state.conclusion_formula()) else {
        return false;
    };
    let derivation = state.store.node(id).derivation.clone();
    state.annotate_conclusion(derivation);
    true
}

/// Look for a member pair `φ` (earlier) and `flip(φ)` (later).
///
/// On success a `⊥` line cites the pair and the conclusion is justified by
/// contradiction elimination from it.
pub fn find_contradiction(state: &mut SearchState) -> bool {
    let members: Vec<_> = state.store.member_ids().collect();
    for (position, id) in members.into_iter().enumerate() {
        let flipped = state.formula(id).flip();
        let Some(other) = state.lookup(&flipped) else {
            continue;
        };
        if state.store.position(&flipped).map_or(true, |p| p <= position) {
            continue;
        }
        debug!("contradiction between {} and {}", state.formula(id), flipped);
        let Some(falsum) = state.derive(Formula::False, Rule::ContradictionIntroduction, vec![id, other]) else {
            continue;
        };
        state.annotate_conclusion(Derivation::new(Rule::ContradictionElimination, vec![falsum]));
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn test_find_conclusion_copies_derivation() {
        let mut state = SearchState::new(vec![atom("P")], atom("Q"));
        assert!(!find_conclusion(&mut state));
        let q = state.derive(atom("Q"), Rule::ModusPonens, vec![0]).unwrap();
        assert!(find_conclusion(&mut state));
        let conclusion = state.store.node(state.conclusion);
        assert_eq!(conclusion.rule(), Rule::ModusPonens);
        assert_eq!(conclusion.parents(), state.store.node(q).parents());
    }

    #[test]
    fn test_contradiction_closes_search() {
        let mut state = SearchState::new(vec![atom("P"), Formula::negation(atom("P"))], atom("Q"));
        assert!(find_contradiction(&mut state));
        let falsum = state.lookup(&Formula::False).unwrap();
        assert_eq!(state.store.node(falsum).parents(), &[0, 1]);
        let conclusion = state.store.node(state.conclusion);
        assert_eq!(conclusion.rule(), Rule::ContradictionElimination);
        assert_eq!(conclusion.parents(), &[falsum]);
    }

    #[test]
    fn test_no_contradiction_between_unrelated_negations() {
        // flip(¬P) is P, not ¬¬P.
        let premises = vec![Formula::negation(atom("P")), Formula::negation(Formula::negation(atom("P")))];
        let mut state = SearchState::new(premises, atom("Q"));
        assert!(!find_contradiction(&mut state));
    }
}
