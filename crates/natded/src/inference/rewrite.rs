//! Equivalence rewrites: De Morgan and material implication.
//!
//! A rewrite fires only when its result is something the search is already
//! looking for (a member or the conclusion) and the rewritten formula is
//! itself established.

use super::derivation::{NodeId, Rule, RuleFlags};
use crate::logic::{Connective, Formula};
use crate::state::SearchState;

/// De Morgan form of `formula`, if it has one.
///
/// `¬(X ∘ Y)` becomes `X' ∘' ¬Y` and `X ∘ Y` becomes `¬(X' ∘' ¬Y)`, where
/// `∘'` is the negated dual of `∘` and `X'` is `X` for an implication and
/// `¬X` otherwise. Negations introduced here are flipped, not stacked.
pub fn de_morgan(formula: &Formula) -> Option<Formula> {
    match formula {
        Formula::Not(inner) => {
            let (connective, lhs, rhs) = inner.as_binary()?;
            let dual = connective.negated_dual()?;
            Some(Formula::binary(dual, dual_lhs(connective, lhs), rhs.flip()))
        }
        other => {
            let (connective, lhs, rhs) = other.as_binary()?;
            let dual = connective.negated_dual()?;
            Some(Formula::negation(Formula::binary(dual, dual_lhs(connective, lhs), rhs.flip())))
        }
    }
}

fn dual_lhs(connective: Connective, lhs: &Formula) -> Formula {
    if connective == Connective::Implies {
        lhs.clone()
    } else {
        lhs.flip()
    }
}

/// `P → Q` and `¬P ∨ Q` rewrite into each other.
pub fn material_implication(formula: &Formula) -> Option<Formula> {
    match formula {
        Formula::Implies(lhs, rhs) => Some(Formula::or(Formula::negation((**lhs).clone()), (**rhs).clone())),
        Formula::Or(lhs, rhs) => match &**lhs {
            Formula::Not(inner) => Some(Formula::implies((**inner).clone(), (**rhs).clone())),
            _ => None,
        },
        _ => None,
    }
}

pub fn find_de_morgan(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    apply_rewrite(state, goal, ctx, Rule::DeMorgan, RuleFlags::DE_MORGAN, de_morgan)
}

pub fn find_material_implication(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    apply_rewrite(
        state,
        goal,
        ctx,
        Rule::MaterialImplication,
        RuleFlags::MATERIAL_IMPLICATION,
        material_implication,
    )
}

fn apply_rewrite(
    state: &mut SearchState,
    goal: &Formula,
    ctx: NodeId,
    rule: Rule,
    flag: RuleFlags,
    rewrite: fn(&Formula) -> Option<Formula>,
) -> bool {
    if state.is_conclusion(ctx) || state.has_flag(ctx, flag) {
        return false;
    }
    let Some(rewritten) = rewrite(goal) else {
        return false;
    };
    if !state.is_goal(&rewritten) {
        return false;
    }
    let Some(source) = state.lookup(goal) else {
        return false;
    };
    state.set_flag(ctx, flag);
    state.derive(rewritten, rule, vec![source]);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Formula {
        Formula::atom("P")
    }

    fn q() -> Formula {
        Formula::atom("Q")
    }

    #[test]
    fn test_de_morgan_pushes_negation_inward() {
        let np = Formula::negation(p());
        let nq = Formula::negation(q());
        assert_eq!(de_morgan(&Formula::negation(Formula::and(p(), q()))), Some(Formula::or(np.clone(), nq.clone())));
        assert_eq!(de_morgan(&Formula::negation(Formula::or(p(), q()))), Some(Formula::and(np.clone(), nq.clone())));
        assert_eq!(de_morgan(&Formula::negation(Formula::implies(p(), q()))), Some(Formula::and(p(), nq.clone())));
    }

    #[test]
    fn test_de_morgan_pulls_negation_outward() {
        let np = Formula::negation(p());
        let nq = Formula::negation(q());
        assert_eq!(
            de_morgan(&Formula::or(np.clone(), nq.clone())),
            Some(Formula::negation(Formula::and(p(), q())))
        );
        assert_eq!(
            de_morgan(&Formula::implies(p(), q())),
            Some(Formula::negation(Formula::and(p(), nq)))
        );
        assert_eq!(de_morgan(&Formula::iff(p(), q())), None);
        assert_eq!(de_morgan(&np), None);
    }

    #[test]
    fn test_de_morgan_round_trip() {
        let original = Formula::negation(Formula::and(p(), Formula::negation(q())));
        let rewritten = de_morgan(&original).unwrap();
        assert_eq!(rewritten, Formula::or(Formula::negation(p()), q()));
        assert_eq!(de_morgan(&rewritten), Some(original));
    }

    #[test]
    fn test_material_implication() {
        let imp = Formula::implies(p(), q());
        let disj = Formula::or(Formula::negation(p()), q());
        assert_eq!(material_implication(&imp), Some(disj.clone()));
        assert_eq!(material_implication(&disj), Some(imp));
        assert_eq!(material_implication(&Formula::or(p(), q())), None);
    }

    #[test]
    fn test_rewrite_requires_recognized_result() {
        let imp = Formula::implies(p(), q());
        let disj = Formula::or(Formula::negation(p()), q());

        let mut state = SearchState::new(vec![imp.clone()], Formula::atom("R"));
        assert!(!find_material_implication(&mut state, &imp, 0));
        assert!(!state.has_flag(0, RuleFlags::MATERIAL_IMPLICATION));

        let mut state = SearchState::new(vec![imp.clone()], disj.clone());
        assert!(find_material_implication(&mut state, &imp, 0));
        assert!(state.has_flag(0, RuleFlags::MATERIAL_IMPLICATION));
        let derived = state.lookup(&disj).unwrap();
        assert_eq!(state.store.node(derived).parents(), &[0]);
        // Flag set: the rewrite does not fire twice.
        assert!(!find_material_implication(&mut state, &imp, 0));
    }
}
