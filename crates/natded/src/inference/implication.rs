//! Implication rules: modus ponens, modus tollens, hypothetical syllogism
//! and implication introduction.

use super::derivation::{NodeId, Rule, RuleFlags};
use super::engine::{is_own_formula, satisfy};
use crate::logic::Formula;
use crate::state::SearchState;

pub fn satisfy_implication(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    if is_own_formula(state, goal, ctx)
        && (find_modus_ponens(state, goal, ctx)
            || find_modus_tollens(state, goal, ctx)
            || find_hypothetical_syllogism(state, goal, ctx))
    {
        return None;
    }

    let Formula::Implies(lhs, rhs) = goal else {
        return None;
    };
    let antecedent = satisfy(state, lhs, ctx)?;
    let consequent = satisfy(state, rhs, ctx)?;
    let formula = Formula::implies(state.formula(antecedent).clone(), state.formula(consequent).clone());
    state.derive(formula, Rule::ImplicationIntroduction, vec![antecedent, consequent])
}

/// `P → Q` and `P` give `Q`.
fn find_modus_ponens(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    if state.has_flag(ctx, RuleFlags::MODUS_PONENS) {
        return false;
    }
    let Formula::Implies(antecedent, consequent) = goal else {
        return false;
    };
    let Some(minor) = state.lookup(antecedent) else {
        return false;
    };
    state.set_flag(ctx, RuleFlags::MODUS_PONENS);
    state.derive((**consequent).clone(), Rule::ModusPonens, vec![ctx, minor]);
    true
}

/// `P → Q` and `¬Q` give `¬P`.
fn find_modus_tollens(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    if state.has_flag(ctx, RuleFlags::MODUS_TOLLENS) {
        return false;
    }
    let Formula::Implies(antecedent, consequent) = goal else {
        return false;
    };
    let Some(minor) = state
        .store
        .member_ids()
        .find(|&id| state.formula(id).flip() == **consequent)
    else {
        return false;
    };
    state.set_flag(ctx, RuleFlags::MODUS_TOLLENS);
    state.derive(antecedent.flip(), Rule::ModusTollens, vec![ctx, minor]);
    true
}

/// Chain `goal` with another member implication.
///
/// `A → B` with `B → D` gives `A → D`; `A → B` with `C → A` gives `C → B`.
/// A pair is skipped once both implications carry the flag.
fn find_hypothetical_syllogism(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> bool {
    let Formula::Implies(a, b) = goal else {
        return false;
    };
    let members: Vec<NodeId> = state.store.member_ids().collect();
    for other in members {
        if other == ctx {
            continue;
        }
        if state.has_flag(ctx, RuleFlags::HYPOTHETICAL_SYLLOGISM)
            && state.has_flag(other, RuleFlags::HYPOTHETICAL_SYLLOGISM)
        {
            continue;
        }
        let Formula::Implies(c, d) = state.formula(other) else {
            continue;
        };
        let chained = if **b == **c {
            Formula::implies((**a).clone(), (**d).clone())
        } else if **d == **a {
            Formula::implies((**c).clone(), (**b).clone())
        } else {
            continue;
        };
        state.set_flag(ctx, RuleFlags::HYPOTHETICAL_SYLLOGISM);
        state.set_flag(other, RuleFlags::HYPOTHETICAL_SYLLOGISM);
        state.derive(chained, Rule::HypotheticalSyllogism, vec![ctx, other]);
        return true;
    }
    false
}
