//! Quantifier rules.
//!
//! Eliminations instantiate a member quantifier with constants; the
//! introductions close a goal quantifier over an established instance.
//! Existential elimination and universal introduction each need a constant
//! nobody has said anything about, which the constant pool supplies.

use super::derivation::{NodeId, Rule, RuleFlags};
use super::engine::{is_own_formula, satisfy};
use crate::logic::{Formula, Term};
use crate::state::SearchState;
use tracing::debug;

pub fn satisfy_existential(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    let Formula::Exists(var, body) = goal else {
        return None;
    };
    if is_own_formula(state, goal, ctx) && !state.has_flag(ctx, RuleFlags::EXISTENTIAL) {
        eliminate_existential(state, ctx, var, body);
        return None;
    }
    introduce_existential(state, goal, var, body, ctx)
}

pub fn satisfy_universal(state: &mut SearchState, goal: &Formula, ctx: NodeId) -> Option<NodeId> {
    let Formula::Forall(var, body) = goal else {
        return None;
    };
    if is_own_formula(state, goal, ctx) && !state.has_flag(ctx, RuleFlags::UNIVERSAL) {
        eliminate_universal(state, ctx, var, body);
        return None;
    }
    introduce_universal(state, goal, var, body, ctx)
}

/// `∃x φ` gives `φ[x := c]` for a fresh witness `c`.
fn eliminate_existential(state: &mut SearchState, ctx: NodeId, var: &str, body: &Formula) {
    let witness = state.allocate_constant();
    debug!("witness {} for {}", witness, state.formula(ctx));
    state.set_flag(ctx, RuleFlags::EXISTENTIAL);
    let instance = body.substitute(var, &Term::constant(witness));
    state.derive(instance, Rule::ExistentialElimination, vec![ctx]);
}

/// `φ[x := t]` gives `∃x φ`.
fn introduce_existential(
    state: &mut SearchState,
    goal: &Formula,
    var: &str,
    body: &Formula,
    ctx: NodeId,
) -> Option<NodeId> {
    if let Some(id) = satisfy(state, body, ctx) {
        if body.instance_witness(var, state.formula(id)).is_some() {
            return state.derive(goal.clone(), Rule::ExistentialIntroduction, vec![id]);
        }
    }
    for constant in state.constants.known() {
        if state.expired() {
            break;
        }
        let instance = body.substitute(var, &Term::constant(constant));
        if let Some(id) = satisfy(state, &instance, ctx) {
            if *state.formula(id) == instance {
                return state.derive(goal.clone(), Rule::ExistentialIntroduction, vec![id]);
            }
        }
    }
    None
}

/// `∀x φ` gives `φ[x := c]` for every known constant.
///
/// With no constant known yet a fresh one is allocated. Allocation re-arms
/// every universal member, so the flag is set only afterwards.
fn eliminate_universal(state: &mut SearchState, ctx: NodeId, var: &str, body: &Formula) {
    let mut constants = state.constants.known();
    if constants.is_empty() {
        constants.push(state.allocate_constant());
    }
    state.set_flag(ctx, RuleFlags::UNIVERSAL);
    for constant in constants {
        if state.expired() {
            break;
        }
        let instance = body.substitute(var, &Term::constant(constant));
        state.derive(instance, Rule::UniversalElimination, vec![ctx]);
    }
}

/// `φ[x := c]` gives `∀x φ` when `c` is arbitrary.
///
/// `c` is the goal's generalization constant: fresh when chosen, and the
/// instance must not rest on an existential witness that mentions it.
fn introduce_universal(
    state: &mut SearchState,
    goal: &Formula,
    var: &str,
    body: &Formula,
    ctx: NodeId,
) -> Option<NodeId> {
    let constant = state.generalization_constant(goal);
    let instance = body.substitute(var, &Term::constant(constant.clone()));
    let id = satisfy(state, &instance, ctx)?;
    if *state.formula(id) != instance || state.depends_on_witness(id, &constant) {
        return None;
    }
    state.derive(goal.clone(), Rule::UniversalIntroduction, vec![id])
}
