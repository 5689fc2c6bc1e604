//! Formula trees for propositional and first-order logic
//!
//! A [`Formula`] is a closed sum type: every connective, quantifier and leaf
//! is a variant, and each variant owns its children. Two formulas denote the
//! same proposition for the purposes of the search exactly when they are
//! structurally equal, which is what the derived `PartialEq`/`Hash` compute
//! and what the canonical `Display` string reflects.

use super::term::Term;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Binary connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connective {
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "∧",
            Connective::Or => "∨",
            Connective::Implies => "→",
            Connective::Iff => "↔",
        }
    }

    /// The connective produced when a negation is pushed through `self`.
    ///
    /// `¬(X ∧ Y)` becomes a disjunction, `¬(X ∨ Y)` a conjunction and
    /// `¬(X → Y)` a conjunction. Biconditionals have no De Morgan dual.
    pub fn negated_dual(self) -> Option<Connective> {
        match self {
            Connective::And => Some(Connective::Or),
            Connective::Or => Some(Connective::And),
            Connective::Implies => Some(Connective::And),
            Connective::Iff => None,
        }
    }
}

/// A well-formed formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "args")]
pub enum Formula {
    /// Propositional letter
    Atom(String),
    /// Predicate symbol applied to terms
    Predicate(String, Vec<Term>),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    /// Existential quantifier binding the named variable
    Exists(String, Box<Formula>),
    /// Universal quantifier binding the named variable
    Forall(String, Box<Formula>),
    /// Contradiction marker
    False,
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Self {
        Formula::Atom(name.into())
    }

    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Self {
        Formula::Predicate(name.into(), args)
    }

    pub fn negation(child: Formula) -> Self {
        Formula::Not(Box::new(child))
    }

    pub fn and(lhs: Formula, rhs: Formula) -> Self {
        Formula::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Formula, rhs: Formula) -> Self {
        Formula::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Formula, rhs: Formula) -> Self {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: Formula, rhs: Formula) -> Self {
        Formula::Iff(Box::new(lhs), Box::new(rhs))
    }

    pub fn exists(var: impl Into<String>, body: Formula) -> Self {
        Formula::Exists(var.into(), Box::new(body))
    }

    pub fn forall(var: impl Into<String>, body: Formula) -> Self {
        Formula::Forall(var.into(), Box::new(body))
    }

    /// Build a binary formula from a connective and its operands
    pub fn binary(connective: Connective, lhs: Formula, rhs: Formula) -> Self {
        match connective {
            Connective::And => Formula::and(lhs, rhs),
            Connective::Or => Formula::or(lhs, rhs),
            Connective::Implies => Formula::implies(lhs, rhs),
            Connective::Iff => Formula::iff(lhs, rhs),
        }
    }

    /// View a binary formula as `(connective, lhs, rhs)`
    pub fn as_binary(&self) -> Option<(Connective, &Formula, &Formula)> {
        match self {
            Formula::And(l, r) => Some((Connective::And, l, r)),
            Formula::Or(l, r) => Some((Connective::Or, l, r)),
            Formula::Implies(l, r) => Some((Connective::Implies, l, r)),
            Formula::Iff(l, r) => Some((Connective::Iff, l, r)),
            _ => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.as_binary().is_some()
    }

    pub fn is_negation(&self) -> bool {
        matches!(self, Formula::Not(_))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, Formula::And(..))
    }

    pub fn is_or(&self) -> bool {
        matches!(self, Formula::Or(..))
    }

    pub fn is_implication(&self) -> bool {
        matches!(self, Formula::Implies(..))
    }

    pub fn is_biconditional(&self) -> bool {
        matches!(self, Formula::Iff(..))
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self, Formula::Predicate(..))
    }

    pub fn is_negated_predicate(&self) -> bool {
        matches!(self, Formula::Not(inner) if inner.is_predicate())
    }

    pub fn is_existential(&self) -> bool {
        matches!(self, Formula::Exists(..))
    }

    pub fn is_universal(&self) -> bool {
        matches!(self, Formula::Forall(..))
    }

    pub fn is_quantified(&self) -> bool {
        self.is_existential() || self.is_universal()
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Formula::False)
    }

    /// A binary formula whose operands are identical, e.g. `A ∧ A` or `A → A`.
    pub fn is_redundant(&self) -> bool {
        matches!(self.as_binary(), Some((_, lhs, rhs)) if lhs == rhs)
    }

    /// Logical negation, cancelling a leading negation instead of doubling it.
    pub fn flip(&self) -> Formula {
        match self {
            Formula::Not(inner) => (**inner).clone(),
            other => Formula::negation(other.clone()),
        }
    }

    /// Replace free occurrences of `var` by `replacement`.
    ///
    /// Substitution stops at a quantifier that rebinds `var`.
    pub fn substitute(&self, var: &str, replacement: &Term) -> Formula {
        match self {
            Formula::Atom(_) | Formula::False => self.clone(),
            Formula::Predicate(name, args) => Formula::Predicate(
                name.clone(),
                args.iter().map(|t| t.substitute(var, replacement)).collect(),
            ),
            Formula::Not(inner) => Formula::negation(inner.substitute(var, replacement)),
            Formula::And(l, r) => Formula::and(l.substitute(var, replacement), r.substitute(var, replacement)),
            Formula::Or(l, r) => Formula::or(l.substitute(var, replacement), r.substitute(var, replacement)),
            Formula::Implies(l, r) => {
                Formula::implies(l.substitute(var, replacement), r.substitute(var, replacement))
            }
            Formula::Iff(l, r) => Formula::iff(l.substitute(var, replacement), r.substitute(var, replacement)),
            Formula::Exists(bound, _) | Formula::Forall(bound, _) if bound == var => self.clone(),
            Formula::Exists(bound, body) => Formula::exists(bound.clone(), body.substitute(var, replacement)),
            Formula::Forall(bound, body) => Formula::forall(bound.clone(), body.substitute(var, replacement)),
        }
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        self.collect_free_variables(&mut Vec::new(), &mut vars);
        vars
    }

    fn collect_free_variables(&self, bound: &mut Vec<String>, vars: &mut BTreeSet<String>) {
        match self {
            Formula::Atom(_) | Formula::False => {}
            Formula::Predicate(_, args) => {
                for arg in args {
                    if let Term::Variable(name) = arg {
                        if !bound.contains(name) {
                            vars.insert(name.clone());
                        }
                    }
                }
            }
            Formula::Not(inner) => inner.collect_free_variables(bound, vars),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
                l.collect_free_variables(bound, vars);
                r.collect_free_variables(bound, vars);
            }
            Formula::Exists(var, body) | Formula::Forall(var, body) => {
                bound.push(var.clone());
                body.collect_free_variables(bound, vars);
                bound.pop();
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// Get all constant symbols occurring in the formula
    pub fn constants(&self) -> BTreeSet<String> {
        let mut constants = BTreeSet::new();
        self.collect_constants(&mut constants);
        constants
    }

    pub fn collect_constants(&self, constants: &mut BTreeSet<String>) {
        match self {
            Formula::Atom(_) | Formula::False => {}
            Formula::Predicate(_, args) => {
                for arg in args {
                    if let Term::Constant(name) = arg {
                        constants.insert(name.clone());
                    }
                }
            }
            Formula::Not(inner) | Formula::Exists(_, inner) | Formula::Forall(_, inner) => {
                inner.collect_constants(constants)
            }
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
                l.collect_constants(constants);
                r.collect_constants(constants);
            }
        }
    }

    /// Does the formula contain a predicate or a quantifier?
    pub fn is_first_order(&self) -> bool {
        match self {
            Formula::Atom(_) | Formula::False => false,
            Formula::Predicate(..) | Formula::Exists(..) | Formula::Forall(..) => true,
            Formula::Not(inner) => inner.is_first_order(),
            Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
                l.is_first_order() || r.is_first_order()
            }
        }
    }

    /// Find the term `t` with `self[var := t] == instance`.
    ///
    /// Returns `Some(None)` when `var` does not occur free in `self` and the
    /// two formulas are already equal, `Some(Some(t))` when every free
    /// occurrence of `var` lines up with the same term `t`, and `None` when
    /// `instance` is not an instance of `self`.
    pub fn instance_witness(&self, var: &str, instance: &Formula) -> Option<Option<Term>> {
        let mut binding = None;
        if match_instance(self, var, instance, &mut binding) {
            Some(binding)
        } else {
            None
        }
    }
}

fn match_instance(pattern: &Formula, var: &str, instance: &Formula, binding: &mut Option<Term>) -> bool {
    match (pattern, instance) {
        (Formula::Predicate(p, pargs), Formula::Predicate(q, qargs)) => {
            if p != q || pargs.len() != qargs.len() {
                return false;
            }
            for (parg, qarg) in pargs.iter().zip(qargs) {
                match parg {
                    Term::Variable(name) if name == var => match binding {
                        Some(bound) if bound != qarg => return false,
                        Some(_) => {}
                        None => *binding = Some(qarg.clone()),
                    },
                    _ if parg != qarg => return false,
                    _ => {}
                }
            }
            true
        }
        (Formula::Not(p), Formula::Not(q)) => match_instance(p, var, q, binding),
        (Formula::And(pl, pr), Formula::And(ql, qr))
        | (Formula::Or(pl, pr), Formula::Or(ql, qr))
        | (Formula::Implies(pl, pr), Formula::Implies(ql, qr))
        | (Formula::Iff(pl, pr), Formula::Iff(ql, qr)) => {
            match_instance(pl, var, ql, binding) && match_instance(pr, var, qr, binding)
        }
        (Formula::Exists(pv, pb), Formula::Exists(qv, qb)) | (Formula::Forall(pv, pb), Formula::Forall(qv, qb)) => {
            if pv != qv {
                return false;
            }
            if pv == var {
                // `var` is shadowed below this quantifier.
                return pb == qb;
            }
            match_instance(pb, var, qb, binding)
        }
        _ => pattern == instance,
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(name) => write!(f, "{}", name),
            Formula::Predicate(name, args) => {
                // Always parenthesized: `P()` is not the atom `P`.
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::Exists(var, body) => write!(f, "∃{} {}", var, body),
            Formula::Forall(var, body) => write!(f, "∀{} {}", var, body),
            Formula::False => write!(f, "⊥"),
            binary => {
                // Remaining variants are all binary.
                if let Some((connective, lhs, rhs)) = binary.as_binary() {
                    write!(f, "({} {} {})", lhs, connective.symbol(), rhs)
                } else {
                    Ok(())
                }
            }
        }
    }
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

    fn px() -> Formula {
        Formula::predicate("P", vec![Term::variable("x")])
    }

    #[test]
    fn test_flip_cancels_negation() {
        assert_eq!(p().flip(), Formula::negation(p()));
        assert_eq!(Formula::negation(p()).flip(), p());
        assert_eq!(Formula::negation(Formula::negation(p())).flip(), Formula::negation(p()));
    }

    #[test]
    fn test_redundant_binary() {
        assert!(Formula::and(p(), p()).is_redundant());
        assert!(Formula::or(p(), p()).is_redundant());
        assert!(Formula::implies(p(), p()).is_redundant());
        assert!(Formula::iff(p(), p()).is_redundant());
        assert!(!Formula::and(p(), q()).is_redundant());
        assert!(!Formula::negation(p()).is_redundant());
    }

    #[test]
    fn test_classification() {
        assert!(Formula::implies(p(), q()).is_implication());
        assert!(Formula::iff(p(), q()).is_biconditional());
        assert!(Formula::negation(px()).is_negated_predicate());
        assert!(!Formula::negation(p()).is_negated_predicate());
        assert!(Formula::exists("x", px()).is_existential());
        assert!(Formula::forall("x", px()).is_universal());
        assert!(!Formula::and(p(), q()).is_first_order());
        assert!(Formula::and(p(), px()).is_first_order());
    }

    #[test]
    fn test_negated_dual() {
        assert_eq!(Connective::And.negated_dual(), Some(Connective::Or));
        assert_eq!(Connective::Or.negated_dual(), Some(Connective::And));
        assert_eq!(Connective::Implies.negated_dual(), Some(Connective::And));
        assert_eq!(Connective::Iff.negated_dual(), None);
    }

    #[test]
    fn test_substitute_respects_rebinding() {
        let a = Term::constant("a");
        let f = Formula::and(px(), Formula::exists("x", px()));
        let expected = Formula::and(
            Formula::predicate("P", vec![a.clone()]),
            Formula::exists("x", px()),
        );
        assert_eq!(f.substitute("x", &a), expected);
    }

    #[test]
    fn test_free_variables_and_constants() {
        let f = Formula::forall(
            "x",
            Formula::implies(px(), Formula::predicate("R", vec![Term::variable("y"), Term::constant("b")])),
        );
        assert_eq!(f.free_variables().into_iter().collect::<Vec<_>>(), vec!["y".to_string()]);
        assert!(!f.is_closed());
        assert_eq!(f.constants().into_iter().collect::<Vec<_>>(), vec!["b".to_string()]);
    }

    #[test]
    fn test_instance_witness() {
        let body = Formula::and(px(), Formula::predicate("Q", vec![Term::variable("x")]));
        let pa = Formula::predicate("P", vec![Term::constant("a")]);
        let qa = Formula::predicate("Q", vec![Term::constant("a")]);
        let qb = Formula::predicate("Q", vec![Term::constant("b")]);

        let consistent = Formula::and(pa.clone(), qa);
        assert_eq!(body.instance_witness("x", &consistent), Some(Some(Term::constant("a"))));

        let inconsistent = Formula::and(pa, qb);
        assert_eq!(body.instance_witness("x", &inconsistent), None);

        assert_eq!(p().instance_witness("x", &p()), Some(None));
    }

    #[test]
    fn test_display() {
        let f = Formula::forall(
            "x",
            Formula::implies(px(), Formula::negation(Formula::predicate("Q", vec![Term::constant("a")]))),
        );
        assert_eq!(f.to_string(), "∀x (P(x) → ¬Q(a))");
        assert_eq!(Formula::False.to_string(), "⊥");
    }

    #[test]
    fn test_display_tells_nullary_predicate_from_atom() {
        let atom = Formula::atom("P");
        let nullary = Formula::predicate("P", vec![]);
        assert_ne!(atom, nullary);
        assert_eq!(atom.to_string(), "P");
        assert_eq!(nullary.to_string(), "P()");
    }

    #[test]
    fn test_serialization() {
        let f = Formula::implies(p(), Formula::negation(q()));
        let json = serde_json::to_string(&f).unwrap();
        let parsed: Formula = serde_json::from_str(&json).unwrap();
        assert_eq!(f, parsed);

        let parsed: Formula = serde_json::from_str(r#"{"type":"Atom","args":"P"}"#).unwrap();
        assert_eq!(parsed, p());
    }
}
