//! Derivation tracking.
//!
//! Records how each formula was derived (inference rule + justifying parents)
//! and which rules have already been tried on it.

use crate::logic::Formula;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a node in the premise store arena
pub type NodeId = usize;

/// Natural-deduction rules that can justify a line of a proof
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Premise,
    Conclusion,
    ModusPonens,
    ModusTollens,
    HypotheticalSyllogism,
    DisjunctiveSyllogism,
    ConjunctionElimination,
    ConjunctionIntroduction,
    DisjunctionIntroduction,
    ImplicationIntroduction,
    BiconditionalIntroduction,
    BiconditionalElimination,
    DeMorgan,
    MaterialImplication,
    ExistentialIntroduction,
    ExistentialElimination,
    UniversalIntroduction,
    UniversalElimination,
    ContradictionIntroduction,
    ContradictionElimination,
}

impl Rule {
    /// Short code shown in a justification column
    pub fn code(self) -> &'static str {
        match self {
            Rule::Premise => "P",
            Rule::Conclusion => "C",
            Rule::ModusPonens => "MP",
            Rule::ModusTollens => "MT",
            Rule::HypotheticalSyllogism => "HS",
            Rule::DisjunctiveSyllogism => "DS",
            Rule::ConjunctionElimination => "&E",
            Rule::ConjunctionIntroduction => "&I",
            Rule::DisjunctionIntroduction => "∨I",
            Rule::ImplicationIntroduction => "→I",
            Rule::BiconditionalIntroduction => "↔I",
            Rule::BiconditionalElimination => "↔E",
            Rule::DeMorgan => "DeM",
            Rule::MaterialImplication => "MI",
            Rule::ExistentialIntroduction => "EI",
            Rule::ExistentialElimination => "EE",
            Rule::UniversalIntroduction => "UI",
            Rule::UniversalElimination => "UE",
            Rule::ContradictionIntroduction => "⊥I",
            Rule::ContradictionElimination => "⊥E",
        }
    }

    /// Human-readable rule name
    pub fn name(self) -> &'static str {
        match self {
            Rule::Premise => "Premise",
            Rule::Conclusion => "Conclusion",
            Rule::ModusPonens => "Modus Ponens",
            Rule::ModusTollens => "Modus Tollens",
            Rule::HypotheticalSyllogism => "Hypothetical Syllogism",
            Rule::DisjunctiveSyllogism => "Disjunctive Syllogism",
            Rule::ConjunctionElimination => "Conjunction Elimination",
            Rule::ConjunctionIntroduction => "Conjunction Introduction",
            Rule::DisjunctionIntroduction => "Disjunction Introduction",
            Rule::ImplicationIntroduction => "Implication Introduction",
            Rule::BiconditionalIntroduction => "Biconditional Introduction",
            Rule::BiconditionalElimination => "Biconditional Elimination",
            Rule::DeMorgan => "De Morgan",
            Rule::MaterialImplication => "Material Implication",
            Rule::ExistentialIntroduction => "Existential Introduction",
            Rule::ExistentialElimination => "Existential Elimination",
            Rule::UniversalIntroduction => "Universal Introduction",
            Rule::UniversalElimination => "Universal Elimination",
            Rule::ContradictionIntroduction => "Contradiction",
            Rule::ContradictionElimination => "Contradiction Elimination",
        }
    }

    /// Flags a freshly created node starts with.
    ///
    /// A line produced by an introduction or a rewrite must not be taken
    /// apart again by the inverse rule.
    pub fn initial_flags(self) -> RuleFlags {
        match self {
            Rule::ImplicationIntroduction => RuleFlags::IMPLICATION_INTRO,
            Rule::ConjunctionIntroduction => RuleFlags::CONJUNCTION_INTRO,
            Rule::DisjunctionIntroduction => RuleFlags::DISJUNCTION_INTRO,
            Rule::BiconditionalIntroduction => RuleFlags::BICONDITIONAL,
            Rule::DeMorgan => RuleFlags::DE_MORGAN,
            Rule::MaterialImplication => RuleFlags::MATERIAL_IMPLICATION,
            Rule::ExistentialIntroduction => RuleFlags::EXISTENTIAL,
            _ => RuleFlags::empty(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One bit per rule family, set once that family has fired on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RuleFlags(u16);

impl RuleFlags {
    pub const MODUS_PONENS: RuleFlags = RuleFlags(1 << 0);
    pub const MODUS_TOLLENS: RuleFlags = RuleFlags(1 << 1);
    pub const HYPOTHETICAL_SYLLOGISM: RuleFlags = RuleFlags(1 << 2);
    pub const IMPLICATION_INTRO: RuleFlags = RuleFlags(1 << 3);
    pub const CONJUNCTION_ELIM: RuleFlags = RuleFlags(1 << 4);
    pub const CONJUNCTION_INTRO: RuleFlags = RuleFlags(1 << 5);
    pub const DISJUNCTION_INTRO: RuleFlags = RuleFlags(1 << 6);
    pub const DISJUNCTIVE_SYLLOGISM: RuleFlags = RuleFlags(1 << 7);
    pub const BICONDITIONAL: RuleFlags = RuleFlags(1 << 8);
    pub const DE_MORGAN: RuleFlags = RuleFlags(1 << 9);
    pub const MATERIAL_IMPLICATION: RuleFlags = RuleFlags(1 << 10);
    pub const EXISTENTIAL: RuleFlags = RuleFlags(1 << 11);
    pub const UNIVERSAL: RuleFlags = RuleFlags(1 << 12);

    pub const fn empty() -> Self {
        RuleFlags(0)
    }

    pub fn contains(self, other: RuleFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: RuleFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: RuleFlags) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for RuleFlags {
    type Output = RuleFlags;

    fn bitor(self, rhs: RuleFlags) -> RuleFlags {
        RuleFlags(self.0 | rhs.0)
    }
}

/// How a formula was derived: the rule plus the nodes it cites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    /// Inference rule that produced the formula
    pub rule: Rule,
    /// Arena indices of the justifying parents, in citation order
    pub premises: Vec<NodeId>,
}

impl Derivation {
    /// An input premise, justified by nothing
    pub fn premise() -> Self {
        Derivation {
            rule: Rule::Premise,
            premises: vec![],
        }
    }

    pub fn new(rule: Rule, premises: Vec<NodeId>) -> Self {
        Derivation { rule, premises }
    }
}

/// A formula together with its proof metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivationNode {
    pub formula: Formula,
    pub derivation: Derivation,
    pub flags: RuleFlags,
    /// Set during proof extraction on every node the proof uses
    pub active: bool,
}

impl DerivationNode {
    pub fn new(formula: Formula, rule: Rule, premises: Vec<NodeId>) -> Self {
        DerivationNode {
            formula,
            derivation: Derivation::new(rule, premises),
            flags: rule.initial_flags(),
            active: false,
        }
    }

    pub fn premise(formula: Formula) -> Self {
        DerivationNode::new(formula, Rule::Premise, vec![])
    }

    pub fn rule(&self) -> Rule {
        self.derivation.rule
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.derivation.premises
    }

    pub fn has_flag(&self, flag: RuleFlags) -> bool {
        self.flags.contains(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_premise() {
        let premise = Derivation::premise();
        assert_eq!(premise.rule, Rule::Premise);
        assert!(premise.premises.is_empty());
    }

    #[test]
    fn test_initial_flags_block_inverse_rule() {
        let node = DerivationNode::new(Formula::atom("P"), Rule::ConjunctionIntroduction, vec![0, 1]);
        assert!(node.has_flag(RuleFlags::CONJUNCTION_INTRO));
        assert!(!node.has_flag(RuleFlags::CONJUNCTION_ELIM));
        assert_eq!(node.parents(), &[0, 1]);

        let node = DerivationNode::new(Formula::atom("P"), Rule::ModusPonens, vec![0, 1]);
        assert!(node.flags.is_empty());
        assert!(!node.active);
    }

    #[test]
    fn test_flag_set_operations() {
        let mut flags = RuleFlags::empty();
        flags.insert(RuleFlags::MODUS_PONENS);
        flags.insert(RuleFlags::UNIVERSAL);
        assert!(flags.contains(RuleFlags::MODUS_PONENS));
        assert!(flags.contains(RuleFlags::MODUS_PONENS | RuleFlags::UNIVERSAL));
        assert!(!flags.contains(RuleFlags::MODUS_TOLLENS));
        flags.remove(RuleFlags::UNIVERSAL);
        assert!(!flags.contains(RuleFlags::UNIVERSAL));
    }

    #[test]
    fn test_rule_codes() {
        assert_eq!(Rule::ModusPonens.code(), "MP");
        assert_eq!(Rule::ConjunctionElimination.to_string(), "&E");
        assert_eq!(Rule::ContradictionElimination.name(), "Contradiction Elimination");
    }

    #[test]
    fn test_serialization() {
        let deriv = Derivation::new(Rule::HypotheticalSyllogism, vec![1, 2]);
        let json = serde_json::to_string(&deriv).unwrap();
        let parsed: Derivation = serde_json::from_str(&json).unwrap();
        assert_eq!(deriv, parsed);
    }
}
