//! Independent checking of extracted proofs.
//!
//! The checker knows nothing about how the search found a line. It only
//! looks at each line's formula, rule and cited lines and decides whether
//! the rule licenses that step.

use super::derivation::Rule;
use super::proof::{Proof, ProofStep};
use super::rewrite::{de_morgan, material_implication};
use crate::logic::{Formula, Term};
use std::collections::BTreeSet;
use thiserror::Error;

/// Why a proof was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("line {line}: {rule} does not justify {formula}")]
    InvalidConclusion { line: usize, rule: Rule, formula: String },

    #[error("line {line}: cites line {cited}, which does not precede it")]
    InvalidPremise { line: usize, cited: usize },

    #[error("line {line}: {formula} is not an input premise")]
    PremiseNotFound { line: usize, formula: String },

    #[error("line {line}: rule {rule} cannot appear in a proof")]
    UnknownRule { line: usize, rule: Rule },

    #[error("proof does not end in the conclusion")]
    MissingConclusion,
}

/// Check every line of `proof` against the premises and the conclusion.
pub fn verify_proof(proof: &Proof, premises: &[Formula], conclusion: &Formula) -> Result<(), VerificationError> {
    match proof.conclusion() {
        Some(last) if last.formula == *conclusion => {}
        _ => return Err(VerificationError::MissingConclusion),
    }

    let mut reserved = BTreeSet::new();
    for premise in premises {
        premise.collect_constants(&mut reserved);
    }
    conclusion.collect_constants(&mut reserved);

    for (i, step) in proof.steps.iter().enumerate() {
        let mut cited = Vec::with_capacity(step.justification.len());
        for &line in &step.justification {
            if line == 0 || line >= step.line {
                return Err(VerificationError::InvalidPremise { line: step.line, cited: line });
            }
            cited.push(&proof.steps[line - 1].formula);
        }

        if step.derivation.rule == Rule::Premise {
            if !premises.contains(&step.formula) {
                return Err(VerificationError::PremiseNotFound {
                    line: step.line,
                    formula: step.formula.to_string(),
                });
            }
            continue;
        }

        // Constants that were in play before this line.
        let mut earlier = reserved.clone();
        for previous in &proof.steps[..i] {
            previous.formula.collect_constants(&mut earlier);
        }

        if !licenses(step, &cited, &reserved, &earlier)? {
            return Err(VerificationError::InvalidConclusion {
                line: step.line,
                rule: step.derivation.rule,
                formula: step.formula.to_string(),
            });
        }
    }
    Ok(())
}

fn licenses(
    step: &ProofStep,
    cited: &[&Formula],
    reserved: &BTreeSet<String>,
    earlier: &BTreeSet<String>,
) -> Result<bool, VerificationError> {
    let formula = &step.formula;
    let ok = match (step.derivation.rule, cited) {
        (Rule::ModusPonens, [major, minor]) => **major == Formula::implies((*minor).clone(), formula.clone()),
        (Rule::ModusTollens, [Formula::Implies(antecedent, consequent), minor]) => {
            minor.flip() == **consequent && *formula == antecedent.flip()
        }
        (Rule::HypotheticalSyllogism, [Formula::Implies(a, b), Formula::Implies(c, d)]) => {
            (b == c && *formula == Formula::implies((**a).clone(), (**d).clone()))
                || (d == a && *formula == Formula::implies((**c).clone(), (**b).clone()))
        }
        (Rule::DisjunctiveSyllogism, [Formula::Or(lhs, rhs), minor]) => {
            (**minor == lhs.flip() && *formula == **rhs) || (**minor == rhs.flip() && *formula == **lhs)
        }
        (Rule::ConjunctionElimination, [Formula::And(lhs, rhs)]) => *formula == **lhs || *formula == **rhs,
        (Rule::ConjunctionIntroduction, [lhs, rhs]) => *formula == Formula::and((*lhs).clone(), (*rhs).clone()),
        (Rule::DisjunctionIntroduction, operands) if !operands.is_empty() && operands.len() <= 2 => {
            match formula {
                Formula::Or(lhs, rhs) => operands.iter().all(|op| **op == **lhs || **op == **rhs),
                _ => false,
            }
        }
        (Rule::ImplicationIntroduction, [lhs, rhs]) => *formula == Formula::implies((*lhs).clone(), (*rhs).clone()),
        (Rule::BiconditionalIntroduction, [Formula::Implies(x, y), backward]) => {
            **backward == Formula::implies((**y).clone(), (**x).clone())
                && *formula == Formula::iff((**x).clone(), (**y).clone())
        }
        (Rule::BiconditionalElimination, [Formula::Iff(x, y)]) => {
            *formula == Formula::implies((**x).clone(), (**y).clone())
                || *formula == Formula::implies((**y).clone(), (**x).clone())
        }
        (Rule::DeMorgan, [source]) => de_morgan(source).as_ref() == Some(formula),
        (Rule::MaterialImplication, [source]) => material_implication(source).as_ref() == Some(formula),
        (Rule::ExistentialIntroduction, [instance]) => match formula {
            Formula::Exists(var, body) => body.instance_witness(var, instance).is_some(),
            _ => false,
        },
        (Rule::ExistentialElimination, [Formula::Exists(var, body)]) => match body.instance_witness(var, formula) {
            Some(Some(Term::Constant(witness))) => !earlier.contains(&witness),
            Some(None) => true,
            _ => false,
        },
        (Rule::UniversalElimination, [Formula::Forall(var, body)]) => {
            matches!(body.instance_witness(var, formula), Some(None) | Some(Some(Term::Constant(_))))
        }
        (Rule::UniversalIntroduction, [instance]) => match formula {
            Formula::Forall(var, body) => match body.instance_witness(var, instance) {
                Some(Some(Term::Constant(c))) => !reserved.contains(&c) && !formula.constants().contains(&c),
                Some(None) => true,
                _ => false,
            },
            _ => false,
        },
        (Rule::ContradictionIntroduction, [lhs, rhs]) => formula.is_false() && lhs.flip() == **rhs,
        (Rule::ContradictionElimination, [falsum]) => falsum.is_false(),
        (rule @ (Rule::Premise | Rule::Conclusion), _) => {
            return Err(VerificationError::UnknownRule { line: step.line, rule });
        }
        _ => false,
    };
    Ok(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{DerivationNode, Rule};
    use crate::store::PremiseStore;

    fn atom(name: &str) -> Formula {
        Formula::atom(name)
    }

    fn modus_ponens_proof(rule: Rule, conclusion: Formula) -> Proof {
        let mut store = PremiseStore::new();
        store.insert(DerivationNode::premise(atom("P")));
        store.insert(DerivationNode::premise(Formula::implies(atom("P"), atom("Q"))));
        let conclusion = store.insert_detached(DerivationNode::new(conclusion, rule, vec![1, 0]));
        Proof::extract(&mut store, conclusion)
    }

    #[test]
    fn test_accepts_modus_ponens() {
        let premises = [atom("P"), Formula::implies(atom("P"), atom("Q"))];
        let proof = modus_ponens_proof(Rule::ModusPonens, atom("Q"));
        assert_eq!(verify_proof(&proof, &premises, &atom("Q")), Ok(()));
    }

    #[test]
    fn test_rejects_wrong_rule() {
        let premises = [atom("P"), Formula::implies(atom("P"), atom("Q"))];
        let proof = modus_ponens_proof(Rule::ModusTollens, atom("Q"));
        assert!(matches!(
            verify_proof(&proof, &premises, &atom("Q")),
            Err(VerificationError::InvalidConclusion { line: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_unlisted_premise() {
        let premises = [Formula::implies(atom("P"), atom("Q"))];
        let proof = modus_ponens_proof(Rule::ModusPonens, atom("Q"));
        assert_eq!(
            verify_proof(&proof, &premises, &atom("Q")),
            Err(VerificationError::PremiseNotFound { line: 1, formula: "P".into() })
        );
    }

    #[test]
    fn test_rejects_wrong_conclusion() {
        let premises = [atom("P"), Formula::implies(atom("P"), atom("Q"))];
        let proof = modus_ponens_proof(Rule::ModusPonens, atom("Q"));
        assert_eq!(verify_proof(&proof, &premises, &atom("R")), Err(VerificationError::MissingConclusion));
    }

    #[test]
    fn test_universal_introduction_needs_arbitrary_constant() {
        let pa = Formula::predicate("P", vec![Term::constant("a")]);
        let all = Formula::forall("x", Formula::predicate("P", vec![Term::variable("x")]));
        let mut store = PremiseStore::new();
        store.insert(DerivationNode::premise(pa.clone()));
        let conclusion = store.insert_detached(DerivationNode::new(all.clone(), Rule::UniversalIntroduction, vec![0]));
        let proof = Proof::extract(&mut store, conclusion);
        assert!(matches!(
            verify_proof(&proof, &[pa], &all),
            Err(VerificationError::InvalidConclusion { line: 2, .. })
        ));
    }
}
