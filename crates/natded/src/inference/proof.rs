//! Proof extraction and the proof trace

use super::derivation::{Derivation, NodeId};
use crate::logic::Formula;
use crate::store::PremiseStore;
use std::collections::HashMap;
use std::fmt;

/// One numbered line of a proof
#[derive(Debug, Clone)]
pub struct ProofStep {
    /// 1-based line number
    pub line: usize,
    /// Arena index of the node behind this line
    pub node_idx: NodeId,
    pub formula: Formula,
    pub derivation: Derivation,
    /// Line numbers of the cited parents, in citation order
    pub justification: Vec<usize>,
}

/// A proof is a sequence of lines ending in the conclusion
#[derive(Debug, Clone)]
pub struct Proof {
    pub steps: Vec<ProofStep>,
    pub conclusion_idx: NodeId,
}

impl Proof {
    /// Mark every node the conclusion depends on and list them.
    ///
    /// Lines are the marked members in insertion order followed by the
    /// conclusion. Parents always precede their children, so every
    /// justification cites earlier lines only.
    pub fn extract(store: &mut PremiseStore, conclusion: NodeId) -> Proof {
        let mut to_visit = vec![conclusion];
        while let Some(idx) = to_visit.pop() {
            let node = store.node_mut(idx);
            if node.active {
                continue;
            }
            node.active = true;
            to_visit.extend(node.parents().iter().copied());
        }

        let mut order: Vec<NodeId> = store
            .member_ids()
            .filter(|&idx| store.node(idx).active)
            .collect();
        order.push(conclusion);

        let lines: HashMap<NodeId, usize> = order.iter().enumerate().map(|(i, &idx)| (idx, i + 1)).collect();
        let steps = order
            .iter()
            .enumerate()
            .map(|(i, &idx)| {
                let node = store.node(idx);
                ProofStep {
                    line: i + 1,
                    node_idx: idx,
                    formula: node.formula.clone(),
                    derivation: node.derivation.clone(),
                    justification: node.parents().iter().filter_map(|p| lines.get(p).copied()).collect(),
                }
            })
            .collect();

        Proof {
            steps,
            conclusion_idx: conclusion,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The final line
    pub fn conclusion(&self) -> Option<&ProofStep> {
        self.steps.last()
    }
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}. {}    {}", self.line, self.formula, self.derivation.rule)?;
        for (i, line) in self.justification.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { " " } else { "," }, line)?;
        }
        Ok(())
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{DerivationNode, Rule};

    fn atom(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn test_extract_skips_unused_lines() {
        let mut store = PremiseStore::new();
        store.insert(DerivationNode::premise(atom("P")));
        store.insert(DerivationNode::premise(atom("R")));
        store.insert(DerivationNode::premise(Formula::implies(atom("P"), atom("Q"))));
        let conclusion = store.insert_detached(DerivationNode::new(atom("Q"), Rule::ModusPonens, vec![2, 0]));

        let proof = Proof::extract(&mut store, conclusion);
        let formulas: Vec<_> = proof.steps.iter().map(|s| s.formula.clone()).collect();
        assert_eq!(formulas, vec![atom("P"), Formula::implies(atom("P"), atom("Q")), atom("Q")]);
        assert_eq!(proof.conclusion().unwrap().justification, vec![2, 1]);
        assert!(!store.node(1).active);
        assert!(store.node(0).active);
    }

    #[test]
    fn test_display() {
        let mut store = PremiseStore::new();
        store.insert(DerivationNode::premise(atom("P")));
        store.insert(DerivationNode::premise(Formula::implies(atom("P"), atom("Q"))));
        let conclusion = store.insert_detached(DerivationNode::new(atom("Q"), Rule::ModusPonens, vec![1, 0]));
        let proof = Proof::extract(&mut store, conclusion);
        assert_eq!(proof.to_string(), "  1. P    P\n  2. (P → Q)    P\n  3. Q    MP 2,1\n");
    }
}
