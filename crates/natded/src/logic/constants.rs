//! Constant pools and fresh-constant allocation
//!
//! Quantifier rules need constants that carry no prior meaning: a witness for
//! existential elimination or an arbitrary individual for universal
//! introduction. The pool reserves every constant of the premises and of the
//! conclusion and hands out the first unused symbol in the order
//! `a, b, …, z, a1, b1, …, z1, a2, …`.

use super::formula::Formula;
use std::collections::BTreeSet;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Reserved constants of one search session
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    /// Constants of the premises plus every constant allocated so far
    premise: BTreeSet<String>,
    /// Constants of the conclusion
    conclusion: BTreeSet<String>,
}

impl ConstantPool {
    pub fn new<'a>(premises: impl IntoIterator<Item = &'a Formula>, conclusion: &Formula) -> Self {
        let mut premise = BTreeSet::new();
        for formula in premises {
            formula.collect_constants(&mut premise);
        }
        ConstantPool {
            premise,
            conclusion: conclusion.constants(),
        }
    }

    pub fn contains(&self, constant: &str) -> bool {
        self.premise.contains(constant) || self.conclusion.contains(constant)
    }

    /// Every constant known to the session, in lexicographic order
    pub fn known(&self) -> Vec<String> {
        self.premise.union(&self.conclusion).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.premise.is_empty() && self.conclusion.is_empty()
    }

    /// The first symbol in allocation order that is in neither pool.
    pub fn next_fresh(&self) -> String {
        (0usize..)
            .flat_map(|round| {
                LETTERS.chars().map(move |c| {
                    if round == 0 {
                        c.to_string()
                    } else {
                        format!("{}{}", c, round)
                    }
                })
            })
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_default()
    }

    /// Allocate a fresh constant and reserve it in the premise pool.
    pub fn allocate(&mut self) -> String {
        let constant = self.next_fresh();
        self.premise.insert(constant.clone());
        constant
    }
}
