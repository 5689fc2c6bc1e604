//! Propositional and first-order formula representation
//!
//! This module provides the symbolic trees the search manipulates: terms,
//! formulas, input wrappers, and the constant pools used by the quantifier
//! rules.

pub mod constants;
pub mod formula;
pub mod term;
pub mod wff;

#[cfg(test)]
mod proptest_tests;

// Re-export commonly used types
pub use constants::ConstantPool;
pub use formula::{Connective, Formula};
pub use term::Term;
pub use wff::{split_problem, Wff};
