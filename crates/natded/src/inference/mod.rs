//! Natural-deduction inference rules
//!
//! Each rule family lives in its own module as free functions over the
//! [`SearchState`](crate::state::SearchState). [`engine::satisfy`] dispatches
//! a goal to them.

pub mod biconditional;
pub mod conjunction;
pub mod contradiction;
pub mod derivation;
pub mod disjunction;
pub mod engine;
pub mod implication;
pub mod predicate;
pub mod proof;
pub mod quantifier;
pub mod rewrite;
pub mod verify;

pub use derivation::{Derivation, DerivationNode, NodeId, Rule, RuleFlags};
pub use proof::{Proof, ProofStep};
pub use verify::{verify_proof, VerificationError};

pub use contradiction::{find_conclusion, find_contradiction};
pub use engine::satisfy;
pub use rewrite::{de_morgan, material_implication};
