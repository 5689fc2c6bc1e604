//! natded: natural-deduction proof synthesis for propositional and
//! first-order logic
//!
//! Given premises and a conclusion, the prover searches for a chain of
//! natural-deduction rule applications that derives the conclusion and
//! returns the lines the derivation actually uses, numbered and justified.
//!
//! ```
//! use natded::{prove, Formula, ProverConfig, Wff};
//!
//! let p = Formula::atom("P");
//! let q = Formula::atom("Q");
//! let wffs: Vec<Wff> = vec![p.clone().into(), Formula::implies(p, q.clone()).into(), q.into()];
//! let (result, _prover) = prove(wffs, ProverConfig::default()).unwrap();
//! assert!(result.is_proof());
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod json;
pub mod logic;
pub mod prover;
pub mod state;
pub mod store;

pub use config::ProverConfig;
pub use error::{ProverError, Result};

pub use logic::{split_problem, ConstantPool, Connective, Formula, Term, Wff};

pub use inference::{
    verify_proof, Derivation, DerivationNode, NodeId, Proof, ProofStep, Rule, RuleFlags, VerificationError,
};

pub use json::{ConfigJson, ProblemJson, ProofAttemptJson, ProofJson, ProofResultJson, ProofStepJson};
pub use prover::profile::SearchProfile;
pub use prover::{prove, Prover};
pub use state::{Limit, ProofResult, SearchState};
pub use store::{Insertion, PremiseStore, Rejection};
