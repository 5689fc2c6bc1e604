//! Prover: drives the natural-deduction proof search.
//!
//! Each pass asks every member of the store, including members appended
//! during the same pass, and then the conclusion to satisfy itself. Passes
//! repeat until the conclusion is a member, the members contradict each
//! other, a pass changes nothing, or a resource limit is hit.
//!
//! Use `prove()` to run to completion, or `step()` for incremental execution.

pub mod profile;

use crate::config::{process_memory_mb, ProverConfig};
use crate::error::Result;
use crate::inference::{find_conclusion, find_contradiction, satisfy, verify_proof, Proof, VerificationError};
use crate::logic::{split_problem, Formula, Wff};
use crate::state::{Limit, ProofResult, SearchState};
use self::profile::SearchProfile;
use std::time::Instant;
use tracing::debug;

/// Per-problem search engine.
pub struct Prover {
    /// Prover configuration (limits, timeouts, etc.)
    pub config: ProverConfig,
    /// Store, pools and flags of this search
    pub state: SearchState,
    /// Input premises, kept for proof verification
    premises: Vec<Formula>,
    /// Start time of the proof search
    start_time: Option<Instant>,
}

impl Prover {
    /// Create a prover from an input list whose last element is the conclusion.
    pub fn new(wffs: Vec<Wff>, config: ProverConfig) -> Result<Self> {
        let (premises, conclusion) = split_problem(wffs)?;
        Ok(Prover::from_formulas(premises, conclusion, config))
    }

    pub fn from_formulas(premises: Vec<Formula>, conclusion: Formula, config: ProverConfig) -> Self {
        let state = SearchState::new(premises.clone(), conclusion);
        Prover {
            config,
            state,
            premises,
            start_time: None,
        }
    }

    /// Run the search to completion.
    pub fn prove(&mut self) -> ProofResult {
        let start = Instant::now();
        self.start_time = Some(start);
        let result = loop {
            if let Some(result) = self.step() {
                break result;
            }
        };
        self.state.profile.total_time = start.elapsed();
        debug!(
            "search finished after {} passes with {} members: {}",
            self.state.profile.iterations,
            self.state.store.len(),
            outcome_name(&result)
        );
        result
    }

    /// Run one pass. Returns the result once the search is over.
    pub fn step(&mut self) -> Option<ProofResult> {
        let start = *self.start_time.get_or_insert_with(Instant::now);
        self.state.set_deadline(start.checked_add(self.config.timeout));

        if let Some(result) = self.close() {
            return Some(result);
        }
        if self.config.max_iterations > 0 && self.state.profile.iterations >= self.config.max_iterations {
            return Some(ProofResult::ResourceLimit(Limit::Iterations));
        }
        if let (Some(limit), Some(used)) = (self.config.memory_limit_mb, process_memory_mb()) {
            if used >= limit {
                return Some(ProofResult::ResourceLimit(Limit::Memory));
            }
        }

        let before = self.state.progress();
        self.state.profile.iterations += 1;

        let mut position = 0;
        while let Some(id) = self.state.store.member_at(position) {
            if let Some(result) = self.check_limits(start) {
                return Some(self.close().unwrap_or(result));
            }
            let goal = self.state.formula(id).clone();
            satisfy(&mut self.state, &goal, id);
            position += 1;
        }
        if let Some(result) = self.check_limits(start) {
            return Some(self.close().unwrap_or(result));
        }
        let conclusion = self.state.conclusion;
        let goal = self.state.conclusion_formula().clone();
        satisfy(&mut self.state, &goal, conclusion);
        // A pass cut short by the deadline is not a stall.
        if let Some(result) = self.check_limits(start) {
            return Some(self.close().unwrap_or(result));
        }

        self.state.profile.total_time = start.elapsed();
        debug!(
            "pass {}: {} members, {} constants",
            self.state.profile.iterations,
            self.state.store.len(),
            self.state.constants.known().len()
        );

        if self.state.progress() == before {
            return Some(self.close().unwrap_or(ProofResult::Exhausted));
        }
        None
    }

    fn check_limits(&self, start: Instant) -> Option<ProofResult> {
        if start.elapsed() >= self.config.timeout {
            return Some(ProofResult::Timeout);
        }
        if self.config.max_nodes > 0 && self.state.store.len() > self.config.max_nodes {
            return Some(ProofResult::ResourceLimit(Limit::Nodes));
        }
        None
    }

    /// The search is over once the conclusion is a member or the members
    /// contradict each other.
    fn close(&mut self) -> Option<ProofResult> {
        if find_conclusion(&mut self.state) || find_contradiction(&mut self.state) {
            Some(ProofResult::Proof(self.extract_proof()))
        } else {
            None
        }
    }

    /// Extract the proof of the conclusion from the store.
    ///
    /// Only meaningful once the conclusion has been justified.
    pub fn extract_proof(&mut self) -> Proof {
        let conclusion = self.state.conclusion;
        Proof::extract(&mut self.state.store, conclusion)
    }

    /// Verify every line of a proof against this problem's premises.
    pub fn verify_proof(&self, proof: &Proof) -> std::result::Result<(), VerificationError> {
        verify_proof(proof, &self.premises, self.state.conclusion_formula())
    }

    pub fn premises(&self) -> &[Formula] {
        &self.premises
    }

    pub fn conclusion(&self) -> &Formula {
        self.state.conclusion_formula()
    }

    pub fn profile(&self) -> &SearchProfile {
        &self.state.profile
    }
}

fn outcome_name(result: &ProofResult) -> &'static str {
    match result {
        ProofResult::Proof(_) => "proof",
        ProofResult::Exhausted => "exhausted",
        ProofResult::ResourceLimit(_) => "resource limit",
        ProofResult::Timeout => "timeout",
    }
}

/// Run a search over an input list whose last element is the conclusion.
pub fn prove(wffs: Vec<Wff>, config: ProverConfig) -> Result<(ProofResult, Prover)> {
    let mut prover = Prover::new(wffs, config)?;
    let result = prover.prove();
    Ok((result, prover))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::Rule;
    use std::time::Duration;

    fn atom(name: &str) -> Formula {
        Formula::atom(name)
    }

    #[test]
    fn test_prover_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Prover>();
    }

    #[test]
    fn test_premise_is_conclusion() {
        let mut prover = Prover::from_formulas(vec![atom("P")], atom("P"), ProverConfig::default());
        let result = prover.prove();
        let proof = result.proof().unwrap();
        assert_eq!(proof.len(), 1);
        assert_eq!(proof.steps[0].derivation.rule, Rule::Premise);
        assert_eq!(prover.profile().iterations, 0);
    }

    #[test]
    fn test_stall_is_exhausted() {
        let mut prover = Prover::from_formulas(vec![atom("P")], atom("Q"), ProverConfig::default());
        assert!(matches!(prover.prove(), ProofResult::Exhausted));
        assert_eq!(prover.profile().iterations, 1);
    }

    #[test]
    fn test_step_until_done() {
        let premises = vec![atom("P"), Formula::implies(atom("P"), atom("Q"))];
        let mut prover = Prover::from_formulas(premises, atom("Q"), ProverConfig::default());
        assert!(prover.step().is_none());
        assert!(prover.step().unwrap().is_proof());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_memory_limit_is_inclusive() {
        let config = ProverConfig {
            memory_limit_mb: Some(0),
            ..ProverConfig::default()
        };
        let mut prover = Prover::from_formulas(vec![atom("P")], atom("Q"), config);
        assert!(matches!(prover.prove(), ProofResult::ResourceLimit(Limit::Memory)));
        assert_eq!(prover.profile().iterations, 0);
    }

    #[test]
    fn test_zero_timeout() {
        let config = ProverConfig {
            timeout: Duration::ZERO,
            ..ProverConfig::default()
        };
        let mut prover = Prover::from_formulas(vec![atom("P")], atom("Q"), config);
        assert!(matches!(prover.prove(), ProofResult::Timeout));
    }
}
