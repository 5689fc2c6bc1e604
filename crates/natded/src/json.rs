//! JSON serialization types for problems and proofs

use crate::config::ProverConfig;
use crate::inference::{Proof, ProofStep};
use crate::logic::Wff;
use crate::prover::profile::SearchProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A problem file: premises, conclusion and optional limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemJson {
    #[serde(default)]
    pub premises: Vec<Wff>,
    pub conclusion: Wff,
    #[serde(default)]
    pub config: ConfigJson,
}

impl ProblemJson {
    /// Premises followed by the conclusion
    pub fn into_wffs(self) -> Vec<Wff> {
        let mut wffs = self.premises;
        wffs.push(self.conclusion);
        wffs
    }
}

/// Limits given in a problem file; unset fields keep their defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigJson {
    pub max_iterations: Option<usize>,
    pub max_nodes: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub memory_limit_mb: Option<usize>,
}

impl ConfigJson {
    pub fn apply(&self, mut config: ProverConfig) -> ProverConfig {
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(max_nodes) = self.max_nodes {
            config.max_nodes = max_nodes;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout = Duration::from_millis(timeout_ms);
        }
        if self.memory_limit_mb.is_some() {
            config.memory_limit_mb = self.memory_limit_mb;
        }
        config
    }
}

/// JSON representation of a proof line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofStepJson {
    pub line: usize,
    pub formula: String,
    pub rule: String,
    pub rule_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub premises: Vec<usize>,
}

impl From<&ProofStep> for ProofStepJson {
    fn from(step: &ProofStep) -> Self {
        ProofStepJson {
            line: step.line,
            formula: step.formula.to_string(),
            rule: step.derivation.rule.code().to_string(),
            rule_name: step.derivation.rule.name().to_string(),
            premises: step.justification.clone(),
        }
    }
}

/// JSON representation of a proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofJson {
    pub steps: Vec<ProofStepJson>,
}

impl From<&Proof> for ProofJson {
    fn from(proof: &Proof) -> Self {
        ProofJson {
            steps: proof.steps.iter().map(ProofStepJson::from).collect(),
        }
    }
}

/// JSON representation of a search result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum ProofResultJson {
    Proof {
        proof: ProofJson,
        time_seconds: f64,
    },
    Exhausted {
        nodes: usize,
        iterations: usize,
        time_seconds: f64,
    },
    ResourceLimit {
        reason: String,
        nodes: usize,
        iterations: usize,
        time_seconds: f64,
    },
    Timeout {
        nodes: usize,
        iterations: usize,
        time_seconds: f64,
    },
}

/// Everything the `prove_json` binary exports for one run
#[derive(Debug, Clone, Serialize)]
pub struct ProofAttemptJson {
    pub problem_file: String,
    pub result: ProofResultJson,
    pub statistics: SearchProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_parsing() {
        let json = r#"{
            "premises": [
                {"type": "Atom", "args": "P"},
                {"root": {"type": "Implies", "args": [{"type": "Atom", "args": "P"}, {"type": "Atom", "args": "Q"}]}}
            ],
            "conclusion": {"type": "Atom", "args": "Q"},
            "config": {"timeout_ms": 250}
        }"#;
        let problem: ProblemJson = serde_json::from_str(json).unwrap();
        let config = problem.config.apply(ProverConfig::default());
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.max_iterations, 100);
        assert_eq!(problem.into_wffs().len(), 3);
    }

    #[test]
    fn test_result_is_tagged() {
        let result = ProofResultJson::Exhausted {
            nodes: 3,
            iterations: 2,
            time_seconds: 0.0,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["result"], "Exhausted");
        assert_eq!(json["nodes"], 3);
    }
}
