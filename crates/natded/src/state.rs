//! Search state for natural-deduction proof synthesis.
//!
//! [`SearchState`] is the lean data container the rules operate on: the
//! premise store, the conclusion node, the constant pools and the progress
//! counter used for stall detection. The fixed-point loop that drives it
//! lives in [`crate::prover::Prover`].

use crate::inference::{Derivation, DerivationNode, NodeId, Proof, Rule, RuleFlags};
use crate::json::ProofResultJson;
use crate::logic::{ConstantPool, Formula};
use crate::prover::profile::SearchProfile;
use crate::store::{Insertion, PremiseStore, Rejection};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, trace};

// =============================================================================
// ProofResult
// =============================================================================

/// Which resource ceiling stopped the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Iterations,
    Nodes,
    Memory,
}

impl Limit {
    pub fn reason(self) -> &'static str {
        match self {
            Limit::Iterations => "Iteration limit exceeded",
            Limit::Nodes => "Node limit exceeded",
            Limit::Memory => "Memory limit exceeded",
        }
    }
}

/// Result of a search
#[derive(Debug, Clone)]
pub enum ProofResult {
    /// Conclusion derived, or the premises closed by a contradiction
    Proof(Proof),
    /// A full pass derived nothing new
    Exhausted,
    /// Resource limit reached
    ResourceLimit(Limit),
    /// Timeout reached
    Timeout,
}

impl ProofResult {
    pub fn is_proof(&self) -> bool {
        matches!(self, ProofResult::Proof(_))
    }

    pub fn proof(&self) -> Option<&Proof> {
        match self {
            ProofResult::Proof(proof) => Some(proof),
            _ => None,
        }
    }

    /// Convert to JSON representation
    pub fn to_json(&self, profile: &SearchProfile) -> ProofResultJson {
        let time_seconds = profile.total_time.as_secs_f64();
        match self {
            ProofResult::Proof(proof) => ProofResultJson::Proof {
                proof: proof.into(),
                time_seconds,
            },
            ProofResult::Exhausted => ProofResultJson::Exhausted {
                nodes: profile.nodes_added,
                iterations: profile.iterations,
                time_seconds,
            },
            ProofResult::ResourceLimit(limit) => ProofResultJson::ResourceLimit {
                reason: limit.reason().to_string(),
                nodes: profile.nodes_added,
                iterations: profile.iterations,
                time_seconds,
            },
            ProofResult::Timeout => ProofResultJson::Timeout {
                nodes: profile.nodes_added,
                iterations: profile.iterations,
                time_seconds,
            },
        }
    }
}

// =============================================================================
// SearchState
// =============================================================================

/// Everything one search owns.
pub struct SearchState {
    pub store: PremiseStore,
    /// Arena node of the conclusion; never a store member
    pub conclusion: NodeId,
    pub constants: ConstantPool,
    /// Generalization constant chosen for each universal goal
    generalizers: HashMap<Formula, String>,
    pub profile: SearchProfile,
    /// Bumped on every insertion, flag change and universal re-arm
    progress: u64,
    /// Point past which rules stop enumerating candidates
    deadline: Option<Instant>,
}

impl SearchState {
    pub fn new(premises: Vec<Formula>, conclusion: Formula) -> Self {
        let constants = ConstantPool::new(&premises, &conclusion);
        let mut state = SearchState {
            store: PremiseStore::new(),
            conclusion: 0,
            constants,
            generalizers: HashMap::new(),
            profile: SearchProfile::default(),
            progress: 0,
            deadline: None,
        };
        for premise in premises {
            state.insert(DerivationNode::premise(premise));
        }
        state.conclusion = state
            .store
            .insert_detached(DerivationNode::new(conclusion, Rule::Conclusion, vec![]));
        state
    }

    pub fn formula(&self, id: NodeId) -> &Formula {
        &self.store.node(id).formula
    }

    pub fn conclusion_formula(&self) -> &Formula {
        self.formula(self.conclusion)
    }

    pub fn is_conclusion(&self, id: NodeId) -> bool {
        id == self.conclusion
    }

    /// A formula the search recognizes: a member, or the conclusion itself.
    pub fn is_goal(&self, formula: &Formula) -> bool {
        self.store.contains(formula) || formula == self.conclusion_formula()
    }

    pub fn lookup(&self, formula: &Formula) -> Option<NodeId> {
        self.store.lookup(formula)
    }

    pub fn has_flag(&self, id: NodeId, flag: RuleFlags) -> bool {
        self.store.node(id).has_flag(flag)
    }

    pub fn set_flag(&mut self, id: NodeId, flag: RuleFlags) {
        let node = self.store.node_mut(id);
        if !node.has_flag(flag) {
            node.flags.insert(flag);
            self.progress += 1;
        }
    }

    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    /// Has the search run out of time?
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Monotone counter; equal readings mean nothing changed in between.
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Record a derived formula. Returns the member that now establishes it.
    pub fn derive(&mut self, formula: Formula, rule: Rule, parents: Vec<NodeId>) -> Option<NodeId> {
        let insertion = self.insert(DerivationNode::new(formula, rule, parents));
        self.profile.record_rule(rule, insertion.is_added());
        if let Insertion::Added(id) = insertion {
            trace!("{} {} {:?}", rule, self.formula(id), self.store.node(id).parents());
        }
        insertion.node()
    }

    fn insert(&mut self, node: DerivationNode) -> Insertion {
        let insertion = self.store.insert(node);
        match insertion {
            Insertion::Added(_) => {
                self.progress += 1;
                self.profile.nodes_added += 1;
            }
            Insertion::Duplicate(_) => self.profile.duplicates += 1,
            Insertion::Rejected(Rejection::Redundant) => self.profile.redundant_rejected += 1,
            Insertion::Rejected(Rejection::Open) => self.profile.open_rejected += 1,
        }
        insertion
    }

    /// Copy a derivation onto the conclusion node.
    pub fn annotate_conclusion(&mut self, derivation: Derivation) {
        let conclusion = self.conclusion;
        self.store.node_mut(conclusion).derivation = derivation;
    }

    /// Reserve a fresh constant.
    ///
    /// Universal members are re-armed so the next pass instantiates them
    /// with the new constant too. Only re-arming counts as progress.
    pub fn allocate_constant(&mut self) -> String {
        let constant = self.constants.allocate();
        self.profile.constants_allocated += 1;
        let rearmed: Vec<NodeId> = self
            .store
            .member_ids()
            .filter(|&id| self.formula(id).is_universal() && self.has_flag(id, RuleFlags::UNIVERSAL))
            .collect();
        if !rearmed.is_empty() {
            self.progress += 1;
        }
        for id in rearmed {
            self.store.node_mut(id).flags.remove(RuleFlags::UNIVERSAL);
        }
        debug!("allocated constant {}", constant);
        constant
    }

    /// The arbitrary constant standing in for the bound variable of `goal`.
    pub fn generalization_constant(&mut self, goal: &Formula) -> String {
        if let Some(constant) = self.generalizers.get(goal) {
            return constant.clone();
        }
        let constant = self.allocate_constant();
        self.generalizers.insert(goal.clone(), constant.clone());
        constant
    }

    /// Does some existential-elimination ancestor of `id` mention `constant`?
    pub fn depends_on_witness(&self, id: NodeId, constant: &str) -> bool {
        let mut visited = HashSet::new();
        let mut worklist = vec![id];
        while let Some(current) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            let node = self.store.node(current);
            if node.rule() == Rule::ExistentialElimination && node.formula.constants().contains(constant) {
                return true;
            }
            worklist.extend(node.parents().iter().copied());
        }
        false
    }
}
