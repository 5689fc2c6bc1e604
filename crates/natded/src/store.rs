//! Premise store: the append-only arena of derivation nodes.
//!
//! The store owns every [`DerivationNode`] created during a search. Nodes are
//! addressed by stable [`NodeId`]s, so a node can be cited as a parent by any
//! number of later nodes. Membership (the set of formulas established so far)
//! is tracked separately in an insertion-ordered index keyed by formula; the
//! conclusion node lives in the arena without being a member.

use crate::inference::{DerivationNode, NodeId};
use crate::logic::Formula;
use indexmap::IndexMap;

/// Why a candidate node was not added to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Binary connective with identical operands (`A ∧ A`, `A → A`, ...)
    Redundant,
    /// Formula with free variables
    Open,
}

/// Outcome of offering a node to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added(NodeId),
    /// A structurally equal formula is already a member
    Duplicate(NodeId),
    Rejected(Rejection),
}

impl Insertion {
    /// The member establishing the offered formula, if any
    pub fn node(self) -> Option<NodeId> {
        match self {
            Insertion::Added(id) | Insertion::Duplicate(id) => Some(id),
            Insertion::Rejected(_) => None,
        }
    }

    pub fn is_added(self) -> bool {
        matches!(self, Insertion::Added(_))
    }
}

/// Insertion-ordered, duplicate-free collection of derivation nodes
#[derive(Debug, Clone, Default)]
pub struct PremiseStore {
    /// Storage for all nodes, indexed by node ID
    nodes: Vec<DerivationNode>,
    /// Members in insertion order, keyed by formula
    members: IndexMap<Formula, NodeId>,
}

impl PremiseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a node for membership.
    pub fn insert(&mut self, node: DerivationNode) -> Insertion {
        if let Some(&existing) = self.members.get(&node.formula) {
            return Insertion::Duplicate(existing);
        }
        if node.formula.is_redundant() {
            return Insertion::Rejected(Rejection::Redundant);
        }
        if !node.formula.is_closed() {
            return Insertion::Rejected(Rejection::Open);
        }
        let id = self.nodes.len();
        self.members.insert(node.formula.clone(), id);
        self.nodes.push(node);
        Insertion::Added(id)
    }

    /// Allocate a node in the arena without making it a member.
    pub fn insert_detached(&mut self, node: DerivationNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &DerivationNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut DerivationNode {
        &mut self.nodes[id]
    }

    /// Find the member whose formula is structurally equal to `formula`
    pub fn lookup(&self, formula: &Formula) -> Option<NodeId> {
        self.members.get(formula).copied()
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.members.contains_key(formula)
    }

    /// Insertion position of the member holding `formula`
    pub fn position(&self, formula: &Formula) -> Option<usize> {
        self.members.get_index_of(formula)
    }

    pub fn is_member(&self, id: NodeId) -> bool {
        self.members.get(&self.nodes[id].formula) == Some(&id)
    }

    /// The `index`-th member in insertion order
    pub fn member_at(&self, index: usize) -> Option<NodeId> {
        self.members.get_index(index).map(|(_, &id)| id)
    }

    /// Member IDs in insertion order
    pub fn member_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.values().copied()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Every node in the arena, members or not
    pub fn nodes(&self) -> &[DerivationNode] {
        &self.nodes
    }
}
