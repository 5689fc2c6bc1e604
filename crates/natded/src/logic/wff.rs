//! Input formulas as handed over by a caller.
//!
//! Editors often hand over a formula wrapped in an empty root node. The
//! wrapper carries no meaning and is stripped before the search starts.

use super::formula::Formula;
use crate::error::{ProverError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wff {
    /// A bare formula
    Bare(Formula),
    /// Root wrapper around at most one formula
    Root { root: Option<Formula> },
}

impl Wff {
    pub fn root(formula: Formula) -> Self {
        Wff::Root { root: Some(formula) }
    }

    /// Strip the root wrapper.
    pub fn into_formula(self) -> Result<Formula> {
        match self {
            Wff::Bare(formula) | Wff::Root { root: Some(formula) } => Ok(formula),
            Wff::Root { root: None } => Err(ProverError::InvalidInput("root wrapper without a formula".into())),
        }
    }
}

impl From<Formula> for Wff {
    fn from(formula: Formula) -> Self {
        Wff::Bare(formula)
    }
}

/// Split an input list into premises and the conclusion (its last element).
///
/// Every formula must be closed: a line with a free variable has no truth
/// value.
pub fn split_problem(wffs: Vec<Wff>) -> Result<(Vec<Formula>, Formula)> {
    let mut formulas = wffs.into_iter().map(Wff::into_formula).collect::<Result<Vec<_>>>()?;
    let conclusion = formulas
        .pop()
        .ok_or_else(|| ProverError::InvalidInput("no conclusion given".into()))?;
    for formula in formulas.iter().chain(std::iter::once(&conclusion)) {
        if let Some(var) = formula.free_variables().into_iter().next() {
            return Err(ProverError::InvalidInput(format!("{} has free variable {}", formula, var)));
        }
    }
    Ok((formulas, conclusion))
}
