//! Structured profiling for the search loop
//!
//! Counters are cheap, so they are always collected. `Duration` fields are
//! serialized as `f64` seconds.

use crate::inference::Rule;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

/// Statistics for one inference rule.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleStats {
    /// Times the rule produced a formula
    pub fired: usize,
    /// Produced formulas that became new members
    pub added: usize,
}

/// Profiling data collected during one search.
#[derive(Debug, Clone, Default)]
pub struct SearchProfile {
    pub total_time: Duration,
    pub iterations: usize,
    pub nodes_added: usize,
    pub duplicates: usize,
    pub redundant_rejected: usize,
    pub open_rejected: usize,
    pub constants_allocated: usize,
    /// Keyed by rule code so the serialized map reads like a proof column
    pub rules: BTreeMap<&'static str, RuleStats>,
}

impl SearchProfile {
    pub fn record_rule(&mut self, rule: Rule, added: bool) {
        let stats = self.rules.entry(rule.code()).or_default();
        stats.fired += 1;
        if added {
            stats.added += 1;
        }
    }

    pub fn rule(&self, rule: Rule) -> Option<&RuleStats> {
        self.rules.get(rule.code())
    }
}

impl Serialize for SearchProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SearchProfile", 8)?;
        s.serialize_field("total_time", &self.total_time.as_secs_f64())?;
        s.serialize_field("iterations", &self.iterations)?;
        s.serialize_field("nodes_added", &self.nodes_added)?;
        s.serialize_field("duplicates", &self.duplicates)?;
        s.serialize_field("redundant_rejected", &self.redundant_rejected)?;
        s.serialize_field("open_rejected", &self.open_rejected)?;
        s.serialize_field("constants_allocated", &self.constants_allocated)?;
        s.serialize_field("rules", &self.rules)?;
        s.end()
    }
}
