//! Per-timetable breakdown of constraint violations.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::{ConstraintDefinition, ConstraintKind, Severity};

/// Violations of one constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViolationTally {
    /// Violation units (co-bookings, excess sessions, ...).
    pub count: u64,
    /// Penalty contributed: `count × weight`.
    pub penalty: u64,
}

/// Constraint report for one timetable.
///
/// Lets a human judge whether a returned schedule is usable or needs
/// another run with more generations or a larger population.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstraintReport {
    /// Tallies keyed by constraint; only violated constraints appear.
    pub violations: BTreeMap<ConstraintKind, ViolationTally>,
    /// Sum of hard-constraint penalties.
    pub hard_penalty: u64,
    /// Sum of soft-constraint penalties.
    pub soft_penalty: u64,
}

impl ConstraintReport {
    /// Adds `units` violations of `def`.
    pub(crate) fn record(&mut self, def: &ConstraintDefinition, units: u64) {
        if units == 0 {
            return;
        }
        let penalty = units * u64::from(def.weight);
        let tally = self.violations.entry(def.kind).or_default();
        tally.count += units;
        tally.penalty += penalty;
        match def.severity {
            Severity::Hard => self.hard_penalty += penalty,
            Severity::Soft => self.soft_penalty += penalty,
        }
    }

    /// Total penalty over every violation.
    pub fn total_penalty(&self) -> u64 {
        self.hard_penalty + self.soft_penalty
    }

    /// `1 / (1 + total_penalty)`, in (0, 1].
    pub fn fitness(&self) -> f64 {
        fitness_from_penalty(self.total_penalty())
    }

    /// Whether no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.hard_penalty == 0
    }

    /// Violation units recorded for `kind`.
    pub fn count(&self, kind: ConstraintKind) -> u64 {
        self.violations.get(&kind).map_or(0, |t| t.count)
    }

    /// Penalty recorded for `kind`.
    pub fn penalty(&self, kind: ConstraintKind) -> u64 {
        self.violations.get(&kind).map_or(0, |t| t.penalty)
    }
}

/// Maps a total penalty to fitness: `1 / (1 + penalty)`.
pub fn fitness_from_penalty(penalty: u64) -> f64 {
    1.0 / (1.0 + penalty as f64)
}
