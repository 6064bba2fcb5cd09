//! Solution decoding.
//!
//! Maps solved assignment variables back to a roster grouped by
//! `(timeslot, shift, site)`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::milp::{MilpSolution, SolverStatus};
use crate::models::{Roster, RosterEntry};

use super::{ModelContext, VariableRegistry};

/// Integrality threshold: solvers return near-binary floats.
pub const ASSIGNMENT_THRESHOLD: f64 = 0.5;

/// Outcome of a dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// A roster satisfying every rule.
    Solved(Roster),
    /// Infeasible, timed out or unknown. No partial roster is kept.
    NoSolution(NoSolutionReason),
}

/// Why no roster was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoSolutionReason {
    /// The solver proved the model infeasible.
    Infeasible,
    /// Timeout, cancellation or an unknown solver status.
    Unknown,
    /// A feasible but unproven result was rejected by configuration.
    NotProvenOptimal,
}

impl DispatchOutcome {
    /// The roster, if solved.
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            DispatchOutcome::Solved(roster) => Some(roster),
            DispatchOutcome::NoSolution(_) => None,
        }
    }

    pub fn into_roster(self) -> Option<Roster> {
        match self {
            DispatchOutcome::Solved(roster) => Some(roster),
            DispatchOutcome::NoSolution(_) => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, DispatchOutcome::Solved(_))
    }
}

/// Decodes a solver result.
///
/// Accepts `Optimal`, and `Feasible` only when `accept_feasible` is set.
/// Any other status, or a value vector that does not match the model,
/// yields [`DispatchOutcome::NoSolution`].
pub fn decode(
    ctx: &ModelContext<'_>,
    registry: &VariableRegistry,
    solution: &MilpSolution,
    accept_feasible: bool,
) -> DispatchOutcome {
    match solution.status {
        SolverStatus::Optimal => {}
        SolverStatus::Feasible if accept_feasible => {}
        SolverStatus::Feasible => {
            return DispatchOutcome::NoSolution(NoSolutionReason::NotProvenOptimal)
        }
        SolverStatus::Infeasible => {
            return DispatchOutcome::NoSolution(NoSolutionReason::Infeasible)
        }
        SolverStatus::Unknown => return DispatchOutcome::NoSolution(NoSolutionReason::Unknown),
    }
    if solution.values.len() != registry.model().variable_count() {
        return DispatchOutcome::NoSolution(NoSolutionReason::Unknown);
    }

    let mut by_shift: BTreeMap<usize, RosterEntry> = BTreeMap::new();
    for (key, var) in registry.assignments() {
        if solution.values[var.index()] <= ASSIGNMENT_THRESHOLD {
            continue;
        }
        let shift = &ctx.problem.shifts[key.shift];
        let resource = &ctx.problem.resources[key.resource];
        by_shift
            .entry(key.shift)
            .or_insert_with(|| RosterEntry::new(shift.timeslot, shift.id.clone(), shift.site.clone()))
            .assignments
            .push(crate::models::Assignment::new(
                resource.id.clone(),
                ctx.skills[key.skill],
            ));
    }

    let mut roster = Roster {
        objective_value: solution
            .objective_value
            .unwrap_or_else(|| registry.model().objective_value(&solution.values)),
        proven_optimal: solution.status == SolverStatus::Optimal,
        entries: Vec::with_capacity(by_shift.len()),
    };
    for entry in by_shift.into_values() {
        roster.add_entry(entry);
    }
    DispatchOutcome::Solved(roster)
}
