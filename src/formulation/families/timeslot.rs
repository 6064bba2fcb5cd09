//! Per-timeslot occupancy rules.

use crate::milp::Sense;
use crate::models::Timeslot;

use super::{ConstraintFamily, ModelContext, VariableRegistry};
use crate::formulation::registry::unit_terms;

/// For every resource `r` and occupied timeslot `t`:
/// `Σ_{s at t, b} x[r, s, b] ≤ 1`.
///
/// Also forbids double-booking two shifts at different sites that share
/// a timeslot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleAssignment;

impl ConstraintFamily for SingleAssignment {
    fn name(&self) -> &'static str {
        "single_assignment"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        let slots: Vec<Timeslot> = ctx.occupied_slots().collect();
        for (r, resource) in ctx.problem.resources.iter().enumerate() {
            for &slot in &slots {
                let vars = registry.resource_vars_on(r, ctx.shifts_at(slot));
                if vars.is_empty() {
                    continue;
                }
                registry.add_constraint(
                    format!("single_{}_{}", resource.id, slot),
                    unit_terms(&vars),
                    Sense::Le,
                    1.0,
                );
            }
        }
    }
}

/// For every resource `r` and adjacent pair `(t, t+1)` in the horizon:
/// `Σ_{s at t} x[r, s, ·] + Σ_{s at t+1} x[r, s, ·] ≤ 1`.
///
/// One joint row per pair instead of one row per shift-pair combination.
/// Pairs where either side has no variables for `r` are skipped; the
/// other side is already bounded by [`SingleAssignment`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RestPeriod;

impl ConstraintFamily for RestPeriod {
    fn name(&self) -> &'static str {
        "rest_period"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        for (r, resource) in ctx.problem.resources.iter().enumerate() {
            for t in 1..ctx.horizon() {
                let slot = Timeslot(t);
                let current = registry.resource_vars_on(r, ctx.shifts_at(slot));
                let next = registry.resource_vars_on(r, ctx.shifts_at(slot.next()));
                if current.is_empty() || next.is_empty() {
                    continue;
                }
                let mut terms = unit_terms(&current);
                terms.extend(unit_terms(&next));
                registry.add_constraint(
                    format!("rest_{}_{}_{}", resource.id, t, t + 1),
                    terms,
                    Sense::Le,
                    1.0,
                );
            }
        }
    }
}
