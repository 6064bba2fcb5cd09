//! Skill eligibility.

use std::collections::BTreeMap;

use crate::milp::{Sense, VarId};

use super::{ConstraintFamily, ModelContext, VariableRegistry};
use crate::formulation::registry::unit_terms;

/// For every resource with ineligible assignment variables: one row
/// `Σ x[r, s, b] ≤ 0` over triples where `r` lacks skill `b` or shift `s`
/// does not demand it.
///
/// Keeps the feasible region independent of the
/// [`SkillScope`](crate::config::SkillScope): wider scopes only add
/// variables pinned to zero. Under `Qualified` it emits nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eligibility;

impl ConstraintFamily for Eligibility {
    fn name(&self) -> &'static str {
        "eligibility"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        let mut ineligible: BTreeMap<usize, Vec<VarId>> = BTreeMap::new();
        for (key, var) in registry.assignments() {
            let skill = ctx.skills[key.skill];
            let eligible = ctx.problem.resources[key.resource].has_skill(skill)
                && ctx.problem.shifts[key.shift].demands_skill(skill);
            if !eligible {
                ineligible.entry(key.resource).or_default().push(var);
            }
        }

        for (r, vars) in ineligible {
            registry.add_constraint(
                format!("ineligible_{}", ctx.problem.resources[r].id),
                unit_terms(&vars),
                Sense::Le,
                0.0,
            );
        }
    }
}
