//! Skill coverage.

use crate::milp::Sense;

use super::{ConstraintFamily, ModelContext, VariableRegistry};
use crate::formulation::registry::{unit_terms, AssignmentKey};

/// For every shift `s` and skill `b` with demand `d > 0`:
/// `Σ_{r has b} x[r, s, b] ≥ d`.
///
/// Resources without the skill contribute nothing to the sum. Skills with
/// zero demand produce no row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coverage;

impl ConstraintFamily for Coverage {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        for (s, shift) in ctx.problem.shifts.iter().enumerate() {
            for (skill, demand) in shift.demanded_skills() {
                let Some(b) = ctx.skill_index(skill) else {
                    continue;
                };
                let vars: Vec<_> = ctx
                    .problem
                    .resources
                    .iter()
                    .enumerate()
                    .filter(|(_, resource)| resource.has_skill(skill))
                    .filter_map(|(r, _)| {
                        registry.assignment(AssignmentKey {
                            resource: r,
                            shift: s,
                            skill: b,
                        })
                    })
                    .collect();
                registry.add_constraint(
                    format!("cover_{}_{}", shift.id, skill),
                    unit_terms(&vars),
                    Sense::Ge,
                    f64::from(demand),
                );
            }
        }
    }
}
