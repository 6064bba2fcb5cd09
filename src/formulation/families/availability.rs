//! Declared unavailability.

use crate::milp::Sense;

use super::{ConstraintFamily, ModelContext, VariableRegistry};
use crate::formulation::registry::unit_terms;

/// For every resource with unavailable timeslots: one row forcing
/// `Σ x[r, s, ·] ≤ 0` over shifts in those timeslots.
#[derive(Debug, Clone, Copy, Default)]
pub struct Availability;

impl ConstraintFamily for Availability {
    fn name(&self) -> &'static str {
        "availability"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        for (r, resource) in ctx.problem.resources.iter().enumerate() {
            if !resource.has_unavailability() {
                continue;
            }
            let vars: Vec<_> = resource
                .unavailable
                .iter()
                .flat_map(|&slot| registry.resource_vars_on(r, ctx.shifts_at(slot)))
                .collect();
            if vars.is_empty() {
                continue;
            }
            registry.add_constraint(
                format!("unavailable_{}", resource.id),
                unit_terms(&vars),
                Sense::Le,
                0.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkillScope;
    use crate::formulation::families::test_support::{problem_context, registry_for};
    use crate::models::{DispatchProblem, Resource, Shift};

    #[test]
    fn test_single_row_per_resource() {
        let p = DispatchProblem::new(
            vec![
                Resource::internal("Petra")
                    .with_skill("safety")
                    .with_unavailable(1)
                    .with_unavailable(3)
                    .with_unavailable(9),
                Resource::internal("Alex").with_skill("safety"),
            ],
            vec![
                Shift::new("S1", 1, "A").with_demand("safety", 1),
                Shift::new("S2", 2, "A").with_demand("safety", 1),
                Shift::new("S3", 3, "B").with_demand("safety", 1),
            ],
            9,
        );
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        Availability.build(&ctx, &mut reg);

        let rows = &reg.model().constraints;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "unavailable_Petra");
        assert_eq!(rows[0].terms.len(), 2); // S1, S3
        assert!((rows[0].rhs - 0.0).abs() < 1e-10);

        let s2 = reg.resource_shift_vars(0, 1)[0];
        assert!(rows[0].terms.iter().all(|&(v, _)| v != s2));
    }

    #[test]
    fn test_unavailability_without_shifts() {
        let p = DispatchProblem::new(
            vec![Resource::internal("Petra").with_skill("x").with_unavailable(4)],
            vec![Shift::new("S1", 1, "A").with_demand("x", 1)],
            4,
        );
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        Availability.build(&ctx, &mut reg);
        assert_eq!(reg.model().constraint_count(), 0);
    }
}
