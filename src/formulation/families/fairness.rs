//! Workload fairness.
//!
//! ```text
//! total[r] = Σ x[r, ·, ·]
//! total[r] ≥ min_shifts,   total[r] ≤ max_shifts    for every r
//! objective += weight · (max_shifts - min_shifts)
//! ```
//!
//! `min_shifts` and `max_shifts` are bounded, not pinned; the objective
//! pulls them onto the true minimum and maximum of the totals.

use crate::milp::Sense;

use super::{ConstraintFamily, ModelContext, VariableRegistry};

#[derive(Debug, Clone, Copy)]
pub struct Fairness {
    weight: f64,
}

impl Fairness {
    /// Creates the family with a penalty per unit of spread.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for Fairness {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl ConstraintFamily for Fairness {
    fn name(&self) -> &'static str {
        "fairness"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        // Without resources min_shifts would be unbounded above.
        if ctx.problem.resources.is_empty() {
            return;
        }

        let (min, max) = registry.declare_min_max(self.weight);
        for (r, resource) in ctx.problem.resources.iter().enumerate() {
            let vars = registry.resource_vars(r);
            let total = registry.declare_total(r, format!("total_{}", resource.id));

            let mut tie: Vec<_> = vec![(total, 1.0)];
            tie.extend(vars.iter().map(|&v| (v, -1.0)));
            registry.add_constraint(format!("total_{}", resource.id), tie, Sense::Eq, 0.0);
            registry.add_constraint(
                format!("min_shifts_{}", resource.id),
                vec![(total, 1.0), (min, -1.0)],
                Sense::Ge,
                0.0,
            );
            registry.add_constraint(
                format!("max_shifts_{}", resource.id),
                vec![(total, 1.0), (max, -1.0)],
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

    fn sample_problem() -> DispatchProblem {
        DispatchProblem::new(
            vec![
                Resource::internal("Max").with_skill("x"),
                Resource::internal("Lisa").with_skill("x"),
            ],
            vec![
                Shift::new("S1", 1, "A").with_demand("x", 1),
                Shift::new("S3", 3, "A").with_demand("x", 1),
            ],
            3,
        )
    }

    #[test]
    fn test_rows_and_variables() {
        let p = sample_problem();
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        let before = reg.model().variable_count();
        Fairness::new(5.0).build(&ctx, &mut reg);

        // min, max, 2 totals
        assert_eq!(reg.model().variable_count() - before, 4);
        // 3 rows per resource
        assert_eq!(reg.model().constraint_count(), 6);
        let tie = reg
            .model()
            .constraints
            .iter()
            .find(|c| c.name == "total_Max")
            .unwrap();
        assert_eq!(tie.sense, Sense::Eq);
        assert_eq!(tie.terms.len(), 3); // total + 2 assignment vars
    }

    #[test]
    fn test_spread_objective() {
        let p = sample_problem();
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        Fairness::new(5.0).build(&ctx, &mut reg);
        let model = reg.model();

        let (min, max) = (reg.min_shifts().unwrap(), reg.max_shifts().unwrap());
        let (t_max, t_lisa) = (reg.total(0).unwrap(), reg.total(1).unwrap());

        // Max takes both shifts, Lisa none: spread 2.
        let mut values = vec![0.0; model.variable_count()];
        for v in reg.resource_vars(0) {
            values[v.index()] = 1.0;
        }
        values[t_max.index()] = 2.0;
        values[t_lisa.index()] = 0.0;
        values[min.index()] = 0.0;
        values[max.index()] = 2.0;
        assert!(model.is_satisfied_by(&values, 1e-6));
        let assignment_cost = 2.0;
        assert!((model.objective_value(&values) - (assignment_cost + 10.0)).abs() < 1e-9);

        // Pinning min above a total is infeasible.
        values[min.index()] = 1.0;
        assert!(!model.is_satisfied_by(&values, 1e-6));

        // The total must equal the literal sum.
        values[min.index()] = 0.0;
        values[t_max.index()] = 1.0;
        assert!(!model.is_satisfied_by(&values, 1e-6));
    }

    #[test]
    fn test_no_resources_no_rows() {
        let p = DispatchProblem::new(vec![], vec![Shift::new("S", 1, "A")], 1);
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        Fairness::default().build(&ctx, &mut reg);
        assert_eq!(reg.model().variable_count(), 0);
        assert!(reg.min_shifts().is_none());
    }
}
