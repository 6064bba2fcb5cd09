//! Rolling-window workload caps.

use crate::config::WindowRule;
use crate::milp::Sense;

use super::{ConstraintFamily, ModelContext, VariableRegistry};
use crate::formulation::registry::unit_terms;
use crate::formulation::windows::window_spans;

/// For every resource `r` and every valid window `[start, start + 2·width)`:
/// `Σ x[r, s, ·] ≤ cap` over shifts `s` in the window.
///
/// The day variant counts every shift in the window; the night variant
/// counts only night (even) timeslots. Window starts come from
/// [`window_starts`](crate::formulation::window_starts).
#[derive(Debug, Clone, Copy)]
pub struct WindowCap {
    rule: WindowRule,
    nights_only: bool,
}

impl WindowCap {
    /// Cap on all assignments in a day window.
    pub fn day(rule: WindowRule) -> Self {
        Self {
            rule,
            nights_only: false,
        }
    }

    /// Cap on night assignments in a night window.
    pub fn night(rule: WindowRule) -> Self {
        Self {
            rule,
            nights_only: true,
        }
    }

    pub fn rule(&self) -> WindowRule {
        self.rule
    }
}

impl ConstraintFamily for WindowCap {
    fn name(&self) -> &'static str {
        if self.nights_only {
            "night_window_cap"
        } else {
            "day_window_cap"
        }
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        let spans = window_spans(ctx.horizon(), self.rule.width);
        if spans.is_empty() {
            return;
        }
        let prefix = if self.nights_only { "night" } else { "day" };

        for span in &spans {
            let shifts: Vec<usize> = ctx
                .problem
                .shifts
                .iter()
                .enumerate()
                .filter(|(_, s)| span.contains(s.timeslot))
                .filter(|(_, s)| !self.nights_only || s.timeslot.is_night())
                .map(|(i, _)| i)
                .collect();
            if shifts.is_empty() {
                continue;
            }
            for (r, resource) in ctx.problem.resources.iter().enumerate() {
                let vars = registry.resource_vars_on(r, &shifts);
                if vars.is_empty() {
                    continue;
                }
                registry.add_constraint(
                    format!("{prefix}_cap_{}_{}", resource.id, span.start),
                    unit_terms(&vars),
                    Sense::Le,
                    f64::from(self.rule.cap),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkillScope;
    use crate::formulation::families::test_support::{problem_context, registry_for};
    use crate::models::{DispatchProblem, Resource, Shift};

    /// One shift per timeslot `1..=horizon`.
    fn daily_problem(horizon: u32) -> DispatchProblem {
        DispatchProblem::new(
            vec![
                Resource::internal("Gisela").with_skill("tff"),
                Resource::internal("Urs").with_skill("tff"),
            ],
            (1..=horizon)
                .map(|t| Shift::new(format!("ID{t}"), t, "Zurich").with_demand("tff", 1))
                .collect(),
            horizon,
        )
    }

    #[test]
    fn test_day_window_rows() {
        let p = daily_problem(22);
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        WindowCap::day(WindowRule::new(9, 7)).build(&ctx, &mut reg);

        // starts 1, 3, 5 × 2 resources
        let rows = &reg.model().constraints;
        assert_eq!(rows.len(), 6);
        let first = rows.iter().find(|c| c.name == "day_cap_Gisela_1").unwrap();
        assert_eq!(first.terms.len(), 18); // slots 1..=18
        assert!((first.rhs - 7.0).abs() < 1e-10);
        assert!(rows.iter().any(|c| c.name == "day_cap_Urs_5"));
    }

    #[test]
    fn test_night_window_counts_even_slots_only() {
        let p = daily_problem(8);
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        WindowCap::night(WindowRule::new(3, 2)).build(&ctx, &mut reg);

        // span 6: starts 1, 3
        let rows = &reg.model().constraints;
        assert_eq!(rows.len(), 4);
        let row = rows.iter().find(|c| c.name == "night_cap_Urs_3").unwrap();
        // slots 3..=8, nights 4, 6, 8
        assert_eq!(row.terms.len(), 3);
        let night_vars = reg.resource_vars_on(1, &[3, 5, 7]);
        assert!(row.terms.iter().all(|(v, _)| night_vars.contains(v)));
    }

    #[test]
    fn test_window_wider_than_horizon_emits_nothing() {
        let p = daily_problem(10);
        let ctx = problem_context(&p);
        let mut reg = registry_for(&ctx, SkillScope::Demanded);
        WindowCap::day(WindowRule::new(9, 7)).build(&ctx, &mut reg);
        WindowCap::night(WindowRule::new(30, 14)).build(&ctx, &mut reg);
        assert_eq!(reg.model().constraint_count(), 0);
    }

    #[test]
    fn test_names() {
        assert_eq!(WindowCap::day(WindowRule::new(1, 1)).name(), "day_window_cap");
        assert_eq!(WindowCap::night(WindowRule::new(1, 1)).name(), "night_window_cap");
    }
}
