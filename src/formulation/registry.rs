//! Variable registry.
//!
//! Allocates and names the decision variables of a dispatch model, keyed
//! by semantic tuples, and owns the [`LinearModel`] they live in.
//!
//! | Variable | Kind | Objective | Declared by |
//! |---|---|---|---|
//! | `x[r, s, b]` | binary | cost weight of `r` | [`VariableRegistry::declare_assignments`] |
//! | `chg[site, s1, s2, r]` | binary | continuity weight | continuity family |
//! | `total[r]` | integer | 0 | fairness family |
//! | `min_shifts`, `max_shifts` | integer | ∓ fairness weight | fairness family |

use std::collections::{BTreeMap, HashMap};

use crate::config::SkillScope;
use crate::milp::{LinearModel, Sense, VarId, VarKind};

use super::ModelContext;

/// Key of an assignment variable `x[r, s, b]`.
///
/// Indices refer to `problem.resources`, `problem.shifts` and
/// [`ModelContext::skills`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssignmentKey {
    pub resource: usize,
    pub shift: usize,
    pub skill: usize,
}

/// Key of a change indicator `chg[site, s1, s2, r]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChangeKey {
    pub site: usize,
    pub from_shift: usize,
    pub to_shift: usize,
    pub resource: usize,
}

/// Declared variables of a dispatch model.
#[derive(Debug)]
pub struct VariableRegistry {
    model: LinearModel,
    assignments: BTreeMap<AssignmentKey, VarId>,
    by_resource_shift: HashMap<(usize, usize), Vec<VarId>>,
    changes: BTreeMap<ChangeKey, VarId>,
    totals: BTreeMap<usize, VarId>,
    min_shifts: Option<VarId>,
    max_shifts: Option<VarId>,
}

impl VariableRegistry {
    /// Creates a registry over an empty minimization model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            model: LinearModel::new(name),
            assignments: BTreeMap::new(),
            by_resource_shift: HashMap::new(),
            changes: BTreeMap::new(),
            totals: BTreeMap::new(),
            min_shifts: None,
            max_shifts: None,
        }
    }

    /// Declares one binary `x[r, s, b]` per triple admitted by `scope`.
    ///
    /// The objective coefficient is the resource's cost weight. Returns the
    /// number of variables declared.
    pub fn declare_assignments(
        &mut self,
        ctx: &ModelContext<'_>,
        scope: SkillScope,
        external_multiplier: f64,
    ) -> usize {
        let before = self.assignments.len();
        for (r, resource) in ctx.problem.resources.iter().enumerate() {
            let cost = resource.cost_weight(external_multiplier);
            for (s, shift) in ctx.problem.shifts.iter().enumerate() {
                for (b, &skill) in ctx.skills.iter().enumerate() {
                    let admitted = match scope {
                        SkillScope::All => true,
                        SkillScope::Demanded => shift.demands_skill(skill),
                        SkillScope::Qualified => {
                            shift.demands_skill(skill) && resource.has_skill(skill)
                        }
                    };
                    if !admitted {
                        continue;
                    }
                    let var = self.model.declare_variable(
                        format!("x_{}_{}_{}", resource.id, shift.id, skill),
                        VarKind::Binary,
                        cost,
                    );
                    let key = AssignmentKey {
                        resource: r,
                        shift: s,
                        skill: b,
                    };
                    self.assignments.insert(key, var);
                    self.by_resource_shift.entry((r, s)).or_default().push(var);
                }
            }
        }
        self.assignments.len() - before
    }

    /// Looks up `x[r, s, b]`.
    pub fn assignment(&self, key: AssignmentKey) -> Option<VarId> {
        self.assignments.get(&key).copied()
    }

    /// All assignment variables in key order.
    pub fn assignments(&self) -> impl Iterator<Item = (AssignmentKey, VarId)> + '_ {
        self.assignments.iter().map(|(&k, &v)| (k, v))
    }

    /// Variables of resource `r` on shift `s`, across all skills.
    pub fn resource_shift_vars(&self, resource: usize, shift: usize) -> &[VarId] {
        self.by_resource_shift
            .get(&(resource, shift))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Variables of resource `r` on every shift in `shifts`.
    pub fn resource_vars_on(&self, resource: usize, shifts: &[usize]) -> Vec<VarId> {
        shifts
            .iter()
            .flat_map(|&s| self.resource_shift_vars(resource, s).iter().copied())
            .collect()
    }

    /// Variables of resource `r` on every shift.
    pub fn resource_vars(&self, resource: usize) -> Vec<VarId> {
        self.assignments
            .range(
                AssignmentKey {
                    resource,
                    shift: 0,
                    skill: 0,
                }..AssignmentKey {
                    resource: resource + 1,
                    shift: 0,
                    skill: 0,
                },
            )
            .map(|(_, &v)| v)
            .collect()
    }

    /// Declares `chg[site, s1, s2, r]` with the given objective weight.
    pub fn declare_change(&mut self, key: ChangeKey, name: String, weight: f64) -> VarId {
        let var = self.model.declare_variable(name, VarKind::Binary, weight);
        self.changes.insert(key, var);
        var
    }

    /// Looks up a change indicator.
    pub fn change(&self, key: ChangeKey) -> Option<VarId> {
        self.changes.get(&key).copied()
    }

    /// All change indicators in key order.
    pub fn changes(&self) -> impl Iterator<Item = (ChangeKey, VarId)> + '_ {
        self.changes.iter().map(|(&k, &v)| (k, v))
    }

    /// Declares `total[r]` (integer, no objective weight).
    pub fn declare_total(&mut self, resource: usize, name: String) -> VarId {
        let var = self.model.declare_variable(name, VarKind::Integer, 0.0);
        self.totals.insert(resource, var);
        var
    }

    pub fn total(&self, resource: usize) -> Option<VarId> {
        self.totals.get(&resource).copied()
    }

    /// Declares the shared `min_shifts` / `max_shifts` pair.
    ///
    /// `max_shifts` gets `+weight`, `min_shifts` gets `-weight`, so the
    /// objective carries `weight × (max_shifts - min_shifts)`.
    pub fn declare_min_max(&mut self, weight: f64) -> (VarId, VarId) {
        let min = self.model.declare_variable("min_shifts", VarKind::Integer, -weight);
        let max = self.model.declare_variable("max_shifts", VarKind::Integer, weight);
        self.min_shifts = Some(min);
        self.max_shifts = Some(max);
        (min, max)
    }

    pub fn min_shifts(&self) -> Option<VarId> {
        self.min_shifts
    }

    pub fn max_shifts(&self) -> Option<VarId> {
        self.max_shifts
    }

    /// Appends a constraint to the underlying model.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        self.model.add_constraint(name, terms, sense, rhs);
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }
}

/// Unit-coefficient terms.
pub(crate) fn unit_terms(vars: &[VarId]) -> Vec<(VarId, f64)> {
    vars.iter().map(|&v| (v, 1.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DispatchProblem, Resource, Shift};

    fn sample_problem() -> DispatchProblem {
        DispatchProblem::new(
            vec![
                Resource::internal("Max").with_skills(["fitter", "safety"]),
                Resource::external("Moritz").with_skill("tff"),
            ],
            vec![
                Shift::new("S1", 1, "Zurich")
                    .with_demand("fitter", 2)
                    .with_demand("safety", 1),
                Shift::new("S2", 2, "Zurich").with_demand("tff", 1),
            ],
            2,
        )
    }

    #[test]
    fn test_scope_all() {
        let p = sample_problem();
        let ctx = ModelContext::new(&p);
        let mut reg = VariableRegistry::new("t");
        // |R| × |S| × |B| = 2 × 2 × 3
        assert_eq!(reg.declare_assignments(&ctx, SkillScope::All, 20.0), 12);
        assert_eq!(reg.model().variable_count(), 12);
    }

    #[test]
    fn test_scope_demanded() {
        let p = sample_problem();
        let ctx = ModelContext::new(&p);
        let mut reg = VariableRegistry::new("t");
        // S1 demands 2 skills, S2 demands 1; each for both resources.
        assert_eq!(reg.declare_assignments(&ctx, SkillScope::Demanded, 20.0), 6);

        let tff = ctx.skill_index("tff").unwrap();
        let key = AssignmentKey {
            resource: 0,
            shift: 0,
            skill: tff,
        };
        assert!(reg.assignment(key).is_none());
        assert_eq!(reg.resource_shift_vars(0, 0).len(), 2);
    }

    #[test]
    fn test_scope_qualified() {
        let p = sample_problem();
        let ctx = ModelContext::new(&p);
        let mut reg = VariableRegistry::new("t");
        // Max: S1 fitter, S1 safety. Moritz: S2 tff.
        assert_eq!(reg.declare_assignments(&ctx, SkillScope::Qualified, 20.0), 3);
        assert_eq!(reg.resource_vars(0).len(), 2);
        assert_eq!(reg.resource_vars(1).len(), 1);
        assert!(reg.resource_shift_vars(1, 0).is_empty());
    }

    #[test]
    fn test_objective_is_cost_weight() {
        let p = sample_problem();
        let ctx = ModelContext::new(&p);
        let mut reg = VariableRegistry::new("t");
        reg.declare_assignments(&ctx, SkillScope::Qualified, 20.0);

        let tff = ctx.skill_index("tff").unwrap();
        let ext = reg
            .assignment(AssignmentKey {
                resource: 1,
                shift: 1,
                skill: tff,
            })
            .unwrap();
        assert!((reg.model().var(ext).objective - 20.0).abs() < 1e-10);
        assert_eq!(reg.model().var(ext).name, "x_Moritz_S2_tff");

        for var in reg.resource_vars(0) {
            assert!((reg.model().var(var).objective - 2.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_auxiliary_variables() {
        let mut reg = VariableRegistry::new("t");
        let key = ChangeKey {
            site: 0,
            from_shift: 0,
            to_shift: 1,
            resource: 0,
        };
        let chg = reg.declare_change(key, "chg".into(), 10.0);
        let total = reg.declare_total(0, "total_0".into());
        let (min, max) = reg.declare_min_max(5.0);

        assert_eq!(reg.change(key), Some(chg));
        assert_eq!(reg.total(0), Some(total));
        assert_eq!(reg.min_shifts(), Some(min));
        assert_eq!(reg.max_shifts(), Some(max));
        assert_eq!(reg.model().var(chg).kind, VarKind::Binary);
        assert_eq!(reg.model().var(total).kind, VarKind::Integer);
        assert!((reg.model().var(min).objective + 5.0).abs() < 1e-10);
        assert!((reg.model().var(max).objective - 5.0).abs() < 1e-10);
        assert_eq!(reg.changes().count(), 1);
    }
}
