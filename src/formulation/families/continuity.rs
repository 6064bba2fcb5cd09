//! Staffing continuity per site.
//!
//! Each site's shifts are split into a day sequence and a night sequence,
//! both sorted chronologically. For consecutive shifts `(s1, s2)` in a
//! sequence and every resource `r`, with `cov(r, s) = Σ_b x[r, s, b]`:
//!
//! ```text
//! cov(r, s1) - cov(r, s2) ≤ chg[site, s1, s2, r]
//! cov(r, s2) - cov(r, s1) ≤ chg[site, s1, s2, r]
//! objective += weight · chg
//! ```
//!
//! The two rows only bound `chg` from below. Minimization pressure is
//! what pulls it to 0 when presence is unchanged. Switching skills on
//! the same site without leaving is not a change.

use crate::milp::Sense;
use crate::models::Parity;

use super::{ConstraintFamily, ModelContext, VariableRegistry};
use crate::formulation::registry::ChangeKey;

#[derive(Debug, Clone, Copy)]
pub struct Continuity {
    weight: f64,
}

impl Continuity {
    /// Creates the family with a penalty per change indicator.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Default for Continuity {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl ConstraintFamily for Continuity {
    fn name(&self) -> &'static str {
        "continuity"
    }

    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry) {
        for (site_idx, &site) in ctx.sites.iter().enumerate() {
            for parity in [Parity::Day, Parity::Night] {
                let sequence = ctx.problem.site_sequence(site, parity);
                for pair in sequence.windows(2) {
                    let (s1, s2) = (pair[0], pair[1]);
                    let (id1, id2) = (&ctx.problem.shifts[s1].id, &ctx.problem.shifts[s2].id);

                    for (r, resource) in ctx.problem.resources.iter().enumerate() {
                        let cov1 = registry.resource_shift_vars(r, s1).to_vec();
                        let cov2 = registry.resource_shift_vars(r, s2).to_vec();
                        // Both sides identically zero: no change possible.
                        if cov1.is_empty() && cov2.is_empty() {
                            continue;
                        }

                        let key = ChangeKey {
                            site: site_idx,
                            from_shift: s1,
                            to_shift: s2,
                            resource: r,
                        };
                        let chg = registry.declare_change(
                            key,
                            format!("chg_{site}_{id1}_{id2}_{}", resource.id),
                            self.weight,
                        );

                        let forward: Vec<_> = cov1
                            .iter()
                            .map(|&v| (v, 1.0))
                            .chain(cov2.iter().map(|&v| (v, -1.0)))
                            .chain(std::iter::once((chg, -1.0)))
                            .collect();
                        let backward: Vec<_> = cov2
                            .iter()
                            .map(|&v| (v, 1.0))
                            .chain(cov1.iter().map(|&v| (v, -1.0)))
                            .chain(std::iter::once((chg, -1.0)))
                            .collect();

                        registry.add_constraint(
                            format!("chg_fwd_{site}_{id1}_{id2}_{}", resource.id),
                            forward,
                            Sense::Le,
                            0.0,
                        );
                        registry.add_constraint(
                            format!("chg_bwd_{site}_{id1}_{id2}_{}", resource.id),
                            backward,
                            Sense::Le,
                            0.0,
                        );
                    }
                }
            }
        }
    }
}
