//! Constraint family builders.
//!
//! Each family reads the domain facts in a [`ModelContext`] and the
//! variables in a [`VariableRegistry`], and appends its constraints and
//! objective terms. Families are independent of one another; their order
//! only affects variable and constraint numbering.
//!
//! # Families
//!
//! | Family | Rule |
//! |--------|------|
//! | [`Coverage`] | every demanded skill is staffed |
//! | [`Eligibility`] | no assignment for unheld or undemanded skills |
//! | [`SingleAssignment`] | one assignment per resource per timeslot |
//! | [`RestPeriod`] | no work in two adjacent timeslots |
//! | [`WindowCap`] | rolling day / night workload caps |
//! | [`Continuity`] | penalize resource turnover at a site |
//! | [`Fairness`] | penalize the spread of per-resource workload |
//! | [`Availability`] | no work in declared unavailable timeslots |

mod availability;
mod continuity;
mod coverage;
mod eligibility;
mod fairness;
mod timeslot;
mod window_cap;

pub use availability::Availability;
pub use continuity::Continuity;
pub use coverage::Coverage;
pub use eligibility::Eligibility;
pub use fairness::Fairness;
pub use timeslot::{RestPeriod, SingleAssignment};
pub use window_cap::WindowCap;

use std::fmt::Debug;

use crate::config::DispatchConfig;

use super::{ModelContext, VariableRegistry};

/// A family of constraints and objective terms.
pub trait ConstraintFamily: Debug {
    /// Family name (e.g., "coverage", "rest_period").
    fn name(&self) -> &'static str;

    /// Emits the family into the registry's model.
    fn build(&self, ctx: &ModelContext<'_>, registry: &mut VariableRegistry);
}

/// The standard family set for a configuration, in build order.
pub fn standard_families(config: &DispatchConfig) -> Vec<Box<dyn ConstraintFamily>> {
    let mut families: Vec<Box<dyn ConstraintFamily>> = vec![
        Box::new(Coverage),
        Box::new(Eligibility),
        Box::new(SingleAssignment),
    ];
    if config.rules.rest_period {
        families.push(Box::new(RestPeriod));
    }
    families.push(Box::new(WindowCap::day(config.rules.day_window)));
    families.push(Box::new(WindowCap::night(config.rules.night_window)));
    families.push(Box::new(Continuity::new(config.weights.continuity)));
    families.push(Box::new(Fairness::new(config.weights.fairness)));
    families.push(Box::new(Availability));
    families
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_families_order() {
        let names: Vec<_> = standard_families(&DispatchConfig::default())
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "coverage",
                "eligibility",
                "single_assignment",
                "rest_period",
                "day_window_cap",
                "night_window_cap",
                "continuity",
                "fairness",
                "availability",
            ]
        );
    }

    #[test]
    fn test_rest_period_can_be_disabled() {
        let config = DispatchConfig::default().with_rest_period(false);
        assert!(standard_families(&config)
            .iter()
            .all(|f| f.name() != "rest_period"));
    }
}
