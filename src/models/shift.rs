//! Shift model.
//!
//! A shift is a discrete unit of work at one site in one timeslot, with a
//! headcount demand per skill. A skill absent from `demands` has zero
//! demand.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Parity, Timeslot};

/// A time-boxed work shift at a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Unique shift identifier.
    pub id: String,
    /// Required headcount per skill.
    #[serde(default)]
    pub demands: BTreeMap<String, u32>,
    /// Timeslot the shift occupies.
    pub timeslot: Timeslot,
    /// Site the shift belongs to.
    pub site: String,
}

impl Shift {
    /// Creates a shift with no demands.
    pub fn new(id: impl Into<String>, timeslot: impl Into<Timeslot>, site: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            demands: BTreeMap::new(),
            timeslot: timeslot.into(),
            site: site.into(),
        }
    }

    /// Sets the headcount demand for a skill.
    pub fn with_demand(mut self, skill: impl Into<String>, count: u32) -> Self {
        self.demands.insert(skill.into(), count);
        self
    }

    /// Headcount demanded for a skill (0 when absent).
    pub fn demand(&self, skill: &str) -> u32 {
        self.demands.get(skill).copied().unwrap_or(0)
    }

    /// Skills with non-zero demand, in name order.
    pub fn demanded_skills(&self) -> impl Iterator<Item = (&str, u32)> {
        self.demands
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(skill, &count)| (skill.as_str(), count))
    }

    /// Whether the shift demands a skill.
    pub fn demands_skill(&self, skill: &str) -> bool {
        self.demand(skill) > 0
    }

    /// Total headcount across all skills.
    pub fn total_demand(&self) -> u32 {
        self.demands.values().sum()
    }

    /// Day or night shift.
    #[inline]
    pub fn parity(&self) -> Parity {
        self.timeslot.parity()
    }
}
