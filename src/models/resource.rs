//! Resource model.
//!
//! Resources are the workers that staff shifts. Each resource holds a set
//! of skills, may be an external contractor, and may be unavailable in
//! some timeslots.
//!
//! # Cost Weight
//! An internal resource costs `|skills|` per assignment; an external one
//! costs `multiplier × |skills|` (20 by default). The multiplier is large
//! enough that internal staff are always preferred when feasible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Timeslot;

/// A schedulable worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Skills this resource can cover (unique, unordered).
    pub skills: BTreeSet<String>,
    /// External contractor flag.
    #[serde(default)]
    pub external: bool,
    /// Timeslots in which the resource cannot be assigned.
    #[serde(default)]
    pub unavailable: BTreeSet<Timeslot>,
}

impl Resource {
    /// Creates an internal resource with no skills.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            skills: BTreeSet::new(),
            external: false,
            unavailable: BTreeSet::new(),
        }
    }

    /// Creates an internal resource.
    pub fn internal(id: impl Into<String>) -> Self {
        Self::new(id)
    }

    /// Creates an external contractor.
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            external: true,
            ..Self::new(id)
        }
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Adds several skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Marks a timeslot as unavailable.
    pub fn with_unavailable(mut self, slot: impl Into<Timeslot>) -> Self {
        self.unavailable.insert(slot.into());
        self
    }

    /// Whether this resource has a given skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Coverage contribution for a skill: 1 if held, else 0.
    #[inline]
    pub fn covers(&self, skill: &str) -> u32 {
        u32::from(self.has_skill(skill))
    }

    /// Per-assignment cost weight.
    ///
    /// `external_multiplier` applies only to external contractors.
    pub fn cost_weight(&self, external_multiplier: f64) -> f64 {
        let base = self.skills.len() as f64;
        if self.external {
            base * external_multiplier
        } else {
            base
        }
    }

    /// Whether the resource may work in the given timeslot.
    pub fn is_available_at(&self, slot: Timeslot) -> bool {
        !self.unavailable.contains(&slot)
    }

    /// Whether any unavailability is declared.
    pub fn has_unavailability(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::internal("Max")
            .with_skill("track_fitter")
            .with_skill("safety_lead")
            .with_unavailable(3);

        assert_eq!(r.id, "Max");
        assert!(!r.external);
        assert!(r.has_skill("track_fitter"));
        assert!(!r.has_skill("foreman"));
        assert_eq!(r.covers("safety_lead"), 1);
        assert_eq!(r.covers("foreman"), 0);
        assert!(!r.is_available_at(Timeslot(3)));
        assert!(r.is_available_at(Timeslot(4)));
    }

    #[test]
    fn test_skills_are_unique() {
        let r = Resource::internal("R1").with_skills(["a", "b", "a"]);
        assert_eq!(r.skills.len(), 2);
    }

    #[test]
    fn test_cost_weight() {
        let internal = Resource::internal("I").with_skills(["a", "b"]);
        let external = Resource::external("E").with_skills(["a", "b"]);

        assert!((internal.cost_weight(20.0) - 2.0).abs() < 1e-10);
        assert!((external.cost_weight(20.0) - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_skill_set_costs_nothing() {
        let r = Resource::external("E");
        assert!((r.cost_weight(20.0) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_defaults() {
        let r: Resource = serde_json::from_str(r#"{"id": "Lisa", "skills": ["track_fitter"]}"#)
            .unwrap();
        assert!(!r.external);
        assert!(!r.has_unavailability());
        assert!(r.has_skill("track_fitter"));
    }
}
