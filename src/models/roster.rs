//! Roster (solution) model.
//!
//! A roster is the decoded result of a solved dispatch model: for every
//! staffed shift, the list of resources assigned to it and the skill each
//! one covers. Entries are ordered by `(timeslot, shift id)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Timeslot;

/// A complete shift roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Objective value reported by the solver.
    pub objective_value: f64,
    /// Whether the solver proved optimality.
    pub proven_optimal: bool,
    /// Staffed shifts, sorted by `(timeslot, shift_id)`.
    pub entries: Vec<RosterEntry>,
}

/// Assignments of one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Timeslot of the shift.
    pub timeslot: Timeslot,
    /// Shift identifier.
    pub shift_id: String,
    /// Site identifier.
    pub site: String,
    /// Resources assigned to this shift.
    pub assignments: Vec<Assignment>,
}

/// A resource covering one unit of a skill on a shift.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned resource ID.
    pub resource_id: String,
    /// Skill the resource covers.
    pub skill: String,
}

/// A rule violation found when auditing a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (shift or resource).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of roster violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A shift has fewer resources for a skill than demanded.
    Undercoverage,
    /// A resource holds more than one assignment in a timeslot.
    DoubleBooking,
    /// A resource works two adjacent timeslots.
    RestPeriod,
    /// Too many assignments within a day window.
    DayWindowCap,
    /// Too many night assignments within a night window.
    NightWindowCap,
    /// A resource is assigned in a timeslot it declared unavailable.
    Unavailable,
    /// A resource covers a skill it does not hold.
    SkillMismatch,
    /// The roster references an unknown shift or resource.
    UnknownReference,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(resource_id: impl Into<String>, skill: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            skill: skill.into(),
        }
    }
}

impl RosterEntry {
    /// Creates an entry with no assignments.
    pub fn new(timeslot: Timeslot, shift_id: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            timeslot,
            shift_id: shift_id.into(),
            site: site.into(),
            assignments: Vec::new(),
        }
    }

    /// Adds an assignment.
    pub fn with_assignment(mut self, resource_id: impl Into<String>, skill: impl Into<String>) -> Self {
        self.assignments.push(Assignment::new(resource_id, skill));
        self
    }

    /// Number of resources covering a skill.
    pub fn covered(&self, skill: &str) -> usize {
        self.assignments.iter().filter(|a| a.skill == skill).count()
    }

    /// Whether a resource appears on this shift.
    pub fn has_resource(&self, resource_id: &str) -> bool {
        self.assignments.iter().any(|a| a.resource_id == resource_id)
    }
}

impl Violation {
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, keeping `(timeslot, shift_id)` order.
    pub fn add_entry(&mut self, entry: RosterEntry) {
        let pos = self
            .entries
            .partition_point(|e| (e.timeslot, e.shift_id.as_str()) < (entry.timeslot, entry.shift_id.as_str()));
        self.entries.insert(pos, entry);
    }

    /// Finds the entry of a shift.
    pub fn entry_for_shift(&self, shift_id: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.shift_id == shift_id)
    }

    /// All `(entry, assignment)` pairs of a resource.
    pub fn assignments_for_resource(&self, resource_id: &str) -> Vec<(&RosterEntry, &Assignment)> {
        self.entries
            .iter()
            .flat_map(|e| e.assignments.iter().map(move |a| (e, a)))
            .filter(|(_, a)| a.resource_id == resource_id)
            .collect()
    }

    /// Number of assignments per resource (resources with none are absent).
    pub fn shift_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for a in self.entries.iter().flat_map(|e| &e.assignments) {
            *counts.entry(a.resource_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.entries.iter().map(|e| e.assignments.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
