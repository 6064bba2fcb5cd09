//! Dispatch problem instance.
//!
//! Bundles the resources, shifts and planning horizon of one scheduling
//! run, and provides the lookups the formulation needs (shifts per
//! timeslot, shifts per site, the skill universe).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Parity, Resource, Shift, Timeslot};

/// One scheduling run's input data.
///
/// Immutable once built; the formulation only borrows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchProblem {
    /// Schedulable workers.
    pub resources: Vec<Resource>,
    /// Shifts to staff.
    pub shifts: Vec<Shift>,
    /// Number of timeslots in the horizon (`1..=horizon`).
    pub horizon: u32,
}

impl DispatchProblem {
    /// Creates a problem with an explicit horizon.
    pub fn new(resources: Vec<Resource>, shifts: Vec<Shift>, horizon: u32) -> Self {
        Self {
            resources,
            shifts,
            horizon,
        }
    }

    /// Creates a problem whose horizon ends at the latest shift timeslot.
    pub fn with_inferred_horizon(resources: Vec<Resource>, shifts: Vec<Shift>) -> Self {
        let horizon = shifts.iter().map(|s| s.timeslot.index()).max().unwrap_or(0);
        Self::new(resources, shifts, horizon)
    }

    /// Every skill demanded (non-zero) by at least one shift, in name order.
    pub fn demanded_skills(&self) -> BTreeSet<&str> {
        self.shifts
            .iter()
            .flat_map(|s| s.demanded_skills().map(|(skill, _)| skill))
            .collect()
    }

    /// Every site referenced by a shift, in name order.
    pub fn sites(&self) -> BTreeSet<&str> {
        self.shifts.iter().map(|s| s.site.as_str()).collect()
    }

    /// Indices of shifts occupying a timeslot.
    pub fn shifts_at(&self, slot: Timeslot) -> Vec<usize> {
        self.shifts
            .iter()
            .enumerate()
            .filter(|(_, s)| s.timeslot == slot)
            .map(|(i, _)| i)
            .collect()
    }

    /// Shift indices grouped by timeslot.
    pub fn shifts_by_timeslot(&self) -> BTreeMap<Timeslot, Vec<usize>> {
        let mut map: BTreeMap<Timeslot, Vec<usize>> = BTreeMap::new();
        for (i, shift) in self.shifts.iter().enumerate() {
            map.entry(shift.timeslot).or_default().push(i);
        }
        map
    }

    /// Chronologically sorted shift indices of one site and parity.
    ///
    /// Ties on timeslot are broken by shift id.
    pub fn site_sequence(&self, site: &str, parity: Parity) -> Vec<usize> {
        let mut seq: Vec<usize> = self
            .shifts
            .iter()
            .enumerate()
            .filter(|(_, s)| s.site == site && s.parity() == parity)
            .map(|(i, _)| i)
            .collect();
        seq.sort_by(|&a, &b| {
            let (sa, sb) = (&self.shifts[a], &self.shifts[b]);
            sa.timeslot.cmp(&sb.timeslot).then_with(|| sa.id.cmp(&sb.id))
        });
        seq
    }

    /// Finds a resource by id.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Finds a shift by id.
    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }
}
