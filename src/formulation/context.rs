//! Precomputed lookups shared by every constraint family.

use std::collections::BTreeMap;

use crate::models::{DispatchProblem, Timeslot};

/// Read-only view of a problem, indexed for model building.
///
/// Skills and sites are interned into sorted vectors so that variable keys
/// can carry plain indices.
#[derive(Debug)]
pub struct ModelContext<'a> {
    /// The problem being formulated.
    pub problem: &'a DispatchProblem,
    /// Skills demanded anywhere, sorted.
    pub skills: Vec<&'a str>,
    /// Sites referenced by shifts, sorted.
    pub sites: Vec<&'a str>,
    slots: BTreeMap<Timeslot, Vec<usize>>,
}

impl<'a> ModelContext<'a> {
    pub fn new(problem: &'a DispatchProblem) -> Self {
        Self {
            problem,
            skills: problem.demanded_skills().into_iter().collect(),
            sites: problem.sites().into_iter().collect(),
            slots: problem.shifts_by_timeslot(),
        }
    }

    /// Index of a skill in [`skills`](Self::skills).
    pub fn skill_index(&self, skill: &str) -> Option<usize> {
        self.skills.binary_search(&skill).ok()
    }

    /// Shift indices occupying a timeslot.
    pub fn shifts_at(&self, slot: Timeslot) -> &[usize] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Timeslots that hold at least one shift, ascending.
    pub fn occupied_slots(&self) -> impl Iterator<Item = Timeslot> + '_ {
        self.slots.keys().copied()
    }

    pub fn horizon(&self) -> u32 {
        self.problem.horizon
    }
}
