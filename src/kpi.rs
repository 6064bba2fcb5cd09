//! Roster quality metrics (KPIs).
//!
//! Computes workload and staffing indicators from a decoded roster and
//! its input problem.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Shift counts | Assignments per resource, zero included |
//! | Spread | max - min of the shift counts |
//! | External share | Fraction of assignments held by external resources |
//! | Site changes | Resource turnover between consecutive same-parity shifts of a site |
//! | Coverage surplus | Assignments beyond the demanded count |

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{DispatchProblem, Parity, Roster};

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct RosterKpi {
    /// Assignments per resource, including resources with none.
    pub shift_counts: BTreeMap<String, usize>,
    /// Smallest per-resource count.
    pub min_shifts: usize,
    /// Largest per-resource count.
    pub max_shifts: usize,
    /// Assignments held by external resources.
    pub external_assignments: usize,
    /// External assignments over all assignments (0.0..1.0).
    pub external_share: f64,
    /// Per site: resources entering or leaving between consecutive shifts.
    pub changes_by_site: BTreeMap<String, usize>,
    /// Assignments beyond demand, summed over shifts and skills.
    pub coverage_surplus: usize,
}

impl RosterKpi {
    /// Computes KPIs from a roster and its input problem.
    pub fn calculate(roster: &Roster, problem: &DispatchProblem) -> Self {
        let mut shift_counts: BTreeMap<String, usize> = problem
            .resources
            .iter()
            .map(|r| (r.id.clone(), 0))
            .collect();
        let mut external_assignments = 0;
        for a in roster.entries.iter().flat_map(|e| &e.assignments) {
            *shift_counts.entry(a.resource_id.clone()).or_insert(0) += 1;
            if problem.resource(&a.resource_id).is_some_and(|r| r.external) {
                external_assignments += 1;
            }
        }

        let min_shifts = shift_counts.values().copied().min().unwrap_or(0);
        let max_shifts = shift_counts.values().copied().max().unwrap_or(0);
        let total = roster.assignment_count();
        let external_share = if total == 0 {
            0.0
        } else {
            external_assignments as f64 / total as f64
        };

        let mut changes_by_site = BTreeMap::new();
        for site in problem.sites() {
            let mut changes = 0;
            for parity in [Parity::Day, Parity::Night] {
                let sequence = problem.site_sequence(site, parity);
                for pair in sequence.windows(2) {
                    let before = staffed(roster, &problem.shifts[pair[0]].id);
                    let after = staffed(roster, &problem.shifts[pair[1]].id);
                    changes += before.symmetric_difference(&after).count();
                }
            }
            changes_by_site.insert(site.to_string(), changes);
        }

        let mut coverage_surplus = 0;
        for entry in &roster.entries {
            let Some(shift) = problem.shift(&entry.shift_id) else {
                continue;
            };
            let skills: BTreeSet<&str> = entry.assignments.iter().map(|a| a.skill.as_str()).collect();
            for skill in skills {
                coverage_surplus += entry
                    .covered(skill)
                    .saturating_sub(shift.demand(skill) as usize);
            }
        }

        Self {
            shift_counts,
            min_shifts,
            max_shifts,
            external_assignments,
            external_share,
            changes_by_site,
            coverage_surplus,
        }
    }

    /// max - min of the per-resource shift counts.
    pub fn spread(&self) -> usize {
        self.max_shifts - self.min_shifts
    }

    /// Total resource turnover across sites.
    pub fn total_changes(&self) -> usize {
        self.changes_by_site.values().sum()
    }
}

/// Resources present on a shift.
fn staffed<'a>(roster: &'a Roster, shift_id: &str) -> BTreeSet<&'a str> {
    roster
        .entry_for_shift(shift_id)
        .map(|e| e.assignments.iter().map(|a| a.resource_id.as_str()).collect())
        .unwrap_or_default()
}
