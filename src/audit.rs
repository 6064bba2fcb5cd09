//! Post-hoc roster audit.
//!
//! Re-checks a decoded [`Roster`] against the dispatch rules without the
//! solver: coverage, one assignment per timeslot, rest period, rolling
//! window caps, availability and skills. A roster produced by a correct
//! model audits clean; anything else points to a modeling or solver fault,
//! or to a roster edited by hand.

use std::collections::BTreeMap;

use crate::config::DispatchConfig;
use crate::formulation::window_spans;
use crate::models::{DispatchProblem, Roster, Timeslot, Violation, ViolationType};

/// Audits a roster and returns every violation found.
///
/// An empty result means the roster satisfies every rule enabled in
/// `config`.
pub fn audit_roster(
    roster: &Roster,
    problem: &DispatchProblem,
    config: &DispatchConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    // resource id -> worked timeslots, with multiplicity
    let mut worked: BTreeMap<&str, Vec<Timeslot>> = BTreeMap::new();

    for entry in &roster.entries {
        if problem.shift(&entry.shift_id).is_none() {
            violations.push(Violation::new(
                ViolationType::UnknownReference,
                &entry.shift_id,
                format!("Roster references unknown shift '{}'", entry.shift_id),
            ));
        }
        for a in &entry.assignments {
            worked
                .entry(a.resource_id.as_str())
                .or_default()
                .push(entry.timeslot);

            let Some(resource) = problem.resource(&a.resource_id) else {
                violations.push(Violation::new(
                    ViolationType::UnknownReference,
                    &a.resource_id,
                    format!(
                        "Shift '{}' assigns unknown resource '{}'",
                        entry.shift_id, a.resource_id
                    ),
                ));
                continue;
            };
            if !resource.has_skill(&a.skill) {
                violations.push(Violation::new(
                    ViolationType::SkillMismatch,
                    &a.resource_id,
                    format!(
                        "'{}' covers '{}' on shift '{}' without holding it",
                        a.resource_id, a.skill, entry.shift_id
                    ),
                ));
            }
            if !resource.is_available_at(entry.timeslot) {
                violations.push(Violation::new(
                    ViolationType::Unavailable,
                    &a.resource_id,
                    format!(
                        "'{}' is assigned to shift '{}' at unavailable timeslot {}",
                        a.resource_id, entry.shift_id, entry.timeslot
                    ),
                ));
            }
        }
    }

    check_coverage(roster, problem, &mut violations);
    for (resource_id, slots) in &mut worked {
        slots.sort();
        check_resource_slots(resource_id, slots, problem.horizon, config, &mut violations);
    }

    violations
}

fn check_coverage(roster: &Roster, problem: &DispatchProblem, violations: &mut Vec<Violation>) {
    for shift in &problem.shifts {
        let entry = roster.entry_for_shift(&shift.id);
        for (skill, demand) in shift.demanded_skills() {
            let covered = entry.map_or(0, |e| e.covered(skill));
            if covered < demand as usize {
                violations.push(Violation::new(
                    ViolationType::Undercoverage,
                    &shift.id,
                    format!(
                        "Shift '{}' has {covered} of {demand} '{skill}'",
                        shift.id
                    ),
                ));
            }
        }
    }
}

/// Per-resource checks over its sorted worked timeslots.
fn check_resource_slots(
    resource_id: &str,
    slots: &[Timeslot],
    horizon: u32,
    config: &DispatchConfig,
    violations: &mut Vec<Violation>,
) {
    for pair in slots.windows(2) {
        if pair[0] == pair[1] {
            violations.push(Violation::new(
                ViolationType::DoubleBooking,
                resource_id,
                format!("'{resource_id}' holds several assignments at timeslot {}", pair[0]),
            ));
        } else if config.rules.rest_period && pair[0].next() == pair[1] {
            violations.push(Violation::new(
                ViolationType::RestPeriod,
                resource_id,
                format!(
                    "'{resource_id}' works adjacent timeslots {} and {}",
                    pair[0], pair[1]
                ),
            ));
        }
    }

    let day = config.rules.day_window;
    for span in window_spans(horizon, day.width) {
        let count = slots.iter().filter(|&&t| span.contains(t)).count();
        if count > day.cap as usize {
            violations.push(Violation::new(
                ViolationType::DayWindowCap,
                resource_id,
                format!(
                    "'{resource_id}' has {count} assignments in [{}, {}), cap {}",
                    span.start, span.end, day.cap
                ),
            ));
        }
    }

    let night = config.rules.night_window;
    for span in window_spans(horizon, night.width) {
        let count = slots
            .iter()
            .filter(|&&t| span.contains(t) && t.is_night())
            .count();
        if count > night.cap as usize {
            violations.push(Violation::new(
                ViolationType::NightWindowCap,
                resource_id,
                format!(
                    "'{resource_id}' has {count} night assignments in [{}, {}), cap {}",
                    span.start, span.end, night.cap
                ),
            ));
        }
    }
}
