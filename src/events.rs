//! Model-building observability hook.
//!
//! The formulation reports progress to an optional [`ModelObserver`]
//! instead of printing. Nothing is emitted when no observer is set.

use std::sync::Mutex;

use tracing::{debug, info};

use crate::milp::SolverStatus;

/// An event raised while building or solving a dispatch model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A constraint family finished emitting.
    FamilyBuilt {
        family: &'static str,
        variables_added: usize,
        constraints_added: usize,
    },
    /// The model was handed to the solver.
    SolveStarted {
        variables: usize,
        constraints: usize,
    },
    /// The solver returned.
    SolveFinished {
        status: SolverStatus,
        objective_value: Option<f64>,
        solve_time_ms: u64,
    },
}

/// Receives [`ModelEvent`]s.
pub trait ModelObserver: Send + Sync {
    fn on_event(&self, event: &ModelEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ModelObserver for TracingObserver {
    fn on_event(&self, event: &ModelEvent) {
        match event {
            ModelEvent::FamilyBuilt {
                family,
                variables_added,
                constraints_added,
            } => debug!(
                event = "family_built",
                family = *family,
                variables_added = *variables_added,
                constraints_added = *constraints_added,
            ),
            ModelEvent::SolveStarted {
                variables,
                constraints,
            } => info!(
                event = "solve_start",
                variables = *variables,
                constraints = *constraints,
            ),
            ModelEvent::SolveFinished {
                status,
                objective_value,
                solve_time_ms,
            } => info!(
                event = "solve_end",
                status = ?status,
                objective = ?objective_value,
                solve_time_ms = *solve_time_ms,
            ),
        }
    }
}

/// Stores every event; useful for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ModelEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<ModelEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// `(family, variables_added, constraints_added)` of every built family.
    pub fn family_counts(&self) -> Vec<(&'static str, usize, usize)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ModelEvent::FamilyBuilt {
                    family,
                    variables_added,
                    constraints_added,
                } => Some((family, variables_added, constraints_added)),
                _ => None,
            })
            .collect()
    }
}

impl ModelObserver for RecordingObserver {
    fn on_event(&self, event: &ModelEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let obs = RecordingObserver::new();
        obs.on_event(&ModelEvent::FamilyBuilt {
            family: "coverage",
            variables_added: 0,
            constraints_added: 3,
        });
        obs.on_event(&ModelEvent::SolveStarted {
            variables: 6,
            constraints: 3,
        });

        assert_eq!(obs.events().len(), 2);
        assert_eq!(obs.family_counts(), vec![("coverage", 0, 3)]);
    }

    #[test]
    fn test_tracing_observer_accepts_all_events() {
        let obs = TracingObserver;
        obs.on_event(&ModelEvent::SolveFinished {
            status: SolverStatus::Infeasible,
            objective_value: None,
            solve_time_ms: 1,
        });
    }
}
