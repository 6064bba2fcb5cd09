//! MILP solver interface and `good_lp` adapter.

use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::{debug, warn};

use super::model::{LinearModel, ObjectiveSense, Sense, VarKind};

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// No solution available: timeout, cancellation or solver error.
    Unknown,
}

impl SolverStatus {
    /// Whether values accompany this status.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

/// Result of a solve.
#[derive(Debug, Clone)]
pub struct MilpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective value, present iff a solution was found.
    pub objective_value: Option<f64>,
    /// Variable values indexed by [`VarId`](super::VarId); empty without a solution.
    pub values: Vec<f64>,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl MilpSolution {
    /// Creates a solution without values.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time_ms: 0,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.status.has_solution()
    }

    /// Value of a variable, if a solution exists.
    pub fn value(&self, var: super::VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }
}

/// Timeout policy handed to the solver.
///
/// The limit bounds how long the caller waits, not how long a backend
/// without native cancellation keeps computing. [`GoodLpSolver`] leaves a
/// timed-out solve running on its worker thread until it finishes.
#[derive(Debug, Clone, Default)]
pub struct SolvePolicy {
    /// Wall-clock limit; `None` waits for the solver to finish.
    pub time_limit: Option<Duration>,
}

impl SolvePolicy {
    /// Policy without a time limit.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Policy with a wall-clock limit.
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
        }
    }
}

/// Trait for MILP solver implementations.
///
/// Implementors own the search: branch-and-bound, cuts, presolve. A solve
/// that is cancelled or times out must report [`SolverStatus::Unknown`]
/// with no values.
pub trait MilpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &LinearModel, policy: &SolvePolicy) -> MilpSolution;
}

/// Solves a [`LinearModel`] through `good_lp` with the `microlp` backend.
///
/// With a time limit the solve runs on a worker thread and `Unknown` is
/// returned once the limit elapses. `microlp` cannot be interrupted, so a
/// timed-out worker keeps using a CPU core until its search ends. Its
/// handle is kept and joined by a later call once finished;
/// [`pending_workers`](Self::pending_workers) reports how many are still
/// running. Clones share the same worker list.
#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver {
    abandoned: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl GoodLpSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timed-out workers that are still computing.
    pub fn pending_workers(&self) -> usize {
        self.reap();
        self.abandoned.lock().map(|w| w.len()).unwrap_or(0)
    }

    /// Joins finished workers.
    fn reap(&self) {
        let Ok(mut workers) = self.abandoned.lock() else {
            return;
        };
        let (done, running): (Vec<_>, Vec<_>) =
            workers.drain(..).partition(|handle| handle.is_finished());
        *workers = running;
        for handle in done {
            let _ = handle.join();
        }
    }

    fn abandon(&self, handle: JoinHandle<()>) {
        if let Ok(mut workers) = self.abandoned.lock() {
            workers.push(handle);
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl MilpSolver for GoodLpSolver {
    fn solve(&self, model: &LinearModel, policy: &SolvePolicy) -> MilpSolution {
        let start = Instant::now();
        self.reap();

        if model.vars.is_empty() {
            // Only constant rows remain.
            if !model.is_satisfied_by(&[], 0.0) {
                return MilpSolution::empty(SolverStatus::Infeasible);
            }
            return MilpSolution {
                status: SolverStatus::Optimal,
                objective_value: Some(0.0),
                values: Vec::new(),
                solve_time_ms: 0,
            };
        }

        let outcome = match policy.time_limit {
            None => solve_with_good_lp(model),
            Some(limit) => {
                let owned = model.clone();
                let (tx, rx) = mpsc::channel();
                let handle = thread::spawn(move || {
                    // The receiver is gone once the caller timed out.
                    let _ = tx.send(solve_with_good_lp(&owned));
                });
                match rx.recv_timeout(limit) {
                    Ok(outcome) => {
                        let _ = handle.join();
                        outcome
                    }
                    Err(_) => {
                        warn!(
                            event = "solve_timeout",
                            model = %model.name,
                            limit_ms = millis(limit),
                            worker = "abandoned",
                        );
                        self.abandon(handle);
                        return MilpSolution {
                            solve_time_ms: millis(start.elapsed()),
                            ..MilpSolution::empty(SolverStatus::Unknown)
                        };
                    }
                }
            }
        };

        let solve_time_ms = millis(start.elapsed());
        match outcome {
            Ok(values) => MilpSolution {
                status: SolverStatus::Optimal,
                objective_value: Some(model.objective_value(&values)),
                values,
                solve_time_ms,
            },
            Err(ResolutionError::Infeasible) => MilpSolution {
                solve_time_ms,
                ..MilpSolution::empty(SolverStatus::Infeasible)
            },
            Err(err) => {
                debug!(event = "solve_error", model = %model.name, error = %err);
                MilpSolution {
                    solve_time_ms,
                    ..MilpSolution::empty(SolverStatus::Unknown)
                }
            }
        }
    }
}

/// Translates the model into `good_lp` and solves it.
fn solve_with_good_lp(model: &LinearModel) -> Result<Vec<f64>, ResolutionError> {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .vars
        .iter()
        .map(|decl| {
            let definition = match decl.kind {
                VarKind::Binary => variable().binary(),
                VarKind::Integer => variable().integer().min(0.0),
            };
            vars.add(definition.name(decl.name.clone()))
        })
        .collect();

    let mut objective = Expression::from(0.0);
    for (decl, &handle) in model.vars.iter().zip(&handles) {
        if decl.objective != 0.0 {
            objective += decl.objective * handle;
        }
    }

    let unsolved = match model.sense {
        ObjectiveSense::Minimize => vars.minimise(objective),
        ObjectiveSense::Maximize => vars.maximise(objective),
    };
    let mut problem = unsolved.using(microlp);

    for c in &model.constraints {
        if c.terms.is_empty() {
            // Constant row: decide it here rather than hand microlp an empty row.
            if c.is_satisfied_by(&[], 0.0) {
                continue;
            }
            return Err(ResolutionError::Infeasible);
        }
        let mut lhs = Expression::from(0.0);
        for &(var, coef) in &c.terms {
            lhs += coef * handles[var.index()];
        }
        let rhs = c.rhs;
        let linear = match c.sense {
            Sense::Le => constraint!(lhs <= rhs),
            Sense::Ge => constraint!(lhs >= rhs),
            Sense::Eq => constraint!(lhs == rhs),
        };
        problem.add_constraint(linear);
    }

    let solution = problem.solve()?;
    Ok(handles.iter().map(|&h| solution.value(h)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::{LinearModel, Sense, VarKind};

    #[test]
    fn test_solve_small_cover() {
        // Two binaries, cover with the cheaper one.
        let mut m = LinearModel::new("cover");
        let cheap = m.declare_variable("cheap", VarKind::Binary, 1.0);
        let pricey = m.declare_variable("pricey", VarKind::Binary, 40.0);
        m.add_constraint("demand", vec![(cheap, 1.0), (pricey, 1.0)], Sense::Ge, 1.0);

        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::unlimited());
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert!(sol.is_solution_found());
        assert!(sol.value(cheap).unwrap() > 0.5);
        assert!(sol.value(pricey).unwrap() < 0.5);
        assert!((sol.objective_value.unwrap() - 1.0).abs() < 1e-6);
        assert!(m.is_satisfied_by(&sol.values, 1e-6));
    }

    #[test]
    fn test_solve_infeasible() {
        let mut m = LinearModel::new("infeasible");
        let x = m.declare_variable("x", VarKind::Binary, 1.0);
        m.add_constraint("too_much", vec![(x, 1.0)], Sense::Ge, 2.0);

        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::unlimited());
        assert!(!sol.is_solution_found());
        assert!(sol.values.is_empty());
        assert!(sol.objective_value.is_none());
        assert_ne!(sol.status, SolverStatus::Optimal);
    }

    #[test]
    fn test_empty_row_violated_is_infeasible() {
        let mut m = LinearModel::new("empty_row");
        m.declare_variable("x", VarKind::Binary, 1.0);
        m.add_constraint("nobody_qualified", vec![], Sense::Ge, 1.0);

        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::unlimited());
        assert_eq!(sol.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_integer_equality() {
        let mut m = LinearModel::new("total");
        let a = m.declare_variable("a", VarKind::Binary, 0.0);
        let b = m.declare_variable("b", VarKind::Binary, 0.0);
        let total = m.declare_variable("total", VarKind::Integer, 1.0);
        m.add_constraint("ab", vec![(a, 1.0), (b, 1.0)], Sense::Ge, 2.0);
        m.add_constraint("sum", vec![(total, 1.0), (a, -1.0), (b, -1.0)], Sense::Eq, 0.0);

        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::with_time_limit(Duration::from_secs(30)));
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert!((sol.value(total).unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_model() {
        let m = LinearModel::new("empty");
        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::unlimited());
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert_eq!(sol.objective_value, Some(0.0));
    }

    #[test]
    fn test_empty_model_with_violated_row_is_infeasible() {
        let mut m = LinearModel::new("no_vars");
        m.add_constraint("demand", vec![], Sense::Ge, 1.0);
        m.add_constraint("trivial", vec![], Sense::Le, 0.0);

        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::unlimited());
        assert_eq!(sol.status, SolverStatus::Infeasible);
        assert!(sol.objective_value.is_none());
        assert!(sol.values.is_empty());
    }

    #[test]
    fn test_empty_model_with_satisfied_rows_is_optimal() {
        let mut m = LinearModel::new("no_vars");
        m.add_constraint("trivial", vec![], Sense::Le, 0.0);
        m.add_constraint("zero", vec![], Sense::Eq, 0.0);

        let sol = GoodLpSolver::new().solve(&m, &SolvePolicy::unlimited());
        assert_eq!(sol.status, SolverStatus::Optimal);
    }

    fn knapsack(items: usize) -> LinearModel {
        let mut m = LinearModel::new("knapsack");
        let vars: Vec<_> = (0..items)
            .map(|i| m.declare_variable(format!("k{i}"), VarKind::Binary, -((i % 7 + 3) as f64)))
            .collect();
        let weights: Vec<_> = vars
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, (i % 5 + 2) as f64))
            .collect();
        m.add_constraint("capacity", weights, Sense::Le, items as f64 * 1.5);
        m
    }

    #[test]
    fn test_time_limit_returns_unknown_and_reaps_worker() {
        let m = knapsack(40);
        let solver = GoodLpSolver::new();

        let sol = solver.solve(&m, &SolvePolicy::with_time_limit(Duration::from_nanos(1)));
        assert_eq!(sol.status, SolverStatus::Unknown);
        assert!(!sol.is_solution_found());
        assert!(sol.values.is_empty());
        assert!(sol.objective_value.is_none());

        // The abandoned worker is joined once it finishes.
        let deadline = Instant::now() + Duration::from_secs(60);
        while solver.pending_workers() > 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(solver.pending_workers(), 0);
    }

    #[test]
    fn test_generous_time_limit_solves() {
        let m = knapsack(12);
        let solver = GoodLpSolver::new();
        let sol = solver.solve(&m, &SolvePolicy::with_time_limit(Duration::from_secs(60)));
        assert_eq!(sol.status, SolverStatus::Optimal);
        assert!(m.is_satisfied_by(&sol.values, 1e-6));
        assert_eq!(solver.pending_workers(), 0);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_status_has_solution() {
        assert!(SolverStatus::Optimal.has_solution());
        assert!(SolverStatus::Feasible.has_solution());
        assert!(!SolverStatus::Infeasible.has_solution());
        assert!(!SolverStatus::Unknown.has_solution());
        assert!(!MilpSolution::empty(SolverStatus::Infeasible).is_solution_found());
    }
}
