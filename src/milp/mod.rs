//! Mixed-integer linear programming backend.
//!
//! Defines the modeling layer the dispatch formulation writes into, and
//! the solver interface it reads results from.
//!
//! # Key Components
//!
//! - [`LinearModel`]: append-only store of variables, linear constraints
//!   and a linear objective
//! - [`MilpSolver`]: interface for solver implementations
//! - [`GoodLpSolver`]: adapter that solves a [`LinearModel`] with `good_lp`
//!   (pure-Rust `microlp` backend)
//!
//! # Design
//!
//! This module contains no branch-and-bound, presolve or LP relaxation of
//! its own. Solving is delegated; a timeout or an unknown status is
//! reported as [`SolverStatus::Unknown`], never as a partial assignment.

mod model;
mod solver;

pub use model::{LinearConstraint, LinearModel, ObjectiveSense, Sense, VarDecl, VarId, VarKind};
pub use solver::{GoodLpSolver, MilpSolution, MilpSolver, SolvePolicy, SolverStatus};
