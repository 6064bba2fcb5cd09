//! MILP formulation of shift dispatch.
//!
//! Turns a [`DispatchProblem`](crate::models::DispatchProblem) into a
//! [`LinearModel`](crate::milp::LinearModel) and maps solver values back to
//! a [`Roster`](crate::models::Roster).
//!
//! # Pipeline
//!
//! 1. [`ModelContext`]: interned skills, sites and per-timeslot shift lists
//! 2. [`VariableRegistry::declare_assignments`]: binary `x[r, s, b]`
//! 3. [`ConstraintFamily::build`] for every family in [`standard_families`]
//! 4. external solve
//! 5. [`decode`]: assignments above 0.5 grouped per shift
//!
//! # Objective
//!
//! ```text
//! minimize  Σ cost(r)·x[r,s,b] + w_c · Σ chg + w_f · (max_shifts - min_shifts)
//! ```
//!
//! where `cost(r)` is the skill count of `r`, scaled by the external
//! multiplier for external resources.

mod context;
pub mod decode;
pub mod families;
mod registry;
mod windows;

pub use context::ModelContext;
pub use decode::{decode, DispatchOutcome, NoSolutionReason, ASSIGNMENT_THRESHOLD};
pub use families::{
    standard_families, Availability, ConstraintFamily, Continuity, Coverage, Eligibility, Fairness,
    RestPeriod, SingleAssignment, WindowCap,
};
pub use registry::{AssignmentKey, ChangeKey, VariableRegistry};
pub use windows::{window_spans, window_starts};
