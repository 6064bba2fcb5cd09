//! Multi-site shift rostering as a mixed-integer linear program.
//!
//! Assigns skilled resources to shifts across sites and timeslots so that
//! every skill demand is staffed, labor rules hold, and the workload is
//! cheap, fair and continuous per site. The solving algorithm itself is
//! external, behind the [`milp::MilpSolver`] trait.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Timeslot`, `Resource`, `Shift`,
//!   `DispatchProblem`, `Roster`
//! - **`formulation`**: Variable registry, constraint families, decoder
//! - **`milp`**: Linear model store, solver trait, `good_lp` adapter
//! - **`dispatcher`**: Build → solve → decode orchestration
//! - **`config`**: Rule parameters, weights, solve policy (TOML)
//! - **`validation`**: Input integrity checks (duplicate IDs, horizon, skills)
//! - **`audit`**: Rule check of a decoded roster
//! - **`kpi`**: Roster quality metrics
//! - **`events`**: Build/solve observer hook
//!
//! # Rules
//!
//! | Rule | Form |
//! |------|------|
//! | Coverage | `Σ_r x[r,s,b] ≥ demand(s,b)` |
//! | One assignment per timeslot | `Σ x[r,s,·] ≤ 1` over shifts at `t` |
//! | Rest period | no work at `t` and `t+1` |
//! | Day window | `≤ 7` assignments in 18 timeslots |
//! | Night window | `≤ 14` nights in 60 timeslots |
//! | Availability | no work at unavailable timeslots |
//!
//! # Example
//!
//! ```
//! use u_roster::dispatcher::Dispatcher;
//! use u_roster::milp::GoodLpSolver;
//! use u_roster::models::{DispatchProblem, Resource, Shift};
//!
//! let problem = DispatchProblem::with_inferred_horizon(
//!     vec![
//!         Resource::internal("Max").with_skills(["fitter", "safety"]),
//!         Resource::external("Petra").with_skill("fitter"),
//!     ],
//!     vec![Shift::new("ID1", 1, "Zurich").with_demand("fitter", 1)],
//! );
//! let outcome = Dispatcher::new(&problem).solve(&GoodLpSolver::new()).unwrap();
//! assert!(outcome.roster().unwrap().entry_for_shift("ID1").unwrap().has_resource("Max"));
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of applications, methods and models"
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"

pub mod audit;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod formulation;
pub mod kpi;
pub mod milp;
pub mod models;
pub mod validation;
