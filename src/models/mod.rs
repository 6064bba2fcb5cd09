//! Rostering domain models.
//!
//! Provides the input types of a dispatch run and the decoded roster.
//! Skills and sites are plain string identifiers.
//!
//! # Domain Mappings
//!
//! | u-roster | Rail maintenance | Healthcare | Security |
//! |----------|------------------|------------|----------|
//! | Resource | Track crew member | Nurse | Guard |
//! | Shift | Work window | Ward shift | Post shift |
//! | Site | Construction site | Ward | Venue |
//! | Roster | Crew dispatch plan | Duty roster | Guard rota |

mod problem;
mod resource;
mod roster;
mod shift;
mod timeslot;

pub use problem::DispatchProblem;
pub use resource::Resource;
pub use roster::{Assignment, Roster, RosterEntry, Violation, ViolationType};
pub use shift::Shift;
pub use timeslot::{Parity, SlotSpan, Timeslot};
