//! Timeslot and slot-span models.
//!
//! The planning horizon is a sequence of discrete timeslots `1..=horizon`.
//!
//! # Parity Convention
//! Odd timeslots are day shifts, even timeslots are night shifts. One
//! day-cycle therefore covers two consecutive timeslots, and a span of
//! `w` cycles starting at an odd slot covers `[start, start + 2w)`.
//! The convention is fixed; it is not configurable per instance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete timeslot index (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeslot(pub u32);

/// Day/night classification of a timeslot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// Odd timeslot.
    Day,
    /// Even timeslot.
    Night,
}

impl Timeslot {
    /// Creates a timeslot.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Day or night, by index parity.
    #[inline]
    pub const fn parity(self) -> Parity {
        if self.0 % 2 == 1 {
            Parity::Day
        } else {
            Parity::Night
        }
    }

    #[inline]
    pub const fn is_day(self) -> bool {
        matches!(self.parity(), Parity::Day)
    }

    #[inline]
    pub const fn is_night(self) -> bool {
        matches!(self.parity(), Parity::Night)
    }

    /// The timeslot immediately after this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether the index lies in `1..=horizon`.
    #[inline]
    pub const fn within_horizon(self, horizon: u32) -> bool {
        self.0 >= 1 && self.0 <= horizon
    }
}

impl From<u32> for Timeslot {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open span of timeslots `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpan {
    /// First timeslot (inclusive).
    pub start: u32,
    /// End timeslot (exclusive).
    pub end: u32,
}

impl SlotSpan {
    /// Creates a span `[start, end)`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Span of `cycles` day-cycles starting at `start`: `[start, start + 2·cycles)`.
    pub fn cycles(start: u32, cycles: u32) -> Self {
        Self::new(start, start + 2 * cycles)
    }

    /// Number of timeslots covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a timeslot falls within this span.
    #[inline]
    pub fn contains(&self, slot: Timeslot) -> bool {
        slot.0 >= self.start && slot.0 < self.end
    }

    /// Whether the whole span lies inside `1..=horizon`.
    pub fn fits(&self, horizon: u32) -> bool {
        self.start >= 1 && self.end <= horizon + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity() {
        assert_eq!(Timeslot(1).parity(), Parity::Day);
        assert_eq!(Timeslot(2).parity(), Parity::Night);
        assert!(Timeslot(59).is_day());
        assert!(Timeslot(60).is_night());
    }

    #[test]
    fn test_within_horizon() {
        assert!(!Timeslot(0).within_horizon(10));
        assert!(Timeslot(1).within_horizon(10));
        assert!(Timeslot(10).within_horizon(10));
        assert!(!Timeslot(11).within_horizon(10));
    }

    #[test]
    fn test_cycle_span() {
        let span = SlotSpan::cycles(1, 9);
        assert_eq!(span, SlotSpan::new(1, 19));
        assert_eq!(span.len(), 18);
        assert!(span.contains(Timeslot(1)));
        assert!(span.contains(Timeslot(18)));
        assert!(!span.contains(Timeslot(19))); // exclusive end
    }

    #[test]
    fn test_span_fits() {
        assert!(SlotSpan::cycles(1, 9).fits(18));
        assert!(!SlotSpan::cycles(1, 9).fits(17));
        assert!(SlotSpan::cycles(3, 1).fits(4));
        assert!(!SlotSpan::new(0, 2).fits(10));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Timeslot(7)).unwrap();
        assert_eq!(json, "7");
    }
}
