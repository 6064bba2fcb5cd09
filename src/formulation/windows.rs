//! Rolling-window enumeration.
//!
//! A window of `width` day-cycles starting at `start` spans timeslots
//! `[start, start + 2·width)`. Only odd (day-anchored) starts are valid:
//! the day/night pattern repeats every two timeslots, so an even start
//! would only repeat an overlapping odd-anchored window.

use crate::models::SlotSpan;

/// Valid window starts for a horizon `1..=horizon`.
///
/// Returns every odd `start` with `start + 2·width - 1 ≤ horizon`. A window
/// wider than the horizon yields no starts.
///
/// # Examples
///
/// ```
/// use u_roster::formulation::window_starts;
///
/// assert_eq!(window_starts(22, 9), vec![1, 3, 5]);
/// assert!(window_starts(10, 9).is_empty());
/// ```
pub fn window_starts(horizon: u32, width: u32) -> Vec<u32> {
    let Some(span) = width.checked_mul(2) else {
        return Vec::new();
    };
    if width == 0 || span > horizon {
        return Vec::new();
    }
    (1..=horizon - span + 1).step_by(2).collect()
}

/// Valid windows as slot spans.
pub fn window_spans(horizon: u32, width: u32) -> Vec<SlotSpan> {
    window_starts(horizon, width)
        .into_iter()
        .map(|start| SlotSpan::cycles(start, width))
        .collect()
}
