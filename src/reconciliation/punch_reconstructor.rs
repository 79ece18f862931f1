//! Punch reconstruction.
//!
//! Turns an unordered, possibly malformed punch stream into worked minutes
//! with a small per-staff state machine:
//!
//! | State    | `clock_in`              | `break_out`      | `break_in`                      | `clock_out`                     |
//! |----------|-------------------------|------------------|---------------------------------|---------------------------------|
//! | Idle     | open segment → Working  | ignored          | ignored                         | ignored                         |
//! | Working  | discard, reopen         | → OnBreak        | ignored                         | credit to punch → Idle          |
//! | OnBreak  | discard, reopen         | ignored          | credit to break, reopen → Working | credit to break → Idle        |
//!
//! A segment still open after the last punch is closed at the window end
//! (Working) or at its break boundary (OnBreak).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::models::{PunchAction, PunchEvent, ReconciliationWarning, ReconciliationWindow, StaffKey};

use super::staff_key::resolve_staff_key;
use super::time::{quoted, whole_minutes_between};

/// Where a staff member stands in their punch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PunchState {
    /// No open segment.
    #[default]
    Idle,
    /// Clocked in and working.
    Working {
        /// Start of the open segment.
        segment_start: DateTime<Utc>,
    },
    /// Clocked in and on a break.
    OnBreak {
        /// Start of the segment the break interrupted.
        segment_start: DateTime<Utc>,
        /// When the break began.
        break_start: DateTime<Utc>,
    },
}

/// A punch whose timestamp has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedPunch {
    /// What was punched.
    pub action: PunchAction,
    /// When it was punched.
    pub at: DateTime<Utc>,
}

impl TimedPunch {
    /// Creates a timed punch.
    pub fn new(action: PunchAction, at: DateTime<Utc>) -> Self {
        Self { action, at }
    }
}

/// The punch state machine for a single staff key.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchAction;
/// use attendance_engine::reconciliation::PunchMachine;
/// use chrono::{TimeZone, Utc};
///
/// let at = |h, m| Utc.with_ymd_and_hms(2026, 1, 13, h, m, 0).unwrap();
///
/// let mut machine = PunchMachine::new();
/// machine.apply(PunchAction::ClockIn, at(9, 0));
/// machine.apply(PunchAction::BreakOut, at(12, 0));
/// machine.apply(PunchAction::BreakIn, at(12, 30));
/// machine.apply(PunchAction::ClockOut, at(17, 0));
///
/// assert_eq!(machine.finish(at(23, 0)), 450);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PunchMachine {
    state: PunchState,
    credited_minutes: i64,
}

impl PunchMachine {
    /// Creates a machine in the [`PunchState::Idle`] state with nothing credited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> PunchState {
        self.state
    }

    /// Returns the minutes credited by closed segments so far.
    pub fn credited_minutes(&self) -> i64 {
        self.credited_minutes
    }

    /// Applies one punch. Punches must arrive in time order.
    pub fn apply(&mut self, action: PunchAction, at: DateTime<Utc>) {
        self.state = match (self.state, action) {
            (state, PunchAction::ClockIn) => {
                if state != PunchState::Idle {
                    trace!(?state, %at, "clock_in over open segment, discarding it");
                }
                PunchState::Working { segment_start: at }
            }
            (PunchState::Working { segment_start }, PunchAction::BreakOut) => {
                PunchState::OnBreak {
                    segment_start,
                    break_start: at,
                }
            }
            (
                PunchState::OnBreak {
                    segment_start,
                    break_start,
                },
                PunchAction::BreakIn,
            ) => {
                self.credit(segment_start, break_start);
                PunchState::Working { segment_start: at }
            }
            (PunchState::Working { segment_start }, PunchAction::ClockOut) => {
                self.credit(segment_start, at);
                PunchState::Idle
            }
            (
                PunchState::OnBreak {
                    segment_start,
                    break_start,
                },
                PunchAction::ClockOut,
            ) => {
                self.credit(segment_start, break_start);
                PunchState::Idle
            }
            (state, action) => {
                trace!(?state, ?action, %at, "ignoring punch with no matching transition");
                state
            }
        };
    }

    /// Closes any open segment and returns the total worked minutes.
    ///
    /// An open working segment runs to `window_end`; an open break credits
    /// only up to the break boundary.
    pub fn finish(mut self, window_end: DateTime<Utc>) -> i64 {
        match self.state {
            PunchState::Idle => {}
            PunchState::Working { segment_start } => self.credit(segment_start, window_end),
            PunchState::OnBreak {
                segment_start,
                break_start,
            } => self.credit(segment_start, break_start),
        }
        self.credited_minutes
    }

    fn credit(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.credited_minutes += whole_minutes_between(start, end);
    }
}

/// Reconstructs worked minutes for one staff key.
///
/// Punches outside `[window.start, window.end)` are dropped, the rest are
/// sorted by time (punches sharing an instant run in the order clock_in,
/// break_out, break_in, clock_out) and fed through a [`PunchMachine`].
pub fn reconstruct_worked_minutes(punches: &[TimedPunch], window: &ReconciliationWindow) -> i64 {
    let mut in_window: Vec<TimedPunch> = punches
        .iter()
        .copied()
        .filter(|punch| window.contains(punch.at))
        .collect();
    in_window.sort_by_key(|punch| (punch.at, punch.action.rank()));

    let mut machine = PunchMachine::new();
    for punch in &in_window {
        machine.apply(punch.action, punch.at);
    }
    machine.finish(window.end)
}

/// Actual minutes per staff key, plus warnings for skipped punches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunchReconstruction {
    /// Worked minutes per key. Every key with a well-formed punch has an
    /// entry, zero when none of its punches fall inside the window.
    pub minutes: HashMap<StaffKey, i64>,
    /// One warning per punch skipped for an unparsable timestamp.
    pub skipped: Vec<ReconciliationWarning>,
}

/// Groups punches by staff key and reconstructs each key independently.
pub fn reconstruct_actual_minutes(
    punches: &[PunchEvent],
    window: &ReconciliationWindow,
) -> PunchReconstruction {
    let mut grouped: HashMap<StaffKey, Vec<TimedPunch>> = HashMap::new();
    let mut skipped = Vec::new();

    for (index, punch) in punches.iter().enumerate() {
        let Some(at) = punch.timestamp() else {
            debug!(punch = index, at = ?punch.at, "Skipping punch with malformed timestamp");
            skipped.push(ReconciliationWarning::low(
                ReconciliationWarning::MALFORMED_PUNCH,
                format!(
                    "Punch #{} ({:?}) skipped: unparsable timestamp {}",
                    index,
                    punch.action,
                    quoted(punch.at.as_deref())
                ),
            ));
            continue;
        };

        grouped
            .entry(resolve_staff_key(&punch.identity))
            .or_default()
            .push(TimedPunch::new(punch.action, at));
    }

    let minutes = grouped
        .into_iter()
        .map(|(key, timed)| {
            let worked = reconstruct_worked_minutes(&timed, window);
            (key, worked)
        })
        .collect();

    PunchReconstruction { minutes, skipped }
}
