//! Scheduling boundary between the game core and its driver
//!
//! The core never owns a clock. Every entry point returns a [`Transition`]
//! telling the driver whether to do nothing, to deliver one timer event after
//! a delay, or to stop. [`Scheduler`] is a single-slot pending timer that a
//! driver can use to honour those transitions: arming a new event replaces
//! whatever was pending, so at most one timer is ever outstanding.

use std::time::Duration;

use crate::types::EndReason;

/// Timer-driven events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Gravity / spawn / lock step
    Advance,
    /// Next line-clear flash step
    AnimationStep,
}

/// Outcome of every state machine entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing new to schedule.
    Idle,
    /// Deliver `event` after `after`.
    Schedule { event: TimerEvent, after: Duration },
    /// The session is over.
    End(EndReason),
}

impl Transition {
    pub fn schedule(event: TimerEvent, after: Duration) -> Self {
        Transition::Schedule { event, after }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Transition::End(_))
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            Transition::End(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Single pending timer, driven by elapsed time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Option<(TimerEvent, Duration)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition: `Schedule` replaces the pending event, `End`
    /// disarms, `Idle` leaves it alone.
    pub fn arm(&mut self, transition: &Transition) {
        match *transition {
            Transition::Idle => {}
            Transition::Schedule { event, after } => self.pending = Some((event, after)),
            Transition::End(_) => self.pending = None,
        }
    }

    pub fn pending(&self) -> Option<TimerEvent> {
        self.pending.map(|(event, _)| event)
    }

    /// Time until the pending event is due.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|(_, left)| left)
    }

    /// Let time pass. Returns the pending event once it is due and disarms.
    pub fn elapse(&mut self, elapsed: Duration) -> Option<TimerEvent> {
        let (event, left) = self.pending?;
        if elapsed >= left {
            self.pending = None;
            Some(event)
        } else {
            self.pending = Some((event, left - elapsed));
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
