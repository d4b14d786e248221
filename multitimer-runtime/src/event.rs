use crate::timer::TimerId;
use serde::Serialize;

/// Change notification published by a [`TimerRegistry`](crate::TimerRegistry).
///
/// Only real state changes are published: a repeated stop, a no-op interval
/// adjustment or removing an unknown id emit nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Created { id: TimerId, interval: u64 },
    Ticked { id: TimerId, elapsed: u64 },
    Stopped { id: TimerId, elapsed: u64 },
    Removed { id: TimerId },
    IntervalChanged { interval: u64 },
}

impl TimerEvent {
    /// The timer this event concerns, if any.
    pub fn timer_id(&self) -> Option<TimerId> {
        match self {
            Self::Created { id, .. }
            | Self::Ticked { id, .. }
            | Self::Stopped { id, .. }
            | Self::Removed { id } => Some(*id),
            Self::IntervalChanged { .. } => None,
        }
    }
}
