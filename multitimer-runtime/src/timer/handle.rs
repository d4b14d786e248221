use super::id::TimerId;
use super::instance::{TimerCore, TimerPhase, TimerSnapshot};
use crate::registry::Shared;
use std::sync::{Arc, Weak};

/// Per-timer control surface handed to a presentation layer.
///
/// `stop` and `close` are routed through the owning registry while it is
/// alive, so they converge on the same teardown as
/// [`TimerRegistry::stop`](crate::TimerRegistry::stop) and
/// [`TimerRegistry::remove_timer`](crate::TimerRegistry::remove_timer).
#[derive(Debug, Clone)]
pub struct TimerHandle {
    core: Arc<TimerCore>,
    registry: Weak<Shared>,
}

impl TimerHandle {
    pub(crate) fn new(core: Arc<TimerCore>, registry: Weak<Shared>) -> Self {
        Self { core, registry }
    }

    pub fn id(&self) -> TimerId {
        self.core.id()
    }

    pub fn interval(&self) -> u64 {
        self.core.interval()
    }

    pub fn elapsed(&self) -> u64 {
        self.core.snapshot().elapsed
    }

    pub fn is_running(&self) -> bool {
        self.core.phase() == TimerPhase::Running
    }

    pub fn phase(&self) -> TimerPhase {
        self.core.phase()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.core.snapshot()
    }

    /// Stop ticking; the timer stays registered. No-op unless running.
    pub fn stop(&self) {
        match self.registry.upgrade() {
            Some(shared) => shared.stop(&self.core.id()),
            None => {
                self.core.stop();
            }
        }
    }

    /// Ask the registry to drop this timer. No-op if already removed.
    pub fn close(&self) {
        match self.registry.upgrade() {
            Some(shared) => shared.remove(&self.core.id()),
            None => {
                self.core.close();
            }
        }
    }
}
