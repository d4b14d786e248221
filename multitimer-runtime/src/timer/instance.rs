use super::id::TimerId;
use crate::event::TimerEvent;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

// Anything longer never ticks in practice, and keeps deadline arithmetic
// inside tokio's clock range.
const MAX_PERIOD: Duration = Duration::from_secs(u32::MAX as u64);

/// Lifecycle phase of a single timer.
///
/// `Running` is entered at construction. `Stopped` freezes the counter but
/// keeps the timer registered. `Removed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Running,
    Stopped,
    Removed,
}

/// Point-in-time view of a timer for a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub id: TimerId,
    pub interval: u64,
    pub elapsed: u64,
    pub running: bool,
}

#[derive(Debug)]
struct TimerState {
    elapsed: u64,
    phase: TimerPhase,
}

/// State shared between a timer's tick task, its registry entry and any
/// [`TimerHandle`](super::TimerHandle). Every transition happens under `state`.
#[derive(Debug)]
pub(crate) struct TimerCore {
    id: TimerId,
    interval: u64,
    state: Mutex<TimerState>,
    events: broadcast::Sender<TimerEvent>,
}

impl TimerCore {
    fn new(id: TimerId, interval: u64, events: broadcast::Sender<TimerEvent>) -> Self {
        Self {
            id,
            interval,
            state: Mutex::new(TimerState {
                elapsed: 0,
                phase: TimerPhase::Running,
            }),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn id(&self) -> TimerId {
        self.id
    }

    pub(crate) fn interval(&self) -> u64 {
        self.interval
    }

    /// Apply one tick. Returns `false` once the timer has left `Running`,
    /// which ends the tick loop without touching the counter.
    fn tick(&self) -> bool {
        let mut state = self.lock();
        if state.phase != TimerPhase::Running {
            return false;
        }

        let before = state.elapsed;
        state.elapsed = before.saturating_add(self.interval);
        if state.elapsed != before {
            trace!(timer_id = %self.id, elapsed = state.elapsed, "Tick");
            let _ = self.events.send(TimerEvent::Ticked {
                id: self.id,
                elapsed: state.elapsed,
            });
        }
        true
    }

    /// Running -> Stopped. Returns whether the phase changed.
    pub(crate) fn stop(&self) -> bool {
        let mut state = self.lock();
        if state.phase != TimerPhase::Running {
            return false;
        }
        state.phase = TimerPhase::Stopped;
        debug!(timer_id = %self.id, elapsed = state.elapsed, "Timer stopped");
        let _ = self.events.send(TimerEvent::Stopped {
            id: self.id,
            elapsed: state.elapsed,
        });
        true
    }

    /// Running | Stopped -> Removed. Returns whether the phase changed.
    pub(crate) fn close(&self) -> bool {
        let mut state = self.lock();
        if state.phase == TimerPhase::Removed {
            return false;
        }
        state.phase = TimerPhase::Removed;
        let _ = self.events.send(TimerEvent::Removed { id: self.id });
        true
    }

    pub(crate) fn phase(&self) -> TimerPhase {
        self.lock().phase
    }

    pub(crate) fn snapshot(&self) -> TimerSnapshot {
        let state = self.lock();
        TimerSnapshot {
            id: self.id,
            interval: self.interval,
            elapsed: state.elapsed,
            running: state.phase == TimerPhase::Running,
        }
    }
}

/// A live timer owned by the registry: its shared state plus the task that
/// ticks it.
///
/// Dropping the instance closes it, so handles that outlive the registry see
/// `Removed` rather than a timer that claims to run but never ticks.
#[derive(Debug)]
pub(crate) struct TimerInstance {
    core: Arc<TimerCore>,
    task: JoinHandle<()>,
}

impl TimerInstance {
    /// Create a timer in `Running` and spawn its tick loop on `runtime`.
    ///
    /// The first tick lands one full period after creation.
    pub(crate) fn start(
        id: TimerId,
        interval: u64,
        tick_unit: Duration,
        events: broadcast::Sender<TimerEvent>,
        runtime: &Handle,
    ) -> Self {
        let core = Arc::new(TimerCore::new(id, interval, events));
        let period = period_for(tick_unit, interval);

        let ticking = Arc::clone(&core);
        let task = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if !ticking.tick() {
                    break;
                }
            }
            trace!(timer_id = %ticking.id(), "Tick loop finished");
        });

        Self { core, task }
    }

    pub(crate) fn id(&self) -> TimerId {
        self.core.id()
    }

    pub(crate) fn interval(&self) -> u64 {
        self.core.interval()
    }

    pub(crate) fn snapshot(&self) -> TimerSnapshot {
        self.core.snapshot()
    }

    pub(crate) fn core(&self) -> &Arc<TimerCore> {
        &self.core
    }

    /// Stop ticking. The phase flips before the task is aborted, so a tick
    /// already queued finds the timer stopped and does nothing.
    pub(crate) fn stop(&self) -> bool {
        let changed = self.core.stop();
        self.task.abort();
        changed
    }

    /// Tear down unconditionally; safe on a stopped timer.
    pub(crate) fn close(&self) -> bool {
        let changed = self.core.close();
        self.task.abort();
        changed
    }
}

impl Drop for TimerInstance {
    fn drop(&mut self) {
        self.close();
    }
}

fn period_for(tick_unit: Duration, interval: u64) -> Duration {
    u32::try_from(interval)
        .ok()
        .and_then(|n| tick_unit.checked_mul(n))
        .map_or(MAX_PERIOD, |period| period.min(MAX_PERIOD))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(interval: u64) -> (TimerInstance, broadcast::Receiver<TimerEvent>) {
        let (events, rx) = broadcast::channel(64);
        let instance = TimerInstance::start(
            TimerId::from_raw(1),
            interval,
            Duration::from_secs(1),
            events,
            &Handle::current(),
        );
        (instance, rx)
    }

    #[test]
    fn period_scales_with_interval() {
        assert_eq!(period_for(Duration::from_millis(250), 4), Duration::from_secs(1));
        assert_eq!(period_for(Duration::from_secs(1), u64::MAX), MAX_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn starts_running_at_zero() {
        let (instance, _rx) = start(3);
        let snapshot = instance.snapshot();
        assert_eq!(snapshot.elapsed, 0);
        assert!(snapshot.running);
        assert_eq!(instance.core().phase(), TimerPhase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_is_a_multiple_of_interval() {
        let (instance, _rx) = start(3);
        tokio::time::sleep(Duration::from_millis(12_500)).await;
        assert_eq!(instance.snapshot().elapsed, 12);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_elapsed() {
        let (instance, _rx) = start(1);
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(instance.stop());
        assert!(!instance.stop());

        tokio::time::sleep(Duration::from_secs(10)).await;
        let snapshot = instance.snapshot();
        assert_eq!(snapshot.elapsed, 2);
        assert!(!snapshot.running);
        assert_eq!(instance.core().phase(), TimerPhase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn close_is_idempotent_and_terminal() {
        let (instance, _rx) = start(1);
        instance.stop();
        assert!(instance.close());
        assert!(!instance.close());
        assert!(!instance.stop());
        assert_eq!(instance.core().phase(), TimerPhase::Removed);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_instance_closes_it() {
        let (instance, mut rx) = start(1);
        let core = Arc::clone(instance.core());
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        drop(instance);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(core.phase(), TimerPhase::Removed);
        assert_eq!(core.snapshot().elapsed, 1);

        let id = core.id();
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Ticked { id, elapsed: 1 });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Removed { id });
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn snapshot_serializes_for_renderers() {
        let snapshot = TimerSnapshot {
            id: TimerId::from_raw(7),
            interval: 3,
            elapsed: 9,
            running: false,
        };
        assert_eq!(
            serde_json::to_value(snapshot).unwrap(),
            serde_json::json!({ "id": 7, "interval": 3, "elapsed": 9, "running": false })
        );
        assert_eq!(
            serde_json::to_value(TimerPhase::Stopped).unwrap(),
            serde_json::json!("stopped")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn queued_tick_after_stop_is_discarded() {
        let (instance, _rx) = start(1);
        instance.core().stop();
        // Simulate a tick that was already queued when the stop landed.
        assert!(!instance.core().tick());
        assert_eq!(instance.snapshot().elapsed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn events_follow_transitions() {
        let (instance, mut rx) = start(2);
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        instance.stop();
        instance.close();

        let id = instance.id();
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Ticked { id, elapsed: 2 });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Ticked { id, elapsed: 4 });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Stopped { id, elapsed: 4 });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Removed { id });
        assert!(rx.try_recv().is_err());
    }
}
