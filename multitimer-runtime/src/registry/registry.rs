use super::builder::RegistryBuilder;
use crate::event::TimerEvent;
use crate::interval::IntervalConfig;
use crate::timer::{TimerHandle, TimerId, TimerInstance, TimerRecord, TimerSnapshot};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::info;

/// Set of live timers plus the global interval they are created with.
///
/// Cheap to clone; every clone drives the same set. Dropping the last clone
/// aborts all remaining tick tasks.
///
/// ```rust,no_run
/// use multitimer_runtime::TimerRegistry;
///
/// # async fn demo() -> Result<(), multitimer_runtime::RegistryError> {
/// let registry = TimerRegistry::builder()
///     .spawn_initial("false")
///     .build()?;
///
/// registry.adjust_global_interval(1);
/// let id = registry.create_timer();
/// assert_eq!(registry.list_timers()[0].interval, 2);
///
/// registry.remove_timer(&id);
/// assert!(registry.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TimerRegistry {
    shared: Arc<Shared>,
}

#[derive(Debug)]
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    events: broadcast::Sender<TimerEvent>,
    tick_unit: Duration,
    runtime: Handle,
}

// Ids are allocated in increasing order, so key order is creation order.
#[derive(Debug)]
struct Inner {
    interval: IntervalConfig,
    next_id: u64,
    timers: BTreeMap<TimerId, TimerInstance>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create(&self) -> TimerId {
        let mut inner = self.lock();
        let interval = inner.interval.current();
        let id = TimerId::from_raw(inner.next_id);
        inner.next_id = inner.next_id.saturating_add(1);
        debug_assert!(
            !inner.timers.contains_key(&id),
            "timer id {id} allocated twice"
        );

        let _ = self.events.send(TimerEvent::Created { id, interval });
        let instance = TimerInstance::start(
            id,
            interval,
            self.tick_unit,
            self.events.clone(),
            &self.runtime,
        );
        inner.timers.insert(id, instance);

        info!(timer_id = %id, interval, active = inner.timers.len(), "Timer created");
        id
    }

    // The entry leaves the map and its task is cancelled under one lock, so
    // no observer sees a listed timer that can no longer tick or vice versa.
    pub(crate) fn remove(&self, id: &TimerId) {
        let mut inner = self.lock();
        if let Some(instance) = inner.timers.remove(id) {
            instance.close();
            info!(timer_id = %id, active = inner.timers.len(), "Timer removed");
        }
    }

    pub(crate) fn stop(&self, id: &TimerId) {
        let inner = self.lock();
        if let Some(instance) = inner.timers.get(id) {
            if instance.stop() {
                info!(timer_id = %id, elapsed = instance.snapshot().elapsed, "Timer stopped");
            }
        }
    }

    fn adjust(&self, delta: i64) -> u64 {
        let mut inner = self.lock();
        let before = inner.interval.current();
        let after = inner.interval.adjust(delta);
        if after != before {
            info!(from = before, to = after, "Global interval changed");
            let _ = self.events.send(TimerEvent::IntervalChanged { interval: after });
        }
        after
    }

    fn shutdown(&self) {
        let mut inner = self.lock();
        let timers = std::mem::take(&mut inner.timers);
        let count = timers.len();
        for instance in timers.values() {
            instance.close();
        }
        info!(removed = count, "Timer registry shut down");
    }
}

impl TimerRegistry {
    /// Start configuring a registry with default settings.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(
        interval: IntervalConfig,
        tick_unit: Duration,
        event_capacity: usize,
        runtime: Handle,
    ) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    interval,
                    next_id: 1,
                    timers: BTreeMap::new(),
                }),
                events,
                tick_unit,
                runtime,
            }),
        }
    }

    /// Add a running timer at the current global interval.
    ///
    /// Later calls to [`adjust_global_interval`](Self::adjust_global_interval)
    /// do not affect it.
    pub fn create_timer(&self) -> TimerId {
        self.shared.create()
    }

    /// Remove a timer and cancel its schedule. Unknown ids are ignored, so
    /// removing twice is harmless.
    pub fn remove_timer(&self, id: &TimerId) {
        self.shared.remove(id);
    }

    /// Freeze a timer's counter. It stays listed until removed. Unknown or
    /// already stopped ids are ignored.
    pub fn stop(&self, id: &TimerId) {
        self.shared.stop(id);
    }

    /// Shift the interval used by future timers; returns the new value,
    /// clamped to at least 1.
    pub fn adjust_global_interval(&self, delta: i64) -> u64 {
        self.shared.adjust(delta)
    }

    pub fn global_interval(&self) -> u64 {
        self.shared.lock().interval.current()
    }

    /// Wall-clock length of one interval unit.
    pub fn tick_unit(&self) -> Duration {
        self.shared.tick_unit
    }

    /// Live timers in creation order.
    pub fn list_timers(&self) -> Vec<TimerRecord> {
        self.shared
            .lock()
            .timers
            .values()
            .map(|instance| TimerRecord {
                id: instance.id(),
                interval: instance.interval(),
            })
            .collect()
    }

    /// Current state of every live timer, in creation order.
    pub fn snapshots(&self) -> Vec<TimerSnapshot> {
        self.shared
            .lock()
            .timers
            .values()
            .map(TimerInstance::snapshot)
            .collect()
    }

    pub fn snapshot(&self, id: &TimerId) -> Option<TimerSnapshot> {
        self.shared.lock().timers.get(id).map(TimerInstance::snapshot)
    }

    /// Control handle for one timer, if it is still registered.
    pub fn handle(&self, id: &TimerId) -> Option<TimerHandle> {
        self.shared
            .lock()
            .timers
            .get(id)
            .map(|instance| {
                TimerHandle::new(Arc::clone(instance.core()), Arc::downgrade(&self.shared))
            })
    }

    pub fn contains(&self, id: &TimerId) -> bool {
        self.shared.lock().timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shared.lock().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().timers.is_empty()
    }

    /// Receive change notifications from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.shared.events.subscribe()
    }

    /// Remove every timer.
    pub fn shutdown(&self) {
        self.shared.shutdown();
    }
}
