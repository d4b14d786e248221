/// The global step new timers are created with.
///
/// Owned by the registry and copied into each timer at creation, so a timer
/// never sees later adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalConfig {
    value: u64,
}

impl IntervalConfig {
    pub const FLOOR: u64 = 1;

    /// Values below the floor are raised to it.
    pub fn new(value: u64) -> Self {
        Self {
            value: value.max(Self::FLOOR),
        }
    }

    pub fn current(&self) -> u64 {
        self.value
    }

    /// Shift the interval by `delta`, clamping at the floor. Never fails and
    /// has no upper bound beyond `u64::MAX`.
    pub fn adjust(&mut self, delta: i64) -> u64 {
        let next = if delta.is_negative() {
            self.value.saturating_sub(delta.unsigned_abs())
        } else {
            self.value.saturating_add(delta.unsigned_abs())
        };
        self.value = next.max(Self::FLOOR);
        self.value
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self::new(Self::FLOOR)
    }
}
