mod handle;
mod id;
mod instance;

use serde::Serialize;

pub use handle::TimerHandle;
pub use id::TimerId;
pub use instance::{TimerPhase, TimerSnapshot};

pub(crate) use instance::TimerInstance;

/// Registry entry as seen by a renderer: which timer, and the interval it
/// captured when it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerRecord {
    pub id: TimerId,
    pub interval: u64,
}
