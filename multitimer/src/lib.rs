//! # Multitimer - Independent Interval Timers for Rust
//!
//! This library manages a dynamic set of count-up timers. Every timer ticks on
//! its own schedule, can be stopped or removed on its own, and steps by the
//! global interval that was current when it was created.
//!
//! ## Features
//!
//! - **Independent schedules**: each timer owns one Tokio task; no timer blocks another
//! - **Snapshot intervals**: changing the global interval only affects future timers
//! - **Clean cancellation**: a stopped or removed timer never ticks again
//! - **Change notifications**: subscribe to created/ticked/stopped/removed events
//! - **Config support**: use placeholders like `${timer.interval}` to read from config files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multitimer::{TimerEvent, TimerRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = TimerRegistry::builder()
//!         .initial_interval("2")
//!         .build()?;
//!
//!     let mut events = registry.subscribe();
//!     registry.adjust_global_interval(3);
//!     let slow = registry.create_timer();
//!
//!     while let Ok(event) = events.recv().await {
//!         if let TimerEvent::Ticked { id, elapsed } = event {
//!             println!("{} -> {}", id, elapsed);
//!             if elapsed >= 15 {
//!                 registry.remove_timer(&slow);
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/multitimer.yaml`:
//!
//! ```yaml
//! timer:
//!   interval: 2
//!   tick: 1s
//!   spawn_initial: true
//! ```
//!
//! and point the builder at it:
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), multitimer::RegistryError> {
//! let registry = multitimer::RegistryBuilder::with_yaml("config/multitimer.yaml")?
//!     .initial_interval("${timer.interval:1}")
//!     .tick_unit("${timer.tick:1s}")
//!     .spawn_initial("${timer.spawn_initial:true}")
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! You can also use environment variables with `APP_` prefix; nested keys
//! are joined with a double underscore:
//!
//! ```bash
//! export APP_TIMER__INTERVAL=5
//! export APP_TIMER__SPAWN_INITIAL=false
//! ```

// Re-export core types
pub use multitimer_runtime::{
    load_toml_config, load_yaml_config, IntervalConfig, RegistryBuilder, RegistryError,
    TimeUnit, TimerEvent, TimerHandle, TimerId, TimerPhase, TimerRecord, TimerRegistry,
    TimerSnapshot,
};

// Error type of `TimerRegistry::subscribe` receivers
pub use tokio::sync::broadcast::error::RecvError;

// Make multitimer_runtime available for advanced use
pub use multitimer_runtime;
