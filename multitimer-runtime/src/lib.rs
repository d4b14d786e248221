//! Multitimer Runtime - Core runtime for independent interval timers
//!
//! This crate provides the registry, per-timer state machine and tick
//! scheduling behind the `multitimer` facade.

mod config;
mod error;
mod event;
mod interval;
mod time_unit;
pub mod registry;
pub mod timer;

// Re-export public API
pub use crate::config::{load_toml_config, load_yaml_config, resolve_config_value};
pub use error::RegistryError;
pub use event::TimerEvent;
pub use interval::IntervalConfig;
pub use registry::{RegistryBuilder, TimerRegistry};
pub use time_unit::TimeUnit;
pub use timer::{TimerHandle, TimerId, TimerPhase, TimerRecord, TimerSnapshot};
