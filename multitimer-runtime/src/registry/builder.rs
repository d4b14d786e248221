use super::registry::TimerRegistry;
use crate::config::{load_toml_config, load_yaml_config, resolve_config_value};
use crate::error::RegistryError;
use crate::interval::IntervalConfig;
use crate::time_unit::parse_tick_unit;
use config::Config;
use std::path::Path;
use tokio::runtime::Handle;
use tracing::info;

const MAX_EVENT_CAPACITY: usize = 1 << 16;

/// Builder for a [`TimerRegistry`]
///
/// Every setting is a string that may be a literal or a config placeholder
/// such as `${timer.interval:1}`; placeholders are resolved in [`build`](Self::build).
pub struct RegistryBuilder {
    config: Config,
    initial_interval: String,
    tick_unit: String,
    spawn_initial: String,
    event_capacity: String,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a new registry builder with default config (empty)
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create with TOML config file
    pub fn with_toml<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        Ok(Self::with_config(load_toml_config(path)?))
    }

    /// Create with YAML config file
    pub fn with_yaml<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        Ok(Self::with_config(load_yaml_config(path)?))
    }

    /// Create with custom config
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            initial_interval: "1".to_string(),
            tick_unit: "1s".to_string(),
            spawn_initial: "true".to_string(),
            event_capacity: "64".to_string(),
        }
    }

    /// Global interval the registry starts with. Values below 1 clamp to 1.
    pub fn initial_interval(mut self, initial_interval: impl Into<String>) -> Self {
        self.initial_interval = initial_interval.into();
        self
    }

    /// Wall-clock length of one interval unit, e.g. `"1s"` or `"250ms"`.
    pub fn tick_unit(mut self, tick_unit: impl Into<String>) -> Self {
        self.tick_unit = tick_unit.into();
        self
    }

    /// Whether the registry starts with one timer already running.
    pub fn spawn_initial(mut self, spawn_initial: impl Into<String>) -> Self {
        self.spawn_initial = spawn_initial.into();
        self
    }

    /// Capacity of the change-notification channel.
    pub fn event_capacity(mut self, event_capacity: impl Into<String>) -> Self {
        self.event_capacity = event_capacity.into();
        self
    }

    /// Resolve all settings and build the registry.
    ///
    /// Must be called from within a Tokio runtime; tick tasks are spawned on
    /// the runtime current at this point.
    pub fn build(self) -> Result<TimerRegistry, RegistryError> {
        let runtime = Handle::try_current()?;

        let initial_interval = resolve_config_value(&self.initial_interval, &self.config)?;
        let interval = IntervalConfig::new(parse_interval(&initial_interval)?);

        let tick_unit_str = resolve_config_value(&self.tick_unit, &self.config)?;
        let tick_unit = parse_tick_unit(&tick_unit_str)
            .map_err(|reason| RegistryError::invalid("tick_unit", &tick_unit_str, reason))?;

        let spawn_initial_str = resolve_config_value(&self.spawn_initial, &self.config)?;
        let spawn_initial = parse_flag("spawn_initial", &spawn_initial_str)?;

        let event_capacity_str = resolve_config_value(&self.event_capacity, &self.config)?;
        let event_capacity = parse_capacity(&event_capacity_str)?;

        info!(
            initial_interval = interval.current(),
            tick_unit_ms = tick_unit.as_millis() as u64,
            spawn_initial,
            event_capacity,
            "Building timer registry"
        );

        let registry = TimerRegistry::from_parts(interval, tick_unit, event_capacity, runtime);
        if spawn_initial {
            registry.create_timer();
        }
        Ok(registry)
    }
}

// Negative values are accepted and clamp to the floor like any adjustment.
fn parse_interval(value: &str) -> Result<u64, RegistryError> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<u64>() {
        return Ok(parsed);
    }
    match trimmed.parse::<i64>() {
        Ok(negative) if negative < 0 => Ok(0),
        _ => Err(RegistryError::invalid(
            "initial_interval",
            value,
            "expected a whole number",
        )),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, RegistryError> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(RegistryError::invalid(key, value, "expected 'true' or 'false'")),
    }
}

fn parse_capacity(value: &str) -> Result<usize, RegistryError> {
    match value.trim().parse::<usize>() {
        Ok(capacity) if (1..=MAX_EVENT_CAPACITY).contains(&capacity) => Ok(capacity),
        _ => Err(RegistryError::invalid(
            "event_capacity",
            value,
            format!("expected a number between 1 and {}", MAX_EVENT_CAPACITY),
        )),
    }
}
