use std::time::Duration;

/// Wall-clock unit used to size a single timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    /// Parse TimeUnit from its full name, case-insensitively:
    /// "milliseconds", "seconds", "minutes", "hours", "days".
    /// For shorthand notations like "5s", "10m", use `parse_duration` instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "milliseconds" => Ok(TimeUnit::Milliseconds),
            "seconds" => Ok(TimeUnit::Seconds),
            "minutes" => Ok(TimeUnit::Minutes),
            "hours" => Ok(TimeUnit::Hours),
            "days" => Ok(TimeUnit::Days),
            _ => Err(format!("Invalid time unit: {}", s)),
        }
    }
}

impl TimeUnit {
    pub fn to_millis(&self, value: u64) -> u64 {
        let factor = match self {
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => 1000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
        };
        value.saturating_mul(factor)
    }

    pub fn to_duration(&self, value: u64) -> Duration {
        Duration::from_millis(self.to_millis(value))
    }

    /// Parse a duration string like "5s", "10m", "2h", "500ms"
    /// Returns (value, TimeUnit) if successful
    ///
    /// Strict rules:
    /// - Only lowercase suffixes are accepted: "ms", "s", "m", "h", "d"
    /// - Format must be: <number><suffix> (e.g., "5s", "100ms")
    /// - No spaces allowed between number and suffix
    pub fn parse_duration(s: &str) -> Option<(u64, TimeUnit)> {
        let s = s.trim();
        let split_pos = s.find(|c: char| !c.is_ascii_digit())?;
        if split_pos == 0 {
            return None;
        }

        let (num_str, unit_str) = s.split_at(split_pos);
        let value = num_str.parse::<u64>().ok()?;

        let time_unit = match unit_str {
            "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "m" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            "d" => TimeUnit::Days,
            _ => return None,
        };

        Some((value, time_unit))
    }
}

/// Parse the length of one tick unit.
///
/// Accepts shorthand (`"250ms"`, `"1s"`), a bare unit name (`"seconds"`, meaning
/// one of that unit) or a plain number of milliseconds. Zero-length ticks are
/// rejected.
pub(crate) fn parse_tick_unit(s: &str) -> Result<Duration, String> {
    let trimmed = s.trim();
    let duration = if let Some((value, unit)) = TimeUnit::parse_duration(trimmed) {
        unit.to_duration(value)
    } else if let Ok(unit) = trimmed.parse::<TimeUnit>() {
        unit.to_duration(1)
    } else {
        let millis = trimmed
            .parse::<u64>()
            .map_err(|_| format!("expected a duration like '1s' or '500ms', got '{}'", s))?;
        Duration::from_millis(millis)
    };

    if duration.is_zero() {
        return Err("tick unit must be longer than zero".to_string());
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_is_lowercase_only() {
        assert_eq!(TimeUnit::parse_duration("500ms"), Some((500, TimeUnit::Milliseconds)));
        assert_eq!(TimeUnit::parse_duration("2m"), Some((2, TimeUnit::Minutes)));
        assert_eq!(TimeUnit::parse_duration("2M"), None);
        assert_eq!(TimeUnit::parse_duration("s"), None);
        assert_eq!(TimeUnit::parse_duration("15"), None);
    }

    #[test]
    fn tick_unit_forms() {
        assert_eq!(parse_tick_unit("1s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_tick_unit("seconds"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_tick_unit("250"), Ok(Duration::from_millis(250)));
        assert!(parse_tick_unit("0ms").is_err());
        assert!(parse_tick_unit("soon").is_err());
    }

    #[test]
    fn conversions_saturate() {
        assert_eq!(TimeUnit::Days.to_millis(u64::MAX), u64::MAX);
        assert_eq!(TimeUnit::Minutes.to_duration(2), Duration::from_secs(120));
    }
}
