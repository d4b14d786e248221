use crate::error::RegistryError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config, RegistryError> {
    load_config(path.as_ref(), FileFormat::Toml)
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config, RegistryError> {
    load_config(path.as_ref(), FileFormat::Yaml)
}

// File values first, then `APP_`-prefixed environment overrides.
fn load_config(path: &Path, format: FileFormat) -> Result<Config, RegistryError> {
    let config = Config::builder()
        .add_source(File::from(path).format(format))
        .add_source(env_overrides())
        .build()?;
    Ok(config)
}

/// `APP_TIMER__SPAWN_INITIAL` maps to `timer.spawn_initial`: nesting uses a
/// double underscore so multi-word keys stay intact.
fn env_overrides() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

/// Resolve config placeholder like `${timer.interval}` or `${timer.interval:1}`
///
/// Values that are not wrapped in `${...}` are returned as-is.
pub fn resolve_config_value(value: &str, config: &Config) -> Result<String, RegistryError> {
    let Some(inner) = value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Ok(value.to_string());
    };

    match inner.split_once(':') {
        Some((key, default_value)) => Ok(config
            .get_string(key)
            .unwrap_or_else(|_| default_value.to_string())),
        None => Ok(config.get_string(inner)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_config(contents: &str) -> Config {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        load_yaml_config(file.path()).unwrap()
    }

    #[test]
    fn literal_values_pass_through() {
        let config = Config::default();
        assert_eq!(resolve_config_value("3", &config).unwrap(), "3");
        assert_eq!(resolve_config_value("${oops", &config).unwrap(), "${oops");
    }

    #[test]
    fn placeholder_reads_from_yaml() {
        let config = yaml_config("timer:\n  interval: 4\n  tick: 250ms\n");
        assert_eq!(resolve_config_value("${timer.interval}", &config).unwrap(), "4");
        assert_eq!(resolve_config_value("${timer.tick:1s}", &config).unwrap(), "250ms");
    }

    #[test]
    fn placeholder_falls_back_to_default() {
        let config = Config::default();
        assert_eq!(resolve_config_value("${timer.interval:7}", &config).unwrap(), "7");
    }

    #[test]
    fn missing_key_without_default_is_an_error() {
        let config = Config::default();
        let err = resolve_config_value("${timer.interval}", &config).unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
    }

    #[test]
    fn env_overrides_keep_multi_word_keys() {
        let vars = config::Map::from([
            ("APP_TIMER__SPAWN_INITIAL".to_string(), "false".to_string()),
            ("APP_TIMER__EVENT_CAPACITY".to_string(), "8".to_string()),
            ("APP_TIMER__INTERVAL".to_string(), "4".to_string()),
        ]);
        let config = Config::builder()
            .add_source(env_overrides().source(Some(vars)))
            .build()
            .unwrap();

        assert_eq!(
            resolve_config_value("${timer.spawn_initial}", &config).unwrap(),
            "false"
        );
        assert_eq!(
            resolve_config_value("${timer.event_capacity}", &config).unwrap(),
            "8"
        );
        assert_eq!(resolve_config_value("${timer.interval}", &config).unwrap(), "4");
    }

    #[test]
    fn toml_file_loads() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(b"[timer]\nspawn_initial = false\n").unwrap();
        let config = load_toml_config(file.path()).unwrap();
        assert_eq!(
            resolve_config_value("${timer.spawn_initial}", &config).unwrap(),
            "false"
        );
    }
}
