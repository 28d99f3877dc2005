//! Configuration for the qcore CLI.
//!
//! Supports loading configuration from:
//! 1. A YAML configuration file
//! 2. Environment variables (with `QCORE_` prefix)
//! 3. `.env` files
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use qcore_sim::{SamplingMode, SimulatorConfig};

use crate::logging::LogFormat;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulator limits and sampling.
    pub simulator: SimulatorConfig,

    /// Exercise catalog location.
    pub exercises: ExercisesConfig,

    /// Log output.
    pub logging: LoggingConfig,
}

/// Exercise catalog settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExercisesConfig {
    /// Path to the JSON catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration: `.env`, then the file if given, then
    /// environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QCORE_*` overrides.
    ///
    /// Variables that are absent leave the corresponding fields unchanged.
    /// A variable that is present but unparseable is an error.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Simulator
        if let Some(v) = parse_var(&lookup, "QCORE_MAX_QUBITS")? {
            self.simulator.max_qubits = v;
        }
        if let Some(v) = parse_var(&lookup, "QCORE_DEFAULT_SHOTS")? {
            self.simulator.default_shots = v;
        }
        if let Some(v) = parse_var(&lookup, "QCORE_MAX_SHOTS")? {
            self.simulator.max_shots = v;
        }
        if let Some(v) = parse_var(&lookup, "QCORE_SEED")? {
            self.simulator.seed = Some(v);
        }
        if let Some(v) = lookup("QCORE_SAMPLING") {
            self.simulator.sampling = parse_sampling(&v)?;
        }

        // Exercises
        if let Some(v) = lookup("QCORE_EXERCISES_PATH") {
            self.exercises.path = Some(PathBuf::from(v));
        }

        // Logging
        if let Some(v) = lookup("QCORE_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = parse_var(&lookup, "QCORE_LOG_FORMAT")? {
            self.logging.format = v;
        }

        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulator
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        if let Some(ref path) = self.exercises.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(
                    "exercises.path must not be empty; omit it instead".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ConfigError::Validation(format!("{key}={raw}: {e}")))
        })
        .transpose()
}

fn parse_sampling(raw: &str) -> Result<SamplingMode, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "multinomial" => Ok(SamplingMode::Multinomial),
        "exact" => Ok(SamplingMode::Exact),
        other => Err(ConfigError::Validation(format!(
            "Invalid sampling mode: {other} (expected multinomial or exact)"
        ))),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulator.max_qubits, 10);
        assert_eq!(config.simulator.default_shots, 1024);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Console);
        assert!(config.exercises.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "simulator:\n  max_qubits: 12\n  sampling: exact\nexercises:\n  path: catalog.json\nlogging:\n  format: json"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.simulator.max_qubits, 12);
        assert_eq!(config.simulator.sampling, SamplingMode::Exact);
        assert_eq!(config.simulator.default_shots, 1024);
        assert_eq!(config.exercises.path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulator:\n  max_qubits: 40").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_from_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulator: [unclosed").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .merge_env(env(&[
                ("QCORE_MAX_QUBITS", "14"),
                ("QCORE_SEED", "7"),
                ("QCORE_SAMPLING", "Exact"),
                ("QCORE_EXERCISES_PATH", "/srv/exercises.json"),
                ("QCORE_LOG_LEVEL", "debug"),
                ("QCORE_LOG_FORMAT", "json"),
            ]))
            .unwrap();

        assert_eq!(config.simulator.max_qubits, 14);
        assert_eq!(config.simulator.seed, Some(7));
        assert_eq!(config.simulator.sampling, SamplingMode::Exact);
        assert_eq!(
            config.exercises.path,
            Some(PathBuf::from("/srv/exercises.json"))
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_absent_env_keeps_file_values() {
        let mut config = Config::default();
        config.simulator.max_shots = 5000;
        let merged = config.clone().merge_env(env(&[])).unwrap();
        assert_eq!(merged, config);
    }

    #[test]
    fn test_unparseable_env_value() {
        let err = Config::default()
            .merge_env(env(&[("QCORE_MAX_SHOTS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("QCORE_MAX_SHOTS"));

        assert!(
            Config::default()
                .merge_env(env(&[("QCORE_SAMPLING", "random")]))
                .is_err()
        );
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_shots_above_cap() {
        let mut config = Config::default();
        config.simulator.default_shots = config.simulator.max_shots + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }
}
