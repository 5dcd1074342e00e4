//! Configuration system for the Strata compiler
//!
//! Loads configuration from an optional `strata.yaml`. Environment variables
//! always override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// What the compiler writes for a successful compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Binary protobuf operator, as consumed by the execution engine
    Binary,
    /// JSON summary: output relation, required columns, diagnostics, fingerprint
    Summary,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(OutputFormat::Binary),
            "summary" => Ok(OutputFormat::Summary),
            _ => Err(ConfigError::InvalidValue {
                key: "STRATA_OUTPUT_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

/// Compilation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    pub output_format: OutputFormat,

    /// Treat diagnostics (e.g. ignored spans) as compile failures
    #[serde(default)]
    pub strict_diagnostics: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Summary,
            strict_diagnostics: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or module-specific
    pub level: String,

    /// Output format: pretty, json, compact
    pub format: String,

    /// Output destination: stdout, file, both
    pub output: String,

    /// Directory for log files
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            output: "stdout".to_string(),
            directory: "./logs".to_string(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from YAML file with environment variable overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a config file
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(format) = std::env::var("STRATA_OUTPUT_FORMAT") {
            self.compiler.output_format = format.parse()?;
        }
        if let Ok(strict) = std::env::var("STRATA_STRICT_DIAGNOSTICS") {
            self.compiler.strict_diagnostics = match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "STRATA_STRICT_DIAGNOSTICS",
                        value: strict,
                    })
                }
            };
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(output) = std::env::var("LOG_OUTPUT") {
            self.logging.output = output;
        }
        if let Ok(dir) = std::env::var("LOG_DIR") {
            self.logging.directory = dir;
        }

        Ok(())
    }

    /// Set logging environment variables for the logging module
    pub fn apply_logging_env(&self) {
        std::env::set_var("RUST_LOG", &self.logging.level);
        std::env::set_var("LOG_FORMAT", &self.logging.format);
        std::env::set_var("LOG_OUTPUT", &self.logging.output);
        std::env::set_var("LOG_DIR", &self.logging.directory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.compiler.output_format, OutputFormat::Summary);
        assert!(!config.compiler.strict_diagnostics);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "compact");
        assert_eq!(config.logging.output, "stdout");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("BINARY".parse::<OutputFormat>().unwrap(), OutputFormat::Binary);
        assert_eq!("summary".parse::<OutputFormat>().unwrap(), OutputFormat::Summary);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_env_var_override() {
        std::env::set_var("STRATA_OUTPUT_FORMAT", "binary");
        std::env::set_var("STRATA_STRICT_DIAGNOSTICS", "true");

        let config_yaml = r#"
compiler:
  output_format: summary
  strict_diagnostics: false
logging:
  level: "info"
  format: "pretty"
  output: "stdout"
  directory: "./logs"
"#;
        let temp_file = std::env::temp_dir().join("strata_test_config.yaml");
        std::fs::write(&temp_file, config_yaml).unwrap();

        let config = Config::load(&temp_file).unwrap();
        assert_eq!(config.compiler.output_format, OutputFormat::Binary); // Overridden
        assert!(config.compiler.strict_diagnostics); // Overridden

        std::env::remove_var("STRATA_OUTPUT_FORMAT");
        std::env::remove_var("STRATA_STRICT_DIAGNOSTICS");
        std::fs::remove_file(temp_file).ok();
    }
}
