use std::path::PathBuf;

use thiserror::Error;

pub const ENV_LOG_LEVEL: &str = "PHIO_LOG_LEVEL";
pub const ENV_UPDATE_BASELINE: &str = "PHIO_UPDATE_BASELINE";
pub const ENV_BASELINE_PATH: &str = "PHIO_BASELINE_PATH";

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_BASELINE_PATH: &str = ".contract/contract_baseline.json";

/// Top-level configuration for the instrument binary.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentConfig {
    pub telemetry: TelemetryConfig,
    pub baseline: BaselineConfig,
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaselineConfig {
    pub path: PathBuf,
    pub update: bool,
}

impl InstrumentConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(level) if !level.trim().is_empty() => level.trim().to_string(),
            _ => DEFAULT_LOG_LEVEL.to_string(),
        };

        let update = match lookup(ENV_UPDATE_BASELINE) {
            Some(value) => parse_flag(ENV_UPDATE_BASELINE, &value)?,
            None => false,
        };

        let path = match lookup(ENV_BASELINE_PATH) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyPath {
                    key: ENV_BASELINE_PATH,
                });
            }
            Some(value) => PathBuf::from(value.trim()),
            None => PathBuf::from(DEFAULT_BASELINE_PATH),
        };

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            baseline: BaselineConfig { path, update },
        })
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            telemetry: TelemetryConfig {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
            },
            baseline: BaselineConfig {
                path: PathBuf::from(DEFAULT_BASELINE_PATH),
                update: false,
            },
        }
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a boolean (true/false), got '{value}'")]
    InvalidFlag { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    EmptyPath { key: &'static str },
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
