//! Error types for the fallible edges of the simulation crate.
//!
//! The tick itself never fails; only loading and validating configuration can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("config field `{field}` must be {requirement} (got {value})")]
    Invalid {
        field: &'static str,
        requirement: &'static str,
        value: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(
        field: &'static str,
        requirement: &'static str,
        value: impl ToString,
    ) -> Self {
        ConfigError::Invalid {
            field,
            requirement,
            value: value.to_string(),
        }
    }
}
