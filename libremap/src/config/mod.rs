//! Configuration-backed override reader.
//!
//! This module adapts the `config` crate to the [`Reader`] capability the
//! override store consumes, loading override rules from YAML sources.

use crate::error::{RemapError, Result};
use crate::store::Reader;
use config::{Config as ConfigRs, ConfigError, File, FileFormat};
use serde::de::DeserializeOwned;
use std::path::Path;

#[cfg(test)]
mod tests;

/// A [`Reader`] over a loaded `config::Config` source.
#[derive(Debug)]
pub struct ConfigReader {
    config: ConfigRs,
}

impl ConfigReader {
    /// Parses a `ConfigReader` from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let builder = ConfigRs::builder().add_source(File::from_str(s, FileFormat::Yaml));
        Self::from_builder(builder)
    }

    /// Loads a `ConfigReader` from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let builder = ConfigRs::builder().add_source(File::from(path).required(true));
        Self::from_builder(builder)
    }

    /// Creates a `ConfigReader` from a `config::ConfigBuilder`.
    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .build()
            .map(|config| Self { config })
            .map_err(|e| RemapError::config_with_source("Failed to load configuration", e))
    }
}

impl Reader for ConfigReader {
    fn unmarshal_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.config.get::<T>(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(RemapError::config_with_source(
                format!("Failed to unmarshal configuration key '{}'", key),
                e,
            )),
        }
    }
}
