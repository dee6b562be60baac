// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine configuration.
//!
//! The configuration is a RON document; every field has a default so an
//! application can start without any file at all.
//!
//! ```ron
//! (
//!     logging: (level: "info", filters: [("final_io", "debug")]),
//!     resources: (root: Some("assets")),
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// The path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid RON for an [`EngineConfig`].
    #[error("invalid engine config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logging setup.
    pub logging: LoggingConfig,
    /// Resource manager setup.
    pub resources: ResourcesConfig,
}

/// Logging setup consumed by `final-telemetry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub level: String,
    /// Per-module overrides, as `(module_path, level)` pairs.
    pub filters: Vec<(String, String)>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            filters: Vec::new(),
        }
    }
}

/// Resource manager setup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory relative resource paths are resolved against.
    /// `None` resolves them against the working directory.
    pub root: Option<PathBuf>,
}

impl EngineConfig {
    /// Parses a configuration from a RON string.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&text)?;
        log::debug!("Loaded engine config from '{}'.", path.display());
        Ok(config)
    }
}
