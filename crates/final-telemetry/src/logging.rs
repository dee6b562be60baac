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

//! Installs the global logger from an [`LoggingConfig`].

use env_logger::{Builder, Env};
use final_core::config::LoggingConfig;
use log::LevelFilter;

/// Builds the logger described by `config` without installing it.
///
/// The configured level is only a default: `RUST_LOG`, when set, takes
/// precedence. Module filters that fail to parse are skipped with a warning
/// printed to stderr, since the logger is not running yet.
pub fn builder(config: &LoggingConfig) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(config.level.as_str()));
    for (module, level) in &config.filters {
        match level.parse::<LevelFilter>() {
            Ok(filter) => {
                builder.filter_module(module, filter);
            }
            Err(_) => eprintln!("Ignoring log filter '{module}={level}': unknown level."),
        }
    }
    builder
}

/// Installs the global logger.
///
/// Returns `false` if a logger was already installed (e.g. by a test harness),
/// in which case the existing one is kept.
pub fn init(config: &LoggingConfig) -> bool {
    match builder(config).try_init() {
        Ok(()) => {
            log::debug!("Logger initialized (default level '{}').", config.level);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_tolerated() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            filters: vec![
                ("final_io".to_string(), "debug".to_string()),
                ("noisy".to_string(), "loud".to_string()),
            ],
        };
        // The first call may lose to a logger installed by another test.
        let _ = init(&config);
        assert!(!init(&config));
    }
}
