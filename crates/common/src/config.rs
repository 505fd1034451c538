// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Exposure cache configuration types and parsing.
//!
//! # Spec String Format
//!
//! The `FLAGCACHE_EXPOSURE` environment variable uses a semicolon-separated format:
//!
//! ```text
//! capacity=65536;enabled
//! ```
//!
//! ## Supported Keys
//!
//! | Key        | Type    | Description                                       |
//! |------------|---------|---------------------------------------------------|
//! | `capacity` | Integer | Maximum cached exposures (non-negative).          |
//! | `enabled`  | Boolean | Record exposures at all (default: true).          |
//!
//! Keys are case-insensitive.
//!
//! ## Boolean Values
//!
//! - Bare flag: `enabled` → true
//! - Explicit: `enabled=true`, `enabled=false`, `enabled=0`, `enabled=no`

use std::env;

use flagcache_core::correctness::parse_capacity;

/// Environment variable holding the exposure cache spec string.
pub const EXPOSURE_ENV_VAR: &str = "FLAGCACHE_EXPOSURE";

/// Default maximum number of cached exposures.
pub const DEFAULT_EXPOSURE_CAPACITY: usize = 65_536;

/// Configuration for exposure deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureCacheConfig {
    /// Maximum number of exposures retained for deduplication.
    pub capacity: usize,
    /// Whether exposures are recorded at all.
    pub enabled: bool,
}

impl Default for ExposureCacheConfig {
    /// Creates a new default [`ExposureCacheConfig`] instance.
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EXPOSURE_CAPACITY,
            enabled: true,
        }
    }
}

impl ExposureCacheConfig {
    /// Creates a new [`ExposureCacheConfig`] instance.
    #[must_use]
    pub const fn new(capacity: usize, enabled: bool) -> Self {
        Self { capacity, enabled }
    }

    /// Parses a configuration from a spec string.
    ///
    /// # Format
    ///
    /// Semicolon-separated key-value pairs or bare flags:
    /// ```text
    /// capacity=1024;enabled=false
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the spec string contains invalid syntax, an unknown key, or a
    /// negative or non-numeric capacity.
    pub fn from_spec(spec: &str) -> anyhow::Result<Self> {
        let mut config = Self::default();

        for kv in spec.split(';') {
            let kv = kv.trim();
            if kv.is_empty() {
                continue;
            }

            let Some((k, v)) = kv.split_once('=') else {
                match kv.to_lowercase().as_str() {
                    "enabled" => config.enabled = true,
                    _ => anyhow::bail!("Invalid spec pair: {kv}"),
                }
                continue;
            };

            let v = v.trim();
            match k.trim().to_lowercase().as_str() {
                "capacity" => config.capacity = parse_capacity(v, "capacity")?,
                "enabled" => config.enabled = parse_bool_value(v),
                _ => anyhow::bail!("Invalid spec key: {}", k.trim()),
            }
        }

        Ok(config)
    }

    /// Parses configuration from the `FLAGCACHE_EXPOSURE` environment variable.
    ///
    /// An unset variable yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not valid unicode or contains an invalid spec.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_var(EXPOSURE_ENV_VAR)
    }

    fn from_env_var(name: &str) -> anyhow::Result<Self> {
        match env::var(name) {
            Ok(spec) => Self::from_spec(&spec),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => anyhow::bail!("Invalid `{name}`: {e}"),
        }
    }
}

/// Parses a boolean value from a string.
///
/// Returns `true` unless the value is explicitly "false", "0", or "no" (case-insensitive).
fn parse_bool_value(v: &str) -> bool {
    !matches!(v.to_lowercase().as_str(), "false" | "0" | "no")
}
