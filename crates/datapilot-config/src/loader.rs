// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./datapilot.toml` > `~/.config/datapilot/datapilot.toml`
//! > `/etc/datapilot/datapilot.toml` with environment variable overrides via
//! the `DATAPILOT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::DatapilotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/datapilot/datapilot.toml` (system-wide)
/// 3. `~/.config/datapilot/datapilot.toml` (user XDG config)
/// 4. `./datapilot.toml` (local directory)
/// 5. `DATAPILOT_*` environment variables
pub fn load_config() -> Result<DatapilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DatapilotConfig::default()))
        .merge(Toml::file("/etc/datapilot/datapilot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("datapilot/datapilot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("datapilot.toml"))
        .merge(Env::prefixed("DATAPILOT_").split("__"))
        .extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DatapilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DatapilotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DatapilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DatapilotConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DATAPILOT_").split("__"))
        .extract()
}
