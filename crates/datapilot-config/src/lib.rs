// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for the datapilot copilot.
//!
//! TOML files merged through the XDG hierarchy, with `DATAPILOT_*`
//! environment variable overrides on top.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AgentModelConfig, AgentsConfig, ChartConfig, DatapilotConfig, PipelineConfig, StorageConfig,
};
