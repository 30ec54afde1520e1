// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the datapilot copilot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level datapilot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatapilotConfig {
    /// Per-stage LLM settings.
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Storage collaborator settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chart rendering settings.
    #[serde(default)]
    pub chart: ChartConfig,

    /// Pipeline behavior settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// LLM settings for each pipeline stage that calls the provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentsConfig {
    #[serde(default)]
    pub planner: AgentModelConfig,
    #[serde(default)]
    pub sql: AgentModelConfig,
    #[serde(default)]
    pub chart: AgentModelConfig,
    #[serde(default = "AgentModelConfig::explainer_default")]
    pub explainer: AgentModelConfig,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            planner: AgentModelConfig::default(),
            sql: AgentModelConfig::default(),
            chart: AgentModelConfig::default(),
            explainer: AgentModelConfig::explainer_default(),
        }
    }
}

/// Model name and sampling temperature for one pipeline stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentModelConfig {
    /// Model identifier passed to the provider adapter.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f64,
}

impl AgentModelConfig {
    /// The explainer runs slightly warmer for more natural explanations.
    fn explainer_default() -> Self {
        Self {
            model: default_model(),
            temperature: 0.2,
        }
    }
}

impl Default for AgentModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: 0.0,
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

/// Storage collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Connection URL for the relational dataset.
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://./app.db".to_string()
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Directory where rendered charts are written.
    #[serde(default = "default_chart_dir")]
    pub output_dir: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: default_chart_dir(),
        }
    }
}

fn default_chart_dir() -> String {
    "./charts".to_string()
}

/// Pipeline behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Maximum number of result rows exposed in a response.
    #[serde(default = "default_row_cap")]
    pub row_cap: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            row_cap: default_row_cap(),
        }
    }
}

fn default_row_cap() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = DatapilotConfig::default();
        assert_eq!(config.pipeline.row_cap, 50);
        assert_eq!(config.chart.output_dir, "./charts");
        assert_eq!(config.agents.sql.temperature, 0.0);
        assert_eq!(config.agents.explainer.temperature, 0.2);
    }

    #[test]
    fn default_serializes_and_round_trips() {
        let config = DatapilotConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: DatapilotConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.pipeline.row_cap, config.pipeline.row_cap);
    }
}
