// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single result record: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Summary statistics for a query result set.
///
/// Produced by the storage collaborator alongside the rows themselves, and
/// surfaced verbatim in the response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSummary {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Column name to storage-reported type name.
    pub dtypes: BTreeMap<String, String>,
    /// (row count, column count) of the full result set.
    pub shape: (usize, usize),
    /// Up to the first 5 rows.
    pub head: Vec<Row>,
    /// Null count per column.
    pub null_counts: BTreeMap<String, u64>,
}

/// Supported chart types for the rendering collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Scatter,
    Pie,
    Histogram,
}

/// A fully-resolved chart request handed to the rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart type to render.
    #[serde(default)]
    pub chart_type: ChartType,
    /// Column name for the x-axis.
    #[serde(default)]
    pub x_column: String,
    /// Column name for the y-axis.
    #[serde(default)]
    pub y_column: String,
    /// Chart title.
    #[serde(default = "default_chart_title")]
    pub title: String,
}

fn default_chart_title() -> String {
    "Data Analysis Chart".to_string()
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            x_column: String::new(),
            y_column: String::new(),
            title: default_chart_title(),
        }
    }
}
