// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chart renderer for deterministic testing.

use async_trait::async_trait;

use datapilot_core::{ChartAdapter, ChartSpec, DatapilotError, Row};

/// A mock renderer that fabricates a chart path instead of plotting.
pub struct MockChart {
    failure: Option<String>,
}

impl MockChart {
    /// A renderer that succeeds, returning a fabricated output path.
    pub fn new() -> Self {
        Self { failure: None }
    }

    /// A renderer that fails every render with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
        }
    }
}

impl Default for MockChart {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChartAdapter for MockChart {
    async fn render(&self, _rows: &[Row], spec: &ChartSpec) -> Result<String, DatapilotError> {
        match &self.failure {
            Some(message) => Err(DatapilotError::Chart(message.clone())),
            None => Ok(format!("charts/mock_{}.png", spec.chart_type)),
        }
    }
}
