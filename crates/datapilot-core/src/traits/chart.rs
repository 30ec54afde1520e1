// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chart adapter trait for the rendering collaborator.

use async_trait::async_trait;

use crate::error::DatapilotError;
use crate::types::{ChartSpec, Row};

/// Adapter for the chart-rendering collaborator.
#[async_trait]
pub trait ChartAdapter: Send + Sync {
    /// Renders a chart from the given rows and returns a reference to it
    /// (a file path or URL).
    async fn render(&self, rows: &[Row], spec: &ChartSpec) -> Result<String, DatapilotError>;
}
