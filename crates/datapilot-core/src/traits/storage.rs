// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the relational dataset.

use async_trait::async_trait;

use crate::error::DatapilotError;
use crate::types::{ResultSummary, Row};

/// Adapter for the relational storage collaborator.
///
/// The core calls this only after the admission guard has passed the query.
/// Implementations must not be handed unvalidated text.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Executes a read-only query and returns the result rows together with
    /// a summary of the full result set.
    async fn run_readonly_query(
        &self,
        sql: &str,
    ) -> Result<(Vec<Row>, ResultSummary), DatapilotError>;
}
