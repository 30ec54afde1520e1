// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock query backend for deterministic testing.
//!
//! `MockStorage` implements `StorageAdapter`, returning either a canned
//! result set or a canned failure regardless of the query text.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use datapilot_core::{DatapilotError, ResultSummary, Row, StorageAdapter};

/// A mock query backend with a fixed outcome.
///
/// Every call to [`StorageAdapter::run_readonly_query`] is counted, whether
/// it succeeds or fails, so tests can assert the backend was (not) reached.
pub struct MockStorage {
    outcome: Result<Vec<Row>, String>,
    queries: AtomicUsize,
}

impl MockStorage {
    /// A backend that answers every query with one single-column row per
    /// `(column, value)` pair.
    pub fn with_rows(pairs: Vec<(&str, &str)>) -> Self {
        let rows = pairs
            .into_iter()
            .map(|(column, value)| {
                let mut row = Row::new();
                row.insert(column.to_string(), Value::String(value.to_string()));
                row
            })
            .collect();
        Self {
            outcome: Ok(rows),
            queries: AtomicUsize::new(0),
        }
    }

    /// A backend that fails every query with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of queries received so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

/// Builds the profile a real backend would report for `rows`.
fn summarize(rows: &[Row]) -> ResultSummary {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();
    let dtypes: BTreeMap<String, String> = columns
        .iter()
        .map(|c| (c.clone(), "TEXT".to_string()))
        .collect();
    let null_counts: BTreeMap<String, u64> = columns
        .iter()
        .map(|c| {
            let nulls = rows.iter().filter(|row| row.get(c).is_none()).count() as u64;
            (c.clone(), nulls)
        })
        .collect();
    ResultSummary {
        shape: (rows.len(), columns.len()),
        head: rows.iter().take(5).cloned().collect(),
        columns,
        dtypes,
        null_counts,
    }
}

#[async_trait]
impl StorageAdapter for MockStorage {
    async fn run_readonly_query(
        &self,
        _sql: &str,
    ) -> Result<(Vec<Row>, ResultSummary), DatapilotError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(rows) => Ok((rows.clone(), summarize(rows))),
            Err(message) => Err(DatapilotError::storage(message.clone())),
        }
    }
}
