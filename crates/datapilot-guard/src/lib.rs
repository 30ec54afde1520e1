// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission guard for model-generated SQL.
//!
//! This is the sole barrier between language-model output and the storage
//! engine. Input is untrusted and hostile; the guard only ever inspects
//! text, it never executes or mutates anything. Checks run in a fixed
//! order and fail fast on the first violation.

use thiserror::Error;
use tracing::warn;

/// Mutating/DDL keywords rejected as case-insensitive substrings.
///
/// Substring matching over-rejects (a query touching a `created_date`
/// column trips `create`), which fails closed: the acceptable direction for
/// an admission guard.
pub const FORBIDDEN_KEYWORDS: &[&str] = &[
    "insert", "update", "delete", "drop", "alter", "create",
    "truncate", "replace", "attach", "detach", "pragma",
];

/// Why a candidate query was refused admission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The query does not start with the read-only retrieval keyword.
    #[error("query must start with SELECT")]
    NotReadOnly,

    /// A statement separator appears before the final character.
    #[error("multiple statements are not allowed")]
    MultipleStatements,

    /// A mutating or DDL keyword appears anywhere in the query.
    #[error("forbidden keyword found: {0}")]
    ForbiddenKeyword(String),
}

/// Validates a candidate query string before it may reach storage.
///
/// Check order: read-only prefix, then statement chaining, then the keyword
/// denylist. Returns `Ok(())` for admissible queries and a reasoned
/// [`GuardError`] otherwise.
pub fn validate(query: &str) -> Result<(), GuardError> {
    let lower = query.to_lowercase();
    let trimmed = lower.trim();

    if !trimmed.starts_with("select") {
        warn!(reason = "not read-only", "rejected generated query");
        return Err(GuardError::NotReadOnly);
    }

    // A semicolon is tolerated only as the very last character; anywhere
    // else it is a statement-chaining attempt.
    if let Some(position) = trimmed.find(';') {
        if position != trimmed.len() - 1 {
            warn!(reason = "statement chaining", "rejected generated query");
            return Err(GuardError::MultipleStatements);
        }
    }

    for keyword in FORBIDDEN_KEYWORDS {
        if trimmed.contains(keyword) {
            warn!(keyword, "rejected generated query");
            return Err(GuardError::ForbiddenKeyword((*keyword).to_string()));
        }
    }

    Ok(())
}

/// Pulls the SQL query out of a model response.
///
/// Prefers a ```` ```sql ```` fence, then any plain ```` ``` ```` fence,
/// and otherwise returns the trimmed text as-is.
pub fn extract_sql(response: &str) -> String {
    if let Some(after) = response.split_once("```sql").map(|(_, rest)| rest) {
        if let Some((fenced, _)) = after.split_once("```") {
            return fenced.trim().to_string();
        }
        return after.trim().to_string();
    }

    if let Some(after) = response.split_once("```").map(|(_, rest)| rest) {
        if let Some((fenced, _)) = after.split_once("```") {
            return fenced.trim().to_string();
        }
        return after.trim().to_string();
    }

    response.trim().to_string()
}
