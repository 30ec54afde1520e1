// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the datapilot pipeline.

use thiserror::Error;

/// The primary error type used across collaborator traits and pipeline steps.
///
/// None of these variants is fatal to the process: the pipeline driver
/// absorbs every one of them into the response envelope.
#[derive(Debug, Error)]
pub enum DatapilotError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// LLM provider errors (API failure, token limits, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (connection failure, malformed query, execution failure).
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chart rendering errors (missing columns, unsupported chart type, I/O).
    #[error("chart error: {0}")]
    Chart(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DatapilotError {
    /// Wraps a provider failure with a human-readable message.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps a storage failure with a human-readable message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }
}
