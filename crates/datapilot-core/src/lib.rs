// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the datapilot copilot.
//!
//! This crate provides the collaborator trait definitions, error type, and
//! common types used throughout the datapilot workspace. The pipeline,
//! router, and guard crates all build on the definitions here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::DatapilotError;
pub use types::{ChartSpec, ChartType, ResultSummary, Row, SessionId};

// Re-export collaborator traits at crate root.
pub use traits::{ChartAdapter, ProviderAdapter, StorageAdapter};
