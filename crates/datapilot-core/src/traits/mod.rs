// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the pipeline core.
//!
//! The LLM provider, the storage engine, and the chart renderer are external
//! collaborators: the core only ever talks to them through these traits.

pub mod chart;
pub mod provider;
pub mod storage;

pub use chart::ChartAdapter;
pub use provider::ProviderAdapter;
pub use storage::StorageAdapter;
