// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Datapilot integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without a model endpoint, a database, or a plotting backend.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock model provider with pre-configured responses
//! - [`MockStorage`] - Mock query backend with canned rows or a canned failure
//! - [`MockChart`] - Mock chart renderer

pub mod mock_chart;
pub mod mock_provider;
pub mod mock_storage;

pub use mock_chart::MockChart;
pub use mock_provider::MockProvider;
pub use mock_storage::MockStorage;
