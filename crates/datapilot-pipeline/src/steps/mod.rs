// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step executors for the router-driven pipeline.
//!
//! Each executor owns a disjoint subset of the shared state, appends its own
//! step name to `completed` when it finishes, and may set the routing hint
//! to steer the next transition.

pub mod chart;
pub mod explain;
pub mod query;
