// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The orchestration layer: plan building, step executors, and the driver.
//!
//! - [`planner`]: turns a classified question into an explicit step plan.
//! - [`steps`]: the query, chart, and explanation executors.
//! - [`driver`]: runs the router loop over a [`state::PipelineState`] and
//!   folds the outcome into a [`state::ResponseEnvelope`].
//!
//! The driver is the error boundary. A failing step surfaces as a populated
//! `error` field in the envelope, never as an `Err` to the caller.

pub mod driver;
pub mod offtopic;
pub mod planner;
pub mod prompts;
pub mod state;
pub mod steps;

pub use driver::Pipeline;
pub use planner::{PlanStep, StepAction};
pub use state::{HistoryEntry, PipelineState, ResponseEnvelope};
