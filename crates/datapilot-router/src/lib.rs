// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification heuristics and the step-routing state machine.
//!
//! - [`classifier`]: pure predicates deciding whether a question is
//!   arithmetic, data-related, or wants a chart.
//! - [`router`]: the transition function that drives pipeline steps and
//!   guarantees termination via a hard step budget.

pub mod classifier;
pub mod router;

pub use classifier::{is_arithmetic, is_data_related, wants_chart};
pub use router::{next_step, RouteView, StepName, MAX_COMPLETED_STEPS};
