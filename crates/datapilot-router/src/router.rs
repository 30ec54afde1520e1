// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step routing state machine.
//!
//! Decides which pipeline step runs next: budget guard > explicit hint >
//! sequential fallback. The budget guard bounds total steps regardless of any
//! other logic and is the single infinite-loop safeguard.

use std::collections::HashSet;

use strum::{Display, EnumString};
use tracing::debug;

/// Hard cap on completed steps per request. With the no-op chart step always
/// emitted, a full run is planning, querying, visualizing, explaining.
pub const MAX_COMPLETED_STEPS: usize = 4;

/// The closed set of pipeline step identifiers.
///
/// Replaces the stringly-typed dispatch of ad-hoc step names: the router can
/// only ever return one of these four variants or terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StepName {
    /// Build the execution plan from the classified query.
    Planning,
    /// Generate, validate, and execute the retrieval query.
    Querying,
    /// Render a chart from the result rows.
    Visualizing,
    /// Produce the final natural-language answer.
    Explaining,
}

/// Routing inputs: the slice of shared state the transition function reads.
#[derive(Debug, Clone, Default)]
pub struct RouteView {
    /// Steps that have already run, each at most once.
    pub completed: HashSet<StepName>,
    /// A step producer's explicit suggestion for the next step.
    pub hint: Option<StepName>,
    /// Whether any plan step requires query execution.
    pub requires_sql: bool,
    /// Whether any plan step requires chart generation.
    pub requires_chart: bool,
}

/// Selects the next step, or `None` when the pipeline is terminal.
///
/// Priority order:
/// 1. Budget guard: `completed` at capacity terminates unconditionally.
/// 2. A hint that is set and not already completed is trusted, even out of
///    the plan's nominal order. Hints are not cleared on consumption; a
///    stale hint is detected through `completed` on the next cycle.
/// 3. Sequential fallback over planning, querying (if the plan requires
///    it), visualizing (if the plan requires it), explaining.
pub fn next_step(view: &RouteView) -> Option<StepName> {
    if view.completed.len() >= MAX_COMPLETED_STEPS {
        debug!(completed = view.completed.len(), "step budget reached, terminating");
        return None;
    }

    if let Some(hinted) = view.hint {
        if !view.completed.contains(&hinted) {
            debug!(step = %hinted, "following routing hint");
            return Some(hinted);
        }
        debug!(step = %hinted, "ignoring stale routing hint");
    }

    let next = if !view.completed.contains(&StepName::Planning) {
        Some(StepName::Planning)
    } else if view.requires_sql && !view.completed.contains(&StepName::Querying) {
        Some(StepName::Querying)
    } else if view.requires_chart && !view.completed.contains(&StepName::Visualizing) {
        Some(StepName::Visualizing)
    } else if !view.completed.contains(&StepName::Explaining) {
        Some(StepName::Explaining)
    } else {
        None
    };

    match next {
        Some(step) => debug!(step = %step, "sequential fallback routing"),
        None => debug!("all plan steps completed, terminating"),
    }
    next
}
