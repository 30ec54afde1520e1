// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped pipeline state and the response envelope.
//!
//! One request owns exactly one [`PipelineState`]. Each step writes a
//! disjoint subset of its fields; nothing here is shared across requests.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use datapilot_core::{ResultSummary, Row, SessionId};
use datapilot_router::{RouteView, StepName};

use crate::planner::PlanStep;

/// One completed question/answer exchange, kept for prompt context within
/// the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// The user's original query.
    pub query: String,
    /// The system's answer.
    pub answer: String,
    /// Path to a generated chart, if any.
    pub chart_path: Option<String>,
    /// When this entry was created.
    pub timestamp: DateTime<Utc>,
}

/// The single mutable object threaded through one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// Original user query text.
    pub user_query: String,
    /// Session identifier for this request.
    pub session_id: SessionId,
    /// Execution plan; created once by the planning step, never mutated.
    pub plan: Vec<PlanStep>,
    /// Generated retrieval query.
    pub sql: Option<String>,
    /// Query validation or execution error, if any.
    pub sql_error: Option<String>,
    /// Query result rows.
    pub rows: Vec<Row>,
    /// Result-set summary from the storage collaborator.
    pub summary: Option<ResultSummary>,
    /// Path to the generated chart, if any.
    pub chart_path: Option<String>,
    /// Chart generation error, if any.
    pub chart_error: Option<String>,
    /// Final answer text.
    pub answer: String,
    /// A step's explicit suggestion for the next step. Never cleared on
    /// consumption; staleness is detected through `completed`.
    pub hint: Option<StepName>,
    /// Steps that have run, each at most once.
    pub completed: HashSet<StepName>,
    /// Append-only conversation history.
    pub history: Vec<HistoryEntry>,
    /// When processing started.
    pub started_at: DateTime<Utc>,
    /// When processing finished.
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineState {
    /// Creates fresh state for one request with only query and session
    /// populated.
    pub fn new(user_query: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            user_query: user_query.into(),
            session_id,
            plan: Vec::new(),
            sql: None,
            sql_error: None,
            rows: Vec::new(),
            summary: None,
            chart_path: None,
            chart_error: None,
            answer: String::new(),
            hint: None,
            completed: HashSet::new(),
            history: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Whether any plan step requires query execution.
    pub fn plan_requires_sql(&self) -> bool {
        self.plan.iter().any(|step| step.requires_sql)
    }

    /// Whether any plan step requires chart generation.
    pub fn plan_requires_chart(&self) -> bool {
        self.plan.iter().any(|step| step.requires_chart)
    }

    /// The slice of this state the router's transition function reads.
    pub fn route_view(&self) -> RouteView {
        RouteView {
            completed: self.completed.clone(),
            hint: self.hint,
            requires_sql: self.plan_requires_sql(),
            requires_chart: self.plan_requires_chart(),
        }
    }

    /// Records that a step has run. A step name lands in `completed` at
    /// most once.
    pub fn mark_completed(&mut self, step: StepName) {
        self.completed.insert(step);
    }
}

/// The driver's output for one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseEnvelope {
    /// Final answer text.
    pub answer: String,
    /// Generated retrieval query, if one was produced.
    pub sql: Option<String>,
    /// Reference to the generated chart, if any.
    pub chart_path: Option<String>,
    /// Result rows, capped at the configured row limit.
    pub rows: Vec<Row>,
    /// Result-set summary, if a query ran.
    pub summary: Option<ResultSummary>,
    /// Wall-clock processing time; zero for fast-path answers.
    pub elapsed_ms: Option<f64>,
    /// Error description when processing did not fully succeed.
    pub error: Option<String>,
}
