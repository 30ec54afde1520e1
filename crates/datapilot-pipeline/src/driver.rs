// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The pipeline driver: classification fast paths, the router loop, and
//! envelope assembly.
//!
//! This is the error boundary for one request. Every failure a step raises
//! is converted into a response with the error field populated and a
//! best-effort answer; nothing propagates to the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use datapilot_config::DatapilotConfig;
use datapilot_core::{ChartAdapter, DatapilotError, ProviderAdapter, SessionId, StorageAdapter};
use datapilot_router::{classifier, next_step, StepName};

use crate::offtopic;
use crate::planner;
use crate::state::{PipelineState, ResponseEnvelope};
use crate::steps;

/// Orchestrates one request at a time from question to response envelope.
///
/// Holds only read-only configuration and collaborator handles; all mutable
/// request state lives in a per-request [`PipelineState`], so concurrent
/// requests need no cross-request locking.
pub struct Pipeline {
    provider: Arc<dyn ProviderAdapter>,
    storage: Arc<dyn StorageAdapter>,
    renderer: Arc<dyn ChartAdapter>,
    config: DatapilotConfig,
}

impl Pipeline {
    /// Creates a pipeline over the given collaborators.
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        storage: Arc<dyn StorageAdapter>,
        renderer: Arc<dyn ChartAdapter>,
        config: DatapilotConfig,
    ) -> Self {
        Self {
            provider,
            storage,
            renderer,
            config,
        }
    }

    /// Processes one user question and returns the response envelope.
    ///
    /// Arithmetic and off-topic questions are answered immediately, never
    /// touching the router. Everything else runs the plan through the
    /// router loop until the transition function goes terminal.
    pub async fn process(&self, query: &str, session_id: Option<String>) -> ResponseEnvelope {
        // Fast path: pure arithmetic, answered by the safe evaluator.
        if classifier::is_arithmetic(query) {
            info!("arithmetic fast path");
            return ResponseEnvelope {
                answer: datapilot_arith::answer(query),
                elapsed_ms: Some(0.0),
                ..ResponseEnvelope::default()
            };
        }

        // Fast path: off-topic chit-chat, answered by the canned responder.
        if !classifier::is_data_related(query) {
            info!("off-topic fast path");
            return ResponseEnvelope {
                answer: offtopic::respond(query),
                elapsed_ms: Some(0.0),
                ..ResponseEnvelope::default()
            };
        }

        let session = SessionId(session_id.unwrap_or_else(|| Uuid::new_v4().to_string()));
        let mut state = PipelineState::new(query, session);

        let failure = self.drive(&mut state).await.err();
        self.assemble(state, failure)
    }

    /// The router loop: select a step, execute it, repeat until terminal.
    async fn drive(&self, state: &mut PipelineState) -> Result<(), DatapilotError> {
        while let Some(step) = next_step(&state.route_view()) {
            info!(session = %state.session_id, step = %step, "executing step");
            match step {
                StepName::Planning => planner::run_planning(state),
                StepName::Querying => {
                    steps::query::run_querying(state, self.provider.as_ref(), self.storage.as_ref())
                        .await?
                }
                StepName::Visualizing => {
                    steps::chart::run_visualizing(
                        state,
                        self.provider.as_ref(),
                        self.renderer.as_ref(),
                    )
                    .await?
                }
                StepName::Explaining => {
                    steps::explain::run_explaining(state, self.provider.as_ref()).await?
                }
            }
        }
        Ok(())
    }

    /// Builds the response envelope from final state, absorbing any step
    /// failure into the error field with a best-effort answer.
    fn assemble(
        &self,
        mut state: PipelineState,
        failure: Option<DatapilotError>,
    ) -> ResponseEnvelope {
        let elapsed_ms = state
            .finished_at
            .unwrap_or_else(Utc::now)
            .signed_duration_since(state.started_at)
            .num_milliseconds() as f64;

        let error = match failure {
            Some(failure) => {
                warn!(session = %state.session_id, %failure, "pipeline step failed");
                if state.answer.is_empty() {
                    state.answer = format!("Error processing query: {failure}");
                }
                Some(failure.to_string())
            }
            None => state.sql_error.clone(),
        };

        state.rows.truncate(self.config.pipeline.row_cap);
        ResponseEnvelope {
            answer: state.answer,
            sql: state.sql,
            chart_path: state.chart_path,
            rows: state.rows,
            summary: state.summary,
            elapsed_ms: Some(elapsed_ms),
            error,
        }
    }
}
