// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The explaining step: produce the final answer and close out the request.

use chrono::Utc;
use tracing::info;

use datapilot_core::{DatapilotError, ProviderAdapter};
use datapilot_router::StepName;

use crate::offtopic;
use crate::planner::StepAction;
use crate::state::{HistoryEntry, PipelineState};
use crate::steps::chart::sample_rows_json;
use crate::prompts;

/// Produces the final answer.
///
/// Arithmetic and off-topic plans are answered locally without touching the
/// provider. Data plans ask the model to explain the results, including any
/// captured query error so a failed query still gets a best-effort answer.
pub async fn run_explaining(
    state: &mut PipelineState,
    provider: &dyn ProviderAdapter,
) -> Result<(), DatapilotError> {
    let is_arithmetic = state
        .plan
        .iter()
        .any(|step| step.action == StepAction::AnswerDirectly);
    let is_off_topic = state
        .plan
        .iter()
        .any(|step| step.action == StepAction::HandleOffTopic);

    let answer = if is_arithmetic {
        datapilot_arith::answer(&state.user_query)
    } else if is_off_topic {
        offtopic::respond(&state.user_query)
    } else {
        let sample = sample_rows_json(state, 5);
        let prompt = prompts::explainer_prompt(
            &state.user_query,
            state.sql.as_deref().unwrap_or("No SQL query was executed."),
            state.sql_error.as_deref().unwrap_or("No errors."),
            &sample,
            state.chart_path.as_deref().unwrap_or("No chart was generated."),
        );
        provider.complete(&prompt).await?
    };

    state.history.push(HistoryEntry {
        query: state.user_query.clone(),
        answer: answer.clone(),
        chart_path: state.chart_path.clone(),
        timestamp: Utc::now(),
    });
    state.answer = answer;
    state.finished_at = Some(Utc::now());
    state.mark_completed(StepName::Explaining);
    info!(session = %state.session_id, "explanation produced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use datapilot_core::SessionId;
    use datapilot_test_utils::MockProvider;

    use super::*;
    use crate::planner::{build_arithmetic_plan, build_data_plan, build_off_topic_plan};

    #[tokio::test]
    async fn arithmetic_plan_is_answered_locally() {
        let provider = MockProvider::new();
        let mut state = PipelineState::new("what is 2+3*4", SessionId("s".into()));
        state.plan = build_arithmetic_plan();

        run_explaining(&mut state, &provider).await.unwrap();

        assert_eq!(state.answer, "The answer is 14");
        assert_eq!(provider.call_count(), 0);
        assert_eq!(state.history.len(), 1);
        assert!(state.finished_at.is_some());
    }

    #[tokio::test]
    async fn off_topic_plan_is_answered_locally() {
        let provider = MockProvider::new();
        let mut state = PipelineState::new("What is MapReduce?", SessionId("s".into()));
        state.plan = build_off_topic_plan();

        run_explaining(&mut state, &provider).await.unwrap();

        assert!(state.answer.contains("MapReduce"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn data_plan_uses_the_provider() {
        let provider =
            MockProvider::with_responses(vec!["Sales were strongest in the North.".to_string()]);
        let mut state = PipelineState::new("sales by region", SessionId("s".into()));
        state.plan = build_data_plan(false);
        state.sql = Some("SELECT region FROM sales".to_string());

        run_explaining(&mut state, &provider).await.unwrap();

        assert_eq!(state.answer, "Sales were strongest in the North.");
        assert!(state.completed.contains(&StepName::Explaining));
        let prompt = provider.prompts()[0].clone();
        assert!(prompt.contains("SELECT region FROM sales"));
    }

    #[tokio::test]
    async fn query_error_is_included_in_the_prompt() {
        let provider = MockProvider::with_responses(vec!["best effort".to_string()]);
        let mut state = PipelineState::new("sales by region", SessionId("s".into()));
        state.plan = build_data_plan(false);
        state.sql = Some("SELECT nope".to_string());
        state.sql_error = Some("Invalid SQL query: forbidden keyword found: drop".to_string());

        run_explaining(&mut state, &provider).await.unwrap();

        let prompt = provider.prompts()[0].clone();
        assert!(prompt.contains("forbidden keyword found: drop"));
    }
}
