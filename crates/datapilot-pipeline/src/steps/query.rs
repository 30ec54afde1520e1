// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The querying step: generate, validate, and execute the retrieval query.

use tracing::{info, warn};

use datapilot_core::{DatapilotError, ProviderAdapter, StorageAdapter};
use datapilot_guard::{extract_sql, validate};
use datapilot_router::StepName;

use crate::planner::format_plan;
use crate::prompts;
use crate::state::PipelineState;

/// Generates a query from the model, admits it through the guard, and runs
/// it against storage.
///
/// Guard rejections and execution failures are captured into `sql_error`
/// and steer the router straight to the explanation step; neither aborts
/// the pipeline. Only a provider failure propagates, to be absorbed at the
/// driver boundary.
pub async fn run_querying(
    state: &mut PipelineState,
    provider: &dyn ProviderAdapter,
    storage: &dyn StorageAdapter,
) -> Result<(), DatapilotError> {
    let prompt = prompts::sql_prompt(&state.user_query, &format_plan(&state.plan));
    let response = provider.complete(&prompt).await?;

    let sql = extract_sql(&response);
    state.sql = Some(sql.clone());

    if let Err(rejection) = validate(&sql) {
        warn!(session = %state.session_id, %rejection, "generated query rejected");
        state.sql_error = Some(format!("Invalid SQL query: {rejection}"));
        state.hint = Some(StepName::Explaining);
        state.mark_completed(StepName::Querying);
        return Ok(());
    }

    match storage.run_readonly_query(&sql).await {
        Ok((rows, summary)) => {
            info!(
                session = %state.session_id,
                rows = rows.len(),
                "query executed"
            );
            state.rows = rows;
            state.summary = Some(summary);
            state.hint = if state.plan_requires_chart() {
                Some(StepName::Visualizing)
            } else {
                Some(StepName::Explaining)
            };
        }
        Err(failure) => {
            warn!(session = %state.session_id, %failure, "query execution failed");
            state.sql_error = Some(failure.to_string());
            state.hint = Some(StepName::Explaining);
        }
    }

    state.mark_completed(StepName::Querying);
    Ok(())
}

#[cfg(test)]
mod tests {
    use datapilot_core::SessionId;
    use datapilot_test_utils::{MockProvider, MockStorage};

    use super::*;
    use crate::planner::build_data_plan;

    fn data_state(needs_chart: bool) -> PipelineState {
        let mut state = PipelineState::new("show me total sales", SessionId("s".into()));
        state.plan = build_data_plan(needs_chart);
        state.completed.insert(StepName::Planning);
        state
    }

    #[tokio::test]
    async fn successful_query_stores_rows_and_hints_onward() {
        let provider =
            MockProvider::with_responses(vec!["```sql\nSELECT * FROM orders\n```".to_string()]);
        let storage = MockStorage::with_rows(vec![("region", "North"), ("region", "South")]);

        let mut state = data_state(false);
        run_querying(&mut state, &provider, &storage).await.unwrap();

        assert_eq!(state.sql.as_deref(), Some("SELECT * FROM orders"));
        assert_eq!(state.rows.len(), 2);
        assert!(state.summary.is_some());
        assert!(state.sql_error.is_none());
        assert_eq!(state.hint, Some(StepName::Explaining));
        assert!(state.completed.contains(&StepName::Querying));
    }

    #[tokio::test]
    async fn chart_plan_hints_to_visualizing() {
        let provider = MockProvider::with_responses(vec!["SELECT 1".to_string()]);
        let storage = MockStorage::with_rows(vec![("n", "1")]);

        let mut state = data_state(true);
        run_querying(&mut state, &provider, &storage).await.unwrap();

        assert_eq!(state.hint, Some(StepName::Visualizing));
    }

    #[tokio::test]
    async fn guard_rejection_skips_storage_and_hints_to_explaining() {
        let provider =
            MockProvider::with_responses(vec!["DROP TABLE orders".to_string()]);
        // Storage that would fail the test if touched.
        let storage = MockStorage::failing("storage must not be called");

        let mut state = data_state(true);
        run_querying(&mut state, &provider, &storage).await.unwrap();

        let error = state.sql_error.as_deref().unwrap();
        assert!(error.starts_with("Invalid SQL query:"));
        assert!(state.rows.is_empty());
        assert_eq!(state.hint, Some(StepName::Explaining));
        assert_eq!(storage.query_count(), 0);
    }

    #[tokio::test]
    async fn execution_failure_is_captured_not_propagated() {
        let provider = MockProvider::with_responses(vec!["SELECT * FROM nowhere".to_string()]);
        let storage = MockStorage::failing("no such table: nowhere");

        let mut state = data_state(false);
        run_querying(&mut state, &provider, &storage).await.unwrap();

        assert!(state.sql_error.as_deref().unwrap().contains("no such table"));
        assert_eq!(state.hint, Some(StepName::Explaining));
        assert!(state.completed.contains(&StepName::Querying));
    }
}
