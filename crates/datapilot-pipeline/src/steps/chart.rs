// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The visualizing step: turn result rows into a rendered chart.

use std::str::FromStr;

use tracing::{debug, info, warn};

use datapilot_core::{ChartAdapter, ChartSpec, ChartType, DatapilotError, ProviderAdapter};
use datapilot_router::StepName;

use crate::prompts;
use crate::state::PipelineState;

/// Parses a chart spec from model output.
///
/// Tries a fenced or bare JSON object first; falls back to scanning
/// `key: value` lines. Anything unusable keeps the defaults.
pub fn parse_chart_spec(response: &str) -> ChartSpec {
    let candidate = if let Some((_, rest)) = response.split_once("```json") {
        rest.split_once("```").map(|(body, _)| body).unwrap_or(rest)
    } else if let Some((_, rest)) = response.split_once("```") {
        rest.split_once("```").map(|(body, _)| body).unwrap_or(rest)
    } else {
        response
    };

    if let Ok(spec) = serde_json::from_str::<ChartSpec>(candidate.trim()) {
        return spec;
    }

    // Key-value fallback for models that ignored the JSON format.
    let mut spec = ChartSpec::default();
    for line in response.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == '-').trim();
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'' || c == ',');
        match key.to_lowercase().as_str() {
            "chart_type" => {
                if let Ok(chart_type) = ChartType::from_str(&value.to_lowercase()) {
                    spec.chart_type = chart_type;
                }
            }
            "x_column" => spec.x_column = value.to_string(),
            "y_column" => spec.y_column = value.to_string(),
            "title" => spec.title = value.to_string(),
            _ => {}
        }
    }
    debug!(chart_type = %spec.chart_type, "chart spec parsed from key-value fallback");
    spec
}

/// Asks the model for a chart recommendation and renders it.
///
/// Skipped entirely when there is nothing to draw: no rows, a failed query,
/// or a plan whose chart step is the explicit no-op. Rendering failures are
/// captured into `chart_error`; the pipeline proceeds to explanation
/// without a chart.
pub async fn run_visualizing(
    state: &mut PipelineState,
    provider: &dyn ProviderAdapter,
    renderer: &dyn ChartAdapter,
) -> Result<(), DatapilotError> {
    if state.rows.is_empty() || state.sql_error.is_some() || !state.plan_requires_chart() {
        debug!(session = %state.session_id, "nothing to visualize, skipping");
        state.hint = Some(StepName::Explaining);
        state.mark_completed(StepName::Visualizing);
        return Ok(());
    }

    let sample = sample_rows_json(state, 5);
    let prompt = prompts::chart_prompt(
        &state.user_query,
        state.sql.as_deref().unwrap_or(""),
        &sample,
    );
    let response = provider.complete(&prompt).await?;
    let spec = parse_chart_spec(&response);

    match renderer.render(&state.rows, &spec).await {
        Ok(path) => {
            info!(session = %state.session_id, chart = %path, "chart rendered");
            state.chart_path = Some(path);
        }
        Err(failure) => {
            warn!(session = %state.session_id, %failure, "chart generation failed");
            state.chart_error = Some(failure.to_string());
        }
    }

    state.hint = Some(StepName::Explaining);
    state.mark_completed(StepName::Visualizing);
    Ok(())
}

/// Serializes up to `limit` rows for prompt context.
pub(crate) fn sample_rows_json(state: &PipelineState, limit: usize) -> String {
    let sample: Vec<_> = state.rows.iter().take(limit).collect();
    serde_json::to_string(&sample).unwrap_or_else(|_| "[]".to_string())
}
