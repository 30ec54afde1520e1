// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plan construction for one request.
//!
//! The planning step is purely heuristic: classification picks one of three
//! plan shapes. [`parse_plan`] additionally understands model-written plans
//! (JSON or numbered text) with an observable fallback when the output is
//! malformed.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{info, warn};

use datapilot_router::{classifier, StepName};

use crate::state::PipelineState;

/// The closed set of plan step actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum StepAction {
    /// Answer an arithmetic question directly, no pipeline needed.
    #[strum(serialize = "Answer directly")]
    AnswerDirectly,
    /// Redirect an off-topic question back to data analysis.
    #[strum(serialize = "Handle off-topic")]
    HandleOffTopic,
    /// Generate and execute the retrieval query.
    #[strum(serialize = "Generate SQL query")]
    GenerateSql,
    /// Render a chart from the result rows.
    #[strum(serialize = "Generate chart")]
    GenerateChart,
    /// Explicit no-op: the user did not ask for a chart.
    #[strum(serialize = "Skip chart")]
    SkipChart,
    /// Produce the natural-language explanation.
    #[strum(serialize = "Explain results")]
    ExplainResults,
    /// Catch-all for model-written or fallback plan steps.
    #[strum(serialize = "Process query")]
    ProcessQuery,
}

/// A single step of an execution plan. Immutable once created; ordering is
/// advisory (used for prompt context), not enforced by the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    /// Order of this step within the plan.
    pub number: u32,
    /// What this step does.
    pub action: StepAction,
    /// Human-readable description.
    pub description: String,
    /// Whether this step needs query execution.
    pub requires_sql: bool,
    /// Whether this step needs chart generation.
    pub requires_chart: bool,
}

/// Single-step plan for an arithmetic question.
pub fn build_arithmetic_plan() -> Vec<PlanStep> {
    vec![PlanStep {
        number: 1,
        action: StepAction::AnswerDirectly,
        description: "Answer the arithmetic question directly".to_string(),
        requires_sql: false,
        requires_chart: false,
    }]
}

/// Single-step plan for an off-topic question.
pub fn build_off_topic_plan() -> Vec<PlanStep> {
    vec![PlanStep {
        number: 1,
        action: StepAction::HandleOffTopic,
        description: "Provide helpful response for off-topic query and guide back to data analysis"
            .to_string(),
        requires_sql: false,
        requires_chart: false,
    }]
}

/// Three-step plan for a data question.
///
/// The chart step is always emitted, tagged as an explicit skip when no
/// chart was requested; this keeps the router's step-count logic uniform.
pub fn build_data_plan(needs_chart: bool) -> Vec<PlanStep> {
    vec![
        PlanStep {
            number: 1,
            action: StepAction::GenerateSql,
            description: "Create SQL query to retrieve data for analysis".to_string(),
            requires_sql: true,
            requires_chart: false,
        },
        PlanStep {
            number: 2,
            action: if needs_chart {
                StepAction::GenerateChart
            } else {
                StepAction::SkipChart
            },
            description: if needs_chart {
                "Create visualization of the data".to_string()
            } else {
                "No chart requested".to_string()
            },
            requires_sql: false,
            requires_chart: needs_chart,
        },
        PlanStep {
            number: 3,
            action: StepAction::ExplainResults,
            description: "Provide natural language explanation of the analysis".to_string(),
            requires_sql: false,
            requires_chart: false,
        },
    ]
}

/// The planning step: classify the query, pick a plan shape, and steer the
/// router toward the first real step.
pub fn run_planning(state: &mut PipelineState) {
    if classifier::is_arithmetic(&state.user_query) {
        state.plan = build_arithmetic_plan();
        state.hint = Some(StepName::Explaining);
    } else if !classifier::is_data_related(&state.user_query) {
        state.plan = build_off_topic_plan();
        state.hint = Some(StepName::Explaining);
    } else {
        let needs_chart = classifier::wants_chart(&state.user_query);
        state.plan = build_data_plan(needs_chart);
        state.hint = Some(StepName::Querying);
    }
    info!(
        session = %state.session_id,
        steps = state.plan.len(),
        "execution plan built"
    );
    state.mark_completed(StepName::Planning);
}

/// Formats a plan as an ordered textual digest, one line per step, for
/// inclusion in downstream prompts.
pub fn format_plan(plan: &[PlanStep]) -> String {
    let mut digest = String::new();
    for step in plan {
        digest.push_str(&format!("{}. {}\n", step.number, step.description));
    }
    digest
}

#[derive(Deserialize)]
struct RawPlanStep {
    #[serde(default)]
    action: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    requires_sql: bool,
    #[serde(default)]
    requires_chart: bool,
}

fn action_for_flags(requires_sql: bool, requires_chart: bool) -> StepAction {
    if requires_sql {
        StepAction::GenerateSql
    } else if requires_chart {
        StepAction::GenerateChart
    } else {
        StepAction::ProcessQuery
    }
}

/// Parses a model-written plan into structured steps.
///
/// Accepts a JSON array of step objects, or a numbered text format with
/// `sql:`/`chart:` attribute lines. Malformed output falls back to a
/// single query step; the fallback is logged, never silent.
///
/// [`run_planning`] is heuristic and does not call this; together with
/// [`crate::prompts::planner_prompt`] it supports embedders that delegate
/// planning to the provider.
pub fn parse_plan(plan_text: &str) -> Vec<PlanStep> {
    // JSON form first, in case the model returned structured output.
    if let Ok(serde_json::Value::Array(items)) = serde_json::from_str(plan_text) {
        let steps: Vec<PlanStep> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let raw: RawPlanStep = serde_json::from_value(item.clone()).ok()?;
                Some(PlanStep {
                    number: i as u32 + 1,
                    action: action_for_flags(raw.requires_sql, raw.requires_chart),
                    description: if raw.description.is_empty() {
                        raw.action
                    } else {
                        raw.description
                    },
                    requires_sql: raw.requires_sql,
                    requires_chart: raw.requires_chart,
                })
            })
            .collect();
        if !steps.is_empty() {
            return steps;
        }
    }

    // Numbered text form: "1. description", with optional attribute lines.
    let mut steps: Vec<PlanStep> = Vec::new();
    for line in plan_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let starts_numbered = line
            .char_indices()
            .take(3)
            .any(|(i, c)| c == '.' && line[..i].chars().all(|d| d.is_ascii_digit()) && i > 0);

        if starts_numbered {
            let (number_part, rest) = line.split_once('.').unwrap_or((line, ""));
            let number = number_part.trim().parse::<u32>().unwrap_or(steps.len() as u32 + 1);
            let description = rest.trim().to_string();
            steps.push(PlanStep {
                number,
                action: StepAction::ProcessQuery,
                description,
                requires_sql: false,
                requires_chart: false,
            });
        } else if let Some(last) = steps.last_mut() {
            let lower = line.to_lowercase();
            let affirmative = lower.contains("true") || lower.contains("yes");
            if lower.contains("sql") {
                last.requires_sql = affirmative;
                if affirmative {
                    last.action = StepAction::GenerateSql;
                }
            } else if lower.contains("chart") {
                last.requires_chart = affirmative;
                if affirmative && last.action != StepAction::GenerateSql {
                    last.action = StepAction::GenerateChart;
                }
            }
        }
    }

    if steps.is_empty() {
        warn!("plan output unparseable, falling back to a single query step");
        return vec![PlanStep {
            number: 1,
            action: StepAction::ProcessQuery,
            description: format!("Process the query: {plan_text}"),
            requires_sql: true,
            requires_chart: false,
        }];
    }

    steps
}
