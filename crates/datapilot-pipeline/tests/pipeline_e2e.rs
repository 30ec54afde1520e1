// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete request pipeline.
//!
//! Each test wires a fresh `Pipeline` over mock adapters, so tests are
//! independent, order-insensitive, and never reach a model endpoint or
//! database.

use std::sync::Arc;

use datapilot_config::DatapilotConfig;
use datapilot_pipeline::Pipeline;
use datapilot_test_utils::{MockChart, MockProvider, MockStorage};

fn pipeline(
    provider: Arc<MockProvider>,
    storage: Arc<MockStorage>,
) -> Pipeline {
    Pipeline::new(
        provider,
        storage,
        Arc::new(MockChart::new()),
        DatapilotConfig::default(),
    )
}

// ---- Fast paths ----

#[tokio::test]
async fn arithmetic_is_answered_without_any_collaborator() {
    let provider = Arc::new(MockProvider::new());
    let storage = Arc::new(MockStorage::failing("must not be called"));
    let pipeline = pipeline(provider.clone(), storage.clone());

    let response = pipeline.process("2+2", None).await;

    assert_eq!(response.answer, "The answer is 4");
    assert_eq!(response.elapsed_ms, Some(0.0));
    assert!(response.error.is_none());
    assert_eq!(provider.call_count(), 0);
    assert_eq!(storage.query_count(), 0);
}

#[tokio::test]
async fn off_topic_questions_get_a_canned_redirect() {
    let provider = Arc::new(MockProvider::new());
    let storage = Arc::new(MockStorage::failing("must not be called"));
    let pipeline = pipeline(provider.clone(), storage.clone());

    let response = pipeline.process("What is MapReduce?", None).await;

    assert!(response.answer.contains("MapReduce is a programming model"));
    assert_eq!(response.elapsed_ms, Some(0.0));
    assert!(response.sql.is_none());
    assert_eq!(provider.call_count(), 0);
    assert_eq!(storage.query_count(), 0);
}

// ---- Full data path ----

#[tokio::test]
async fn data_question_runs_query_and_explanation() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "```sql\nSELECT region, SUM(amount) AS total FROM orders GROUP BY region\n```"
            .to_string(),
        "Sales were strongest in the North.".to_string(),
    ]));
    let storage = Arc::new(MockStorage::with_rows(vec![
        ("region", "North"),
        ("region", "South"),
    ]));
    let pipeline = pipeline(provider.clone(), storage.clone());

    let response = pipeline.process("show me total sales by region", None).await;

    assert_eq!(response.answer, "Sales were strongest in the North.");
    assert_eq!(
        response.sql.as_deref(),
        Some("SELECT region, SUM(amount) AS total FROM orders GROUP BY region")
    );
    assert_eq!(response.rows.len(), 2);
    assert!(response.summary.is_some());
    assert!(response.chart_path.is_none());
    assert!(response.error.is_none());
    assert!(response.elapsed_ms.unwrap() >= 0.0);
    // SQL generation plus explanation, nothing more.
    assert_eq!(provider.call_count(), 2);
    assert_eq!(storage.query_count(), 1);
}

#[tokio::test]
async fn chart_request_also_renders_a_chart() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "SELECT region, SUM(amount) AS total FROM orders GROUP BY region".to_string(),
        "{\"chart_type\": \"bar\", \"x_column\": \"region\", \"y_column\": \"total\"}"
            .to_string(),
        "The bar chart shows the North leading.".to_string(),
    ]));
    let storage = Arc::new(MockStorage::with_rows(vec![
        ("region", "North"),
        ("region", "South"),
    ]));
    let pipeline = pipeline(provider.clone(), storage.clone());

    let response = pipeline
        .process("plot total sales by region as a bar chart", None)
        .await;

    assert_eq!(response.answer, "The bar chart shows the North leading.");
    assert!(response.chart_path.is_some());
    assert!(response.error.is_none());
    assert_eq!(provider.call_count(), 3);
}

// ---- Degraded paths ----

#[tokio::test]
async fn rejected_sql_never_reaches_storage() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "DROP TABLE orders".to_string(),
        "I could not run that query safely.".to_string(),
    ]));
    let storage = Arc::new(MockStorage::failing("must not be called"));
    let pipeline = pipeline(provider.clone(), storage.clone());

    let response = pipeline.process("show me total sales by region", None).await;

    assert_eq!(response.answer, "I could not run that query safely.");
    assert!(response
        .error
        .as_deref()
        .unwrap()
        .starts_with("Invalid SQL query:"));
    assert!(response.rows.is_empty());
    assert_eq!(storage.query_count(), 0);
}

#[tokio::test]
async fn storage_failure_still_produces_an_answer() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "SELECT * FROM nowhere".to_string(),
        "The query failed because the table does not exist.".to_string(),
    ]));
    let storage = Arc::new(MockStorage::failing("no such table: nowhere"));
    let pipeline = pipeline(provider.clone(), storage.clone());

    let response = pipeline.process("show me total sales by region", None).await;

    assert_eq!(
        response.answer,
        "The query failed because the table does not exist."
    );
    assert!(response.error.as_deref().unwrap().contains("no such table"));
    assert!(response.rows.is_empty());
}

// ---- Envelope shaping ----

#[tokio::test]
async fn returned_rows_are_capped() {
    let values: Vec<String> = (0..60).map(|n| n.to_string()).collect();
    let pairs: Vec<(&str, &str)> = values.iter().map(|v| ("n", v.as_str())).collect();

    let provider = Arc::new(MockProvider::with_responses(vec![
        "SELECT n FROM numbers".to_string(),
        "Sixty rows came back.".to_string(),
    ]));
    let storage = Arc::new(MockStorage::with_rows(pairs));
    let pipeline = pipeline(provider, storage);

    let response = pipeline.process("show me total sales by region", None).await;

    assert_eq!(response.rows.len(), 50);
    assert_eq!(response.summary.as_ref().unwrap().shape.0, 60);
}

#[tokio::test]
async fn session_id_is_optional() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "SELECT 1".to_string(),
        "One row.".to_string(),
    ]));
    let storage = Arc::new(MockStorage::with_rows(vec![("n", "1")]));
    let pipeline = pipeline(provider, storage);

    let response = pipeline
        .process("show me total sales by region", Some("abc123".to_string()))
        .await;

    assert!(response.error.is_none());
    assert_eq!(response.answer, "One row.");
}
