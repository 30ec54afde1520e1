// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned responses for off-topic questions.
//!
//! Every response acknowledges the question and steers the user back to the
//! sales dataset. Topic-specific responses first, then generic buckets by
//! question shape, then a default capabilities blurb.

/// Known off-topic technology subjects with tailored redirects.
const TOPIC_RESPONSES: &[(&str, &str)] = &[
    (
        "mapreduce",
        "MapReduce is a programming model for processing large datasets across distributed systems. However, I'm designed to help you analyze your sales data! Try asking me about your orders, customers, or revenue trends.",
    ),
    (
        "machine learning",
        "Machine Learning involves algorithms that learn from data to make predictions. I'd love to help you discover patterns in your sales data instead! Ask me about customer trends or product performance.",
    ),
    (
        "artificial intelligence",
        "AI involves creating systems that can perform tasks requiring human intelligence. Speaking of intelligence, let me help you gain insights from your data! Try asking about sales by region or top customers.",
    ),
    (
        "blockchain",
        "Blockchain is a distributed ledger technology. While that's interesting, I'm here to help you understand your business data! Ask me about revenue trends or order patterns.",
    ),
    (
        "cloud computing",
        "Cloud computing delivers computing services over the internet. I'm focused on helping you analyze your local sales data though! Try asking about customer segments or product sales.",
    ),
];

const DEFINITION_WORDS: &[&str] = &["what is", "what are", "define", "explain"];
const TECHNICAL_WORDS: &[&str] = &["technology", "programming", "software", "algorithm", "system"];
const HOWTO_WORDS: &[&str] = &["how to", "how do", "tutorial", "guide"];
const EXTERNAL_WORDS: &[&str] = &["weather", "news", "sports", "entertainment"];

/// Produces a helpful redirect for a query that is not about the dataset.
pub fn respond(query: &str) -> String {
    let lower = query.to_lowercase();
    let lower = lower.trim();

    for (topic, response) in TOPIC_RESPONSES {
        if lower.contains(topic) {
            return (*response).to_string();
        }
    }

    let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if contains_any(DEFINITION_WORDS) {
        if contains_any(TECHNICAL_WORDS) {
            return "That's an interesting technical question! However, I'm specialized in analyzing sales and business data. I can help you explore your orders, customers, revenue trends, and create visualizations. Try asking me something like 'Show me sales by region' or 'What are the top products?'".to_string();
        }
        return "I'm a data analysis assistant focused on helping you understand your sales data. While I can't answer general questions, I'd be happy to help you analyze your orders, customers, products, or revenue! Try asking about trends, totals, or specific data insights.".to_string();
    }

    if contains_any(HOWTO_WORDS) {
        return "I'm designed to help you analyze your business data rather than provide tutorials. I can show you insights about your sales, customers, and products through natural language queries. Try asking 'How many orders this month?' or 'Show me top customers by revenue'.".to_string();
    }

    if contains_any(EXTERNAL_WORDS) {
        return "I don't have access to external information like weather or news. I'm specialized in analyzing your sales database! I can help you discover trends in your orders, analyze customer behavior, or create charts. Ask me about your business data instead!".to_string();
    }

    "I'm a data analysis copilot designed to help you understand your sales data. I can answer questions about your orders, customers, products, and revenue using natural language. Try asking something like:\n\n\u{2022} 'Show me total sales by region'\n\u{2022} 'What are the top 5 products?'\n\u{2022} 'How many customers do we have?'\n\u{2022} 'Create a chart of monthly revenue'\n\nWhat would you like to know about your data?"
        .to_string()
}
