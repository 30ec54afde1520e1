// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query classification.
//!
//! Classifies user questions as arithmetic, data-related, or off-topic using
//! zero-cost keyword and pattern rules. No LLM pre-call, no network, no
//! latency. All predicates are pure, deterministic, case-insensitive, and
//! total; evaluation order matters: arithmetic is checked before
//! data-relatedness.

use std::sync::LazyLock;

use regex::Regex;

/// Question prefixes and shapes that signal an arithmetic question.
static ARITHMETIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"what\s+is\s+[\d\s+\-*/().×÷]+",  // "what is 2+3*4"
        r"calculate\s+[\d\s+\-*/().×÷]+",  // "calculate 2+3*4"
        r"compute\s+[\d\s+\-*/().×÷]+",    // "compute 2+3*4"
        r"solve\s+[\d\s+\-*/().×÷]+",      // "solve 2+3*4"
        r"^[\d\s+\-*/().×÷]+\s*\??$",      // just "2+3*4" or "2+3*4?"
        r"equals?\s*to\s*[\d\s+\-*/().×÷]+", // "equals to 2+3"
    ]
    .iter()
    .map(|p| Regex::new(p).expect("arithmetic pattern must compile"))
    .collect()
});

/// Arithmetic vocabulary that, combined with a digit, signals arithmetic.
const ARITHMETIC_KEYWORDS: &[&str] = &[
    "add", "subtract", "multiply", "divide", "plus", "minus",
    "times", "divided by", "sum of", "difference of", "product of",
    "quotient of", "square root", "squared", "power", "exponent",
];

/// Domain vocabulary that overrides the digits-plus-operators signal: a query
/// mentioning these is presumed to be a data question that merely mentions
/// numbers.
const DATA_OVERRIDE_KEYWORDS: &[&str] = &[
    "table", "database", "data", "records", "rows", "columns",
    "sales", "orders", "customers", "products", "revenue",
    "count", "average", "total", "sum", "group by", "where",
    "select", "from", "show me", "find", "get", "list",
];

/// Data/analysis/visualization vocabulary for the data-relatedness gate.
const DATA_KEYWORDS: &[&str] = &[
    // Database operations
    "select", "from", "where", "group by", "order by", "having",
    "count", "sum", "average", "avg", "min", "max", "distinct",
    // Data analysis terms
    "data", "database", "table", "records", "rows", "columns",
    "sales", "orders", "customers", "products", "revenue", "profit",
    "total", "show me", "find", "get", "list", "display",
    "how many", "what are", "which", "who has", "when did",
    // Analysis terms
    "analyze", "analysis", "report", "summary", "breakdown",
    "trend", "pattern", "distribution", "comparison", "correlation",
    "top", "bottom", "highest", "lowest", "best", "worst",
    "by region", "by category", "by month", "by year", "by date",
    // Chart/visualization terms
    "chart", "graph", "plot", "visualize", "show chart", "create chart",
    "generate chart", "make chart", "draw chart", "visualization",
];

/// Interrogative shapes that suggest a data question even without keywords.
static DATA_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"how many .+ (are|were|in)",
        r"what (is|are) the .+ (sales|revenue|orders|customers)",
        r"show me .+ (data|information|records)",
        r"list .+ (customers|orders|products)",
        r"find .+ (with|having|where)",
        r"which .+ (has|have|had) the (most|least|highest|lowest)",
        r"total .+ (by|for|in)",
        r"average .+ (per|by|for)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("data pattern must compile"))
    .collect()
});

/// Vocabulary that means the user explicitly asked for a visualization.
const CHART_KEYWORDS: &[&str] = &[
    "chart", "graph", "plot", "visualize", "visualization",
    "show chart", "create chart", "generate chart", "make chart",
    "draw chart", "bar chart", "line chart", "pie chart",
    "scatter plot", "histogram", "give me graph", "also give me graph",
];

static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern must compile"));
static HAS_MATH_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-*/()×÷]").expect("operator pattern must compile"));

/// Returns true if the query is a simple arithmetic question.
///
/// Checked before [`is_data_related`]: a query carrying digits and operators
/// next to domain vocabulary is treated as a data question, not arithmetic.
pub fn is_arithmetic(query: &str) -> bool {
    let lower = query.to_lowercase();
    let lower = lower.trim();

    if ARITHMETIC_PATTERNS.iter().any(|p| p.is_match(lower)) {
        return true;
    }

    let has_digit = HAS_DIGIT.is_match(lower);

    if has_digit && ARITHMETIC_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }

    if has_digit && HAS_MATH_OPERATOR.is_match(lower) {
        // Numbers plus operators is likely arithmetic, unless domain
        // vocabulary says it's a data question that mentions numbers.
        return !DATA_OVERRIDE_KEYWORDS.iter().any(|k| lower.contains(k));
    }

    false
}

/// Returns true if the query is about the dataset (analysis, retrieval, or
/// visualization). A query failing this check is treated as off-topic.
pub fn is_data_related(query: &str) -> bool {
    let lower = query.to_lowercase();
    let lower = lower.trim();

    if DATA_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }

    DATA_PATTERNS.iter().any(|p| p.is_match(lower))
}

/// Returns true if the query explicitly requests a chart or visualization.
///
/// Consumed only by the plan builder, never by the classification gate.
pub fn wants_chart(query: &str) -> bool {
    let lower = query.to_lowercase();
    let lower = lower.trim();

    CHART_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_expressions_are_arithmetic() {
        assert!(is_arithmetic("2+3*4"));
        assert!(is_arithmetic("  (100 - 25) / 3  "));
        assert!(is_arithmetic("2+2?"));
    }

    #[test]
    fn question_prefixes_are_arithmetic() {
        assert!(is_arithmetic("What is 2+3*4"));
        assert!(is_arithmetic("calculate 10 * (4 - 2)"));
        assert!(is_arithmetic("compute 7/2"));
        assert!(is_arithmetic("solve 5 - 3"));
        assert!(is_arithmetic("what equals to 2+3"));
    }

    #[test]
    fn arithmetic_keywords_with_digits() {
        assert!(is_arithmetic("what is 5 plus 3"));
        assert!(is_arithmetic("12 divided by 4 please"));
        assert!(is_arithmetic("the sum of 3 and 4"));
    }

    #[test]
    fn arithmetic_keywords_without_digits_are_not_arithmetic() {
        assert!(!is_arithmetic("please add a column"));
        assert!(!is_arithmetic("how do I divide my attention"));
    }

    #[test]
    fn data_vocabulary_overrides_digits_and_operators() {
        // Digits alone never trigger arithmetic, and domain vocabulary wins
        // over digits-plus-operators.
        assert!(!is_arithmetic("show me total sales 2024"));
        assert!(!is_arithmetic("orders from 2023 - 2024 by region"));
    }

    #[test]
    fn plain_prose_is_not_arithmetic() {
        assert!(!is_arithmetic("What is MapReduce?"));
        assert!(!is_arithmetic("tell me a joke"));
        assert!(!is_arithmetic(""));
    }

    #[test]
    fn keyword_queries_are_data_related() {
        assert!(is_data_related("show me total sales by region"));
        assert!(is_data_related("SELECT something FROM somewhere"));
        assert!(is_data_related("top customers this year"));
        assert!(is_data_related("create a chart of monthly revenue"));
    }

    #[test]
    fn interrogative_patterns_are_data_related() {
        assert!(is_data_related("how many shipments are late"));
        assert!(is_data_related("what is the q3 revenue"));
        assert!(is_data_related("which rep has the most wins"));
    }

    #[test]
    fn off_topic_queries_are_not_data_related() {
        assert!(!is_data_related("What is MapReduce?"));
        assert!(!is_data_related("tell me about the weather"));
        assert!(!is_data_related(""));
    }

    #[test]
    fn chart_detection() {
        assert!(wants_chart("show me sales and also give me graph"));
        assert!(wants_chart("plot revenue by month"));
        assert!(wants_chart("I want a bar chart of orders"));
        assert!(!wants_chart("show me total sales by region"));
    }

    #[test]
    fn predicates_are_case_insensitive() {
        assert!(is_arithmetic("CALCULATE 2+2"));
        assert!(is_data_related("SHOW ME the SALES"));
        assert!(wants_chart("Give Me GRAPH of revenue"));
    }

    #[test]
    fn predicates_never_panic_on_odd_input() {
        for input in ["", "   ", "???", "×÷", "\u{0}", "((((", "42"] {
            let _ = is_arithmetic(input);
            let _ = is_data_related(input);
            let _ = wants_chart(input);
        }
    }
}
