// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safe arithmetic evaluation for the copilot's fast path.
//!
//! Extracts a candidate expression from free text, normalizes it, validates
//! it against a strict character allowlist, and evaluates it with a
//! restricted recursive-descent parser. The evaluator never executes
//! unrestricted code: there is no delegation to any general-purpose
//! expression or string evaluator, which is the core safety invariant here.

mod parser;

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::parser::EvalFailure;

/// Why an arithmetic question could not be answered.
///
/// Every variant surfaces as a user-facing message via [`answer`]; none of
/// them propagates past the pipeline driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithError {
    /// No expression substring matched the recognized question shapes.
    #[error("no arithmetic expression found in the query")]
    NoExpressionFound,

    /// The extracted expression contains characters outside `[0-9+-*/().]`
    /// after normalization.
    #[error("the expression contains invalid characters")]
    InvalidCharacters,

    /// The expression is malformed or uses an operation outside the
    /// restricted grammar.
    #[error("unsupported operation in expression `{0}`")]
    UnsupportedOperation(String),

    /// A division whose divisor evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Question shapes an expression can be pulled out of. Same family as the
/// classifier's arithmetic patterns, with a capture group for the run.
static EXPRESSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"what\s+is\s+([\d\s+\-*/().×÷]+)",
        r"calculate\s+([\d\s+\-*/().×÷]+)",
        r"compute\s+([\d\s+\-*/().×÷]+)",
        r"solve\s+([\d\s+\-*/().×÷]+)",
        r"equals?\s*to\s*([\d\s+\-*/().×÷]+)",
        r"^([\d\s+\-*/().×÷]+)\s*\??$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("expression pattern must compile"))
    .collect()
});

static ALLOWED_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d+\-*/().]+$").expect("allowlist pattern must compile"));

/// Extracts the candidate expression substring from a free-text question.
pub fn extract_expression(query: &str) -> Option<String> {
    let lower = query.to_lowercase();
    let lower = lower.trim();
    EXPRESSION_PATTERNS
        .iter()
        .find_map(|p| p.captures(lower))
        .map(|caps| caps[1].trim().to_string())
}

/// Evaluates an arithmetic question end to end: extract, normalize,
/// validate, parse, evaluate.
pub fn evaluate(query: &str) -> Result<f64, ArithError> {
    let raw = extract_expression(query).ok_or(ArithError::NoExpressionFound)?;

    // Normalize: strip whitespace, map unicode multiply/divide signs.
    let expression: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .collect();

    if !ALLOWED_EXPRESSION.is_match(&expression) {
        return Err(ArithError::InvalidCharacters);
    }

    parser::parse_and_eval(&expression).map_err(|failure| match failure {
        EvalFailure::DivisionByZero => ArithError::DivisionByZero,
        EvalFailure::Syntax => ArithError::UnsupportedOperation(expression.clone()),
    })
}

/// Renders a numeric result the way a person would write it: integer-valued
/// results as integers, everything else with six significant digits,
/// trailing zeros trimmed, falling back to scientific notation outside the
/// `1e-4..1e6` magnitude range (C's `%g` conventions).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    let magnitude = value.abs().log10().floor() as i32;
    if !(-4..6).contains(&magnitude) {
        // Five mantissa decimals is six significant digits.
        let rendered = format!("{value:.5e}");
        if let Some((mantissa, exponent)) = rendered.split_once('e') {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{mantissa}e{sign}{:02}", exponent.abs());
        }
        return rendered;
    }

    let decimals = (5 - magnitude).max(0) as usize;
    let rendered = format!("{value:.decimals$}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Answers an arithmetic question with a user-facing message.
///
/// Failures become plain-language messages; nothing here ever raises past
/// the caller.
pub fn answer(query: &str) -> String {
    match evaluate(query) {
        Ok(value) => format!("The answer is {}", format_number(value)),
        Err(ArithError::NoExpressionFound) => {
            "I couldn't find a mathematical expression in your query.".to_string()
        }
        Err(ArithError::InvalidCharacters) => {
            "The expression contains invalid characters.".to_string()
        }
        Err(ArithError::DivisionByZero) => {
            "Error: Division by zero is not allowed.".to_string()
        }
        Err(ArithError::UnsupportedOperation(expression)) => format!(
            "Error: Could not evaluate the expression '{expression}'. Please check your math syntax."
        ),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn extracts_from_question_prefixes() {
        assert_eq!(extract_expression("What is 2+3*4").as_deref(), Some("2+3*4"));
        assert_eq!(
            extract_expression("calculate (100 - 25) / 3").as_deref(),
            Some("(100 - 25) / 3")
        );
        assert_eq!(extract_expression("2+2?").as_deref(), Some("2+2"));
        assert_eq!(extract_expression("tell me a joke"), None);
    }

    #[test]
    fn evaluate_respects_precedence() {
        assert_eq!(evaluate("what is 2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("(100-25)/3").unwrap(), 25.0);
    }

    #[test]
    fn unicode_operators_are_normalized() {
        assert_eq!(evaluate("what is 6×7").unwrap(), 42.0);
        assert_eq!(evaluate("compute 9÷3").unwrap(), 3.0);
    }

    #[test]
    fn division_by_zero_is_its_own_error() {
        assert_eq!(evaluate("5/0"), Err(ArithError::DivisionByZero));
        assert_eq!(answer("5/0"), "Error: Division by zero is not allowed.");
    }

    #[test]
    fn missing_expression_is_reported() {
        assert_eq!(evaluate("what time is it"), Err(ArithError::NoExpressionFound));
        assert_eq!(
            answer("what time is it"),
            "I couldn't find a mathematical expression in your query."
        );
    }

    #[test]
    fn malformed_syntax_is_reported_with_the_expression() {
        assert_eq!(
            evaluate("what is 2++"),
            Err(ArithError::UnsupportedOperation("2++".to_string()))
        );
        assert!(answer("what is 2++").contains("'2++'"));
    }

    #[test]
    fn integer_results_render_without_decimals() {
        assert_eq!(answer("2+2"), "The answer is 4");
        assert_eq!(answer("what is 2+3*4"), "The answer is 14");
        assert_eq!(answer("(100-25)/3"), "The answer is 25");
    }

    #[test]
    fn fractional_results_are_trimmed() {
        assert_eq!(answer("7/2"), "The answer is 3.5");
        assert_eq!(answer("10/3"), "The answer is 3.33333");
    }

    #[test]
    fn large_results_keep_six_significant_digits() {
        assert_eq!(answer("10000/3"), "The answer is 3333.33");
        assert_eq!(answer("100000/3"), "The answer is 33333.3");
    }

    #[test]
    fn tiny_results_switch_to_scientific_notation() {
        assert_eq!(answer("1/30000"), "The answer is 3.33333e-05");
        assert_eq!(format_number(2.5e-5), "2.5e-05");
    }

    #[test]
    fn format_number_edge_cases() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3333.3333333), "-3333.33");
        assert_eq!(format_number(2500000.5), "2.5e+06");
    }

    proptest! {
        /// The evaluator is total over arbitrary text: it may fail, but it
        /// never panics.
        #[test]
        fn evaluate_never_panics(input in ".{0,64}") {
            let _ = evaluate(&input);
            let _ = answer(&input);
        }
    }
}
