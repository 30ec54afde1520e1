// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive-descent parser and evaluator for the restricted arithmetic
//! grammar.
//!
//! Grammar (standard precedence, parentheses override):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Only binary `+ - * /`, unary `+ -`, and numeric literals are legal nodes.
//! The evaluator never delegates to any general-purpose expression engine;
//! input reaches it only after the character allowlist check upstream.

/// Why parsing or evaluation failed. Mapped to the public error type by the
/// crate root, which holds the expression text for the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EvalFailure {
    /// Malformed syntax or an unsupported construct.
    Syntax,
    /// A division whose right-hand side evaluated to zero.
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnaryOp {
    Neg,
    Pos,
}

/// Expression tree over numeric literals.
#[derive(Debug, Clone)]
enum Expr {
    Number(f64),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalFailure> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let token = match bytes[i] {
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'0'..=b'9' | b'.' => {
                let start = i;
                while i < bytes.len() && matches!(bytes[i], b'0'..=b'9' | b'.') {
                    i += 1;
                }
                let literal = &input[start..i];
                let value = literal.parse::<f64>().map_err(|_| EvalFailure::Syntax)?;
                tokens.push(Token::Number(value));
                continue;
            }
            // Upstream allowlisting makes this unreachable; fail closed anyway.
            _ => return Err(EvalFailure::Syntax),
        };
        tokens.push(token);
        i += 1;
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, EvalFailure> {
        let mut node = self.term()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.term()?;
            node = Expr::Binary(op, Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, EvalFailure> {
        let mut node = self.unary()?;
        while let Some(token) = self.peek() {
            let op = match token {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.unary()?;
            node = Expr::Binary(op, Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<Expr, EvalFailure> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Unary(UnaryOp::Neg, Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                Ok(Expr::Unary(UnaryOp::Pos, Box::new(self.unary()?)))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, EvalFailure> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::LParen) => {
                let node = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(node),
                    _ => Err(EvalFailure::Syntax),
                }
            }
            _ => Err(EvalFailure::Syntax),
        }
    }
}

fn evaluate(expr: &Expr) -> Result<f64, EvalFailure> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Unary(UnaryOp::Neg, inner) => Ok(-evaluate(inner)?),
        Expr::Unary(UnaryOp::Pos, inner) => evaluate(inner),
        Expr::Binary(op, lhs, rhs) => {
            let left = evaluate(lhs)?;
            let right = evaluate(rhs)?;
            match op {
                BinaryOp::Add => Ok(left + right),
                BinaryOp::Sub => Ok(left - right),
                BinaryOp::Mul => Ok(left * right),
                BinaryOp::Div => {
                    if right == 0.0 {
                        Err(EvalFailure::DivisionByZero)
                    } else {
                        Ok(left / right)
                    }
                }
            }
        }
    }
}

/// Parses a normalized expression string and evaluates it with
/// double-precision semantics.
pub(crate) fn parse_and_eval(input: &str) -> Result<f64, EvalFailure> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(&tokens);
    let tree = parser.expr()?;
    // Trailing tokens mean the grammar did not cover the whole input.
    if parser.pos != tokens.len() {
        return Err(EvalFailure::Syntax);
    }
    evaluate(&tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_respected() {
        assert_eq!(parse_and_eval("2+3*4").unwrap(), 14.0);
        assert_eq!(parse_and_eval("2*3+4").unwrap(), 10.0);
        assert_eq!(parse_and_eval("10-4/2").unwrap(), 8.0);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(parse_and_eval("(2+3)*4").unwrap(), 20.0);
        assert_eq!(parse_and_eval("(100-25)/3").unwrap(), 25.0);
        assert_eq!(parse_and_eval("((1+2))").unwrap(), 3.0);
    }

    #[test]
    fn unary_operators() {
        assert_eq!(parse_and_eval("-3+5").unwrap(), 2.0);
        assert_eq!(parse_and_eval("+4").unwrap(), 4.0);
        assert_eq!(parse_and_eval("2*-3").unwrap(), -6.0);
        assert_eq!(parse_and_eval("--2").unwrap(), 2.0);
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(parse_and_eval("1.5*2").unwrap(), 3.0);
        assert_eq!(parse_and_eval("0.1+0.2").unwrap(), 0.1 + 0.2);
    }

    #[test]
    fn division_by_zero_is_distinct() {
        assert_eq!(parse_and_eval("5/0"), Err(EvalFailure::DivisionByZero));
        assert_eq!(parse_and_eval("1/(2-2)"), Err(EvalFailure::DivisionByZero));
        // Still a syntax universe away from malformed input.
        assert_eq!(parse_and_eval("5//0"), Err(EvalFailure::Syntax));
    }

    #[test]
    fn malformed_input_is_a_syntax_failure() {
        for input in ["", "2+", "*3", "(1+2", "1+2)", "1.2.3", "()", "5..2"] {
            assert_eq!(parse_and_eval(input), Err(EvalFailure::Syntax), "input: {input}");
        }
    }
}
