/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! The in-call calculator panel.
//!
//! Expressions are evaluated by a small recursive-descent parser that accepts
//! numbers, unary `+`/`-`, the four binary operators and parentheses.
//! Nothing else is ever evaluated.

use log::debug;
use std::iter::Peekable;
use std::str::Chars;

use crate::constants::{CALC_ERROR_CLEAR_MS, CALC_ERROR_TEXT};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    display: String,
    /// Set while the display shows the error text.
    error_since_ms: Option<f64>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.error_since_ms.is_some()
    }

    /// Append a key press (`"7"`, `"+"`, `"("`...). Typing over the error text replaces it.
    pub fn input(&mut self, token: &str) {
        if self.error_since_ms.take().is_some() {
            self.display.clear();
        }
        self.display.push_str(token);
    }

    pub fn clear(&mut self) {
        self.display.clear();
        self.error_since_ms = None;
    }

    /// Replace the display with the value of the expression, or with the error
    /// text if it does not parse or has no finite value.
    pub fn evaluate(&mut self, now_ms: f64) {
        match evaluate(&self.display) {
            Some(value) => {
                self.display = format_number(value);
                self.error_since_ms = None;
            }
            None => {
                debug!("calculator rejected {:?}", self.display);
                self.display = CALC_ERROR_TEXT.to_string();
                self.error_since_ms = Some(now_ms);
            }
        }
    }

    /// Clear an error that has been shown for long enough. Returns true if the display changed.
    pub fn refresh(&mut self, now_ms: f64) -> bool {
        match self.error_since_ms {
            Some(since) if now_ms - since >= CALC_ERROR_CLEAR_MS => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}

/// Evaluate an arithmetic expression. `None` on syntax error or a non-finite result.
pub fn evaluate(expression: &str) -> Option<f64> {
    let mut parser = Parser {
        chars: expression.chars().peekable(),
        depth: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    if parser.chars.peek().is_some() || !value.is_finite() {
        return None;
    }
    Some(value)
}

fn format_number(value: f64) -> String {
    // Avoid rendering negative zero.
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Deepest parenthesis nesting accepted before the expression is rejected.
const MAX_DEPTH: usize = 64;

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    depth: usize,
}

impl Parser<'_> {
    fn skip_ws(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        self.chars.next_if_eq(&expected).is_some()
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Some(value);
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                value /= self.factor()?;
            } else {
                return Some(value);
            }
        }
    }

    // factor := ('+' | '-')* (number | '(' expr ')')
    fn factor(&mut self) -> Option<f64> {
        let mut negative = false;
        loop {
            if self.eat('-') {
                negative = !negative;
            } else if !self.eat('+') {
                break;
            }
        }
        let value = if self.eat('(') {
            if self.depth == MAX_DEPTH {
                return None;
            }
            self.depth += 1;
            let inner = self.expr()?;
            self.depth -= 1;
            if !self.eat(')') {
                return None;
            }
            inner
        } else {
            self.number()?
        };
        Some(if negative { -value } else { value })
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_ws();
        let mut literal = String::new();
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
            literal.push(c);
        }
        if literal.is_empty() {
            return None;
        }
        literal.parse().ok()
    }
}
