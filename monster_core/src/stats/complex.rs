//! ComplexStats - Level-parameterized stats written as postfix formulas
//!
//! A formula is a whitespace-separated postfix expression. Operands are
//! numbers or `level`; operators are `+ - * /`, `power` (a^b), `sqrt` and
//! `middle` (median of the top three values).

use super::Stats;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Formula parse error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("empty formula")]
    Empty,
    #[error("unknown token '{0}' in formula")]
    UnknownToken(String),
    #[error("operator '{op}' needs {needed} operands at position {position}")]
    StackUnderflow {
        op: String,
        needed: usize,
        position: usize,
    },
    #[error("formula leaves {0} values on the stack, expected 1")]
    LeftoverOperands(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Level,
    Add,
    Sub,
    Mul,
    Div,
    Power,
    Sqrt,
    Middle,
}

impl Token {
    fn parse(raw: &str) -> Result<Token, StatError> {
        let token = match raw {
            "level" => Token::Level,
            "+" => Token::Add,
            "-" => Token::Sub,
            "*" => Token::Mul,
            "/" => Token::Div,
            "power" => Token::Power,
            "sqrt" => Token::Sqrt,
            "middle" => Token::Middle,
            other => other
                .parse::<f64>()
                .map(Token::Number)
                .map_err(|_| StatError::UnknownToken(other.to_string()))?,
        };
        Ok(token)
    }

    /// (operands consumed, values produced)
    fn arity(self) -> (usize, usize) {
        match self {
            Token::Number(_) | Token::Level => (0, 1),
            Token::Add | Token::Sub | Token::Mul | Token::Div | Token::Power => (2, 1),
            Token::Sqrt => (1, 1),
            Token::Middle => (3, 1),
        }
    }
}

/// A validated postfix formula. Validation guarantees evaluation never
/// underflows the stack and always ends with exactly one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Formula {
    source: String,
    tokens: Vec<Token>,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, StatError> {
        let tokens = source
            .split_whitespace()
            .map(Token::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if tokens.is_empty() {
            return Err(StatError::Empty);
        }

        let mut depth = 0usize;
        for (position, (raw, token)) in source.split_whitespace().zip(&tokens).enumerate() {
            let (needed, produced) = token.arity();
            if depth < needed {
                return Err(StatError::StackUnderflow {
                    op: raw.to_string(),
                    needed,
                    position,
                });
            }
            depth = depth - needed + produced;
        }
        if depth != 1 {
            return Err(StatError::LeftoverOperands(depth));
        }

        Ok(Formula {
            source: source.to_string(),
            tokens,
        })
    }

    /// Evaluate at `level` without rounding
    pub fn evaluate_raw(&self, level: u32) -> f64 {
        let mut stack: Vec<f64> = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let value = match *token {
                Token::Number(n) => n,
                Token::Level => level as f64,
                Token::Sqrt => pop(&mut stack).sqrt(),
                Token::Middle => {
                    let mut three = [pop(&mut stack), pop(&mut stack), pop(&mut stack)];
                    three.sort_by(|a, b| a.total_cmp(b));
                    three[1]
                }
                binary => {
                    let rhs = pop(&mut stack);
                    let lhs = pop(&mut stack);
                    match binary {
                        Token::Add => lhs + rhs,
                        Token::Sub => lhs - rhs,
                        Token::Mul => lhs * rhs,
                        Token::Div => lhs / rhs,
                        _ => lhs.powf(rhs),
                    }
                }
            };
            stack.push(value);
        }
        pop(&mut stack)
    }

    /// Evaluate at `level`, floored and clamped to a non-negative integer
    pub fn evaluate(&self, level: u32) -> u32 {
        // NaN and negatives saturate to 0
        self.evaluate_raw(level).floor() as u32
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

fn pop(stack: &mut Vec<f64>) -> f64 {
    stack.pop().unwrap_or(0.0)
}

impl TryFrom<String> for Formula {
    type Error = StatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Formula::parse(&value)
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> Self {
        formula.source
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Four formulas, one per stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexStats {
    pub attack: Formula,
    pub defense: Formula,
    pub speed: Formula,
    pub max_hp: Formula,
}

impl ComplexStats {
    pub fn new(attack: &str, defense: &str, speed: &str, max_hp: &str) -> Result<Self, StatError> {
        Ok(ComplexStats {
            attack: Formula::parse(attack)?,
            defense: Formula::parse(defense)?,
            speed: Formula::parse(speed)?,
            max_hp: Formula::parse(max_hp)?,
        })
    }
}

impl Stats for ComplexStats {
    fn attack(&self, level: u32) -> u32 {
        self.attack.evaluate(level)
    }

    fn defense(&self, level: u32) -> u32 {
        self.defense.evaluate(level)
    }

    fn speed(&self, level: u32) -> u32 {
        self.speed.evaluate(level)
    }

    fn max_hp(&self, level: u32) -> u32 {
        self.max_hp.evaluate(level)
    }
}
