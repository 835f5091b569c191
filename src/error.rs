// src/error.rs

use std::fmt;

use crate::ast::TermId;
use crate::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Grammar violation: `expected` describes the acceptable token kinds
    /// at this point, `got` is what the lexer actually produced.
    UnexpectedToken {
        expected: &'static str,
        got: TokenKind,
    },
    /// A lowercase identifier was used with no enclosing binder for it.
    FreeVariable { name: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, got } => {
                write!(f, "Parse error: expected {}, got {}", expected, got)
            }
            ParseError::FreeVariable { name } => write!(
                f,
                "Use of a free variable '{}'. Free variables are not allowed; \
                 use a capitalized constructor instead.",
                name
            ),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// Reduction was requested at a node the classifier marks as inert.
    NotARedex,
    /// Arithmetic reduction of `x / 0`. The node is left unchanged.
    DivisionByZero,
    /// The arithmetic result does not fit in an i64. The node is left
    /// unchanged.
    Overflow,
    /// The id does not name a live heap slot (e.g. it was collected).
    DanglingTerm(TermId),
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::NotARedex => write!(f, "Reduction error: the selected term is not a redex"),
            ReduceError::DivisionByZero => write!(f, "Reduction error: division by zero"),
            ReduceError::Overflow => write!(f, "Reduction error: arithmetic overflow"),
            ReduceError::DanglingTerm(id) => {
                write!(f, "Reduction error: term {} is no longer alive", id)
            }
        }
    }
}

impl std::error::Error for ReduceError {}
