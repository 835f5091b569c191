// src/classify.rs

use std::fmt;

use crate::ast::{Term, TermId};
use crate::memory::Heap;

/// Reducibility of a single node. Purely structural; recompute after
/// every reduction, since rewriting changes what is reducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redex {
    None,
    Beta,
    Arithmetic,
}

impl fmt::Display for Redex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Redex::None => write!(f, "none"),
            Redex::Beta => write!(f, "beta"),
            Redex::Arithmetic => write!(f, "arithmetic"),
        }
    }
}

pub fn classify(heap: &Heap, id: TermId) -> Redex {
    match heap.get(id) {
        Some(Term::App { func, .. }) => match heap.get(*func) {
            Some(Term::Lambda { .. }) => Redex::Beta,
            _ => Redex::None,
        },
        Some(Term::Arith { left, right, .. }) => {
            if is_literal(heap, *left) && is_literal(heap, *right) {
                Redex::Arithmetic
            } else {
                Redex::None
            }
        }
        Some(Term::Neg { operand }) => {
            if is_literal(heap, *operand) {
                Redex::Arithmetic
            } else {
                Redex::None
            }
        }
        _ => Redex::None,
    }
}

fn is_literal(heap: &Heap, id: TermId) -> bool {
    matches!(heap.get(id), Some(Term::Literal { .. }))
}
