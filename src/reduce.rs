// src/reduce.rs

use crate::ast::{ArithOp, Term, TermId};
use crate::classify::{classify, Redex};
use crate::error::ReduceError;
use crate::memory::Heap;
use crate::subst::substitute;

/// Performs exactly one reduction step at `node`, rewriting the node's
/// slot in place so every holder of the id sees the result. Never
/// searches for a redex on the caller's behalf; on any error the tree is
/// left untouched.
pub fn reduce_at(heap: &mut Heap, node: TermId) -> Result<(), ReduceError> {
    match classify(heap, node) {
        Redex::Beta => reduce_beta(heap, node),
        Redex::Arithmetic => reduce_arith(heap, node),
        Redex::None => {
            if heap.get(node).is_none() {
                Err(ReduceError::DanglingTerm(node))
            } else {
                Err(ReduceError::NotARedex)
            }
        }
    }
}

fn reduce_beta(heap: &mut Heap, node: TermId) -> Result<(), ReduceError> {
    let (func, arg) = match heap.get(node) {
        Some(Term::App { func, arg }) => (*func, *arg),
        _ => return Err(ReduceError::NotARedex),
    };
    let (param, body) = match heap.get(func) {
        Some(Term::Lambda { param, body, .. }) => (param.clone(), *body),
        _ => return Err(ReduceError::NotARedex),
    };

    substitute(heap, body, &param, arg)?;

    // The substituted body becomes the node's new contents; the lambda
    // shell and the original argument tree are stranded for collection.
    let contents = heap.take(body).ok_or(ReduceError::DanglingTerm(body))?;
    match heap.get_mut(node) {
        Some(slot) => {
            *slot = contents;
            Ok(())
        }
        None => Err(ReduceError::DanglingTerm(node)),
    }
}

fn reduce_arith(heap: &mut Heap, node: TermId) -> Result<(), ReduceError> {
    // All operands are read (and division by zero or overflow rejected)
    // before the node is mutated.
    let result = match heap.get(node) {
        Some(Term::Arith { op, left, right }) => {
            let left = literal_value(heap, *left)?;
            let right = literal_value(heap, *right)?;
            let checked = match op {
                ArithOp::Add => left.checked_add(right),
                ArithOp::Sub => left.checked_sub(right),
                ArithOp::Mul => left.checked_mul(right),
                ArithOp::Div => {
                    if right == 0 {
                        return Err(ReduceError::DivisionByZero);
                    }
                    left.checked_div(right)
                }
            };
            checked.ok_or(ReduceError::Overflow)?
        }
        Some(Term::Neg { operand }) => literal_value(heap, *operand)?
            .checked_neg()
            .ok_or(ReduceError::Overflow)?,
        _ => return Err(ReduceError::NotARedex),
    };
    match heap.get_mut(node) {
        Some(slot) => {
            *slot = Term::Literal { value: result };
            Ok(())
        }
        None => Err(ReduceError::DanglingTerm(node)),
    }
}

fn literal_value(heap: &Heap, id: TermId) -> Result<i64, ReduceError> {
    match heap.get(id) {
        Some(Term::Literal { value }) => Ok(*value),
        Some(_) => Err(ReduceError::NotARedex),
        None => Err(ReduceError::DanglingTerm(id)),
    }
}
