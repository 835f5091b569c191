// src/subst.rs

use crate::ast::{Term, TermId};
use crate::error::ReduceError;
use crate::memory::Heap;

/// Replaces every free occurrence of `name` inside `target` with a fresh
/// deep clone of `replacement`, mutating the tree in place. Binders of
/// other names that would capture a free variable of `replacement` are
/// alpha-renamed first.
pub fn substitute(
    heap: &mut Heap,
    target: TermId,
    name: &str,
    replacement: TermId,
) -> Result<(), ReduceError> {
    // Clone the node out to avoid mutable borrow conflicts with the heap.
    let node = heap
        .get(target)
        .ok_or(ReduceError::DanglingTerm(target))?
        .clone();
    match node {
        Term::Var { name: var_name, .. } => {
            if var_name == name {
                let contents = heap
                    .clone_contents(replacement)
                    .ok_or(ReduceError::DanglingTerm(replacement))?;
                if let Some(slot) = heap.get_mut(target) {
                    *slot = contents;
                }
            }
            Ok(())
        }
        Term::Constr { .. } | Term::Literal { .. } => Ok(()),
        Term::Lambda { param, body, .. } => {
            if param == name {
                // Shadowed; the bound scope has no free occurrences.
                return Ok(());
            }
            if is_free(heap, &param, replacement) {
                let fresh = fresh_name(heap, &param, name, body, replacement);
                rename_free(heap, body, &param, &fresh)?;
                if let Some(Term::Lambda { param, .. }) = heap.get_mut(target) {
                    *param = fresh;
                }
            }
            substitute(heap, body, name, replacement)
        }
        Term::Let {
            name: bound,
            value,
            body,
            ..
        } => {
            // The bound name is not in scope for its own definition, so
            // the value is substituted even when `bound` shadows `name`.
            substitute(heap, value, name, replacement)?;
            if bound == name {
                return Ok(());
            }
            if is_free(heap, &bound, replacement) {
                let fresh = fresh_name(heap, &bound, name, body, replacement);
                rename_free(heap, body, &bound, &fresh)?;
                if let Some(Term::Let { name, .. }) = heap.get_mut(target) {
                    *name = fresh;
                }
            }
            substitute(heap, body, name, replacement)
        }
        Term::App { func, arg } => {
            substitute(heap, func, name, replacement)?;
            substitute(heap, arg, name, replacement)
        }
        Term::Arith { left, right, .. } => {
            substitute(heap, left, name, replacement)?;
            substitute(heap, right, name, replacement)
        }
        Term::Neg { operand } => substitute(heap, operand, name, replacement),
    }
}

/// Whether `name` occurs free in the tree rooted at `id`. A binder blocks
/// its own name; a `let`'s value is outside the binder's scope.
pub fn is_free(heap: &Heap, name: &str, id: TermId) -> bool {
    match heap.get(id) {
        Some(Term::Var { name: var_name, .. }) => var_name == name,
        Some(Term::Constr { .. }) | Some(Term::Literal { .. }) | None => false,
        Some(Term::Lambda { param, body, .. }) => param != name && is_free(heap, name, *body),
        Some(Term::Let {
            name: bound,
            value,
            body,
            ..
        }) => is_free(heap, name, *value) || (bound != name && is_free(heap, name, *body)),
        Some(Term::App { func, arg }) => is_free(heap, name, *func) || is_free(heap, name, *arg),
        Some(Term::Arith { left, right, .. }) => {
            is_free(heap, name, *left) || is_free(heap, name, *right)
        }
        Some(Term::Neg { operand }) => is_free(heap, name, *operand),
    }
}

// Deterministic fresh-name generation: append '_' until the candidate
// collides with nothing in the binder's body, no free variable of the
// replacement, and not the name being substituted itself (otherwise the
// renamed variable would be rewritten by the follow-up substitution).
// Checking for any occurrence in the body (not just free ones) keeps the
// rename from being captured by an inner binder that already uses the
// candidate.
fn fresh_name(
    heap: &Heap,
    base: &str,
    substituted: &str,
    body: TermId,
    replacement: TermId,
) -> String {
    let mut candidate = format!("{}_", base);
    while candidate == substituted
        || occurs(heap, &candidate, body)
        || is_free(heap, &candidate, replacement)
    {
        candidate.push('_');
    }
    candidate
}

fn occurs(heap: &Heap, name: &str, id: TermId) -> bool {
    match heap.get(id) {
        Some(Term::Var { name: var_name, .. }) => var_name == name,
        Some(Term::Constr { .. }) | Some(Term::Literal { .. }) | None => false,
        Some(Term::Lambda { param, body, .. }) => param == name || occurs(heap, name, *body),
        Some(Term::Let {
            name: bound,
            value,
            body,
            ..
        }) => bound == name || occurs(heap, name, *value) || occurs(heap, name, *body),
        Some(Term::App { func, arg }) => occurs(heap, name, *func) || occurs(heap, name, *arg),
        Some(Term::Arith { left, right, .. }) => {
            occurs(heap, name, *left) || occurs(heap, name, *right)
        }
        Some(Term::Neg { operand }) => occurs(heap, name, *operand),
    }
}

// Rewrites free occurrences of `from` to `to` below `id`. Binder ids are
// untouched; only the spelling changes.
fn rename_free(heap: &mut Heap, id: TermId, from: &str, to: &str) -> Result<(), ReduceError> {
    let node = heap.get(id).ok_or(ReduceError::DanglingTerm(id))?.clone();
    match node {
        Term::Var { name, .. } => {
            if name == from {
                if let Some(Term::Var { name, .. }) = heap.get_mut(id) {
                    *name = to.to_string();
                }
            }
            Ok(())
        }
        Term::Constr { .. } | Term::Literal { .. } => Ok(()),
        Term::Lambda { param, body, .. } => {
            if param == from {
                Ok(())
            } else {
                rename_free(heap, body, from, to)
            }
        }
        Term::Let {
            name: bound,
            value,
            body,
            ..
        } => {
            rename_free(heap, value, from, to)?;
            if bound == from {
                Ok(())
            } else {
                rename_free(heap, body, from, to)
            }
        }
        Term::App { func, arg } => {
            rename_free(heap, func, from, to)?;
            rename_free(heap, arg, from, to)
        }
        Term::Arith { left, right, .. } => {
            rename_free(heap, left, from, to)?;
            rename_free(heap, right, from, to)
        }
        Term::Neg { operand } => rename_free(heap, operand, from, to),
    }
}
