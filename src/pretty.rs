// src/pretty.rs

use std::fmt;

use crate::ast::{ArithOp, Term, TermId};
use crate::memory::Heap;

/// Display adapter over a heap-resident term. Prints concrete syntax
/// with minimal parentheses, one tier per helper, mirroring the parser's
/// precedence so the output reparses to an alpha-equivalent term.
pub struct TermDisplay<'a> {
    heap: &'a Heap,
    id: TermId,
}

impl Heap {
    pub fn display(&self, id: TermId) -> TermDisplay<'_> {
        TermDisplay { heap: self, id }
    }
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_term(f, self.heap, self.id)
    }
}

fn fmt_term(f: &mut fmt::Formatter<'_>, heap: &Heap, id: TermId) -> fmt::Result {
    match heap.get(id) {
        Some(Term::Let {
            name, value, body, ..
        }) => {
            write!(f, "let {} = ", name)?;
            fmt_term(f, heap, *value)?;
            write!(f, " in ")?;
            fmt_term(f, heap, *body)
        }
        Some(Term::Lambda { param, body, .. }) => {
            write!(f, "\\{} -> ", param)?;
            fmt_term(f, heap, *body)
        }
        _ => fmt_additive(f, heap, id),
    }
}

fn fmt_additive(f: &mut fmt::Formatter<'_>, heap: &Heap, id: TermId) -> fmt::Result {
    match heap.get(id) {
        Some(Term::Arith {
            op: op @ (ArithOp::Add | ArithOp::Sub),
            left,
            right,
        }) => {
            fmt_additive(f, heap, *left)?;
            write!(f, " {} ", op)?;
            fmt_multiplicative(f, heap, *right)
        }
        _ => fmt_multiplicative(f, heap, id),
    }
}

fn fmt_multiplicative(f: &mut fmt::Formatter<'_>, heap: &Heap, id: TermId) -> fmt::Result {
    match heap.get(id) {
        Some(Term::Arith {
            op: op @ (ArithOp::Mul | ArithOp::Div),
            left,
            right,
        }) => {
            fmt_multiplicative(f, heap, *left)?;
            write!(f, " {} ", op)?;
            fmt_unary(f, heap, *right)
        }
        _ => fmt_unary(f, heap, id),
    }
}

fn fmt_unary(f: &mut fmt::Formatter<'_>, heap: &Heap, id: TermId) -> fmt::Result {
    match heap.get(id) {
        Some(Term::Neg { operand }) => {
            write!(f, "-")?;
            fmt_unary(f, heap, *operand)
        }
        _ => fmt_application(f, heap, id),
    }
}

fn fmt_application(f: &mut fmt::Formatter<'_>, heap: &Heap, id: TermId) -> fmt::Result {
    match heap.get(id) {
        Some(Term::App { func, arg }) => {
            fmt_application(f, heap, *func)?;
            write!(f, " ")?;
            fmt_atom(f, heap, *arg)
        }
        _ => fmt_atom(f, heap, id),
    }
}

fn fmt_atom(f: &mut fmt::Formatter<'_>, heap: &Heap, id: TermId) -> fmt::Result {
    match heap.get(id) {
        Some(Term::Var { name, .. }) => write!(f, "{}", name),
        Some(Term::Constr { name }) => write!(f, "{}", name),
        // Negative values only arise from reduction and have no literal
        // syntax; parenthesize so the output still lexes in argument
        // position.
        Some(Term::Literal { value }) if *value < 0 => write!(f, "({})", value),
        Some(Term::Literal { value }) => write!(f, "{}", value),
        Some(_) => {
            write!(f, "(")?;
            fmt_term(f, heap, id)?;
            write!(f, ")")
        }
        None => write!(f, "<dangling {}>", id),
    }
}

/// Indented one-node-per-line dump of the tree with binder identities,
/// for the REPL's parse-tree view.
pub fn debug_tree(heap: &Heap, root: TermId) -> String {
    let mut out = String::new();
    debug_tree_rec(heap, root, 0, &mut out);
    out
}

fn debug_tree_rec(heap: &Heap, id: TermId, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    match heap.get(id) {
        Some(Term::Var { name, bound_by }) => {
            out.push_str(&format!("var [{}/{}]\n", name, bound_by.0));
        }
        Some(Term::Constr { name }) => {
            out.push_str(&format!("constr [{}]\n", name));
        }
        Some(Term::Literal { value }) => {
            out.push_str(&format!("literal [{}]\n", value));
        }
        Some(Term::Lambda {
            param,
            binding,
            body,
        }) => {
            out.push_str(&format!("lambda [{}/{}]\n", param, binding.0));
            debug_tree_rec(heap, *body, depth + 1, out);
        }
        Some(Term::Let {
            name,
            binding,
            value,
            body,
        }) => {
            out.push_str(&format!("let [{}/{}]\n", name, binding.0));
            debug_tree_rec(heap, *value, depth + 1, out);
            debug_tree_rec(heap, *body, depth + 1, out);
        }
        Some(Term::App { func, arg }) => {
            out.push_str("app\n");
            debug_tree_rec(heap, *func, depth + 1, out);
            debug_tree_rec(heap, *arg, depth + 1, out);
        }
        Some(Term::Arith { op, left, right }) => {
            out.push_str(&format!("{}\n", op));
            debug_tree_rec(heap, *left, depth + 1, out);
            debug_tree_rec(heap, *right, depth + 1, out);
        }
        Some(Term::Neg { operand }) => {
            out.push_str("neg\n");
            debug_tree_rec(heap, *operand, depth + 1, out);
        }
        None => {
            out.push_str(&format!("<dangling {}>\n", id));
        }
    }
}
