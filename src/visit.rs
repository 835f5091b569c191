// src/visit.rs

use crate::ast::{ArithOp, BindingId, Term, TermId};
use crate::memory::Heap;

/// One callback per node variant; every method defaults to a no-op, so a
/// visitor only implements what it cares about. The walk sees a
/// consistent snapshot as long as no reduction is interleaved with it.
pub trait TermVisitor {
    fn visit_var(&mut self, _id: TermId, _name: &str, _bound_by: BindingId) {}
    fn visit_constr(&mut self, _id: TermId, _name: &str) {}
    fn visit_literal(&mut self, _id: TermId, _value: i64) {}
    fn visit_lambda(&mut self, _id: TermId, _param: &str, _binding: BindingId, _body: TermId) {}
    fn visit_let(
        &mut self,
        _id: TermId,
        _name: &str,
        _binding: BindingId,
        _value: TermId,
        _body: TermId,
    ) {
    }
    fn visit_app(&mut self, _id: TermId, _func: TermId, _arg: TermId) {}
    fn visit_arith(&mut self, _id: TermId, _op: ArithOp, _left: TermId, _right: TermId) {}
    fn visit_neg(&mut self, _id: TermId, _operand: TermId) {}
}

/// Pre-order traversal of the tree rooted at `root`.
pub fn walk<V: TermVisitor + ?Sized>(heap: &Heap, root: TermId, visitor: &mut V) {
    let node = match heap.get(root) {
        Some(node) => node,
        None => return,
    };
    match node {
        Term::Var { name, bound_by } => visitor.visit_var(root, name, *bound_by),
        Term::Constr { name } => visitor.visit_constr(root, name),
        Term::Literal { value } => visitor.visit_literal(root, *value),
        Term::Lambda {
            param,
            binding,
            body,
        } => {
            visitor.visit_lambda(root, param, *binding, *body);
            walk(heap, *body, visitor);
        }
        Term::Let {
            name,
            binding,
            value,
            body,
        } => {
            visitor.visit_let(root, name, *binding, *value, *body);
            walk(heap, *value, visitor);
            walk(heap, *body, visitor);
        }
        Term::App { func, arg } => {
            visitor.visit_app(root, *func, *arg);
            walk(heap, *func, visitor);
            walk(heap, *arg, visitor);
        }
        Term::Arith { op, left, right } => {
            visitor.visit_arith(root, *op, *left, *right);
            walk(heap, *left, visitor);
            walk(heap, *right, visitor);
        }
        Term::Neg { operand } => {
            visitor.visit_neg(root, *operand);
            walk(heap, *operand, visitor);
        }
    }
}
