// tests/test_utils.rs

use lambda_step::{parse, BindingId, Heap, Term, TermId};
use std::collections::HashMap;

#[allow(dead_code)]
pub fn parse_ok(input: &str) -> (Heap, TermId) {
    let mut heap = Heap::new();
    let root = parse(input, &mut heap).unwrap();
    (heap, root)
}

/// Structural equality modulo binder identities and alpha-renamed bound
/// names. Binders are paired up as the walk descends; a variable matches
/// if its binder is the paired one (bound) or if the names agree (free
/// relative to the compared roots).
#[allow(dead_code)]
pub fn alpha_eq(heap_a: &Heap, a: TermId, heap_b: &Heap, b: TermId) -> bool {
    alpha_eq_rec(heap_a, a, heap_b, b, &mut HashMap::new())
}

fn alpha_eq_rec(
    heap_a: &Heap,
    a: TermId,
    heap_b: &Heap,
    b: TermId,
    pairs: &mut HashMap<BindingId, BindingId>,
) -> bool {
    match (heap_a.get(a), heap_b.get(b)) {
        (
            Some(Term::Var {
                name: name_a,
                bound_by: binder_a,
            }),
            Some(Term::Var {
                name: name_b,
                bound_by: binder_b,
            }),
        ) => match pairs.get(binder_a) {
            Some(mapped) => mapped == binder_b,
            None => name_a == name_b,
        },
        (Some(Term::Constr { name: name_a }), Some(Term::Constr { name: name_b })) => {
            name_a == name_b
        }
        (Some(Term::Literal { value: value_a }), Some(Term::Literal { value: value_b })) => {
            value_a == value_b
        }
        (
            Some(Term::Lambda {
                binding: binding_a,
                body: body_a,
                ..
            }),
            Some(Term::Lambda {
                binding: binding_b,
                body: body_b,
                ..
            }),
        ) => {
            pairs.insert(*binding_a, *binding_b);
            alpha_eq_rec(heap_a, *body_a, heap_b, *body_b, pairs)
        }
        (
            Some(Term::Let {
                binding: binding_a,
                value: value_a,
                body: body_a,
                ..
            }),
            Some(Term::Let {
                binding: binding_b,
                value: value_b,
                body: body_b,
                ..
            }),
        ) => {
            if !alpha_eq_rec(heap_a, *value_a, heap_b, *value_b, pairs) {
                return false;
            }
            pairs.insert(*binding_a, *binding_b);
            alpha_eq_rec(heap_a, *body_a, heap_b, *body_b, pairs)
        }
        (
            Some(Term::App {
                func: func_a,
                arg: arg_a,
            }),
            Some(Term::App {
                func: func_b,
                arg: arg_b,
            }),
        ) => {
            alpha_eq_rec(heap_a, *func_a, heap_b, *func_b, pairs)
                && alpha_eq_rec(heap_a, *arg_a, heap_b, *arg_b, pairs)
        }
        (
            Some(Term::Arith {
                op: op_a,
                left: left_a,
                right: right_a,
            }),
            Some(Term::Arith {
                op: op_b,
                left: left_b,
                right: right_b,
            }),
        ) => {
            op_a == op_b
                && alpha_eq_rec(heap_a, *left_a, heap_b, *left_b, pairs)
                && alpha_eq_rec(heap_a, *right_a, heap_b, *right_b, pairs)
        }
        (Some(Term::Neg { operand: operand_a }), Some(Term::Neg { operand: operand_b })) => {
            alpha_eq_rec(heap_a, *operand_a, heap_b, *operand_b, pairs)
        }
        _ => false,
    }
}
