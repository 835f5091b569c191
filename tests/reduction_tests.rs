// tests/reduction_tests.rs

use lambda_step::{classify, reduce_at, ArithOp, Redex, ReduceError, Term, TermId};

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::parse_ok;

#[test]
fn test_arith_add_reduces_in_place() {
    let (mut heap, root) = parse_ok("2 + 3");
    reduce_at(&mut heap, root).unwrap();
    assert_eq!(heap.get(root), Some(&Term::Literal { value: 5 }));
}

#[test]
fn test_arith_all_operators() {
    for (input, expected) in [("10 - 3", 7), ("6 * 7", 42), ("7 / 2", 3), ("1 - 2", -1)] {
        let (mut heap, root) = parse_ok(input);
        reduce_at(&mut heap, root).unwrap();
        assert_eq!(heap.get(root), Some(&Term::Literal { value: expected }));
    }
}

#[test]
fn test_neg_literal_reduces() {
    let (mut heap, root) = parse_ok("- 4");
    assert_eq!(classify(&heap, root), Redex::Arithmetic);
    reduce_at(&mut heap, root).unwrap();
    assert_eq!(heap.get(root), Some(&Term::Literal { value: -4 }));
}

#[test]
fn test_division_by_zero_leaves_node_unchanged() {
    let (mut heap, root) = parse_ok("5 / 0");
    assert_eq!(reduce_at(&mut heap, root), Err(ReduceError::DivisionByZero));
    match heap.get(root) {
        Some(Term::Arith {
            op: ArithOp::Div,
            left,
            right,
        }) => {
            assert_eq!(heap.get(*left), Some(&Term::Literal { value: 5 }));
            assert_eq!(heap.get(*right), Some(&Term::Literal { value: 0 }));
        }
        other => panic!("node was modified: {:?}", other),
    }
    // Still classified as reducible afterwards.
    assert_eq!(classify(&heap, root), Redex::Arithmetic);
}

#[test]
fn test_arith_overflow_leaves_node_unchanged() {
    for input in [
        "9223372036854775807 + 1",
        "9223372036854775807 * 2",
        "0 - 9223372036854775807 - 2",
    ] {
        let (mut heap, root) = parse_ok(input);
        // The rightmost operator is the root; its operands may themselves
        // need a step first.
        while classify(&heap, root) != Redex::Arithmetic {
            match heap.get(root) {
                Some(Term::Arith { left, .. }) => {
                    let left = *left;
                    reduce_at(&mut heap, left).unwrap();
                }
                other => panic!("expected an arithmetic node, got {:?}", other),
            }
        }
        assert_eq!(reduce_at(&mut heap, root), Err(ReduceError::Overflow));
        // Still an arithmetic node afterwards, still classified reducible.
        assert!(matches!(heap.get(root), Some(Term::Arith { .. })));
        assert_eq!(classify(&heap, root), Redex::Arithmetic);
    }
}

#[test]
fn test_non_redex_rejected() {
    let (mut heap, root) = parse_ok("\\x -> x");
    assert_eq!(reduce_at(&mut heap, root), Err(ReduceError::NotARedex));

    let body = match heap.get(root) {
        Some(Term::Lambda { body, .. }) => *body,
        other => panic!("expected a lambda, got {:?}", other),
    };
    assert_eq!(reduce_at(&mut heap, body), Err(ReduceError::NotARedex));

    let (mut heap, root) = parse_ok("Nil");
    assert_eq!(reduce_at(&mut heap, root), Err(ReduceError::NotARedex));
}

#[test]
fn test_beta_identity() {
    let (mut heap, root) = parse_ok("(\\x -> x) 42");
    assert_eq!(classify(&heap, root), Redex::Beta);
    reduce_at(&mut heap, root).unwrap();
    assert_eq!(heap.get(root), Some(&Term::Literal { value: 42 }));
    // One step per call: the rewritten node is no longer a redex.
    assert_eq!(classify(&heap, root), Redex::None);
    assert_eq!(reduce_at(&mut heap, root), Err(ReduceError::NotARedex));
}

#[test]
fn test_beta_rewrite_visible_to_parent() {
    let (mut heap, root) = parse_ok("1 + (\\x -> x) 2");
    // The parent is not yet reducible.
    assert_eq!(classify(&heap, root), Redex::None);
    let app = match heap.get(root) {
        Some(Term::Arith { right, .. }) => *right,
        other => panic!("expected arithmetic at the root, got {:?}", other),
    };
    reduce_at(&mut heap, app).unwrap();
    // The parent still holds the same child id and now sees a literal.
    assert_eq!(heap.get(app), Some(&Term::Literal { value: 2 }));
    assert_eq!(classify(&heap, root), Redex::Arithmetic);
    reduce_at(&mut heap, root).unwrap();
    assert_eq!(heap.get(root), Some(&Term::Literal { value: 3 }));
}

#[test]
fn test_beta_can_uncover_new_beta_redex() {
    // (\x -> x x) (\y -> y) rewrites to (\y -> y) (\y -> y): a new redex.
    let (mut heap, root) = parse_ok("(\\x -> x x) (\\y -> y)");
    reduce_at(&mut heap, root).unwrap();
    assert_eq!(classify(&heap, root), Redex::Beta);
    reduce_at(&mut heap, root).unwrap();
    assert!(matches!(heap.get(root), Some(Term::Lambda { .. })));
    assert_eq!(classify(&heap, root), Redex::None);
}

#[test]
fn test_beta_substitutes_independent_copies() {
    // Both occurrences of x receive their own copy of the argument.
    let (mut heap, root) = parse_ok("(\\x -> x + x) (1 + 1)");
    reduce_at(&mut heap, root).unwrap();
    let (left, right) = match heap.get(root) {
        Some(Term::Arith {
            op: ArithOp::Add,
            left,
            right,
        }) => (*left, *right),
        other => panic!("expected an addition, got {:?}", other),
    };
    assert_ne!(left, right);
    reduce_at(&mut heap, left).unwrap();
    assert_eq!(heap.get(left), Some(&Term::Literal { value: 2 }));
    // The sibling copy is untouched.
    assert!(matches!(heap.get(right), Some(Term::Arith { .. })));
}

#[test]
fn test_beta_clones_binders_with_fresh_ids() {
    let (mut heap, root) = parse_ok("(\\f -> f 1 (f 2)) (\\x -> x)");
    reduce_at(&mut heap, root).unwrap();

    use lambda_step::{walk, BindingId, TermVisitor};
    struct Binders(Vec<BindingId>);
    impl TermVisitor for Binders {
        fn visit_lambda(&mut self, _: TermId, _: &str, binding: BindingId, _: TermId) {
            self.0.push(binding);
        }
        fn visit_let(&mut self, _: TermId, _: &str, binding: BindingId, _: TermId, _: TermId) {
            self.0.push(binding);
        }
    }
    let mut binders = Binders(Vec::new());
    walk(&heap, root, &mut binders);
    let mut ids = binders.0;
    assert_eq!(ids.len(), 2);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 2, "cloned binders must not share identities");
}

#[test]
fn test_arith_classification_is_recomputed() {
    let (mut heap, root) = parse_ok("1 + 2 * 3");
    assert_eq!(classify(&heap, root), Redex::None);
    let inner = match heap.get(root) {
        Some(Term::Arith { right, .. }) => *right,
        other => panic!("expected arithmetic at the root, got {:?}", other),
    };
    assert_eq!(classify(&heap, inner), Redex::Arithmetic);
    reduce_at(&mut heap, inner).unwrap();
    assert_eq!(classify(&heap, root), Redex::Arithmetic);
    reduce_at(&mut heap, root).unwrap();
    assert_eq!(heap.get(root), Some(&Term::Literal { value: 7 }));
}

#[test]
fn test_beta_under_let_value() {
    let (mut heap, root) = parse_ok("let f = (\\x -> x) 1 in f");
    let value = match heap.get(root) {
        Some(Term::Let { value, .. }) => *value,
        other => panic!("expected a let, got {:?}", other),
    };
    reduce_at(&mut heap, value).unwrap();
    assert_eq!(heap.get(value), Some(&Term::Literal { value: 1 }));
    // The let itself is not a redex in this calculus.
    assert_eq!(reduce_at(&mut heap, root), Err(ReduceError::NotARedex));
}
