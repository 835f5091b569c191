// tests/gc_tests.rs

use lambda_step::{reduce_at, ReduceError, Term};

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::{alpha_eq, parse_ok};

#[test]
fn test_collect_keeps_reachable_nodes() {
    let (mut heap, root) = parse_ok("1 + 2");
    assert_eq!(heap.alive_count(), 3);
    heap.collect(&[root]);
    assert_eq!(heap.alive_count(), 3);
}

#[test]
fn test_collect_reclaims_reduction_garbage() {
    let (mut heap, root) = parse_ok("(\\x -> x) 42");
    assert_eq!(heap.alive_count(), 4);
    reduce_at(&mut heap, root).unwrap();
    // The lambda shell and argument are stranded until collection.
    assert!(heap.alive_count() > 1);
    heap.collect(&[root]);
    assert_eq!(heap.alive_count(), 1);
    assert_eq!(heap.get(root), Some(&Term::Literal { value: 42 }));
}

#[test]
fn test_collect_with_no_roots_empties_heap() {
    let (mut heap, _root) = parse_ok("let x = 1 in x + x");
    heap.collect(&[]);
    assert_eq!(heap.alive_count(), 0);
}

#[test]
fn test_reduce_at_collected_node_is_dangling() {
    let (mut heap, root) = parse_ok("1 + 2");
    heap.collect(&[]);
    assert_eq!(
        reduce_at(&mut heap, root),
        Err(ReduceError::DanglingTerm(root))
    );
}

#[test]
fn test_freed_slots_are_reused() {
    let (mut heap, _root) = parse_ok("1 + 2 + 3");
    let before = heap.alive_count();
    heap.collect(&[]);
    let id = heap.alloc(Term::Literal { value: 7 });
    assert!((id.0 as usize) < before, "allocation should reuse a freed slot");
    assert_eq!(heap.alive_count(), 1);
}

#[test]
fn test_clone_is_independent_of_original() {
    let (mut heap, root) = parse_ok("let k = 1 in (\\x -> x + k) 2");
    let snapshot = heap.clone_term(root).unwrap();
    assert!(alpha_eq(&heap, root, &heap, snapshot));

    // Reduce the application inside the original's body.
    let body = match heap.get(root) {
        Some(Term::Let { body, .. }) => *body,
        other => panic!("expected a let, got {:?}", other),
    };
    assert!(matches!(heap.get(body), Some(Term::App { .. })));
    reduce_at(&mut heap, body).unwrap();

    // The snapshot still shows the unreduced application.
    let (fresh_heap, fresh) = parse_ok("let k = 1 in (\\x -> x + k) 2");
    assert!(alpha_eq(&heap, snapshot, &fresh_heap, fresh));
    assert!(!alpha_eq(&heap, root, &heap, snapshot));

    // Both trees survive a collection rooted at the pair of them.
    heap.collect(&[root, snapshot]);
    assert!(alpha_eq(&heap, snapshot, &fresh_heap, fresh));
}

#[test]
fn test_clone_remaps_binder_ids_consistently() {
    let (mut heap, root) = parse_ok("let x = 1 in \\y -> x + y");
    let copy = heap.clone_term(root).unwrap();
    assert!(alpha_eq(&heap, root, &heap, copy));

    let (original_binding, copy_binding) = match (heap.get(root), heap.get(copy)) {
        (Some(Term::Let { binding: a, .. }), Some(Term::Let { binding: b, .. })) => (*a, *b),
        other => panic!("expected two lets, got {:?}", other),
    };
    assert_ne!(original_binding, copy_binding);
}
