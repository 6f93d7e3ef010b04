#![allow(non_snake_case)]

use super::*;
use std::sync::Barrier;
use std::thread;

fn type_key(i: usize) -> NameKey {
    NameKey::Type(TypeId::new(i))
}

#[test]
fn NameRegistry___reserve_free_candidate___returns_candidate() {
    let mut registry = NameRegistry::new();
    let global = registry.global();

    let name = registry.reserve(global, type_key(0), "Foo").unwrap();

    assert_eq!(name, "Foo");
    assert!(registry.is_taken(global, "Foo"));
}

#[test]
fn NameRegistry___reserve_collision___appends_numeric_suffix() {
    let mut registry = NameRegistry::new();
    let global = registry.global();

    let first = registry.reserve(global, type_key(0), "Foo").unwrap();
    let second = registry.reserve(global, type_key(1), "Foo").unwrap();
    let third = registry.reserve(global, type_key(2), "Foo").unwrap();

    assert_eq!(first, "Foo");
    assert_eq!(second, "Foo2");
    assert_eq!(third, "Foo3");
}

#[test]
fn NameRegistry___reserve_collision___skips_suffixes_already_taken() {
    let mut registry = NameRegistry::new();
    let global = registry.global();
    registry.reserve(global, type_key(0), "Foo2").unwrap();
    registry.reserve(global, type_key(1), "Foo").unwrap();

    let name = registry.reserve(global, type_key(2), "Foo").unwrap();

    assert_eq!(name, "Foo3");
}

#[test]
fn NameRegistry___reserve_same_key_twice___is_idempotent() {
    let mut registry = NameRegistry::new();
    let global = registry.global();

    let first = registry.reserve(global, type_key(0), "Foo").unwrap();
    let again = registry.reserve(global, type_key(0), "Foo").unwrap();

    assert_eq!(first, again);
    assert!(!registry.is_taken(global, "Foo2"));
    assert_eq!(registry.resolved(global, &type_key(0)), Some("Foo"));
}

#[test]
fn NameRegistry___sibling_scopes___are_independent() {
    let mut registry = NameRegistry::new();
    let global = registry.global();
    let foo = registry.child_scope(global, "Foo").unwrap();
    let bar = registry.child_scope(global, "Bar").unwrap();

    let in_foo = registry
        .reserve(foo, NameKey::Converter(TypeId::new(0)), "JsonConverter")
        .unwrap();
    let in_bar = registry
        .reserve(bar, NameKey::Converter(TypeId::new(1)), "JsonConverter")
        .unwrap();

    assert_eq!(in_foo, "JsonConverter");
    assert_eq!(in_bar, "JsonConverter");
}

#[test]
fn NameRegistry___nested_name_equal_to_global_type___does_not_collide() {
    let mut registry = NameRegistry::new();
    let global = registry.global();
    registry.reserve(global, type_key(0), "Foo").unwrap();
    registry.reserve(global, type_key(1), "JsonConverter").unwrap();
    let foo = registry.child_scope(global, "Foo").unwrap();

    let converter = registry
        .reserve(foo, NameKey::Converter(TypeId::new(0)), "JsonConverter")
        .unwrap();

    assert_eq!(converter, "JsonConverter");
    assert_eq!(registry.resolved(global, &type_key(1)), Some("JsonConverter"));
}

#[test]
fn NameRegistry___child_scope___reserves_owner_name() {
    let mut registry = NameRegistry::new();
    let global = registry.global();
    let foo = registry.child_scope(global, "Foo").unwrap();

    let member = registry
        .reserve(foo, NameKey::Member(TypeId::new(0), "foo".into()), "Foo")
        .unwrap();

    assert_eq!(member, "Foo2");
    assert_eq!(registry.parent(foo), Some(global));
    assert_eq!(registry.parent(global), None);
}

#[test]
fn NameRegistry___child_scope_of_unknown_parent___is_invariant_violation() {
    let mut registry = NameRegistry::new();

    let result = registry.child_scope(ScopeId(42), "Foo");

    assert!(matches!(
        result,
        Err(CodegenError::InternalInvariantViolation { .. })
    ));
}

#[test]
fn NameRegistry___bounded_suffix___exhausts() {
    let mut registry = NameRegistry::new().with_max_suffix(Some(3));
    let global = registry.global();
    registry.reserve(global, type_key(0), "Foo").unwrap();
    registry.reserve(global, type_key(1), "Foo").unwrap();
    registry.reserve(global, type_key(2), "Foo").unwrap();

    let result = registry.reserve(global, type_key(3), "Foo");

    assert_eq!(
        result,
        Err(CodegenError::NameRegistryExhausted {
            candidate: "Foo".into(),
            attempts: 3,
        })
    );
}

#[test]
fn NameRegistry___same_call_sequence___yields_same_names() {
    let run = || {
        let mut registry = NameRegistry::new();
        let global = registry.global();
        (0..5)
            .map(|i| registry.reserve(global, type_key(i), "Item").unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
    assert_eq!(run(), vec!["Item", "Item2", "Item3", "Item4", "Item5"]);
}

#[test]
fn SharedNameRegistry___clones___share_state() {
    let shared = SharedNameRegistry::default();
    let clone = shared.clone();
    let global = shared.global();

    shared.reserve(global, type_key(0), "Foo").unwrap();

    assert!(clone.is_taken(global, "Foo"));
    assert_eq!(clone.resolved(global, &type_key(0)), Some("Foo".to_string()));
}

#[test]
fn SharedNameRegistry___concurrent_reserve___yields_unique_names() {
    let shared = SharedNameRegistry::new(NameRegistry::new());
    let num_threads = 16;
    let barrier = Arc::new(Barrier::new(num_threads));
    let global = shared.global();

    let handles: Vec<_> = (0..num_threads)
        .map(|i| {
            let registry = shared.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                registry.reserve(global, type_key(i), "Shared").unwrap()
            })
        })
        .collect();

    let names: BTreeSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(names.len(), num_threads);
    assert!(names.contains("Shared"));
    assert_eq!(shared.snapshot().scope_count(), 1);
}
