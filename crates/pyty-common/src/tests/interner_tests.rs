use super::*;

#[test]
fn test_intern_deduplicates() {
    let interner = ShardedInterner::new();
    let a = interner.intern("int");
    let b = interner.intern("int");
    let c = interner.intern("float");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.resolve(a).as_ref(), "int");
    assert_eq!(interner.resolve(c).as_ref(), "float");
}

#[test]
fn test_empty_string_is_none_atom() {
    let interner = ShardedInterner::new();
    assert_eq!(interner.intern(""), Atom::NONE);
    assert_eq!(interner.intern_owned(String::new()), Atom::NONE);
    assert!(Atom::NONE.is_none());
    assert_eq!(interner.resolve(Atom::NONE).as_ref(), "");
    assert!(interner.is_empty());
}

#[test]
fn test_intern_owned_matches_borrowed() {
    let interner = ShardedInterner::new();
    let borrowed = interner.intern("__iter__");
    let owned = interner.intern_owned("__iter__".to_string());
    assert_eq!(borrowed, owned);
    assert!(!borrowed.is_none());
}

#[test]
fn test_intern_common_is_idempotent() {
    let interner = ShardedInterner::new();
    interner.intern_common();
    let len = interner.len();
    interner.intern_common();
    assert_eq!(interner.len(), len);
    assert_eq!(interner.try_resolve(interner.intern("object")).as_deref(), Some("object"));
}

#[test]
fn test_unknown_atom_does_not_resolve() {
    let interner = ShardedInterner::new();
    let bogus = Atom(u32::MAX);
    assert!(interner.try_resolve(bogus).is_none());
    assert_eq!(interner.resolve(bogus).as_ref(), "");
}

#[test]
fn test_concurrent_interning_agrees() {
    let interner = ShardedInterner::new();
    let atoms: Vec<Vec<Atom>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    (0..64)
                        .map(|i| interner.intern_owned(format!("member_{i}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("interning thread panicked"))
            .collect()
    });

    for other in &atoms[1..] {
        assert_eq!(&atoms[0], other);
    }
    assert_eq!(interner.len(), 65);
}
