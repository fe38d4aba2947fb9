use super::*;
use crate::def::ClassDecl;
use crate::inheritance::InheritanceGraph;
use crate::{TypeDatabase, TypeInterner};

fn declare(interner: &TypeInterner, name: &str, members: &[&str]) -> ClassId {
    let members = members.iter().map(|m| interner.intern_string(m)).collect();
    interner.declare_class(ClassDecl::named(interner.intern_string(name)).with_members(members))
}

#[test]
fn test_builtin_abcs_are_registered() {
    let registry = ProtocolRegistry::with_builtin_abcs();
    for name in [
        "Sized",
        "Callable",
        "Hashable",
        "Iterable",
        "Container",
        "Iterator",
        "Reversible",
        "Awaitable",
        "Sequence",
        "Mapping",
    ] {
        assert!(registry.contains(name), "{name} should be registered");
    }
    assert_eq!(registry.len(), 10);
    assert!(!registry.contains("Number"));
}

#[test]
fn test_class_with_member_satisfies_protocol() {
    let interner = TypeInterner::new();
    let registry = ProtocolRegistry::with_builtin_abcs();
    let ctx = TypeEvalContext::new(&interner).with_protocols(&registry);

    let sized = declare(&interner, "Sized", &[]);
    let bag = declare(&interner, "Bag", &["__len__", "add"]);
    let point = declare(&interner, "Point", &["x", "y"]);

    assert!(registry.is_structural_subclass(&ctx, bag, sized));
    assert!(!registry.is_structural_subclass(&ctx, point, sized));
    assert!(ctx.protocols.is_structural_subclass(&ctx, bag, sized));
}

#[test]
fn test_alternative_members() {
    let interner = TypeInterner::new();
    let registry = ProtocolRegistry::with_builtin_abcs();
    let ctx = TypeEvalContext::new(&interner);

    let py2_iter = declare(&interner, "Py2Iter", &["__iter__", "next"]);
    let py3_iter = declare(&interner, "Py3Iter", &["__iter__", "__next__"]);
    let half_iter = declare(&interner, "HalfIter", &["__next__"]);

    assert!(registry.satisfies(&ctx, py2_iter, "Iterator"));
    assert!(registry.satisfies(&ctx, py3_iter, "Iterator"));
    assert!(!registry.satisfies(&ctx, half_iter, "Iterator"));
}

#[test]
fn test_inherited_members_count() {
    let interner = TypeInterner::new();
    let graph = InheritanceGraph::new();
    let registry = ProtocolRegistry::with_builtin_abcs();
    let ctx = TypeEvalContext::new(&interner).with_hierarchy(&graph);

    let base = declare(&interner, "Base", &["__getitem__"]);
    let derived = declare(&interner, "Derived", &["__len__"]);
    graph.add_inheritance(derived, &[base]);

    assert!(registry.satisfies(&ctx, derived, "Sequence"));
    assert!(!registry.satisfies(&ctx, base, "Sequence"));

    // Without the hierarchy only the class's own members are visible
    let flat = TypeEvalContext::new(&interner);
    assert!(!registry.satisfies(&flat, derived, "Sequence"));
}

#[test]
fn test_unregistered_or_unnamed_protocol_is_not_satisfied() {
    let interner = TypeInterner::new();
    let registry = ProtocolRegistry::with_builtin_abcs();
    let ctx = TypeEvalContext::new(&interner);

    let anything = declare(&interner, "Anything", &["__len__", "__iter__"]);
    let custom = declare(&interner, "CustomProtocol", &[]);
    let unnamed = interner.declare_class(ClassDecl::default());

    assert!(!registry.is_structural_subclass(&ctx, anything, custom));
    assert!(!registry.is_structural_subclass(&ctx, anything, unnamed));
    assert!(!NoProtocols.is_structural_subclass(&ctx, anything, custom));
}

#[test]
fn test_custom_protocol_registration() {
    let interner = TypeInterner::new();
    let mut registry = ProtocolRegistry::new();
    assert!(registry.is_empty());

    registry.register(
        "SupportsClose",
        vec![Requirement::any_of(["close", "aclose"])],
    );
    let ctx = TypeEvalContext::new(&interner);

    let file = declare(&interner, "File", &["close", "read"]);
    assert!(registry.satisfies(&ctx, file, "SupportsClose"));

    let requirements = registry
        .requirements("SupportsClose")
        .expect("protocol registered");
    assert_eq!(
        requirements[0].alternatives().collect::<Vec<_>>(),
        vec!["close", "aclose"]
    );
}

#[test]
fn test_empty_protocol_is_satisfied_by_any_class() {
    let interner = TypeInterner::new();
    let mut registry = ProtocolRegistry::new();
    registry.register("Marker", Vec::new());
    let ctx = TypeEvalContext::new(&interner);

    let plain = declare(&interner, "Plain", &[]);
    let marker = declare(&interner, "Marker", &[]);
    assert!(registry.is_structural_subclass(&ctx, plain, marker));
    assert_eq!(interner.class_name(marker).as_deref(), Some("Marker"));
}
