//! Structural protocol (abstract base class) oracle.
//!
//! A class satisfies an abstract base class such as `Sized` or `Iterable` when
//! it provides the members the protocol requires, whether or not it declares
//! the inheritance. Protocols are keyed by the abstract class's name, so any
//! class declaration named `Iterable` is checked the same way.

use crate::context::TypeEvalContext;
use crate::types::ClassId;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::Arc;

/// Duck-typing compatibility, independent of declared inheritance.
pub trait StructuralOracle: Sync {
    /// Whether `sub` structurally satisfies `sup`.
    fn is_structural_subclass(
        &self,
        ctx: &TypeEvalContext<'_>,
        sub: ClassId,
        sup: ClassId,
    ) -> bool;
}

/// Oracle that knows no protocols.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProtocols;

impl StructuralOracle for NoProtocols {
    fn is_structural_subclass(
        &self,
        _ctx: &TypeEvalContext<'_>,
        _sub: ClassId,
        _sup: ClassId,
    ) -> bool {
        false
    }
}

/// One required member, given as alternatives: any one of them suffices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    alternatives: SmallVec<[Box<str>; 2]>,
}

impl Requirement {
    pub fn member(name: &str) -> Self {
        Self {
            alternatives: SmallVec::from_iter([Box::from(name)]),
        }
    }

    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        Self {
            alternatives: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.alternatives.iter().map(|name| &**name)
    }

    fn is_met_by(&self, members: &FxHashSet<Arc<str>>) -> bool {
        self.alternatives
            .iter()
            .any(|name| members.contains(&**name))
    }
}

/// Registry of protocols by abstract base class name.
#[derive(Clone, Debug, Default)]
pub struct ProtocolRegistry {
    protocols: FxHashMap<Box<str>, Vec<Requirement>>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the `collections.abc` one-trick ponies and
    /// the container protocols.
    pub fn with_builtin_abcs() -> Self {
        let mut registry = Self::new();
        registry.register("Sized", vec![Requirement::member("__len__")]);
        registry.register("Callable", vec![Requirement::member("__call__")]);
        registry.register("Hashable", vec![Requirement::member("__hash__")]);
        registry.register("Iterable", vec![Requirement::member("__iter__")]);
        registry.register("Container", vec![Requirement::member("__contains__")]);
        registry.register(
            "Iterator",
            vec![
                Requirement::member("__iter__"),
                Requirement::any_of(["next", "__next__"]),
            ],
        );
        registry.register("Reversible", vec![Requirement::member("__reversed__")]);
        registry.register("Awaitable", vec![Requirement::member("__await__")]);
        registry.register(
            "Sequence",
            vec![
                Requirement::member("__getitem__"),
                Requirement::member("__len__"),
            ],
        );
        registry.register(
            "Mapping",
            vec![
                Requirement::member("__getitem__"),
                Requirement::member("__len__"),
                Requirement::member("__iter__"),
                Requirement::member("keys"),
            ],
        );
        registry
    }

    /// Register (or replace) the protocol named `name`.
    pub fn register(&mut self, name: impl Into<Box<str>>, requirements: Vec<Requirement>) {
        self.protocols.insert(name.into(), requirements);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.protocols.contains_key(name)
    }

    pub fn requirements(&self, name: &str) -> Option<&[Requirement]> {
        self.protocols.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// Whether `class` (including inherited members) satisfies the protocol
    /// named `protocol`. Unregistered protocols are never satisfied.
    pub fn satisfies(&self, ctx: &TypeEvalContext<'_>, class: ClassId, protocol: &str) -> bool {
        let Some(requirements) = self.protocols.get(protocol) else {
            return false;
        };
        let members = available_members(ctx, class);
        requirements.iter().all(|req| req.is_met_by(&members))
    }
}

impl StructuralOracle for ProtocolRegistry {
    fn is_structural_subclass(
        &self,
        ctx: &TypeEvalContext<'_>,
        sub: ClassId,
        sup: ClassId,
    ) -> bool {
        match ctx.db.class_name(sup) {
            Some(name) => self.satisfies(ctx, sub, &name),
            None => false,
        }
    }
}

/// Member names declared by `class` or by anything in its resolution order.
fn available_members(ctx: &TypeEvalContext<'_>, class: ClassId) -> FxHashSet<Arc<str>> {
    ctx.hierarchy
        .resolution_order(class)
        .into_iter()
        .filter_map(|ancestor| ctx.db.class_decl(ancestor))
        .flat_map(|decl| {
            decl.members
                .iter()
                .map(|&member| ctx.db.resolve_atom(member))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/protocols_tests.rs"]
mod tests;
