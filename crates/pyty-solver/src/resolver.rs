//! Resolution of deferred type references.
//!
//! The matcher resolves a `TypeData::Reference` through the context's
//! `TypeResolver` before reasoning about it. It performs no cycle detection
//! of its own, so resolvers must terminate on self-referential chains and
//! must not hand back types that unfold forever.

use crate::context::TypeEvalContext;
use crate::db::TypeDatabase;
use crate::types::{AnchorId, RefId, TypeData, TypeId};
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

/// Most references a `ReferenceTable` expands while resolving one reference.
pub const MAX_REFERENCE_CHAIN: usize = 64;

/// How often one reference may be expanded inside its own expansion.
pub const RECURSIVE_UNFOLD_DEPTH: u32 = 3;

/// Resolves deferred references against an evaluation context.
pub trait TypeResolver: Sync {
    /// Resolve `reference`. `None` means still unresolved and is treated as
    /// the unknown type. Must be deterministic for a fixed context.
    fn resolve(
        &self,
        reference: RefId,
        anchor: Option<AnchorId>,
        ctx: &TypeEvalContext<'_>,
    ) -> Option<TypeId>;
}

/// Resolver that knows no references; everything resolves to unknown.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResolver;

impl TypeResolver for NoopResolver {
    fn resolve(
        &self,
        _reference: RefId,
        _anchor: Option<AnchorId>,
        _ctx: &TypeEvalContext<'_>,
    ) -> Option<TypeId> {
        None
    }
}

/// Table of reference bindings, e.g. type aliases.
///
/// Resolution expands the binding and every reference nested inside it, so
/// the matcher always receives a reference-free type. A reference met again
/// inside its own expansion is unfolded up to `RECURSIVE_UNFOLD_DEPTH` times
/// and is unknown past that. Unbound references, pure reference cycles and
/// expansions needing more than `MAX_REFERENCE_CHAIN` steps resolve to
/// unknown as well.
pub struct ReferenceTable {
    bindings: DashMap<RefId, Option<TypeId>>,
    next_id: AtomicU32,
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Allocate a fresh, unbound reference key.
    pub fn declare(&self) -> RefId {
        RefId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Bind (or rebind) `reference` to `target`.
    pub fn bind(&self, reference: RefId, target: Option<TypeId>) {
        self.bindings.insert(reference, target);
    }

    /// The direct binding of `reference`, without following chains.
    pub fn binding(&self, reference: RefId) -> Option<Option<TypeId>> {
        self.bindings.get(&reference).map(|entry| *entry.value())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl TypeResolver for ReferenceTable {
    fn resolve(
        &self,
        reference: RefId,
        _anchor: Option<AnchorId>,
        ctx: &TypeEvalContext<'_>,
    ) -> Option<TypeId> {
        Unfolder {
            table: self,
            db: ctx.db,
            active: FxHashMap::default(),
            budget: MAX_REFERENCE_CHAIN,
        }
        .expand(reference)
    }
}

/// One resolution in progress.
struct Unfolder<'a> {
    table: &'a ReferenceTable,
    db: &'a dyn TypeDatabase,
    /// References being expanded on the current path, with their nesting count
    active: FxHashMap<RefId, u32>,
    budget: usize,
}

impl Unfolder<'_> {
    fn expand(&mut self, reference: RefId) -> Option<TypeId> {
        let depth = self.active.get(&reference).copied().unwrap_or(0);
        if depth >= RECURSIVE_UNFOLD_DEPTH || self.budget == 0 {
            trace!(
                reference = reference.0,
                depth,
                "reference expansion cut off"
            );
            return None;
        }
        self.budget -= 1;
        self.active.insert(reference, depth + 1);

        let target = self.table.binding(reference).flatten();
        let expanded = self.unfold(target);

        if depth == 0 {
            self.active.remove(&reference);
        } else {
            self.active.insert(reference, depth);
        }
        expanded
    }

    fn unfold(&mut self, ty: Option<TypeId>) -> Option<TypeId> {
        let ty = ty?;
        let db = self.db;
        let Some(data) = db.lookup(ty) else {
            return Some(ty);
        };
        let unfolded = match data {
            TypeData::Reference(next) => return self.expand(next),
            TypeData::Class(_) => ty,
            TypeData::Union(members) => {
                let members = self.unfold_all(&db.type_list(members));
                db.union(members)
            }
            TypeData::Collection { class, element } => {
                let element = self.unfold(element);
                db.collection(class, element)
            }
            TypeData::Tuple { class, elements } => {
                let elements = self.unfold_all(&db.type_list(elements));
                db.tuple(class, elements)
            }
        };
        Some(unfolded)
    }

    fn unfold_all(&mut self, types: &[Option<TypeId>]) -> Vec<Option<TypeId>> {
        types.iter().map(|&ty| self.unfold(ty)).collect()
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
