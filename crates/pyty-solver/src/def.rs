//! Class declarations and their storage.
//!
//! Class declarations are produced by analysis (or installed from stub
//! manifests) and are immutable once registered. Identity is the `ClassId`
//! handed out by the store: two declarations that share a name (the same class
//! reached through different import paths, for example) register as distinct
//! ids, and the matcher's name fallback relates them.

use crate::types::ClassId;
use dashmap::DashMap;
use pyty_common::Atom;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance IDs to `ClassStore` instances.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// A class declaration as seen by the matcher.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDecl {
    /// Display name. Absent for classes whose name could not be determined.
    pub name: Option<Atom>,

    /// Defining module (e.g. `builtins`).
    pub scope: Option<Atom>,

    /// Names declared directly in the class body.
    pub members: Vec<Atom>,
}

impl ClassDecl {
    pub fn named(name: Atom) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: Atom) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_members(mut self, members: Vec<Atom>) -> Self {
        self.members = members;
        self
    }

    /// Whether the class body declares `member` itself (inherited members not included).
    pub fn declares(&self, member: Atom) -> bool {
        self.members.contains(&member)
    }
}

/// Concurrent store of class declarations.
pub struct ClassStore {
    instance_id: u64,
    classes: DashMap<ClassId, Arc<ClassDecl>>,
    next_id: AtomicU32,
}

impl Default for ClassStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassStore {
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "ClassStore::new");
        Self {
            instance_id,
            classes: DashMap::new(),
            next_id: AtomicU32::new(ClassId::FIRST_VALID),
        }
    }

    fn allocate(&self) -> ClassId {
        ClassId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Register a declaration and return its fresh `ClassId`.
    pub fn register(&self, decl: ClassDecl) -> ClassId {
        let id = self.allocate();
        trace!(
            instance_id = self.instance_id,
            class_id = id.0,
            name = ?decl.name,
            "ClassStore::register"
        );
        self.classes.insert(id, Arc::new(decl));
        id
    }

    pub fn get(&self, id: ClassId) -> Option<Arc<ClassDecl>> {
        self.classes.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: ClassId) -> bool {
        self.classes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All classes registered under `name`, in registration order.
    pub fn find_by_name(&self, name: Atom) -> Vec<ClassId> {
        let mut found: Vec<ClassId> = self
            .classes
            .iter()
            .filter(|entry| entry.value().name == Some(name))
            .map(|entry| *entry.key())
            .collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
