//! Type interning for structural deduplication.
//!
//! This module implements the interning engine that converts `TypeData`
//! structures into lightweight `TypeId` handles.
//!
//! Benefits:
//! - O(1) type equality (just compare `TypeId` values)
//! - Memory efficient (each unique structure stored once)
//! - Safe to share across threads; every table sits behind a lock

use crate::def::{ClassDecl, ClassStore};
use crate::types::{ClassId, RefId, TypeData, TypeId, TypeListId};
use pyty_common::{Atom, ShardedInterner};
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 64 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;
const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[Option<TypeId>; TYPE_LIST_INLINE]>;

struct TypeShard {
    key_to_index: RwLock<FxHashMap<TypeData, u32>>,
    index_to_key: RwLock<Vec<TypeData>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: &[T]) -> u32
    where
        T: Clone,
    {
        if items.is_empty() {
            return 0;
        }

        if let Some(&id) = self.map.get(items) {
            return id;
        }

        let arc: Arc<[T]> = Arc::from(items);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }

    fn empty(&self) -> Arc<[T]> {
        self.items[0].clone()
    }
}

/// Type interning table.
/// Thread-safe via `RwLock` for concurrent access.
pub struct TypeInterner {
    shards: [TypeShard; SHARD_COUNT],
    /// String interner for class, module and member names
    pub string_interner: ShardedInterner,
    type_lists: RwLock<SliceInterner<Option<TypeId>>>,
    classes: ClassStore,
}

impl TypeInterner {
    pub fn new() -> Self {
        TypeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            string_interner: {
                let interner = ShardedInterner::new();
                interner.intern_common();
                interner
            },
            type_lists: RwLock::new(SliceInterner::new()),
            classes: ClassStore::new(),
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    pub fn class_store(&self) -> &ClassStore {
        &self.classes
    }

    pub fn declare_class(&self, decl: ClassDecl) -> ClassId {
        self.classes.register(decl)
    }

    pub fn class_decl(&self, class: ClassId) -> Option<Arc<ClassDecl>> {
        self.classes.get(class)
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[Option<TypeId>]> {
        let lists = self.type_lists.read().expect("type_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    fn intern_type_list(&self, members: &[Option<TypeId>]) -> TypeListId {
        let mut lists = self.type_lists.write().expect("type_lists lock poisoned");
        TypeListId(lists.intern(members))
    }

    /// Intern a type node and return its `TypeId`.
    /// If the node already exists, returns the existing `TypeId`.
    pub fn intern(&self, key: TypeData) -> TypeId {
        let mut hasher = FxHasher::default();
        key.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard
                .key_to_index
                .read()
                .expect("shard key_to_index lock poisoned");
            if let Some(&local_index) = map.get(&key) {
                return Self::make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard
            .key_to_index
            .write()
            .expect("shard key_to_index lock poisoned");
        let mut storage = shard
            .index_to_key
            .write()
            .expect("shard index_to_key lock poisoned");

        if let Some(&local_index) = map.get(&key) {
            return Self::make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        if local_index >= (u32::MAX >> SHARD_BITS) {
            return TypeId::OVERFLOW;
        }

        storage.push(key);
        map.insert(key, local_index);

        Self::make_id(local_index, shard_idx as u32)
    }

    /// Look up the node behind a `TypeId`.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        let shard_idx = (id.0 & SHARD_MASK) as usize;
        let local_index = (id.0 >> SHARD_BITS) as usize;
        let storage = self.shards[shard_idx]
            .index_to_key
            .read()
            .expect("shard index_to_key lock poisoned");
        storage.get(local_index).copied()
    }

    pub fn class_type(&self, class: Option<ClassId>) -> TypeId {
        self.intern(TypeData::Class(class))
    }

    pub fn collection(&self, class: Option<ClassId>, element: Option<TypeId>) -> TypeId {
        self.intern(TypeData::Collection { class, element })
    }

    pub fn tuple(&self, class: Option<ClassId>, elements: Vec<Option<TypeId>>) -> TypeId {
        let elements = self.intern_type_list(&elements);
        self.intern(TypeData::Tuple { class, elements })
    }

    pub fn reference(&self, reference: RefId) -> TypeId {
        self.intern(TypeData::Reference(reference))
    }

    /// Build a union type.
    ///
    /// Members are deduplicated and sorted into a canonical order (unknown
    /// first, then by id), so `A | B` and `B | A` intern to the same node.
    /// A union with exactly one known member collapses to that member. Nested
    /// unions are kept as members; they are not flattened.
    pub fn union(&self, members: Vec<Option<TypeId>>) -> TypeId {
        let mut canonical: TypeListBuffer = members.into_iter().collect();
        canonical.sort_unstable();
        canonical.dedup();

        if let [Some(only)] = canonical.as_slice() {
            return *only;
        }

        let list = self.intern_type_list(&canonical);
        self.intern(TypeData::Union(list))
    }

    #[inline]
    fn make_id(local_index: u32, shard_idx: u32) -> TypeId {
        TypeId((local_index << SHARD_BITS) | (shard_idx & SHARD_MASK))
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
