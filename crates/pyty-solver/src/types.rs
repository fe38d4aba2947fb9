//! Type representation for the solver.
//!
//! Types are interned into lightweight `TypeId` handles, so two structurally
//! equal type nodes always share one id and value equality is an integer
//! comparison. The unknown type is never interned: it is the `None` of an
//! `Option<TypeId>` slot, wherever a type may be absent.

use serde::Serialize;

/// Handle of an interned type node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Returned when the interner runs out of id space.
    /// Never produced for a successfully interned node.
    pub const OVERFLOW: TypeId = TypeId(u32::MAX);
}

/// Handle of a class declaration registered in the `ClassStore`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Sentinel value for an invalid `ClassId`.
    pub const INVALID: Self = Self(0);

    /// First valid `ClassId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

/// Opaque resolution key carried by a deferred type reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RefId(pub u32);

/// Opaque handle of the source location that asks for a reference to be
/// resolved. The matcher resolves without an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AnchorId(pub u32);

/// Handle of an interned list of type slots (union members, tuple elements).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TypeListId(pub u32);

impl TypeListId {
    pub const EMPTY: TypeListId = TypeListId(0);
}

/// Structural data of an interned type node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeData {
    /// Deferred type that must be resolved against a `TypeEvalContext`.
    Reference(RefId),

    /// Set of alternatives. Members may include the unknown type.
    Union(TypeListId),

    /// Nominal type bound to a class declaration, if one was found.
    Class(Option<ClassId>),

    /// Generic container with a single element type, e.g. `list[int]`.
    Collection {
        class: Option<ClassId>,
        element: Option<TypeId>,
    },

    /// Fixed-arity tuple, e.g. `tuple(int, str)`.
    Tuple {
        class: Option<ClassId>,
        elements: TypeListId,
    },
}

impl TypeData {
    /// Class declaration of a class-like node (plain class, collection, tuple).
    pub fn class_id(&self) -> Option<ClassId> {
        match *self {
            TypeData::Class(class)
            | TypeData::Collection { class, .. }
            | TypeData::Tuple { class, .. } => class,
            TypeData::Reference(_) | TypeData::Union(_) => None,
        }
    }

    /// True for plain classes, collections and tuples.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            TypeData::Class(_) | TypeData::Collection { .. } | TypeData::Tuple { .. }
        )
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
