//! Python-like type compatibility matching.
//!
//! Types are interned into a [`TypeInterner`] and identified by [`TypeId`], so
//! structural equality is id equality. The unknown type is never interned: it
//! is the `None` of an `Option<TypeId>` slot.
//!
//! The matcher answers one question: may a value whose inferred type is
//! `actual` be used where `expected` is required? It consults three
//! collaborators through the [`TypeEvalContext`]:
//!
//! - a [`TypeResolver`] for deferred references such as type aliases
//! - a [`ClassHierarchy`] for declared inheritance
//! - a [`StructuralOracle`] for protocol (abstract base class) satisfaction
//!
//! [`StubUniverse`] builds all of them from JSON stub manifests.
mod caches;
pub mod class_hierarchy;
pub mod context;
mod db;
pub mod def;
pub mod format;
pub mod inheritance;
mod intern;
pub mod matcher;
pub mod numeric;
pub mod protocols;
pub mod resolver;
pub mod stubs;
pub mod types;

pub use class_hierarchy::{ClassHierarchy, NoHierarchy};
pub use context::TypeEvalContext;
pub use db::TypeDatabase;
pub use def::{ClassDecl, ClassStore};
pub use format::TypeFormatter;
pub use inheritance::InheritanceGraph;
pub use intern::TypeInterner;
pub use matcher::{TypeMatcher, classes_compatible, match_types};
pub use numeric::{NumericTier, numeric_promotes};
pub use protocols::{NoProtocols, ProtocolRegistry, Requirement, StructuralOracle};
pub use resolver::{
    MAX_REFERENCE_CHAIN, NoopResolver, RECURSIVE_UNFOLD_DEPTH, ReferenceTable, TypeResolver,
};
pub use stubs::{ClassStub, ProtocolStub, StubError, StubManifest, StubUniverse, TypeExpr};
pub use types::{AnchorId, ClassId, RefId, TypeData, TypeId, TypeListId};
