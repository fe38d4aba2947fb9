//! Type database abstraction for the solver.
//!
//! This trait isolates solver logic from concrete storage, so the matcher and
//! the oracles only ever talk to `&dyn TypeDatabase`.

use crate::def::ClassDecl;
use crate::intern::TypeInterner;
use crate::types::{ClassId, RefId, TypeData, TypeId, TypeListId};
use pyty_common::Atom;
use std::sync::Arc;

/// Query interface for the solver.
///
/// Implementations must be safe to read from several threads at once.
pub trait TypeDatabase: Sync {
    fn intern(&self, key: TypeData) -> TypeId;
    fn lookup(&self, id: TypeId) -> Option<TypeData>;
    fn intern_string(&self, s: &str) -> Atom;
    fn resolve_atom(&self, atom: Atom) -> Arc<str>;
    fn type_list(&self, id: TypeListId) -> Arc<[Option<TypeId>]>;

    fn declare_class(&self, decl: ClassDecl) -> ClassId;
    fn class_decl(&self, class: ClassId) -> Option<Arc<ClassDecl>>;

    fn class_type(&self, class: Option<ClassId>) -> TypeId;
    fn collection(&self, class: Option<ClassId>, element: Option<TypeId>) -> TypeId;
    fn tuple(&self, class: Option<ClassId>, elements: Vec<Option<TypeId>>) -> TypeId;
    fn union(&self, members: Vec<Option<TypeId>>) -> TypeId;
    fn reference(&self, reference: RefId) -> TypeId;

    /// Name of a class declaration, if the class exists and has one.
    fn class_name(&self, class: ClassId) -> Option<Arc<str>> {
        let decl = self.class_decl(class)?;
        let name = decl.name?;
        Some(self.resolve_atom(name))
    }
}

impl TypeDatabase for TypeInterner {
    fn intern(&self, key: TypeData) -> TypeId {
        TypeInterner::intern(self, key)
    }

    fn lookup(&self, id: TypeId) -> Option<TypeData> {
        TypeInterner::lookup(self, id)
    }

    fn intern_string(&self, s: &str) -> Atom {
        TypeInterner::intern_string(self, s)
    }

    fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        TypeInterner::resolve_atom(self, atom)
    }

    fn type_list(&self, id: TypeListId) -> Arc<[Option<TypeId>]> {
        TypeInterner::type_list(self, id)
    }

    fn declare_class(&self, decl: ClassDecl) -> ClassId {
        TypeInterner::declare_class(self, decl)
    }

    fn class_decl(&self, class: ClassId) -> Option<Arc<ClassDecl>> {
        TypeInterner::class_decl(self, class)
    }

    fn class_type(&self, class: Option<ClassId>) -> TypeId {
        TypeInterner::class_type(self, class)
    }

    fn collection(&self, class: Option<ClassId>, element: Option<TypeId>) -> TypeId {
        TypeInterner::collection(self, class, element)
    }

    fn tuple(&self, class: Option<ClassId>, elements: Vec<Option<TypeId>>) -> TypeId {
        TypeInterner::tuple(self, class, elements)
    }

    fn union(&self, members: Vec<Option<TypeId>>) -> TypeId {
        TypeInterner::union(self, members)
    }

    fn reference(&self, reference: RefId) -> TypeId {
        TypeInterner::reference(self, reference)
    }
}
