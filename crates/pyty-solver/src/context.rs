//! Evaluation context threaded through every match call.
//!
//! The context bundles the type database with the three collaborators the
//! matcher consults: the reference resolver, the class-hierarchy oracle and the
//! structural-protocol oracle. It is passed explicitly (never stored in a
//! global) and only ever read, so one context may serve concurrent matches as
//! long as its collaborators answer consistently.

use crate::TypeDatabase;
use crate::class_hierarchy::{ClassHierarchy, NoHierarchy};
use crate::protocols::{NoProtocols, StructuralOracle};
use crate::resolver::{NoopResolver, TypeResolver};

#[derive(Clone, Copy)]
pub struct TypeEvalContext<'a> {
    pub db: &'a dyn TypeDatabase,
    pub resolver: &'a dyn TypeResolver,
    pub hierarchy: &'a dyn ClassHierarchy,
    pub protocols: &'a dyn StructuralOracle,
}

impl<'a> TypeEvalContext<'a> {
    /// Context with no resolver, no declared inheritance and no protocols.
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self {
            db,
            resolver: &NoopResolver,
            hierarchy: &NoHierarchy,
            protocols: &NoProtocols,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn TypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: &'a dyn ClassHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_protocols(mut self, protocols: &'a dyn StructuralOracle) -> Self {
        self.protocols = protocols;
        self
    }
}
