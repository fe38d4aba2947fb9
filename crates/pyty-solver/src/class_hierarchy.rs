//! Class hierarchy oracle.
//!
//! The matcher asks one question of the nominal hierarchy: is `sub` declared
//! as a subclass of `sup`? How inheritance is recorded is up to the
//! implementation; `InheritanceGraph` is the one the stub loader builds.

use crate::inheritance::InheritanceGraph;
use crate::types::ClassId;

/// Nominal inheritance as declared in analysed source and stubs.
pub trait ClassHierarchy: Sync {
    /// Whether `sub` is `sup` or inherits from it, directly or transitively.
    fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool;

    /// Method resolution order of `class`, starting with `class` itself.
    fn resolution_order(&self, class: ClassId) -> Vec<ClassId> {
        vec![class]
    }
}

/// Hierarchy with no declared inheritance: a class is only a subclass of itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHierarchy;

impl ClassHierarchy for NoHierarchy {
    fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool {
        sub == sup
    }
}

/// Detects if adding `parent` as a base of `child` would create a cycle.
///
/// Checked by the stub loader before recording an edge; the graph itself
/// accepts cyclic edges.
pub fn would_create_inheritance_cycle(
    child: ClassId,
    parent: ClassId,
    graph: &InheritanceGraph,
) -> bool {
    // If parent is already derived from child, child -> parent closes a loop
    graph.is_derived_from(parent, child)
}
