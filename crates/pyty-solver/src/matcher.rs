//! Type compatibility matching.
//!
//! Decides whether a value whose inferred type is `actual` may be used where
//! `expected` is required. The matcher is permissive: missing information
//! (unknown types, unresolved references, absent classes or names) is never
//! a mismatch. It is total, never panics on well-formed input, and keeps no
//! state between calls.
//!
//! Rules, in the order they are tried:
//!
//! 1. unknown on either side matches
//! 2. references are resolved, expected side first, one side per step
//! 3. a union on the actual side must match with every member
//!    (or contain the unknown type)
//! 4. a union on the expected side matches if any member does
//! 5. `object` accepts everything
//! 6. class-like pairs: collections match their element types invariantly
//!    once their classes are compatible, tuples match position by position,
//!    anything else matches if the classes are compatible
//! 7. equal types match
//! 8. display names: equal names, an absent name, or a numeric promotion
//!    along `bool < int < long < float < complex` match

use crate::caches::query_trace;
use crate::context::TypeEvalContext;
use crate::format::TypeFormatter;
use crate::numeric::numeric_promotes;
use crate::types::{ClassId, TypeData, TypeId};
use tracing::trace;

const OBJECT_CLASS_NAME: &str = "object";

/// Match `actual` against `expected` under `ctx`.
pub fn match_types(
    expected: Option<TypeId>,
    actual: Option<TypeId>,
    ctx: &TypeEvalContext<'_>,
) -> bool {
    TypeMatcher::new(*ctx).is_match(expected, actual)
}

/// Whether class `sub` may stand in for class `sup`.
pub fn classes_compatible(
    ctx: &TypeEvalContext<'_>,
    sup: Option<ClassId>,
    sub: Option<ClassId>,
) -> bool {
    TypeMatcher::new(*ctx).classes_compatible(sup, sub)
}

/// Stateless matcher bound to an evaluation context.
#[derive(Clone, Copy)]
pub struct TypeMatcher<'a> {
    ctx: TypeEvalContext<'a>,
}

impl<'a> TypeMatcher<'a> {
    pub fn new(ctx: TypeEvalContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &TypeEvalContext<'a> {
        &self.ctx
    }

    /// Whether a value of type `actual` is safe to use where `expected` is required.
    pub fn is_match(&self, expected: Option<TypeId>, actual: Option<TypeId>) -> bool {
        if !query_trace::enabled() {
            return self.match_slots(expected, actual);
        }

        let query_id = query_trace::next_query_id();
        query_trace::relation_start(query_id, "match_types", expected, actual);
        let result = self.match_slots(expected, actual);
        query_trace::relation_end(query_id, "match_types", result);
        result
    }

    /// Class-level compatibility.
    ///
    /// True when either class is absent or undeclared, when `sub` nominally
    /// inherits from `sup`, when `sub` structurally satisfies `sup`, or when
    /// both declarations carry the same name (one class reached through two
    /// declarations).
    pub fn classes_compatible(&self, sup: Option<ClassId>, sub: Option<ClassId>) -> bool {
        let db = self.ctx.db;
        let (Some(sup), Some(sub)) = (sup, sub) else {
            return true;
        };
        let (Some(sup_decl), Some(sub_decl)) = (db.class_decl(sup), db.class_decl(sub)) else {
            return true;
        };

        if self.ctx.hierarchy.is_subclass(sub, sup)
            || self.ctx.protocols.is_structural_subclass(&self.ctx, sub, sup)
        {
            return true;
        }

        match (sup_decl.name, sub_decl.name) {
            (Some(sup_name), Some(sub_name)) => sup_name == sub_name,
            _ => false,
        }
    }

    fn match_slots(&self, expected: Option<TypeId>, actual: Option<TypeId>) -> bool {
        let (Some(expected), Some(actual)) = (expected, actual) else {
            return true;
        };
        let db = self.ctx.db;
        let (Some(expected_data), Some(actual_data)) = (db.lookup(expected), db.lookup(actual))
        else {
            // Ids the database does not know carry no information
            return true;
        };

        if let TypeData::Reference(reference) = expected_data {
            let resolved = self.ctx.resolver.resolve(reference, None, &self.ctx);
            return self.match_slots(resolved, Some(actual));
        }
        if let TypeData::Reference(reference) = actual_data {
            let resolved = self.ctx.resolver.resolve(reference, None, &self.ctx);
            return self.match_slots(Some(expected), resolved);
        }

        if let TypeData::Union(members) = actual_data {
            let members = db.type_list(members);
            if members.contains(&None) {
                trace!(target: "pyty::matcher", actual = actual.0, "actual union has an unknown member");
                return true;
            }
            return members
                .iter()
                .all(|&member| self.match_slots(Some(expected), member));
        }
        if let TypeData::Union(members) = expected_data {
            return db
                .type_list(members)
                .iter()
                .any(|&member| self.match_slots(member, Some(actual)));
        }

        if let Some(class) = expected_data.class_id() {
            if db.class_name(class).as_deref() == Some(OBJECT_CLASS_NAME) {
                return true;
            }
        }

        if expected_data.is_class_like() && actual_data.is_class_like() {
            let sup = expected_data.class_id();
            let sub = actual_data.class_id();
            match (expected_data, actual_data) {
                (
                    TypeData::Collection {
                        element: expected_element,
                        ..
                    },
                    TypeData::Collection {
                        element: actual_element,
                        ..
                    },
                ) => {
                    if !self.classes_compatible(sup, sub) {
                        return false;
                    }
                    return self.match_slots(expected_element, actual_element);
                }
                (
                    TypeData::Tuple {
                        elements: expected_elements,
                        ..
                    },
                    TypeData::Tuple {
                        elements: actual_elements,
                        ..
                    },
                ) => {
                    // Tuples answer here and never reach the name fallback below
                    return self.match_tuple_elements(
                        &db.type_list(expected_elements),
                        &db.type_list(actual_elements),
                    );
                }
                _ => {
                    if self.classes_compatible(sup, sub) {
                        return true;
                    }
                }
            }
        }

        if expected == actual {
            return true;
        }

        self.names_match(expected, actual)
    }

    fn match_tuple_elements(&self, expected: &[Option<TypeId>], actual: &[Option<TypeId>]) -> bool {
        if expected.len() != actual.len() {
            trace!(
                target: "pyty::matcher",
                expected_arity = expected.len(),
                actual_arity = actual.len(),
                "tuple arity mismatch"
            );
            return false;
        }
        expected
            .iter()
            .zip(actual)
            .all(|(&expected, &actual)| self.match_slots(expected, actual))
    }

    /// Name-based fallback, including the builtin numeric tower.
    fn names_match(&self, expected: TypeId, actual: TypeId) -> bool {
        let formatter = TypeFormatter::new(self.ctx.db);
        let (Some(expected_name), Some(actual_name)) = (
            formatter.display_name(Some(expected)),
            formatter.display_name(Some(actual)),
        ) else {
            return true;
        };

        let matched =
            expected_name == actual_name || numeric_promotes(&expected_name, &actual_name);
        trace!(
            target: "pyty::matcher",
            expected = %expected_name,
            actual = %actual_name,
            matched,
            "name fallback"
        );
        matched
    }
}

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod tests;
