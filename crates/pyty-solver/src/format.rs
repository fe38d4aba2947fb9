//! Display names of types.
//!
//! The display name is what the matcher compares on its numeric-tower
//! fallback, and what tracing output prints. An absent name means the type
//! could not be named and is treated permissively by callers.

use crate::TypeDatabase;
use crate::types::{TypeData, TypeId};

const UNKNOWN_NAME: &str = "unknown";

/// Formats types for matching fallbacks and logs.
pub struct TypeFormatter<'a> {
    db: &'a dyn TypeDatabase,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self { db }
    }

    /// Display name of a type slot.
    ///
    /// - unknown and unresolved references have no name
    /// - classes and collections are named after their class
    /// - tuples print as `tuple(int, str)`
    /// - unions print as `int | str`
    pub fn display_name(&self, ty: Option<TypeId>) -> Option<String> {
        let data = self.db.lookup(ty?)?;
        match data {
            TypeData::Reference(_) => None,
            TypeData::Class(class) | TypeData::Collection { class, .. } => {
                self.db.class_name(class?).map(|name| name.to_string())
            }
            TypeData::Tuple { elements, .. } => {
                let elements = self.db.type_list(elements);
                Some(format!("tuple({})", self.join(&elements, ", ")))
            }
            TypeData::Union(members) => {
                let members = self.db.type_list(members);
                Some(self.join(&members, " | "))
            }
        }
    }

    /// Display name for logs; never absent.
    pub fn format(&self, ty: Option<TypeId>) -> String {
        self.display_name(ty)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }

    fn join(&self, slots: &[Option<TypeId>], separator: &str) -> String {
        slots
            .iter()
            .map(|&slot| self.format(slot))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
