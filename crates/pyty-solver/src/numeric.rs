//! The builtin numeric tower.
//!
//! Builtin numeric classes are not declared with subclass relationships in
//! stubs, so `bool <: int <: long <: float <: complex` is encoded here as a
//! name-keyed table and consulted only after nominal checks fail.

/// Tiers of the numeric tower, smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericTier {
    Bool,
    Int,
    Long,
    Float,
    Complex,
}

impl NumericTier {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "complex" => Some(Self::Complex),
            _ => None,
        }
    }
}

/// Whether a value named `actual` may be promoted to the numeric type named
/// `expected`. Strict: equal names are not a promotion.
pub fn numeric_promotes(expected: &str, actual: &str) -> bool {
    match (NumericTier::from_name(expected), NumericTier::from_name(actual)) {
        (Some(expected), Some(actual)) => actual < expected,
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/numeric_tests.rs"]
mod tests;
