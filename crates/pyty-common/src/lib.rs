//! Common types and utilities for the pyty Python type checker.
//!
//! This crate provides foundational types used across all pyty crates:
//! - String interning (`Atom`, `ShardedInterner`) for class and member names

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, ShardedInterner};
