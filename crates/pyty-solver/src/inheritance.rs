//! Inheritance graph for nominal subclass checks.
//!
//! Records, per class, its ordered list of direct bases, and answers
//! transitive subclass queries and Python-style method resolution order.

use crate::class_hierarchy::ClassHierarchy;
use crate::types::ClassId;
use dashmap::DashMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

type BaseList = SmallVec<[ClassId; 4]>;

/// Concurrent class -> direct bases graph.
#[derive(Default)]
pub struct InheritanceGraph {
    bases: DashMap<ClassId, BaseList>,
}

impl InheritanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `parents` to the direct bases of `child`, keeping declaration order.
    pub fn add_inheritance(&self, child: ClassId, parents: &[ClassId]) {
        let mut entry = self.bases.entry(child).or_default();
        for &parent in parents {
            if !entry.contains(&parent) {
                entry.push(parent);
            }
        }
    }

    /// Direct bases of `class`, in declaration order.
    pub fn bases(&self, class: ClassId) -> BaseList {
        self.bases
            .get(&class)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Whether `child` is `ancestor` or inherits from it.
    /// Terminates on cyclic graphs.
    pub fn is_derived_from(&self, child: ClassId, ancestor: ClassId) -> bool {
        if child == ancestor {
            return true;
        }

        let mut visited = FxHashSet::default();
        let mut stack = vec![child];
        while let Some(class) = stack.pop() {
            if !visited.insert(class) {
                continue;
            }
            for base in self.bases(class) {
                if base == ancestor {
                    return true;
                }
                stack.push(base);
            }
        }
        false
    }

    /// Method resolution order of `class` (C3 linearization).
    ///
    /// Falls back to depth-first, left-to-right order without duplicates when
    /// the hierarchy has no consistent linearization or contains a cycle.
    pub fn get_resolution_order(&self, class: ClassId) -> Vec<ClassId> {
        let mut visiting = FxHashSet::default();
        match self.linearize(class, &mut visiting) {
            Some(order) => order,
            None => {
                trace!(class = class.0, "no C3 linearization, using depth-first order");
                self.depth_first_order(class)
            }
        }
    }

    /// Nearest class in `a`'s resolution order that `b` also derives from.
    pub fn find_common_ancestor(&self, a: ClassId, b: ClassId) -> Option<ClassId> {
        self.get_resolution_order(a)
            .into_iter()
            .find(|&candidate| self.is_derived_from(b, candidate))
    }

    fn linearize(
        &self,
        class: ClassId,
        visiting: &mut FxHashSet<ClassId>,
    ) -> Option<Vec<ClassId>> {
        if !visiting.insert(class) {
            return None;
        }

        let bases = self.bases(class);
        let mut sequences: Vec<Vec<ClassId>> = Vec::with_capacity(bases.len() + 1);
        for &base in &bases {
            sequences.push(self.linearize(base, visiting)?);
        }
        sequences.push(bases.to_vec());
        visiting.remove(&class);

        let mut order = vec![class];
        loop {
            sequences.retain(|seq| !seq.is_empty());
            if sequences.is_empty() {
                return Some(order);
            }

            let head = sequences.iter().map(|seq| seq[0]).find(|&candidate| {
                sequences
                    .iter()
                    .all(|seq| !seq[1..].contains(&candidate))
            })?;

            order.push(head);
            for seq in &mut sequences {
                if seq[0] == head {
                    seq.remove(0);
                }
            }
        }
    }

    fn depth_first_order(&self, class: ClassId) -> Vec<ClassId> {
        let mut order = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![class];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            order.push(current);
            // Reverse so the leftmost base is visited first
            stack.extend(self.bases(current).into_iter().rev());
        }
        order
    }
}

impl ClassHierarchy for InheritanceGraph {
    fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool {
        self.is_derived_from(sub, sup)
    }

    fn resolution_order(&self, class: ClassId) -> Vec<ClassId> {
        self.get_resolution_order(class)
    }
}

#[cfg(test)]
#[path = "../tests/inheritance_tests.rs"]
mod tests;
