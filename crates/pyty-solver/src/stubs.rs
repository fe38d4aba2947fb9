//! Stub manifests: JSON descriptions of a class universe.
//!
//! A manifest declares classes (with bases and members), extra structural
//! protocols, and named type aliases. `StubUniverse` installs manifests into
//! a type database, an inheritance graph, a protocol registry and a reference
//! table, and hands out the `TypeEvalContext` the matcher runs under.
//!
//! ```json
//! {
//!   "classes":   [{"name": "Bag", "module": "app", "bases": ["object"], "members": ["__len__"]}],
//!   "protocols": [{"name": "SupportsClose", "requires": [["close", "aclose"]]}],
//!   "aliases":   {"Bags": {"collection": "list", "element": "Bag"}}
//! }
//! ```

use crate::class_hierarchy::would_create_inheritance_cycle;
use crate::context::TypeEvalContext;
use crate::def::ClassDecl;
use crate::inheritance::InheritanceGraph;
use crate::intern::TypeInterner;
use crate::matcher::match_types;
use crate::protocols::{ProtocolRegistry, Requirement};
use crate::resolver::ReferenceTable;
use crate::types::{ClassId, RefId, TypeId};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

const BUILTINS_MANIFEST: &str = include_str!("../stubs/builtins.json");
const TUPLE_CLASS_NAME: &str = "tuple";

#[derive(Debug, thiserror::Error)]
pub enum StubError {
    #[error("manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("class `{0}` is declared twice")]
    DuplicateClass(String),

    #[error("class `{class}` names unknown base `{base}`")]
    UnknownBase { class: String, base: String },

    #[error("inheritance cycle: `{class}` cannot extend `{base}`")]
    InheritanceCycle { class: String, base: String },

    #[error("unknown class `{0}` in type expression")]
    UnknownClass(String),

    #[error("unknown alias `{0}` in type expression")]
    UnknownAlias(String),

    #[error("alias `{0}` is declared twice")]
    DuplicateAlias(String),
}

/// A class universe description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StubManifest {
    #[serde(default)]
    pub classes: Vec<ClassStub>,
    #[serde(default)]
    pub protocols: Vec<ProtocolStub>,
    #[serde(default)]
    pub aliases: IndexMap<String, TypeExpr>,
}

impl StubManifest {
    pub fn from_json(json: &str) -> Result<Self, StubError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The embedded manifest of Python builtin and `collections.abc` classes.
    ///
    /// Builtin numerics only extend `object`; the matcher's numeric tower
    /// relates them. `__hash__` is declared on the immutable builtins only,
    /// so `list`, `dict` and `set` do not satisfy `Hashable`.
    pub fn builtins() -> Result<Self, StubError> {
        Self::from_json(BUILTINS_MANIFEST)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassStub {
    pub name: String,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl ClassStub {
    /// `module.name`, or just `name` for classes without a module.
    pub fn qualified_name(&self) -> String {
        match &self.module {
            Some(module) => format!("{module}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A protocol: every inner list is one requirement, met by any of its names.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProtocolStub {
    pub name: String,
    #[serde(default)]
    pub requires: Vec<Vec<String>>,
}

/// JSON spelling of a type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TypeExpr {
    /// `null`
    #[default]
    Unknown,
    /// `"int"`, `"app.Bag"`
    Class(String),
    /// `{"union": ["int", "str"]}`
    Union { union: Vec<TypeExpr> },
    /// `{"tuple": ["int", "str"]}`
    Tuple { tuple: Vec<TypeExpr> },
    /// `{"collection": "list", "element": "int"}`
    Collection {
        collection: String,
        #[serde(default)]
        element: Box<TypeExpr>,
    },
    /// `{"ref": "Alias"}`
    Ref {
        #[serde(rename = "ref")]
        alias: String,
    },
}

/// Everything the matcher needs, built from stub manifests.
pub struct StubUniverse {
    interner: TypeInterner,
    graph: InheritanceGraph,
    protocols: ProtocolRegistry,
    references: ReferenceTable,
    /// Qualified name -> class, in declaration order
    classes: IndexMap<String, ClassId>,
    /// Short name -> first class declared with it
    short_names: FxHashMap<String, ClassId>,
    aliases: IndexMap<String, RefId>,
}

impl Default for StubUniverse {
    fn default() -> Self {
        Self::new()
    }
}

impl StubUniverse {
    /// Empty universe with the builtin abstract base class protocols registered.
    pub fn new() -> Self {
        Self {
            interner: TypeInterner::new(),
            graph: InheritanceGraph::new(),
            protocols: ProtocolRegistry::with_builtin_abcs(),
            references: ReferenceTable::new(),
            classes: IndexMap::new(),
            short_names: FxHashMap::default(),
            aliases: IndexMap::new(),
        }
    }

    /// Universe with the builtin manifest installed.
    pub fn with_builtins() -> Result<Self, StubError> {
        let mut universe = Self::new();
        universe.install(&StubManifest::builtins()?)?;
        Ok(universe)
    }

    /// Install a manifest on top of what is already installed.
    ///
    /// Classes may name bases declared earlier in the same manifest or in a
    /// previous one. Aliases may refer to each other in any order. On error,
    /// items installed before the failing one stay installed.
    pub fn install(&mut self, manifest: &StubManifest) -> Result<(), StubError> {
        let mut declared = Vec::with_capacity(manifest.classes.len());
        for stub in &manifest.classes {
            declared.push(self.declare_class(stub)?);
        }

        for (stub, &child) in manifest.classes.iter().zip(&declared) {
            for base_name in &stub.bases {
                let base = self
                    .class(base_name)
                    .ok_or_else(|| StubError::UnknownBase {
                        class: stub.qualified_name(),
                        base: base_name.clone(),
                    })?;
                if would_create_inheritance_cycle(child, base, &self.graph) {
                    return Err(StubError::InheritanceCycle {
                        class: stub.qualified_name(),
                        base: base_name.clone(),
                    });
                }
                self.graph.add_inheritance(child, &[base]);
            }
        }

        for protocol in &manifest.protocols {
            let requirements = protocol
                .requires
                .iter()
                .map(|alternatives| Requirement::any_of(alternatives.iter().map(String::as_str)))
                .collect();
            self.protocols.register(protocol.name.as_str(), requirements);
        }

        for name in manifest.aliases.keys() {
            if self.aliases.contains_key(name) {
                return Err(StubError::DuplicateAlias(name.clone()));
            }
            let reference = self.references.declare();
            self.aliases.insert(name.clone(), reference);
        }
        for (name, body) in &manifest.aliases {
            let target = self.lower(body)?;
            if let Some(&reference) = self.aliases.get(name) {
                self.references.bind(reference, target);
            }
        }

        debug!(
            classes = manifest.classes.len(),
            protocols = manifest.protocols.len(),
            aliases = manifest.aliases.len(),
            "installed stub manifest"
        );
        Ok(())
    }

    fn declare_class(&mut self, stub: &ClassStub) -> Result<ClassId, StubError> {
        let qualified = stub.qualified_name();
        if self.classes.contains_key(&qualified) {
            return Err(StubError::DuplicateClass(qualified));
        }

        let db = &self.interner;
        let mut decl = ClassDecl::named(db.intern_string(&stub.name)).with_members(
            stub.members
                .iter()
                .map(|member| db.intern_string(member))
                .collect(),
        );
        if let Some(module) = &stub.module {
            decl = decl.with_scope(db.intern_string(module));
        }

        let class = db.declare_class(decl);
        self.classes.insert(qualified, class);
        self.short_names.entry(stub.name.clone()).or_insert(class);
        Ok(class)
    }

    /// Look a class up by qualified name, then by short name.
    pub fn class(&self, name: &str) -> Option<ClassId> {
        self.classes
            .get(name)
            .or_else(|| self.short_names.get(name))
            .copied()
    }

    pub fn alias(&self, name: &str) -> Option<RefId> {
        self.aliases.get(name).copied()
    }

    /// Intern the type a `TypeExpr` spells. `Ok(None)` is the unknown type.
    pub fn lower(&self, expr: &TypeExpr) -> Result<Option<TypeId>, StubError> {
        let db = &self.interner;
        let ty = match expr {
            TypeExpr::Unknown => return Ok(None),
            TypeExpr::Class(name) => db.class_type(Some(self.require_class(name)?)),
            TypeExpr::Union { union } => db.union(self.lower_all(union)?),
            TypeExpr::Tuple { tuple } => db.tuple(self.class(TUPLE_CLASS_NAME), self.lower_all(tuple)?),
            TypeExpr::Collection {
                collection,
                element,
            } => db.collection(Some(self.require_class(collection)?), self.lower(element)?),
            TypeExpr::Ref { alias } => {
                let reference = self
                    .alias(alias)
                    .ok_or_else(|| StubError::UnknownAlias(alias.clone()))?;
                db.reference(reference)
            }
        };
        Ok(Some(ty))
    }

    fn lower_all(&self, exprs: &[TypeExpr]) -> Result<Vec<Option<TypeId>>, StubError> {
        exprs.iter().map(|expr| self.lower(expr)).collect()
    }

    fn require_class(&self, name: &str) -> Result<ClassId, StubError> {
        self.class(name)
            .ok_or_else(|| StubError::UnknownClass(name.to_string()))
    }

    /// Lower both expressions and match them.
    pub fn is_match(&self, expected: &TypeExpr, actual: &TypeExpr) -> Result<bool, StubError> {
        let expected = self.lower(expected)?;
        let actual = self.lower(actual)?;
        Ok(match_types(expected, actual, &self.context()))
    }

    pub fn context(&self) -> TypeEvalContext<'_> {
        TypeEvalContext::new(&self.interner)
            .with_resolver(&self.references)
            .with_hierarchy(&self.graph)
            .with_protocols(&self.protocols)
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    pub fn graph(&self) -> &InheritanceGraph {
        &self.graph
    }

    pub fn protocols(&self) -> &ProtocolRegistry {
        &self.protocols
    }

    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }
}

#[cfg(test)]
#[path = "../tests/stubs_tests.rs"]
mod tests;
