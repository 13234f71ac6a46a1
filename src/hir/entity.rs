//! Entity handles: read-only views of the top-level type declarations of
//! one snapshot.

use smol_str::SmolStr;

use super::known::Marker;
use super::symbols::{Import, Scope, TypeId};
use crate::base::UnitId;
use crate::parser::{NodePtr, TextRange, TypeKind};

/// An attribute written on an entity, with its resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRef {
    /// Name segments as written (`MetaCompleteClass`, `MetaSharp.X`).
    pub segments: Vec<SmolStr>,
    pub arity: usize,
    /// Normalized text of each argument expression.
    pub args: Vec<String>,
    pub range: TextRange,
    /// Resolved attribute type, if any.
    pub resolved: Option<TypeId>,
}

impl AttributeRef {
    pub fn name(&self) -> String {
        self.segments.join(".")
    }
}

/// Opaque reference to a declared type within a unit.
///
/// Carries everything a completer or the router needs without holding a
/// syntax node, so handles cross thread boundaries freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityHandle {
    pub(crate) unit: UnitId,
    pub(crate) symbol: TypeId,
    pub(crate) ptr: NodePtr,
    pub(crate) name: SmolStr,
    pub(crate) kind: TypeKind,
    pub(crate) type_params: Vec<SmolStr>,
    pub(crate) is_partial: bool,
    pub(crate) name_range: TextRange,
    pub(crate) scope: Scope,
    pub(crate) attributes: Vec<AttributeRef>,
    pub(crate) markers: Vec<Marker>,
}

impl EntityHandle {
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn symbol(&self) -> TypeId {
        self.symbol
    }

    pub fn ptr(&self) -> NodePtr {
        self.ptr
    }

    /// Dotted namespace, `None` for the global namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.scope.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn type_params(&self) -> &[SmolStr] {
        &self.type_params
    }

    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    pub fn name_range(&self) -> TextRange {
        self.name_range
    }

    /// Imports in scope: unit-level usings first, then those of each
    /// enclosing namespace, outer to inner.
    pub fn imports(&self) -> &[Import] {
        &self.scope.imports
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &[AttributeRef] {
        &self.attributes
    }

    /// Marker identities attached through attributes, in attribute order,
    /// deduplicated.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Name with its type parameter list: `Owner<T, U>`.
    pub fn display_name(&self) -> String {
        if self.type_params.is_empty() {
            self.name.to_string()
        } else {
            format!("{}<{}>", self.name, self.type_params.join(", "))
        }
    }

    /// Namespace-qualified display name.
    pub fn qualified_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{ns}.{}", self.display_name()),
            None => self.display_name(),
        }
    }
}
