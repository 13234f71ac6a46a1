//! SemanticModel: the per-unit view completers analyse through.

use std::sync::Arc;

use super::diagnostics::Diagnostic;
use super::entity::EntityHandle;
use super::index::{ParsedUnit, SemanticIndex};
use super::symbols::{ResolveResult, TypeSymbol, TypeId};
use crate::base::Span;
use crate::parser::{AstNode, ClassDecl, SourceFile, Stmt, SyntaxNode, TextRange, TypeRef};

/// Read-only view of one unit of a [`SemanticIndex`].
///
/// Holds a syntax root, so it lives on the thread that created it.
#[derive(Debug, Clone)]
pub struct SemanticModel<'a> {
    index: &'a SemanticIndex,
    unit: &'a ParsedUnit,
    root: SyntaxNode,
}

impl<'a> SemanticModel<'a> {
    pub(crate) fn new(index: &'a SemanticIndex, unit: &'a ParsedUnit) -> Self {
        Self {
            index,
            unit,
            root: unit.syntax(),
        }
    }

    pub fn index(&self) -> &'a SemanticIndex {
        self.index
    }

    pub fn unit(&self) -> &'a ParsedUnit {
        self.unit
    }

    pub fn unit_name(&self) -> &Arc<str> {
        self.unit.name()
    }

    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.root.clone())
    }

    /// The declaration node of an entity of this unit.
    pub fn declaration(&self, entity: &EntityHandle) -> Option<ClassDecl> {
        if entity.unit() != self.unit.id() {
            return None;
        }
        entity.ptr().cast(&self.root)
    }

    /// Statements of the entity's static constructor; `None` when the
    /// entity declares none.
    pub fn static_initializer(&self, entity: &EntityHandle) -> Option<Vec<Stmt>> {
        let ctor = self.declaration(entity)?.static_constructor()?;
        Some(
            ctor.body()
                .map(|body| body.statements().collect())
                .unwrap_or_default(),
        )
    }

    /// Resolve a type name in the entity's scope.
    pub fn resolve_type(
        &self,
        entity: &EntityHandle,
        segments: &[impl AsRef<str>],
        arity: usize,
    ) -> ResolveResult {
        self.index.resolve(entity, segments, arity)
    }

    /// Resolve a type reference in the entity's scope.
    pub fn resolve_type_ref(&self, entity: &EntityHandle, ty: &TypeRef) -> ResolveResult {
        let segments = ty.segments();
        if segments.is_empty() {
            return ResolveResult::NotFound;
        }
        self.resolve_type(entity, &segments, ty.arity())
    }

    pub fn symbol(&self, id: TypeId) -> &'a TypeSymbol {
        self.index.symbols().get(id)
    }

    pub fn is_registrator(&self, id: TypeId) -> bool {
        self.index.is_registrator(id)
    }

    pub fn span(&self, range: TextRange) -> Span {
        self.unit.line_index().span(range)
    }

    pub fn span_of(&self, node: &impl AstNode) -> Span {
        self.span(node.text_range())
    }

    /// Build an error diagnostic located in this unit.
    pub fn diagnostic(&self, id: &str, range: TextRange, message: impl Into<Arc<str>>) -> Diagnostic {
        Diagnostic::error(id, self.unit.name().clone(), self.span(range), message)
    }
}
