//! SemanticIndex: the immutable snapshot one run works on.
//!
//! Building the index parses every unit (in parallel), collects the
//! top-level type declarations, fills the symbol table and links attribute
//! references to marker identities. Any syntax error is fatal.

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexSet;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::diagnostics::{Diagnostic, codes};
use super::entity::{AttributeRef, EntityHandle};
use super::known::{ATTRIBUTE_SUFFIX, FRAMEWORK_NAMESPACE, LOCATION_ATTRIBUTE, Marker, REGISTRATOR_TYPE};
use super::model::SemanticModel;
use super::prelude::PRELUDE_SOURCE;
use super::symbols::{Import, ImportKind, ResolveResult, Scope, SymbolTable, TypeId};
use crate::base::constants::PRELUDE_UNIT;
use crate::base::{LineIndex, UnitId};
use crate::parser::{
    AstNode, ClassDecl, GreenNode, NamespaceDecl, NodePtr, SourceFile, SyntaxNode, TextRange,
    TypeKind, UsingDirective, normalized_text, parse,
};

// ============================================================================
// UNITS
// ============================================================================

/// One input unit: its identifier (usually a path) and its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUnit {
    pub name: Arc<str>,
    pub text: Arc<str>,
}

impl SourceUnit {
    pub fn new(name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Where a unit of the snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitOrigin {
    /// A unit passed to the run; its entities are dispatched.
    User,
    /// The built-in framework declarations.
    Prelude,
    /// Stub declarations contributed by completers.
    Stub,
}

/// A top-level type declaration before linking.
#[derive(Debug, Clone)]
struct Declared {
    ptr: NodePtr,
    name: SmolStr,
    kind: TypeKind,
    type_params: Vec<SmolStr>,
    is_partial: bool,
    name_range: TextRange,
    scope: Scope,
    attributes: Vec<AttributeRef>,
}

/// A parsed unit of the snapshot.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    id: UnitId,
    name: Arc<str>,
    origin: UnitOrigin,
    green: GreenNode,
    line_index: LineIndex,
    declared: Vec<Declared>,
    global_imports: Vec<Import>,
    entities: Vec<EntityHandle>,
}

impl ParsedUnit {
    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn origin(&self) -> UnitOrigin {
        self.origin
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Top-level type declarations, in declaration order.
    pub fn entities(&self) -> &[EntityHandle] {
        &self.entities
    }

    /// A fresh syntax root over the shared green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

impl Drop for ParsedUnit {
    fn drop(&mut self) {
        crate::parser::release_tree(&mut self.green);
    }
}

// ============================================================================
// KNOWN SYMBOLS
// ============================================================================

/// Symbols of the framework declarations.
#[derive(Debug, Clone, Default)]
struct KnownSymbols {
    markers: FxHashMap<TypeId, Marker>,
    registrator: Option<TypeId>,
    location_attribute: Option<TypeId>,
}

impl KnownSymbols {
    fn locate(symbols: &SymbolTable) -> Self {
        let ns = Some(FRAMEWORK_NAMESPACE);
        let markers = Marker::ALL
            .into_iter()
            .filter_map(|marker| {
                symbols
                    .lookup(ns, &marker.type_name(), 0)
                    .map(|id| (id, marker))
            })
            .collect();
        Self {
            markers,
            registrator: symbols.lookup(ns, REGISTRATOR_TYPE, 1),
            location_attribute: symbols.lookup(ns, LOCATION_ATTRIBUTE, 0),
        }
    }
}

// ============================================================================
// SEMANTIC INDEX
// ============================================================================

/// The snapshot of one run: parsed units, symbols and entity handles.
///
/// Constructed once and never mutated; shared read-only across workers.
#[derive(Debug, Clone)]
pub struct SemanticIndex {
    units: Vec<ParsedUnit>,
    symbols: SymbolTable,
    known: KnownSymbols,
    global_imports: Vec<Import>,
}

impl SemanticIndex {
    /// Parse and link the given units together with the prelude.
    ///
    /// Returns every syntax error, in unit order, when any unit fails to
    /// parse.
    pub fn build(units: &[SourceUnit]) -> Result<Self, Vec<Diagnostic>> {
        let prelude = SourceUnit::new(PRELUDE_UNIT, PRELUDE_SOURCE);
        let inputs: Vec<(&SourceUnit, UnitOrigin)> = units
            .iter()
            .map(|unit| (unit, UnitOrigin::User))
            .chain(std::iter::once((&prelude, UnitOrigin::Prelude)))
            .collect();
        let parsed = parse_units(&inputs, 0)?;
        let index = Self::assemble(parsed);
        tracing::debug!(
            "[INDEX] {} unit(s), {} type symbol(s)",
            units.len(),
            index.symbols.len()
        );
        Ok(index)
    }

    /// Add stub units and re-link, so stub-declared types resolve.
    pub fn with_stubs(self, stubs: &[SourceUnit]) -> Result<Self, Vec<Diagnostic>> {
        if stubs.is_empty() {
            return Ok(self);
        }
        let inputs: Vec<(&SourceUnit, UnitOrigin)> =
            stubs.iter().map(|unit| (unit, UnitOrigin::Stub)).collect();
        let mut units = self.units;
        units.extend(parse_units(&inputs, units.len())?);
        tracing::debug!("[INDEX] re-linking with {} stub unit(s)", stubs.len());
        Ok(Self::assemble(units))
    }

    fn assemble(mut units: Vec<ParsedUnit>) -> Self {
        let mut symbols = SymbolTable::new();
        let mut ids: Vec<Vec<TypeId>> = Vec::with_capacity(units.len());
        for unit in &units {
            ids.push(
                unit.declared
                    .iter()
                    .map(|decl| {
                        symbols.insert(
                            decl.scope.namespace.as_deref(),
                            &decl.name,
                            decl.type_params.len(),
                            (unit.id, decl.ptr),
                        )
                    })
                    .collect(),
            );
        }
        let known = KnownSymbols::locate(&symbols);
        let global_imports: Vec<Import> = units
            .iter()
            .flat_map(|unit| unit.global_imports.iter().cloned())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        for (unit, unit_ids) in units.iter_mut().zip(ids) {
            unit.entities = unit
                .declared
                .iter()
                .zip(unit_ids)
                .map(|(decl, symbol)| link(decl, symbol, &symbols, &known, &global_imports, unit.id))
                .collect();
        }

        Self {
            units,
            symbols,
            known,
            global_imports,
        }
    }

    // ------------------------------------------------------------------------
    // Units and entities
    // ------------------------------------------------------------------------

    /// Units passed to the run, in input order.
    pub fn user_units(&self) -> impl Iterator<Item = &ParsedUnit> {
        self.units
            .iter()
            .filter(|unit| unit.origin == UnitOrigin::User)
    }

    /// Every unit of the snapshot, prelude and stubs included.
    pub fn all_units(&self) -> &[ParsedUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&ParsedUnit> {
        self.units.get(id.index())
    }

    /// Entities of the user units, unit by unit in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityHandle> {
        self.user_units().flat_map(|unit| unit.entities.iter())
    }

    /// Every declaration part of a type, across all units, in unit order.
    pub fn parts(&self, symbol: TypeId) -> impl Iterator<Item = &EntityHandle> {
        self.units
            .iter()
            .flat_map(|unit| unit.entities.iter())
            .filter(move |part| part.symbol() == symbol)
    }

    /// Semantic view of one unit. Syntax nodes are rebuilt on the calling
    /// thread.
    pub fn model(&self, id: UnitId) -> Option<SemanticModel<'_>> {
        self.unit(id).map(|unit| SemanticModel::new(self, unit))
    }

    // ------------------------------------------------------------------------
    // Symbols
    // ------------------------------------------------------------------------

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Resolve a type name from inside an entity's declaration.
    pub fn resolve(&self, entity: &EntityHandle, segments: &[impl AsRef<str>], arity: usize) -> ResolveResult {
        let scope = self.lookup_scope(entity.scope());
        self.symbols.resolver(&scope).resolve(segments, arity)
    }

    /// Marker identity of an attribute type, if it is one.
    pub fn marker_of(&self, id: TypeId) -> Option<Marker> {
        self.known.markers.get(&id).copied()
    }

    /// Whether `id` is the generic registrator facility.
    pub fn is_registrator(&self, id: TypeId) -> bool {
        self.known.registrator == Some(id)
    }

    /// Whether `id` is the location attribute.
    pub fn is_location_attribute(&self, id: TypeId) -> bool {
        self.known.location_attribute == Some(id)
    }

    /// Entity scope plus the `global using` directives of the snapshot.
    fn lookup_scope<'a>(&self, scope: &'a Scope) -> Cow<'a, Scope> {
        lookup_scope(scope, &self.global_imports)
    }
}

fn lookup_scope<'a>(scope: &'a Scope, global_imports: &[Import]) -> Cow<'a, Scope> {
    if global_imports.is_empty() {
        return Cow::Borrowed(scope);
    }
    let mut combined = scope.clone();
    combined.imports.extend(global_imports.iter().cloned());
    Cow::Owned(combined)
}

// ============================================================================
// PARSING AND COLLECTION
// ============================================================================

fn parse_units(
    inputs: &[(&SourceUnit, UnitOrigin)],
    first_id: usize,
) -> Result<Vec<ParsedUnit>, Vec<Diagnostic>> {
    let results: Vec<Result<ParsedUnit, Vec<Diagnostic>>> = inputs
        .par_iter()
        .enumerate()
        .map(|(offset, (unit, origin))| parse_unit(UnitId::new(first_id + offset), unit, *origin))
        .collect();

    let mut parsed = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(unit) => parsed.push(unit),
            Err(diagnostics) => errors.extend(diagnostics),
        }
    }
    if errors.is_empty() {
        Ok(parsed)
    } else {
        tracing::debug!("[INDEX] {} syntax error(s)", errors.len());
        Err(errors)
    }
}

fn parse_unit(id: UnitId, unit: &SourceUnit, origin: UnitOrigin) -> Result<ParsedUnit, Vec<Diagnostic>> {
    let text: &str = &unit.text;
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let parse = parse(text);
    let line_index = LineIndex::new(text);
    if !parse.ok() {
        return Err(parse
            .errors
            .iter()
            .map(|error| {
                Diagnostic::error(
                    codes::SYNTAX_ERROR,
                    unit.name.clone(),
                    line_index.span(error.range),
                    error.message.as_str(),
                )
            })
            .collect());
    }

    let root = parse.syntax();
    let (declared, global_imports) = match SourceFile::cast(root) {
        Some(file) => collect_declarations(&file),
        None => (Vec::new(), Vec::new()),
    };
    tracing::trace!(
        "[INDEX] {} ({:?}): {} declaration(s)",
        unit.name,
        origin,
        declared.len()
    );
    Ok(ParsedUnit {
        id,
        name: unit.name.clone(),
        origin,
        green: parse.green.clone(),
        line_index,
        declared,
        global_imports,
        entities: Vec::new(),
    })
}

fn collect_declarations(file: &SourceFile) -> (Vec<Declared>, Vec<Import>) {
    let mut global_imports = Vec::new();
    let mut imports = Vec::new();
    for using in file.usings() {
        if let Some(import) = import_of(&using) {
            if using.is_global() {
                global_imports.push(import);
            } else {
                imports.push(import);
            }
        }
    }

    let mut declared = Vec::new();
    for class in file.types() {
        declared.extend(declare(&class, None, &imports));
    }
    for ns in file.namespaces() {
        collect_namespace(&ns, None, &imports, &mut declared);
    }
    declared.sort_by_key(|decl| decl.ptr.range().start());
    (declared, global_imports)
}

fn collect_namespace(
    ns: &NamespaceDecl,
    outer: Option<&str>,
    imports: &[Import],
    declared: &mut Vec<Declared>,
) {
    let Some(name) = ns.name().map(|name| name.segments().join(".")) else {
        return;
    };
    let full = match outer {
        Some(outer) => format!("{outer}.{name}"),
        None => name,
    };
    let Some(body) = ns.body() else {
        return;
    };
    let mut imports = imports.to_vec();
    imports.extend(body.usings().filter_map(|using| import_of(&using)));

    for class in body.types() {
        declared.extend(declare(&class, Some(&full), &imports));
    }
    for inner in body.namespaces() {
        collect_namespace(&inner, Some(&full), &imports, declared);
    }
}

fn import_of(using: &UsingDirective) -> Option<Import> {
    let target = using.target()?;
    let kind = if let Some(alias) = using.alias() {
        ImportKind::Alias(alias.text().into())
    } else if using.is_static() {
        ImportKind::Static
    } else {
        ImportKind::Namespace
    };
    Some(Import {
        kind,
        target: target.text().into(),
        segments: target.segments().into_iter().map(SmolStr::from).collect(),
        arity: target.arity(),
    })
}

fn declare(class: &ClassDecl, namespace: Option<&str>, imports: &[Import]) -> Option<Declared> {
    let name = class.name()?;
    let ident = name.ident()?;
    let attributes = class
        .attribute_lists()
        .filter(|list| list.target().is_none_or(|target| target == "type"))
        .flat_map(|list| list.attributes().collect::<Vec<_>>())
        .filter_map(|attr| {
            let qualified = attr.name()?;
            let args = attr
                .arg_list()
                .map(|list| {
                    list.args()
                        .filter_map(|arg| arg.expr())
                        .map(|expr| normalized_text(expr.syntax()))
                        .collect()
                })
                .unwrap_or_default();
            Some(AttributeRef {
                segments: qualified.segments().into_iter().map(SmolStr::from).collect(),
                arity: qualified.arity(),
                args,
                range: attr.syntax().text_range(),
                resolved: None,
            })
        })
        .collect();

    Some(Declared {
        ptr: NodePtr::new(class.syntax()),
        name: ident.text().into(),
        kind: class.kind(),
        type_params: class.type_params().into_iter().map(SmolStr::from).collect(),
        is_partial: class.is_partial(),
        name_range: ident.text_range(),
        scope: Scope {
            namespace: namespace.map(SmolStr::new),
            imports: imports.to_vec(),
        },
        attributes,
    })
}

// ============================================================================
// LINKING
// ============================================================================

fn link(
    decl: &Declared,
    symbol: TypeId,
    symbols: &SymbolTable,
    known: &KnownSymbols,
    global_imports: &[Import],
    unit: UnitId,
) -> EntityHandle {
    let scope = lookup_scope(&decl.scope, global_imports);
    let resolver = symbols.resolver(&scope);

    let attributes: Vec<AttributeRef> = decl
        .attributes
        .iter()
        .map(|attr| AttributeRef {
            resolved: resolve_attribute(&resolver, &attr.segments, attr.arity),
            ..attr.clone()
        })
        .collect();
    let markers: IndexSet<Marker> = attributes
        .iter()
        .filter_map(|attr| attr.resolved)
        .filter_map(|id| known.markers.get(&id).copied())
        .collect();

    EntityHandle {
        unit,
        symbol,
        ptr: decl.ptr,
        name: decl.name.clone(),
        kind: decl.kind,
        type_params: decl.type_params.clone(),
        is_partial: decl.is_partial,
        name_range: decl.name_range,
        scope: decl.scope.clone(),
        attributes,
        markers: markers.into_iter().collect(),
    }
}

/// `[Foo]` finds `FooAttribute` first, then `Foo`.
fn resolve_attribute(
    resolver: &super::symbols::Resolver<'_>,
    segments: &[SmolStr],
    arity: usize,
) -> Option<TypeId> {
    let (last, _) = segments.split_last()?;
    if !last.ends_with(ATTRIBUTE_SUFFIX) {
        let mut suffixed: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        if let Some(last) = suffixed.last_mut() {
            last.push_str(ATTRIBUTE_SUFFIX);
        }
        if let ResolveResult::Found(id) = resolver.resolve(&suffixed, arity) {
            return Some(id);
        }
    }
    resolver.resolve(segments, arity).symbol()
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
