//! Symbol table: every declared type of the snapshot, and C#-style name
//! resolution against it.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::UnitId;
use crate::parser::NodePtr;

// ============================================================================
// SYMBOLS
// ============================================================================

/// Identity of a declared type within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared type. Partial declarations merge into one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    pub id: TypeId,
    /// `None` for the global namespace.
    pub namespace: Option<SmolStr>,
    pub name: SmolStr,
    /// Number of type parameters.
    pub arity: usize,
    /// Every declaration site, in snapshot order.
    pub declarations: Vec<(UnitId, NodePtr)>,
}

impl TypeSymbol {
    /// Dotted name with a CLR-style arity marker: `MetaSharp.Registrator`1`.
    pub fn metadata_name(&self) -> String {
        let mut name = match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.name),
            None => self.name.to_string(),
        };
        if self.arity > 0 {
            name.push('`');
            name.push_str(&self.arity.to_string());
        }
        name
    }
}

type SymbolKey = (Option<SmolStr>, SmolStr, usize);

/// Index of declared types keyed by namespace, name and arity.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<TypeSymbol>,
    by_key: FxHashMap<SymbolKey, TypeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration; a declaration with an existing key joins that symbol.
    pub fn insert(
        &mut self,
        namespace: Option<&str>,
        name: &str,
        arity: usize,
        declaration: (UnitId, NodePtr),
    ) -> TypeId {
        let key = (namespace.map(SmolStr::new), SmolStr::new(name), arity);
        if let Some(&id) = self.by_key.get(&key) {
            self.symbols[id.index()].declarations.push(declaration);
            return id;
        }
        let id = TypeId(self.symbols.len() as u32);
        self.symbols.push(TypeSymbol {
            id,
            namespace: key.0.clone(),
            name: key.1.clone(),
            arity,
            declarations: vec![declaration],
        });
        self.by_key.insert(key, id);
        id
    }

    pub fn lookup(&self, namespace: Option<&str>, name: &str, arity: usize) -> Option<TypeId> {
        let key = (namespace.map(SmolStr::new), SmolStr::new(name), arity);
        self.by_key.get(&key).copied()
    }

    pub fn get(&self, id: TypeId) -> &TypeSymbol {
        &self.symbols[id.index()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.symbols.iter()
    }

    /// Resolver for lookups from inside `scope`.
    pub fn resolver<'a>(&'a self, scope: &'a Scope) -> Resolver<'a> {
        Resolver { table: self, scope }
    }
}

// ============================================================================
// SCOPES
// ============================================================================

/// How a `using` directive brings names into scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `using A.B;`
    Namespace,
    /// `using static A.B;`
    Static,
    /// `using X = A.B;`
    Alias(SmolStr),
}

/// One `using` directive in scope of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    pub kind: ImportKind,
    /// Normalized target text (`A.B`, `A.B<int>`).
    pub target: SmolStr,
    /// Target name segments, `global::` removed.
    pub segments: Vec<SmolStr>,
    /// Generic arity of the target's last segment.
    pub arity: usize,
}

impl Import {
    /// Directive body as it is written back: `A.B`, `static A.B`, `X = A.B`.
    pub fn directive(&self) -> String {
        match &self.kind {
            ImportKind::Namespace => self.target.to_string(),
            ImportKind::Static => format!("static {}", self.target),
            ImportKind::Alias(alias) => format!("{alias} = {}", self.target),
        }
    }
}

/// Lookup context of an entity: its namespace and the imports visible to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub namespace: Option<SmolStr>,
    pub imports: Vec<Import>,
}

impl Scope {
    /// The enclosing namespace chain, innermost first, ending with the
    /// global namespace.
    fn namespace_chain(&self) -> Vec<Option<String>> {
        let mut chain = Vec::new();
        if let Some(ns) = &self.namespace {
            let mut current = ns.to_string();
            loop {
                chain.push(Some(current.clone()));
                match current.rfind('.') {
                    Some(dot) => current.truncate(dot),
                    None => break,
                }
            }
        }
        chain.push(None);
        chain
    }

    fn alias(&self, name: &str) -> Option<&Import> {
        self.imports
            .iter()
            .find(|import| matches!(&import.kind, ImportKind::Alias(alias) if alias == name))
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Result of resolving a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Resolved to a single symbol.
    Found(TypeId),
    /// More than one imported namespace provides the name.
    Ambiguous(Vec<TypeId>),
    /// Could not resolve the name.
    NotFound,
}

impl ResolveResult {
    /// Get the resolved symbol if unambiguous.
    pub fn symbol(&self) -> Option<TypeId> {
        match self {
            Self::Found(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// Name resolution from one scope.
///
/// Simple names search the enclosing namespaces innermost-first, then
/// using-aliases, then the namespaces imported by plain `using` directives.
/// Qualified names try each enclosing namespace as a prefix, innermost
/// first, ending with the fully qualified reading.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a SymbolTable,
    scope: &'a Scope,
}

impl<'a> Resolver<'a> {
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S], arity: usize) -> ResolveResult {
        let segments: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
        let result = match segments.as_slice() {
            [] => ResolveResult::NotFound,
            [name] => self.resolve_simple(name, arity),
            [first, rest @ ..] => match self.scope.alias(first) {
                Some(alias) => {
                    let mut expanded: Vec<&str> =
                        alias.segments.iter().map(|s| s.as_str()).collect();
                    expanded.extend(rest.iter().copied());
                    self.resolve_absolute(&expanded, arity)
                }
                None => self.resolve_qualified(&segments, arity),
            },
        };
        tracing::trace!(
            "[RESOLVE] '{}'`{} from {:?} -> {:?}",
            segments.join("."),
            arity,
            self.scope.namespace,
            result
        );
        result
    }

    fn resolve_simple(&self, name: &str, arity: usize) -> ResolveResult {
        for ns in self.scope.namespace_chain() {
            if let Some(id) = self.table.lookup(ns.as_deref(), name, arity) {
                return ResolveResult::Found(id);
            }
        }

        if arity == 0 {
            if let Some(alias) = self.scope.alias(name) {
                return self.resolve_absolute(&alias.segments, alias.arity);
            }
        }

        let mut candidates: Vec<TypeId> = Vec::new();
        for import in &self.scope.imports {
            if import.kind != ImportKind::Namespace {
                continue;
            }
            let ns = import.segments.join(".");
            if let Some(id) = self.table.lookup(Some(&ns), name, arity) {
                if !candidates.contains(&id) {
                    candidates.push(id);
                }
            }
        }
        match candidates.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(candidates[0]),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }

    fn resolve_qualified(&self, segments: &[&str], arity: usize) -> ResolveResult {
        let Some((name, prefix)) = segments.split_last() else {
            return ResolveResult::NotFound;
        };
        let prefix = prefix.join(".");
        for ns in self.scope.namespace_chain() {
            let candidate = match ns {
                Some(ns) => format!("{ns}.{prefix}"),
                None => prefix.clone(),
            };
            if let Some(id) = self.table.lookup(Some(&candidate), name, arity) {
                return ResolveResult::Found(id);
            }
        }
        ResolveResult::NotFound
    }

    fn resolve_absolute<S: AsRef<str>>(&self, segments: &[S], arity: usize) -> ResolveResult {
        let Some((name, prefix)) = segments.split_last() else {
            return ResolveResult::NotFound;
        };
        let namespace = (!prefix.is_empty()).then(|| {
            prefix
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(".")
        });
        self.table
            .lookup(namespace.as_deref(), name.as_ref(), arity)
            .map(ResolveResult::Found)
            .unwrap_or(ResolveResult::NotFound)
    }
}
