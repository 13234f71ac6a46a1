//! High-level IR (HIR): the semantic snapshot completers work on.
//!
//! This module turns parsed units into a [`SemanticIndex`]: one immutable
//! snapshot per run holding the parsed units, a symbol table of every
//! declared type and the entity handles the dispatcher iterates.
//!
//! ## Key Types
//!
//! - [`SemanticIndex`]: the snapshot (units, symbols, entities)
//! - [`EntityHandle`]: a top-level type declaration with its scope and markers
//! - [`SemanticModel`]: per-unit view handed to completers
//! - [`SymbolTable`] / [`Resolver`]: C#-style type name resolution
//! - [`Marker`]: the closed set of marker identities
//! - [`Diagnostic`]: located error report
//!
//! ## Build Steps
//!
//! ```text
//! units + prelude (+ stubs)
//!     │  parse in parallel; any syntax error is fatal
//!     ▼
//! declarations per unit      ← top-level types, scopes, attribute refs
//!     │
//!     ▼
//! symbol table               ← namespace + name + arity, partials merged
//!     │
//!     ▼
//! linking                    ← attribute refs → types → markers
//! ```

mod diagnostics;
mod entity;
mod index;
mod known;
mod model;
mod prelude;
mod symbols;

pub use diagnostics::{Diagnostic, codes};
pub use entity::{AttributeRef, EntityHandle};
pub use index::{ParsedUnit, SemanticIndex, SourceUnit, UnitOrigin};
pub use known::{
    ATTRIBUTE_SUFFIX, FRAMEWORK_NAMESPACE, LOCATION_ATTRIBUTE, LOCATION_KIND, Marker,
    REGISTRATOR_FINALIZE, REGISTRATOR_TYPE,
};
pub use model::SemanticModel;
pub use symbols::{Import, ImportKind, ResolveResult, Resolver, Scope, SymbolTable, TypeId, TypeSymbol};
