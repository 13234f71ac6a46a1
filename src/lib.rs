//! # metasharp-complete
//!
//! Marker-driven source completion for C# partial types.
//!
//! Types tagged with a marker attribute (`[MetaCompleteClass]`,
//! `[MetaCompleteDependencyProperties]`, ...) are handed to the completer
//! registered for that marker, which reads the declaration through a
//! semantic model and emits extra members. The generated members are
//! wrapped in a reopened `partial` declaration and a namespace envelope and
//! routed to a file chosen by the entity's location policy.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! driver    → run(): planning, parallel dispatch, output grouping
//!   ↓
//! output    → namespace envelope, location policies, routing
//!   ↓
//! complete  → completer registry, dispatch, result accumulation,
//!             chain reconstructor, shipped completers
//!   ↓
//! hir       → SemanticIndex snapshot, symbols, entities, diagnostics
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (UnitId, Span, LineIndex, text helpers)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → complete → output → driver)
// ============================================================================

/// Foundation types: UnitId, positions, text helpers
pub mod base;

/// Parser: Logos lexer, rowan CST, typed AST wrappers
pub mod parser;

/// High-level IR: snapshot, symbol table, entity handles
pub mod hir;

/// Completers: registry, dispatch, chain reconstruction, generators
pub mod complete;

/// Output envelopes and routing
pub mod output;

/// Run orchestration
pub mod driver;

/// Error types
pub mod error;

// Re-export the run surface
pub use complete::{Completer, CompleterRegistry, CompletionResult, DispatchPolicy, RegistryBuilder};
pub use driver::{RunConfig, run};
pub use error::{ConfigurationError, RunError};
pub use hir::{Diagnostic, EntityHandle, Marker, SemanticIndex, SemanticModel, SourceUnit};
pub use output::{LocationPolicy, Output, Router};

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize, UnitId};
