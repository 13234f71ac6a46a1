//! Completers: marker-selected analyses that emit extra members for an
//! entity.
//!
//! ```text
//! EntityHandle ──markers──▶ CompleterRegistry ──▶ [Completer]
//!                                                    │ analyze(model, entity)
//!                                                    ▼
//!                                  CompletionResult (members | diagnostics)
//!                                                    │ accumulate
//!                                                    ▼
//!                                       per entity → per unit → per run
//! ```
//!
//! The dependency-property completer is built on the [`chain`]
//! reconstructor, which turns a fluent registrator chain in a static
//! constructor into ordered [`PropertySpec`]s.

mod algebra;
pub mod chain;
mod class;
mod dependency_properties;
mod dispatch;
mod registry;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::base::text::indent;
use crate::hir::{Diagnostic, EntityHandle, SemanticIndex, SemanticModel};

pub use algebra::{accumulate, concat};
pub use chain::{ChainLink, PropertySpec, RegistrationKind, RegistrationLink, reconstruct};
pub use class::complete_class;
pub use dependency_properties::{complete_dependency_properties, generate_link};
pub use dispatch::{Completion, DispatchPolicy, Plan, dispatch, plan};
pub use registry::{CompleterRegistry, RegistryBuilder};

/// Either generated member text or the diagnostics explaining why none
/// could be generated. A failure always carries at least one diagnostic.
pub type CompletionResult = Result<String, Vec<Diagnostic>>;

/// The analysis half of a completer.
///
/// Implementations must be pure: the same model and entity always give the
/// same result. Any `Fn(&SemanticModel, &EntityHandle) -> CompletionResult`
/// closure is a `Complete`.
pub trait Complete: Send + Sync {
    fn complete(&self, model: &SemanticModel<'_>, entity: &EntityHandle) -> CompletionResult;
}

impl<F> Complete for F
where
    F: Fn(&SemanticModel<'_>, &EntityHandle) -> CompletionResult + Send + Sync,
{
    fn complete(&self, model: &SemanticModel<'_>, entity: &EntityHandle) -> CompletionResult {
        self(model, entity)
    }
}

type StubFn = dyn Fn(&SemanticIndex) -> String + Send + Sync;

/// Descriptor registered for one marker.
#[derive(Clone)]
pub struct Completer {
    analyze: Arc<dyn Complete>,
    stub: Option<Arc<StubFn>>,
    imports: IndexSet<SmolStr>,
}

impl Completer {
    pub fn new(analyze: impl Complete + 'static) -> Self {
        Self {
            analyze: Arc::new(analyze),
            stub: None,
            imports: IndexSet::new(),
        }
    }

    /// Attach a stub generator. Its text is parsed into the snapshot before
    /// dispatch so the declarations it introduces resolve.
    pub fn with_stub(
        mut self,
        stub: impl Fn(&SemanticIndex) -> String + Send + Sync + 'static,
    ) -> Self {
        self.stub = Some(Arc::new(stub));
        self
    }

    /// Namespaces added to the envelope of every output of this completer.
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn analyze(&self, model: &SemanticModel<'_>, entity: &EntityHandle) -> CompletionResult {
        self.analyze.complete(model, entity)
    }

    /// Stub source for this completer, if it declares one.
    pub fn stub(&self, index: &SemanticIndex) -> Option<String> {
        self.stub.as_ref().map(|stub| stub(index))
    }

    pub fn has_stub(&self) -> bool {
        self.stub.is_some()
    }

    pub fn imports(&self) -> &IndexSet<SmolStr> {
        &self.imports
    }
}

impl fmt::Debug for Completer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completer")
            .field("stub", &self.stub.is_some())
            .field("imports", &self.imports)
            .finish_non_exhaustive()
    }
}

/// Reopen the entity's partial declaration around generated members.
pub fn reopen(entity: &EntityHandle, members: &str) -> String {
    let header = format!("partial {} {}", entity.kind().keyword(), entity.display_name());
    if members.is_empty() {
        format!("{header} {{\n}}")
    } else {
        format!("{header} {{\n{}\n}}", indent(members, 1))
    }
}
