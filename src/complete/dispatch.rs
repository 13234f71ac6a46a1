//! Marker selection and per-entity dispatch.

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::registry::CompleterRegistry;
use super::{Completer, accumulate};
use crate::error::ConfigurationError;
use crate::hir::{Diagnostic, EntityHandle, Marker, SemanticModel, codes};

/// How many completers run for an entity carrying several markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DispatchPolicy {
    /// Every selected completer runs; outputs are concatenated in marker
    /// order.
    #[default]
    AllMatching,
    /// Only the first selected marker runs.
    FirstMatch,
}

/// The completers selected for one entity, in marker order.
#[derive(Debug, Clone, Default)]
pub struct Plan<'r> {
    completers: Vec<(Marker, &'r Completer)>,
}

impl<'r> Plan<'r> {
    pub fn is_empty(&self) -> bool {
        self.completers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.completers.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.completers.iter().map(|(marker, _)| *marker)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Marker, &'r Completer)> + '_ {
        self.completers.iter().copied()
    }
}

/// Select the completers of an entity: its attribute markers, then the
/// run's default markers, deduplicated.
///
/// A selected marker without a registered completer is a configuration
/// error.
pub fn plan<'r>(
    registry: &'r CompleterRegistry,
    entity: &EntityHandle,
    defaults: &[Marker],
    policy: DispatchPolicy,
) -> Result<Plan<'r>, ConfigurationError> {
    let mut markers: IndexSet<Marker> = entity
        .markers()
        .iter()
        .chain(defaults)
        .copied()
        .collect();
    if policy == DispatchPolicy::FirstMatch {
        markers.truncate(1);
    }
    let completers = markers
        .into_iter()
        .map(|marker| Ok((marker, registry.completer(marker)?)))
        .collect::<Result<Vec<_>, ConfigurationError>>()?;
    Ok(Plan { completers })
}

/// Output of one completer for one entity, before the namespace envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub marker: Marker,
    pub members: String,
    /// Extra imports the completer declares.
    pub imports: IndexSet<SmolStr>,
}

/// Run the planned completers on one entity.
///
/// The entity must be a `partial` type inside a namespace; otherwise no
/// completer runs and the violations are reported. Completer failures are
/// accumulated across the plan.
pub fn dispatch(
    model: &SemanticModel<'_>,
    entity: &EntityHandle,
    plan: &Plan<'_>,
) -> Result<Vec<Completion>, Vec<Diagnostic>> {
    if plan.is_empty() {
        return Ok(Vec::new());
    }
    tracing::debug!(
        "[DISPATCH] {}: {}",
        entity.qualified_name(),
        plan.markers()
            .map(|marker| marker.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut errors = Vec::new();
    if !entity.is_partial() {
        errors.push(model.diagnostic(
            codes::TYPE_NOT_PARTIAL,
            entity.name_range(),
            format!("Type '{}' should be declared partial to be completed.", entity.display_name()),
        ));
    }
    if entity.namespace().is_none() {
        errors.push(model.diagnostic(
            codes::GLOBAL_NAMESPACE,
            entity.name_range(),
            format!("Type '{}' should be declared inside a namespace to be completed.", entity.display_name()),
        ));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    accumulate(plan.iter().map(|(marker, completer)| {
        match completer.analyze(model, entity) {
            Ok(members) => Ok(Completion {
                marker,
                members,
                imports: completer.imports().clone(),
            }),
            Err(errors) if errors.is_empty() => Err(vec![model.diagnostic(
                codes::SILENT_FAILURE,
                entity.name_range(),
                format!(
                    "Completer for '{marker}' failed on type '{}' without reporting a diagnostic.",
                    entity.display_name()
                ),
            )]),
            Err(errors) => Err(errors),
        }
    }))
}
