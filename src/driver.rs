//! Run orchestration: units in, outputs or diagnostics out.
//!
//! ```text
//! SourceUnits
//!     │ SemanticIndex::build          syntax errors → RunError::Compilation
//!     │ + completer stubs, re-linked
//!     ▼
//! planning (sequential)               unknown marker / policy / unit name
//!     │                               → RunError::Configuration
//!     ▼
//! dispatch (rayon, per unit)          completer diagnostics accumulated
//!     │ wrap in namespace envelope      → RunError::Completion
//!     │ group by destination
//!     ▼
//! Vec<Output>                         unit order, then first-seen destination
//! ```

use std::path::PathBuf;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::base::constants::BLOCK_SEPARATOR;
use crate::complete::{
    CompleterRegistry, DispatchPolicy, Plan, accumulate, dispatch, plan,
};
use crate::error::{ConfigurationError, RunError};
use crate::hir::{Diagnostic, EntityHandle, Marker, ParsedUnit, SemanticIndex, SemanticModel, SourceUnit};
use crate::output::{LocationPolicy, Output, Router, declared_location, union_imports, wrap};

/// Immutable configuration of a completion run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub registry: CompleterRegistry,
    pub policy: DispatchPolicy,
    pub router: Router,
}

struct EntityPlan<'a> {
    entity: &'a EntityHandle,
    plan: Plan<'a>,
    destination: PathBuf,
    visible: bool,
}

struct UnitPlan<'a> {
    unit: &'a ParsedUnit,
    entities: Vec<EntityPlan<'a>>,
}

impl RunConfig {
    pub fn new(registry: CompleterRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_router(mut self, router: Router) -> Self {
        self.router = router;
        self
    }

    /// Complete every marked entity of `units`, choosing each entity's
    /// location with `location_of`.
    pub fn run(
        &self,
        units: &[SourceUnit],
        default_markers: &[Marker],
        location_of: impl Fn(&EntityHandle) -> LocationPolicy + Sync,
    ) -> Result<Vec<Output>, RunError> {
        self.run_with(units, default_markers, |_, entity| Ok(location_of(entity)))
    }

    /// Like [`run`](Self::run), taking each entity's location from its
    /// `[MetaLocation]` attribute (`IntermediateOutput` when absent).
    pub fn run_declared(
        &self,
        units: &[SourceUnit],
        default_markers: &[Marker],
    ) -> Result<Vec<Output>, RunError> {
        self.run_with(units, default_markers, |index, entity| {
            Ok(declared_location(index, entity)?.unwrap_or_default())
        })
    }

    fn run_with<L>(
        &self,
        units: &[SourceUnit],
        default_markers: &[Marker],
        location_of: L,
    ) -> Result<Vec<Output>, RunError>
    where
        L: Fn(&SemanticIndex, &EntityHandle) -> Result<LocationPolicy, ConfigurationError>,
    {
        let index = SemanticIndex::build(units).map_err(RunError::Compilation)?;
        let stubs = self.registry.stubs(&index);
        let index = if stubs.is_empty() {
            index
        } else {
            index.with_stubs(&stubs).map_err(RunError::Compilation)?
        };

        let plans = index
            .user_units()
            .map(|unit| self.plan_unit(&index, unit, default_markers, &location_of))
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        let results: Vec<Result<Vec<Output>, Vec<Diagnostic>>> = plans
            .par_iter()
            .map(|unit_plan| complete_unit(&index, unit_plan))
            .collect();
        let outputs: Vec<Output> = accumulate(results)
            .map_err(RunError::Completion)?
            .into_iter()
            .flatten()
            .collect();

        tracing::info!(
            "[RUN] {} unit(s), {} entit(ies) completed, {} output(s)",
            plans.len(),
            plans.iter().map(|p| p.entities.len()).sum::<usize>(),
            outputs.len()
        );
        Ok(outputs)
    }

    fn plan_unit<'a, L>(
        &'a self,
        index: &'a SemanticIndex,
        unit: &'a ParsedUnit,
        default_markers: &[Marker],
        location_of: &L,
    ) -> Result<UnitPlan<'a>, ConfigurationError>
    where
        L: Fn(&SemanticIndex, &EntityHandle) -> Result<LocationPolicy, ConfigurationError>,
    {
        let mut entities = Vec::new();
        for entity in unit.entities() {
            let plan = plan(&self.registry, entity, default_markers, self.policy)?;
            if plan.is_empty() {
                continue;
            }
            let policy = location_of(index, entity)?;
            let (destination, visible) = self.router.route(unit.name(), policy)?;
            entities.push(EntityPlan {
                entity,
                plan,
                destination,
                visible,
            });
        }
        tracing::debug!(
            "[PLAN] {}: {} of {} entit(ies) to complete",
            unit.name(),
            entities.len(),
            unit.entities().len()
        );
        Ok(UnitPlan { unit, entities })
    }
}

/// Complete `units` with the default configuration.
pub fn run(
    units: &[SourceUnit],
    default_markers: &[Marker],
    location_of: impl Fn(&EntityHandle) -> LocationPolicy + Sync,
) -> Result<Vec<Output>, RunError> {
    RunConfig::default().run(units, default_markers, location_of)
}

fn complete_unit(index: &SemanticIndex, unit_plan: &UnitPlan<'_>) -> Result<Vec<Output>, Vec<Diagnostic>> {
    if unit_plan.entities.is_empty() {
        return Ok(Vec::new());
    }
    let Some(model) = index.model(unit_plan.unit.id()) else {
        return Ok(Vec::new());
    };
    let texts = accumulate(
        unit_plan
            .entities
            .iter()
            .map(|entity_plan| complete_entity(&model, entity_plan)),
    )?;

    let mut groups: IndexMap<PathBuf, (bool, Vec<String>)> = IndexMap::new();
    for (entity_plan, text) in unit_plan.entities.iter().zip(texts) {
        groups
            .entry(entity_plan.destination.clone())
            .or_insert_with(|| (entity_plan.visible, Vec::new()))
            .1
            .push(text);
    }
    Ok(groups
        .into_iter()
        .map(|(destination, (visible_to_editor, texts))| Output {
            text: texts.join(BLOCK_SEPARATOR),
            destination,
            visible_to_editor,
        })
        .collect())
}

/// Every completion of one entity, each in its own namespace envelope.
fn complete_entity(model: &SemanticModel<'_>, entity_plan: &EntityPlan<'_>) -> Result<String, Vec<Diagnostic>> {
    let entity = entity_plan.entity;
    let completions = dispatch(model, entity, &entity_plan.plan)?;
    let namespace = entity.namespace().unwrap_or_default();
    Ok(completions
        .iter()
        .map(|completion| {
            wrap(
                namespace,
                union_imports(entity.imports(), &completion.imports),
                &completion.members,
            )
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR))
}
