//! Marker → completer table.

use indexmap::IndexMap;

use super::class::complete_class;
use super::dependency_properties::complete_dependency_properties;
use super::Completer;
use crate::error::ConfigurationError;
use crate::hir::{Marker, SemanticIndex, SourceUnit};

/// Immutable mapping from marker identity to its completer.
///
/// Built once per configuration through [`RegistryBuilder`] and shared
/// read-only by every dispatch of a run.
#[derive(Debug, Clone)]
pub struct CompleterRegistry {
    completers: IndexMap<Marker, Completer>,
}

impl CompleterRegistry {
    /// An empty builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, marker: Marker) -> Option<&Completer> {
        self.completers.get(&marker)
    }

    /// The completer of a marker, or the configuration error for a marker
    /// nobody registered.
    pub fn completer(&self, marker: Marker) -> Result<&Completer, ConfigurationError> {
        self.get(marker)
            .ok_or_else(|| ConfigurationError::unregistered(marker))
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.completers.contains_key(&marker)
    }

    /// Registered markers in registration order.
    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.completers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Marker, &Completer)> {
        self.completers.iter().map(|(marker, c)| (*marker, c))
    }

    pub fn len(&self) -> usize {
        self.completers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completers.is_empty()
    }

    /// Stub units of every completer that declares one, in registration
    /// order.
    pub fn stubs(&self, index: &SemanticIndex) -> Vec<SourceUnit> {
        self.iter()
            .filter_map(|(marker, completer)| {
                let text = completer.stub(index)?;
                tracing::debug!("[STUB] {} stub: {} byte(s)", marker, text.len());
                Some(SourceUnit::new(format!("<stub:{marker}>"), text))
            })
            .collect()
    }
}

impl Default for CompleterRegistry {
    /// The shipped completers: dependency properties and class.
    fn default() -> Self {
        RegistryBuilder::with_defaults().build()
    }
}

/// Accumulates registrations; a marker may be registered once.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    completers: IndexMap<Marker, Completer>,
}

impl RegistryBuilder {
    /// A builder pre-loaded with the shipped completers.
    pub fn with_defaults() -> Self {
        let mut completers = IndexMap::new();
        completers.insert(
            Marker::CompleteDependencyProperties,
            Completer::new(complete_dependency_properties),
        );
        completers.insert(Marker::CompleteClass, Completer::new(complete_class));
        Self { completers }
    }

    /// Register `completer` for `marker`.
    pub fn register(
        mut self,
        marker: Marker,
        completer: Completer,
    ) -> Result<Self, ConfigurationError> {
        if self.completers.contains_key(&marker) {
            return Err(ConfigurationError::duplicate(marker));
        }
        self.completers.insert(marker, completer);
        Ok(self)
    }

    pub fn build(self) -> CompleterRegistry {
        CompleterRegistry {
            completers: self.completers,
        }
    }
}
