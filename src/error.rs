//! Error types for completion runs.

use thiserror::Error;

use crate::hir::Diagnostic;

/// A broken run setup. Always fatal, raised before any output exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A marker selected for an entity has no completer in the registry.
    #[error("no completer registered for marker {0}")]
    UnregisteredMarker(String),

    /// A second completer was registered for the same marker.
    #[error("marker {0} already has a completer")]
    DuplicateCompleter(String),

    /// A location policy name that is not one of the three known policies.
    #[error("unknown location policy: {0}")]
    UnknownLocationPolicy(String),

    /// A marker name that does not denote a known marker.
    #[error("unknown marker: {0}")]
    UnknownMarker(String),

    /// An input unit whose name does not end in `.meta.cs`.
    #[error("unit name does not end with .meta.cs: {0}")]
    UnexpectedUnitName(String),
}

impl ConfigurationError {
    /// Create an unregistered-marker error.
    pub fn unregistered(marker: impl ToString) -> Self {
        Self::UnregisteredMarker(marker.to_string())
    }

    /// Create a duplicate-completer error.
    pub fn duplicate(marker: impl ToString) -> Self {
        Self::DuplicateCompleter(marker.to_string())
    }

    /// Create an unknown-location-policy error.
    pub fn unknown_policy(name: impl Into<String>) -> Self {
        Self::UnknownLocationPolicy(name.into())
    }
}

/// Why a run produced no outputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The front end could not build a snapshot (syntax errors).
    #[error("compilation failed with {} error(s)", .0.len())]
    Compilation(Vec<Diagnostic>),

    /// The run configuration is inconsistent with the input.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// One or more completers reported diagnostics.
    #[error("completion failed with {} error(s)", .0.len())]
    Completion(Vec<Diagnostic>),
}

impl RunError {
    /// Diagnostics carried by this error; empty for configuration errors.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Compilation(diagnostics) | Self::Completion(diagnostics) => diagnostics,
            Self::Configuration(_) => &[],
        }
    }
}
