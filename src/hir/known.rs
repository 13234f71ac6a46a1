//! Framework identities the engine recognises by symbol, never by text.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Namespace of every framework declaration.
pub const FRAMEWORK_NAMESPACE: &str = "MetaSharp";

/// Generic registrator facility whose `New()` call terminates a chain.
pub const REGISTRATOR_TYPE: &str = "DependencyPropertiesRegistrator";

/// Name of the terminal "finalize" method on the registrator.
pub const REGISTRATOR_FINALIZE: &str = "New";

/// Attribute choosing the output location of one entity.
pub const LOCATION_ATTRIBUTE: &str = "MetaLocationAttribute";

/// Enum naming the location policies.
pub const LOCATION_KIND: &str = "MetaLocationKind";

/// Suffix the attribute lookup appends to an attribute name.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Identity of a marker annotation that selects a completer.
///
/// The set is closed; each marker corresponds to one attribute type in the
/// framework namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Marker {
    CompleteClass,
    CompleteViewModel,
    CompleteDependencyProperties,
}

impl Marker {
    pub const ALL: [Marker; 3] = [
        Marker::CompleteClass,
        Marker::CompleteViewModel,
        Marker::CompleteDependencyProperties,
    ];

    /// Short name as written in source, without the `Attribute` suffix.
    pub fn name(self) -> &'static str {
        match self {
            Self::CompleteClass => "MetaCompleteClass",
            Self::CompleteViewModel => "MetaCompleteViewModel",
            Self::CompleteDependencyProperties => "MetaCompleteDependencyProperties",
        }
    }

    /// Declared attribute type name.
    pub fn type_name(self) -> String {
        format!("{}{}", self.name(), ATTRIBUTE_SUFFIX)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Marker {
    type Err = ConfigurationError;

    /// Accepts `MetaCompleteClass`, `MetaCompleteClassAttribute` and the
    /// `MetaSharp.`-qualified forms of both.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unqualified = trimmed
            .strip_prefix(FRAMEWORK_NAMESPACE)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(trimmed);
        let short = unqualified
            .strip_suffix(ATTRIBUTE_SUFFIX)
            .unwrap_or(unqualified);
        Self::ALL
            .into_iter()
            .find(|marker| marker.name() == short)
            .ok_or_else(|| ConfigurationError::UnknownMarker(s.to_string()))
    }
}
