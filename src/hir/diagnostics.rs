//! Diagnostics: completion and front-end error reporting.
//!
//! Every diagnostic carries the unit it belongs to and a resolvable
//! line/column span. The `Display` form is the one build hosts parse:
//! `unit(line,col,endLine,endCol): error ID: message`.

use std::fmt;
use std::sync::Arc;

use crate::base::Span;

// ============================================================================
// DIAGNOSTIC TYPE
// ============================================================================

/// An error with a location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Error code (e.g., "MS0002").
    pub id: Arc<str>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Identifier of the unit containing this diagnostic.
    pub unit: Arc<str>,
    /// Location inside the unit (0-indexed).
    pub span: Span,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(
        id: impl Into<Arc<str>>,
        unit: impl Into<Arc<str>>,
        span: Span,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            unit: unit.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): error {}: {}",
            self.unit, self.span, self.id, self.message
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// ## Code Ranges
///
/// - **MS0001-MS0099**: Completion errors, reported per entity and accumulated
/// - **MS0100-MS0199**: Front-end errors, fatal to the run
pub mod codes {
    /// Registration call without exactly one property type argument.
    pub const PROPERTY_TYPE_MISSED: &str = "MS0001";
    /// Name argument is not an identifier ending in `Property`.
    pub const INCORRECT_PROPERTY_NAME: &str = "MS0002";
    /// Registrator owner type is not the enclosing entity.
    pub const INCORRECT_OWNER_TYPE: &str = "MS0003";
    /// Unrecognized registration method in a registrator chain.
    pub const UNKNOWN_REGISTRATION_METHOD: &str = "MS0005";
    /// Dependency-property target without a static constructor.
    pub const STATIC_CONSTRUCTOR_MISSED: &str = "MS0006";
    /// Completion target is not declared `partial`.
    pub const TYPE_NOT_PARTIAL: &str = "MS0007";
    /// Completion target is declared in the global namespace.
    pub const GLOBAL_NAMESPACE: &str = "MS0008";
    /// A completer failed without reporting a diagnostic.
    pub const SILENT_FAILURE: &str = "MS0009";

    /// Syntax error.
    pub const SYNTAX_ERROR: &str = "MS0100";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;

    #[test]
    fn test_display_is_one_based() {
        let diagnostic = Diagnostic::error(
            codes::INCORRECT_PROPERTY_NAME,
            "Foo.meta.cs",
            Span::new(Position::new(4, 8), Position::new(4, 20)),
            "Incorrect property name",
        );
        assert_eq!(
            diagnostic.to_string(),
            "Foo.meta.cs(5,9,5,21): error MS0002: Incorrect property name"
        );
    }
}
