//! Foundation types for the completion engine.
//!
//! - [`UnitId`] - Identifies one parsed source unit within a run
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column ranges carried by diagnostics
//! - Text helpers used by the generators (indentation, casing)
//! - Domain constants (unit suffixes, indentation unit)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod file_id;
mod position;
mod span;
pub mod text;

pub use file_id::UnitId;
pub use position::{Position, Span};
pub use span::LineIndex;

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
