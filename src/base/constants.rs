//! Domain constants shared across layers.

/// Suffix every completion input unit carries.
pub const META_UNIT_SUFFIX: &str = ".meta.cs";

/// Output suffix for the IntermediateOutput location.
pub const INTERMEDIATE_SUFFIX: &str = ".meta.g.i.cs";

/// Output suffix for the IntermediateOutputNoIntellisense location.
pub const INTERMEDIATE_HIDDEN_SUFFIX: &str = ".meta.g.cs";

/// Output suffix for the Designer location.
pub const DESIGNER_SUFFIX: &str = ".meta.designer.cs";

/// One indentation level in generated text.
pub const INDENT: &str = "    ";

/// Separator between aggregated blocks of generated text.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Identifier of the built-in framework declarations unit.
pub const PRELUDE_UNIT: &str = "<prelude>";

/// Check whether a unit path names a completion input.
pub fn is_meta_unit(path: &str) -> bool {
    path.ends_with(META_UNIT_SUFFIX)
}
