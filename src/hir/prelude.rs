//! Built-in framework declarations.
//!
//! Parsed into every snapshot as an extra unit so that marker attributes
//! and the registrator facility resolve through the ordinary symbol table.

/// Source of the prelude unit.
pub(crate) const PRELUDE_SOURCE: &str = r#"namespace MetaSharp {
    public sealed class MetaCompleteClassAttribute : System.Attribute { }

    public sealed class MetaCompleteViewModelAttribute : System.Attribute { }

    public sealed class MetaCompleteDependencyPropertiesAttribute : System.Attribute { }

    public enum MetaLocationKind {
        IntermediateOutput,
        IntermediateOutputNoIntellisense,
        Designer,
    }

    public sealed class MetaLocationAttribute : System.Attribute {
        public MetaLocationAttribute(MetaLocationKind location = default(MetaLocationKind)) {
            Location = location;
        }
        public MetaLocationKind Location { get; set; }
    }

    public sealed class DependencyPropertiesRegistrator<T> {
        public static DependencyPropertiesRegistrator<T> New() {
            return null;
        }
    }
}
"#;
