use super::*;
use crate::parser::Stmt;

fn index(units: &[(&str, &str)]) -> SemanticIndex {
    let units: Vec<SourceUnit> = units
        .iter()
        .map(|(name, text)| SourceUnit::new(*name, *text))
        .collect();
    SemanticIndex::build(&units).expect("units parse")
}

#[test]
fn test_entities_are_top_level_types_in_declaration_order() {
    let index = index(&[(
        "A.meta.cs",
        r#"
using System;
namespace App {
    class First { class Nested { } }
    namespace Inner {
        struct Second { }
    }
}
class Third { }
"#,
    )]);
    let names: Vec<_> = index
        .entities()
        .map(|e| (e.namespace().map(str::to_string), e.name().to_string()))
        .collect();
    assert_eq!(
        names,
        vec![
            (Some("App".to_string()), "First".to_string()),
            (Some("App.Inner".to_string()), "Second".to_string()),
            (None, "Third".to_string()),
        ]
    );
}

#[test]
fn test_imports_accumulate_outer_to_inner() {
    let index = index(&[(
        "A.meta.cs",
        "using A; namespace N { using B; namespace M { using C; class T { } } }",
    )]);
    let entity = index.entities().next().unwrap();
    let imports: Vec<_> = entity.imports().iter().map(|i| i.directive()).collect();
    assert_eq!(imports, vec!["A", "B", "C"]);
    assert_eq!(entity.namespace(), Some("N.M"));
}

#[test]
fn test_markers_resolve_through_using() {
    let index = index(&[(
        "A.meta.cs",
        r#"
using MetaSharp;
namespace App {
    [MetaCompleteClass, MetaCompleteDependencyPropertiesAttribute, MetaCompleteClass]
    partial class Foo { }
}
"#,
    )]);
    let entity = index.entities().next().unwrap();
    assert_eq!(
        entity.markers(),
        &[Marker::CompleteClass, Marker::CompleteDependencyProperties]
    );
    assert!(entity.is_partial());
}

#[test]
fn test_marker_needs_import_or_qualification() {
    let index = index(&[(
        "A.meta.cs",
        r#"
namespace App {
    [MetaCompleteClass] partial class Unimported { }
    [MetaSharp.MetaCompleteClass] partial class Qualified { }
}
"#,
    )]);
    let markers: Vec<_> = index.entities().map(|e| e.markers().to_vec()).collect();
    assert_eq!(markers, vec![vec![], vec![Marker::CompleteClass]]);
}

#[test]
fn test_user_type_shadows_framework_attribute() {
    let index = index(&[(
        "A.meta.cs",
        r#"
using MetaSharp;
namespace App {
    class MetaCompleteClassAttribute : System.Attribute { }
    [MetaCompleteClass] partial class Foo { }
}
"#,
    )]);
    let foo = index.entities().find(|e| e.name() == "Foo").unwrap();
    assert!(foo.markers().is_empty());
}

#[test]
fn test_global_using_applies_to_every_unit() {
    let index = index(&[
        ("G.cs", "global using MetaSharp;"),
        (
            "A.meta.cs",
            "namespace App { [MetaCompleteClass] partial class Foo { } }",
        ),
    ]);
    let foo = index.entities().next().unwrap();
    assert_eq!(foo.markers(), &[Marker::CompleteClass]);
    assert!(foo.imports().is_empty());
}

#[test]
fn test_syntax_errors_are_fatal_and_located() {
    let units = vec![
        SourceUnit::new("Ok.meta.cs", "namespace A { class B { } }"),
        SourceUnit::new("Bad.meta.cs", "namespace A {\n  class { }\n}"),
    ];
    let errors = SemanticIndex::build(&units).unwrap_err();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|d| &*d.id == codes::SYNTAX_ERROR));
    assert_eq!(&*errors[0].unit, "Bad.meta.cs");
    assert_eq!(errors[0].span.start.line, 1);
}

#[test]
fn test_byte_order_mark_is_ignored() {
    let index = index(&[("A.meta.cs", "\u{FEFF}namespace A { class B { } }")]);
    let entity = index.entities().next().unwrap();
    let span = index.model(entity.unit()).unwrap().span(entity.name_range());
    assert_eq!(span.start.line, 0);
    assert_eq!(span.start.column, 20);
}

#[test]
fn test_stubs_are_linked_but_not_entities() {
    let index = index(&[(
        "A.meta.cs",
        "using Gen; namespace App { [Marker] partial class Foo { } }",
    )]);
    let foo = index.entities().next().unwrap();
    assert_eq!(foo.attributes()[0].resolved, None);

    let index = index
        .with_stubs(&[SourceUnit::new(
            "stub",
            "namespace Gen { class MarkerAttribute : System.Attribute { } }",
        )])
        .unwrap();
    let foo = index.entities().next().unwrap();
    assert!(foo.attributes()[0].resolved.is_some());
    assert_eq!(index.entities().count(), 1);
}

#[test]
fn test_model_reads_static_initializer() {
    let index = index(&[(
        "A.meta.cs",
        "namespace App { partial class Foo { static Foo() { Bar(); int x = 0; } } class NoCtor { } }",
    )]);
    let entities: Vec<_> = index.entities().collect();
    let model = index.model(entities[0].unit()).unwrap();
    let statements = model.static_initializer(entities[0]).unwrap();
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[0], Stmt::Expr(_)));
    assert!(model.static_initializer(entities[1]).is_none());
}

#[test]
fn test_registrator_is_known_by_symbol() {
    let index = index(&[(
        "A.meta.cs",
        "using MetaSharp; namespace App { partial class Foo { } }",
    )]);
    let foo = index.entities().next().unwrap();
    let id = index
        .resolve(foo, &["DependencyPropertiesRegistrator"], 1)
        .symbol()
        .unwrap();
    assert!(index.is_registrator(id));
    assert!(
        index
            .resolve(foo, &["DependencyPropertiesRegistrator"], 0)
            .symbol()
            .is_none()
    );
}
