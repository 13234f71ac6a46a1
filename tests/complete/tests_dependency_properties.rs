//! Dependency-property completion through a full run.

use std::path::PathBuf;

use rstest::rstest;

use crate::helpers::run_helpers::{completion_errors, ids, run_default, single_output};
use crate::helpers::source_fixtures::{CONTROL_PROPERTIES, EXPECTED_CONTROL_OUTPUT};

fn control(body: &str) -> String {
    format!(
        "using MetaSharp;\nnamespace Demo {{\n    [MetaCompleteDependencyProperties]\n    partial class Owner {{\n        static Owner() {{\n{body}\n        }}\n    }}\n}}\n"
    )
}

#[test]
fn test_all_four_registration_shapes() {
    let output = single_output(&[("Controls/Gauge.meta.cs", CONTROL_PROPERTIES)]);
    assert_eq!(output.text, EXPECTED_CONTROL_OUTPUT);
    assert_eq!(output.destination, PathBuf::from("Controls/Gauge.meta.g.i.cs"));
    assert!(output.visible_to_editor);
}

#[test]
fn test_attached_property_scenario() {
    let source = control(
        "            DependencyPropertiesRegistrator<Owner>.New().RegisterAttached<int>(x => x.Foo, out FooProperty, 0);",
    );
    let output = single_output(&[("Owner.meta.cs", &source)]);
    assert!(output.text.contains("public static readonly DependencyProperty FooProperty;"));
    assert!(!output.text.contains("FooPropertyKey"));
    assert!(output.text.contains("public static int GetFoo(DependencyObject d) {"));
    assert!(output.text.contains("public static void SetFoo(DependencyObject d, int value) {"));
    assert!(output.text.contains("partial class Owner {"));
}

#[test]
fn test_properties_follow_source_order() {
    let source = control(
        r#"            DependencyPropertiesRegistrator<Owner>.New()
                .Register<int>(x => x.Alpha, out AlphaProperty, 0)
                .Register<int>(x => x.Beta, out BetaProperty, 0)
                .Register<int>(x => x.Gamma, out GammaProperty, 0);"#,
    );
    let text = single_output(&[("Owner.meta.cs", &source)]).text;
    let positions: Vec<usize> = ["int Alpha {", "int Beta {", "int Gamma {"]
        .iter()
        .map(|needle| text.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn test_unrelated_statements_do_not_change_output() {
    let chain = "            DependencyPropertiesRegistrator<Owner>.New().Register<int>(x => x.A, out AProperty, 0);";
    let noise = "            int seed = 1;\n            Trace(seed);";
    let before = single_output(&[("Owner.meta.cs", &control(&format!("{noise}\n{chain}")))]);
    let after = single_output(&[("Owner.meta.cs", &control(&format!("{chain}\n{noise}")))]);
    assert_eq!(before.text, after.text);
}

#[test]
fn test_multiple_chains_concatenate_in_order() {
    let source = control(
        r#"            DependencyPropertiesRegistrator<Owner>.New().Register<int>(x => x.First, out FirstProperty, 0);
            DependencyPropertiesRegistrator<Owner>.New().Register<int>(x => x.Second, out SecondProperty, 0);"#,
    );
    let text = single_output(&[("Owner.meta.cs", &source)]).text;
    assert!(text.find("FirstProperty;").unwrap() < text.find("SecondProperty;").unwrap());
}

#[rstest]
#[case::string_literal(r#"RegisterAttached<int>(x => x.Foo, "FooProperty", 0)"#, "MS0002")]
#[case::missing_suffix("Register<int>(x => x.Foo, out Foo, 0)", "MS0002")]
#[case::missing_type("Register(x => x.Foo, out FooProperty, 0)", "MS0001")]
#[case::two_types("Register<int, string>(x => x.Foo, out FooProperty, 0)", "MS0001")]
#[case::unknown_method("Declare<int>(x => x.Foo, out FooProperty, 0)", "MS0005")]
fn test_malformed_links_are_reported(#[case] link: &str, #[case] expected: &str) {
    let source = control(&format!(
        "            DependencyPropertiesRegistrator<Owner>.New().{link};"
    ));
    let errors = completion_errors(&[("Owner.meta.cs", &source)]);
    assert_eq!(ids(&errors), vec![expected]);
    assert_eq!(&*errors[0].unit, "Owner.meta.cs");
    assert_eq!(errors[0].span.start.line, 5);
    assert_eq!(errors[0].span.start.column, 12);
}

#[test]
fn test_owner_mismatch_is_reported() {
    let source = r#"using MetaSharp;
namespace Demo {
    class Other { }
    [MetaCompleteDependencyProperties]
    partial class Owner {
        static Owner() {
            DependencyPropertiesRegistrator<Other>.New().Register<int>(x => x.A, out AProperty, 0);
        }
    }
}
"#;
    let errors = completion_errors(&[("Owner.meta.cs", source)]);
    assert_eq!(ids(&errors), vec!["MS0003"]);
}

#[test]
fn test_missing_static_constructor_is_reported() {
    let source = "using MetaSharp; namespace Demo { [MetaCompleteDependencyProperties] partial class Owner { } }";
    let errors = completion_errors(&[("Owner.meta.cs", source)]);
    assert_eq!(ids(&errors), vec!["MS0006"]);
    assert_eq!(errors[0].to_string(), "Owner.meta.cs(1,84,1,89): error MS0006: Type 'Owner' should declare a static constructor registering its dependency properties.");
}

#[test]
fn test_static_constructor_without_chain_reopens_empty() {
    let source = control("            Initialize();");
    let output = single_output(&[("Owner.meta.cs", &source)]);
    assert_eq!(
        output.text,
        "namespace Demo {\nusing MetaSharp;\n\n    partial class Owner {\n    }\n}"
    );
}

#[test]
fn test_static_constructor_in_another_part_of_the_same_unit() {
    let source = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteDependencyProperties]
    partial class Owner { }
    partial class Owner {
        static Owner() {
            DependencyPropertiesRegistrator<Owner>.New().Register<int>(x => x.Foo, out FooProperty, 0);
        }
    }
}
"#;
    let output = single_output(&[("Owner.meta.cs", source)]);
    assert!(output.text.contains("public static readonly DependencyProperty FooProperty;"));
    assert!(output.text.contains("public int Foo {"));
}

#[test]
fn test_static_constructor_in_a_part_of_another_unit() {
    let marked = "using MetaSharp; namespace Demo { [MetaCompleteDependencyProperties] partial class Owner { } }";
    let registered = control(
        "            DependencyPropertiesRegistrator<Owner>.New().Register<string>(x => x.Title, out TitleProperty, null);",
    )
    .replace("    [MetaCompleteDependencyProperties]\n", "");
    let outputs = run_default(&[("Owner.meta.cs", marked), ("Owner.Registration.cs", &registered)]).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].destination, PathBuf::from("Owner.meta.g.i.cs"));
    assert!(outputs[0].text.contains("public string Title {"));
}

#[test]
fn test_errors_in_another_part_point_at_its_unit() {
    let marked = "using MetaSharp; namespace Demo { [MetaCompleteDependencyProperties] partial class Owner { } }";
    let registered = control("            DependencyPropertiesRegistrator<Owner>.New().Register(x => x.Foo, out FooProperty, 0);")
        .replace("    [MetaCompleteDependencyProperties]\n", "");
    let errors = completion_errors(&[("Owner.meta.cs", marked), ("Owner.Registration.cs", &registered)]);
    assert_eq!(ids(&errors), vec!["MS0001"]);
    assert_eq!(&*errors[0].unit, "Owner.Registration.cs");
}

#[test]
fn test_nested_generic_type_is_kept_as_written() {
    let source = control(
        "            DependencyPropertiesRegistrator<Owner>.New().Register<List<Dictionary<int,string>>>(x => x.Map, out MapProperty, null);",
    );
    let text = single_output(&[("Owner.meta.cs", &source)]).text;
    assert!(text.contains("public List<Dictionary<int,string>> Map {"), "{text}");
    assert!(text.contains("(List<Dictionary<int,string>>)GetValue(MapProperty)"), "{text}");
}

#[test]
fn test_block_comments_inside_a_chain() {
    let source = control(
        "            /** registrations */ DependencyPropertiesRegistrator<Owner>.New() /* first */ .Register<int /**/>(x => x.Foo, out FooProperty, 0);",
    );
    let text = single_output(&[("Owner.meta.cs", &source)]).text;
    assert!(text.contains("public int Foo {"), "{text}");
}

#[test]
fn test_unicode_property_names() {
    let source = control(
        r#"            DependencyPropertiesRegistrator<Owner>.New().Register<string>(x => x.Ä, out ÄProperty, "é");"#,
    );
    let text = single_output(&[("Owner.meta.cs", &source)]).text;
    assert!(text.contains("public static readonly DependencyProperty ÄProperty;"), "{text}");
    assert!(text.contains("public string Ä {"), "{text}");
}

#[test]
fn test_very_long_chain_completes() {
    let links: String = (0..3000)
        .map(|i| format!("\n                .Register<int>(x => x.P{i}, out P{i}Property, 0)"))
        .collect();
    let source = control(&format!("            DependencyPropertiesRegistrator<Owner>.New(){links};"));
    let text = single_output(&[("Owner.meta.cs", &source)]).text;
    assert!(text.find("public int P0 {").unwrap() < text.find("public int P2999 {").unwrap());
    assert_eq!(text.matches("public static readonly DependencyProperty ").count(), 3000);
}
