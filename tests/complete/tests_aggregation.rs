//! Ordering and accumulation across entities and units.

use crate::helpers::run_helpers::{completion_errors, ids, run_default};

fn marked(namespace: &str, classes: &[&str]) -> String {
    let body: String = classes
        .iter()
        .map(|name| format!("    [MetaCompleteClass] partial class {name} {{ public int Id {{ get; }} }}\n"))
        .collect();
    format!("using MetaSharp;\nnamespace {namespace} {{\n{body}}}\n")
}

#[test]
fn test_outputs_follow_unit_order() {
    let a = marked("A", &["Alpha"]);
    let b = marked("B", &["Beta"]);
    let c = marked("C", &["Gamma"]);
    let outputs = run_default(&[
        ("C.meta.cs", &c),
        ("A.meta.cs", &a),
        ("B.meta.cs", &b),
    ])
    .unwrap();
    let destinations: Vec<String> = outputs
        .iter()
        .map(|o| o.destination.display().to_string())
        .collect();
    assert_eq!(destinations, vec!["C.meta.g.i.cs", "A.meta.g.i.cs", "B.meta.g.i.cs"]);
    assert!(outputs[0].text.starts_with("namespace C {"));
}

#[test]
fn test_entities_of_one_unit_share_an_output() {
    let source = marked("Demo", &["Second", "First", "Third"]);
    let outputs = run_default(&[("Demo.meta.cs", &source)]).unwrap();
    assert_eq!(outputs.len(), 1);
    let text = &outputs[0].text;
    let order: Vec<usize> = ["public Second(", "public First(", "public Third("]
        .iter()
        .map(|needle| text.find(needle).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{text}");
    assert_eq!(text.matches("namespace Demo {").count(), 3);
}

#[test]
fn test_unmarked_entities_produce_nothing() {
    let source = "namespace Demo { partial class Quiet { public int Id { get; } } }";
    let outputs = run_default(&[("Quiet.meta.cs", source)]).unwrap();
    assert!(outputs.is_empty());
}

#[test]
fn test_failures_accumulate_across_units() {
    let first = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteClass] class Closed { }
    [MetaCompleteClass] partial class Fine { }
    [MetaCompleteClass] class AlsoClosed { }
}"#;
    let second = "using MetaSharp; namespace Demo { [MetaCompleteDependencyProperties] partial class Owner { } }";
    let errors = completion_errors(&[("One.meta.cs", first), ("Two.meta.cs", second)]);
    assert_eq!(ids(&errors), vec!["MS0007", "MS0007", "MS0006"]);
    let units: Vec<&str> = errors.iter().map(|d| &*d.unit).collect();
    assert_eq!(units, vec!["One.meta.cs", "One.meta.cs", "Two.meta.cs"]);
    assert_eq!(errors[0].span.start.line, 2);
    assert_eq!(errors[1].span.start.line, 4);
}

#[test]
fn test_one_entity_reports_every_structural_problem() {
    let source = "using MetaSharp; [MetaCompleteClass] class Loose { }";
    let errors = completion_errors(&[("Loose.meta.cs", source)]);
    assert_eq!(ids(&errors), vec!["MS0007", "MS0008"]);
}

#[test]
fn test_a_single_failure_discards_every_output() {
    let good = marked("Demo", &["Good"]);
    let bad = "using MetaSharp; namespace Demo { [MetaCompleteClass] class Bad { } }";
    let errors = completion_errors(&[("Good.meta.cs", &good), ("Bad.meta.cs", bad)]);
    assert_eq!(ids(&errors), vec!["MS0007"]);
}
