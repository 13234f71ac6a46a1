//! Location policies through a full run.

use std::path::PathBuf;

use metacomplete::{LocationPolicy, Router, RunConfig};
use rstest::rstest;

use crate::helpers::run_helpers::units;

const MIXED: &str = r#"using MetaSharp;
namespace Demo.Views {
    [MetaCompleteClass]
    partial class Main { }

    [MetaCompleteClass, MetaLocation(MetaLocationKind.Designer)]
    partial class Toolbar { }

    [MetaCompleteClass, MetaLocation(MetaLocationKind.IntermediateOutput)]
    partial class Footer { }

    [MetaLocation(MetaLocationKind.Designer)]
    partial class Plain { }
}"#;

#[test]
fn test_declared_locations_group_by_destination() {
    let config = RunConfig::default().with_router(Router::new("obj"));
    let outputs = config
        .run_declared(&units(&[("Views/Main.meta.cs", MIXED)]), &[])
        .unwrap();
    let routes: Vec<(PathBuf, bool)> = outputs
        .iter()
        .map(|o| (o.destination.clone(), o.visible_to_editor))
        .collect();
    assert_eq!(
        routes,
        vec![
            (PathBuf::from("obj/Views/Main.meta.g.i.cs"), true),
            (PathBuf::from("Views/Main.meta.designer.cs"), true),
        ]
    );
    assert!(outputs[0].text.contains("public Main() {"));
    assert!(outputs[0].text.contains("public Footer() {"));
    assert!(outputs[0].text.find("public Main()").unwrap() < outputs[0].text.find("public Footer()").unwrap());
    assert!(outputs[1].text.contains("public Toolbar() {"));
    assert!(!outputs.iter().any(|o| o.text.contains("Plain")));
}

#[rstest]
#[case(LocationPolicy::IntermediateOutput, "obj/Panel.meta.g.i.cs", true)]
#[case(LocationPolicy::IntermediateOutputNoIntellisense, "obj/Panel.meta.g.cs", false)]
#[case(LocationPolicy::Designer, "Panel.meta.designer.cs", true)]
fn test_policy_chosen_by_caller(
    #[case] policy: LocationPolicy,
    #[case] destination: &str,
    #[case] visible: bool,
) {
    let source = "using MetaSharp; namespace Demo { [MetaCompleteClass] partial class Panel { } }";
    let outputs = RunConfig::default()
        .with_router(Router::new("obj"))
        .run(&units(&[("Panel.meta.cs", source)]), &[], |_| policy)
        .unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].destination, PathBuf::from(destination));
    assert_eq!(outputs[0].visible_to_editor, visible);
}

#[test]
fn test_caller_can_route_per_entity() {
    let source = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteClass] partial class Shown { }
    [MetaCompleteClass] partial class Hidden { }
}"#;
    let outputs = metacomplete::run(&units(&[("Demo.meta.cs", source)]), &[], |entity| {
        if entity.name() == "Hidden" {
            LocationPolicy::IntermediateOutputNoIntellisense
        } else {
            LocationPolicy::IntermediateOutput
        }
    })
    .unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].destination, PathBuf::from("Demo.meta.g.i.cs"));
    assert_eq!(outputs[1].destination, PathBuf::from("Demo.meta.g.cs"));
    assert!(!outputs[1].visible_to_editor);
}
