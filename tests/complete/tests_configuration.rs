//! Run configuration: registry, default markers, dispatch policies and
//! fatal errors.

use metacomplete::complete::complete_class;
use metacomplete::{
    Completer, CompleterRegistry, CompletionResult, ConfigurationError, DispatchPolicy,
    EntityHandle, Marker, RegistryBuilder, RunConfig, RunError, SemanticModel,
};
use rstest::rstest;

use crate::helpers::run_helpers::{run_default, run_with, units};

const BOTH_MARKERS: &str = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteClass, MetaCompleteDependencyProperties]
    partial class Both {
        public int Id { get; }
        static Both() { }
    }
}"#;

fn reopen_empty(_: &SemanticModel<'_>, entity: &EntityHandle) -> CompletionResult {
    Ok(format!("partial class {} {{\n}}", entity.name()))
}

#[test]
fn test_marker_without_completer_is_fatal() {
    let source = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteClass] class Broken { }
    [MetaCompleteViewModel] partial class ViewModel { }
}"#;
    let err = run_default(&[("Demo.meta.cs", source)]).unwrap_err();
    assert_eq!(
        err,
        RunError::Configuration(ConfigurationError::UnregisteredMarker(
            "MetaCompleteViewModel".to_string()
        ))
    );
    assert!(err.diagnostics().is_empty());
}

#[test]
fn test_registered_view_model_completer_runs() {
    let config = RunConfig::new(
        RegistryBuilder::with_defaults()
            .register(
                Marker::CompleteViewModel,
                Completer::new(reopen_empty).with_imports(["System.ComponentModel", "MetaSharp"]),
            )
            .unwrap()
            .build(),
    );
    let source = "using MetaSharp; using System; namespace Demo { [MetaCompleteViewModel] partial class Shell { } }";
    let outputs = run_with(&config, &[("Shell.meta.cs", source)], &[]).unwrap();
    assert_eq!(
        outputs[0].text,
        "namespace Demo {\nusing MetaSharp;\nusing System;\nusing System.ComponentModel;\n\n    partial class Shell {\n    }\n}"
    );
}

fn fail_silently(_: &SemanticModel<'_>, _: &EntityHandle) -> CompletionResult {
    Err(Vec::new())
}

#[test]
fn test_completer_failing_without_diagnostics_fails_the_run() {
    let config = RunConfig::new(
        RegistryBuilder::with_defaults()
            .register(Marker::CompleteViewModel, Completer::new(fail_silently))
            .unwrap()
            .build(),
    );
    let source = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteClass] partial class Plain { }
    [MetaCompleteViewModel] partial class Shell { }
}"#;
    let err = run_with(&config, &[("Shell.meta.cs", source)], &[]).unwrap_err();
    let RunError::Completion(diagnostics) = err else {
        panic!("expected completion error, got {err:?}");
    };
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&*diagnostics[0].id, "MS0009");
    assert_eq!(diagnostics[0].span.start.line, 3);
    assert!(diagnostics[0].message.contains("MetaCompleteViewModel"));
}

#[test]
fn test_duplicate_completer_is_rejected() {
    let err = CompleterRegistry::builder()
        .register(Marker::CompleteClass, Completer::new(complete_class))
        .and_then(|builder| builder.register(Marker::CompleteClass, Completer::new(complete_class)))
        .unwrap_err();
    assert_eq!(err, ConfigurationError::DuplicateCompleter("MetaCompleteClass".to_string()));
}

#[test]
fn test_default_markers_apply_to_unmarked_entities() {
    let source = "namespace Demo { partial class Plain { public int Id { get; } } }";
    let outputs = run_with(
        &RunConfig::default(),
        &[("Plain.meta.cs", source)],
        &[Marker::CompleteClass],
    )
    .unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].text.contains("public Plain(int id) {"));
}

#[test]
fn test_default_marker_already_attached_runs_once() {
    let source = "using MetaSharp; namespace Demo { [MetaCompleteClass] partial class Plain { } }";
    let outputs = run_with(
        &RunConfig::default(),
        &[("Plain.meta.cs", source)],
        &[Marker::CompleteClass],
    )
    .unwrap();
    assert_eq!(outputs[0].text.matches("public Plain()").count(), 1);
}

#[rstest]
#[case(DispatchPolicy::AllMatching, 2)]
#[case(DispatchPolicy::FirstMatch, 1)]
fn test_dispatch_policy(#[case] policy: DispatchPolicy, #[case] envelopes: usize) {
    let config = RunConfig::default().with_policy(policy);
    let outputs = run_with(&config, &[("Both.meta.cs", BOTH_MARKERS)], &[]).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].text.matches("namespace Demo {").count(), envelopes);
    assert!(outputs[0].text.contains("public Both(int id) {"));
}

#[test]
fn test_all_matching_concatenates_in_marker_order() {
    let outputs = run_default(&[("Both.meta.cs", BOTH_MARKERS)]).unwrap();
    let text = &outputs[0].text;
    let class = text.find("public Both(int id)").unwrap();
    let properties = text.rfind("partial class Both {\n    }").unwrap();
    assert!(class < properties);
    assert!(text.contains("}\n}\n\nnamespace Demo {"));
}

#[test]
fn test_syntax_error_aborts_the_run() {
    let err = run_default(&[
        ("Good.meta.cs", "using MetaSharp; namespace Demo { [MetaCompleteClass] partial class Good { } }"),
        ("Bad.meta.cs", "namespace Demo { partial class { }"),
    ])
    .unwrap_err();
    let RunError::Compilation(diagnostics) = err else {
        panic!("expected compilation error, got {err:?}");
    };
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| &*d.unit == "Bad.meta.cs" && &*d.id == "MS0100"));
}

#[test]
fn test_unit_name_must_be_meta_source_when_completed() {
    let source = "using MetaSharp; namespace Demo { [MetaCompleteClass] partial class Named { } }";
    let err = run_default(&[("Named.cs", source)]).unwrap_err();
    assert_eq!(
        err,
        RunError::Configuration(ConfigurationError::UnexpectedUnitName("Named.cs".to_string()))
    );

    let plain = run_default(&[("Other.cs", "namespace Demo { class Other { } }")]).unwrap();
    assert!(plain.is_empty());
}

#[test]
fn test_unknown_declared_location_is_fatal() {
    let source = r#"using MetaSharp;
namespace Demo {
    [MetaCompleteClass, MetaLocation(MetaLocationKind.Cloud)]
    partial class Remote { }
}"#;
    let err = RunConfig::default()
        .run_declared(&units(&[("Remote.meta.cs", source)]), &[])
        .unwrap_err();
    assert_eq!(
        err,
        RunError::Configuration(ConfigurationError::UnknownLocationPolicy(
            "MetaLocationKind.Cloud".to_string()
        ))
    );
}
