//! Completer stubs: declarations injected into the snapshot before
//! dispatch.

use metacomplete::{
    Completer, CompletionResult, Diagnostic, EntityHandle, Marker, RegistryBuilder, RunConfig,
    RunError, SemanticIndex, SemanticModel,
};

use crate::helpers::run_helpers::{ids, run_with};

const SHELL: &str = r#"using MetaSharp;
using Gen;
namespace Demo {
    [MetaCompleteViewModel]
    partial class Shell { }
}"#;

/// One `<Name>Tracker` class per user entity.
fn trackers(index: &SemanticIndex) -> String {
    let classes: Vec<String> = index
        .entities()
        .map(|entity| format!("    public class {}Tracker {{ }}", entity.name()))
        .collect();
    format!("namespace Gen {{\n{}\n}}", classes.join("\n"))
}

fn track(model: &SemanticModel<'_>, entity: &EntityHandle) -> CompletionResult {
    let tracker = format!("{}Tracker", entity.name());
    match model.resolve_type(entity, &[tracker.as_str()], 0).symbol() {
        Some(_) => Ok(format!(
            "partial class {} {{\n    readonly {tracker} tracker = new {tracker}();\n}}",
            entity.name()
        )),
        None => Err(vec![model.diagnostic(
            "MS9001",
            entity.name_range(),
            format!("'{tracker}' is not declared"),
        )]),
    }
}

fn config(completer: Completer) -> RunConfig {
    RunConfig::new(
        RegistryBuilder::with_defaults()
            .register(Marker::CompleteViewModel, completer)
            .unwrap()
            .build(),
    )
}

#[test]
fn test_stub_declarations_resolve_during_completion() {
    let config = config(Completer::new(track).with_stub(trackers));
    let outputs = run_with(&config, &[("Shell.meta.cs", SHELL)], &[]).unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(
        outputs[0]
            .text
            .contains("readonly ShellTracker tracker = new ShellTracker();")
    );
}

#[test]
fn test_without_stub_the_reference_is_unresolved() {
    let config = config(Completer::new(track));
    let err = run_with(&config, &[("Shell.meta.cs", SHELL)], &[]).unwrap_err();
    let RunError::Completion(diagnostics) = err else {
        panic!("expected completion errors, got {err:?}");
    };
    assert_eq!(ids(&diagnostics), vec!["MS9001"]);
}

#[test]
fn test_stub_units_produce_no_output() {
    let config = config(Completer::new(track).with_stub(trackers));
    let outputs = run_with(&config, &[("Shell.meta.cs", SHELL)], &[]).unwrap();
    assert!(outputs.iter().all(|o| !o.text.contains("namespace Gen")));
}

#[test]
fn test_broken_stub_is_fatal() {
    let config = config(Completer::new(track).with_stub(|_: &SemanticIndex| "namespace Gen { class }".to_string()));
    let err = run_with(&config, &[("Shell.meta.cs", SHELL)], &[]).unwrap_err();
    let RunError::Compilation(diagnostics) = err else {
        panic!("expected compilation errors, got {err:?}");
    };
    assert!(!diagnostics.is_empty());
    assert!(
        diagnostics
            .iter()
            .all(|d: &Diagnostic| &*d.unit == "<stub:MetaCompleteViewModel>")
    );
}
