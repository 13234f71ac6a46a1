//! Helpers for running the engine over in-memory units.

use metacomplete::{
    Diagnostic, LocationPolicy, Marker, Output, RunConfig, RunError, SourceUnit,
};

/// Build source units from `(name, text)` pairs.
pub fn units(files: &[(&str, &str)]) -> Vec<SourceUnit> {
    files
        .iter()
        .map(|(name, text)| SourceUnit::new(*name, *text))
        .collect()
}

/// Run the default configuration, every entity at IntermediateOutput.
pub fn run_default(files: &[(&str, &str)]) -> Result<Vec<Output>, RunError> {
    run_with(&RunConfig::default(), files, &[])
}

/// Run `config` with default markers, every entity at IntermediateOutput.
pub fn run_with(
    config: &RunConfig,
    files: &[(&str, &str)],
    default_markers: &[Marker],
) -> Result<Vec<Output>, RunError> {
    config.run(&units(files), default_markers, |_| {
        LocationPolicy::IntermediateOutput
    })
}

/// Run the default configuration and expect exactly one output.
pub fn single_output(files: &[(&str, &str)]) -> Output {
    let outputs = run_default(files).unwrap_or_else(|err| panic!("run failed: {err}\n{}", render(err.diagnostics())));
    assert_eq!(outputs.len(), 1, "expected one output, got {outputs:#?}");
    outputs.into_iter().next().unwrap()
}

/// Run the default configuration and expect completion diagnostics.
pub fn completion_errors(files: &[(&str, &str)]) -> Vec<Diagnostic> {
    match run_default(files) {
        Err(RunError::Completion(diagnostics)) => diagnostics,
        other => panic!("expected completion errors, got {other:#?}"),
    }
}

/// Diagnostic ids in order.
pub fn ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| &*d.id).collect()
}

pub fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}
