//! Layer dependency checks over the source tree.
//!
//! ```text
//! driver → output → complete → hir → parser → base
//! ```
//! A layer may only `use crate::` layers below it. `error` is shared by
//! every layer above the parser.

use std::fs;
use std::path::{Path, PathBuf};

const LAYERS: &[(&str, &[&str])] = &[
    ("base", &[]),
    ("parser", &["base"]),
    ("hir", &["base", "parser", "error"]),
    ("complete", &["base", "parser", "hir", "error"]),
    ("output", &["base", "parser", "hir", "error", "complete"]),
];

fn source_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            files.extend(source_files(&path));
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    files
}

/// Top-level modules named by `crate::X` paths in `text`.
fn crate_references(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for (offset, _) in text.match_indices("crate::") {
        let rest = &text[offset + "crate::".len()..];
        let module: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if !module.is_empty() && !found.contains(&module) {
            found.push(module);
        }
    }
    found
}

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

#[test]
fn test_layers_only_depend_downwards() {
    let mut violations = Vec::new();
    for (layer, allowed) in LAYERS {
        for file in source_files(&src_dir().join(layer)) {
            let text = fs::read_to_string(&file).unwrap();
            for module in crate_references(&text) {
                if module != *layer && !allowed.contains(&module.as_str()) {
                    violations.push(format!("{} uses crate::{module}", file.display()));
                }
            }
        }
    }
    assert!(violations.is_empty(), "layer violations:\n{}", violations.join("\n"));
}

#[test]
fn test_error_module_depends_only_on_hir() {
    let text = fs::read_to_string(src_dir().join("error.rs")).unwrap();
    assert_eq!(crate_references(&text), vec!["hir"]);
}

#[test]
fn test_every_layer_exists() {
    for (layer, _) in LAYERS {
        assert!(src_dir().join(layer).join("mod.rs").is_file(), "missing layer {layer}");
    }
    assert!(src_dir().join("driver.rs").is_file());
}
