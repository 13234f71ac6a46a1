//! Class completion through a full run.

use crate::helpers::run_helpers::{completion_errors, ids, single_output};
use crate::helpers::source_fixtures::PERSON_CLASS;

#[test]
fn test_person_constructor() {
    let output = single_output(&[("Models/Person.meta.cs", PERSON_CLASS)]);
    assert_eq!(
        output.text,
        "namespace Demo.Models {
using System;
using MetaSharp;

    partial class Person {
        public Person(string firstName, string lastName) {
            FirstName = firstName;
            LastName = lastName;
        }
    }
}"
    );
}

#[test]
fn test_generic_record_is_reopened_with_its_parameters() {
    let source = r#"namespace Demo {
    [MetaSharp.MetaCompleteClass]
    partial record Pair<TLeft, TRight> {
        public TLeft Left { get; }
        public TRight Right { get; }
    }
}"#;
    let output = single_output(&[("Pair.meta.cs", source)]);
    assert!(output.text.starts_with("namespace Demo {\n    partial record Pair<TLeft, TRight> {\n"));
    assert!(output.text.contains("public Pair(TLeft left, TRight right) {"));
}

#[test]
fn test_non_partial_class_is_reported() {
    let source = "using MetaSharp; namespace Demo { [MetaCompleteClass] class Sealed { } }";
    let errors = completion_errors(&[("Sealed.meta.cs", source)]);
    assert_eq!(ids(&errors), vec!["MS0007"]);
}

#[test]
fn test_global_namespace_class_is_reported() {
    let source = "using MetaSharp; [MetaCompleteClass] partial class Loose { }";
    let errors = completion_errors(&[("Loose.meta.cs", source)]);
    assert_eq!(ids(&errors), vec!["MS0008"]);
}
