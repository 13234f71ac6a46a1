//! Inputs the front end must accept or reject.

use metacomplete::parser::{AstNode, ClassDecl, SourceFile, parse};
use rstest::rstest;

#[rstest]
#[case::file_scoped_namespace("namespace Demo; partial class A { }")]
#[case::nested_namespaces("namespace A { namespace B { class C { } } }")]
#[case::generic_constraints("namespace N { class Box<T> where T : class, new() { } }")]
#[case::record_with_parameters("namespace N { public partial record Point(int X, int Y); }")]
#[case::interface("namespace N { interface IShape { double Area { get; } } }")]
#[case::enum_member("namespace N { enum Color { Red, Green } class C { } }")]
#[case::expression_bodied("namespace N { class C { int Twice(int x) => x * 2; public int P => 1; } }")]
#[case::lambda_with_block("namespace N { class C { static C() { Run(() => { Work(); }); } } }")]
#[case::object_creation("namespace N { class C { static C() { var list = new List<int> { 1, 2 }; } } }")]
#[case::control_flow("namespace N { class C { void M() { if (a) { b(); } else c(); foreach (var x in xs) { } } } }")]
#[case::verbatim_identifier("namespace N { class C { int @class; } }")]
#[case::preprocessor_and_comments("#region top\n// note\nnamespace N { /* c */ class C { } }\n#endregion")]
#[case::attribute_target("[assembly: Version(\"1.0\")]\nnamespace N { class C { } }")]
fn test_accepts(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{source}\n{:?}", parse.errors);
}

#[rstest]
#[case::missing_type_name("namespace N { class { } }")]
#[case::unclosed_namespace("namespace N { class C { }")]
#[case::member_at_namespace_level("namespace N { int x; }")]
#[case::unbalanced_call("namespace N { class C { static C() { Foo(1; } } }")]
fn test_rejects(#[case] source: &str) {
    let parse = parse(source);
    assert!(!parse.ok(), "{source} parsed without errors");
    for error in &parse.errors {
        assert!(usize::from(error.range.end()) <= source.len());
    }
}

#[rstest]
#[case("namespace N {\r\n    class C { }\r\n}\r\n")]
#[case("namespace N { class { } ")]
#[case("\u{FEFF}using System;\nnamespace N { partial class C { int A { get; } } }")]
fn test_tree_is_lossless(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_types_inside_file_scoped_namespace() {
    let parse = parse("using System;\nnamespace Demo.Models;\n[Tag] partial class A { }\npartial struct B { }\n");
    assert!(parse.ok(), "{:?}", parse.errors);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    let namespace = file.namespaces().next().unwrap();
    assert!(namespace.is_file_scoped());
    assert_eq!(namespace.name().unwrap().text(), "Demo.Models");
    let names: Vec<String> = parse
        .syntax()
        .descendants()
        .filter_map(ClassDecl::cast)
        .map(|class| class.name().unwrap().text())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}
