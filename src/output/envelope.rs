//! Namespace envelope around generated members.

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::base::text::indent;
use crate::hir::Import;

/// Entity imports followed by a completer's extra imports, each once, in
/// first-seen order.
pub fn union_imports<'a>(
    entity_imports: &[Import],
    extra: impl IntoIterator<Item = &'a SmolStr>,
) -> IndexSet<String> {
    entity_imports
        .iter()
        .map(Import::directive)
        .chain(extra.into_iter().map(|import| import.to_string()))
        .collect()
}

/// Wrap member text in `namespace N { … }`.
///
/// Using directives open the body unindented, separated from the members
/// by a blank line; members are indented one level. Duplicate imports are
/// written once.
pub fn wrap<I, S>(namespace: &str, imports: I, members: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let usings: IndexSet<String> = imports
        .into_iter()
        .map(|import| format!("using {};", import.as_ref()))
        .collect();
    let members = indent(members, 1);
    if usings.is_empty() {
        format!("namespace {namespace} {{\n{members}\n}}")
    } else {
        let usings = usings.into_iter().collect::<Vec<_>>().join("\n");
        format!("namespace {namespace} {{\n{usings}\n\n{members}\n}}")
    }
}
