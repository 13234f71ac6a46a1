//! Class completer: a constructor initializing every get-only auto property.

use super::{CompletionResult, reopen};
use crate::base::text::{indent, to_camel_case};
use crate::hir::{EntityHandle, SemanticModel};
use crate::parser::{Member, is_reserved_keyword};

pub fn complete_class(model: &SemanticModel<'_>, entity: &EntityHandle) -> CompletionResult {
    let properties: Vec<(String, String)> = model
        .declaration(entity)
        .map(|decl| {
            decl.members()
                .filter_map(|member| match member {
                    Member::Property(property)
                        if !property.is_static()
                            && !property.is_abstract()
                            && property.is_get_only_auto() =>
                    {
                        Some((property.ty()?.text(), property.name()?.text()))
                    }
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    tracing::trace!(
        "[CLASS] {}: {} get-only propert(ies)",
        entity.name(),
        properties.len()
    );
    Ok(reopen(entity, &constructor(entity.name(), &properties)))
}

fn constructor(name: &str, properties: &[(String, String)]) -> String {
    let params = properties
        .iter()
        .map(|(ty, property)| format!("{ty} {}", parameter_name(property)))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments = properties
        .iter()
        .map(|(_, property)| {
            let param = parameter_name(property);
            if param == *property {
                format!("this.{property} = {param};")
            } else {
                format!("{property} = {param};")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    if assignments.is_empty() {
        format!("public {name}() {{\n}}")
    } else {
        format!("public {name}({params}) {{\n{}\n}}", indent(&assignments, 1))
    }
}

fn parameter_name(property: &str) -> String {
    let name = to_camel_case(property);
    if is_reserved_keyword(&name) {
        format!("@{name}")
    } else {
        name
    }
}
