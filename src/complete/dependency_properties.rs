//! Dependency-property completer.
//!
//! For every registration link of every chain in the static constructor
//! emits the backing field(s) and the accessor member(s):
//!
//! | read_only | attached | fields            | accessors                              |
//! |-----------|----------|-------------------|----------------------------------------|
//! | no        | no       | `XProperty`       | property, public setter                |
//! | yes       | no       | `+ XPropertyKey`  | property, private setter through key   |
//! | no        | yes      | `XProperty`       | public `GetX(d)` / `SetX(d, value)`    |
//! | yes       | yes      | `+ XPropertyKey`  | public `GetX(d)`, private `SetX` via key |

use super::chain::{RegistrationLink, reconstruct};
use super::{CompletionResult, reopen};
use crate::base::constants::BLOCK_SEPARATOR;
use crate::hir::{EntityHandle, SemanticModel, codes};
use crate::parser::Stmt;

pub fn complete_dependency_properties(
    model: &SemanticModel<'_>,
    entity: &EntityHandle,
) -> CompletionResult {
    let Some((part_model, part, statements)) = static_initializer_part(model, entity) else {
        return Err(vec![model.diagnostic(
            codes::STATIC_CONSTRUCTOR_MISSED,
            entity.name_range(),
            format!(
                "Type '{}' should declare a static constructor registering its dependency properties.",
                entity.display_name()
            ),
        )]);
    };
    let specs = reconstruct(&part_model, &part, &statements)?;
    let members = specs
        .iter()
        .flat_map(|spec| &spec.links)
        .map(generate_link)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);
    Ok(reopen(entity, &members))
}

/// The first partial declaration of the entity's type that declares a static
/// constructor, with a model over its unit.
fn static_initializer_part<'a>(
    model: &SemanticModel<'a>,
    entity: &EntityHandle,
) -> Option<(SemanticModel<'a>, EntityHandle, Vec<Stmt>)> {
    if let Some(statements) = model.static_initializer(entity) {
        return Some((model.clone(), entity.clone(), statements));
    }
    let index = model.index();
    index.parts(entity.symbol()).find_map(|part| {
        let part_model = if part.unit() == model.unit().id() {
            model.clone()
        } else {
            index.model(part.unit())?
        };
        let statements = part_model.static_initializer(part)?;
        Some((part_model, part.clone(), statements))
    })
}

/// Field block followed by the accessor block of one link.
pub fn generate_link(link: &RegistrationLink) -> String {
    let accessors = if link.attached {
        attached_accessors(link)
    } else {
        property_accessor(link)
    };
    format!("{}\n{}", fields(link), accessors)
}

fn fields(link: &RegistrationLink) -> String {
    let name = &link.property_name;
    let field = format!("public static readonly DependencyProperty {name}Property;");
    if link.read_only {
        format!("{field}\nstatic readonly DependencyPropertyKey {name}PropertyKey;")
    } else {
        field
    }
}

fn property_accessor(link: &RegistrationLink) -> String {
    let (ty, name) = (&link.property_type, &link.property_name);
    let setter = if link.read_only {
        format!("private set {{ SetValue({name}PropertyKey, value); }}")
    } else {
        format!("set {{ SetValue({name}Property, value); }}")
    };
    format!(
        "public {ty} {name} {{\n    get {{ return ({ty})GetValue({name}Property); }}\n    {setter}\n}}"
    )
}

fn attached_accessors(link: &RegistrationLink) -> String {
    let (ty, name) = (&link.property_type, &link.property_name);
    let (visibility, field) = if link.read_only {
        ("", "PropertyKey")
    } else {
        ("public ", "Property")
    };
    format!(
        "public static {ty} Get{name}(DependencyObject d) {{\n    return ({ty})d.GetValue({name}Property);\n}}\n\
         {visibility}static void Set{name}(DependencyObject d, {ty} value) {{\n    d.SetValue({name}{field}, value);\n}}"
    )
}
