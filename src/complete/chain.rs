//! Dependency-property chain reconstruction.
//!
//! A registration chain is one expression statement of a static
//! constructor:
//!
//! ```text
//! DependencyPropertiesRegistrator<Owner>.New()        ← terminal (innermost call)
//!     .Register<string>(x => x.Name, out NameProperty, "")
//!     .RegisterReadOnly<int>(x => x.Count, out CountProperty, 0);   ← outermost call
//! ```
//!
//! The statement's expression is the *last* call written; each call's
//! receiver is the previous one. Unfolding therefore yields the links in
//! reverse source order, and the reconstructor reverses them back.

use smol_str::SmolStr;

use crate::hir::{
    Diagnostic, EntityHandle, REGISTRATOR_FINALIZE, ResolveResult, SemanticModel, codes,
};
use crate::parser::{AstNode, CallExpr, Expr, NameRef, Stmt, TextRange, TypeArgList, TypeRef};

/// Suffix the name argument of a registration call must carry.
pub const FIELD_SUFFIX: &str = "Property";

/// The four registration methods and the flags each one implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationKind {
    Register,
    RegisterReadOnly,
    RegisterAttached,
    RegisterAttachedReadOnly,
}

impl RegistrationKind {
    pub const ALL: [RegistrationKind; 4] = [
        RegistrationKind::Register,
        RegistrationKind::RegisterReadOnly,
        RegistrationKind::RegisterAttached,
        RegistrationKind::RegisterAttachedReadOnly,
    ];

    pub fn method_name(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::RegisterReadOnly => "RegisterReadOnly",
            Self::RegisterAttached => "RegisterAttached",
            Self::RegisterAttachedReadOnly => "RegisterAttachedReadOnly",
        }
    }

    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.method_name() == name)
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, Self::RegisterReadOnly | Self::RegisterAttachedReadOnly)
    }

    pub fn is_attached(self) -> bool {
        matches!(self, Self::RegisterAttached | Self::RegisterAttachedReadOnly)
    }
}

/// One registration call of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationLink {
    pub method_name: SmolStr,
    /// Property type text exactly as written in the type argument.
    pub property_type: String,
    /// Name argument without the `Property` suffix.
    pub property_name: String,
    pub read_only: bool,
    pub attached: bool,
}

impl RegistrationLink {
    pub fn new(
        kind: RegistrationKind,
        property_type: impl Into<String>,
        property_name: impl Into<String>,
    ) -> Self {
        Self {
            method_name: SmolStr::new_static(kind.method_name()),
            property_type: property_type.into(),
            property_name: property_name.into(),
            read_only: kind.is_read_only(),
            attached: kind.is_attached(),
        }
    }
}

/// The links of one chain in source order, with the owner type named by
/// its terminal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub owner: String,
    pub links: Vec<RegistrationLink>,
}

/// A classified call of an unfolded chain.
#[derive(Debug, Clone)]
pub enum ChainLink {
    /// `.Register<T>(…)` or one of its variants.
    Registration {
        call: CallExpr,
        kind: RegistrationKind,
        method: NameRef,
    },
    /// `DependencyPropertiesRegistrator<Owner>.New()`, resolved by symbol.
    Terminal { call: CallExpr, owner: TypeRef },
    /// Any other call.
    Unrecognized { call: CallExpr, method: Option<String> },
}

impl ChainLink {
    pub fn classify(model: &SemanticModel<'_>, entity: &EntityHandle, call: CallExpr) -> Self {
        let Some(Expr::Member(member)) = call.callee() else {
            return Self::Unrecognized { call, method: None };
        };
        let Some(method) = member.name() else {
            return Self::Unrecognized { call, method: None };
        };
        let name = method.text();
        if name == REGISTRATOR_FINALIZE && method.arity() == 0 {
            if let Some(owner) = member
                .receiver()
                .and_then(|receiver| registrator_owner(model, entity, &receiver))
            {
                return Self::Terminal { call, owner };
            }
        }
        match RegistrationKind::from_method_name(&name) {
            Some(kind) => Self::Registration { call, kind, method },
            None => Self::Unrecognized {
                call,
                method: Some(name),
            },
        }
    }

    pub fn call(&self) -> &CallExpr {
        match self {
            Self::Registration { call, .. }
            | Self::Terminal { call, .. }
            | Self::Unrecognized { call, .. } => call,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal { .. })
    }
}

/// Unfold a call into its chain, outermost call first.
///
/// Follows "the callee is a member access whose receiver is a call" until
/// it no longer holds. Iterative, so chain depth does not grow the stack.
pub fn unfold(call: &CallExpr) -> Vec<CallExpr> {
    let mut chain = vec![call.clone()];
    let mut current = call.clone();
    while let Some(Expr::Member(member)) = current.callee() {
        let Some(Expr::Call(inner)) = member.receiver() else {
            break;
        };
        chain.push(inner.clone());
        current = inner;
    }
    chain
}

/// Reconstruct the property specs of every registration chain among
/// `statements`.
///
/// Statements that are not a call, and calls whose innermost link is not
/// the registrator terminal, are skipped. Malformed links in an accepted
/// chain are reported against the statement; errors of all statements are
/// accumulated.
pub fn reconstruct(
    model: &SemanticModel<'_>,
    entity: &EntityHandle,
    statements: &[Stmt],
) -> Result<Vec<PropertySpec>, Vec<Diagnostic>> {
    let specs = statements.iter().filter_map(|statement| {
        let Stmt::Expr(statement) = statement else {
            return None;
        };
        let Some(Expr::Call(call)) = statement.expr() else {
            return None;
        };
        reconstruct_chain(model, entity, &call, statement.text_range())
    });
    super::accumulate(specs)
}

fn reconstruct_chain(
    model: &SemanticModel<'_>,
    entity: &EntityHandle,
    call: &CallExpr,
    range: TextRange,
) -> Option<Result<PropertySpec, Vec<Diagnostic>>> {
    let mut chain = unfold(call);
    let terminal = ChainLink::classify(model, entity, chain.pop()?);
    let ChainLink::Terminal { owner, .. } = terminal else {
        tracing::trace!(
            "[CHAIN] {}: {} call(s) without registrator terminal, skipped",
            entity.name(),
            chain.len() + 1
        );
        return None;
    };
    tracing::trace!(
        "[CHAIN] {}: {} registration(s) for owner {}",
        entity.name(),
        chain.len(),
        owner.text()
    );

    let mut errors = Vec::new();
    if !owner_matches(model, entity, &owner) {
        errors.push(model.diagnostic(
            codes::INCORRECT_OWNER_TYPE,
            range,
            format!(
                "Owner type '{}' doesn't match the enclosing type '{}'.",
                owner.text(),
                entity.display_name()
            ),
        ));
    }

    let links = chain
        .into_iter()
        .map(|call| match ChainLink::classify(model, entity, call) {
            ChainLink::Registration { call, kind, method } => {
                registration_link(model, kind, &method, &call, range)
            }
            ChainLink::Terminal { .. } => Err(vec![model.diagnostic(
                codes::UNKNOWN_REGISTRATION_METHOD,
                range,
                "Registrator terminal call may only start a registration chain.",
            )]),
            ChainLink::Unrecognized { method, .. } => Err(vec![model.diagnostic(
                codes::UNKNOWN_REGISTRATION_METHOD,
                range,
                match method {
                    Some(name) => format!("Unknown registration method '{name}'."),
                    None => "Unrecognized call in registration chain.".to_string(),
                },
            )]),
        });

    let result = match super::accumulate(links) {
        Ok(mut links) if errors.is_empty() => {
            links.reverse();
            Ok(PropertySpec {
                owner: owner.text(),
                links,
            })
        }
        Ok(_) => Err(errors),
        Err(mut link_errors) => {
            errors.append(&mut link_errors);
            Err(errors)
        }
    };
    Some(result)
}

fn registration_link(
    model: &SemanticModel<'_>,
    kind: RegistrationKind,
    method: &NameRef,
    call: &CallExpr,
    range: TextRange,
) -> Result<RegistrationLink, Vec<Diagnostic>> {
    let mut errors = Vec::new();

    let property_type = single_type_argument(method.type_arg_list());
    if property_type.is_none() {
        errors.push(model.diagnostic(
            codes::PROPERTY_TYPE_MISSED,
            range,
            format!(
                "Property type should be explicitly specified as the single type argument of '{}' to generate dependency property.",
                kind.method_name()
            ),
        ));
    }

    let property_name = match name_argument(call) {
        Ok(name) => Some(name),
        Err(written) => {
            errors.push(model.diagnostic(
                codes::INCORRECT_PROPERTY_NAME,
                range,
                format!(
                    "Dependency property field argument '{written}' of '{}' should be an identifier with the '{FIELD_SUFFIX}' suffix.",
                    kind.method_name()
                ),
            ));
            None
        }
    };

    match (property_type, property_name) {
        (Some(ty), Some(name)) if errors.is_empty() => {
            let written = ty.syntax().text().to_string();
            Ok(RegistrationLink::new(kind, written.trim(), name))
        },
        _ => Err(errors),
    }
}

fn single_type_argument(list: Option<TypeArgList>) -> Option<TypeRef> {
    let list = list?;
    let mut types = list.types();
    let first = types.next()?;
    types.next().is_none().then_some(first)
}

/// The property name carried by the second positional argument: a bare
/// identifier ending in `Property`, suffix stripped. On failure returns
/// the argument text as written.
fn name_argument(call: &CallExpr) -> Result<String, String> {
    let arg = call
        .args()
        .into_iter()
        .filter(|arg| arg.name().is_none())
        .nth(1)
        .ok_or_else(|| "<missing>".to_string())?;
    let written = arg.syntax().text().to_string().trim().to_string();
    let Some(Expr::Name(name)) = arg.expr() else {
        return Err(written);
    };
    if name.arity() != 0 {
        return Err(written);
    }
    let text = name.text();
    let ident = text.strip_prefix('@').unwrap_or(&text);
    match ident.strip_suffix(FIELD_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => Ok(stripped.to_string()),
        _ => Err(written),
    }
}

/// Owner type argument of `DependencyPropertiesRegistrator<Owner>` when
/// `receiver` names the registrator, plainly or namespace-qualified.
fn registrator_owner(
    model: &SemanticModel<'_>,
    entity: &EntityHandle,
    receiver: &Expr,
) -> Option<TypeRef> {
    let (segments, type_args) = type_path(receiver)?;
    let type_args = type_args?;
    let owner = single_type_argument(Some(type_args.clone()))?;
    match model.resolve_type(entity, &segments, type_args.arity()) {
        ResolveResult::Found(id) if model.is_registrator(id) => Some(owner),
        _ => None,
    }
}

/// Read an expression as a dotted type name. Only the last segment may
/// carry type arguments.
fn type_path(expr: &Expr) -> Option<(Vec<String>, Option<TypeArgList>)> {
    let mut segments = Vec::new();
    let mut type_args = None;
    let mut current = expr.clone();
    loop {
        let name = match &current {
            Expr::Name(name) => name.clone(),
            Expr::Member(member) => member.name()?,
            _ => return None,
        };
        if segments.is_empty() {
            type_args = name.type_arg_list();
        } else if name.arity() != 0 {
            return None;
        }
        segments.push(name.text());
        match current {
            Expr::Member(member) => current = member.receiver()?,
            _ => break,
        }
    }
    segments.reverse();
    Some((segments, type_args))
}

fn owner_matches(model: &SemanticModel<'_>, entity: &EntityHandle, owner: &TypeRef) -> bool {
    matches!(
        model.resolve_type_ref(entity, owner),
        ResolveResult::Found(id) if id == entity.symbol()
    )
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
