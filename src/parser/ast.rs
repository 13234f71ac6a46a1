//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for C# syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use rowan::{NodeOrToken, TextRange};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn text_range(&self) -> TextRange {
        self.syntax().text_range()
    }
}

// ============================================================================
// Helper utilities
// ============================================================================

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Find the first direct child token of the specified kind.
#[inline]
fn find_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// Check for a contextual keyword (`partial`, `global`, `record`) among the
/// direct child tokens. These lex as identifiers.
#[inline]
fn has_contextual(node: &SyntaxNode, text: &str) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == SyntaxKind::IDENT && t.text() == text)
}

/// Source text of a node without trivia.
///
/// Adjacent word tokens are separated by one space and every comma is
/// followed by one, so `Dictionary< string ,int >` reads back as
/// `Dictionary<string, int>`.
pub fn normalized_text(node: &SyntaxNode) -> String {
    let mut out = String::new();
    let mut prev_word = false;
    for token in node.descendants_with_tokens().filter_map(|e| e.into_token()) {
        let kind = token.kind();
        if kind.is_trivia() {
            continue;
        }
        let is_word = kind == SyntaxKind::IDENT || kind.is_keyword();
        if is_word && prev_word {
            out.push(' ');
        }
        out.push_str(token.text());
        if kind == SyntaxKind::COMMA {
            out.push(' ');
        }
        prev_word = is_word;
    }
    out
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Boolean property methods that check for a specific token kind.
macro_rules! has_token_method {
    ($name:ident, $kind:ident) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token.")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// A method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// A method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

// ============================================================================
// Compilation unit
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(usings, UsingDirective);
    children_method!(namespaces, NamespaceDecl);
    children_method!(types, ClassDecl);
}

ast_node!(UsingDirective, USING_DIRECTIVE);

impl UsingDirective {
    has_token_method!(is_static, STATIC_KW);
    first_child_method!(alias, Name);
    first_child_method!(target, QualifiedName);

    pub fn is_global(&self) -> bool {
        has_contextual(&self.0, "global")
    }
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    first_child_method!(name, QualifiedName);
    first_child_method!(body, NamespaceBody);

    /// File-scoped form: `namespace A.B;`
    pub fn is_file_scoped(&self) -> bool {
        has_token(&self.0, SyntaxKind::SEMICOLON)
            && self
                .body()
                .is_some_and(|body| !has_token(body.syntax(), SyntaxKind::L_BRACE))
    }
}

ast_node!(NamespaceBody, NAMESPACE_BODY);

impl NamespaceBody {
    children_method!(usings, UsingDirective);
    children_method!(namespaces, NamespaceDecl);
    children_method!(types, ClassDecl);
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// Identifier segments, without a leading `global::` alias.
    pub fn segments(&self) -> Vec<String> {
        let mut idents: Vec<String> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
            .collect();
        if self.is_global_qualified() {
            idents.remove(0);
        }
        idents
    }

    /// `global::X.Y`
    pub fn is_global_qualified(&self) -> bool {
        let mut tokens = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia());
        matches!(
            (tokens.next(), tokens.next()),
            (Some(first), Some(second))
                if first.text() == "global" && second.kind() == SyntaxKind::COLON_COLON
        )
    }

    /// Generic arity of the last segment.
    pub fn arity(&self) -> usize {
        let last_ident_end = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .last()
            .map(|t| t.text_range().end());
        self.0
            .children()
            .filter_map(TypeArgList::cast)
            .find(|list| Some(list.syntax().text_range().start()) >= last_ident_end)
            .map(|list| list.arity())
            .unwrap_or(0)
    }

    pub fn text(&self) -> String {
        normalized_text(&self.0)
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn ident(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::IDENT)
    }

    /// Name text; dotted for explicit interface implementations.
    pub fn text(&self) -> String {
        normalized_text(&self.0)
    }
}

// ============================================================================
// Attributes
// ============================================================================

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    children_method!(attributes, Attribute);

    /// Explicit target such as `assembly` in `[assembly: X]`.
    pub fn target(&self) -> Option<String> {
        let mut tokens = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .skip(1);
        match (tokens.next(), tokens.next()) {
            (Some(target), Some(colon)) if colon.kind() == SyntaxKind::COLON => {
                Some(target.text().to_string())
            }
            _ => None,
        }
    }
}

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    first_child_method!(name, QualifiedName);
    first_child_method!(arg_list, ArgList);
}

// ============================================================================
// Type declarations
// ============================================================================

/// Declaration keyword of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    /// Keyword text used to reopen the declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::RecordStruct => "record struct",
        }
    }
}

ast_node!(ClassDecl, CLASS_DECL);

impl ClassDecl {
    has_token_method!(is_static, STATIC_KW);
    has_token_method!(is_abstract, ABSTRACT_KW);
    first_child_method!(name, Name);
    first_child_method!(type_param_list, TypeParamList);
    first_child_method!(body, ClassBody);
    children_method!(attribute_lists, AttributeList);

    pub fn kind(&self) -> TypeKind {
        if has_contextual(&self.0, "record") {
            if has_token(&self.0, SyntaxKind::STRUCT_KW) {
                TypeKind::RecordStruct
            } else {
                TypeKind::Record
            }
        } else if has_token(&self.0, SyntaxKind::STRUCT_KW) {
            TypeKind::Struct
        } else if has_token(&self.0, SyntaxKind::INTERFACE_KW) {
            TypeKind::Interface
        } else {
            TypeKind::Class
        }
    }

    pub fn is_partial(&self) -> bool {
        has_contextual(&self.0, "partial")
    }

    /// Attributes of every list, in source order.
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attribute_lists().flat_map(|list| list.attributes().collect::<Vec<_>>())
    }

    /// Type parameter names in declaration order.
    pub fn type_params(&self) -> Vec<String> {
        self.type_param_list()
            .map(|list| list.params().filter_map(|p| p.name()).map(|n| n.text()).collect())
            .unwrap_or_default()
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.body().into_iter().flat_map(|body| body.members().collect::<Vec<_>>())
    }

    pub fn static_constructor(&self) -> Option<ConstructorDecl> {
        self.members().find_map(|member| match member {
            Member::Constructor(ctor) if ctor.is_static() => Some(ctor),
            _ => None,
        })
    }
}

ast_node!(ClassBody, CLASS_BODY);

impl ClassBody {
    children_method!(members, Member);
}

ast_node!(TypeParamList, TYPE_PARAM_LIST);

impl TypeParamList {
    children_method!(params, TypeParam);
}

ast_node!(TypeParam, TYPE_PARAM);

impl TypeParam {
    first_child_method!(name, Name);
}

// ============================================================================
// Members
// ============================================================================

/// Any member of a type body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Type(ClassDecl),
    Constructor(ConstructorDecl),
    Method(MethodDecl),
    Property(PropertyDecl),
    Field(FieldDecl),
    Other(OtherMember),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL
                | SyntaxKind::CONSTRUCTOR_DECL
                | SyntaxKind::METHOD_DECL
                | SyntaxKind::PROPERTY_DECL
                | SyntaxKind::FIELD_DECL
                | SyntaxKind::OTHER_MEMBER
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS_DECL => Some(Self::Type(ClassDecl(node))),
            SyntaxKind::CONSTRUCTOR_DECL => Some(Self::Constructor(ConstructorDecl(node))),
            SyntaxKind::METHOD_DECL => Some(Self::Method(MethodDecl(node))),
            SyntaxKind::PROPERTY_DECL => Some(Self::Property(PropertyDecl(node))),
            SyntaxKind::FIELD_DECL => Some(Self::Field(FieldDecl(node))),
            SyntaxKind::OTHER_MEMBER => Some(Self::Other(OtherMember(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Type(n) => n.syntax(),
            Self::Constructor(n) => n.syntax(),
            Self::Method(n) => n.syntax(),
            Self::Property(n) => n.syntax(),
            Self::Field(n) => n.syntax(),
            Self::Other(n) => n.syntax(),
        }
    }
}

ast_node!(ConstructorDecl, CONSTRUCTOR_DECL);

impl ConstructorDecl {
    has_token_method!(is_static, STATIC_KW);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);
    first_child_method!(body, Block);
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    has_token_method!(is_static, STATIC_KW);
    first_child_method!(return_type, TypeRef);
    first_child_method!(name, Name);
    first_child_method!(param_list, ParamList);
    first_child_method!(body, Block);
}

ast_node!(PropertyDecl, PROPERTY_DECL);

impl PropertyDecl {
    has_token_method!(is_static, STATIC_KW);
    has_token_method!(is_abstract, ABSTRACT_KW);
    has_token_method!(is_virtual, VIRTUAL_KW);
    first_child_method!(ty, TypeRef);
    first_child_method!(name, Name);
    first_child_method!(accessor_list, AccessorList);

    /// `T Name { get; }`: a single body-less `get` and nothing else.
    pub fn is_get_only_auto(&self) -> bool {
        let Some(list) = self.accessor_list() else {
            return false;
        };
        let accessors: Vec<_> = list.accessors().collect();
        matches!(accessors.as_slice(), [only] if only.keyword().as_deref() == Some("get") && !only.has_body())
    }
}

ast_node!(AccessorList, ACCESSOR_LIST);

impl AccessorList {
    children_method!(accessors, Accessor);
}

ast_node!(Accessor, ACCESSOR);

impl Accessor {
    /// `get`, `set` or `init`
    pub fn keyword(&self) -> Option<String> {
        find_token(&self.0, SyntaxKind::IDENT).map(|t| t.text().to_string())
    }

    pub fn has_body(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::BLOCK)
            || has_token(&self.0, SyntaxKind::FAT_ARROW)
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    has_token_method!(is_static, STATIC_KW);
    first_child_method!(ty, TypeRef);
    children_method!(declarators, VariableDeclarator);
}

ast_node!(VariableDeclarator, VARIABLE_DECLARATOR);

impl VariableDeclarator {
    first_child_method!(name, Name);
}

ast_node!(OtherMember, OTHER_MEMBER);

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    children_method!(params, Param);
}

ast_node!(Param, PARAM);

impl Param {
    first_child_method!(ty, TypeRef);
    first_child_method!(name, Name);
}

// ============================================================================
// Types
// ============================================================================

ast_node!(TypeRef, TYPE);

impl TypeRef {
    pub fn text(&self) -> String {
        normalized_text(&self.0)
    }

    /// Dotted name segments of a named type, without `global::`.
    ///
    /// Empty for predefined, tuple, array and nullable types, which never
    /// name a declared entity.
    pub fn segments(&self) -> Vec<String> {
        let tokens: Vec<SyntaxToken> = self
            .0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect();
        let mut segments = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            match token.kind() {
                SyntaxKind::IDENT => {
                    let global_alias = i == 0
                        && token.text() == "global"
                        && tokens.get(1).map(|t| t.kind()) == Some(SyntaxKind::COLON_COLON);
                    if !global_alias {
                        segments.push(token.text().to_string());
                    }
                }
                SyntaxKind::DOT | SyntaxKind::COLON_COLON => {}
                _ => return Vec::new(),
            }
        }
        segments
    }

    /// Generic arity of the last segment.
    pub fn arity(&self) -> usize {
        self.0
            .children()
            .filter_map(TypeArgList::cast)
            .last()
            .map(|list| list.arity())
            .unwrap_or(0)
    }
}

ast_node!(TypeArgList, TYPE_ARG_LIST);

impl TypeArgList {
    children_method!(types, TypeRef);

    /// Number of type arguments, counting unbound slots in `Foo<,>`.
    pub fn arity(&self) -> usize {
        let types = self.types().count();
        if types > 0 {
            types
        } else {
            self.0
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .filter(|t| t.kind() == SyntaxKind::COMMA)
                .count()
                + 1
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(Block, BLOCK);

impl Block {
    children_method!(statements, Stmt);
}

/// A statement inside a block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Expr(ExprStmt),
    Block(Block),
    Other(OtherStmt),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::EXPR_STMT | SyntaxKind::BLOCK | SyntaxKind::OTHER_STMT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::EXPR_STMT => Some(Self::Expr(ExprStmt(node))),
            SyntaxKind::BLOCK => Some(Self::Block(Block(node))),
            SyntaxKind::OTHER_STMT => Some(Self::Other(OtherStmt(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Expr(n) => n.syntax(),
            Self::Block(n) => n.syntax(),
            Self::Other(n) => n.syntax(),
        }
    }
}

ast_node!(ExprStmt, EXPR_STMT);

impl ExprStmt {
    first_child_method!(expr, Expr);
}

ast_node!(OtherStmt, OTHER_STMT);

// ============================================================================
// Expressions
// ============================================================================

/// Any expression. Only the shapes the completers inspect get their own
/// variant; everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Call(CallExpr),
    Member(MemberExpr),
    Name(NameRef),
    Literal(Literal),
    Other(SyntaxNode),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expr()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            SyntaxKind::MEMBER_EXPR => Some(Self::Member(MemberExpr(node))),
            SyntaxKind::NAME_REF => Some(Self::Name(NameRef(node))),
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            kind if kind.is_expr() => Some(Self::Other(node)),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Call(n) => n.syntax(),
            Self::Member(n) => n.syntax(),
            Self::Name(n) => n.syntax(),
            Self::Literal(n) => n.syntax(),
            Self::Other(n) => n,
        }
    }
}

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    first_child_method!(callee, Expr);
    first_child_method!(arg_list, ArgList);

    pub fn args(&self) -> Vec<Arg> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}

ast_node!(MemberExpr, MEMBER_EXPR);

impl MemberExpr {
    /// The expression left of the dot.
    pub fn receiver(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The accessed member, right of the dot.
    pub fn name(&self) -> Option<NameRef> {
        let mut children = self.0.children();
        children.next()?;
        children.find_map(NameRef::cast)
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    first_child_method!(type_arg_list, TypeArgList);

    /// Identifier or predefined-type keyword text.
    pub fn text(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// Generic arity (`0` for a plain name).
    pub fn arity(&self) -> usize {
        self.type_arg_list().map(|list| list.arity()).unwrap_or(0)
    }
}

ast_node!(Literal, LITERAL);

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    children_method!(args, Arg);
}

ast_node!(Arg, ARG);

impl Arg {
    first_child_method!(expr, Expr);
    first_child_method!(decl, DeclExpr);

    /// Parameter name of a named argument (`name: value`).
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    /// `ref`, `out` or `in`
    pub fn modifier(&self) -> Option<SyntaxKind> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .map(|t| t.kind())
            .find(|kind| {
                matches!(
                    kind,
                    SyntaxKind::REF_KW | SyntaxKind::OUT_KW | SyntaxKind::IN_KW
                )
            })
    }
}

ast_node!(DeclExpr, DECL_EXPR);

impl DeclExpr {
    first_child_method!(ty, TypeRef);
    first_child_method!(name, Name);
}

// ============================================================================
// Pointers
// ============================================================================

/// A thread-safe handle to a node: its kind and range.
///
/// `SyntaxNode` is tied to one thread; pointers travel across rayon
/// workers and are resolved again against a root built from the shared
/// green tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePtr {
    kind: SyntaxKind,
    range: TextRange,
}

impl NodePtr {
    pub fn new(node: &SyntaxNode) -> Self {
        Self {
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if !root.text_range().contains_range(self.range) {
            return None;
        }
        let start = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .find(|node| node.kind() == self.kind && node.text_range() == self.range)
    }

    pub fn cast<N: AstNode>(&self, root: &SyntaxNode) -> Option<N> {
        self.to_node(root).and_then(N::cast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn source(text: &str) -> SourceFile {
        let parse = parse(text);
        assert!(parse.ok(), "{:?}", parse.errors);
        SourceFile::cast(parse.syntax()).unwrap()
    }

    fn first_class(text: &str) -> ClassDecl {
        let file = source(text);
        file.namespaces()
            .next()
            .and_then(|ns| ns.body())
            .and_then(|body| body.types().next())
            .unwrap()
    }

    #[test]
    fn test_using_directive_forms() {
        let file = source("using System; using static Foo.Bar; using X = A.B<int>; global using G;");
        let usings: Vec<_> = file.usings().collect();
        assert_eq!(usings.len(), 4);
        assert_eq!(usings[0].target().unwrap().segments(), vec!["System"]);
        assert!(usings[1].is_static());
        assert_eq!(usings[2].alias().unwrap().text(), "X");
        assert_eq!(usings[2].target().unwrap().text(), "A.B<int>");
        assert!(usings[3].is_global());
    }

    #[test]
    fn test_class_shape() {
        let class = first_class(
            "namespace N { [Foo, Bar(1)] public partial class C<T, U> : Base where T : class { } }",
        );
        assert_eq!(class.name().unwrap().text(), "C");
        assert!(class.is_partial());
        assert_eq!(class.kind(), TypeKind::Class);
        assert_eq!(class.type_params(), vec!["T", "U"]);
        let attrs: Vec<_> = class
            .attributes()
            .map(|a| a.name().unwrap().text())
            .collect();
        assert_eq!(attrs, vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_record_struct_kind() {
        let class = first_class("namespace N { partial record struct P(int X); }");
        assert_eq!(class.kind(), TypeKind::RecordStruct);
        assert!(class.is_partial());
    }

    #[test]
    fn test_static_constructor_statements() {
        let class = first_class(
            "namespace N { class C { C() { } static C() { int x = 1; Foo(); } } }",
        );
        let ctor = class.static_constructor().unwrap();
        let stmts: Vec<_> = ctor.body().unwrap().statements().collect();
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Stmt::Other(_)));
        assert!(matches!(stmts[1], Stmt::Expr(_)));
    }

    #[test]
    fn test_get_only_auto_property() {
        let class = first_class(
            "namespace N { class C { public int A { get; } public int B { get; set; } public int D { get { return 1; } } public int E => 1; } }",
        );
        let flags: Vec<_> = class
            .members()
            .filter_map(|m| match m {
                Member::Property(p) => Some((p.name().unwrap().text(), p.is_get_only_auto())),
                _ => None,
            })
            .collect();
        assert_eq!(
            flags,
            vec![
                ("A".to_string(), true),
                ("B".to_string(), false),
                ("D".to_string(), false),
                ("E".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_generic_member_call_shape() {
        let class = first_class(
            "namespace N { class C { static C() { R<C>.New().Register<int>(x => x.A, out AProperty, 0); } } }",
        );
        let ctor = class.static_constructor().unwrap();
        let Some(Stmt::Expr(stmt)) = ctor.body().unwrap().statements().next() else {
            panic!("expected expression statement");
        };
        let Some(Expr::Call(call)) = stmt.expr() else {
            panic!("expected call");
        };
        let Some(Expr::Member(member)) = call.callee() else {
            panic!("expected member access");
        };
        let name = member.name().unwrap();
        assert_eq!(name.text(), "Register");
        assert_eq!(name.arity(), 1);
        assert_eq!(
            name.type_arg_list().unwrap().types().next().unwrap().text(),
            "int"
        );
        let args = call.args();
        assert_eq!(args.len(), 3);
        assert_eq!(args[1].modifier(), Some(SyntaxKind::OUT_KW));
        assert!(matches!(args[1].expr(), Some(Expr::Name(_))));
        assert!(matches!(member.receiver(), Some(Expr::Call(_))));
    }

    #[test]
    fn test_node_ptr_round_trip() {
        let parse = parse("namespace N { class A { } class B { } }");
        let root = parse.syntax();
        let b = root
            .descendants()
            .filter_map(ClassDecl::cast)
            .nth(1)
            .unwrap();
        let ptr = NodePtr::new(b.syntax());
        let found: ClassDecl = ptr.cast(&root).unwrap();
        assert_eq!(found.name().unwrap().text(), "B");
    }

    #[test]
    fn test_normalized_text_spacing() {
        let parse = parse("namespace N { class C { Dictionary< string ,List<int> > F; } }");
        let ty = parse
            .syntax()
            .descendants()
            .find_map(TypeRef::cast)
            .unwrap();
        assert_eq!(ty.text(), "Dictionary<string, List<int>>");
    }
}
