//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! for the C# subset the completers read.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (namespaces, type declarations, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace, comments, preprocessor lines)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    PREPROCESSOR,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier, incl. contextual keywords (partial, var, get, ...)
    INTEGER, // 42, 0x2A, 42u
    REAL,    // 3.14, 1e3, 5m
    STRING,  // "a", @"a", $"a"
    CHAR,    // 'a'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,                // {
    R_BRACE,                // }
    L_BRACK,                // [
    R_BRACK,                // ]
    L_PAREN,                // (
    R_PAREN,                // )
    SEMICOLON,              // ;
    COLON,                  // :
    COLON_COLON,            // ::
    DOT,                    // .
    COMMA,                  // ,
    EQ,                     // =
    EQ_EQ,                  // ==
    BANG_EQ,                // !=
    LT,                     // <
    GT,                     // >
    LT_EQ,                  // <=
    GT_EQ,                  // >=
    LT_LT,                  // <<
    FAT_ARROW,              // =>
    ARROW,                  // ->
    PLUS,                   // +
    MINUS,                  // -
    STAR,                   // *
    SLASH,                  // /
    PERCENT,                // %
    AMP,                    // &
    AMP_AMP,                // &&
    PIPE,                   // |
    PIPE_PIPE,              // ||
    CARET,                  // ^
    BANG,                   // !
    TILDE,                  // ~
    QUESTION,               // ?
    QUESTION_QUESTION,      // ??
    PLUS_PLUS,              // ++
    MINUS_MINUS,            // --
    PLUS_EQ,                // +=
    MINUS_EQ,               // -=
    STAR_EQ,                // *=
    SLASH_EQ,               // /=
    PERCENT_EQ,             // %=
    AMP_EQ,                 // &=
    PIPE_EQ,                // |=
    CARET_EQ,               // ^=
    QUESTION_QUESTION_EQ,   // ??=

    // =========================================================================
    // KEYWORDS - declarations and modifiers
    // =========================================================================
    ABSTRACT_KW,
    CLASS_KW,
    CONST_KW,
    DELEGATE_KW,
    ENUM_KW,
    EVENT_KW,
    EXPLICIT_KW,
    EXTERN_KW,
    IMPLICIT_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    NAMESPACE_KW,
    NEW_KW,
    OPERATOR_KW,
    OVERRIDE_KW,
    PARAMS_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    SEALED_KW,
    STATIC_KW,
    STRUCT_KW,
    UNSAFE_KW,
    USING_KW,
    VIRTUAL_KW,
    VOLATILE_KW,

    // =========================================================================
    // KEYWORDS - statements and expressions
    // =========================================================================
    AS_KW,
    BASE_KW,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CHECKED_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    ELSE_KW,
    FALSE_KW,
    FINALLY_KW,
    FIXED_KW,
    FOR_KW,
    FOREACH_KW,
    GOTO_KW,
    IF_KW,
    IN_KW,
    IS_KW,
    LOCK_KW,
    NULL_KW,
    OUT_KW,
    REF_KW,
    RETURN_KW,
    SIZEOF_KW,
    STACKALLOC_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    UNCHECKED_KW,
    VOID_KW,
    WHILE_KW,

    // =========================================================================
    // KEYWORDS - predefined types
    // =========================================================================
    BOOL_KW,
    BYTE_KW,
    CHAR_KW,
    DECIMAL_KW,
    DOUBLE_KW,
    FLOAT_KW,
    INT_KW,
    LONG_KW,
    OBJECT_KW,
    SBYTE_KW,
    SHORT_KW,
    STRING_KW,
    UINT_KW,
    ULONG_KW,
    USHORT_KW,

    // =========================================================================
    // NODES - compilation unit level
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    NAMESPACE_DECL,
    NAMESPACE_BODY,
    QUALIFIED_NAME,
    NAME,

    // =========================================================================
    // NODES - type declarations and members
    // =========================================================================
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    CLASS_DECL,
    CLASS_BODY,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    BASE_LIST,
    TYPE_CONSTRAINTS,
    CONSTRUCTOR_DECL,
    CONSTRUCTOR_INITIALIZER,
    METHOD_DECL,
    PROPERTY_DECL,
    ACCESSOR_LIST,
    ACCESSOR,
    FIELD_DECL,
    VARIABLE_DECLARATOR,
    OTHER_MEMBER,
    PARAM_LIST,
    PARAM,

    // =========================================================================
    // NODES - types
    // =========================================================================
    TYPE,
    TYPE_ARG_LIST,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    BLOCK,
    EXPR_STMT,
    OTHER_STMT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    NAME_REF,
    LITERAL,
    THIS_EXPR,
    BASE_EXPR,
    PAREN_EXPR,
    MEMBER_EXPR,
    CALL_EXPR,
    INDEX_EXPR,
    ARG_LIST,
    ARG,
    DECL_EXPR,
    NEW_EXPR,
    INITIALIZER,
    TYPEOF_EXPR,
    LAMBDA_EXPR,
    CAST_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    BIN_EXPR,
    ASSIGN_EXPR,
    COND_EXPR,

    // Special
    ERROR,
    EOF,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment, preprocessor line)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::PREPROCESSOR
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::USHORT_KW as u16)
    }

    /// Check if this is a predefined type keyword (`int`, `string`, ...)
    pub fn is_predefined_type(self) -> bool {
        (self as u16) >= (Self::BOOL_KW as u16) && (self as u16) <= (Self::USHORT_KW as u16)
    }

    /// Check if this is a member modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::ABSTRACT_KW
                | Self::CONST_KW
                | Self::EXTERN_KW
                | Self::INTERNAL_KW
                | Self::NEW_KW
                | Self::OVERRIDE_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::PUBLIC_KW
                | Self::READONLY_KW
                | Self::SEALED_KW
                | Self::STATIC_KW
                | Self::UNSAFE_KW
                | Self::VIRTUAL_KW
                | Self::VOLATILE_KW
        )
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER
                | Self::REAL
                | Self::STRING
                | Self::CHAR
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this is a compound assignment or plain assignment operator
    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::AMP_EQ
                | Self::PIPE_EQ
                | Self::CARET_EQ
                | Self::QUESTION_QUESTION_EQ
        )
    }

    /// Check if this is a binary operator (excluding assignment)
    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            Self::PLUS
                | Self::MINUS
                | Self::STAR
                | Self::SLASH
                | Self::PERCENT
                | Self::AMP
                | Self::AMP_AMP
                | Self::PIPE
                | Self::PIPE_PIPE
                | Self::CARET
                | Self::EQ_EQ
                | Self::BANG_EQ
                | Self::LT
                | Self::GT
                | Self::LT_EQ
                | Self::GT_EQ
                | Self::LT_LT
                | Self::QUESTION_QUESTION
                | Self::IS_KW
                | Self::AS_KW
        )
    }

    /// Check if this is an expression node
    pub fn is_expr(self) -> bool {
        (self as u16) >= (Self::NAME_REF as u16) && (self as u16) <= (Self::COND_EXPR as u16)
            && self != Self::ARG_LIST
            && self != Self::ARG
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CSharpLanguage {}

impl rowan::Language for CSharpLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CSharpLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CSharpLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CSharpLanguage>;
