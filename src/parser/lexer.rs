//! Logos-based lexer for the C# subset
//!
//! Fast tokenization using the logos crate. Contextual keywords
//! (`partial`, `var`, `get`, `set`, `where`, `record`, ...) lex as
//! identifiers; the parser decides their role from position.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Consume through the closing `*/`; an unterminated comment runs to the end
/// of input and lexes as an error.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Identifiers follow Unicode Standard Annex #31, with `_` as a start
/// character and an optional verbatim `@` prefix.
fn ident(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let text = lex.slice();
    let mut chars = text.strip_prefix('@').unwrap_or(text).chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || unicode_ident::is_xid_start(first))
        && chars.all(unicode_ident::is_xid_continue)
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Check whether `text` lexes as a single reserved keyword.
///
/// Generated parameter names that collide with a keyword need an `@`.
pub fn is_reserved_keyword(text: &str) -> bool {
    let mut lexer = LogosToken::lexer(text);
    match (lexer.next(), lexer.next()) {
        (Some(Ok(token)), None) => SyntaxKind::from(token).is_keyword(),
        _ => false,
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\u{000C}\u{FEFF}]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"#[^\n]*")]
    Preprocessor,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(
        r"@?[a-zA-Z_\u{80}-\u{FEFE}\u{FF00}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{FEFE}\u{FF00}-\u{10FFFF}]*",
        ident
    )]
    Ident,

    #[regex(r"[0-9][0-9_]*[uUlL]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*")]
    Integer,

    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdDmM]?")]
    #[regex(r"[0-9]+[fFdDmM]")]
    Real,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    #[regex(r#"\$@"([^"]|"")*""#)]
    String,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("??=")]
    QuestionQuestionEq,
    #[token("::")]
    ColonColon,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token("=>")]
    FatArrow,
    #[token("->")]
    Arrow,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,

    // =========================================================================
    // KEYWORDS (reserved only; tokens beat the identifier regex)
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    ConstKw,
    #[token("delegate")]
    DelegateKw,
    #[token("enum")]
    EnumKw,
    #[token("event")]
    EventKw,
    #[token("explicit")]
    ExplicitKw,
    #[token("extern")]
    ExternKw,
    #[token("implicit")]
    ImplicitKw,
    #[token("interface")]
    InterfaceKw,
    #[token("internal")]
    InternalKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("new")]
    NewKw,
    #[token("operator")]
    OperatorKw,
    #[token("override")]
    OverrideKw,
    #[token("params")]
    ParamsKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("sealed")]
    SealedKw,
    #[token("static")]
    StaticKw,
    #[token("struct")]
    StructKw,
    #[token("unsafe")]
    UnsafeKw,
    #[token("using")]
    UsingKw,
    #[token("virtual")]
    VirtualKw,
    #[token("volatile")]
    VolatileKw,

    #[token("as")]
    AsKw,
    #[token("base")]
    BaseKw,
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("checked")]
    CheckedKw,
    #[token("continue")]
    ContinueKw,
    #[token("default")]
    DefaultKw,
    #[token("do")]
    DoKw,
    #[token("else")]
    ElseKw,
    #[token("false")]
    FalseKw,
    #[token("finally")]
    FinallyKw,
    #[token("fixed")]
    FixedKw,
    #[token("for")]
    ForKw,
    #[token("foreach")]
    ForeachKw,
    #[token("goto")]
    GotoKw,
    #[token("if")]
    IfKw,
    #[token("in")]
    InKw,
    #[token("is")]
    IsKw,
    #[token("lock")]
    LockKw,
    #[token("null")]
    NullKw,
    #[token("out")]
    OutKw,
    #[token("ref")]
    RefKw,
    #[token("return")]
    ReturnKw,
    #[token("sizeof")]
    SizeofKw,
    #[token("stackalloc")]
    StackallocKw,
    #[token("switch")]
    SwitchKw,
    #[token("this")]
    ThisKw,
    #[token("throw")]
    ThrowKw,
    #[token("true")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("typeof")]
    TypeofKw,
    #[token("unchecked")]
    UncheckedKw,
    #[token("void")]
    VoidKw,
    #[token("while")]
    WhileKw,

    #[token("bool")]
    BoolKw,
    #[token("byte")]
    ByteKw,
    #[token("char")]
    CharKw,
    #[token("decimal")]
    DecimalKw,
    #[token("double")]
    DoubleKw,
    #[token("float")]
    FloatKw,
    #[token("int")]
    IntKw,
    #[token("long")]
    LongKw,
    #[token("object")]
    ObjectKw,
    #[token("sbyte")]
    SbyteKw,
    #[token("short")]
    ShortKw,
    #[token("string")]
    StringKw,
    #[token("uint")]
    UintKw,
    #[token("ulong")]
    UlongKw,
    #[token("ushort")]
    UshortKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Preprocessor => SyntaxKind::PREPROCESSOR,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Real => SyntaxKind::REAL,
            String => SyntaxKind::STRING,
            Char => SyntaxKind::CHAR,

            // Multi-char punctuation
            QuestionQuestionEq => SyntaxKind::QUESTION_QUESTION_EQ,
            ColonColon => SyntaxKind::COLON_COLON,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            LtLt => SyntaxKind::LT_LT,
            FatArrow => SyntaxKind::FAT_ARROW,
            Arrow => SyntaxKind::ARROW,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,

            // Single-char punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBrack => SyntaxKind::L_BRACK,
            RBrack => SyntaxKind::R_BRACK,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Bang => SyntaxKind::BANG,
            Tilde => SyntaxKind::TILDE,
            Question => SyntaxKind::QUESTION,

            // Keywords
            AbstractKw => SyntaxKind::ABSTRACT_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ConstKw => SyntaxKind::CONST_KW,
            DelegateKw => SyntaxKind::DELEGATE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            EventKw => SyntaxKind::EVENT_KW,
            ExplicitKw => SyntaxKind::EXPLICIT_KW,
            ExternKw => SyntaxKind::EXTERN_KW,
            ImplicitKw => SyntaxKind::IMPLICIT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            NewKw => SyntaxKind::NEW_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            OverrideKw => SyntaxKind::OVERRIDE_KW,
            ParamsKw => SyntaxKind::PARAMS_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtectedKw => SyntaxKind::PROTECTED_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            SealedKw => SyntaxKind::SEALED_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            UnsafeKw => SyntaxKind::UNSAFE_KW,
            UsingKw => SyntaxKind::USING_KW,
            VirtualKw => SyntaxKind::VIRTUAL_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,

            AsKw => SyntaxKind::AS_KW,
            BaseKw => SyntaxKind::BASE_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            CaseKw => SyntaxKind::CASE_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            CheckedKw => SyntaxKind::CHECKED_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            FixedKw => SyntaxKind::FIXED_KW,
            ForKw => SyntaxKind::FOR_KW,
            ForeachKw => SyntaxKind::FOREACH_KW,
            GotoKw => SyntaxKind::GOTO_KW,
            IfKw => SyntaxKind::IF_KW,
            InKw => SyntaxKind::IN_KW,
            IsKw => SyntaxKind::IS_KW,
            LockKw => SyntaxKind::LOCK_KW,
            NullKw => SyntaxKind::NULL_KW,
            OutKw => SyntaxKind::OUT_KW,
            RefKw => SyntaxKind::REF_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            SizeofKw => SyntaxKind::SIZEOF_KW,
            StackallocKw => SyntaxKind::STACKALLOC_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            ThisKw => SyntaxKind::THIS_KW,
            ThrowKw => SyntaxKind::THROW_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TryKw => SyntaxKind::TRY_KW,
            TypeofKw => SyntaxKind::TYPEOF_KW,
            UncheckedKw => SyntaxKind::UNCHECKED_KW,
            VoidKw => SyntaxKind::VOID_KW,
            WhileKw => SyntaxKind::WHILE_KW,

            BoolKw => SyntaxKind::BOOL_KW,
            ByteKw => SyntaxKind::BYTE_KW,
            CharKw => SyntaxKind::CHAR_KW,
            DecimalKw => SyntaxKind::DECIMAL_KW,
            DoubleKw => SyntaxKind::DOUBLE_KW,
            FloatKw => SyntaxKind::FLOAT_KW,
            IntKw => SyntaxKind::INT_KW,
            LongKw => SyntaxKind::LONG_KW,
            ObjectKw => SyntaxKind::OBJECT_KW,
            SbyteKw => SyntaxKind::SBYTE_KW,
            ShortKw => SyntaxKind::SHORT_KW,
            StringKw => SyntaxKind::STRING_KW,
            UintKw => SyntaxKind::UINT_KW,
            UlongKw => SyntaxKind::ULONG_KW,
            UshortKw => SyntaxKind::USHORT_KW,
        }
    }
}
