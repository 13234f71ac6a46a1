//! Recursive descent parser for the C# subset
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: every byte of the
//! input, trivia included, ends up in exactly one token of the tree.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, GreenToken, NodeOrToken, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Drop for Parse {
    fn drop(&mut self) {
        release_tree(&mut self.green);
    }
}

/// Drop a green tree without recursing once per nesting level.
///
/// Long member-access chains nest one node per call, and the default drop
/// of such a tree recurses through every level.
pub(crate) fn release_tree(green: &mut GreenNode) {
    let empty = GreenNode::new(
        SyntaxKind::ERROR.into(),
        std::iter::empty::<NodeOrToken<GreenNode, GreenToken>>(),
    );
    let mut stack = vec![std::mem::replace(green, empty)];
    while let Some(node) = stack.pop() {
        stack.extend(
            node.children()
                .filter_map(|child| child.into_node())
                .map(|child| child.to_owned()),
        );
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse a C# compilation unit into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Tokens that may follow a `<...>` list for it to count as type arguments
/// in expression context (`Foo<int>.New()`, `Register<int>(...)`).
const TYPE_ARG_FOLLOW: &[SyntaxKind] = &[
    SyntaxKind::L_PAREN,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACK,
    SyntaxKind::R_BRACE,
    SyntaxKind::COLON,
    SyntaxKind::SEMICOLON,
    SyntaxKind::COMMA,
    SyntaxKind::DOT,
    SyntaxKind::QUESTION,
    SyntaxKind::EQ_EQ,
    SyntaxKind::BANG_EQ,
    SyntaxKind::PIPE,
    SyntaxKind::CARET,
    SyntaxKind::AMP_AMP,
    SyntaxKind::PIPE_PIPE,
    SyntaxKind::L_BRACK,
    SyntaxKind::EOF,
];

/// Keywords that start a statement the completers never look into.
const OPAQUE_STATEMENT_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::RETURN_KW,
    SyntaxKind::THROW_KW,
    SyntaxKind::BREAK_KW,
    SyntaxKind::CONTINUE_KW,
    SyntaxKind::GOTO_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::VOID_KW,
    SyntaxKind::STATIC_KW,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (all lookahead skips trivia)
    // =========================================================================

    /// Index into `tokens` of the n-th significant token from `pos`.
    fn nth_index(&self, n: usize) -> Option<usize> {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
            idx += 1;
        }
        None
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.nth_index(n)
            .map(|idx| self.tokens[idx].text)
            .unwrap_or("")
    }

    fn peek(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.peek())
    }

    /// At an identifier with the given text (contextual keyword).
    fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.nth_text(0) == text
    }

    fn at_eof(&self) -> bool {
        self.peek() == SyntaxKind::EOF
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Emit pending trivia, then the next significant token.
    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.peek()));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = match self.nth_index(0) {
            Some(idx) => {
                let token = &self.tokens[idx];
                TextRange::at(token.offset, TextSize::of(token.text))
            }
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            }
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node at the next significant token (leading trivia stays outside).
    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    /// Consume one balanced group starting at an opening delimiter.
    fn bump_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                SyntaxKind::EOF => {
                    self.error("unclosed delimiter");
                    return;
                }
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACK => depth += 1,
                SyntaxKind::R_BRACE | SyntaxKind::R_PAREN | SyntaxKind::R_BRACK => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
    }

    /// Consume tokens up to and including a `;` at depth 0, or through a
    /// `{ ... }` group at depth 0 (plus a trailing `;`).
    fn bump_until_member_end(&mut self) {
        loop {
            match self.peek() {
                SyntaxKind::EOF => {
                    self.error("unexpected end of file");
                    return;
                }
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    return;
                }
                SyntaxKind::R_BRACE => return,
                SyntaxKind::L_BRACE => {
                    self.bump_balanced();
                    if !self.at(SyntaxKind::EQ) {
                        self.eat(SyntaxKind::SEMICOLON);
                        return;
                    }
                }
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACK => self.bump_balanced(),
                _ => self.bump(),
            }
        }
    }

    // =========================================================================
    // Speculative scanning over significant tokens
    // =========================================================================

    /// If a type starts at significant offset `n`, return the offset after it.
    fn scan_type(&self, mut n: usize) -> Option<usize> {
        let kind = self.nth(n);
        if kind.is_predefined_type() || kind == SyntaxKind::VOID_KW {
            n += 1;
        } else if kind == SyntaxKind::IDENT {
            n += 1;
            if self.nth(n) == SyntaxKind::LT {
                n = self.scan_type_args(n)?;
            }
            while matches!(self.nth(n), SyntaxKind::DOT | SyntaxKind::COLON_COLON)
                && self.nth(n + 1) == SyntaxKind::IDENT
            {
                n += 2;
                if self.nth(n) == SyntaxKind::LT {
                    n = self.scan_type_args(n)?;
                }
            }
        } else if kind == SyntaxKind::L_PAREN {
            // tuple type
            n += 1;
            loop {
                n = self.scan_type(n)?;
                if self.nth(n) == SyntaxKind::IDENT {
                    n += 1;
                }
                match self.nth(n) {
                    SyntaxKind::COMMA => n += 1,
                    SyntaxKind::R_PAREN => {
                        n += 1;
                        break;
                    }
                    _ => return None,
                }
            }
        } else {
            return None;
        }
        loop {
            match self.nth(n) {
                SyntaxKind::QUESTION => n += 1,
                SyntaxKind::L_BRACK => {
                    let mut m = n + 1;
                    while self.nth(m) == SyntaxKind::COMMA {
                        m += 1;
                    }
                    if self.nth(m) != SyntaxKind::R_BRACK {
                        break;
                    }
                    n = m + 1;
                }
                _ => break,
            }
        }
        Some(n)
    }

    /// `n` is at `<`; return the offset after the matching `>`.
    fn scan_type_args(&self, mut n: usize) -> Option<usize> {
        n += 1;
        // unbound generic: List<>, Dictionary<,>
        while self.nth(n) == SyntaxKind::COMMA {
            n += 1;
        }
        if self.nth(n) == SyntaxKind::GT {
            return Some(n + 1);
        }
        loop {
            n = self.scan_type(n)?;
            match self.nth(n) {
                SyntaxKind::COMMA => n += 1,
                SyntaxKind::GT => return Some(n + 1),
                _ => return None,
            }
        }
    }

    /// At `IDENT <`: does the `<` open a type argument list?
    fn at_generic_name(&self) -> bool {
        if self.nth(1) != SyntaxKind::LT {
            return false;
        }
        match self.scan_type_args(1) {
            Some(after) => TYPE_ARG_FOLLOW.contains(&self.nth(after)),
            None => false,
        }
    }

    /// Offset of the `)` matching the `(` at significant offset `n`.
    fn scan_matching_paren(&self, mut n: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.nth(n) {
                SyntaxKind::EOF => return None,
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACK | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACK | SyntaxKind::R_BRACE => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(n);
                    }
                }
                _ => {}
            }
            n += 1;
        }
    }

    fn at_paren_lambda(&self) -> bool {
        self.scan_matching_paren(0)
            .is_some_and(|close| self.nth(close + 1) == SyntaxKind::FAT_ARROW)
    }

    /// `(Type) operand` - a parenthesised type followed by something that
    /// can start a unary expression.
    fn at_cast(&self) -> bool {
        let Some(after) = self.scan_type(1) else {
            return false;
        };
        if self.nth(after) != SyntaxKind::R_PAREN {
            return false;
        }
        let next = self.nth(after + 1);
        next == SyntaxKind::IDENT
            || next.is_literal()
            || next.is_predefined_type()
            || matches!(
                next,
                SyntaxKind::L_PAREN
                    | SyntaxKind::THIS_KW
                    | SyntaxKind::BASE_KW
                    | SyntaxKind::NEW_KW
                    | SyntaxKind::TYPEOF_KW
                    | SyntaxKind::DEFAULT_KW
                    | SyntaxKind::BANG
                    | SyntaxKind::TILDE
            )
    }

    // =========================================================================
    // Grammar rules - compilation unit
    // =========================================================================

    /// SourceFile = (UsingDirective | NamespaceDecl | TypeDecl)*
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        self.parse_namespace_members(false);
        self.skip_trivia();
        self.finish_node();
    }

    fn parse_namespace_members(&mut self, in_braces: bool) {
        loop {
            let pos_before = self.pos;
            match self.peek() {
                SyntaxKind::EOF => break,
                SyntaxKind::R_BRACE if in_braces => break,
                SyntaxKind::USING_KW => self.parse_using_directive(),
                SyntaxKind::IDENT
                    if self.nth_text(0) == "global" && self.nth(1) == SyntaxKind::USING_KW =>
                {
                    self.parse_using_directive()
                }
                SyntaxKind::NAMESPACE_KW => self.parse_namespace(),
                SyntaxKind::SEMICOLON => self.bump(),
                SyntaxKind::L_BRACK
                    if matches!(self.nth_text(1), "assembly" | "module")
                        && self.nth(2) == SyntaxKind::COLON =>
                {
                    self.parse_attribute_list()
                }
                _ => self.parse_member(None),
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("unexpected token: {:?}", self.peek()));
                self.start_node(SyntaxKind::ERROR);
                self.bump();
                self.finish_node();
            }
        }
    }

    /// UsingDirective = 'global'? 'using' 'static'? (Name '=')? QualifiedName ';'
    fn parse_using_directive(&mut self) {
        self.start_node(SyntaxKind::USING_DIRECTIVE);
        if self.at_contextual("global") {
            self.bump();
        }
        self.expect(SyntaxKind::USING_KW);
        self.eat(SyntaxKind::STATIC_KW);
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::EQ {
            self.parse_name();
            self.bump();
        }
        self.parse_qualified_name();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// NamespaceDecl = 'namespace' QualifiedName ('{' Member* '}' ';'? | ';' Member*)
    fn parse_namespace(&mut self) {
        self.start_node(SyntaxKind::NAMESPACE_DECL);
        self.bump();
        self.parse_qualified_name();
        if self.eat(SyntaxKind::SEMICOLON) {
            // file-scoped: the rest of the unit belongs to this namespace
            self.start_node(SyntaxKind::NAMESPACE_BODY);
            self.parse_namespace_members(false);
            self.finish_node();
        } else {
            self.start_node(SyntaxKind::NAMESPACE_BODY);
            self.expect(SyntaxKind::L_BRACE);
            self.parse_namespace_members(true);
            self.expect(SyntaxKind::R_BRACE);
            self.finish_node();
            self.eat(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }

    /// QualifiedName = Ident TypeArgs? (('.' | '::') Ident TypeArgs?)*
    fn parse_qualified_name(&mut self) {
        self.start_node(SyntaxKind::QUALIFIED_NAME);
        self.expect(SyntaxKind::IDENT);
        if self.at(SyntaxKind::LT) {
            self.parse_type_arg_list();
        }
        while self.at_any(&[SyntaxKind::DOT, SyntaxKind::COLON_COLON])
            && self.nth(1) == SyntaxKind::IDENT
        {
            self.bump();
            self.bump();
            if self.at(SyntaxKind::LT) {
                self.parse_type_arg_list();
            }
        }
        self.finish_node();
    }

    fn parse_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.expect(SyntaxKind::IDENT);
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - attributes and modifiers
    // =========================================================================

    /// AttributeList = '[' (Target ':')? Attribute (',' Attribute)* ','? ']'
    fn parse_attribute_list(&mut self) {
        self.start_node(SyntaxKind::ATTRIBUTE_LIST);
        self.bump();
        if (self.at(SyntaxKind::IDENT) || self.peek().is_keyword())
            && self.nth(1) == SyntaxKind::COLON
        {
            self.bump();
            self.bump();
        }
        while !self.at_any(&[SyntaxKind::R_BRACK, SyntaxKind::EOF]) {
            if !self.at(SyntaxKind::IDENT) {
                self.error_recover("expected attribute", &[SyntaxKind::R_BRACK]);
                break;
            }
            self.start_node(SyntaxKind::ATTRIBUTE);
            self.parse_qualified_name();
            if self.at(SyntaxKind::L_PAREN) {
                self.parse_arg_list();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACK);
        self.finish_node();
    }

    fn at_contextual_modifier(&self) -> bool {
        if self.peek() != SyntaxKind::IDENT {
            return false;
        }
        let next = self.nth(1);
        match self.nth_text(0) {
            "partial" => {
                matches!(
                    next,
                    SyntaxKind::CLASS_KW
                        | SyntaxKind::STRUCT_KW
                        | SyntaxKind::INTERFACE_KW
                        | SyntaxKind::VOID_KW
                ) || (next == SyntaxKind::IDENT && self.nth_text(1) == "record")
            }
            "async" | "required" | "file" => {
                next == SyntaxKind::IDENT || next.is_predefined_type() || next.is_modifier()
                    || matches!(next, SyntaxKind::VOID_KW | SyntaxKind::CLASS_KW)
            }
            _ => false,
        }
    }

    fn parse_modifiers(&mut self) {
        while self.peek().is_modifier() || self.at_contextual_modifier() {
            self.bump();
        }
    }

    // =========================================================================
    // Grammar rules - type declarations and members
    // =========================================================================

    /// Member = AttributeList* Modifier* (TypeDecl | Constructor | Method | Property | Field | ...)
    ///
    /// `enclosing` is the simple name of the containing type, or `None` at
    /// namespace level where only type declarations are legal.
    fn parse_member(&mut self, enclosing: Option<&str>) {
        let cp = self.checkpoint();
        while self.at(SyntaxKind::L_BRACK) {
            self.parse_attribute_list();
        }
        self.parse_modifiers();

        match self.peek() {
            SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW | SyntaxKind::INTERFACE_KW => {
                self.start_node_at(cp, SyntaxKind::CLASS_DECL);
                self.parse_class_rest();
                self.finish_node();
            }
            SyntaxKind::IDENT
                if self.nth_text(0) == "record"
                    && matches!(
                        self.nth(1),
                        SyntaxKind::IDENT | SyntaxKind::CLASS_KW | SyntaxKind::STRUCT_KW
                    ) =>
            {
                self.start_node_at(cp, SyntaxKind::CLASS_DECL);
                self.parse_class_rest();
                self.finish_node();
            }
            SyntaxKind::ENUM_KW
            | SyntaxKind::DELEGATE_KW
            | SyntaxKind::EVENT_KW
            | SyntaxKind::TILDE
            | SyntaxKind::IMPLICIT_KW
            | SyntaxKind::EXPLICIT_KW => {
                self.start_node_at(cp, SyntaxKind::OTHER_MEMBER);
                self.bump_until_member_end();
                self.finish_node();
            }
            _ => match enclosing {
                None => {
                    self.start_node_at(cp, SyntaxKind::ERROR);
                    self.error("expected type declaration");
                    self.bump_until_member_end();
                    self.finish_node();
                }
                Some(type_name) => self.parse_type_member(cp, type_name),
            },
        }
    }

    /// ClassRest = ('class' | 'struct' | 'interface' | 'record' ('class' | 'struct')?)
    ///             Name TypeParams? ParamList? BaseList? Constraints* (ClassBody | ';')
    fn parse_class_rest(&mut self) {
        if self.at_contextual("record") {
            self.bump();
            if !self.eat(SyntaxKind::CLASS_KW) {
                self.eat(SyntaxKind::STRUCT_KW);
            }
        } else {
            self.bump();
        }
        let name = self.nth_text(0).to_string();
        self.parse_name();
        if self.at(SyntaxKind::LT) {
            self.parse_type_param_list();
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list();
        }
        if self.at(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::BASE_LIST);
            self.bump();
            self.parse_type();
            if self.at(SyntaxKind::L_PAREN) {
                self.parse_arg_list();
            }
            while self.eat(SyntaxKind::COMMA) {
                self.parse_type();
            }
            self.finish_node();
        }
        self.parse_type_constraints();
        if self.eat(SyntaxKind::SEMICOLON) {
            return;
        }
        self.start_node(SyntaxKind::CLASS_BODY);
        if self.expect(SyntaxKind::L_BRACE) {
            loop {
                let pos_before = self.pos;
                if self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
                    break;
                }
                self.parse_member(Some(&name));
                if self.pos == pos_before {
                    self.error_recover("expected member declaration", &[SyntaxKind::R_BRACE]);
                }
            }
            self.expect(SyntaxKind::R_BRACE);
        }
        self.finish_node();
        self.eat(SyntaxKind::SEMICOLON);
    }

    /// TypeParamList = '<' TypeParam (',' TypeParam)* '>'
    fn parse_type_param_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAM_LIST);
        self.bump();
        loop {
            self.start_node(SyntaxKind::TYPE_PARAM);
            while self.at(SyntaxKind::L_BRACK) {
                self.parse_attribute_list();
            }
            // variance
            if self.at_any(&[SyntaxKind::IN_KW, SyntaxKind::OUT_KW]) {
                self.bump();
            }
            self.parse_name();
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    /// Constraints = ('where' Ident ':' ...)*
    fn parse_type_constraints(&mut self) {
        while self.at_contextual("where") {
            self.start_node(SyntaxKind::TYPE_CONSTRAINTS);
            self.bump();
            while !self.at_any(&[
                SyntaxKind::L_BRACE,
                SyntaxKind::SEMICOLON,
                SyntaxKind::FAT_ARROW,
                SyntaxKind::EOF,
            ]) && !self.at_contextual("where")
            {
                if self.at_any(&[SyntaxKind::L_PAREN, SyntaxKind::L_BRACK]) {
                    self.bump_balanced();
                } else {
                    self.bump();
                }
            }
            self.finish_node();
        }
    }

    /// Members inside a type body that are not themselves type declarations.
    fn parse_type_member(&mut self, cp: Checkpoint, type_name: &str) {
        // Constructor: Name '(' ...
        if self.at(SyntaxKind::IDENT)
            && self.nth_text(0) == type_name
            && self.nth(1) == SyntaxKind::L_PAREN
        {
            self.start_node_at(cp, SyntaxKind::CONSTRUCTOR_DECL);
            self.parse_name();
            self.parse_param_list();
            if self.at(SyntaxKind::COLON) {
                self.start_node(SyntaxKind::CONSTRUCTOR_INITIALIZER);
                self.bump();
                if !self.eat(SyntaxKind::BASE_KW) {
                    self.expect(SyntaxKind::THIS_KW);
                }
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
                self.finish_node();
            }
            self.parse_body();
            self.finish_node();
            return;
        }

        if self.scan_type(0).is_none() {
            self.start_node_at(cp, SyntaxKind::ERROR);
            self.error(format!("expected member declaration, found {:?}", self.peek()));
            self.bump_until_member_end();
            self.finish_node();
            return;
        }
        self.parse_type();

        match self.peek() {
            SyntaxKind::OPERATOR_KW | SyntaxKind::THIS_KW => {
                self.start_node_at(cp, SyntaxKind::OTHER_MEMBER);
                self.bump_until_member_end();
                self.finish_node();
            }
            SyntaxKind::IDENT => {
                // Name, possibly an explicit interface implementation `IFoo.Bar`
                let is_method = {
                    let mut n = 1;
                    while self.nth(n) == SyntaxKind::DOT && self.nth(n + 1) == SyntaxKind::IDENT {
                        n += 2;
                    }
                    matches!(self.nth(n), SyntaxKind::L_PAREN | SyntaxKind::LT)
                };
                let is_property = {
                    let mut n = 1;
                    while self.nth(n) == SyntaxKind::DOT && self.nth(n + 1) == SyntaxKind::IDENT {
                        n += 2;
                    }
                    matches!(self.nth(n), SyntaxKind::L_BRACE | SyntaxKind::FAT_ARROW)
                };
                if is_method {
                    self.start_node_at(cp, SyntaxKind::METHOD_DECL);
                    self.parse_member_name();
                    if self.at(SyntaxKind::LT) {
                        self.parse_type_param_list();
                    }
                    self.parse_param_list();
                    self.parse_type_constraints();
                    self.parse_body();
                    self.finish_node();
                } else if is_property {
                    self.start_node_at(cp, SyntaxKind::PROPERTY_DECL);
                    self.parse_member_name();
                    self.parse_property_rest();
                    self.finish_node();
                } else {
                    self.start_node_at(cp, SyntaxKind::FIELD_DECL);
                    self.parse_variable_declarators();
                    self.expect(SyntaxKind::SEMICOLON);
                    self.finish_node();
                }
            }
            _ => {
                self.start_node_at(cp, SyntaxKind::ERROR);
                self.error(format!("expected member name, found {:?}", self.peek()));
                self.bump_until_member_end();
                self.finish_node();
            }
        }
    }

    fn parse_member_name(&mut self) {
        self.start_node(SyntaxKind::NAME);
        self.expect(SyntaxKind::IDENT);
        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.bump();
            self.bump();
        }
        self.finish_node();
    }

    /// Body = Block | '=>' Expr ';' | ';'
    fn parse_body(&mut self) {
        match self.peek() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::FAT_ARROW => {
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
            }
            _ => {
                self.expect(SyntaxKind::SEMICOLON);
            }
        }
    }

    /// PropertyRest = (AccessorList ('=' Expr ';')? | '=>' Expr ';')
    fn parse_property_rest(&mut self) {
        if self.eat(SyntaxKind::FAT_ARROW) {
            self.parse_expr();
            self.expect(SyntaxKind::SEMICOLON);
            return;
        }
        self.start_node(SyntaxKind::ACCESSOR_LIST);
        self.bump();
        while !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            let pos_before = self.pos;
            self.start_node(SyntaxKind::ACCESSOR);
            while self.at(SyntaxKind::L_BRACK) {
                self.parse_attribute_list();
            }
            self.parse_modifiers();
            if self.at(SyntaxKind::IDENT) {
                self.bump();
                self.parse_body();
            } else {
                self.error_recover("expected accessor", &[SyntaxKind::R_BRACE]);
            }
            self.finish_node();
            if self.pos == pos_before {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
        if self.eat(SyntaxKind::EQ) {
            self.parse_expr();
            self.expect(SyntaxKind::SEMICOLON);
        }
    }

    /// VariableDeclarators = Declarator (',' Declarator)*
    fn parse_variable_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VARIABLE_DECLARATOR);
            self.parse_name();
            if self.eat(SyntaxKind::EQ) {
                self.parse_expr();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    /// ParamList = '(' (Param (',' Param)*)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.expect(SyntaxKind::L_PAREN);
        while !self.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::EOF]) {
            self.start_node(SyntaxKind::PARAM);
            while self.at(SyntaxKind::L_BRACK) {
                self.parse_attribute_list();
            }
            while self.at_any(&[
                SyntaxKind::THIS_KW,
                SyntaxKind::REF_KW,
                SyntaxKind::OUT_KW,
                SyntaxKind::IN_KW,
                SyntaxKind::PARAMS_KW,
            ]) {
                self.bump();
            }
            self.parse_type();
            if self.at(SyntaxKind::IDENT) {
                self.parse_name();
            } else {
                self.error("expected parameter name");
            }
            if self.eat(SyntaxKind::EQ) {
                self.parse_expr();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - types
    // =========================================================================

    /// Type = (Predefined | 'void' | QualifiedGenericName | TupleType) ('?' | '[' ','* ']' | '*')*
    fn parse_type(&mut self) {
        self.start_node(SyntaxKind::TYPE);
        let kind = self.peek();
        if kind.is_predefined_type() || kind == SyntaxKind::VOID_KW {
            self.bump();
        } else if kind == SyntaxKind::IDENT {
            self.bump();
            if self.at(SyntaxKind::LT) {
                self.parse_type_arg_list();
            }
            while self.at_any(&[SyntaxKind::DOT, SyntaxKind::COLON_COLON])
                && self.nth(1) == SyntaxKind::IDENT
            {
                self.bump();
                self.bump();
                if self.at(SyntaxKind::LT) {
                    self.parse_type_arg_list();
                }
            }
        } else if kind == SyntaxKind::L_PAREN {
            self.bump();
            loop {
                self.parse_type();
                if self.at(SyntaxKind::IDENT) {
                    self.parse_name();
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        } else {
            self.error(format!("expected type, found {:?}", kind));
        }
        loop {
            match self.peek() {
                SyntaxKind::QUESTION | SyntaxKind::STAR => self.bump(),
                SyntaxKind::L_BRACK
                    if matches!(self.nth(1), SyntaxKind::R_BRACK | SyntaxKind::COMMA) =>
                {
                    self.bump();
                    while self.eat(SyntaxKind::COMMA) {}
                    self.expect(SyntaxKind::R_BRACK);
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    /// TypeArgList = '<' (Type (',' Type)*)? '>'
    fn parse_type_arg_list(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARG_LIST);
        self.bump();
        if self.at_any(&[SyntaxKind::GT, SyntaxKind::COMMA]) {
            while self.eat(SyntaxKind::COMMA) {}
        } else {
            loop {
                self.parse_type();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - statements
    // =========================================================================

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before {
                self.error_recover("expected statement", &[SyntaxKind::R_BRACE]);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.peek() {
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::SEMICOLON => {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IF_KW
            | SyntaxKind::WHILE_KW
            | SyntaxKind::FOR_KW
            | SyntaxKind::FOREACH_KW
            | SyntaxKind::LOCK_KW
            | SyntaxKind::FIXED_KW
            | SyntaxKind::SWITCH_KW => {
                let is_switch = self.at(SyntaxKind::SWITCH_KW);
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.bump_balanced();
                } else {
                    self.error("expected '('");
                }
                if is_switch {
                    self.parse_switch_body();
                } else {
                    self.parse_statement();
                }
                if self.eat(SyntaxKind::ELSE_KW) {
                    self.parse_statement();
                }
                self.finish_node();
            }
            SyntaxKind::DO_KW => {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                self.parse_statement();
                self.expect(SyntaxKind::WHILE_KW);
                if self.at(SyntaxKind::L_PAREN) {
                    self.bump_balanced();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::TRY_KW => {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                self.parse_block();
                while self.eat(SyntaxKind::CATCH_KW) {
                    if self.at(SyntaxKind::L_PAREN) {
                        self.bump_balanced();
                    }
                    if self.at_contextual("when") {
                        self.bump();
                        if self.at(SyntaxKind::L_PAREN) {
                            self.bump_balanced();
                        }
                    }
                    self.parse_block();
                }
                if self.eat(SyntaxKind::FINALLY_KW) {
                    self.parse_block();
                }
                self.finish_node();
            }
            SyntaxKind::CHECKED_KW | SyntaxKind::UNCHECKED_KW | SyntaxKind::UNSAFE_KW
                if self.nth(1) == SyntaxKind::L_BRACE =>
            {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                self.parse_block();
                self.finish_node();
            }
            SyntaxKind::USING_KW => {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.bump_balanced();
                    self.parse_statement();
                } else {
                    self.bump_until_statement_end();
                }
                self.finish_node();
            }
            kind if OPAQUE_STATEMENT_KEYWORDS.contains(&kind) => {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump_until_statement_end();
                self.finish_node();
            }
            SyntaxKind::IDENT
                if self.nth_text(0) == "yield"
                    && matches!(self.nth(1), SyntaxKind::RETURN_KW | SyntaxKind::BREAK_KW) =>
            {
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump_until_statement_end();
                self.finish_node();
            }
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::COLON => {
                // label
                self.start_node(SyntaxKind::OTHER_STMT);
                self.bump();
                self.bump();
                self.finish_node();
            }
            _ => self.parse_expr_or_declaration_statement(),
        }
    }

    fn parse_switch_body(&mut self) {
        // switch sections hold `case x:` labels that are not statements
        self.start_node(SyntaxKind::BLOCK);
        if self.at(SyntaxKind::L_BRACE) {
            self.bump_balanced();
        } else {
            self.error("expected '{'");
        }
        self.finish_node();
    }

    /// Consume up to and including `;` at depth 0. Braces are skipped as
    /// groups, so lambdas and initializers inside the statement are fine.
    fn bump_until_statement_end(&mut self) {
        loop {
            match self.peek() {
                SyntaxKind::EOF => {
                    self.error("expected ';'");
                    return;
                }
                SyntaxKind::SEMICOLON => {
                    self.bump();
                    return;
                }
                SyntaxKind::R_BRACE => {
                    self.error("expected ';'");
                    return;
                }
                SyntaxKind::L_BRACE | SyntaxKind::L_PAREN | SyntaxKind::L_BRACK => {
                    let opened_block = self.at(SyntaxKind::L_BRACE);
                    self.bump_balanced();
                    // local function bodies end without `;`
                    if opened_block && !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::DOT])
                        && !self.peek().is_binary_op()
                        && !self.at(SyntaxKind::COMMA)
                        && !self.at(SyntaxKind::R_PAREN)
                    {
                        return;
                    }
                }
                _ => self.bump(),
            }
        }
    }

    /// ExprStmt = Expr ';' ; anything else starting like an expression
    /// (local declarations, `await x;`) becomes an opaque statement.
    fn parse_expr_or_declaration_statement(&mut self) {
        let cp = self.checkpoint();
        self.parse_expr();
        if self.at(SyntaxKind::SEMICOLON) {
            self.start_node_at(cp, SyntaxKind::EXPR_STMT);
            self.bump();
            self.finish_node();
        } else if self.at(SyntaxKind::IDENT) {
            self.start_node_at(cp, SyntaxKind::OTHER_STMT);
            self.bump_until_statement_end();
            self.finish_node();
        } else {
            self.start_node_at(cp, SyntaxKind::OTHER_STMT);
            self.error(format!("expected ';', found {:?}", self.peek()));
            if !self.at_any(&[SyntaxKind::R_BRACE, SyntaxKind::EOF]) {
                self.bump_until_statement_end();
            }
            self.finish_node();
        }
    }

    // =========================================================================
    // Grammar rules - expressions
    // =========================================================================

    /// Expr = Binary ('?' Expr ':' Expr | AssignOp Expr)?
    fn parse_expr(&mut self) {
        let cp = self.checkpoint();
        self.parse_binary();
        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(cp, SyntaxKind::COND_EXPR);
            self.bump();
            self.parse_expr();
            self.expect(SyntaxKind::COLON);
            self.parse_expr();
            self.finish_node();
        } else if self.peek().is_assignment_op() || self.at_shift_assign() {
            self.start_node_at(cp, SyntaxKind::ASSIGN_EXPR);
            if self.at_shift_assign() {
                self.bump();
            }
            self.bump();
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_initializer();
            } else {
                self.parse_expr();
            }
            self.finish_node();
        }
    }

    /// `>>=` arrives as `>` `>=` since generic closers never fuse.
    fn at_shift_assign(&self) -> bool {
        self.at(SyntaxKind::GT) && self.nth(1) == SyntaxKind::GT_EQ
    }

    /// Binary = Unary (BinOp Unary)*, flat and left-associative.
    fn parse_binary(&mut self) {
        let cp = self.checkpoint();
        self.parse_unary();
        while self.peek().is_binary_op() && !self.at_shift_assign() {
            self.start_node_at(cp, SyntaxKind::BIN_EXPR);
            let op = self.peek();
            self.bump();
            match op {
                SyntaxKind::IS_KW => self.parse_pattern(),
                SyntaxKind::AS_KW => self.parse_type(),
                _ => {
                    // `>>` arrives as two `>` tokens
                    if op == SyntaxKind::GT && self.at(SyntaxKind::GT) {
                        self.bump();
                    }
                    self.parse_unary();
                }
            }
            self.finish_node();
        }
    }

    /// Pattern = 'not'* (Literal | '{' ... '}' | Type Name? ('{' ... '}')?) (('and' | 'or') Pattern)*
    fn parse_pattern(&mut self) {
        while self.at_contextual("not") {
            self.bump();
        }
        if self.peek().is_literal() {
            self.start_node(SyntaxKind::LITERAL);
            self.bump();
            self.finish_node();
        } else if self.at(SyntaxKind::L_BRACE) {
            self.bump_balanced();
        } else {
            self.parse_type();
            if self.at(SyntaxKind::L_BRACE) {
                self.bump_balanced();
            }
            if self.at(SyntaxKind::IDENT) && !self.at_contextual("and") && !self.at_contextual("or")
            {
                self.parse_name();
            }
        }
        if self.at_contextual("and") || self.at_contextual("or") {
            self.bump();
            self.parse_pattern();
        }
    }

    fn parse_unary(&mut self) {
        match self.peek() {
            SyntaxKind::MINUS
            | SyntaxKind::PLUS
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS
            | SyntaxKind::AMP
            | SyntaxKind::STAR => {
                self.start_node(SyntaxKind::PREFIX_EXPR);
                self.bump();
                self.parse_unary();
                self.finish_node();
            }
            SyntaxKind::L_PAREN if !self.at_paren_lambda() && self.at_cast() => {
                self.start_node(SyntaxKind::CAST_EXPR);
                self.bump();
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.parse_unary();
                self.finish_node();
            }
            _ => self.parse_postfix(),
        }
    }

    /// Postfix = Primary ('.' NameRef | '?.' NameRef | ArgList | '[' Args ']' | '++' | '--' | '!')*
    fn parse_postfix(&mut self) {
        let cp = self.checkpoint();
        if !self.parse_primary() {
            return;
        }
        loop {
            match self.peek() {
                SyntaxKind::DOT => {
                    self.start_node_at(cp, SyntaxKind::MEMBER_EXPR);
                    self.bump();
                    self.parse_name_ref();
                    self.finish_node();
                }
                SyntaxKind::QUESTION if self.nth(1) == SyntaxKind::DOT => {
                    self.start_node_at(cp, SyntaxKind::MEMBER_EXPR);
                    self.bump();
                    self.bump();
                    self.parse_name_ref();
                    self.finish_node();
                }
                SyntaxKind::L_PAREN => {
                    self.start_node_at(cp, SyntaxKind::CALL_EXPR);
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::L_BRACK => {
                    self.start_node_at(cp, SyntaxKind::INDEX_EXPR);
                    self.start_node(SyntaxKind::ARG_LIST);
                    self.bump();
                    self.parse_args_until(SyntaxKind::R_BRACK);
                    self.expect(SyntaxKind::R_BRACK);
                    self.finish_node();
                    self.finish_node();
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS | SyntaxKind::BANG => {
                    self.start_node_at(cp, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// Returns false when no expression could start here (error reported).
    fn parse_primary(&mut self) -> bool {
        let kind = self.peek();
        match kind {
            k if k.is_literal() => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::FAT_ARROW => {
                self.start_node(SyntaxKind::LAMBDA_EXPR);
                self.parse_name();
                self.parse_lambda_body();
                self.finish_node();
            }
            SyntaxKind::IDENT => self.parse_name_ref(),
            k if k.is_predefined_type() => {
                // `string.Empty`, `int.Parse(...)`
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::THIS_KW => {
                self.start_node(SyntaxKind::THIS_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::BASE_KW => {
                self.start_node(SyntaxKind::BASE_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_PAREN if self.at_paren_lambda() => {
                self.start_node(SyntaxKind::LAMBDA_EXPR);
                self.start_node(SyntaxKind::PARAM_LIST);
                self.bump_balanced();
                self.finish_node();
                self.parse_lambda_body();
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.parse_expr();
                // tuple literal
                while self.eat(SyntaxKind::COMMA) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::NEW_KW => self.parse_new_expr(),
            SyntaxKind::TYPEOF_KW | SyntaxKind::SIZEOF_KW => {
                self.start_node(SyntaxKind::TYPEOF_EXPR);
                self.bump();
                self.expect(SyntaxKind::L_PAREN);
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::DEFAULT_KW => {
                if self.nth(1) == SyntaxKind::L_PAREN {
                    self.start_node(SyntaxKind::TYPEOF_EXPR);
                    self.bump();
                    self.bump();
                    self.parse_type();
                    self.expect(SyntaxKind::R_PAREN);
                } else {
                    self.start_node(SyntaxKind::LITERAL);
                    self.bump();
                }
                self.finish_node();
            }
            SyntaxKind::L_BRACE => self.parse_initializer(),
            SyntaxKind::THROW_KW => {
                self.start_node(SyntaxKind::PREFIX_EXPR);
                self.bump();
                self.parse_expr();
                self.finish_node();
            }
            SyntaxKind::DELEGATE_KW => {
                self.start_node(SyntaxKind::LAMBDA_EXPR);
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.start_node(SyntaxKind::PARAM_LIST);
                    self.bump_balanced();
                    self.finish_node();
                }
                self.parse_block();
                self.finish_node();
            }
            SyntaxKind::SEMICOLON
            | SyntaxKind::R_PAREN
            | SyntaxKind::R_BRACE
            | SyntaxKind::R_BRACK
            | SyntaxKind::COMMA
            | SyntaxKind::EOF => {
                self.error(format!("expected expression, found {:?}", kind));
                return false;
            }
            _ => {
                self.error(format!("expected expression, found {:?}", kind));
                self.start_node(SyntaxKind::ERROR);
                self.bump();
                self.finish_node();
                return false;
            }
        }
        true
    }

    /// NameRef = Ident TypeArgList?
    fn parse_name_ref(&mut self) {
        self.start_node(SyntaxKind::NAME_REF);
        if self.at(SyntaxKind::IDENT) {
            let generic = self.at_generic_name();
            self.bump();
            if generic {
                self.parse_type_arg_list();
            }
        } else {
            self.error(format!("expected identifier, found {:?}", self.peek()));
        }
        self.finish_node();
    }

    fn parse_lambda_body(&mut self) {
        self.expect(SyntaxKind::FAT_ARROW);
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.parse_expr();
        }
    }

    /// NewExpr = 'new' (Type | '[' ']')? ('[' Args ']')? ArgList? Initializer?
    fn parse_new_expr(&mut self) {
        self.start_node(SyntaxKind::NEW_EXPR);
        self.bump();
        match self.peek() {
            SyntaxKind::L_BRACK => {
                // implicitly typed array `new[] { ... }`
                self.bump_balanced();
            }
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACE => {}
            _ => {
                self.parse_type();
                if self.at(SyntaxKind::L_BRACK) {
                    self.start_node(SyntaxKind::ARG_LIST);
                    self.bump();
                    self.parse_args_until(SyntaxKind::R_BRACK);
                    self.expect(SyntaxKind::R_BRACK);
                    self.finish_node();
                }
            }
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_initializer();
        }
        self.finish_node();
    }

    /// Initializer = '{' ... '}' (object, collection or array initializer)
    fn parse_initializer(&mut self) {
        self.start_node(SyntaxKind::INITIALIZER);
        self.bump_balanced();
        self.finish_node();
    }

    /// ArgList = '(' (Arg (',' Arg)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        self.parse_args_until(SyntaxKind::R_PAREN);
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    fn parse_args_until(&mut self, close: SyntaxKind) {
        if self.at(close) {
            return;
        }
        loop {
            self.parse_arg();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    /// Arg = (Ident ':')? ('ref' | 'out' | 'in')? (DeclExpr | Expr)
    fn parse_arg(&mut self) {
        self.start_node(SyntaxKind::ARG);
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::COLON {
            self.parse_name();
            self.bump();
        }
        let modified = self.at_any(&[SyntaxKind::REF_KW, SyntaxKind::OUT_KW, SyntaxKind::IN_KW]);
        if modified {
            self.bump();
        }
        let declares = modified
            && self
                .scan_type(0)
                .is_some_and(|after| self.nth(after) == SyntaxKind::IDENT);
        if declares {
            // `out var x`, `out int x`
            self.start_node(SyntaxKind::DECL_EXPR);
            self.parse_type();
            self.parse_name();
            self.finish_node();
        } else {
            self.parse_expr();
        }
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_parses() {
        let parse = parse("");
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::SOURCE_FILE);
    }

    #[test]
    fn test_tree_is_lossless() {
        let input = "using System;\n// c\nnamespace A.B {\n  partial class Foo { static Foo() { X<int>.New(); } }\n}\n";
        let parse = parse(input);
        assert!(parse.ok(), "{:?}", parse.errors);
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_error_is_reported_with_range() {
        let parse = parse("namespace A { class { } }");
        assert!(!parse.ok());
        assert!(parse.errors[0].message.contains("IDENT"));
    }
}
