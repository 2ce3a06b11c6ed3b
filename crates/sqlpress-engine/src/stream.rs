//! Token stream builder
//!
//! A [`TokenStream`] is the append-only, exclusively owned sequence a
//! statement formatter builds before rendering. Every builder call emits
//! exactly one token in call order; composite helpers (`literal`, `id_list`,
//! `statement`) expand to the obvious token sequences.
//!
//! Indent and alignment names are prefixed with a per-stream scope name, so a
//! nested statement merged into a parent can never collide with the parent's
//! registrations.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::dispatch::{AstNode, FormatEnv, formatter_for};
use crate::token::{Token, TokenKind};

static NEXT_STREAM_ID: AtomicU64 = AtomicU64::new(0);

/// Separator discipline for [`TokenStream::id_list`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSep {
    /// Plain list comma
    Comma,
    /// Expression comma
    ExprComma,
    /// No separator
    None,
}

/// A classified literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Integer(i64),
    Float(f64),
    /// Unquoted string content; quoting and escaping happen on emission
    String(String),
    /// Full byte-sequence literal text, e.g. `X'53514C'`
    Blob(String),
}

/// Ordered, append-only token sequence owned by one formatter instance
#[derive(Debug)]
pub struct TokenStream {
    scope: String,
    tokens: Vec<Token>,
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStream {
    pub fn new() -> Self {
        let id = NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed);
        TokenStream {
            scope: format!("statement_{id}"),
            tokens: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consume the stream, transferring token ownership to the caller
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Registry key for `name` inside this stream's scope
    fn scoped(&self, name: Option<&str>) -> String {
        match name {
            Some(n) => format!("{}_{}", self.scope, n),
            None => self.scope.clone(),
        }
    }

    pub fn keyword(&mut self, kw: &str) -> &mut Self {
        self.push(Token::text(TokenKind::Keyword, kw))
    }

    pub fn lined_up_keyword(&mut self, kw: &str, group: Option<&str>) -> &mut Self {
        let name = Some(self.scoped(group));
        self.push(Token::named(TokenKind::LinedUpKeyword, kw, name))
    }

    pub fn id(&mut self, id: &str) -> &mut Self {
        self.push(Token::text(TokenKind::Id, id))
    }

    pub fn operator(&mut self, oper: &str) -> &mut Self {
        self.push(Token::text(TokenKind::Operator, oper))
    }

    pub fn id_dot(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::IdDot, "."))
    }

    pub fn star(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::Star, "*"))
    }

    pub fn float(&mut self, value: f64) -> &mut Self {
        self.push(Token::text(TokenKind::Float, format!("{value}")))
    }

    pub fn integer(&mut self, value: i64) -> &mut Self {
        self.push(Token::text(TokenKind::Integer, format!("{value}")))
    }

    /// String literal; `value` is the raw content, quoted and escaped here
    pub fn string(&mut self, value: &str) -> &mut Self {
        let quoted = format!("'{}'", value.replace('\'', "''"));
        self.push(Token::text(TokenKind::String, quoted))
    }

    /// Byte-sequence literal; `value` is the full `X'..'` text
    pub fn blob(&mut self, value: &str) -> &mut Self {
        self.push(Token::text(TokenKind::Blob, value))
    }

    /// Bound parameter, e.g. `?`, `:name`, `$1`
    pub fn bind_param(&mut self, name: &str) -> &mut Self {
        self.push(Token::text(TokenKind::BindParam, name))
    }

    pub fn func_id(&mut self, func: &str) -> &mut Self {
        self.push(Token::text(TokenKind::FuncId, func))
    }

    pub fn data_type(&mut self, data_type: &str) -> &mut Self {
        self.push(Token::text(TokenKind::DataType, data_type))
    }

    /// Pre-rendered text the detokenizer emits untouched
    pub fn verbatim(&mut self, text: &str) -> &mut Self {
        self.push(Token::text(TokenKind::Verbatim, text))
    }

    pub fn par_def_left(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ParDefLeft, "("))
    }

    pub fn par_def_right(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ParDefRight, ")"))
    }

    pub fn par_expr_left(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ParExprLeft, "("))
    }

    pub fn par_expr_right(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ParExprRight, ")"))
    }

    pub fn par_func_left(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ParFuncLeft, "("))
    }

    pub fn par_func_right(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ParFuncRight, ")"))
    }

    pub fn semicolon(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::Semicolon, ";"))
    }

    pub fn list_comma(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ListComma, ","))
    }

    pub fn expr_comma(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::ExprComma, ","))
    }

    pub fn new_line(&mut self) -> &mut Self {
        self.push(Token::text(TokenKind::NewLine, "\n"))
    }

    /// Classify and emit a literal as its matching single token
    pub fn literal(&mut self, value: Literal) -> &mut Self {
        match value {
            Literal::Null => self.keyword("NULL"),
            Literal::Integer(v) => self.integer(v),
            Literal::Float(v) => self.float(v),
            Literal::String(v) => self.string(&v),
            Literal::Blob(v) => self.blob(&v),
        }
    }

    /// Emit an ordered identifier list with the given separator discipline,
    /// optionally inside a named indent scope
    pub fn id_list<I, S>(&mut self, names: I, indent_name: Option<&str>, sep: ListSep) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(name) = indent_name {
            self.mark_and_keep_indent(name);
        }
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                match sep {
                    ListSep::Comma => {
                        self.list_comma();
                    }
                    ListSep::ExprComma => {
                        self.expr_comma();
                    }
                    ListSep::None => {}
                }
            }
            self.id(name.as_ref());
        }
        if indent_name.is_some() {
            self.decr_indent();
        }
        self
    }

    /// Record the predicted column under `name`, recallable by
    /// [`TokenStream::incr_indent_to`]
    pub fn mark_indent(&mut self, name: &str) -> &mut Self {
        let scoped = self.scoped(Some(name));
        self.push(Token::named(TokenKind::IndentMarker, "", Some(scoped)))
    }

    /// Record the predicted column under `name` and push it as the active
    /// indent frame in one go
    pub fn mark_and_keep_indent(&mut self, name: &str) -> &mut Self {
        self.mark_indent(name);
        self.incr_indent_to(name)
    }

    /// Push an indent frame one step beyond the current one
    pub fn incr_indent(&mut self) -> &mut Self {
        self.push(Token::named(TokenKind::IncrIndent, "", None))
    }

    /// Push an indent frame at the column previously recorded under `name`
    pub fn incr_indent_to(&mut self, name: &str) -> &mut Self {
        let scoped = self.scoped(Some(name));
        self.push(Token::named(TokenKind::IncrIndent, "", Some(scoped)))
    }

    /// Pop the most recent indent frame; no-op at the root frame
    pub fn decr_indent(&mut self) -> &mut Self {
        self.push(Token::named(TokenKind::DecrIndent, "", None))
    }

    /// Contribute `keyword`'s width to its alignment group
    pub fn mark_line_up(&mut self, keyword: &str, group: Option<&str>) -> &mut Self {
        let token = Token {
            kind: TokenKind::MarkLineUp,
            text: String::new(),
            name: Some(self.scoped(group)),
            width: keyword.chars().count(),
        };
        self.push(token)
    }

    /// Resolve `node` through the factory, build it fully, and merge its
    /// tokens into this stream, optionally inside a named indent scope.
    /// Ownership of the child tokens moves here; an unrecognized node leaves
    /// the stream untouched.
    pub fn statement(
        &mut self,
        node: AstNode<'_>,
        indent_name: Option<&str>,
        env: FormatEnv,
    ) -> &mut Self {
        let Some(formatter) = formatter_for(Some(node), env) else {
            return self;
        };
        let mut child = TokenStream::new();
        formatter.build(&mut child);

        if let Some(name) = indent_name {
            self.mark_and_keep_indent(name);
        }
        let mut transferred = child.into_tokens();
        self.tokens.append(&mut transferred);
        if indent_name.is_some() {
            self.decr_indent();
        }
        self
    }
}
