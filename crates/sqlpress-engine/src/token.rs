//! Formatting intermediate representation
//!
//! A token is either emittable text content or a meta-instruction that only
//! mutates render state (indentation, keyword alignment). Meta tokens never
//! produce visible output and are excluded from adjacency tracking.

/// Closed set of token kinds the detokenizer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    /// Keyword padded so its trailing edge lands on its alignment group column
    LinedUpKeyword,
    Id,
    Operator,
    IdDot,
    Star,
    Float,
    Integer,
    String,
    Blob,
    BindParam,
    FuncId,
    DataType,
    /// Pre-rendered text emitted as-is; escape hatch for AST nodes the
    /// statement formatters do not decompose
    Verbatim,
    ParDefLeft,
    ParDefRight,
    ParExprLeft,
    ParExprRight,
    ParFuncLeft,
    ParFuncRight,
    Semicolon,
    ListComma,
    ExprComma,
    NewLine,
    /// Record the predicted column under a name
    IndentMarker,
    /// Push an indent frame: one step, or a recalled named column
    IncrIndent,
    /// Pop the most recent indent frame
    DecrIndent,
    /// Record an alignment-group width contribution
    MarkLineUp,
}

impl TokenKind {
    /// Word-like adjacency category: two consecutive tokens of this category
    /// need a separating space
    pub fn expects_space(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword
                | TokenKind::LinedUpKeyword
                | TokenKind::Id
                | TokenKind::Star
                | TokenKind::Float
                | TokenKind::Integer
                | TokenKind::String
                | TokenKind::Blob
                | TokenKind::BindParam
                | TokenKind::FuncId
                | TokenKind::DataType
                | TokenKind::Verbatim
        )
    }

    /// Meta-instructions mutate render state without emitting text
    pub fn is_meta(self) -> bool {
        matches!(
            self,
            TokenKind::IndentMarker
                | TokenKind::IncrIndent
                | TokenKind::DecrIndent
                | TokenKind::MarkLineUp
        )
    }
}

/// One unit of the formatting intermediate representation
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Emittable text; empty for meta tokens
    pub text: String,
    /// Registry key: alignment group or named indent, already scope-prefixed
    pub name: Option<String>,
    /// Keyword width contributed by a `MarkLineUp` token
    pub width: usize,
}

impl Token {
    pub(crate) fn text(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            name: None,
            width: 0,
        }
    }

    pub(crate) fn named(kind: TokenKind, text: impl Into<String>, name: Option<String>) -> Self {
        Token {
            kind,
            text: text.into(),
            name,
            width: 0,
        }
    }
}
