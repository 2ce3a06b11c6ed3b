//! Detokenizer - single-pass render engine
//!
//! Converts a finished token stream into formatted text in one forward pass,
//! consulting the style configuration for every decision. Because there is no
//! backtracking, named indents and alignment widths are resolved through the
//! lookahead predictor at the position of their meta-instruction, before the
//! tokens that will occupy those columns are rendered.

use std::collections::HashMap;

use sqlpress_core::NameWrapper;

use crate::config::FormatterConfig;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

/// Render `stream` into final text under `config`, quoting identifiers with
/// `wrapper`. Lines are joined with `\n`; the last partial line is flushed.
pub fn detokenize(stream: &TokenStream, config: &FormatterConfig, wrapper: NameWrapper) -> String {
    Detokenizer::new(stream.tokens(), config, wrapper).run()
}

struct Detokenizer<'a> {
    tokens: &'a [Token],
    config: &'a FormatterConfig,
    wrapper: NameWrapper,
    line: String,
    lines: Vec<String>,
    /// Indent stack; the bottom frame (0) is never removed
    indents: Vec<usize>,
    /// Named indent registry, filled by the predictor at marker positions
    named_indents: HashMap<String, usize>,
    /// Alignment group -> required width, monotonically increasing
    line_up: HashMap<String, usize>,
    /// Last emitted non-meta token kind, for adjacency decisions
    last_real: Option<TokenKind>,
}

impl<'a> Detokenizer<'a> {
    fn new(tokens: &'a [Token], config: &'a FormatterConfig, wrapper: NameWrapper) -> Self {
        Detokenizer {
            tokens,
            config,
            wrapper,
            line: String::new(),
            lines: Vec::new(),
            indents: vec![0],
            named_indents: HashMap::new(),
            line_up: HashMap::new(),
            last_real: None,
        }
    }

    fn run(mut self) -> String {
        for idx in 0..self.tokens.len() {
            let token = &self.tokens[idx];
            self.apply_space(token.kind);
            match token.kind {
                TokenKind::Keyword => {
                    self.apply_indent();
                    let kw = self.fold_keyword(&token.text);
                    self.line.push_str(&kw);
                }
                TokenKind::LinedUpKeyword => {
                    let target = token
                        .name
                        .as_deref()
                        .and_then(|g| self.line_up.get(g))
                        .copied()
                        .unwrap_or(0);
                    let end = self.line_width() + token.text.chars().count();
                    for _ in end..target {
                        self.line.push(' ');
                    }
                    let kw = self.fold_keyword(&token.text);
                    self.line.push_str(&kw);
                }
                TokenKind::Id | TokenKind::FuncId | TokenKind::DataType => {
                    self.apply_indent();
                    let wrapped = if self.config.always_wrap_names {
                        self.wrapper.wrap(&token.text)
                    } else {
                        self.wrapper.wrap_if_needed(&token.text)
                    };
                    self.line.push_str(&wrapped);
                }
                TokenKind::Star
                | TokenKind::Float
                | TokenKind::Integer
                | TokenKind::String
                | TokenKind::Blob
                | TokenKind::BindParam
                | TokenKind::Verbatim => {
                    self.apply_indent();
                    self.line.push_str(&token.text);
                }
                TokenKind::Operator => {
                    let space_added = self.ends_with_space() || self.apply_indent();
                    if self.config.space_before_operator && !space_added {
                        self.line.push(' ');
                    }
                    self.line.push_str(&token.text);
                    if self.config.space_after_operator {
                        self.line.push(' ');
                    }
                }
                TokenKind::IdDot => {
                    let space_added = self.ends_with_space() || self.apply_indent();
                    if self.config.space_before_dot && !space_added {
                        self.line.push(' ');
                    }
                    self.line.push_str(&token.text);
                    if self.config.space_after_dot {
                        self.line.push(' ');
                    }
                }
                TokenKind::ParDefLeft => {
                    self.left_par(
                        &token.text,
                        self.config.space_before_open_par,
                        self.config.space_after_open_par,
                        self.config.nl_before_open_par_def,
                        self.config.nl_after_open_par_def,
                    );
                }
                TokenKind::ParDefRight => {
                    self.right_par(
                        &token.text,
                        self.config.space_before_close_par,
                        self.config.space_after_close_par,
                        self.config.nl_before_close_par_def,
                        self.config.nl_after_close_par_def,
                    );
                }
                TokenKind::ParExprLeft => {
                    self.left_par(
                        &token.text,
                        self.config.space_before_open_par,
                        self.config.space_after_open_par,
                        self.config.nl_before_open_par_expr,
                        self.config.nl_after_open_par_expr,
                    );
                }
                TokenKind::ParExprRight => {
                    self.right_par(
                        &token.text,
                        self.config.space_before_close_par,
                        self.config.space_after_close_par,
                        self.config.nl_before_close_par_expr,
                        self.config.nl_after_close_par_expr,
                    );
                }
                TokenKind::ParFuncLeft => {
                    let space_before = self.config.space_before_open_par
                        && !self.config.no_space_after_function_name;
                    self.left_par(
                        &token.text,
                        space_before,
                        self.config.space_after_open_par,
                        self.config.nl_before_open_par_expr,
                        self.config.nl_after_open_par_expr,
                    );
                }
                TokenKind::ParFuncRight => {
                    self.right_par(
                        &token.text,
                        self.config.space_before_close_par,
                        self.config.space_after_close_par,
                        self.config.nl_before_close_par_expr,
                        self.config.nl_after_close_par_expr,
                    );
                }
                TokenKind::Semicolon => {
                    if self.config.never_space_before_semicolon {
                        while self.line.ends_with(' ') {
                            self.line.pop();
                        }
                    }
                    let space_added = self.ends_with_space() || self.apply_indent();
                    if self.config.space_before_operator
                        && !self.config.never_space_before_semicolon
                        && !space_added
                    {
                        self.line.push(' ');
                    }
                    self.line.push_str(&token.text);
                    if self.config.nl_after_semicolon {
                        self.new_line();
                    } else if self.config.space_after_operator {
                        self.line.push(' ');
                    }
                }
                TokenKind::ListComma => {
                    if !self.config.space_before_comma_in_list {
                        while self.line.ends_with(' ') {
                            self.line.pop();
                        }
                    }
                    let space_added = self.ends_with_space() || self.apply_indent();
                    if self.config.space_before_comma_in_list && !space_added {
                        self.line.push(' ');
                    }
                    self.line.push_str(&token.text);
                    if self.config.nl_after_comma {
                        self.new_line();
                    } else if self.config.space_after_comma_in_list {
                        self.line.push(' ');
                    }
                }
                TokenKind::ExprComma => {
                    if !self.config.space_before_comma_in_list {
                        while self.line.ends_with(' ') {
                            self.line.pop();
                        }
                    }
                    let space_added = self.ends_with_space() || self.apply_indent();
                    if self.config.space_before_comma_in_list && !space_added {
                        self.line.push(' ');
                    }
                    self.line.push_str(&token.text);
                    if self.config.nl_after_comma_in_expr {
                        self.new_line();
                    } else if self.config.space_after_comma_in_list {
                        self.line.push(' ');
                    }
                }
                TokenKind::NewLine => {
                    // The active indent frame deliberately survives the break;
                    // later content resumes at whatever frame is current.
                    self.new_line();
                }
                TokenKind::IndentMarker => {
                    if let Some(name) = &token.name {
                        let column = self.predict_column(idx);
                        self.named_indents.insert(name.clone(), column);
                    }
                }
                TokenKind::IncrIndent => match &token.name {
                    Some(name) => self.incr_indent_to(name),
                    None => self.incr_indent(),
                },
                TokenKind::DecrIndent => {
                    self.decr_indent();
                }
                TokenKind::MarkLineUp => {
                    if let Some(name) = &token.name {
                        let width = self.predict_column(idx) + token.width;
                        let entry = self.line_up.entry(name.clone()).or_insert(0);
                        if width > *entry {
                            *entry = width;
                        }
                    }
                }
            }
            if !token.kind.is_meta() {
                self.last_real = Some(token.kind);
            }
        }
        self.new_line();
        self.lines.join("\n")
    }

    fn line_width(&self) -> usize {
        self.line.chars().count()
    }

    fn indent_target(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    /// Pad the line up to the active indent target; returns whether padding
    /// was added
    fn apply_indent(&mut self) -> bool {
        let target = self.indent_target();
        let width = self.line_width();
        if target <= width {
            return false;
        }
        for _ in width..target {
            self.line.push(' ');
        }
        true
    }

    /// Separating space between two adjacent word-like tokens
    fn apply_space(&mut self, kind: TokenKind) {
        if let Some(last) = self.last_real
            && kind.expects_space()
            && last.expects_space()
            && !self.ends_with_space()
        {
            self.line.push(' ');
        }
    }

    /// An empty line counts as space
    fn ends_with_space(&self) -> bool {
        self.line.chars().last().is_none_or(char::is_whitespace)
    }

    fn fold_keyword(&self, kw: &str) -> String {
        if self.config.uppercase_keywords {
            kw.to_uppercase()
        } else {
            kw.to_lowercase()
        }
    }

    fn new_line(&mut self) {
        let line = std::mem::take(&mut self.line);
        self.lines.push(line.trim_end().to_string());
    }

    fn incr_indent(&mut self) {
        self.indents.push(self.indent_target() + self.config.indent_size);
    }

    fn incr_indent_to(&mut self, name: &str) {
        match self.named_indents.get(name) {
            Some(column) => self.indents.push(*column),
            None => {
                tracing::error!(name = %name, "no named indent recorded, falling back to one indent step");
                self.incr_indent();
            }
        }
    }

    fn decr_indent(&mut self) {
        if self.indents.len() > 1 {
            self.indents.pop();
        }
    }

    fn left_par(
        &mut self,
        text: &str,
        space_before: bool,
        space_after: bool,
        nl_before: bool,
        nl_after: bool,
    ) {
        let mut space_added = self.ends_with_space();
        if nl_before {
            self.new_line();
            space_added = true;
        }
        space_added |= self.apply_indent();
        if space_before && !space_added {
            self.line.push(' ');
        }
        self.line.push_str(text);
        if nl_after {
            self.new_line();
            self.incr_indent();
        } else if space_after {
            self.line.push(' ');
        }
    }

    fn right_par(
        &mut self,
        text: &str,
        space_before: bool,
        space_after: bool,
        nl_before: bool,
        nl_after: bool,
    ) {
        if !space_before {
            while self.line.ends_with(' ') {
                self.line.pop();
            }
        }
        let mut space_added = self.ends_with_space();
        if nl_before {
            self.new_line();
            space_added = true;
            self.decr_indent();
        }
        space_added |= self.apply_indent();
        if space_before && !space_added {
            self.line.push(' ');
        }
        self.line.push_str(text);
        if nl_after {
            self.new_line();
        } else if space_after {
            self.line.push(' ');
        }
    }

    /// Lookahead prediction: the column a later reader of a mark recorded at
    /// token index `at` should resume at, computed without re-rendering.
    ///
    /// A pending indent wider than the current line wins outright. Otherwise
    /// the column is the current line width, plus one when the next real
    /// token in the stream would force a separating space against the last
    /// emitted real token, or would itself start on a new line.
    fn predict_column(&self, at: usize) -> usize {
        let target = self.indent_target();
        let width = self.line_width();
        if target > width {
            return target;
        }
        if self.ends_with_space() {
            return width;
        }
        let next_real = self.tokens[at + 1..].iter().find(|t| !t.kind.is_meta());
        let needs_space = match next_real {
            Some(next) => {
                self.starts_with_new_line(next.kind)
                    || self
                        .last_real
                        .is_some_and(|last| last.expects_space() && next.kind.expects_space())
            }
            None => false,
        };
        if needs_space { width + 1 } else { width }
    }

    /// Whether a token of this kind will begin on a fresh line under the
    /// active configuration
    fn starts_with_new_line(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::NewLine => true,
            TokenKind::ParDefLeft => self.config.nl_before_open_par_def,
            TokenKind::ParDefRight => self.config.nl_before_close_par_def,
            TokenKind::ParExprLeft | TokenKind::ParFuncLeft => self.config.nl_before_open_par_expr,
            TokenKind::ParExprRight | TokenKind::ParFuncRight => {
                self.config.nl_before_close_par_expr
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(stream: &TokenStream) -> String {
        detokenize(stream, &FormatterConfig::default(), NameWrapper::DoubleQuote)
    }

    fn render_with(stream: &TokenStream, config: &FormatterConfig) -> String {
        detokenize(stream, config, NameWrapper::DoubleQuote)
    }

    #[test]
    fn adjacent_word_like_tokens_get_one_space() {
        let mut stream = TokenStream::new();
        stream.keyword("SELECT").id("a");
        assert_eq!(render(&stream), "SELECT a");
    }

    #[test]
    fn keyword_alignment_pads_shorter_keyword() {
        // Group of 6-char and 4-char keywords, both followed by a word-like
        // token: the longer gets no padding, the shorter exactly 2 spaces.
        let mut stream = TokenStream::new();
        stream
            .mark_line_up("SELECT", None)
            .mark_line_up("FROM", None)
            .lined_up_keyword("SELECT", None)
            .id("a")
            .new_line()
            .lined_up_keyword("FROM", None)
            .id("t");
        assert_eq!(render(&stream), "SELECT a\n  FROM t");
    }

    #[test]
    fn alignment_width_is_order_independent() {
        let mut first = TokenStream::new();
        first
            .mark_line_up("SELECT", None)
            .mark_line_up("FROM", None)
            .lined_up_keyword("FROM", None)
            .id("t");
        let mut second = TokenStream::new();
        second
            .mark_line_up("FROM", None)
            .mark_line_up("SELECT", None)
            .lined_up_keyword("FROM", None)
            .id("t");
        assert_eq!(render(&first), render(&second));
        assert_eq!(render(&first), "  FROM t");
    }

    #[test]
    fn unmarked_alignment_group_falls_back_to_no_padding() {
        let mut stream = TokenStream::new();
        stream.lined_up_keyword("WHERE", None).id("x");
        assert_eq!(render(&stream), "WHERE x");
    }

    #[test]
    fn indent_frame_count_never_drops_below_one() {
        let mut stream = TokenStream::new();
        stream
            .incr_indent()
            .decr_indent()
            .decr_indent()
            .decr_indent()
            .id("x");
        assert_eq!(render(&stream), "x");
    }

    #[test]
    fn line_break_keeps_the_active_indent_frame() {
        let mut stream = TokenStream::new();
        stream.id("a").incr_indent().new_line().id("b").new_line().id("c");
        assert_eq!(render(&stream), "a\n    b\n    c");
    }

    #[test]
    fn named_indent_recall_miss_falls_back_to_one_step() {
        let mut stream = TokenStream::new();
        stream.id("a").incr_indent_to("missing").new_line().id("b");
        assert_eq!(render(&stream), "a\n    b");
    }

    #[test]
    fn named_indent_resumes_at_predicted_column() {
        let mut stream = TokenStream::new();
        stream
            .keyword("ON")
            .mark_and_keep_indent("cond")
            .id("a")
            .new_line()
            .id("b")
            .decr_indent();
        // "ON " is 3 wide: the marker predicts column 3 because the next real
        // token is word-like against the keyword.
        assert_eq!(render(&stream), "ON a\n   b");
    }

    #[test]
    fn expression_paren_breaks_produce_three_lines() {
        let config = FormatterConfig {
            nl_after_open_par_expr: true,
            nl_before_close_par_expr: true,
            space_before_open_par: false,
            space_after_close_par: false,
            ..FormatterConfig::default()
        };
        let mut stream = TokenStream::new();
        stream.par_expr_left().id("x").par_expr_right();
        assert_eq!(render_with(&stream, &config), "(\n    x\n)");
    }

    #[test]
    fn definition_paren_defaults_break_and_indent() {
        let config = FormatterConfig {
            space_after_close_par: false,
            ..FormatterConfig::default()
        };
        let mut stream = TokenStream::new();
        stream.keyword("AS").par_def_left().id("x").par_def_right();
        assert_eq!(render_with(&stream, &config), "AS (\n    x\n)");
    }

    #[test]
    fn operator_spacing_follows_config() {
        let mut stream = TokenStream::new();
        stream.id("a").operator("=").integer(1);
        assert_eq!(render(&stream), "a = 1");

        let tight = FormatterConfig {
            space_before_operator: false,
            space_after_operator: false,
            ..FormatterConfig::default()
        };
        let mut stream = TokenStream::new();
        stream.id("a").operator("=").integer(1);
        assert_eq!(render_with(&stream, &tight), "a=1");
    }

    #[test]
    fn dot_spacing_is_independent() {
        let mut stream = TokenStream::new();
        stream.id("t").id_dot().id("c");
        assert_eq!(render(&stream), "t.c");

        let spaced = FormatterConfig {
            space_before_dot: true,
            space_after_dot: true,
            ..FormatterConfig::default()
        };
        let mut stream = TokenStream::new();
        stream.id("t").id_dot().id("c");
        assert_eq!(render_with(&stream, &spaced), "t . c");
    }

    #[test]
    fn semicolon_respects_never_space_before() {
        let mut stream = TokenStream::new();
        stream.id("a").semicolon();
        assert_eq!(render(&stream), "a;");

        let spaced = FormatterConfig {
            never_space_before_semicolon: false,
            nl_after_semicolon: false,
            ..FormatterConfig::default()
        };
        let mut stream = TokenStream::new();
        stream.id("a").semicolon();
        assert_eq!(render_with(&stream, &spaced), "a ;");
    }

    #[test]
    fn list_comma_break_wins_over_space() {
        let config = FormatterConfig {
            nl_after_comma: true,
            ..FormatterConfig::default()
        };
        let mut stream = TokenStream::new();
        stream.id("a").list_comma().id("b");
        assert_eq!(render_with(&stream, &config), "a,\nb");
    }

    #[test]
    fn keywords_fold_to_configured_case() {
        let lower = FormatterConfig::default().with_uppercase_keywords(false);
        let mut stream = TokenStream::new();
        stream.keyword("Select").id("a");
        assert_eq!(render_with(&stream, &lower), "select a");
    }

    #[test]
    fn always_wrap_names_quotes_every_identifier() {
        let config = FormatterConfig::default().with_always_wrap_names(true);
        let mut stream = TokenStream::new();
        stream.id("users");
        assert_eq!(render_with(&stream, &config), "\"users\"");
    }

    #[test]
    fn meta_tokens_do_not_disturb_adjacency() {
        let mut stream = TokenStream::new();
        stream.keyword("FROM").mark_indent("x").id("t");
        assert_eq!(render(&stream), "FROM t");
    }
}
