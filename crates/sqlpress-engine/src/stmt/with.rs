//! WITH prologue and common table expression formatters
//!
//! Each CTE body is a full nested query with its own scope; the definition
//! parentheses around it follow the definition-paren line break options, so
//! the default style puts every CTE body on its own indented block.

use sqlparser::ast::{Cte, CteAsMaterialized, With};

use crate::dispatch::{AstNode, FormatEnv, NodeFormatter};
use crate::stream::TokenStream;

use super::push_ident;

pub(crate) struct WithFormatter<'a> {
    with: &'a With,
    env: FormatEnv,
}

impl<'a> WithFormatter<'a> {
    pub(crate) fn new(with: &'a With, env: FormatEnv) -> Self {
        WithFormatter { with, env }
    }
}

impl NodeFormatter for WithFormatter<'_> {
    fn build(&self, stream: &mut TokenStream) {
        stream.keyword("WITH");
        if self.with.recursive {
            stream.keyword("RECURSIVE");
        }
        for (i, cte) in self.with.cte_tables.iter().enumerate() {
            if i > 0 {
                stream.list_comma().new_line();
            }
            CteFormatter::new(cte, self.env).build(stream);
        }
    }
}

pub(crate) struct CteFormatter<'a> {
    cte: &'a Cte,
    env: FormatEnv,
}

impl<'a> CteFormatter<'a> {
    pub(crate) fn new(cte: &'a Cte, env: FormatEnv) -> Self {
        CteFormatter { cte, env }
    }
}

impl NodeFormatter for CteFormatter<'_> {
    fn build(&self, stream: &mut TokenStream) {
        push_ident(stream, &self.cte.alias.name);
        if !self.cte.alias.columns.is_empty() {
            stream.par_def_left();
            for (i, column) in self.cte.alias.columns.iter().enumerate() {
                if i > 0 {
                    stream.list_comma();
                }
                push_ident(stream, column);
            }
            stream.par_def_right();
        }
        stream.keyword("AS");
        match self.cte.materialized {
            Some(CteAsMaterialized::Materialized) => {
                stream.keyword("MATERIALIZED");
            }
            Some(CteAsMaterialized::NotMaterialized) => {
                stream.keyword("NOT").keyword("MATERIALIZED");
            }
            None => {}
        }
        stream.par_def_left();
        stream.statement(AstNode::Query(&self.cte.query), None, self.env);
        stream.par_def_right();
    }
}
