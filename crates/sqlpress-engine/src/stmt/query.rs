//! Query formatter
//!
//! Owns the clause skeleton of a full query: the optional WITH prologue, the
//! set-expression body, and the trailing ORDER BY / LIMIT / OFFSET clauses.
//!
//! Every clause keyword the query will emit is announced up front through
//! alignment marks, so the group's final width is known before the first
//! clause keyword renders. The body's SELECT cores are built on this same
//! stream; only genuinely nested queries (parenthesized set operands,
//! subqueries) get their own scope and thus their own alignment group.

use sqlparser::ast::{
    GroupByExpr, OrderByExpr, Query, Select, SetExpr, SetOperator, SetQuantifier,
};

use crate::dispatch::{AstNode, FormatEnv, NodeFormatter};
use crate::stream::TokenStream;

use super::{ExprFormatter, SelectFormatter};

pub(crate) struct QueryFormatter<'a> {
    query: &'a Query,
    env: FormatEnv,
}

impl<'a> QueryFormatter<'a> {
    pub(crate) fn new(query: &'a Query, env: FormatEnv) -> Self {
        QueryFormatter { query, env }
    }

    fn push_body(&self, body: &SetExpr, stream: &mut TokenStream) {
        match body {
            SetExpr::Select(select) => {
                SelectFormatter::new(select, self.env).build(stream);
            }
            SetExpr::Query(query) => {
                stream.par_expr_left();
                stream.statement(AstNode::Query(query), Some("subquery"), self.env);
                stream.par_expr_right();
            }
            SetExpr::SetOperation {
                op,
                set_quantifier,
                left,
                right,
            } => {
                self.push_body(left, stream);
                stream.new_line();
                match op {
                    SetOperator::Union => stream.keyword("UNION"),
                    SetOperator::Intersect => stream.keyword("INTERSECT"),
                    SetOperator::Except => stream.keyword("EXCEPT"),
                };
                match set_quantifier {
                    SetQuantifier::All => {
                        stream.keyword("ALL");
                    }
                    SetQuantifier::Distinct => {
                        stream.keyword("DISTINCT");
                    }
                    _ => {}
                }
                stream.new_line();
                self.push_body(right, stream);
            }
            SetExpr::Values(values) => {
                stream.lined_up_keyword("VALUES", None);
                for (i, row) in values.rows.iter().enumerate() {
                    if i > 0 {
                        stream.list_comma();
                    }
                    stream.par_expr_left();
                    for (j, expr) in row.iter().enumerate() {
                        if j > 0 {
                            stream.expr_comma();
                        }
                        ExprFormatter::new(expr, self.env).build(stream);
                    }
                    stream.par_expr_right();
                }
            }
            other => {
                stream.verbatim(&other.to_string());
            }
        }
    }

    fn push_order_by_expr(&self, order: &OrderByExpr, stream: &mut TokenStream) {
        ExprFormatter::new(&order.expr, self.env).build(stream);
        match order.asc {
            Some(true) => {
                stream.keyword("ASC");
            }
            Some(false) => {
                stream.keyword("DESC");
            }
            None => {}
        }
        match order.nulls_first {
            Some(true) => {
                stream.keyword("NULLS").keyword("FIRST");
            }
            Some(false) => {
                stream.keyword("NULLS").keyword("LAST");
            }
            None => {}
        }
    }
}

impl NodeFormatter for QueryFormatter<'_> {
    fn build(&self, stream: &mut TokenStream) {
        for keyword in clause_keywords(self.query) {
            stream.mark_line_up(keyword, None);
        }

        if let Some(with) = &self.query.with {
            stream.statement(AstNode::With(with), None, self.env);
            stream.new_line();
        }

        self.push_body(&self.query.body, stream);

        if let Some(order_by) = &self.query.order_by
            && !order_by.exprs.is_empty()
        {
            stream.new_line().lined_up_keyword("ORDER BY", None);
            stream.mark_and_keep_indent("order_by");
            for (i, order) in order_by.exprs.iter().enumerate() {
                if i > 0 {
                    stream.list_comma();
                }
                self.push_order_by_expr(order, stream);
            }
            stream.decr_indent();
        }
        if let Some(limit) = &self.query.limit {
            stream.new_line().lined_up_keyword("LIMIT", None);
            ExprFormatter::new(limit, self.env).build(stream);
        }
        if let Some(offset) = &self.query.offset {
            stream.new_line().lined_up_keyword("OFFSET", None);
            ExprFormatter::new(&offset.value, self.env).build(stream);
        }
    }
}

/// Clause keywords this query will line up, in emission order
fn clause_keywords(query: &Query) -> Vec<&'static str> {
    let mut keywords = Vec::new();
    collect_body_keywords(&query.body, &mut keywords);
    if let Some(order_by) = &query.order_by
        && !order_by.exprs.is_empty()
    {
        keywords.push("ORDER BY");
    }
    if query.limit.is_some() {
        keywords.push("LIMIT");
    }
    if query.offset.is_some() {
        keywords.push("OFFSET");
    }
    keywords
}

fn collect_body_keywords(body: &SetExpr, keywords: &mut Vec<&'static str>) {
    match body {
        SetExpr::Select(select) => collect_select_keywords(select, keywords),
        SetExpr::SetOperation { left, right, .. } => {
            collect_body_keywords(left, keywords);
            collect_body_keywords(right, keywords);
        }
        SetExpr::Values(_) => keywords.push("VALUES"),
        // parenthesized bodies get their own stream and alignment group
        _ => {}
    }
}

fn collect_select_keywords(select: &Select, keywords: &mut Vec<&'static str>) {
    keywords.push("SELECT");
    if !select.from.is_empty() {
        keywords.push("FROM");
    }
    if select.selection.is_some() {
        keywords.push("WHERE");
    }
    if select_has_group_by(select) {
        keywords.push("GROUP BY");
    }
    if select.having.is_some() {
        keywords.push("HAVING");
    }
}

pub(super) fn select_has_group_by(select: &Select) -> bool {
    match &select.group_by {
        GroupByExpr::All(_) => true,
        GroupByExpr::Expressions(exprs, _) => !exprs.is_empty(),
    }
}
