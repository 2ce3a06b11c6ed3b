//! SELECT core formatter
//!
//! Builds one SELECT core: projection, FROM with its join chain, WHERE,
//! GROUP BY, HAVING. Clause keywords are lined-up tokens; the caller (the
//! query formatter) has already announced them to the alignment group, so
//! widths are settled by the time they render. Join keywords are plain
//! keywords on fresh lines under the FROM clause's named indent, which keeps
//! the join chain visually nested one level below its left table.

use sqlparser::ast::{
    Distinct, GroupByExpr, Join, JoinConstraint, JoinOperator, Select, SelectItem, TableFactor,
    TableWithJoins,
};

use crate::dispatch::{AstNode, FormatEnv, NodeFormatter};
use crate::stream::TokenStream;

use super::query::select_has_group_by;
use super::{ExprFormatter, push_ident, push_object_name};

pub(crate) struct SelectFormatter<'a> {
    select: &'a Select,
    env: FormatEnv,
}

impl<'a> SelectFormatter<'a> {
    pub(crate) fn new(select: &'a Select, env: FormatEnv) -> Self {
        SelectFormatter { select, env }
    }

    fn push_expr(&self, expr: &sqlparser::ast::Expr, stream: &mut TokenStream) {
        ExprFormatter::new(expr, self.env).build(stream);
    }

    fn push_projection_item(&self, item: &SelectItem, stream: &mut TokenStream) {
        match item {
            SelectItem::UnnamedExpr(expr) => self.push_expr(expr, stream),
            SelectItem::ExprWithAlias { expr, alias } => {
                self.push_expr(expr, stream);
                stream.keyword("AS");
                push_ident(stream, alias);
            }
            SelectItem::QualifiedWildcard(name, _) => {
                push_object_name(stream, name);
                stream.id_dot().star();
            }
            SelectItem::Wildcard(_) => {
                stream.star();
            }
        }
    }

    fn push_table_factor(&self, factor: &TableFactor, stream: &mut TokenStream) {
        match factor {
            TableFactor::Table { name, alias, .. } => {
                push_object_name(stream, name);
                if let Some(alias) = alias {
                    stream.keyword("AS");
                    push_ident(stream, &alias.name);
                }
            }
            TableFactor::Derived {
                lateral,
                subquery,
                alias,
            } => {
                if *lateral {
                    stream.keyword("LATERAL");
                }
                stream.par_expr_left();
                stream.statement(AstNode::Query(subquery), Some("subquery"), self.env);
                stream.par_expr_right();
                if let Some(alias) = alias {
                    stream.keyword("AS");
                    push_ident(stream, &alias.name);
                }
            }
            TableFactor::NestedJoin {
                table_with_joins,
                alias,
            } => {
                stream.par_expr_left();
                self.push_table_with_joins(table_with_joins, stream);
                stream.par_expr_right();
                if let Some(alias) = alias {
                    stream.keyword("AS");
                    push_ident(stream, &alias.name);
                }
            }
            other => {
                stream.verbatim(&other.to_string());
            }
        }
    }

    fn push_table_with_joins(&self, table: &TableWithJoins, stream: &mut TokenStream) {
        self.push_table_factor(&table.relation, stream);
        for join in &table.joins {
            self.push_join(join, stream);
        }
    }

    fn push_join(&self, join: &Join, stream: &mut TokenStream) {
        let (phrase, constraint) = match &join.join_operator {
            JoinOperator::Inner(c) => (base_phrase("INNER JOIN", c), Some(c)),
            JoinOperator::LeftOuter(c) => (base_phrase("LEFT JOIN", c), Some(c)),
            JoinOperator::RightOuter(c) => (base_phrase("RIGHT JOIN", c), Some(c)),
            JoinOperator::FullOuter(c) => (base_phrase("FULL JOIN", c), Some(c)),
            JoinOperator::CrossJoin => ("CROSS JOIN", None),
            JoinOperator::LeftSemi(c) => ("LEFT SEMI JOIN", Some(c)),
            JoinOperator::RightSemi(c) => ("RIGHT SEMI JOIN", Some(c)),
            JoinOperator::LeftAnti(c) => ("LEFT ANTI JOIN", Some(c)),
            JoinOperator::RightAnti(c) => ("RIGHT ANTI JOIN", Some(c)),
            JoinOperator::CrossApply => ("CROSS APPLY", None),
            JoinOperator::OuterApply => ("OUTER APPLY", None),
            JoinOperator::AsOf {
                match_condition,
                constraint,
            } => {
                stream.new_line().keyword("ASOF JOIN");
                self.push_table_factor(&join.relation, stream);
                stream.keyword("MATCH_CONDITION").par_expr_left();
                self.push_expr(match_condition, stream);
                stream.par_expr_right();
                self.push_join_constraint(constraint, stream);
                return;
            }
        };

        stream.new_line().keyword(phrase);
        self.push_table_factor(&join.relation, stream);
        if let Some(constraint) = constraint {
            self.push_join_constraint(constraint, stream);
        }
    }

    fn push_join_constraint(&self, constraint: &JoinConstraint, stream: &mut TokenStream) {
        match constraint {
            JoinConstraint::On(expr) => {
                stream.keyword("ON").mark_and_keep_indent("on");
                self.push_expr(expr, stream);
                stream.decr_indent();
            }
            JoinConstraint::Using(columns) => {
                stream.keyword("USING").par_expr_left();
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        stream.expr_comma();
                    }
                    push_ident(stream, column);
                }
                stream.par_expr_right();
            }
            JoinConstraint::Natural | JoinConstraint::None => {}
        }
    }
}

impl NodeFormatter for SelectFormatter<'_> {
    fn build(&self, stream: &mut TokenStream) {
        stream.lined_up_keyword("SELECT", None);
        match &self.select.distinct {
            Some(Distinct::Distinct) => {
                stream.keyword("DISTINCT");
            }
            Some(Distinct::On(exprs)) => {
                stream.keyword("DISTINCT").keyword("ON").par_expr_left();
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        stream.expr_comma();
                    }
                    self.push_expr(expr, stream);
                }
                stream.par_expr_right();
            }
            None => {}
        }

        stream.mark_and_keep_indent("result_columns");
        for (i, item) in self.select.projection.iter().enumerate() {
            if i > 0 {
                stream.list_comma();
            }
            self.push_projection_item(item, stream);
        }
        stream.decr_indent();

        if !self.select.from.is_empty() {
            stream.new_line().lined_up_keyword("FROM", None);
            stream.mark_and_keep_indent("from");
            for (i, table) in self.select.from.iter().enumerate() {
                if i > 0 {
                    stream.list_comma();
                }
                self.push_table_with_joins(table, stream);
            }
            stream.decr_indent();
        }

        if let Some(selection) = &self.select.selection {
            stream.new_line().lined_up_keyword("WHERE", None);
            stream.mark_and_keep_indent("where");
            self.push_expr(selection, stream);
            stream.decr_indent();
        }

        if select_has_group_by(self.select) {
            stream.new_line().lined_up_keyword("GROUP BY", None);
            match &self.select.group_by {
                GroupByExpr::All(_) => {
                    stream.keyword("ALL");
                }
                GroupByExpr::Expressions(exprs, _) => {
                    stream.mark_and_keep_indent("group_by");
                    for (i, expr) in exprs.iter().enumerate() {
                        if i > 0 {
                            stream.list_comma();
                        }
                        self.push_expr(expr, stream);
                    }
                    stream.decr_indent();
                }
            }
        }

        if let Some(having) = &self.select.having {
            stream.new_line().lined_up_keyword("HAVING", None);
            stream.mark_and_keep_indent("having");
            self.push_expr(having, stream);
            stream.decr_indent();
        }
    }
}

/// Fold a NATURAL constraint into the join keyword phrase
fn base_phrase(phrase: &'static str, constraint: &JoinConstraint) -> &'static str {
    if !matches!(constraint, JoinConstraint::Natural) {
        return phrase;
    }
    match phrase {
        "INNER JOIN" => "NATURAL JOIN",
        "LEFT JOIN" => "NATURAL LEFT JOIN",
        "RIGHT JOIN" => "NATURAL RIGHT JOIN",
        "FULL JOIN" => "NATURAL FULL JOIN",
        other => other,
    }
}
