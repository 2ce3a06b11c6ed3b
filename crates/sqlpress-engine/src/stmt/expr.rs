//! Scalar expression formatter
//!
//! Walks an [`Expr`] tree and appends one token per lexical element. Logical
//! connectives are keyword tokens, everything else symbolic goes through
//! operator tokens so the operator spacing options apply uniformly.
//! Expression kinds without dedicated handling fall back to the parser's own
//! rendering as a single verbatim token; the output stays valid SQL, it just
//! opts out of spacing options for that fragment.

use sqlparser::ast::{
    BinaryOperator, CastKind, DuplicateTreatment, Expr, Function, FunctionArg, FunctionArgExpr,
    FunctionArguments, UnaryOperator, Value, WindowType,
};

use crate::dispatch::{AstNode, FormatEnv, NodeFormatter};
use crate::stream::TokenStream;

use super::{push_ident, push_object_name};

pub(crate) struct ExprFormatter<'a> {
    expr: &'a Expr,
    env: FormatEnv,
}

impl<'a> ExprFormatter<'a> {
    pub(crate) fn new(expr: &'a Expr, env: FormatEnv) -> Self {
        ExprFormatter { expr, env }
    }

    fn push_expr(&self, expr: &Expr, stream: &mut TokenStream) {
        match expr {
            Expr::Identifier(ident) => push_ident(stream, ident),
            Expr::CompoundIdentifier(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        stream.id_dot();
                    }
                    push_ident(stream, part);
                }
            }
            Expr::Wildcard => {
                stream.star();
            }
            Expr::QualifiedWildcard(name) => {
                push_object_name(stream, name);
                stream.id_dot().star();
            }
            Expr::Value(value) => self.push_value(value, stream),
            Expr::BinaryOp { left, op, right } => {
                self.push_expr(left, stream);
                match op {
                    BinaryOperator::And => stream.keyword("AND"),
                    BinaryOperator::Or => stream.keyword("OR"),
                    BinaryOperator::Xor => stream.keyword("XOR"),
                    other => stream.operator(&other.to_string()),
                };
                self.push_expr(right, stream);
            }
            Expr::UnaryOp { op, expr } => {
                match op {
                    UnaryOperator::Not => stream.keyword("NOT"),
                    other => stream.operator(&other.to_string()),
                };
                self.push_expr(expr, stream);
            }
            Expr::Nested(inner) => {
                stream.par_expr_left();
                self.push_expr(inner, stream);
                stream.par_expr_right();
            }
            Expr::IsNull(inner) => {
                self.push_expr(inner, stream);
                stream.keyword("IS").keyword("NULL");
            }
            Expr::IsNotNull(inner) => {
                self.push_expr(inner, stream);
                stream.keyword("IS").keyword("NOT").keyword("NULL");
            }
            Expr::IsTrue(inner) => {
                self.push_expr(inner, stream);
                stream.keyword("IS").keyword("TRUE");
            }
            Expr::IsNotTrue(inner) => {
                self.push_expr(inner, stream);
                stream.keyword("IS").keyword("NOT").keyword("TRUE");
            }
            Expr::IsFalse(inner) => {
                self.push_expr(inner, stream);
                stream.keyword("IS").keyword("FALSE");
            }
            Expr::IsNotFalse(inner) => {
                self.push_expr(inner, stream);
                stream.keyword("IS").keyword("NOT").keyword("FALSE");
            }
            Expr::IsDistinctFrom(left, right) => {
                self.push_expr(left, stream);
                stream.keyword("IS").keyword("DISTINCT").keyword("FROM");
                self.push_expr(right, stream);
            }
            Expr::IsNotDistinctFrom(left, right) => {
                self.push_expr(left, stream);
                stream
                    .keyword("IS")
                    .keyword("NOT")
                    .keyword("DISTINCT")
                    .keyword("FROM");
                self.push_expr(right, stream);
            }
            Expr::InList {
                expr,
                list,
                negated,
            } => {
                self.push_expr(expr, stream);
                if *negated {
                    stream.keyword("NOT");
                }
                stream.keyword("IN").par_expr_left();
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        stream.expr_comma();
                    }
                    self.push_expr(item, stream);
                }
                stream.par_expr_right();
            }
            Expr::InSubquery {
                expr,
                subquery,
                negated,
            } => {
                self.push_expr(expr, stream);
                if *negated {
                    stream.keyword("NOT");
                }
                stream.keyword("IN").par_expr_left();
                stream.statement(AstNode::Query(subquery), Some("subquery"), self.env);
                stream.par_expr_right();
            }
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => {
                self.push_expr(expr, stream);
                if *negated {
                    stream.keyword("NOT");
                }
                stream.keyword("BETWEEN");
                self.push_expr(low, stream);
                stream.keyword("AND");
                self.push_expr(high, stream);
            }
            Expr::Like {
                negated,
                expr,
                pattern,
                escape_char,
                ..
            } => {
                self.push_like(expr, "LIKE", *negated, pattern, escape_char.as_deref(), stream);
            }
            Expr::ILike {
                negated,
                expr,
                pattern,
                escape_char,
                ..
            } => {
                self.push_like(expr, "ILIKE", *negated, pattern, escape_char.as_deref(), stream);
            }
            Expr::SimilarTo {
                negated,
                expr,
                pattern,
                escape_char,
                ..
            } => {
                self.push_expr(expr, stream);
                if *negated {
                    stream.keyword("NOT");
                }
                stream.keyword("SIMILAR").keyword("TO");
                self.push_expr(pattern, stream);
                if let Some(escape) = escape_char.as_deref() {
                    stream.keyword("ESCAPE").string(escape);
                }
            }
            Expr::Cast {
                kind,
                expr,
                data_type,
                ..
            } => match kind {
                CastKind::DoubleColon => {
                    self.push_expr(expr, stream);
                    stream.operator("::").data_type(&data_type.to_string());
                }
                kind => {
                    let kw = match kind {
                        CastKind::TryCast => "TRY_CAST",
                        CastKind::SafeCast => "SAFE_CAST",
                        _ => "CAST",
                    };
                    stream.keyword(kw).par_func_left();
                    self.push_expr(expr, stream);
                    stream.keyword("AS").data_type(&data_type.to_string());
                    stream.par_func_right();
                }
            },
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
            } => {
                stream.keyword("CASE");
                if let Some(operand) = operand {
                    self.push_expr(operand, stream);
                }
                stream.mark_and_keep_indent("case");
                for (condition, result) in conditions.iter().zip(results) {
                    stream.new_line().keyword("WHEN");
                    self.push_expr(condition, stream);
                    stream.keyword("THEN");
                    self.push_expr(result, stream);
                }
                if let Some(else_result) = else_result {
                    stream.new_line().keyword("ELSE");
                    self.push_expr(else_result, stream);
                }
                stream.new_line().keyword("END").decr_indent();
            }
            Expr::Function(function) => self.push_function(function, stream),
            Expr::Exists { subquery, negated } => {
                if *negated {
                    stream.keyword("NOT");
                }
                stream.keyword("EXISTS").par_expr_left();
                stream.statement(AstNode::Query(subquery), Some("subquery"), self.env);
                stream.par_expr_right();
            }
            Expr::Subquery(subquery) => {
                stream.par_expr_left();
                stream.statement(AstNode::Query(subquery), Some("subquery"), self.env);
                stream.par_expr_right();
            }
            Expr::Tuple(items) => {
                stream.par_expr_left();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        stream.expr_comma();
                    }
                    self.push_expr(item, stream);
                }
                stream.par_expr_right();
            }
            Expr::Collate { expr, collation } => {
                self.push_expr(expr, stream);
                stream.keyword("COLLATE");
                push_object_name(stream, collation);
            }
            other => {
                stream.verbatim(&other.to_string());
            }
        }
    }

    fn push_like(
        &self,
        expr: &Expr,
        keyword: &str,
        negated: bool,
        pattern: &Expr,
        escape_char: Option<&str>,
        stream: &mut TokenStream,
    ) {
        self.push_expr(expr, stream);
        if negated {
            stream.keyword("NOT");
        }
        stream.keyword(keyword);
        self.push_expr(pattern, stream);
        if let Some(escape) = escape_char {
            stream.keyword("ESCAPE").string(escape);
        }
    }

    fn push_function(&self, function: &Function, stream: &mut TokenStream) {
        let parts = &function.name.0;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                stream.id_dot();
            }
            if i + 1 == parts.len() {
                stream.func_id(&part.value);
            } else {
                push_ident(stream, part);
            }
        }
        match &function.args {
            FunctionArguments::None => {}
            FunctionArguments::Subquery(subquery) => {
                stream.par_func_left();
                stream.statement(AstNode::Query(subquery), Some("subquery"), self.env);
                stream.par_func_right();
            }
            FunctionArguments::List(list) => {
                stream.par_func_left();
                match list.duplicate_treatment {
                    Some(DuplicateTreatment::Distinct) => {
                        stream.keyword("DISTINCT");
                    }
                    Some(DuplicateTreatment::All) => {
                        stream.keyword("ALL");
                    }
                    None => {}
                }
                for (i, arg) in list.args.iter().enumerate() {
                    if i > 0 {
                        stream.expr_comma();
                    }
                    self.push_function_arg(arg, stream);
                }
                stream.par_func_right();
            }
        }
        if let Some(filter) = &function.filter {
            stream.keyword("FILTER").par_func_left().keyword("WHERE");
            self.push_expr(filter, stream);
            stream.par_func_right();
        }
        if let Some(over) = &function.over {
            stream.keyword("OVER");
            match over {
                WindowType::NamedWindow(name) => {
                    push_ident(stream, name);
                }
                WindowType::WindowSpec(spec) => {
                    stream
                        .par_func_left()
                        .verbatim(&spec.to_string())
                        .par_func_right();
                }
            }
        }
    }

    fn push_function_arg(&self, arg: &FunctionArg, stream: &mut TokenStream) {
        match arg {
            FunctionArg::Unnamed(arg) => self.push_function_arg_expr(arg, stream),
            FunctionArg::Named { name, arg, .. } => {
                push_ident(stream, name);
                stream.operator("=>");
                self.push_function_arg_expr(arg, stream);
            }
            other => {
                stream.verbatim(&other.to_string());
            }
        }
    }

    fn push_function_arg_expr(&self, arg: &FunctionArgExpr, stream: &mut TokenStream) {
        match arg {
            FunctionArgExpr::Expr(expr) => self.push_expr(expr, stream),
            FunctionArgExpr::QualifiedWildcard(name) => {
                push_object_name(stream, name);
                stream.id_dot().star();
            }
            FunctionArgExpr::Wildcard => {
                stream.star();
            }
        }
    }

    fn push_value(&self, value: &Value, stream: &mut TokenStream) {
        match value {
            Value::Number(text, _) => {
                if let Ok(int) = text.parse::<i64>() {
                    stream.integer(int);
                } else if let Ok(float) = text.parse::<f64>() {
                    stream.float(float);
                } else {
                    stream.verbatim(text);
                }
            }
            Value::SingleQuotedString(text) | Value::DoubleQuotedString(text) => {
                stream.string(text);
            }
            Value::HexStringLiteral(text) => {
                stream.blob(&format!("X'{text}'"));
            }
            Value::Boolean(true) => {
                stream.keyword("TRUE");
            }
            Value::Boolean(false) => {
                stream.keyword("FALSE");
            }
            Value::Null => {
                stream.keyword("NULL");
            }
            Value::Placeholder(text) => {
                stream.bind_param(text);
            }
            other => {
                stream.verbatim(&other.to_string());
            }
        }
    }
}

impl NodeFormatter for ExprFormatter<'_> {
    fn build(&self, stream: &mut TokenStream) {
        self.push_expr(self.expr, stream);
    }
}
