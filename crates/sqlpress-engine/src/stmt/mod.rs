//! Statement formatters
//!
//! One formatter per AST node kind. Each walks its node and appends tokens to
//! the stream it is given; none of them renders text directly. Formatters for
//! nested nodes that must share the caller's clause alignment group (a
//! `SELECT` inside a `UNION`, for instance) are invoked on the caller's
//! stream; independent sub-statements go through
//! [`TokenStream::statement`](crate::stream::TokenStream::statement) and get
//! their own scope.

mod expr;
mod query;
mod select;
mod with;

pub(crate) use expr::ExprFormatter;
pub(crate) use query::QueryFormatter;
pub(crate) use select::SelectFormatter;
pub(crate) use with::{CteFormatter, WithFormatter};

use sqlparser::ast::{Ident, ObjectName};

use crate::stream::TokenStream;

/// Append an identifier token; quoting is the renderer's job
pub(crate) fn push_ident(stream: &mut TokenStream, ident: &Ident) {
    stream.id(&ident.value);
}

/// Append a possibly schema-qualified object name as dot-joined identifiers
pub(crate) fn push_object_name(stream: &mut TokenStream, name: &ObjectName) {
    for (i, part) in name.0.iter().enumerate() {
        if i > 0 {
            stream.id_dot();
        }
        push_ident(stream, part);
    }
}
