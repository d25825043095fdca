//! Statement logging.
//!
//! Every statement a handle executes passes through a [`TracingSqlHook`]
//! (unless logging is disabled in [`HandleConfig`](crate::HandleConfig)),
//! which emits `tracing` events on the `myorm.sql` target before and after
//! execution.

mod tracing_hook;

#[cfg(test)]
mod tests;

pub use tracing_hook::TracingSqlHook;

use crate::sql::{starts_with_keyword, strip_sql_prefix};

/// Truncate `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// The kind of statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    Replace,
    /// CREATE, ALTER, DROP, TRUNCATE
    Ddl,
    /// SHOW, DESCRIBE
    Show,
    /// Anything else (GRANT, REVOKE, ...)
    Other,
}

impl QueryType {
    /// Detect the statement kind from its leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        let s = strip_sql_prefix(sql);
        let is = |kw: &str| starts_with_keyword(s, kw);

        if is("SELECT") {
            QueryType::Select
        } else if is("INSERT") {
            QueryType::Insert
        } else if is("UPDATE") {
            QueryType::Update
        } else if is("DELETE") {
            QueryType::Delete
        } else if is("REPLACE") {
            QueryType::Replace
        } else if is("CREATE") || is("ALTER") || is("DROP") || is("TRUNCATE") {
            QueryType::Ddl
        } else if is("SHOW") || is("DESCRIBE") || is("DESC") {
            QueryType::Show
        } else {
            QueryType::Other
        }
    }
}

/// What a hook sees about one statement.
#[derive(Debug, Clone)]
pub struct StatementContext<'a> {
    pub table: &'a str,
    pub sql: &'a str,
    pub param_count: usize,
    pub query_type: QueryType,
}

impl<'a> StatementContext<'a> {
    pub fn new(table: &'a str, sql: &'a str, param_count: usize) -> Self {
        Self {
            table,
            sql,
            param_count,
            query_type: QueryType::from_sql(sql),
        }
    }
}
