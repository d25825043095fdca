//! SQL text assembly.
//!
//! [`Sql`] keeps raw fragments and bound values apart and renders MySQL `?`
//! placeholders in order. The [`statement`] submodule builds one `Sql` per
//! table operation; nothing here talks to a database.
//!
//! # Example
//!
//! ```ignore
//! use myorm::sql;
//!
//! let mut q = sql("SELECT * FROM users WHERE id = ");
//! q.push_bind(7);
//! assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id = ?");
//! ```

pub mod statement;

#[cfg(test)]
mod tests;

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
enum SqlPart {
    Raw(String),
    Param,
}

/// A SQL statement under construction: raw text plus positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<Value>,
}

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}

/// Strip leading whitespace, SQL comments (`--`, `#` and `/* */`), and
/// parentheses from a SQL string to find the first meaningful keyword.
pub(crate) fn strip_sql_prefix(sql: &str) -> &str {
    let mut s = sql;
    loop {
        let before = s;
        s = s.trim_start();
        if s.starts_with("--") || s.starts_with('#') {
            if let Some(pos) = s.find('\n') {
                s = &s[pos + 1..];
                continue;
            }
            return "";
        }
        if s.starts_with("/*") {
            if let Some(pos) = s.find("*/") {
                s = &s[pos + 2..];
                continue;
            }
            return "";
        }
        if let Some(rest) = s.strip_prefix('(') {
            s = rest;
            continue;
        }
        if s == before {
            break;
        }
    }
    s
}

pub(crate) fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    match s.get(0..keyword.len()) {
        Some(prefix) => {
            prefix.eq_ignore_ascii_case(keyword)
                && s[keyword.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '_'))
        }
        None => false,
    }
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
        }
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append raw items separated by `sep`.
    pub fn push_joined<S: AsRef<str>>(&mut self, items: &[S], sep: &str) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            self.push(item.as_ref());
        }
        self
    }

    /// Append a `?` placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Bind a value without adding a placeholder.
    ///
    /// For caller-supplied fragments that already carry their own
    /// placeholders, e.g. the condition of `select_where`:
    /// ```ignore
    /// sql("SELECT * FROM users WHERE ").push("age > ?").bind(18);
    /// ```
    pub fn bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.params.push(value.into());
        self
    }

    /// Bind several values without adding placeholders.
    pub fn bind_all<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> &mut Self {
        self.params.extend(values.into_iter().cloned());
        self
    }

    /// Number of placeholders added through `push_bind`.
    pub fn placeholder_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, SqlPart::Param))
            .count()
    }

    /// Render SQL with `?` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param => out.push('?'),
            }
        }
        out
    }

    /// Bound parameters in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Check that every builder placeholder has a value.
    ///
    /// Values added with [`Sql::bind`] have no builder placeholder, so
    /// `params().len()` may exceed the placeholder count.
    pub fn validate(&self) -> OrmResult<()> {
        let placeholder_count = self.placeholder_count();
        if placeholder_count > self.params.len() {
            return Err(OrmError::Validation(format!(
                "Sql: more placeholders({}) than params({})",
                placeholder_count,
                self.params.len()
            )));
        }
        Ok(())
    }

    /// Split into rendered SQL and parameters.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        let sql = self.to_sql();
        (sql, self.params)
    }
}
