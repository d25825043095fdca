//! Statement templates for single-table operations.
//!
//! Each function renders one statement for `table`. Identifiers, column
//! lists and condition fragments are spliced in verbatim; only values go
//! through placeholders.

use super::Sql;
use crate::error::{OrmError, OrmResult};
use crate::record::Record;
use crate::value::Value;
use std::fmt;

/// Sort direction for [`order_by`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn select_all(table: &str) -> Sql {
    Sql::new(format!("SELECT * FROM {table}"))
}

pub fn select_by_id(table: &str, id: impl Into<Value>) -> Sql {
    let mut q = Sql::new(format!("SELECT * FROM {table} WHERE id = "));
    q.push_bind(id);
    q
}

pub fn select_where(table: &str, condition: &str, args: &[Value]) -> Sql {
    let mut q = Sql::new(format!("SELECT * FROM {table} WHERE {condition}"));
    q.bind_all(args);
    q
}

pub fn delete_by_id(table: &str, id: impl Into<Value>) -> Sql {
    let mut q = Sql::new(format!("DELETE FROM {table} WHERE id = "));
    q.push_bind(id);
    q
}

pub fn delete_where(table: &str, condition: &str, args: &[Value]) -> Sql {
    let mut q = Sql::new(format!("DELETE FROM {table} WHERE {condition}"));
    q.bind_all(args);
    q
}

pub fn truncate(table: &str) -> Sql {
    Sql::new(format!("TRUNCATE {table}"))
}

/// `CREATE TABLE IF NOT EXISTS` from `(name, type)` pairs in order.
pub fn create_table(table: &str, columns: &[(&str, &str)]) -> Sql {
    let defs: Vec<String> = columns
        .iter()
        .map(|(name, dtype)| format!("{name} {dtype}"))
        .collect();
    let mut q = Sql::new(format!("CREATE TABLE IF NOT EXISTS {table} ("));
    q.push_joined(&defs, ",").push(")");
    q
}

pub fn alter_table_add_column(table: &str, column: &str, data_type: &str) -> Sql {
    Sql::new(format!("ALTER TABLE {table} ADD COLUMN {column} {data_type}"))
}

pub fn drop_table(table: &str) -> Sql {
    Sql::new(format!("DROP TABLE IF EXISTS {table}"))
}

pub fn describe_table(table: &str) -> Sql {
    Sql::new(format!("DESCRIBE {table}"))
}

pub fn grant_permission(table: &str, user: &str, permission: &str) -> Sql {
    Sql::new(format!("GRANT {permission} ON {table} TO {user}"))
}

pub fn revoke_permission(table: &str, user: &str, permission: &str) -> Sql {
    Sql::new(format!("REVOKE {permission} ON {table} FROM {user}"))
}

/// Inner join; without `columns` every column of both tables is selected.
pub fn join(table: &str, other: &str, condition: &str, columns: Option<&[&str]>) -> Sql {
    let mut q = Sql::new("SELECT ");
    match columns {
        Some(cols) => q.push_joined(cols, ", "),
        None => q.push(&format!("{table}.*, {other}.*")),
    };
    q.push(&format!(" FROM {table} JOIN {other} ON {condition}"));
    q
}

/// `UNION` (or `UNION ALL`) of the same projection over two tables.
pub fn union(table: &str, other: &str, columns: Option<&[&str]>, all: bool) -> Sql {
    let projection = projection(columns);
    let op = if all { "UNION ALL" } else { "UNION" };
    Sql::new(format!(
        "SELECT {projection} FROM {table} {op} SELECT {projection} FROM {other}"
    ))
}

pub fn order_by(table: &str, column: &str, order: SortOrder) -> Sql {
    Sql::new(format!("SELECT * FROM {table} ORDER BY {column} {order}"))
}

pub fn group_by(table: &str, columns: &[&str], having: Option<&str>) -> Sql {
    let cols = columns.join(", ");
    let mut q = Sql::new(format!("SELECT {cols} FROM {table} GROUP BY {cols}"));
    if let Some(having) = having {
        q.push(" HAVING ").push(having);
    }
    q
}

pub fn distinct(table: &str, columns: Option<&[&str]>) -> Sql {
    Sql::new(format!("SELECT DISTINCT {} FROM {table}", projection(columns)))
}

pub fn limit(table: &str, num_rows: u64, offset: u64) -> Sql {
    Sql::new(format!("SELECT * FROM {table} LIMIT {num_rows} OFFSET {offset}"))
}

pub fn create_index(table: &str, index_name: &str, columns: &[&str]) -> Sql {
    Sql::new(format!(
        "CREATE INDEX {index_name} ON {table} ({})",
        columns.join(", ")
    ))
}

pub fn show_indexes(table: &str) -> Sql {
    Sql::new(format!("SHOW INDEX FROM {table}"))
}

pub fn insert_into_select(table: &str, columns: &[&str], select_query: &str) -> Sql {
    Sql::new(format!(
        "INSERT INTO {table} ({}) {select_query}",
        columns.join(", ")
    ))
}

pub fn set_value(table: &str, column: &str, value: impl Into<Value>, condition: Option<&str>) -> Sql {
    let mut q = Sql::new(format!("UPDATE {table} SET {column} = "));
    q.push_bind(value);
    if let Some(condition) = condition {
        q.push(" WHERE ").push(condition);
    }
    q
}

/// `INSERT INTO T (c1,…,cn) VALUES (?,…,?)` in record order.
pub fn insert(table: &str, data: &Record) -> Sql {
    let columns: Vec<&str> = data.columns().collect();
    let mut q = Sql::new(format!("INSERT INTO {table} ("));
    q.push_joined(&columns, ",").push(") VALUES (");
    for (i, value) in data.values().enumerate() {
        if i > 0 {
            q.push(",");
        }
        q.push_bind(value.clone());
    }
    q.push(")");
    q
}

/// `UPDATE T SET c1 = ?, … WHERE <condition>` with the record values first
/// and `args` after them.
pub fn update_where(table: &str, condition: &str, data: &Record, args: &[Value]) -> OrmResult<Sql> {
    if data.is_empty() {
        return Err(OrmError::validation("UPDATE requires at least one column to SET"));
    }
    let mut q = Sql::new(format!("UPDATE {table} SET "));
    for (i, (column, value)) in data.iter().enumerate() {
        if i > 0 {
            q.push(", ");
        }
        q.push(column).push(" = ").push_bind(value.clone());
    }
    q.push(" WHERE ").push(condition);
    q.bind_all(args);
    Ok(q)
}

/// `REPLACE INTO T (id,c1,…) VALUES (?,?,…)` with `id` bound first.
pub fn replace(table: &str, id: impl Into<Value>, data: &Record) -> Sql {
    let mut q = Sql::new(format!("REPLACE INTO {table} (id"));
    for column in data.columns() {
        q.push(",").push(column);
    }
    q.push(") VALUES (").push_bind(id);
    for value in data.values() {
        q.push(",").push_bind(value.clone());
    }
    q.push(")");
    q
}

/// The information-schema probe listing `(COLUMN_NAME, DATA_TYPE)` for
/// `table`. With `scoped`, only the session's current database is searched.
pub fn column_types_probe(table: &str, scoped: bool) -> Sql {
    let mut q = Sql::new(format!(
        "SELECT COLUMN_NAME, DATA_TYPE FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_NAME = '{table}'"
    ));
    if scoped {
        q.push(" AND TABLE_SCHEMA = DATABASE()");
    }
    q
}

fn projection(columns: Option<&[&str]>) -> String {
    match columns {
        Some(cols) => cols.join(", "),
        None => "*".to_string(),
    }
}
