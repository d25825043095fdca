//! MySQL driver on top of sqlx.
//!
//! sqlx is async; the driver owns a current-thread tokio runtime and blocks
//! on it for every step, so callers see a plain synchronous API. Each session
//! is a dedicated `MySqlConnection` (no pool) with autocommit switched off,
//! so `commit` is what makes DML durable.

use super::{Driver, Session};
use crate::config::ConnectOptions;
use crate::error::{OrmError, OrmResult};
use crate::row::Row;
use crate::value::Value;
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnectOptions, MySqlConnection, MySqlRow, MySqlSslMode};
use sqlx::query::Query;
use sqlx::{Column as _, Connection as _, Row as _, TypeInfo as _, ValueRef as _};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Opens one `MySqlConnection` per session.
#[derive(Clone)]
pub struct MySqlDriver {
    runtime: Arc<Runtime>,
}

impl std::fmt::Debug for MySqlDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlDriver").finish_non_exhaustive()
    }
}

impl MySqlDriver {
    /// Create a driver with its own current-thread runtime.
    ///
    /// Every session call blocks on that runtime, so the driver must not be
    /// used from inside an async context (`block_on` panics there).
    pub fn new() -> OrmResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
            .map_err(|e| OrmError::driver(format!("failed to build runtime: {e}")))?;
        Ok(Self::with_runtime(Arc::new(runtime)))
    }

    /// Create a driver that blocks on an existing runtime.
    ///
    /// Must not be used from inside that runtime's async context.
    pub fn with_runtime(runtime: Arc<Runtime>) -> Self {
        Self { runtime }
    }
}

/// Translate the descriptor into sqlx options.
pub(crate) fn connect_options(options: &ConnectOptions) -> OrmResult<MySqlConnectOptions> {
    let mut opts = MySqlConnectOptions::new()
        .host(options.host_or_default())
        .port(options.port_or_default()?)
        .username(options.user_or_default());

    if let Some(password) = options.get("password") {
        opts = opts.password(password);
    }
    if let Some(database) = options.get("database") {
        opts = opts.database(database);
    }
    if let Some(charset) = options.get("charset") {
        opts = opts.charset(charset);
    }
    if let Some(socket) = options.get("socket") {
        opts = opts.socket(socket);
    }
    if let Some(mode) = options.get("ssl_mode") {
        let mode: MySqlSslMode = mode
            .parse()
            .map_err(|e| OrmError::config(format!("invalid ssl_mode {mode:?}: {e}")))?;
        opts = opts.ssl_mode(mode);
    }
    if let Some(tz) = options.get("timezone") {
        opts = opts.timezone(Some(tz.to_string()));
    }
    if let Some(capacity) = options.get("statement_cache_capacity") {
        let capacity: usize = capacity.parse().map_err(|_| {
            OrmError::config(format!("invalid statement_cache_capacity: {capacity:?}"))
        })?;
        opts = opts.statement_cache_capacity(capacity);
    }

    for key in options.unknown_keys() {
        tracing::debug!(target: "myorm.driver", key, "ignoring unrecognised connection option");
    }

    Ok(opts)
}

impl Driver for MySqlDriver {
    type Session = MySqlSession;

    fn open(&self, options: &ConnectOptions) -> OrmResult<MySqlSession> {
        let opts = connect_options(options)?;
        let conn = self
            .runtime
            .block_on(async move {
                let mut conn = MySqlConnection::connect_with(&opts).await?;
                sqlx::raw_sql("SET autocommit = 0").execute(&mut conn).await?;
                Ok::<_, sqlx::Error>(conn)
            })
            .map_err(|e| OrmError::Connection(e.to_string()))?;

        Ok(MySqlSession {
            conn: Some(conn),
            runtime: self.runtime.clone(),
        })
    }
}

/// A single MySQL connection.
pub struct MySqlSession {
    conn: Option<MySqlConnection>,
    runtime: Arc<Runtime>,
}

impl MySqlSession {
    fn conn(&mut self) -> OrmResult<&mut MySqlConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| OrmError::driver("session is closed"))
    }
}

impl Session for MySqlSession {
    fn execute(&mut self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        let runtime = self.runtime.clone();
        let conn = self.conn()?;
        let rows = runtime.block_on(async {
            if params.is_empty() {
                // Text protocol: DESCRIBE, GRANT and friends cannot all be prepared.
                sqlx::raw_sql(sql).fetch_all(&mut *conn).await
            } else {
                let mut q = sqlx::query(sql);
                for value in params {
                    q = bind_value(q, value);
                }
                q.fetch_all(&mut *conn).await
            }
        })?;
        decode_rows(&rows)
    }

    fn commit(&mut self) -> OrmResult<()> {
        let runtime = self.runtime.clone();
        let conn = self.conn()?;
        runtime
            .block_on(sqlx::raw_sql("COMMIT").execute(&mut *conn))
            .map_err(OrmError::Commit)?;
        Ok(())
    }

    fn close(&mut self) -> OrmResult<()> {
        match self.conn.take() {
            Some(conn) => self
                .runtime
                .block_on(conn.close())
                .map_err(|e| OrmError::Close(e.to_string())),
            None => Ok(()),
        }
    }
}

fn bind_value<'q>(
    q: Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Int(n) => q.bind(*n),
        Value::UInt(n) => q.bind(*n),
        Value::Float(x) => q.bind(*x),
        Value::Text(s) => q.bind(s.clone()),
        Value::Bytes(b) => q.bind(b.clone()),
        Value::Date(d) => q.bind(*d),
        Value::DateTime(dt) => q.bind(*dt),
        Value::Time(t) => q.bind(*t),
        Value::Json(j) => q.bind(sqlx::types::Json(j.clone())),
    }
}

fn decode_rows(rows: &[MySqlRow]) -> OrmResult<Vec<Row>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Arc<[String]> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    rows.iter()
        .map(|row| {
            let values = (0..row.len())
                .map(|idx| decode_value(row, idx))
                .collect::<OrmResult<Vec<_>>>()?;
            Ok(Row::new(columns.clone(), values))
        })
        .collect()
}

/// Decode one field by its reported MySQL type, falling back to text and
/// then raw bytes when the typed decode is refused.
fn decode_value(row: &MySqlRow, idx: usize) -> OrmResult<Value> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();

    let typed = match type_name.as_str() {
        "BOOLEAN" => row.try_get::<bool, _>(idx).map(Value::Bool),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
            row.try_get::<i64, _>(idx).map(Value::Int)
        }
        "YEAR" => row.try_get_unchecked::<i64, _>(idx).map(Value::Int),
        name if name.ends_with("UNSIGNED") => row.try_get::<u64, _>(idx).map(Value::UInt),
        "FLOAT" => row.try_get::<f32, _>(idx).map(|x| Value::Float(x as f64)),
        "DOUBLE" => row.try_get::<f64, _>(idx).map(Value::Float),
        "DATE" => row.try_get(idx).map(Value::Date),
        "DATETIME" | "TIMESTAMP" => row.try_get(idx).map(Value::DateTime),
        "TIME" => row.try_get(idx).map(Value::Time),
        "JSON" => row.try_get(idx).map(Value::Json),
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => row.try_get_unchecked::<Vec<u8>, _>(idx).map(Value::Bytes),
        _ => row.try_get_unchecked::<String, _>(idx).map(Value::Text),
    };

    typed
        .or_else(|_| row.try_get_unchecked::<String, _>(idx).map(Value::Text))
        .or_else(|_| row.try_get_unchecked::<Vec<u8>, _>(idx).map(Value::Bytes))
        .map_err(|e| OrmError::decode(idx.to_string(), format!("{type_name}: {e}")))
}
