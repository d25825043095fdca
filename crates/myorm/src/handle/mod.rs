//! The table handle.
//!
//! [`TableHandle`] binds a connection descriptor to one table name and turns
//! each method call into exactly one statement (two for typed writes, which
//! probe the information schema first). Every statement runs in its own
//! session: open, execute, commit, close.


use crate::check::{ColumnTypeMap, Diagnostic, DiagnosticSink, StderrSink, validate};
use crate::config::{ConnectOptions, HandleConfig};
use crate::driver::{Driver, MySqlDriver, ScopedSession};
use crate::error::OrmResult;
use crate::monitor::StatementContext;
use crate::record::Record;
use crate::row::Row;
use crate::sql::Sql;
use crate::sql::statement::{self, SortOrder};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Convenience operations over a single table.
///
/// ```ignore
/// use myorm::{ConnectOptions, Record, TableHandle};
///
/// let users = TableHandle::new(ConnectOptions::from_env()?, "users")?;
/// users.insert(&Record::new().set("id", 1).set("name", "a"))?;
/// let rows = users.select_by_id(1)?;
/// ```
///
/// Identifiers, condition fragments, permissions and type names are
/// interpolated into SQL as given unless the handle is configured with
/// [`IdentPolicy::Strict`](crate::IdentPolicy::Strict); only values are bound
/// as parameters.
pub struct TableHandle<D: Driver = MySqlDriver> {
    driver: D,
    options: ConnectOptions,
    table: String,
    config: HandleConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl<D: Driver + fmt::Debug> fmt::Debug for TableHandle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableHandle")
            .field("driver", &self.driver)
            .field("options", &self.options)
            .field("table", &self.table)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TableHandle<MySqlDriver> {
    /// Bind `table` on the MySQL server described by `options`.
    ///
    /// The handle blocks on its own tokio runtime. Calling any operation
    /// from inside an async context panics; use `spawn_blocking` there.
    pub fn new(options: ConnectOptions, table: impl Into<String>) -> OrmResult<Self> {
        Ok(Self::with_driver(MySqlDriver::new()?, options, table))
    }
}

impl<D: Driver> TableHandle<D> {
    pub fn with_driver(driver: D, options: ConnectOptions, table: impl Into<String>) -> Self {
        Self {
            driver,
            options,
            table: table.into(),
            config: HandleConfig::default(),
            sink: Arc::new(StderrSink),
        }
    }

    pub fn with_config(mut self, config: HandleConfig) -> Self {
        self.config = config;
        self
    }

    /// Send guard diagnostics to `sink` instead of standard error.
    ///
    /// The sink is the only channel that carries each diagnostic line.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn with_shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn table_ident(&self) -> OrmResult<&str> {
        self.config.ident_policy.check(&self.table)
    }

    // ==================== Execution ====================

    /// Run one statement through a fresh session.
    fn run(&self, stmt: Sql) -> OrmResult<Vec<Row>> {
        stmt.validate()?;
        let (sql, params) = stmt.into_parts();
        let ctx = StatementContext::new(&self.table, &sql, params.len());
        let hook = self.config.sql_hook.as_ref();

        if let Some(hook) = hook {
            hook.before_statement(&ctx);
        }
        let start = Instant::now();
        let result = self.run_in_session(&sql, &params);
        if let Some(hook) = hook {
            match &result {
                Ok(rows) => hook.after_statement(&ctx, start.elapsed(), rows.len()),
                Err(e) => hook.on_error(&ctx, start.elapsed(), e),
            }
        }
        result
    }

    fn run_in_session(&self, sql: &str, params: &[Value]) -> OrmResult<Vec<Row>> {
        let mut session = ScopedSession::open(&self.driver, &self.options)?;
        let rows = session.execute(sql, params)?;
        session.commit()?;
        session.close()?;
        Ok(rows)
    }

    // ==================== Typed-write guard ====================

    /// Declared column types of the bound table, freshly probed.
    pub fn column_types(&self) -> OrmResult<ColumnTypeMap> {
        let table = self.table_ident()?;
        let rows = self.run(statement::column_types_probe(table, self.config.scoped_probe))?;
        ColumnTypeMap::from_rows(table, &rows)
    }

    /// Probe the table and validate `data` without writing anything.
    pub fn check(&self, data: &Record) -> OrmResult<Vec<Diagnostic>> {
        let types = self.column_types()?;
        Ok(validate(&types, data))
    }

    /// Probe, validate and report. Never fails on a mismatch.
    ///
    /// The sink receives exactly one line per diagnostic; the `myorm.guard`
    /// tracing event is a `debug`-level trace of the same finding.
    fn guard(&self, data: &Record) -> OrmResult<()> {
        for diagnostic in self.check(data)? {
            tracing::debug!(
                target: "myorm.guard",
                table = %self.table,
                column = diagnostic.column(),
                "{diagnostic}"
            );
            self.sink.emit(&diagnostic);
        }
        Ok(())
    }

    fn check_record_columns(&self, data: &Record) -> OrmResult<()> {
        for column in data.columns() {
            self.config.ident_policy.check(column)?;
        }
        Ok(())
    }

    /// `INSERT INTO T (c1,…) VALUES (?,…)` after the typed-write guard.
    pub fn insert(&self, data: &Record) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.check_record_columns(data)?;
        let stmt = statement::insert(table, data);
        self.guard(data)?;
        self.run(stmt)
    }

    /// `UPDATE T SET c1 = ?, … WHERE <condition>` after the typed-write
    /// guard. Parameters are the record values followed by `args`.
    pub fn update_where(&self, condition: &str, data: &Record, args: &[Value]) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.check_record_columns(data)?;
        let stmt = statement::update_where(table, condition, data, args)?;
        self.guard(data)?;
        self.run(stmt)
    }

    /// `REPLACE INTO T (id,c1,…) VALUES (?,?,…)` after the typed-write guard.
    ///
    /// Only `data` is validated; `id` is bound as given.
    pub fn replace(&self, id: impl Into<Value>, data: &Record) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.check_record_columns(data)?;
        let stmt = statement::replace(table, id, data);
        self.guard(data)?;
        self.run(stmt)
    }

    // ==================== Reads ====================

    pub fn select_all(&self) -> OrmResult<Vec<Row>> {
        self.run(statement::select_all(self.table_ident()?))
    }

    pub fn select_by_id(&self, id: impl Into<Value>) -> OrmResult<Vec<Row>> {
        self.run(statement::select_by_id(self.table_ident()?, id))
    }

    /// `SELECT * FROM T WHERE <condition>`; `args` bind to the placeholders
    /// inside `condition`.
    pub fn select_where(&self, condition: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        self.run(statement::select_where(self.table_ident()?, condition, args))
    }

    /// Inner join with `other`. Without `columns`, selects `T.*, other.*`.
    pub fn join(&self, other: &str, condition: &str, columns: Option<&[&str]>) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.config.ident_policy.check(other)?;
        if let Some(cols) = columns {
            self.config.ident_policy.check_projection(cols)?;
        }
        self.run(statement::join(table, other, condition, columns))
    }

    /// `SELECT cols FROM T UNION [ALL] SELECT cols FROM other`; columns
    /// default to `*` and duplicates are removed unless `all` is set.
    pub fn union(&self, other: &str, columns: Option<&[&str]>, all: bool) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.config.ident_policy.check(other)?;
        if let Some(cols) = columns {
            self.config.ident_policy.check_projection(cols)?;
        }
        self.run(statement::union(table, other, columns, all))
    }

    /// `SELECT * FROM T ORDER BY column <order>`; `None` sorts ascending.
    pub fn order_by(&self, column: &str, order: Option<SortOrder>) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.config.ident_policy.check(column)?;
        self.run(statement::order_by(table, column, order.unwrap_or_default()))
    }

    pub fn group_by(&self, columns: &[&str], having: Option<&str>) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.config.ident_policy.check_all(columns)?;
        self.run(statement::group_by(table, columns, having))
    }

    /// `SELECT DISTINCT <cols or *> FROM T`.
    pub fn distinct(&self, columns: Option<&[&str]>) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        if let Some(cols) = columns {
            self.config.ident_policy.check_projection(cols)?;
        }
        self.run(statement::distinct(table, columns))
    }

    /// `SELECT * FROM T LIMIT n OFFSET off`; `None` means offset 0.
    pub fn limit(&self, num_rows: u64, offset: Option<u64>) -> OrmResult<Vec<Row>> {
        self.run(statement::limit(self.table_ident()?, num_rows, offset.unwrap_or(0)))
    }

    // ==================== Deletes and untyped writes ====================

    pub fn delete_by_id(&self, id: impl Into<Value>) -> OrmResult<Vec<Row>> {
        self.run(statement::delete_by_id(self.table_ident()?, id))
    }

    pub fn delete_where(&self, condition: &str, args: &[Value]) -> OrmResult<Vec<Row>> {
        self.run(statement::delete_where(self.table_ident()?, condition, args))
    }

    pub fn truncate(&self) -> OrmResult<Vec<Row>> {
        self.run(statement::truncate(self.table_ident()?))
    }

    /// `INSERT INTO T (cols) <select_query>`. The query is used verbatim.
    pub fn insert_into_select(&self, columns: &[&str], select_query: &str) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.config.ident_policy.check_all(columns)?;
        self.run(statement::insert_into_select(table, columns, select_query))
    }

    /// `UPDATE T SET column = ? [WHERE condition]`. Skips the typed-write
    /// guard and returns no rows.
    pub fn set_value(&self, column: &str, value: impl Into<Value>, condition: Option<&str>) -> OrmResult<()> {
        let table = self.table_ident()?;
        self.config.ident_policy.check(column)?;
        self.run(statement::set_value(table, column, value, condition))?;
        Ok(())
    }

    // ==================== Schema ====================

    /// `CREATE TABLE IF NOT EXISTS` from `(name, type)` pairs in order.
    pub fn create_table(&self, columns: &[(&str, &str)]) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        for (name, _) in columns {
            self.config.ident_policy.check(name)?;
        }
        self.run(statement::create_table(table, columns))
    }

    pub fn alter_table_add_column(&self, column: &str, data_type: &str) -> OrmResult<Vec<Row>> {
        let table = self.table_ident()?;
        self.config.ident_policy.check(column)?;
        self.run(statement::alter_table_add_column(table, column, data_type))
    }

    pub fn drop_table(&self) -> OrmResult<Vec<Row>> {
        self.run(statement::drop_table(self.table_ident()?))
    }

    pub fn describe_table(&self) -> OrmResult<Vec<Row>> {
        self.run(statement::describe_table(self.table_ident()?))
    }

    /// `CREATE INDEX name ON T (cols)`. Returns no rows.
    pub fn create_index(&self, index_name: &str, columns: &[&str]) -> OrmResult<()> {
        let table = self.table_ident()?;
        self.config.ident_policy.check(index_name)?;
        self.config.ident_policy.check_all(columns)?;
        self.run(statement::create_index(table, index_name, columns))?;
        Ok(())
    }

    pub fn show_indexes(&self) -> OrmResult<Vec<Row>> {
        self.run(statement::show_indexes(self.table_ident()?))
    }

    // ==================== Permissions ====================

    /// `GRANT permission ON T TO user`. `user` is an account spec such as
    /// `'app'@'%'` and is used verbatim.
    pub fn grant_permission(&self, user: &str, permission: &str) -> OrmResult<Vec<Row>> {
        self.run(statement::grant_permission(self.table_ident()?, user, permission))
    }

    pub fn revoke_permission(&self, user: &str, permission: &str) -> OrmResult<Vec<Row>> {
        self.run(statement::revoke_permission(self.table_ident()?, user, permission))
    }
}
