//! # myorm
//!
//! A small convenience layer over a single MySQL table.
//!
//! ## Features
//!
//! - **One handle per table**: [`TableHandle`] binds a connection descriptor
//!   to a table name and exposes CRUD, schema and permission operations
//! - **Session per call**: every operation opens a session, executes one
//!   statement, commits and closes, on success and on every error path
//! - **Values are bound**: only values go through `?` placeholders;
//!   identifiers and condition fragments are interpolated as given
//!   (see [`IdentPolicy`] for the strict alternative)
//! - **Advisory typed writes**: `insert`, `update_where` and `replace` probe
//!   the information schema first and report values that do not fit the
//!   declared column types, then write anyway
//! - **Statement logging**: SQL, timing and failures go to `tracing`
//!
//! ## Example
//!
//! ```ignore
//! use myorm::{ConnectOptions, Record, TableHandle, values};
//!
//! let users = TableHandle::new(ConnectOptions::from_env()?, "users")?;
//! users.create_table(&[("id", "INT PRIMARY KEY"), ("name", "VARCHAR(50)")])?;
//! users.insert(&Record::new().set("id", 1).set("name", "alice"))?;
//!
//! for row in users.select_where("name = ?", &values!["alice"])? {
//!     let id: i64 = row.try_get_column("id")?;
//!     println!("{id}");
//! }
//! # Ok::<(), myorm::OrmError>(())
//! ```

pub mod check;
pub mod config;
pub mod driver;
pub mod error;
pub mod handle;
pub mod ident;
pub mod monitor;
pub mod prelude;
pub mod record;
pub mod row;
pub mod sql;
pub mod value;

pub use check::{
    CollectingSink, ColumnTypeMap, Diagnostic, DiagnosticSink, StderrSink, TypeFamily, validate,
};
pub use config::{ConnectOptions, HandleConfig};
pub use driver::{Driver, MySqlDriver, MySqlSession, ScopedSession, Session};
pub use error::{OrmError, OrmResult};
pub use handle::TableHandle;
pub use ident::{Ident, IdentPart, IdentPolicy};
pub use monitor::{QueryType, StatementContext, TracingSqlHook};
pub use record::Record;
pub use row::Row;
pub use sql::statement::SortOrder;
pub use sql::{Sql, sql};
pub use value::{FromValue, Value};
