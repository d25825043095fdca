//! The typed-write guard.
//!
//! Before `insert`, `update_where` and `replace`, a handle reads the declared
//! column types of its table from the information schema and compares every
//! supplied value with the type family of its column. Mismatches become
//! [`Diagnostic`]s handed to a [`DiagnosticSink`]; they never stop the write.
//!
//! The comparison itself is a pure function:
//!
//! ```ignore
//! use myorm::check::{validate, ColumnTypeMap};
//! use myorm::Record;
//!
//! let types = ColumnTypeMap::from_pairs("users", [("id", "int"), ("name", "varchar")]);
//! let data = Record::new().set("id", "1").set("name", "a");
//! let diagnostics = validate(&types, &data);
//! assert_eq!(diagnostics[0].to_string(), "Error: 1 is not a integer, expected type int");
//! ```

mod guard;
mod sink;
mod types;


pub use guard::{Diagnostic, validate};
pub use sink::{CollectingSink, DiagnosticSink, StderrSink};
pub use types::{ColumnTypeMap, TypeFamily};
