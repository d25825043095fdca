//! Convenient imports for typical `myorm` usage.
//!
//! ```ignore
//! use myorm::prelude::*;
//! ```

pub use crate::{
    ConnectOptions, Diagnostic, FromValue, HandleConfig, IdentPolicy, OrmError, OrmResult, Record,
    Row, SortOrder, TableHandle, Value, values,
};
