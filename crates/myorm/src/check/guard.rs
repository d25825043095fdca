use super::types::{ColumnTypeMap, TypeFamily};
use crate::record::Record;
use crate::value::Value;
use std::fmt;

/// An advisory finding about one value of a typed write.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The value does not belong to the column's declared type family.
    TypeMismatch {
        column: String,
        value: Value,
        family: TypeFamily,
        declared_type: String,
    },
    /// The column is not in the introspected map.
    UnknownColumn { column: String, table: String },
}

impl Diagnostic {
    pub fn column(&self) -> &str {
        match self {
            Diagnostic::TypeMismatch { column, .. } | Diagnostic::UnknownColumn { column, .. } => {
                column
            }
        }
    }
}

/// One diagnostic line, e.g. `Error: 1 is not a integer, expected type int`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TypeMismatch {
                value,
                family,
                declared_type,
                ..
            } => write!(
                f,
                "Error: {value} is not a {}, expected type {declared_type}",
                family.kind_name()
            ),
            Diagnostic::UnknownColumn { column, table } => {
                write!(f, "Error: column {column} is not in table {table}")
            }
        }
    }
}

/// Compare every `(column, value)` of `data` with the declared types.
///
/// Returns diagnostics in record order, at most one per column. An empty
/// map means nothing is known about the table and nothing is reported.
pub fn validate(types: &ColumnTypeMap, data: &Record) -> Vec<Diagnostic> {
    if types.is_empty() {
        return Vec::new();
    }

    let mut diagnostics = Vec::new();
    for (column, value) in data.iter() {
        let Some(declared_type) = types.declared_type(column) else {
            diagnostics.push(Diagnostic::UnknownColumn {
                column: column.to_string(),
                table: types.table().to_string(),
            });
            continue;
        };

        let family = TypeFamily::classify(declared_type);
        if !family.accepts(value) {
            diagnostics.push(Diagnostic::TypeMismatch {
                column: column.to_string(),
                value: value.clone(),
                family,
                declared_type: declared_type.to_string(),
            });
        }
    }
    diagnostics
}
