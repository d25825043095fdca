use crate::error::{OrmError, OrmResult};
use crate::row::Row;
use crate::value::Value;
use std::collections::HashMap;

/// Coarse family of a declared column type.
///
/// Classification looks at the case-sensitive prefix of the declared type
/// string exactly as the information schema reports it: `int…` is
/// [`Integer`](TypeFamily::Integer), `float…` is
/// [`Floating`](TypeFamily::Floating), `varchar…` is
/// [`Character`](TypeFamily::Character). Everything else, including
/// `bigint`, `tinyint`, `double`, `decimal`, `text` and upper-cased names,
/// is [`Unchecked`](TypeFamily::Unchecked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Integer,
    Floating,
    Character,
    Unchecked,
}

impl TypeFamily {
    pub fn classify(declared_type: &str) -> Self {
        if declared_type.starts_with("int") {
            TypeFamily::Integer
        } else if declared_type.starts_with("float") {
            TypeFamily::Floating
        } else if declared_type.starts_with("varchar") {
            TypeFamily::Character
        } else {
            TypeFamily::Unchecked
        }
    }

    /// Whether `value` belongs to this family.
    ///
    /// Integer columns accept signed, unsigned and boolean values. Floating
    /// columns accept only floats, so an integer bound for a `float` column
    /// is reported. Character columns accept only text.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            TypeFamily::Integer => {
                matches!(value, Value::Int(_) | Value::UInt(_) | Value::Bool(_))
            }
            TypeFamily::Floating => matches!(value, Value::Float(_)),
            TypeFamily::Character => matches!(value, Value::Text(_)),
            TypeFamily::Unchecked => true,
        }
    }

    /// The noun used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeFamily::Integer => "integer",
            TypeFamily::Floating => "float",
            TypeFamily::Character => "string",
            TypeFamily::Unchecked => "value",
        }
    }
}

/// Column name → declared type for one table, as reported by the
/// information-schema probe.
///
/// Built fresh for every typed write. When the probe is not scoped to a
/// database and several schemas hold a table of the same name, the map is
/// the union of their columns and the last row reported for a column wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTypeMap {
    table: String,
    columns: HashMap<String, String>,
}

impl ColumnTypeMap {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: HashMap::new(),
        }
    }

    pub fn from_pairs<C, T>(table: impl Into<String>, pairs: impl IntoIterator<Item = (C, T)>) -> Self
    where
        C: Into<String>,
        T: Into<String>,
    {
        let mut map = Self::new(table);
        for (column, declared) in pairs {
            map.insert(column, declared);
        }
        map
    }

    /// Build the map from probe rows of `(COLUMN_NAME, DATA_TYPE)`.
    pub fn from_rows(table: impl Into<String>, rows: &[Row]) -> OrmResult<Self> {
        let mut map = Self::new(table);
        for row in rows {
            if row.len() < 2 {
                return Err(OrmError::decode(
                    "DATA_TYPE",
                    format!("expected 2 columns in probe row, got {}", row.len()),
                ));
            }
            let column: String = row.try_get(0)?;
            let declared: String = row.try_get(1)?;
            map.insert(column, declared);
        }
        Ok(map)
    }

    pub fn insert(&mut self, column: impl Into<String>, declared_type: impl Into<String>) {
        self.columns.insert(column.into(), declared_type.into());
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn declared_type(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    pub fn family(&self, column: &str) -> Option<TypeFamily> {
        self.declared_type(column).map(TypeFamily::classify)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
