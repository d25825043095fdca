//! Result rows and typed accessors

use crate::error::{OrmError, OrmResult};
use crate::value::{FromValue, Value};
use std::sync::Arc;

/// One row of a result set: an ordered tuple of field values as the driver
/// returned them, plus the column labels shared by every row of the set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Build a row from positional values with no column labels.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            columns: Arc::from(Vec::<String>::new()),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Field at position `idx`.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Field by column label. Labels are matched exactly first, then
    /// ASCII-case-insensitively (MySQL reports information-schema labels in
    /// upper case).
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))?;
        self.values.get(idx)
    }

    /// Decode the field at position `idx`.
    pub fn try_get<T: FromValue>(&self, idx: usize) -> OrmResult<T> {
        let value = self
            .get(idx)
            .ok_or_else(|| OrmError::decode(idx.to_string(), "column index out of range"))?;
        T::from_value(value).map_err(|e| OrmError::decode(idx.to_string(), e.to_string()))
    }

    /// Decode the field labelled `name`.
    pub fn try_get_column<T: FromValue>(&self, name: &str) -> OrmResult<T> {
        let value = self
            .get_by_name(name)
            .ok_or_else(|| OrmError::decode(name, "no such column"))?;
        T::from_value(value).map_err(|e| OrmError::decode(name, e.to_string()))
    }
}

impl std::ops::Index<usize> for Row {
    type Output = Value;

    fn index(&self, idx: usize) -> &Value {
        &self.values[idx]
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        let columns: Arc<[String]> = Arc::from(vec!["COLUMN_NAME".to_string(), "DATA_TYPE".to_string()]);
        Row::new(
            columns,
            vec![Value::from("id"), Value::Bytes(b"int".to_vec())],
        )
    }

    #[test]
    fn get_by_name_falls_back_to_case_insensitive() {
        let row = sample();
        assert_eq!(row.get_by_name("COLUMN_NAME"), Some(&Value::from("id")));
        assert_eq!(row.get_by_name("column_name"), Some(&Value::from("id")));
        assert_eq!(row.get_by_name("missing"), None);
    }

    #[test]
    fn try_get_decodes_binary_text() {
        let row = sample();
        let data_type: String = row.try_get(1).unwrap();
        assert_eq!(data_type, "int");
    }

    #[test]
    fn try_get_reports_column_on_failure() {
        let row = sample();
        let err = row.try_get_column::<i64>("COLUMN_NAME").unwrap_err();
        assert!(matches!(err, OrmError::Decode { ref column, .. } if column == "COLUMN_NAME"));
        assert!(row.try_get::<String>(5).is_err());
    }
}
