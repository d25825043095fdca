//! Ordered column → value mapping for typed writes.

use crate::value::Value;

/// The data supplied to `insert`, `update_where` and `replace`.
///
/// Iteration follows insertion order, which is also the order of the bound
/// placeholders in the generated statement. Setting a column a second time
/// replaces its value in place.
///
/// ```ignore
/// let data = Record::new().set("id", 1).set("name", "a");
/// users.insert(&data)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::insert`].
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set `column` to `value`, returning the previous value if the column
    /// was already present.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let r = Record::new().set("b", 1).set("a", 2).set("c", 3);
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn reassignment_keeps_position() {
        let mut r = Record::new().set("id", 1).set("name", "a");
        let prev = r.insert("id", 2);
        assert_eq!(prev, Some(Value::Int(1)));
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(r.get("id"), Some(&Value::Int(2)));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn collects_from_pairs() {
        let r: Record = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(r.values().cloned().collect::<Vec<_>>(), vec![Value::Int(1), Value::Int(2)]);
    }
}
