use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Items from a list endpoint together with whatever pagination metadata the
/// envelope carried.
///
/// `total_count` and `per_page` are only `Some` when that particular response
/// included them; a bare JSON array carries neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    items: Vec<T>,
    total_count: Option<u64>,
    per_page: Option<u64>,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
            per_page: None,
        }
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn per_page(&self) -> Option<u64> {
        self.per_page
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Accepts either a JSON array or an object envelope holding the items
    /// under `data` or `items`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut envelope) => {
                let total_count = envelope.get("total_count").and_then(Value::as_u64);
                let per_page = envelope.get("per_page").and_then(Value::as_u64);
                let items = envelope
                    .remove("data")
                    .or_else(|| envelope.remove("items"))
                    .unwrap_or_else(|| Value::Array(Vec::new()));
                let items = match items {
                    Value::Null => Vec::new(),
                    other => serde_json::from_value(other)?,
                };
                Ok(Self {
                    items,
                    total_count,
                    per_page,
                })
            }
            other => Ok(Self::new(serde_json::from_value(other)?)),
        }
    }
}

impl<T> Deref for ListResponse<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListResponse<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}
