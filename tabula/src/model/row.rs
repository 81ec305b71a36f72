//! The `Row` trait: how the engine reads items.

use super::Value;

/// Read-only field access for items shown in a view.
///
/// The engine is generic over the item type and only ever looks at an item
/// through this trait. A field that does not exist yields `None`, which
/// sorts last and never satisfies a filter.
///
/// # Example
///
/// ```
/// use tabula::model::{Row, Value};
///
/// struct Task {
///     id: u32,
///     title: String,
/// }
///
/// impl Row for Task {
///     fn field(&self, key: &str) -> Option<Value> {
///         match key {
///             "id" => Some(self.id.into()),
///             "title" => Some(self.title.as_str().into()),
///             _ => None,
///         }
///     }
///
///     fn describe(&self) -> String {
///         format!("{} {}", self.id, self.title)
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value addressed by `key`, if the item has it.
    fn field(&self, key: &str) -> Option<Value>;

    /// Shallow string serialization of the item.
    ///
    /// Used as the fallback haystack for free-text search and by the default
    /// key extractor.
    fn describe(&self) -> String;
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// JSON rows. Dotted keys (`owner.name`) walk nested objects.
impl Row for serde_json::Value {
    fn field(&self, key: &str) -> Option<Value> {
        let mut current = self;
        for segment in key.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(segment)?,
                serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(Value::from(current.clone()))
    }

    fn describe(&self) -> String {
        match self {
            serde_json::Value::Object(map) => map
                .values()
                .filter(|v| !v.is_object() && !v.is_array())
                .map(|v| Value::from(v.clone()).display_string())
                .collect::<Vec<_>>()
                .join(" "),
            other => Value::from(other.clone()).display_string(),
        }
    }
}
