//! Sort engine.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::{Row, Value};

/// Sort direction for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// One `{field, direction}` sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Creates an ascending key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Creates a descending key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Ordered list of sort keys; the first key has the highest precedence.
///
/// A field appears at most once.
///
/// # Example
///
/// ```
/// use tabula::sort::{SortDirection, SortSpec};
///
/// let mut spec = SortSpec::new();
/// spec.toggle("priority", true);
/// spec.toggle("due", true);
/// spec.toggle("priority", true);
/// assert_eq!(spec.direction_of("priority"), Some(SortDirection::Desc));
/// assert_eq!(spec.keys()[1].field, "due");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Creates an empty (unsorted) spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a spec from keys. Later duplicates of a field are dropped.
    pub fn from_keys(keys: impl IntoIterator<Item = SortKey>) -> Self {
        let mut spec = Self::new();
        for key in keys {
            if spec.position(&key.field).is_none() {
                spec.keys.push(key);
            }
        }
        spec
    }

    /// Returns the keys in precedence order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns `true` if no key is active.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the direction `field` is sorted in, if it is sorted.
    pub fn direction_of(&self, field: &str) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|key| key.field == field)
            .map(|key| key.direction)
    }

    /// Returns the precedence of `field` (0 = primary), if it is sorted.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.keys.iter().position(|key| key.field == field)
    }

    /// Cycles `field` through `asc → desc → unsorted`.
    ///
    /// A field not yet sorted is appended as ascending when `multi` is set,
    /// and otherwise replaces every key.
    pub fn toggle(&mut self, field: &str, multi: bool) {
        match self.position(field) {
            Some(index) => match self.keys[index].direction {
                SortDirection::Asc => self.keys[index].direction = SortDirection::Desc,
                SortDirection::Desc => {
                    self.keys.remove(index);
                }
            },
            None => {
                if !multi {
                    self.keys.clear();
                }
                self.keys.push(SortKey::asc(field));
            }
        }
    }

    /// Sorts `field` in `direction`.
    ///
    /// An already-sorted field keeps its precedence. Otherwise the key is
    /// appended (`multi`) or replaces every key.
    pub fn set(&mut self, field: &str, direction: SortDirection, multi: bool) {
        match self.position(field) {
            Some(index) => self.keys[index].direction = direction,
            None => {
                if !multi {
                    self.keys.clear();
                }
                self.keys.push(SortKey {
                    field: field.to_string(),
                    direction,
                });
            }
        }
    }

    /// Removes `field` from the sort keys.
    pub fn remove(&mut self, field: &str) -> bool {
        match self.position(field) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Returns the items ordered by `spec`, leaving the input untouched.
///
/// The sort is stable: items equal on every key keep their input order.
pub fn sort<'a, T: Row>(items: &'a [T], spec: &SortSpec) -> Vec<&'a T> {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    sort_indices(items, &mut indices, spec);
    indices.into_iter().map(|i| &items[i]).collect()
}

/// Stable-sorts indices into `items` by `spec`.
///
/// Field values are read once per item and key, not once per comparison.
pub fn sort_indices<T: Row>(items: &[T], indices: &mut Vec<usize>, spec: &SortSpec) {
    if spec.is_empty() || indices.len() < 2 {
        return;
    }

    let mut decorated: Vec<(Vec<Option<Value>>, usize)> = indices
        .iter()
        .map(|&i| {
            let fields = spec
                .keys
                .iter()
                .map(|key| items[i].field(&key.field).filter(|v| !v.is_null()))
                .collect();
            (fields, i)
        })
        .collect();

    decorated.sort_by(|(a, _), (b, _)| {
        spec.keys
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|(key, (a, b))| compare_keyed(a.as_ref(), b.as_ref(), key.direction))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    *indices = decorated.into_iter().map(|(_, i)| i).collect();
}

/// Compares two optional field values under a direction.
///
/// Absent values sort last in both directions; only present values are
/// affected by `desc`.
pub fn compare_keyed(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Number,
    Date,
    Bool,
    Text,
}

fn classify(value: &Value) -> Class {
    match value {
        Value::Int(_) | Value::Float(_) => Class::Number,
        Value::DateTime(_) => Class::Date,
        Value::String(s) if crate::model::parse_date_like(s).is_some() => Class::Date,
        Value::Bool(_) => Class::Bool,
        Value::Null | Value::String(_) | Value::List(_) => Class::Text,
    }
}

/// Total order over values of mixed type.
///
/// Numbers compare numerically, datetimes and ISO-8601-like strings
/// chronologically, bools `false < true`, and everything else as text
/// (case-insensitive, then case-sensitive to break ties). Values of
/// different classes order by class: numbers, dates, bools, text.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (class_a, class_b) = (classify(a), classify(b));
    if class_a != class_b {
        return class_a.cmp(&class_b);
    }
    match class_a {
        Class::Number => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
        Class::Date => match (a.as_datetime(), b.as_datetime()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        },
        Class::Bool => match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
        Class::Text => compare_text(&a.display_string(), &b.display_string()),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
