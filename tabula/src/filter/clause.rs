//! Filter clauses and their predicates.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::{Row, Value};

/// Clause value meaning "no constraint" for `equals` and `in`.
pub const ALL_SENTINEL: &str = "all";

/// The operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Equals,
    Contains,
    In,
    Between,
}

impl FilterOperator {
    /// Returns the canonical operator name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::In => "in",
            FilterOperator::Between => "between",
        }
    }

    /// Looks an operator up by name, accepting common aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "equals" | "eq" | "=" | "==" => Some(FilterOperator::Equals),
            "contains" | "like" => Some(FilterOperator::Contains),
            "in" | "oneof" => Some(FilterOperator::In),
            "between" | "range" => Some(FilterOperator::Between),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field/operator/value condition.
///
/// The operator is the variant, so each value has the shape its operator
/// needs. A filter set holds at most one clause per field.
///
/// # Equality
///
/// `Equals` (and membership in `In`) follows one coercion rule:
///
/// - the clause value `"all"` means no constraint, as does a null clause value;
/// - a missing or null field never matches;
/// - when neither side is a string, values compare natively (ints and floats
///   numerically, bools by value, datetimes by instant, other pairings unequal);
/// - when either side is a string, a datetime against a date-like string
///   compares chronologically; anything else compares display strings exactly;
/// - a list-valued field matches when any element matches.
///
/// # Example
///
/// ```
/// use tabula::filter::FilterClause;
///
/// let status = FilterClause::equals("status", "done");
/// let title = FilterClause::contains("title", "launch");
/// let owner = FilterClause::one_of("owner", ["ada", "grace"]);
/// let due = FilterClause::between("due", Some("2024-01-01"), None::<&str>);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "lowercase")]
pub enum FilterClause {
    /// `field == value`
    Equals { field: String, value: Value },
    /// Case-insensitive substring of the field's display string.
    Contains { field: String, needle: String },
    /// Field value is a member of `values`.
    In { field: String, values: Vec<Value> },
    /// `from <= field <= to`, either bound optional.
    Between {
        field: String,
        from: Option<Value>,
        to: Option<Value>,
    },
}

impl FilterClause {
    /// Creates an equality clause.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterClause::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a substring clause.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        FilterClause::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Creates a membership clause.
    pub fn one_of<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FilterClause::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a range clause.
    ///
    /// Null and blank-string bounds are treated as absent.
    pub fn between<F, T>(field: impl Into<String>, from: Option<F>, to: Option<T>) -> Self
    where
        F: Into<Value>,
        T: Into<Value>,
    {
        FilterClause::Between {
            field: field.into(),
            from: normalize_bound(from.map(Into::into)),
            to: normalize_bound(to.map(Into::into)),
        }
    }

    /// Returns the field this clause constrains.
    pub fn field(&self) -> &str {
        match self {
            FilterClause::Equals { field, .. }
            | FilterClause::Contains { field, .. }
            | FilterClause::In { field, .. }
            | FilterClause::Between { field, .. } => field,
        }
    }

    /// Returns the operator of this clause.
    pub fn operator(&self) -> FilterOperator {
        match self {
            FilterClause::Equals { .. } => FilterOperator::Equals,
            FilterClause::Contains { .. } => FilterOperator::Contains,
            FilterClause::In { .. } => FilterOperator::In,
            FilterClause::Between { .. } => FilterOperator::Between,
        }
    }

    /// Returns `true` if the clause places no constraint on any item.
    pub fn is_unconstrained(&self) -> bool {
        match self {
            FilterClause::Equals { value, .. } => value.is_null() || is_all_sentinel(value),
            FilterClause::Contains { needle, .. } => needle.is_empty(),
            FilterClause::In { values, .. } => {
                values.is_empty() || values.iter().any(is_all_sentinel)
            }
            FilterClause::Between { from, to, .. } => from.is_none() && to.is_none(),
        }
    }

    /// Evaluates the clause against one item.
    pub fn matches<T: Row + ?Sized>(&self, item: &T) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        let Some(actual) = item.field(self.field()).filter(|v| !v.is_null()) else {
            return false;
        };

        match self {
            FilterClause::Equals { value, .. } => values_equal(&actual, value),
            FilterClause::Contains { needle, .. } => actual
                .display_string()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            FilterClause::In { values, .. } => {
                values.iter().any(|member| values_equal(&actual, member))
            }
            FilterClause::Between { from, to, .. } => {
                within(&actual, from.as_ref(), to.as_ref())
            }
        }
    }
}

impl std::fmt::Display for FilterClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterClause::Equals { field, value } => write!(f, "{} = {}", field, value),
            FilterClause::Contains { field, needle } => write!(f, "{} contains '{}'", field, needle),
            FilterClause::In { field, values } => {
                let parts: Vec<_> = values.iter().map(Value::display_string).collect();
                write!(f, "{} in [{}]", field, parts.join(", "))
            }
            FilterClause::Between { field, from, to } => write!(
                f,
                "{} between {} and {}",
                field,
                from.as_ref().map_or_else(|| "*".to_string(), Value::display_string),
                to.as_ref().map_or_else(|| "*".to_string(), Value::display_string),
            ),
        }
    }
}

fn is_all_sentinel(value: &Value) -> bool {
    value.as_str() == Some(ALL_SENTINEL)
}

/// Drops null and blank bounds.
pub(crate) fn normalize_bound(bound: Option<Value>) -> Option<Value> {
    bound.filter(|value| match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// Equality under the clause coercion rule (see [`FilterClause`]).
pub(crate) fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::List(items), _) => items.iter().any(|item| values_equal(item, expected)),
        (Value::String(_), _) | (_, Value::String(_)) => {
            let either_datetime =
                matches!(actual, Value::DateTime(_)) || matches!(expected, Value::DateTime(_));
            if either_datetime
                && let (Some(a), Some(b)) = (actual.as_datetime(), expected.as_datetime())
            {
                return a == b;
            }
            actual.display_string() == expected.display_string()
        }
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            actual.as_number() == expected.as_number()
        }
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::DateTime(a), Value::DateTime(b)) => a == b,
        _ => false,
    }
}

fn within(actual: &Value, from: Option<&Value>, to: Option<&Value>) -> bool {
    if let Value::List(items) = actual {
        return items.iter().any(|item| within(item, from, to));
    }
    let lower_ok = from.is_none_or(|bound| {
        bound_cmp(actual, bound).is_some_and(|ord| ord != Ordering::Less)
    });
    let upper_ok = to.is_none_or(|bound| {
        bound_cmp(actual, bound).is_some_and(|ord| ord != Ordering::Greater)
    });
    lower_ok && upper_ok
}

/// Orders a field value against a range bound.
///
/// Numbers first, then dates, then plain text when both sides are strings.
/// Anything else is incomparable and falls outside the range.
fn bound_cmp(actual: &Value, bound: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (actual.as_number(), bound.as_number()) {
        return Some(a.total_cmp(&b));
    }
    if let (Some(a), Some(b)) = (actual.as_datetime(), bound.as_datetime()) {
        return Some(a.cmp(&b));
    }
    match (actual, bound) {
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}
