//! Loosely-typed clause descriptors.

use serde::Deserialize;
use serde::Serialize;

use super::{FilterClause, FilterOperator};
use crate::error::ViewError;
use crate::model::Value;

/// A `{field, operator, value}` clause as UI code tends to produce it.
///
/// Converting into a [`FilterClause`] checks that the value has the shape
/// the operator needs:
///
/// | operator | value |
/// |----------|-------|
/// | `equals` | any scalar |
/// | `contains` | string, number or bool |
/// | `in` | array of scalars |
/// | `between` | `{"from": .., "to": ..}` (either optional) or `[from, to]` |
///
/// # Example
///
/// ```
/// use tabula::filter::{ClauseSpec, FilterClause};
///
/// let spec: ClauseSpec = serde_json::from_str(
///     r#"{"field": "status", "operator": "in", "value": ["todo", "doing"]}"#,
/// ).unwrap();
/// let clause = FilterClause::try_from(spec).unwrap();
/// assert_eq!(clause, FilterClause::one_of("status", ["todo", "doing"]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseSpec {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ClauseSpec {
    /// Creates a clause descriptor.
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value,
        }
    }
}

impl TryFrom<ClauseSpec> for FilterClause {
    type Error = ViewError;

    fn try_from(spec: ClauseSpec) -> Result<Self, Self::Error> {
        let ClauseSpec {
            field,
            operator,
            value,
        } = spec;
        let op = FilterOperator::from_name(&operator)
            .ok_or_else(|| ViewError::unknown_operator(&field, &operator))?;

        match op {
            FilterOperator::Equals => {
                if !is_scalar(&value) || value.is_null() {
                    return Err(ViewError::invalid_value(field, op.as_str(), "a scalar value"));
                }
                Ok(FilterClause::equals(field, Value::from(value)))
            }
            FilterOperator::Contains => {
                if !is_scalar(&value) || value.is_null() {
                    return Err(ViewError::invalid_value(field, op.as_str(), "a string"));
                }
                let needle = Value::from(value).display_string();
                Ok(FilterClause::contains(field, needle))
            }
            FilterOperator::In => match value {
                serde_json::Value::Array(members) if members.iter().all(is_scalar) => {
                    Ok(FilterClause::one_of(field, members))
                }
                _ => Err(ViewError::invalid_value(field, op.as_str(), "an array of values")),
            },
            FilterOperator::Between => {
                let (from, to) = match value {
                    serde_json::Value::Object(mut bounds) => {
                        if bounds.keys().any(|k| k != "from" && k != "to") {
                            return Err(ViewError::invalid_value(
                                field,
                                op.as_str(),
                                "an object with 'from' and/or 'to'",
                            ));
                        }
                        (bounds.remove("from"), bounds.remove("to"))
                    }
                    serde_json::Value::Array(mut pair) if pair.len() == 2 => {
                        let to = pair.pop();
                        let from = pair.pop();
                        (from, to)
                    }
                    _ => {
                        return Err(ViewError::invalid_value(
                            field,
                            op.as_str(),
                            "an object with 'from' and/or 'to'",
                        ));
                    }
                };
                if !from.iter().chain(to.iter()).all(is_scalar) {
                    return Err(ViewError::invalid_value(field, op.as_str(), "scalar bounds"));
                }
                Ok(FilterClause::between(
                    field,
                    from.map(Value::from),
                    to.map(Value::from),
                ))
            }
        }
    }
}

fn is_scalar(value: &serde_json::Value) -> bool {
    !value.is_array() && !value.is_object()
}
