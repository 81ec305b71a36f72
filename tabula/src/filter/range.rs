//! Range drafts: two inputs, one `between` clause.
//!
//! A date or number range is edited through two separate controls, a "from"
//! and a "to", both addressing one logical field. Partial edits accumulate
//! here per base field and materialize as a single `Between` clause.

use std::collections::HashMap;

use super::FilterClause;
use super::clause::normalize_bound;
use crate::model::Value;

/// Which end of a range a control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    From,
    To,
}

impl RangeBound {
    /// Splits a control name into its base field and bound.
    ///
    /// Recognizes `due_from`/`due_to` and `dueFrom`/`dueTo`.
    ///
    /// ```
    /// use tabula::filter::RangeBound;
    ///
    /// assert_eq!(RangeBound::split_field("due_from"), Some(("due", RangeBound::From)));
    /// assert_eq!(RangeBound::split_field("createdAtTo"), Some(("createdAt", RangeBound::To)));
    /// assert_eq!(RangeBound::split_field("status"), None);
    /// ```
    pub fn split_field(name: &str) -> Option<(&str, RangeBound)> {
        const SUFFIXES: [(&str, RangeBound); 4] = [
            ("_from", RangeBound::From),
            ("_to", RangeBound::To),
            ("From", RangeBound::From),
            ("To", RangeBound::To),
        ];
        SUFFIXES.iter().find_map(|(suffix, bound)| {
            name.strip_suffix(suffix)
                .filter(|base| !base.is_empty())
                .map(|base| (base, *bound))
        })
    }
}

/// What a range edit did to the clause set.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeEdit {
    /// The field now has this `Between` clause.
    Set(FilterClause),
    /// Both bounds are empty; the clause on this field goes away.
    Clear(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
struct RangeDraft {
    from: Option<Value>,
    to: Option<Value>,
}

/// Partial range edits keyed by base field name.
#[derive(Debug, Clone, Default)]
pub struct RangeDrafts {
    drafts: HashMap<String, RangeDraft>,
}

impl RangeDrafts {
    /// Creates an empty draft store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one bound of the range on `field`.
    ///
    /// `None`, null and blank strings clear the bound.
    pub fn set(&mut self, field: &str, bound: RangeBound, value: Option<Value>) -> RangeEdit {
        let value = normalize_bound(value);
        let draft = self.drafts.entry(field.to_string()).or_default();
        match bound {
            RangeBound::From => draft.from = value,
            RangeBound::To => draft.to = value,
        }

        if draft.from.is_none() && draft.to.is_none() {
            self.drafts.remove(field);
            return RangeEdit::Clear(field.to_string());
        }
        RangeEdit::Set(FilterClause::Between {
            field: field.to_string(),
            from: draft.from.clone(),
            to: draft.to.clone(),
        })
    }

    /// Sets a bound by control name (`due_from`, `dueTo`, ...).
    ///
    /// Returns `None` when the name carries no range suffix.
    pub fn set_control(&mut self, control: &str, value: Option<Value>) -> Option<RangeEdit> {
        let (field, bound) = RangeBound::split_field(control)?;
        Some(self.set(field, bound, value))
    }

    /// Returns the current `(from, to)` draft for `field`.
    pub fn get(&self, field: &str) -> Option<(Option<&Value>, Option<&Value>)> {
        self.drafts
            .get(field)
            .map(|draft| (draft.from.as_ref(), draft.to.as_ref()))
    }

    /// Forgets the draft for `field`.
    pub fn discard(&mut self, field: &str) {
        self.drafts.remove(field);
    }

    /// Forgets every draft.
    pub fn clear(&mut self) {
        self.drafts.clear();
    }
}
