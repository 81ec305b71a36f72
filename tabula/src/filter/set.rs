//! The active clause set.

use serde::Deserialize;
use serde::Serialize;

use super::FilterClause;
use crate::model::Row;

/// Active filter clauses, at most one per field, ANDed together.
///
/// Clauses keep the order in which their fields were first filtered;
/// replacing a clause keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause, replacing any clause already on the same field.
    ///
    /// Returns the replaced clause.
    pub fn add(&mut self, clause: FilterClause) -> Option<FilterClause> {
        match self
            .clauses
            .iter_mut()
            .find(|existing| existing.field() == clause.field())
        {
            Some(existing) => Some(std::mem::replace(existing, clause)),
            None => {
                self.clauses.push(clause);
                None
            }
        }
    }

    /// Removes the clause on `field`. Missing clauses are a no-op.
    pub fn remove(&mut self, field: &str) -> Option<FilterClause> {
        let index = self.clauses.iter().position(|c| c.field() == field)?;
        Some(self.clauses.remove(index))
    }

    /// Removes every clause.
    pub fn clear(&mut self) {
        self.clauses.clear();
    }

    /// Returns the clause on `field`, if any.
    pub fn get(&self, field: &str) -> Option<&FilterClause> {
        self.clauses.iter().find(|c| c.field() == field)
    }

    /// Returns the active clauses.
    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Returns the number of active clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if no clauses are active.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns `true` if `item` satisfies every clause.
    pub fn applies_all<T: Row + ?Sized>(&self, item: &T) -> bool {
        self.clauses.iter().all(|clause| clause.matches(item))
    }

    /// Keeps only the indices whose item satisfies every clause.
    pub fn retain<T: Row>(&self, items: &[T], indices: &mut Vec<usize>) {
        if self.clauses.is_empty() {
            return;
        }
        indices.retain(|&i| self.applies_all(&items[i]));
    }
}

impl FromIterator<FilterClause> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterClause>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for clause in iter {
            set.add(clause);
        }
        set
    }
}
