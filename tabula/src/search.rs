//! Free-text search over rows.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::model::Row;

/// How a non-empty query is compared against an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Fuzzy subsequence scoring (nucleo).
    Fuzzy,
}

/// Free-text predicate over one item.
///
/// An empty query matches everything. Otherwise the query is compared
/// against each configured field's display string, or against
/// [`Row::describe`] when no fields are configured.
#[derive(Debug, Clone, Default)]
pub struct SearchMatcher {
    fields: Option<Vec<String>>,
    mode: SearchMode,
}

impl SearchMatcher {
    /// Creates a substring matcher over the whole item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the haystack to the given fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the matching mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the configured fields, if any.
    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    /// Returns the matching mode.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Returns `true` if `item` satisfies `query`.
    pub fn matches<T: Row + ?Sized>(&self, item: &T, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }

        let haystacks = self.haystacks(item);
        match self.mode {
            SearchMode::Substring => {
                let needle = query.to_lowercase();
                haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
            }
            SearchMode::Fuzzy => {
                let mut matcher = Matcher::new(Config::DEFAULT);
                let pattern = fuzzy_pattern(query);
                haystacks
                    .iter()
                    .any(|h| fuzzy_score(&pattern, &mut matcher, h).is_some())
            }
        }
    }

    /// Filters a slice of indices down to those whose item matches.
    ///
    /// Builds the fuzzy pattern once for the whole pass.
    pub fn retain<T: Row>(&self, items: &[T], indices: &mut Vec<usize>, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        match self.mode {
            SearchMode::Substring => {
                let needle = query.to_lowercase();
                indices.retain(|&i| {
                    self.haystacks(&items[i])
                        .iter()
                        .any(|h| h.to_lowercase().contains(&needle))
                });
            }
            SearchMode::Fuzzy => {
                let mut matcher = Matcher::new(Config::DEFAULT);
                let pattern = fuzzy_pattern(query);
                indices.retain(|&i| {
                    self.haystacks(&items[i])
                        .iter()
                        .any(|h| fuzzy_score(&pattern, &mut matcher, h).is_some())
                });
            }
        }
    }

    fn haystacks<T: Row + ?Sized>(&self, item: &T) -> Vec<String> {
        match &self.fields {
            Some(fields) => fields
                .iter()
                .filter_map(|field| item.field(field))
                .map(|value| value.display_string())
                .collect(),
            None => vec![item.describe()],
        }
    }
}

fn fuzzy_pattern(query: &str) -> Pattern {
    Pattern::new(
        query,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    )
}

fn fuzzy_score(pattern: &Pattern, matcher: &mut Matcher, haystack: &str) -> Option<u32> {
    let mut buf = Vec::new();
    let haystack = Utf32Str::new(haystack, &mut buf);
    pattern.score(haystack, matcher)
}
