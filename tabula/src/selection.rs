//! Selection manager.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Deserialize;
use serde::Serialize;

/// Selection mode for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single item selection (radio-button style).
    Single,
    /// Multiple items can be selected (checkbox style).
    #[default]
    Multi,
}

/// Tracks selected items by their keys.
///
/// Selection is independent of what is currently visible: filtering, sorting,
/// searching or paging never deselects anything. Only explicit toggles,
/// deselects and clears do.
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash = String> {
    mode: SelectionMode,
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::multi()
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create a selection in the given mode.
    pub fn with_mode(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Create selection with no selection allowed.
    pub fn none() -> Self {
        Self::with_mode(SelectionMode::None)
    }

    /// Create single-selection mode.
    pub fn single() -> Self {
        Self::with_mode(SelectionMode::Single)
    }

    /// Create multi-selection mode.
    pub fn multi() -> Self {
        Self::with_mode(SelectionMode::Multi)
    }

    /// Get the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Toggle selection for a key. Returns true if selection changed.
    pub fn toggle(&mut self, key: K) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(&key) {
                    self.selected.clear();
                } else {
                    self.selected.clear();
                    self.selected.insert(key);
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&key) {
                    self.selected.insert(key);
                }
                true
            }
        }
    }

    /// Select every key passed in.
    ///
    /// Only the given keys are added; nothing outside them is touched. In
    /// single mode the first key wins.
    pub fn select_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => match keys.into_iter().next() {
                Some(key) => {
                    self.selected.clear();
                    self.selected.insert(key);
                    true
                }
                None => false,
            },
            SelectionMode::Multi => {
                let before = self.selected.len();
                self.selected.extend(keys);
                self.selected.len() != before
            }
        }
    }

    /// Deselect every key passed in.
    pub fn deselect<'a, I>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let before = self.selected.len();
        for key in keys {
            self.selected.remove(key);
        }
        self.selected.len() != before
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected keys.
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of the given keys that are selected.
    ///
    /// Use this with the visible keys for bulk-action counts scoped to what
    /// the user can see.
    pub fn count_in<'a, I>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter().filter(|key| self.selected.contains(*key)).count()
    }

    /// Returns `true` if every one of the given keys is selected.
    ///
    /// An empty key list is never "all selected".
    pub fn all_selected<'a, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut any = false;
        for key in keys {
            if !self.selected.contains(key) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Get all selected keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }
}
