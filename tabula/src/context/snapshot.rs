//! Read-only view of the derived state.

use crate::actions::{RowAction, TableAction};
use crate::columns::Column;
use crate::filter::FilterClause;
use crate::pagination::PageSummary;
use crate::selection::Selection;
use crate::sort::SortSpec;
use crate::view_mode::ViewMode;

/// Everything a renderer reads, borrowed from a [`ViewContext`](super::ViewContext).
///
/// Renderers never mutate any of this. They send intents back instead.
pub struct ViewSnapshot<'a, T> {
    /// Items on the current page, in display order.
    pub items: Vec<&'a T>,
    /// Keys of `items`, index for index.
    pub keys: Vec<String>,
    /// Position of the page within the filtered, searched set.
    pub page: PageSummary,
    /// Active filter clauses.
    pub filters: &'a [FilterClause],
    /// Committed search query.
    pub search: &'a str,
    pub sort: &'a SortSpec,
    pub view_mode: ViewMode,
    pub selection: &'a Selection<String>,
    /// Column definitions in display order.
    pub columns: Vec<&'a Column<T>>,
    pub table_actions: &'a [TableAction],
    pub row_actions: &'a [RowAction<T>],
}

impl<T> ViewSnapshot<'_, T> {
    /// Returns `true` if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates `(key, item, selected)` for each visible row.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &T, bool)> + '_ {
        self.keys
            .iter()
            .zip(self.items.iter())
            .map(|(key, item)| (key.as_str(), *item, self.selection.is_selected(key)))
    }

    /// Number of visible rows that are selected.
    pub fn selected_visible(&self) -> usize {
        self.selection.count_in(self.keys.iter())
    }

    /// Returns `true` if every visible row is selected.
    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_selected(self.keys.iter())
    }
}

impl<T> std::fmt::Debug for ViewSnapshot<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSnapshot")
            .field("keys", &self.keys)
            .field("page", &self.page)
            .field("filters", &self.filters)
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("view_mode", &self.view_mode)
            .field("selected", &self.selection.count())
            .finish_non_exhaustive()
    }
}
