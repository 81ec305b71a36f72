//! Intents: the commands renderers send back into a view.

use std::time::Instant;

use super::ViewContext;
use crate::filter::{ClauseSpec, FilterClause, RangeBound};
use crate::model::{Row, Value};
use crate::sort::SortDirection;
use crate::view_mode::ViewMode;

/// A state change requested by a renderer.
///
/// Every intent also exists as a method on [`ViewContext`]; the enum is
/// for hosts that route UI events through one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewIntent {
    SetPage(usize),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    SetPerPage(usize),
    AddFilter(FilterClause),
    /// Loosely-typed clause; malformed ones are logged and ignored.
    ApplyClauseSpec(ClauseSpec),
    RemoveFilter(String),
    ClearFilters,
    /// One end of a range edited through its own control.
    SetRangeBound {
        field: String,
        bound: RangeBound,
        value: Option<Value>,
    },
    ToggleSort(String),
    SetSort {
        field: String,
        direction: SortDirection,
    },
    ClearSort,
    /// Raw search box text; committed after the debounce window.
    SetSearchQuery(String),
    /// Commit the pending search text now.
    CommitSearch,
    SetViewMode(ViewMode),
    ToggleSelection(String),
    SelectAll(Vec<String>),
    /// Select every row on the current page.
    SelectVisible,
    ClearSelection,
    ReorderColumn {
        source: String,
        target: String,
    },
}

impl<T: Row + 'static> ViewContext<T> {
    /// Applies an intent, reading the clock for search debouncing.
    pub fn dispatch(&mut self, intent: ViewIntent) {
        self.dispatch_at(intent, Instant::now());
    }

    /// Applies an intent at an explicit instant.
    pub fn dispatch_at(&mut self, intent: ViewIntent, now: Instant) {
        log::debug!("dispatch {:?}", intent);
        match intent {
            ViewIntent::SetPage(page) => self.set_page(page),
            ViewIntent::NextPage => {
                self.next_page();
            }
            ViewIntent::PrevPage => {
                self.prev_page();
            }
            ViewIntent::FirstPage => self.first_page(),
            ViewIntent::LastPage => self.last_page(),
            ViewIntent::SetPerPage(per_page) => self.set_per_page(per_page),
            ViewIntent::AddFilter(clause) => self.add_filter(clause),
            ViewIntent::ApplyClauseSpec(spec) => {
                self.apply_clause_spec(spec);
            }
            ViewIntent::RemoveFilter(field) => self.remove_filter(&field),
            ViewIntent::ClearFilters => self.clear_filters(),
            ViewIntent::SetRangeBound {
                field,
                bound,
                value,
            } => self.set_range_bound(&field, bound, value),
            ViewIntent::ToggleSort(field) => {
                self.toggle_sort(&field);
            }
            ViewIntent::SetSort { field, direction } => self.set_sort(&field, direction),
            ViewIntent::ClearSort => self.clear_sort(),
            ViewIntent::SetSearchQuery(raw) => self.set_search_query_at(raw, now),
            ViewIntent::CommitSearch => self.commit_search(),
            ViewIntent::SetViewMode(mode) => self.set_view_mode(mode),
            ViewIntent::ToggleSelection(key) => {
                self.toggle_selection(key);
            }
            ViewIntent::SelectAll(keys) => {
                self.select_all(keys);
            }
            ViewIntent::SelectVisible => {
                self.select_visible();
            }
            ViewIntent::ClearSelection => self.clear_selection(),
            ViewIntent::ReorderColumn { source, target } => {
                self.reorder_column(&source, &target);
            }
        }
    }
}
