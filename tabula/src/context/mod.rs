//! View composition context.
//!
//! [`ViewContext`] owns every piece of view state and the derived slice.
//! The derivation order is fixed:
//!
//! raw items → filters → search → sort → pagination → renderer
//!
//! Selection and column order sit beside the pipeline; renderers read them
//! directly and they never affect which rows are visible.

mod intent;
mod snapshot;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

pub use intent::ViewIntent;
pub use snapshot::ViewSnapshot;

use crate::actions::{RowAction, TableAction};
use crate::columns::{Column, ColumnOrder, ColumnSet};
use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::filter::{ClauseSpec, FilterClause, FilterSet, RangeBound, RangeDrafts, RangeEdit};
use crate::key::KeyExtractor;
use crate::model::{Row, Value};
use crate::pagination::{PageSummary, Pagination, paginate_with_total, total_pages};
use crate::search::SearchMatcher;
use crate::selection::Selection;
use crate::sort::{SortDirection, SortSpec, sort_indices};
use crate::view_mode::ViewMode;

/// State container turning a collection into what the user sees.
///
/// Each view owns its own context; nothing is shared between views.
/// Mutations are intents (see [`ViewIntent`]); reads go through
/// [`snapshot`](Self::snapshot). Anything that can change the set or order
/// of matched rows recomputes them immediately, then pulls the current page
/// back into range if it fell off the end.
///
/// # Example
///
/// ```
/// use tabula::columns::{Column, ColumnSet};
/// use tabula::config::ViewConfig;
/// use tabula::filter::FilterClause;
/// use tabula::key::KeyExtractor;
/// use tabula::model::Record;
/// use tabula::ViewContext;
///
/// let columns = ColumnSet::new(vec![
///     Column::new("title", "Title").sortable(),
///     Column::new("status", "Status"),
/// ]).unwrap();
///
/// let mut view = ViewContext::new(columns, ViewConfig::default().with_per_page(2))
///     .with_key_extractor(KeyExtractor::field("id"))
///     .with_items(vec![
///         Record::new().set("id", 1).set("title", "Plan").set("status", "done"),
///         Record::new().set("id", 2).set("title", "Build").set("status", "todo"),
///         Record::new().set("id", 3).set("title", "Ship").set("status", "done"),
///     ]);
///
/// view.add_filter(FilterClause::equals("status", "done"));
/// view.toggle_sort("title");
///
/// let snapshot = view.snapshot();
/// assert_eq!(snapshot.keys, vec!["1", "3"]);
/// assert!(!snapshot.page.has_next);
/// ```
pub struct ViewContext<T> {
    items: Arc<[T]>,
    columns: ColumnSet<T>,
    column_order: ColumnOrder,
    filters: FilterSet,
    ranges: RangeDrafts,
    matcher: SearchMatcher,
    pending_search: Debouncer<String>,
    raw_search: String,
    search: String,
    sort: SortSpec,
    multi_sort: bool,
    pagination: Pagination,
    page_size_options: Vec<usize>,
    total_override: Option<usize>,
    selection: Selection<String>,
    view_mode: ViewMode,
    key: KeyExtractor<T>,
    table_actions: Vec<TableAction>,
    row_actions: Vec<RowAction<T>>,
    /// Filtered, searched and sorted indices into `items`.
    matched: Vec<usize>,
    revision: u64,
}

impl<T: Row + 'static> ViewContext<T> {
    /// Creates an empty view over `columns`.
    pub fn new(columns: ColumnSet<T>, config: ViewConfig) -> Self {
        let mut matcher = SearchMatcher::new().with_mode(config.search_mode);
        if let Some(fields) = config.search_fields {
            matcher = matcher.with_fields(fields);
        }
        Self {
            items: Arc::from(Vec::new()),
            column_order: ColumnOrder::from_columns(&columns),
            columns,
            filters: FilterSet::new(),
            ranges: RangeDrafts::new(),
            matcher,
            pending_search: Debouncer::new(config.debounce),
            raw_search: String::new(),
            search: String::new(),
            sort: SortSpec::new(),
            multi_sort: config.multi_sort,
            pagination: Pagination::new(config.per_page),
            page_size_options: config.page_size_options,
            total_override: None,
            selection: Selection::with_mode(config.selection_mode),
            view_mode: config.default_view_mode,
            key: KeyExtractor::default(),
            table_actions: Vec::new(),
            row_actions: Vec::new(),
            matched: Vec::new(),
            revision: 0,
        }
    }

    /// Sets the items (builder pattern).
    pub fn with_items(mut self, items: impl Into<Arc<[T]>>) -> Self {
        self.set_items(items);
        self
    }

    /// Sets the key extractor (builder pattern).
    pub fn with_key_extractor(mut self, key: KeyExtractor<T>) -> Self {
        self.key = key;
        self
    }

    /// Adds a table-level action (builder pattern).
    pub fn with_table_action(mut self, action: TableAction) -> Self {
        self.table_actions.push(action);
        self
    }

    /// Adds a row-level action (builder pattern).
    pub fn with_row_action(mut self, action: RowAction<T>) -> Self {
        self.row_actions.push(action);
        self
    }

    // =========================================================================
    // Data provider
    // =========================================================================

    /// Replaces the collection.
    ///
    /// Selection is keyed by item identity and survives the swap.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        self.items = items.into();
        self.recompute();
    }

    /// Returns the raw collection.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Sets an authoritative total from the data provider.
    ///
    /// When set it wins over the locally computed count for page math.
    pub fn set_total_items(&mut self, total: Option<usize>) {
        self.total_override = total;
        self.recompute();
    }

    /// Item count pagination is computed over.
    pub fn total(&self) -> usize {
        self.total_override.unwrap_or(self.matched.len())
    }

    /// Number of items surviving filters and search.
    pub fn matched_len(&self) -> usize {
        self.matched.len()
    }

    /// Counter bumped whenever the derived slice may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the identity key of an item.
    pub fn key_of(&self, item: &T) -> String {
        self.key.extract(item)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Column definitions in declaration order.
    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    /// Replaces the column definitions, keeping the user's order for
    /// columns that still exist.
    pub fn set_columns(&mut self, columns: ColumnSet<T>) {
        self.column_order.sync(&columns);
        self.columns = columns;
    }

    /// Current column order.
    pub fn column_order(&self) -> &[String] {
        self.column_order.keys()
    }

    /// Column definitions in display order.
    pub fn ordered_columns(&self) -> Vec<&Column<T>> {
        self.column_order.ordered(&self.columns)
    }

    /// Drops `source` onto `target`. Returns the new order.
    pub fn reorder_column(&mut self, source: &str, target: &str) -> Vec<String> {
        self.column_order.reorder(source, target)
    }

    /// Restores declaration order.
    pub fn reset_column_order(&mut self) {
        self.column_order.reset(&self.columns);
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Active clauses.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Adds a clause, replacing any clause on the same field.
    pub fn add_filter(&mut self, clause: FilterClause) {
        self.ranges.discard(clause.field());
        self.filters.add(clause);
        self.recompute();
    }

    /// Adds a loosely-typed clause.
    ///
    /// A malformed clause is logged and ignored. A `between` with neither
    /// bound clears the range on its field. Returns whether it applied.
    pub fn apply_clause_spec(&mut self, spec: ClauseSpec) -> bool {
        match FilterClause::try_from(spec) {
            Ok(clause @ FilterClause::Between { .. }) if clause.is_unconstrained() => {
                self.remove_filter(clause.field());
                true
            }
            Ok(clause) => {
                self.add_filter(clause);
                true
            }
            Err(e) => {
                log::warn!("ignoring filter clause: {}", e);
                false
            }
        }
    }

    /// Removes the clause on `field`, if any.
    pub fn remove_filter(&mut self, field: &str) {
        self.ranges.discard(field);
        if self.filters.remove(field).is_some() {
            self.recompute();
        }
    }

    /// Removes every clause.
    pub fn clear_filters(&mut self) {
        self.ranges.clear();
        if !self.filters.is_empty() {
            self.filters.clear();
            self.recompute();
        }
    }

    /// Edits one end of the range on `field`.
    ///
    /// The two ends merge into one `between` clause; clearing both removes it.
    pub fn set_range_bound(&mut self, field: &str, bound: RangeBound, value: Option<Value>) {
        let edit = self.ranges.set(field, bound, value);
        self.apply_range_edit(edit);
    }

    /// Edits a range end by control name (`due_from`, `dueTo`, ...).
    ///
    /// Returns `false` if the name has no range suffix.
    pub fn set_range_control(&mut self, control: &str, value: Option<Value>) -> bool {
        match self.ranges.set_control(control, value) {
            Some(edit) => {
                self.apply_range_edit(edit);
                true
            }
            None => false,
        }
    }

    /// Current `(from, to)` draft for a range field.
    pub fn range_draft(&self, field: &str) -> Option<(Option<&Value>, Option<&Value>)> {
        self.ranges.get(field)
    }

    fn apply_range_edit(&mut self, edit: RangeEdit) {
        match edit {
            RangeEdit::Set(clause) => {
                self.filters.add(clause);
                self.recompute();
            }
            RangeEdit::Clear(field) => {
                if matches!(self.filters.get(&field), Some(FilterClause::Between { .. })) {
                    self.filters.remove(&field);
                    self.recompute();
                }
            }
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Records raw search text; it is committed after the debounce window.
    pub fn set_search_query(&mut self, raw: impl Into<String>) {
        self.set_search_query_at(raw, Instant::now());
    }

    /// Records raw search text typed at `now`.
    pub fn set_search_query_at(&mut self, raw: impl Into<String>, now: Instant) {
        let raw = raw.into();
        self.raw_search.clone_from(&raw);
        self.pending_search.push(raw, now);
        self.poll_search_at(now);
    }

    /// Commits the pending search text if its window has elapsed.
    pub fn poll_search(&mut self) -> bool {
        self.poll_search_at(Instant::now())
    }

    /// Commits the pending search text if its window has elapsed by `now`.
    ///
    /// Returns `true` if a query was committed.
    pub fn poll_search_at(&mut self, now: Instant) -> bool {
        match self.pending_search.poll(now) {
            Some(query) => {
                self.commit_query(query);
                true
            }
            None => false,
        }
    }

    /// Commits the pending search text immediately.
    pub fn commit_search(&mut self) {
        if let Some(query) = self.pending_search.flush() {
            self.commit_query(query);
        }
    }

    /// Adopts the latest query published by a [`SearchInput`].
    ///
    /// The input has already debounced it, so it is committed at once and any
    /// pending local text is dropped. Returns `true` if a new value was seen.
    ///
    /// [`SearchInput`]: crate::debounce::SearchInput
    pub fn follow_search(&mut self, committed: &mut watch::Receiver<String>) -> bool {
        if !committed.has_changed().unwrap_or(false) {
            return false;
        }
        let query = committed.borrow_and_update().clone();
        self.pending_search.cancel();
        self.raw_search.clone_from(&query);
        self.commit_query(query);
        true
    }

    /// When the pending search text becomes due, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.pending_search.deadline()
    }

    /// The committed query the slice is derived from.
    pub fn search_query(&self) -> &str {
        &self.search
    }

    /// The raw text last typed, committed or not.
    pub fn raw_search_query(&self) -> &str {
        &self.raw_search
    }

    fn commit_query(&mut self, query: String) {
        if query != self.search {
            self.search = query;
            self.recompute();
        }
    }

    // =========================================================================
    // Sort
    // =========================================================================

    /// Current sort keys.
    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    /// Cycles `field` through asc, desc, unsorted.
    ///
    /// Columns declared non-sortable ignore the toggle. Returns whether the
    /// sort changed.
    pub fn toggle_sort(&mut self, field: &str) -> bool {
        if let Some(column) = self.columns.get(field)
            && !column.sortable
        {
            log::debug!("column '{}' is not sortable", field);
            return false;
        }
        self.sort.toggle(field, self.multi_sort);
        self.recompute();
        true
    }

    /// Sorts `field` in `direction`.
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        self.sort.set(field, direction, self.multi_sort);
        self.recompute();
    }

    /// Removes every sort key.
    pub fn clear_sort(&mut self) {
        if !self.sort.is_empty() {
            self.sort.clear();
            self.recompute();
        }
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Position of the current page.
    pub fn page_summary(&self) -> PageSummary {
        self.pagination.summary(self.total())
    }

    /// Page sizes offered to the user.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Goes to page `n`, clamped into range.
    pub fn set_page(&mut self, n: usize) {
        self.pagination.go_to_page(n, self.total());
        self.revision += 1;
    }

    /// Goes to the next page, if there is one.
    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next_page(self.total());
        if moved {
            self.revision += 1;
        }
        moved
    }

    /// Goes to the previous page, if there is one.
    pub fn prev_page(&mut self) -> bool {
        let moved = self.pagination.prev_page(self.total());
        if moved {
            self.revision += 1;
        }
        moved
    }

    /// Goes to page 1.
    pub fn first_page(&mut self) {
        self.pagination.first_page();
        self.revision += 1;
    }

    /// Goes to the last page.
    pub fn last_page(&mut self) {
        self.pagination.last_page(self.total());
        self.revision += 1;
    }

    /// Changes the page size and returns to page 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.pagination.set_per_page(per_page);
        self.revision += 1;
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selection set.
    pub fn selection(&self) -> &Selection<String> {
        &self.selection
    }

    /// Returns `true` if `key` is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.is_selected(&key.to_string())
    }

    /// Toggles `key`.
    pub fn toggle_selection(&mut self, key: impl Into<String>) -> bool {
        self.selection.toggle(key.into())
    }

    /// Selects exactly the keys passed in (in addition to the current ones).
    pub fn select_all<I, S>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.select_all(keys.into_iter().map(Into::into))
    }

    /// Selects every row on the current page.
    pub fn select_visible(&mut self) -> bool {
        let keys = self.visible_keys();
        self.selection.select_all(keys)
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected items in collection order, one per key (first match).
    ///
    /// Includes items hidden by the current filters or page.
    pub fn selected_items(&self) -> Vec<&T> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|item| {
                let key = self.key.extract(item);
                self.selection.is_selected(&key) && seen.insert(key)
            })
            .collect()
    }

    // =========================================================================
    // View mode
    // =========================================================================

    /// Active view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switches view mode. The derived slice is left exactly as it is.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode != self.view_mode {
            log::debug!("view mode {} -> {}", self.view_mode, mode);
            self.view_mode = mode;
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Table-level actions.
    pub fn table_actions(&self) -> &[TableAction] {
        &self.table_actions
    }

    /// Row-level actions.
    pub fn row_actions(&self) -> &[RowAction<T>] {
        &self.row_actions
    }

    /// Runs the table action at `index` with the selected keys (sorted).
    ///
    /// Returns `false` for an unknown index or a disabled action.
    pub fn invoke_table_action(&self, index: usize) -> bool {
        let Some(action) = self.table_actions.get(index) else {
            return false;
        };
        let mut keys: Vec<String> = self.selection.keys().cloned().collect();
        keys.sort();
        action.invoke(&keys)
    }

    /// Runs the row action at `index` on the first item keyed `key`.
    pub fn invoke_row_action(&self, index: usize, key: &str) -> bool {
        let (Some(action), Some(item)) = (
            self.row_actions.get(index),
            self.items.iter().find(|item| self.key.extract(item) == key),
        ) else {
            return false;
        };
        action.invoke(item)
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Index range of the current page within the matched items.
    fn page_indices(&self) -> &[usize] {
        paginate_with_total(&self.matched, &self.pagination, self.total()).items
    }

    /// Items on the current page, in display order.
    pub fn visible(&self) -> Vec<&T> {
        self.page_indices().iter().map(|&i| &self.items[i]).collect()
    }

    /// Keys of the items on the current page.
    pub fn visible_keys(&self) -> Vec<String> {
        self.page_indices()
            .iter()
            .map(|&i| self.key.extract(&self.items[i]))
            .collect()
    }

    /// All matched items (every page), in display order.
    pub fn matched(&self) -> Vec<&T> {
        self.matched.iter().map(|&i| &self.items[i]).collect()
    }

    /// Everything renderers read.
    pub fn snapshot(&self) -> ViewSnapshot<'_, T> {
        let items = self.visible();
        let keys = items.iter().map(|item| self.key.extract(item)).collect();
        ViewSnapshot {
            items,
            keys,
            page: self.page_summary(),
            filters: self.filters.clauses(),
            search: &self.search,
            sort: &self.sort,
            view_mode: self.view_mode,
            selection: &self.selection,
            columns: self.ordered_columns(),
            table_actions: &self.table_actions,
            row_actions: &self.row_actions,
        }
    }

    fn recompute(&mut self) {
        let items: &[T] = &self.items;
        let mut indices: Vec<usize> = (0..items.len()).collect();
        self.filters.retain(items, &mut indices);
        let filtered = indices.len();
        self.matcher.retain(items, &mut indices, &self.search);
        let searched = indices.len();
        sort_indices(items, &mut indices, &self.sort);
        self.matched = indices;

        let total = self.total();
        if self.pagination.clamp(total) {
            log::debug!(
                "page clamped to {} of {}",
                self.pagination.page(),
                total_pages(total, self.pagination.per_page())
            );
        }
        self.revision += 1;
        log::trace!(
            "recomputed view: {} items, {} after filters, {} after search",
            self.items.len(),
            filtered,
            searched
        );
    }
}

impl<T> std::fmt::Debug for ViewContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewContext")
            .field("items", &self.items.len())
            .field("matched", &self.matched.len())
            .field("filters", &self.filters)
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("view_mode", &self.view_mode)
            .finish_non_exhaustive()
    }
}
