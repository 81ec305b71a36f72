//! View configuration

use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::pagination::DEFAULT_PER_PAGE;
use crate::search::SearchMode;
use crate::selection::SelectionMode;
use crate::view_mode::ViewMode;

/// Per-view configuration.
///
/// Supplied once when a view is built. Everything here is a starting point;
/// the user can change page size, view mode and so on through intents.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tabula::config::ViewConfig;
/// use tabula::view_mode::ViewMode;
///
/// let config = ViewConfig::default()
///     .with_per_page(25)
///     .with_multi_sort(true)
///     .with_view_mode(ViewMode::Grid)
///     .with_search_fields(["title", "owner"])
///     .with_debounce(Duration::from_millis(150));
/// ```
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Initial page size.
    ///
    /// Default: 10
    pub per_page: usize,

    /// Page sizes offered by the page-size picker.
    ///
    /// Default: 10, 25, 50, 100
    pub page_size_options: Vec<usize>,

    /// Quiet window before a typed search query is committed.
    ///
    /// Default: 300 ms
    pub debounce: Duration,

    /// Whether sort toggles stack into a multi-key sort.
    ///
    /// Default: false (a toggle on a new column replaces the sort)
    pub multi_sort: bool,

    /// View mode the view opens in.
    ///
    /// Default: table
    pub default_view_mode: ViewMode,

    /// Selection mode.
    ///
    /// Default: multi
    pub selection_mode: SelectionMode,

    /// Fields free-text search looks at (`None` = the whole item).
    ///
    /// Default: none
    pub search_fields: Option<Vec<String>>,

    /// How search queries are matched.
    ///
    /// Default: substring
    pub search_mode: SearchMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page_size_options: vec![10, 25, 50, 100],
            debounce: DEFAULT_DEBOUNCE,
            multi_sort: false,
            default_view_mode: ViewMode::Table,
            selection_mode: SelectionMode::Multi,
            search_fields: None,
            search_mode: SearchMode::Substring,
        }
    }
}

impl ViewConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size (zero is raised to 1).
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the page-size picker options.
    pub fn with_page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = options.into_iter().filter(|n| *n > 0).collect();
        self
    }

    /// Sets the search debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Commits search queries immediately (no debounce).
    pub fn without_debounce(mut self) -> Self {
        self.debounce = Duration::ZERO;
        self
    }

    /// Enables or disables multi-key sorting.
    pub fn with_multi_sort(mut self, multi_sort: bool) -> Self {
        self.multi_sort = multi_sort;
        self
    }

    /// Sets the initial view mode.
    pub fn with_view_mode(mut self, mode: ViewMode) -> Self {
        self.default_view_mode = mode;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Restricts free-text search to the given fields.
    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the search matching mode.
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }
}
