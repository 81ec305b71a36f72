//! Column definitions and column order.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::ViewError;
use crate::model::{Row, Value};

/// Cell text override: `(field value, item) -> text`.
pub type CellRenderer<T> = Arc<dyn Fn(Option<&Value>, &T) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns describe what a table shows: the field key, header label, an
/// optional width hint and whether the column can be sorted or reordered.
///
/// # Examples
///
/// ```
/// use tabula::columns::Column;
/// use tabula::model::Record;
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("id", "ID").width("4rem"),
///     Column::new("title", "Title").sortable(),
///     Column::new("status", "Status").sortable().disabled(),
/// ];
/// ```
pub struct Column<T> {
    /// Field key addressed on each item.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the column responds to sort toggles.
    pub sortable: bool,
    /// Width hint passed through to renderers (`"120px"`, `"20%"`).
    pub width: Option<String>,
    /// Disabled columns cannot be dragged and keep their position.
    pub disabled: bool,
    /// Optional cell text override.
    pub render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a new column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            width: None,
            disabled: false,
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Pin the column in place: it cannot be reordered.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Override how cells of this column are turned into text.
    pub fn render_with(
        mut self,
        render: impl Fn(Option<&Value>, &T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }
}

impl<T: Row> Column<T> {
    /// Text for this column's cell on `item`.
    pub fn cell_text(&self, item: &T) -> String {
        let value = item.field(&self.key);
        match &self.render {
            Some(render) => render(value.as_ref(), item),
            None => value.map(|v| v.display_string()).unwrap_or_default(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            width: self.width.clone(),
            disabled: self.disabled,
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("disabled", &self.disabled)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Column definitions for one view, in declaration order. Keys are unique.
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
}

impl<T> ColumnSet<T> {
    /// Builds a column set, rejecting duplicate keys.
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, ViewError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(ViewError::duplicate_column(&column.key));
            }
        }
        Ok(Self { columns })
    }

    /// An empty column set (list and card views often need none).
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Looks a column up by key.
    pub fn get(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

/// User-adjustable permutation of column keys.
///
/// Defaults to declaration order. Every operation keeps the order a
/// permutation of the same key set: keys are never dropped or duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOrder {
    keys: Vec<String>,
    pinned: HashSet<String>,
}

impl ColumnOrder {
    /// Declaration order of `columns`; disabled columns are pinned.
    pub fn from_columns<T>(columns: &ColumnSet<T>) -> Self {
        Self {
            keys: columns.keys(),
            pinned: columns
                .columns()
                .iter()
                .filter(|c| c.disabled)
                .map(|c| c.key.clone())
                .collect(),
        }
    }

    /// Current order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns `true` if `key` cannot be moved.
    pub fn is_pinned(&self, key: &str) -> bool {
        self.pinned.contains(key)
    }

    /// Moves `source` to where `target` is, shifting the columns in between.
    ///
    /// Dragging right lands the source just after the target; dragging left
    /// lands it just before. Pinned columns never move and are skipped over
    /// when shifting. Unknown, pinned or identical keys leave the order
    /// unchanged. Returns the new order.
    pub fn reorder(&mut self, source: &str, target: &str) -> Vec<String> {
        if source == target || self.is_pinned(source) || self.is_pinned(target) {
            return self.keys.clone();
        }

        let movable: Vec<usize> = (0..self.keys.len())
            .filter(|&i| !self.is_pinned(&self.keys[i]))
            .collect();
        let mut sequence: Vec<String> = movable.iter().map(|&i| self.keys[i].clone()).collect();

        let (Some(from), Some(to)) = (
            sequence.iter().position(|k| k == source),
            sequence.iter().position(|k| k == target),
        ) else {
            return self.keys.clone();
        };

        let moved = sequence.remove(from);
        sequence.insert(to, moved);

        for (slot, key) in movable.into_iter().zip(sequence) {
            self.keys[slot] = key;
        }
        log::debug!("column '{}' moved onto '{}': {:?}", source, target, self.keys);
        self.keys.clone()
    }

    /// Restores declaration order.
    pub fn reset<T>(&mut self, columns: &ColumnSet<T>) {
        *self = Self::from_columns(columns);
    }

    /// Reconciles with changed definitions.
    ///
    /// Known keys keep their relative order, new keys are appended in
    /// declaration order, removed keys are dropped.
    pub fn sync<T>(&mut self, columns: &ColumnSet<T>) {
        let declared: HashSet<&str> = columns.columns().iter().map(|c| c.key.as_str()).collect();
        let mut seen = HashSet::new();
        let mut keys: Vec<String> = self
            .keys
            .iter()
            .filter(|k| declared.contains(k.as_str()) && seen.insert(k.as_str()))
            .cloned()
            .collect();
        for column in columns.columns() {
            if !keys.contains(&column.key) {
                keys.push(column.key.clone());
            }
        }
        self.keys = keys;
        self.pinned = columns
            .columns()
            .iter()
            .filter(|c| c.disabled)
            .map(|c| c.key.clone())
            .collect();
    }

    /// Resolves column definitions in display order.
    pub fn ordered<'a, T>(&self, columns: &'a ColumnSet<T>) -> Vec<&'a Column<T>> {
        self.keys.iter().filter_map(|key| columns.get(key)).collect()
    }
}
