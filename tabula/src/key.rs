//! Item identity.

use std::fmt;
use std::sync::Arc;

use crate::model::Row;

/// Maps an item to a stable identity string.
///
/// Identity drives selection, renderer keys and column-reorder diffing. The
/// default extractor stringifies the whole item with [`Row::describe`]; that
/// is a last resort and two identical-looking items collide. Supply a
/// field-based extractor whenever identity matters.
///
/// Duplicate keys are a caller error. The engine does not detect them;
/// operations looking an item up by key act on the first match.
pub struct KeyExtractor<T> {
    extract: Arc<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T: Row + 'static> KeyExtractor<T> {
    /// Keys items by the display string of one field.
    ///
    /// A missing field yields an empty key.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |item: &T| {
            item.field(&name)
                .map(|value| value.display_string())
                .unwrap_or_default()
        })
    }

    /// Keys items by their shallow string serialization.
    pub fn describe() -> Self {
        Self::new(|item: &T| item.describe())
    }
}

impl<T> KeyExtractor<T> {
    /// Wraps an arbitrary extraction function.
    pub fn new(extract: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            extract: Arc::new(extract),
        }
    }

    /// Returns the key for an item.
    pub fn extract(&self, item: &T) -> String {
        (self.extract)(item)
    }
}

impl<T: Row + 'static> Default for KeyExtractor<T> {
    fn default() -> Self {
        Self::describe()
    }
}

impl<T> Clone for KeyExtractor<T> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<T> fmt::Debug for KeyExtractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyExtractor").finish_non_exhaustive()
    }
}
