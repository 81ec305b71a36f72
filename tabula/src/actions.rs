//! Table-level and row-level action descriptors.
//!
//! The engine has no opinion on what an action does. It stores the
//! descriptors and hands them to renderers alongside the visible slice.

use std::fmt;
use std::sync::Arc;

/// Visual emphasis of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    #[default]
    Primary,
    Secondary,
    Danger,
    Ghost,
}

/// A declarative `{label, on_click, variant, disabled}` button.
///
/// `A` is what the click handler receives: the selected keys for a
/// [`TableAction`], the row item for a [`RowAction`].
pub struct Action<A: ?Sized> {
    pub label: String,
    pub variant: ActionVariant,
    pub disabled: bool,
    on_click: Arc<dyn Fn(&A) + Send + Sync>,
}

/// Action shown above the table; receives the selected keys.
pub type TableAction = Action<[String]>;

/// Action shown on each row; receives the row item.
pub type RowAction<T> = Action<T>;

impl<A: ?Sized> Action<A> {
    /// Creates an enabled primary action.
    pub fn new(label: impl Into<String>, on_click: impl Fn(&A) + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            variant: ActionVariant::Primary,
            disabled: false,
            on_click: Arc::new(on_click),
        }
    }

    /// Sets the variant.
    pub fn variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets whether the action is disabled.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Runs the click handler. Disabled actions do nothing.
    ///
    /// Returns `true` if the handler ran.
    pub fn invoke(&self, arg: &A) -> bool {
        if self.disabled {
            return false;
        }
        (self.on_click)(arg);
        true
    }
}

impl<A: ?Sized> Clone for Action<A> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            variant: self.variant,
            disabled: self.disabled,
            on_click: Arc::clone(&self.on_click),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Action<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
