//! Renderer seam.
//!
//! A renderer turns a [`ViewSnapshot`] into whatever its host draws: markup,
//! terminal nodes, plain text. The engine picks the renderer registered for
//! the active [`ViewMode`]; every renderer sees the same rows.

use std::collections::HashMap;
use std::fmt;

use crate::context::{ViewContext, ViewSnapshot};
use crate::model::Row;
use crate::view_mode::ViewMode;

/// Draws the visible slice of a view.
pub trait Renderer<T> {
    /// What the renderer produces.
    type Output;

    /// Renders one snapshot.
    fn render(&self, view: &ViewSnapshot<'_, T>) -> Self::Output;
}

/// Closures are renderers.
impl<T, O, F> Renderer<T> for F
where
    F: Fn(&ViewSnapshot<'_, T>) -> O,
{
    type Output = O;

    fn render(&self, view: &ViewSnapshot<'_, T>) -> O {
        self(view)
    }
}

/// One renderer per view mode, all producing the same output type.
pub struct Renderers<'r, T, O> {
    by_mode: HashMap<ViewMode, Box<dyn Renderer<T, Output = O> + 'r>>,
}

impl<'r, T, O> Renderers<'r, T, O> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            by_mode: HashMap::new(),
        }
    }

    /// Registers the renderer for `mode`, replacing any previous one.
    pub fn with(mut self, mode: ViewMode, renderer: impl Renderer<T, Output = O> + 'r) -> Self {
        self.by_mode.insert(mode, Box::new(renderer));
        self
    }

    /// Returns `true` if `mode` has a renderer.
    pub fn supports(&self, mode: ViewMode) -> bool {
        self.by_mode.contains_key(&mode)
    }

    /// Renders a snapshot with the renderer for its view mode.
    ///
    /// Returns `None` when no renderer is registered for that mode.
    pub fn render_snapshot(&self, view: &ViewSnapshot<'_, T>) -> Option<O> {
        self.by_mode
            .get(&view.view_mode)
            .map(|renderer| renderer.render(view))
    }
}

impl<T: Row + 'static, O> Renderers<'_, T, O> {
    /// Renders the context's current state with the active mode's renderer.
    pub fn render(&self, context: &ViewContext<T>) -> Option<O> {
        self.render_snapshot(&context.snapshot())
    }
}

impl<T, O> Default for Renderers<'_, T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> fmt::Debug for Renderers<'_, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut modes: Vec<_> = self.by_mode.keys().map(ViewMode::as_str).collect();
        modes.sort_unstable();
        f.debug_struct("Renderers").field("modes", &modes).finish()
    }
}
