//! View composition engine for tabular and grid list views.
//!
//! A [`ViewContext`] takes a collection and turns it into the slice a user
//! sees: filtered, searched, sorted and paginated, with selection, column
//! order and view mode kept alongside. Renderers read a [`ViewSnapshot`] and
//! send [`ViewIntent`]s back.

pub mod actions;
pub mod columns;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod key;
pub mod model;
pub mod pagination;
pub mod render;
pub mod search;
pub mod selection;
pub mod sort;
pub mod view_mode;

mod context;

pub use config::ViewConfig;
pub use context::*;
pub use error::ViewError;
pub use view_mode::ViewMode;
