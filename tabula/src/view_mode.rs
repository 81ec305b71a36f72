//! View mode selector.

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ViewError;

/// The active rendering strategy for the visible slice.
///
/// Any mode can switch to any other; none is terminal. Switching only swaps
/// the renderer, never the rows it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
    List,
    Custom,
}

impl ViewMode {
    /// All modes, in toolbar order.
    pub const ALL: [ViewMode; 4] = [ViewMode::Table, ViewMode::Grid, ViewMode::List, ViewMode::Custom];

    /// Lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
            ViewMode::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ViewError::UnknownViewMode(s.to_string()))
    }
}
