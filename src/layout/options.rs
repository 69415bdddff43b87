//! Layout configuration.

use crate::base::Position;
use crate::base::constants::{
    DEFAULT_LAYOUT_ORIGIN, DEFAULT_LEVEL_SPACING, DEFAULT_NODE_SPACING, GRID_COLUMNS, GRID_ORIGIN,
    GRID_SPACING_X, GRID_SPACING_Y,
};

/// Which way the hierarchy grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    /// Roots on top; siblings spread along x.
    #[default]
    TopToBottom,
    /// Roots on the left; siblings spread along y.
    LeftToRight,
}

/// Options for [`super::layout_hierarchy`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    pub direction: LayoutDirection,
    /// Distance between sibling slots along the primary axis.
    pub node_spacing: f64,
    /// Distance between consecutive levels along the secondary axis.
    pub level_spacing: f64,
    pub origin: Position,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::default(),
            node_spacing: DEFAULT_NODE_SPACING,
            level_spacing: DEFAULT_LEVEL_SPACING,
            origin: Position::from(DEFAULT_LAYOUT_ORIGIN),
        }
    }
}

impl LayoutOptions {
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_node_spacing(mut self, spacing: f64) -> Self {
        self.node_spacing = spacing;
        self
    }

    pub fn with_level_spacing(mut self, spacing: f64) -> Self {
        self.level_spacing = spacing;
        self
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }
}

/// Options for [`super::grid_layout`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    /// Number of columns; values below 1 are treated as 1.
    pub columns: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub origin: Position,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            spacing_x: GRID_SPACING_X,
            spacing_y: GRID_SPACING_Y,
            origin: Position::from(GRID_ORIGIN),
        }
    }
}

impl GridOptions {
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_spacing(mut self, spacing_x: f64, spacing_y: f64) -> Self {
        self.spacing_x = spacing_x;
        self.spacing_y = spacing_y;
        self
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = origin;
        self
    }
}
