//! Position assignment for diagram nodes.
//!
//! - [`layout_hierarchy`] - inheritance/implementation tree layout
//! - [`grid_layout`] - neutral fixed-column grid
//!
//! Both return position maps; applying them to the editor's model is the
//! caller's business (see [`crate::model::Module::with_positions`]).

mod grid;
mod hierarchy;
mod options;

pub use grid::grid_layout;
pub use hierarchy::{HierarchyLayout, layout_component, layout_hierarchy};
pub use options::{GridOptions, LayoutDirection, LayoutOptions};
