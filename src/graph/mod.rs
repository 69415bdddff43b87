//! Graph views over a module: adjacency, union-find and components.
//!
//! ```text
//! Module ──► EntityGraphIndex ──► analyze_components ──► ComponentAnalysis
//!            (dangling edges       (union-find over        ├── components
//!             filtered once)        dense indices)         └── isolated
//! ```

mod components;
mod index;
mod union_find;

pub use components::{
    Component, ComponentAnalysis, analyze_components, entities_for_component,
    relationships_for_component,
};
pub use index::EntityGraphIndex;
pub use union_find::UnionFind;
