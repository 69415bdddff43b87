//! # umlforge-base
//!
//! Core engine for class-model diagrams: graph analysis, hierarchical
//! layout, structural validation and XML interchange.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! interchange → XML import/export (quick-xml)
//!   ↓
//! validate    → Structural diagnostics
//!   ↓
//! layout      → Hierarchy tree and grid placement
//!   ↓
//! graph       → Adjacency index, union-find, connected components
//!   ↓
//! model       → Projects, modules, entities, relationships
//!   ↓
//! base        → Primitives (ids, Position, constants)
//! ```
//!
//! Every operation is a pure function over an immutable snapshot. The
//! caller owns the canonical model and decides what to do with derived
//! results (component sets, positions, diagnostics, imported projects).

// ============================================================================
// MODULES (dependency order: base → model → graph → layout → validate → interchange)
// ============================================================================

/// Foundation types: ids, Position, constants
pub mod base;

/// Domain model: Project, Module, Class/Interface/Enum/Struct, Relationship
pub mod model;

/// Graph views: EntityGraphIndex, union-find, connected components
pub mod graph;

/// Layout: inheritance hierarchy and fixed grid
pub mod layout;

/// Validation: ModelValidator and diagnostics
pub mod validate;

/// Model interchange format: UML XML
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{EntityId, ModuleId, Position, RelationshipId};

// Re-export the main entry points
pub use graph::{
    ComponentAnalysis, EntityGraphIndex, analyze_components, entities_for_component,
    relationships_for_component,
};
pub use layout::{LayoutOptions, layout_component, layout_hierarchy};
pub use model::{Module, Project};
pub use validate::{ValidationReport, validate_module, validate_project};
