//! Foundation types for the umlforge model engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`EntityId`], [`RelationshipId`], [`ModuleId`] - opaque identifiers
//! - [`Position`] - canvas coordinates
//! - Domain constants (reserved ids, layout and grid defaults)
//!
//! This module has NO dependencies on other umlforge modules.

pub mod constants;
mod ids;
mod position;

pub use ids::{EntityId, ModuleId, RelationshipId};
pub use position::Position;
