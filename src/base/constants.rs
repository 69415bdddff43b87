//! Domain constants shared across the engine.

/// Component id reserved for the bucket of entities without relationships.
pub const ISOLATED_COMPONENT_ID: &str = "isolated";

/// Prefix of regular component ids (`component-0`, `component-1`, ...).
pub const COMPONENT_ID_PREFIX: &str = "component-";

// ============================================================================
// COMPONENT NAMING
// ============================================================================

/// Representative-score bonus for classes.
pub const CLASS_TYPE_BONUS: usize = 1000;
/// Representative-score bonus for interfaces.
pub const INTERFACE_TYPE_BONUS: usize = 500;

// ============================================================================
// LAYOUT DEFAULTS
// ============================================================================

pub const DEFAULT_NODE_SPACING: f64 = 250.0;
pub const DEFAULT_LEVEL_SPACING: f64 = 180.0;
pub const DEFAULT_LAYOUT_ORIGIN: (f64, f64) = (100.0, 100.0);

pub const GRID_COLUMNS: usize = 4;
pub const GRID_SPACING_X: f64 = 300.0;
pub const GRID_SPACING_Y: f64 = 200.0;
pub const GRID_ORIGIN: (f64, f64) = (100.0, 100.0);

// ============================================================================
// IMPORT DEFAULTS
// ============================================================================

/// Name of the module synthesized when an imported document declares none.
pub const DEFAULT_MODULE_NAME: &str = "main";
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";
