//! Element names of the interchange document.

pub const PROJECT: &str = "uml-project";
pub const MODULE: &str = "module";
pub const DESCRIPTION: &str = "description";

// ============================================================================
// ENTITIES
// ============================================================================

pub const CLASSES: &str = "classes";
pub const CLASS: &str = "class";
pub const INTERFACES: &str = "interfaces";
/// Also the item tag of `<implements>` and interface `<extends>` lists.
pub const INTERFACE: &str = "interface";
pub const ENUMS: &str = "enums";
pub const ENUM: &str = "enum";
pub const STRUCTS: &str = "structs";
pub const STRUCT: &str = "struct";
pub const RELATIONSHIPS: &str = "relationships";
pub const RELATIONSHIP: &str = "relationship";

// ============================================================================
// MEMBERS
// ============================================================================

pub const IMPLEMENTS: &str = "implements";
pub const EXTENDS: &str = "extends";
pub const ATTRIBUTES: &str = "attributes";
pub const ATTRIBUTE: &str = "attribute";
pub const FIELDS: &str = "fields";
pub const FIELD: &str = "field";
pub const VALUES: &str = "values";
pub const VALUE: &str = "value";
pub const METHODS: &str = "methods";
pub const METHOD: &str = "method";
pub const PARAMETERS: &str = "parameters";
pub const PARAM: &str = "param";
pub const RETURNS: &str = "returns";
pub const PRECONDITIONS: &str = "preconditions";
pub const POSTCONDITIONS: &str = "postconditions";
pub const CONDITION: &str = "condition";
pub const THROWS: &str = "throws";
pub const EXCEPTION: &str = "exception";
pub const WHEN: &str = "when";
pub const HINTS: &str = "hints";
pub const EDGE_CASES: &str = "edge-cases";
pub const CASE: &str = "case";
pub const PERFORMANCE: &str = "performance";
pub const STYLE: &str = "style";
pub const CUSTOM: &str = "custom";
pub const HINT: &str = "hint";
pub const TEST_CASES: &str = "test-cases";
pub const TEST: &str = "test";
