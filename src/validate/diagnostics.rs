//! Structural diagnostics and their collection.
//!
//! Diagnostics are never fatal. The validator always returns the complete
//! list; a module is valid when it carries no [`Severity::Error`].

use std::sync::Arc;

use crate::base::EntityId;
use crate::model::EntityKind;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A diagnostic attached to one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable machine-readable code, see [`codes`].
    pub code: &'static str,
    pub message: Arc<str>,
    pub entity_id: EntityId,
    pub entity_kind: EntityKind,
    /// Offending member or field, e.g. `speed.type`.
    pub field: Option<Arc<str>>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        code: &'static str,
        entity_id: &EntityId,
        entity_kind: EntityKind,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            entity_id: entity_id.clone(),
            entity_kind,
            field: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(
        code: &'static str,
        entity_id: &EntityId,
        entity_kind: EntityKind,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(Severity::Error, code, entity_id, entity_kind, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        code: &'static str,
        entity_id: &EntityId,
        entity_kind: EntityKind,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(Severity::Warning, code, entity_id, entity_kind, message)
    }

    /// Create a new info diagnostic.
    pub fn info(
        code: &'static str,
        entity_id: &EntityId,
        entity_kind: EntityKind,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(Severity::Info, code, entity_id, entity_kind, message)
    }

    /// Set the offending field.
    pub fn with_field(mut self, field: impl Into<Arc<str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity.as_str(), self.code, self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes.
pub mod codes {
    // ========================================================================
    // ERRORS
    // ========================================================================

    /// Two entities in one module share a name.
    pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
    /// A class `extends` chain loops back on itself.
    pub const INHERITANCE_CYCLE: &str = "INHERITANCE_CYCLE";
    /// `extends` names no declared class.
    pub const UNRESOLVED_EXTENDS: &str = "UNRESOLVED_EXTENDS";
    /// `implements` names no declared interface.
    pub const UNRESOLVED_IMPLEMENTS: &str = "UNRESOLVED_IMPLEMENTS";
    /// An interface `extends` names no declared interface.
    pub const UNRESOLVED_INTERFACE_EXTENDS: &str = "UNRESOLVED_INTERFACE_EXTENDS";
    /// Attribute, parameter or field without a type.
    pub const MISSING_TYPE: &str = "MISSING_TYPE";
    /// Abstract method on a concrete class.
    pub const ABSTRACT_METHOD_IN_CONCRETE_CLASS: &str = "ABSTRACT_METHOD_IN_CONCRETE_CLASS";
    pub const DUPLICATE_ENUM_VALUE: &str = "DUPLICATE_ENUM_VALUE";
    pub const DUPLICATE_FIELD: &str = "DUPLICATE_FIELD";

    // ========================================================================
    // WARNINGS
    // ========================================================================

    /// A class lacks a method declared by an interface it implements.
    pub const MISSING_INTERFACE_METHOD: &str = "MISSING_INTERFACE_METHOD";
    /// Entity without members.
    pub const EMPTY_ENTITY: &str = "EMPTY_ENTITY";
    pub const MISSING_RETURN_TYPE: &str = "MISSING_RETURN_TYPE";

    // ========================================================================
    // INFO
    // ========================================================================

    pub const MISSING_DESCRIPTION: &str = "MISSING_DESCRIPTION";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during validation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append diagnostics, keeping their order.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// Flat, ordered diagnostics for a module or project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Valid means zero errors; warnings and info never count.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Diagnostics attached to one entity, in report order.
    pub fn by_entity(&self, id: &EntityId) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| &d.entity_id == id)
            .collect()
    }

    /// Diagnostics with the given code, in report order.
    pub fn by_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }
}
