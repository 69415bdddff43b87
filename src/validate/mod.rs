//! Structural validation of modules and projects.
//!
//! ```text
//! Module ──► NameTable ──► ModelValidator::check_all ──► ValidationReport
//!                              │
//!                              ├─ duplicate names
//!                              ├─ inheritance cycles
//!                              ├─ extends / implements references
//!                              ├─ interface conformance
//!                              └─ completeness
//! ```
//!
//! Validation is a pure function of its input. Running it twice on the same
//! module yields identical reports.

mod checker;
mod diagnostics;
mod names;

pub use checker::{ModelValidator, validate_module, validate_project};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, ValidationReport, codes};
pub use names::NameTable;
