//! Common trait for project interchange formats.

use super::InterchangeError;
use crate::model::Project;

/// Trait for project interchange formats.
///
/// Implementations convert between a [`Project`] and an external byte
/// representation. Reading always produces a complete, freshly identified
/// project; there is no partial result on failure.
pub trait ModelFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    /// Read a project from bytes.
    fn read(&self, input: &[u8]) -> Result<Project, InterchangeError>;

    /// Write a project to bytes.
    fn write(&self, project: &Project) -> Result<Vec<u8>, InterchangeError>;

    /// Quick well-formedness check that doesn't fully parse the content.
    fn validate(&self, input: &[u8]) -> Result<(), InterchangeError> {
        let _ = input;
        Ok(())
    }
}
