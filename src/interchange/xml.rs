//! The `uml-project` XML document format.
//!
//! ## Document Structure
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <uml-project name="Shop" version="1.0.0" language="python">
//!   <module name="core">
//!     <classes>
//!       <class name="Dog" extends="Animal">
//!         <attributes>
//!           <attribute name="age" type="int" visibility="private"/>
//!         </attributes>
//!       </class>
//!     </classes>
//!     <relationships>
//!       <relationship type="inheritance" from="Dog" to="Animal"/>
//!     </relationships>
//!   </module>
//! </uml-project>
//! ```
//!
//! The document carries names, never ids. Every import produces fresh ids.

use super::reader::DocumentReader;
use super::writer::DocumentWriter;
use super::{InterchangeError, ModelFormat};
use crate::model::{Class, Module, Project};

/// XML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl ModelFormat for XmlCodec {
    fn name(&self) -> &'static str {
        "UML XML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml", "uml"]
    }

    fn mime_type(&self) -> &'static str {
        "application/xml"
    }

    fn read(&self, input: &[u8]) -> Result<Project, InterchangeError> {
        let text = std::str::from_utf8(input)?;
        deserialize_project(text)
    }

    fn write(&self, project: &Project) -> Result<Vec<u8>, InterchangeError> {
        serialize_project(project).map(String::into_bytes)
    }

    fn validate(&self, input: &[u8]) -> Result<(), InterchangeError> {
        let content = std::str::from_utf8(input)?;
        if !content.contains("<uml-project") {
            return Err(InterchangeError::missing_element(super::tags::PROJECT));
        }
        Ok(())
    }
}

/// Serialize a whole project, XML declaration included.
pub fn serialize_project(project: &Project) -> Result<String, InterchangeError> {
    DocumentWriter::new().write_project(project)
}

/// Serialize one module as a bare `<module>` fragment.
pub fn serialize_module(module: &Module) -> Result<String, InterchangeError> {
    DocumentWriter::new().write_module(module)
}

/// Serialize one class as a bare `<class>` fragment.
pub fn serialize_class(class: &Class) -> Result<String, InterchangeError> {
    DocumentWriter::new().write_class(class)
}

/// Parse a document into a fresh project.
///
/// Fails only on malformed XML or a missing `<uml-project>` root; there is
/// no partial result.
pub fn deserialize_project(input: &str) -> Result<Project, InterchangeError> {
    DocumentReader::new().read(input)
}
