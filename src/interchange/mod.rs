//! Project interchange as a tree-shaped XML document.
//!
//! ```text
//! ┌──────────────┐  serialize_project   ┌──────────────────┐
//! │   Project    │ ───────────────────► │ <uml-project>    │
//! │ (ids, pos.)  │ ◄─────────────────── │ (names only)     │
//! └──────────────┘  deserialize_project └──────────────────┘
//! ```
//!
//! Export writes relationship endpoints by entity name. Import builds a
//! name → fresh id table per module before resolving them, and places
//! entities on a fixed grid since geometry is not part of the document.
//!
//! ## Usage
//!
//! ```ignore
//! use umlforge::interchange::{XmlCodec, ModelFormat};
//!
//! let bytes = std::fs::read("shop.xml")?;
//! let project = XmlCodec.read(&bytes)?;
//! let out = XmlCodec.write(&project)?;
//! ```

mod error;
mod format;
mod reader;
pub mod tags;
mod writer;
mod xml;

pub use error::InterchangeError;
pub use format::ModelFormat;
pub use xml::{XmlCodec, deserialize_project, serialize_class, serialize_module, serialize_project};

/// Supported file extensions for interchange formats.
pub fn supported_extensions() -> &'static [&'static str] {
    XmlCodec.extensions()
}

/// Detect format from file extension.
pub fn detect_format(path: &std::path::Path) -> Option<Box<dyn ModelFormat>> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if XmlCodec.extensions().contains(&ext.as_str()) {
        return Some(Box::new(XmlCodec));
    }
    None
}

/// Detect format from MIME type.
pub fn detect_format_from_mime(mime: &str) -> Option<Box<dyn ModelFormat>> {
    match mime {
        "application/xml" | "text/xml" => Some(Box::new(XmlCodec)),
        _ => None,
    }
}
