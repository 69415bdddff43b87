//! Project → XML document.
//!
//! Scalars ride on attributes, free text and nested lists become child
//! elements. Empty optional values are omitted, never written blank, so the
//! output of an unchanged project is byte-for-byte stable.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::InterchangeError;
use super::tags;
use crate::base::EntityId;
use crate::model::{
    Attribute, Class, Enum, Hints, Interface, InterfaceMethod, Method, Module, Parameter, Project,
    Relationship, Struct,
};

/// Document writer. Output uses two-space indentation.
pub(super) struct DocumentWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    /// Write a complete document: declaration plus `<uml-project>`.
    pub fn write_project(mut self, project: &Project) -> Result<String, InterchangeError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new(tags::PROJECT);
        root.push_attribute(("name", project.name.as_str()));
        root.push_attribute(("version", project.version.as_str()));
        root.push_attribute(("language", project.language.as_str()));

        let has_children = !project.description.is_empty() || !project.modules.is_empty();
        self.element(root, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &project.description)?;
            for module in &project.modules {
                w.module(module)?;
            }
            Ok(())
        })?;

        let output = self.finish()?;
        debug!(
            modules = project.modules.len(),
            entities = project.entity_count(),
            bytes = output.len(),
            "project serialized"
        );
        Ok(output)
    }

    /// Write a bare `<module>` fragment.
    pub fn write_module(mut self, module: &Module) -> Result<String, InterchangeError> {
        self.module(module)?;
        self.finish()
    }

    /// Write a bare `<class>` fragment.
    pub fn write_class(mut self, class: &Class) -> Result<String, InterchangeError> {
        self.class(class)?;
        self.finish()
    }

    fn finish(self) -> Result<String, InterchangeError> {
        let mut bytes = self.writer.into_inner().into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| InterchangeError::Utf8(e.utf8_error()))
    }

    // ========================================================================
    // PRIMITIVES
    // ========================================================================

    fn event(&mut self, event: Event<'_>) -> Result<(), InterchangeError> {
        self.writer
            .write_event(event)
            .map_err(|e| InterchangeError::xml(format!("Write error: {e}")))
    }

    /// Write `start` as an empty element, or as a start/end pair around
    /// `body` when it has children.
    fn element<F>(
        &mut self,
        start: BytesStart<'_>,
        has_children: bool,
        body: F,
    ) -> Result<(), InterchangeError>
    where
        F: FnOnce(&mut Self) -> Result<(), InterchangeError>,
    {
        if !has_children {
            return self.event(Event::Empty(start));
        }
        let end = start.to_end().into_owned();
        self.event(Event::Start(start))?;
        body(self)?;
        self.event(Event::End(end))
    }

    /// `<tag>text</tag>`, skipped when `text` is empty.
    fn text_element(&mut self, tag: &str, text: &str) -> Result<(), InterchangeError> {
        if text.is_empty() {
            return Ok(());
        }
        self.event(Event::Start(BytesStart::new(tag)))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// `<list><item>..</item>..</list>`, skipped when `items` is empty.
    fn text_list(&mut self, list: &str, item: &str, items: &[String]) -> Result<(), InterchangeError> {
        if items.is_empty() {
            return Ok(());
        }
        self.event(Event::Start(BytesStart::new(list)))?;
        for text in items {
            self.event(Event::Start(BytesStart::new(item)))?;
            self.event(Event::Text(BytesText::new(text)))?;
            self.event(Event::End(BytesEnd::new(item)))?;
        }
        self.event(Event::End(BytesEnd::new(list)))
    }

    /// Open a list wrapper, write each item, close it. Skipped when empty.
    fn list<T, F>(&mut self, tag: &str, items: &[T], mut each: F) -> Result<(), InterchangeError>
    where
        F: FnMut(&mut Self, &T) -> Result<(), InterchangeError>,
    {
        if items.is_empty() {
            return Ok(());
        }
        self.event(Event::Start(BytesStart::new(tag)))?;
        for item in items {
            each(self, item)?;
        }
        self.event(Event::End(BytesEnd::new(tag)))
    }

    // ========================================================================
    // MODULE
    // ========================================================================

    fn module(&mut self, module: &Module) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::MODULE);
        start.push_attribute(("name", module.name.as_str()));

        let has_children = !module.description.is_empty()
            || !module.is_empty()
            || !module.relationships.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &module.description)?;
            w.list(tags::CLASSES, &module.classes, |w, c| w.class(c))?;
            w.list(tags::INTERFACES, &module.interfaces, |w, i| w.interface(i))?;
            w.list(tags::ENUMS, &module.enums, |w, e| w.enumeration(e))?;
            w.list(tags::STRUCTS, &module.structs, |w, s| w.structure(s))?;
            if module.relationships.is_empty() {
                return Ok(());
            }
            // Endpoints travel by name. First declaration of an id wins.
            let mut names: FxHashMap<&EntityId, &str> = FxHashMap::default();
            for entity in module.entities() {
                names.entry(entity.id()).or_insert(entity.name());
            }
            w.list(tags::RELATIONSHIPS, &module.relationships, |w, r| {
                w.relationship(&names, r)
            })
        })
    }

    fn relationship(
        &mut self,
        names: &FxHashMap<&EntityId, &str>,
        rel: &Relationship,
    ) -> Result<(), InterchangeError> {
        // A dangling id is written as-is.
        let from = names.get(&rel.from).copied().unwrap_or(rel.from.as_str());
        let to = names.get(&rel.to).copied().unwrap_or(rel.to.as_str());

        let mut start = BytesStart::new(tags::RELATIONSHIP);
        start.push_attribute(("type", rel.kind.as_str()));
        start.push_attribute(("from", from));
        start.push_attribute(("to", to));
        if let Some(cardinality) = rel.cardinality.as_deref().filter(|c| !c.is_empty()) {
            start.push_attribute(("cardinality", cardinality));
        }

        let description = rel.description.as_deref().unwrap_or_default();
        self.element(start, !description.is_empty(), |w| {
            w.text_element(tags::DESCRIPTION, description)
        })
    }

    // ========================================================================
    // ENTITIES
    // ========================================================================

    fn class(&mut self, class: &Class) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::CLASS);
        start.push_attribute(("name", class.name.as_str()));
        if class.is_abstract {
            start.push_attribute(("abstract", "true"));
        }
        if let Some(base) = class.extends.as_deref().filter(|b| !b.is_empty()) {
            start.push_attribute(("extends", base));
        }

        let has_children = !class.description.is_empty()
            || !class.implements.is_empty()
            || !class.attributes.is_empty()
            || !class.methods.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &class.description)?;
            w.text_list(tags::IMPLEMENTS, tags::INTERFACE, &class.implements)?;
            w.list(tags::ATTRIBUTES, &class.attributes, |w, a| {
                w.attribute(tags::ATTRIBUTE, a)
            })?;
            w.list(tags::METHODS, &class.methods, |w, m| w.method(m))
        })
    }

    fn interface(&mut self, interface: &Interface) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::INTERFACE);
        start.push_attribute(("name", interface.name.as_str()));

        let has_children = !interface.description.is_empty()
            || !interface.extends.is_empty()
            || !interface.methods.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &interface.description)?;
            w.text_list(tags::EXTENDS, tags::INTERFACE, &interface.extends)?;
            w.list(tags::METHODS, &interface.methods, |w, m| {
                w.interface_method(m)
            })
        })
    }

    fn enumeration(&mut self, value: &Enum) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::ENUM);
        start.push_attribute(("name", value.name.as_str()));

        let has_children = !value.description.is_empty() || !value.values.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &value.description)?;
            w.list(tags::VALUES, &value.values, |w, item| {
                let mut start = BytesStart::new(tags::VALUE);
                start.push_attribute(("name", item.name.as_str()));
                if let Some(literal) = item.value.as_deref().filter(|v| !v.is_empty()) {
                    start.push_attribute(("value", literal));
                }
                w.element(start, !item.description.is_empty(), |w| {
                    w.text_element(tags::DESCRIPTION, &item.description)
                })
            })
        })
    }

    fn structure(&mut self, value: &Struct) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::STRUCT);
        start.push_attribute(("name", value.name.as_str()));

        let has_children = !value.description.is_empty() || !value.fields.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &value.description)?;
            w.list(tags::FIELDS, &value.fields, |w, f| w.attribute(tags::FIELD, f))
        })
    }

    // ========================================================================
    // MEMBERS
    // ========================================================================

    /// Attributes and struct fields share one shape under different tags.
    fn attribute(&mut self, tag: &str, attribute: &Attribute) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tag);
        start.push_attribute(("name", attribute.name.as_str()));
        if !attribute.type_name.is_empty() {
            start.push_attribute(("type", attribute.type_name.as_str()));
        }
        start.push_attribute(("visibility", attribute.visibility.as_str()));
        if attribute.is_static {
            start.push_attribute(("static", "true"));
        }
        if attribute.is_readonly {
            start.push_attribute(("readonly", "true"));
        }
        if let Some(default) = attribute.default_value.as_deref().filter(|d| !d.is_empty()) {
            start.push_attribute(("default", default));
        }

        self.element(start, !attribute.description.is_empty(), |w| {
            w.text_element(tags::DESCRIPTION, &attribute.description)
        })
    }

    fn parameters(&mut self, parameters: &[Parameter]) -> Result<(), InterchangeError> {
        self.list(tags::PARAMETERS, parameters, |w, p| {
            let mut start = BytesStart::new(tags::PARAM);
            start.push_attribute(("name", p.name.as_str()));
            if !p.type_name.is_empty() {
                start.push_attribute(("type", p.type_name.as_str()));
            }
            if p.optional {
                start.push_attribute(("optional", "true"));
            }
            if let Some(default) = p.default_value.as_deref().filter(|d| !d.is_empty()) {
                start.push_attribute(("default", default));
            }
            w.element(start, !p.description.is_empty(), |w| {
                w.text_element(tags::DESCRIPTION, &p.description)
            })
        })
    }

    fn returns(&mut self, return_type: &str, description: &str) -> Result<(), InterchangeError> {
        if return_type.is_empty() && description.is_empty() {
            return Ok(());
        }
        let mut start = BytesStart::new(tags::RETURNS);
        if !return_type.is_empty() {
            start.push_attribute(("type", return_type));
        }
        self.element(start, !description.is_empty(), |w| {
            w.text_element(tags::DESCRIPTION, description)
        })
    }

    fn method(&mut self, method: &Method) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::METHOD);
        start.push_attribute(("name", method.name.as_str()));
        start.push_attribute(("visibility", method.visibility.as_str()));
        if method.is_static {
            start.push_attribute(("static", "true"));
        }
        if method.is_async {
            start.push_attribute(("async", "true"));
        }
        if method.is_abstract {
            start.push_attribute(("abstract", "true"));
        }

        let has_children = !method.description.is_empty()
            || !method.parameters.is_empty()
            || !method.return_type.is_empty()
            || !method.return_description.is_empty()
            || !method.preconditions.is_empty()
            || !method.postconditions.is_empty()
            || !method.throws.is_empty()
            || !method.hints.is_empty()
            || !method.test_cases.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &method.description)?;
            w.parameters(&method.parameters)?;
            w.returns(&method.return_type, &method.return_description)?;
            w.text_list(tags::PRECONDITIONS, tags::CONDITION, &method.preconditions)?;
            w.text_list(tags::POSTCONDITIONS, tags::CONDITION, &method.postconditions)?;
            w.list(tags::THROWS, &method.throws, |w, t| {
                let mut start = BytesStart::new(tags::EXCEPTION);
                start.push_attribute(("type", t.exception.as_str()));
                w.element(start, !t.condition.is_empty(), |w| {
                    w.text_element(tags::WHEN, &t.condition)
                })
            })?;
            w.hints(&method.hints)?;
            w.list(tags::TEST_CASES, &method.test_cases, |w, t| {
                let mut start = BytesStart::new(tags::TEST);
                start.push_attribute(("name", t.name.as_str()));
                start.push_attribute(("type", t.kind.as_str()));
                w.element(start, !t.description.is_empty(), |w| {
                    w.text_element(tags::DESCRIPTION, &t.description)
                })
            })
        })
    }

    fn interface_method(&mut self, method: &InterfaceMethod) -> Result<(), InterchangeError> {
        let mut start = BytesStart::new(tags::METHOD);
        start.push_attribute(("name", method.name.as_str()));

        let has_children = !method.description.is_empty()
            || !method.parameters.is_empty()
            || !method.return_type.is_empty();
        self.element(start, has_children, |w| {
            w.text_element(tags::DESCRIPTION, &method.description)?;
            w.parameters(&method.parameters)?;
            w.returns(&method.return_type, "")
        })
    }

    fn hints(&mut self, hints: &Hints) -> Result<(), InterchangeError> {
        if hints.is_empty() {
            return Ok(());
        }
        self.event(Event::Start(BytesStart::new(tags::HINTS)))?;
        self.text_list(tags::EDGE_CASES, tags::CASE, &hints.edge_cases)?;
        self.text_list(tags::PERFORMANCE, tags::HINT, &hints.performance)?;
        self.text_list(tags::STYLE, tags::HINT, &hints.style)?;
        self.text_list(tags::CUSTOM, tags::HINT, &hints.custom)?;
        self.event(Event::End(BytesEnd::new(tags::HINTS)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumValue, RelationshipKind, Throws, Visibility};

    fn write(project: &Project) -> String {
        DocumentWriter::new().write_project(project).unwrap()
    }

    #[test]
    fn test_declaration_and_root() {
        let xml = write(&Project::new("Shop", "2.0.0"));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"<uml-project name="Shop" version="2.0.0" language="python"/>"#));
    }

    #[test]
    fn test_empty_optionals_are_omitted() {
        let module = Module::new("m", "core").with_class(
            Class::new("c", "Cart").with_attribute(Attribute::new("items", "list")),
        );
        let xml = write(&Project::new("p", "1.0.0").with_module(module));
        assert!(xml.contains(r#"<attribute name="items" type="list" visibility="public"/>"#));
        assert!(!xml.contains("<description"));
        assert!(!xml.contains("abstract"));
        assert!(!xml.contains("default="));
    }

    #[test]
    fn test_reserved_characters_escaped() {
        let module = Module::new("m", "core").with_class(
            Class::new("c", "Cmp").with_description(r#"a < b && "c" > 'd'"#),
        );
        let xml = write(&Project::new("p", "1.0.0").with_module(module));
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&amp;&amp;"));
        assert!(xml.contains("&gt;"));
        assert!(!xml.contains("a < b"));
    }

    #[test]
    fn test_module_element_order() {
        let module = Module::new("m", "core")
            .with_relationship(Relationship::new("r", RelationshipKind::Dependency, "s", "e"))
            .with_struct(Struct::new("s", "Point").with_field(Attribute::new("x", "int")))
            .with_enum(Enum::new("e", "Color").with_value(EnumValue::new("RED", Some("0"))))
            .with_interface(Interface::new("i", "IShape"))
            .with_class(Class::new("c", "Shape"));
        let xml = write(&Project::new("p", "1.0.0").with_module(module));

        let at = |needle: &str| xml.find(needle).unwrap();
        assert!(at("<classes>") < at("<interfaces>"));
        assert!(at("<interfaces>") < at("<enums>"));
        assert!(at("<enums>") < at("<structs>"));
        assert!(at("<structs>") < at("<relationships>"));
        assert!(xml.contains(r#"<relationship type="dependency" from="Point" to="Color"/>"#));
        assert!(xml.contains(r#"<value name="RED" value="0"/>"#));
    }

    #[test]
    fn test_dangling_endpoint_written_as_raw_id() {
        let module = Module::new("m", "core")
            .with_class(Class::new("c", "Shape"))
            .with_relationship(Relationship::new("r", RelationshipKind::Association, "c", "gone-42"));
        let xml = write(&Project::new("p", "1.0.0").with_module(module));
        assert!(xml.contains(r#"from="Shape" to="gone-42""#));
    }

    #[test]
    fn test_endpoint_names_follow_first_declaration() {
        let module = Module::new("m", "core")
            .with_class(Class::new("dup", "First"))
            .with_class(Class::new("other", "Other"))
            .with_struct(Struct::new("dup", "Second"))
            .with_relationship(Relationship::new("r1", RelationshipKind::Dependency, "dup", "other"))
            .with_relationship(Relationship::new("r2", RelationshipKind::Dependency, "other", "dup"));
        let xml = write(&Project::new("p", "1.0.0").with_module(module));
        assert!(xml.contains(r#"from="First" to="Other""#));
        assert!(xml.contains(r#"from="Other" to="First""#));
        assert!(!xml.contains(r#"from="Second""#));
        assert!(!xml.contains(r#"to="Second""#));
    }

    #[test]
    fn test_method_details() {
        let mut method = Method::new("run", "bool")
            .with_visibility(Visibility::Protected)
            .async_()
            .with_parameter(Parameter::new("n", "int").optional(Some("1")));
        method.preconditions.push("n > 0".to_string());
        method.throws.push(Throws::new("ValueError", "n is negative"));
        method.hints.edge_cases.push("n == 0".to_string());

        let xml = DocumentWriter::new()
            .write_class(&Class::new("c", "Job").with_method(method))
            .unwrap();
        assert!(!xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<method name="run" visibility="protected" async="true">"#));
        assert!(xml.contains(r#"<param name="n" type="int" optional="true" default="1"/>"#));
        assert!(xml.contains(r#"<returns type="bool"/>"#));
        assert!(xml.contains("<condition>n &gt; 0</condition>"));
        assert!(xml.contains("<when>n is negative</when>"));
        assert!(xml.contains("<case>n == 0</case>"));
    }

    #[test]
    fn test_two_space_indent() {
        let module = Module::new("m", "core");
        let xml = write(&Project::new("p", "1.0.0").with_module(module));
        assert!(xml.contains("\n  <module name=\"core\"/>"));
    }
}
