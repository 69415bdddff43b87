//! XML document → Project.
//!
//! Reading happens in two passes:
//!
//! ```text
//! bytes ──quick-xml events──► Node tree ──► Project (fresh ids, grid positions)
//! ```
//!
//! The first pass is the only one that can fail. The second is lenient:
//! unknown enumerated values fall back to defaults and unresolved
//! relationship endpoints are carried through as raw names.
//!
//! Text is not trimmed. Leaf elements keep their content verbatim; the
//! whitespace-only text between child elements is indentation and is
//! dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::InterchangeError;
use super::tags;
use crate::base::constants::{DEFAULT_MODULE_NAME, DEFAULT_PROJECT_NAME, DEFAULT_PROJECT_VERSION};
use crate::base::{EntityId, ModuleId, RelationshipId};
use crate::layout::{GridOptions, grid_layout};
use crate::model::{
    Attribute, Class, Enum, EnumValue, Hints, Interface, InterfaceMethod, Method, Module,
    Parameter, Project, Relationship, RelationshipKind, Struct, TargetLanguage, TestCase, TestKind,
    Throws, Visibility,
};

// ============================================================================
// NODE TREE
// ============================================================================

/// One parsed element with its attributes, text and children.
#[derive(Debug, Default)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, InterchangeError> {
        let name = e.name();
        let tag = std::str::from_utf8(name.as_ref())
            .map_err(|e| InterchangeError::xml(format!("Invalid tag name: {e}")))?
            .to_string();

        let mut attrs = Vec::new();
        for attr_result in e.attributes() {
            let attr =
                attr_result.map_err(|e| InterchangeError::xml(format!("Attribute error: {e}")))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| InterchangeError::xml(format!("Attribute key error: {e}")))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| InterchangeError::xml(format!("Attribute value error: {e}")))?
                .to_string();
            attrs.push((key, value));
        }

        Ok(Self {
            tag,
            attrs,
            ..Self::default()
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value, treating an empty string as absent.
    fn value(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    fn string(&self, key: &str) -> String {
        self.attr(key).unwrap_or_default().to_string()
    }

    fn flag(&self, key: &str) -> bool {
        self.attr(key) == Some("true")
    }

    fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    fn child_text(&self, tag: &str) -> String {
        self.child(tag).map(|c| c.text.clone()).unwrap_or_default()
    }

    /// Items of a wrapped list such as `<methods><method/>..</methods>`.
    fn list<'s>(&'s self, wrapper: &'s str, item: &'s str) -> impl Iterator<Item = &'s Node> {
        self.child(wrapper)
            .into_iter()
            .flat_map(move |w| w.children.iter().filter(move |c| c.tag == item))
    }

    fn texts(&self, wrapper: &str, item: &str) -> Vec<String> {
        self.list(wrapper, item).map(|n| n.text.clone()).collect()
    }
}

fn parse_tree(input: &str) -> Result<Node, InterchangeError> {
    let mut reader = Reader::from_reader(input.as_bytes());
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(Node::from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                // Self-closing element - start and end at once
                let node = Node::from_start(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                if let Some(mut node) = stack.pop() {
                    if !node.children.is_empty() && node.text.trim().is_empty() {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| InterchangeError::xml(format!("Text error: {e}")))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = std::str::from_utf8(e)?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(InterchangeError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(InterchangeError::xml(format!(
            "Unclosed element <{}> at end of input",
            open.tag
        )));
    }
    root.ok_or_else(|| InterchangeError::missing_element(tags::PROJECT))
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), InterchangeError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => {
            return Err(InterchangeError::invalid_document(format!(
                "unexpected second root element <{}>",
                node.tag
            )));
        }
        None => *root = Some(node),
    }
    Ok(())
}

// ============================================================================
// PROJECT BUILDER
// ============================================================================

/// Builds a project from a parsed document, counting lenient fallbacks.
pub(super) struct DocumentReader {
    fallbacks: usize,
}

impl DocumentReader {
    pub fn new() -> Self {
        Self { fallbacks: 0 }
    }

    pub fn read(mut self, input: &str) -> Result<Project, InterchangeError> {
        let root = parse_tree(input)?;
        if root.tag != tags::PROJECT {
            return Err(InterchangeError::missing_element(tags::PROJECT));
        }

        let mut project = Project::new(
            root.attr("name").unwrap_or(DEFAULT_PROJECT_NAME),
            root.attr("version").unwrap_or(DEFAULT_PROJECT_VERSION),
        )
        .with_description(root.child_text(tags::DESCRIPTION))
        .with_language(self.language(&root));

        for node in root.children.iter().filter(|c| c.tag == tags::MODULE) {
            let module = self.module(node);
            project.add_module(module);
        }
        if project.modules.is_empty() {
            project.add_module(Module::new(ModuleId::generate(), DEFAULT_MODULE_NAME));
        }

        debug!(
            project = %project.name,
            modules = project.modules.len(),
            entities = project.entity_count(),
            fallbacks = self.fallbacks,
            "project deserialized"
        );
        Ok(project)
    }

    fn module(&mut self, node: &Node) -> Module {
        let name = node.attr("name").unwrap_or(DEFAULT_MODULE_NAME);
        let mut module = Module::new(ModuleId::generate(), name)
            .with_description(node.child_text(tags::DESCRIPTION));

        module.classes = node
            .list(tags::CLASSES, tags::CLASS)
            .map(|n| self.class(n))
            .collect();
        module.interfaces = node
            .list(tags::INTERFACES, tags::INTERFACE)
            .map(|n| self.interface(n))
            .collect();
        module.enums = node.list(tags::ENUMS, tags::ENUM).map(enumeration).collect();
        module.structs = node
            .list(tags::STRUCTS, tags::STRUCT)
            .map(|n| self.structure(n))
            .collect();

        // Endpoints are names; map them onto the fresh ids. First declaration wins.
        let relationships: Vec<Relationship> = {
            let mut ids: FxHashMap<&str, &EntityId> = FxHashMap::default();
            for entity in module.entities() {
                ids.entry(entity.name()).or_insert(entity.id());
            }
            let resolve = |name: &str| {
                ids.get(name)
                    .map(|id| (*id).clone())
                    .unwrap_or_else(|| EntityId::from(name))
            };
            node.list(tags::RELATIONSHIPS, tags::RELATIONSHIP)
                .map(|n| {
                    let mut rel = Relationship::new(
                        RelationshipId::generate(),
                        self.relationship_kind(n),
                        resolve(n.attr("from").unwrap_or_default()),
                        resolve(n.attr("to").unwrap_or_default()),
                    );
                    let description = n.child_text(tags::DESCRIPTION);
                    if !description.is_empty() {
                        rel = rel.with_description(description);
                    }
                    if let Some(cardinality) = n.value("cardinality") {
                        rel = rel.with_cardinality(cardinality);
                    }
                    rel
                })
                .collect()
        };
        module.relationships = relationships;

        let positions = grid_layout(&module.entity_ids(), &GridOptions::default());
        module.with_positions(&positions)
    }

    // ========================================================================
    // ENTITIES
    // ========================================================================

    fn class(&mut self, node: &Node) -> Class {
        let mut class = Class::new(EntityId::generate(), node.string("name"))
            .with_description(node.child_text(tags::DESCRIPTION));
        class.is_abstract = node.flag("abstract");
        class.extends = node.value("extends").map(str::to_string);
        class.implements = node.texts(tags::IMPLEMENTS, tags::INTERFACE);
        class.attributes = node
            .list(tags::ATTRIBUTES, tags::ATTRIBUTE)
            .map(|n| self.attribute(n))
            .collect();
        class.methods = node
            .list(tags::METHODS, tags::METHOD)
            .map(|n| self.method(n))
            .collect();
        class
    }

    fn interface(&mut self, node: &Node) -> Interface {
        let mut interface = Interface::new(EntityId::generate(), node.string("name"))
            .with_description(node.child_text(tags::DESCRIPTION));
        interface.extends = node.texts(tags::EXTENDS, tags::INTERFACE);
        interface.methods = node
            .list(tags::METHODS, tags::METHOD)
            .map(|n| InterfaceMethod {
                name: n.string("name"),
                parameters: parameters(n),
                return_type: n
                    .child(tags::RETURNS)
                    .map(|r| r.string("type"))
                    .unwrap_or_default(),
                description: n.child_text(tags::DESCRIPTION),
            })
            .collect();
        interface
    }

    fn structure(&mut self, node: &Node) -> Struct {
        let mut value = Struct::new(EntityId::generate(), node.string("name"))
            .with_description(node.child_text(tags::DESCRIPTION));
        value.fields = node
            .list(tags::FIELDS, tags::FIELD)
            .map(|n| self.attribute(n))
            .collect();
        value
    }

    // ========================================================================
    // MEMBERS
    // ========================================================================

    fn attribute(&mut self, node: &Node) -> Attribute {
        Attribute {
            name: node.string("name"),
            type_name: node.string("type"),
            visibility: self.visibility(node),
            is_static: node.flag("static"),
            is_readonly: node.flag("readonly"),
            default_value: node.value("default").map(str::to_string),
            description: node.child_text(tags::DESCRIPTION),
        }
    }

    fn method(&mut self, node: &Node) -> Method {
        let returns = node.child(tags::RETURNS);
        Method {
            name: node.string("name"),
            visibility: self.visibility(node),
            is_static: node.flag("static"),
            is_async: node.flag("async"),
            is_abstract: node.flag("abstract"),
            parameters: parameters(node),
            return_type: returns.map(|r| r.string("type")).unwrap_or_default(),
            return_description: returns
                .map(|r| r.child_text(tags::DESCRIPTION))
                .unwrap_or_default(),
            description: node.child_text(tags::DESCRIPTION),
            preconditions: node.texts(tags::PRECONDITIONS, tags::CONDITION),
            postconditions: node.texts(tags::POSTCONDITIONS, tags::CONDITION),
            throws: node
                .list(tags::THROWS, tags::EXCEPTION)
                .map(|n| Throws::new(n.string("type"), n.child_text(tags::WHEN)))
                .collect(),
            hints: node.child(tags::HINTS).map(hints).unwrap_or_default(),
            test_cases: node
                .list(tags::TEST_CASES, tags::TEST)
                .map(|n| {
                    TestCase::new(
                        n.string("name"),
                        self.test_kind(n),
                        n.child_text(tags::DESCRIPTION),
                    )
                })
                .collect(),
        }
    }

    // ========================================================================
    // LENIENT ENUMERATIONS
    // ========================================================================

    fn visibility(&mut self, node: &Node) -> Visibility {
        let Some(raw) = node.attr("visibility") else {
            return Visibility::default();
        };
        Visibility::parse(raw).unwrap_or_else(|| {
            self.fallback(&node.tag, "visibility", raw, Visibility::default().as_str());
            Visibility::default()
        })
    }

    fn test_kind(&mut self, node: &Node) -> TestKind {
        let Some(raw) = node.attr("type") else {
            return TestKind::default();
        };
        TestKind::parse(raw).unwrap_or_else(|| {
            self.fallback(&node.tag, "type", raw, TestKind::default().as_str());
            TestKind::default()
        })
    }

    fn language(&mut self, node: &Node) -> TargetLanguage {
        let Some(raw) = node.attr("language") else {
            return TargetLanguage::default();
        };
        TargetLanguage::parse(raw).unwrap_or_else(|| {
            self.fallback(&node.tag, "language", raw, TargetLanguage::default().as_str());
            TargetLanguage::default()
        })
    }

    fn relationship_kind(&mut self, node: &Node) -> RelationshipKind {
        let Some(raw) = node.attr("type") else {
            return RelationshipKind::Association;
        };
        RelationshipKind::parse(raw).unwrap_or_else(|| {
            self.fallback(&node.tag, "type", raw, RelationshipKind::Association.as_str());
            RelationshipKind::Association
        })
    }

    fn fallback(&mut self, element: &str, attribute: &str, value: &str, default: &str) {
        self.fallbacks += 1;
        warn!(element, attribute, value, default, "unknown value, using default");
    }
}

fn enumeration(node: &Node) -> Enum {
    let mut value = Enum::new(EntityId::generate(), node.string("name"))
        .with_description(node.child_text(tags::DESCRIPTION));
    value.values = node
        .list(tags::VALUES, tags::VALUE)
        .map(|n| EnumValue {
            name: n.string("name"),
            value: n.value("value").map(str::to_string),
            description: n.child_text(tags::DESCRIPTION),
        })
        .collect();
    value
}

fn parameters(node: &Node) -> Vec<Parameter> {
    node.list(tags::PARAMETERS, tags::PARAM)
        .map(|n| Parameter {
            name: n.string("name"),
            type_name: n.string("type"),
            optional: n.flag("optional"),
            default_value: n.value("default").map(str::to_string),
            description: n.child_text(tags::DESCRIPTION),
        })
        .collect()
}

fn hints(node: &Node) -> Hints {
    Hints {
        edge_cases: node.texts(tags::EDGE_CASES, tags::CASE),
        performance: node.texts(tags::PERFORMANCE, tags::HINT),
        style: node.texts(tags::STYLE, tags::HINT),
        custom: node.texts(tags::CUSTOM, tags::HINT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(xml: &str) -> Result<Project, InterchangeError> {
        DocumentReader::new().read(xml)
    }

    #[test]
    fn test_minimal_document() {
        let project = read(r#"<uml-project name="P"><module name="m"/></uml-project>"#).unwrap();
        assert_eq!(project.name, "P");
        assert_eq!(project.version, DEFAULT_PROJECT_VERSION);
        assert_eq!(project.modules.len(), 1);
        assert_eq!(project.modules[0].name, "m");
        assert!(project.modules[0].is_empty());
    }

    #[test]
    fn test_zero_modules_synthesizes_default() {
        let project = read("<uml-project/>").unwrap();
        assert_eq!(project.name, DEFAULT_PROJECT_NAME);
        assert_eq!(project.modules.len(), 1);
        assert_eq!(project.modules[0].name, DEFAULT_MODULE_NAME);
    }

    #[test]
    fn test_wrong_root_is_missing_element() {
        let err = read("<project name=\"P\"/>").unwrap_err();
        assert!(matches!(err, InterchangeError::Missing { name, .. } if name == "uml-project"));
    }

    #[test]
    fn test_empty_input_is_missing_element() {
        assert!(matches!(read(""), Err(InterchangeError::Missing { .. })));
    }

    #[test]
    fn test_malformed_is_xml_error() {
        let err = read("<uml-project><module></uml-project>").unwrap_err();
        assert!(matches!(err, InterchangeError::Xml(_)));
    }

    #[test]
    fn test_unclosed_root_is_error() {
        assert!(read("<uml-project name=\"P\"><module name=\"m\"/>").is_err());
    }

    #[test]
    fn test_relationship_endpoints_resolve_to_fresh_ids() {
        let xml = r#"
            <uml-project name="P">
              <module name="m">
                <classes>
                  <class name="Animal"/>
                  <class name="Dog" extends="Animal"/>
                </classes>
                <relationships>
                  <relationship type="inheritance" from="Dog" to="Animal"/>
                  <relationship type="association" from="Dog" to="Ghost"/>
                </relationships>
              </module>
            </uml-project>"#;
        let project = read(xml).unwrap();
        let module = &project.modules[0];
        let dog = &module.classes[1];
        let animal = &module.classes[0];

        assert_eq!(dog.extends.as_deref(), Some("Animal"));
        assert_eq!(module.relationships[0].from, dog.id);
        assert_eq!(module.relationships[0].to, animal.id);
        assert_eq!(module.relationships[0].kind, RelationshipKind::Inheritance);
        // Unresolved names pass through untouched.
        assert_eq!(module.relationships[1].to.as_str(), "Ghost");
    }

    #[test]
    fn test_first_declaration_wins_for_endpoints() {
        let xml = r#"
            <uml-project name="P"><module name="m">
              <classes><class name="Shape"/><class name="Shape"/></classes>
              <relationships><relationship type="dependency" from="Shape" to="Shape"/></relationships>
            </module></uml-project>"#;
        let project = read(xml).unwrap();
        let module = &project.modules[0];
        assert_eq!(module.relationships[0].from, module.classes[0].id);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let xml = r#"
            <uml-project name="P" language="cobol"><module name="m">
              <classes><class name="A">
                <attributes><attribute name="x" type="int" visibility="secret"/></attributes>
                <methods><method name="f">
                  <test-cases><test name="t" type="weird"/></test-cases>
                </method></methods>
              </class></classes>
              <relationships><relationship type="friendship" from="A" to="A"/></relationships>
            </module></uml-project>"#;
        let project = read(xml).unwrap();
        let class = &project.modules[0].classes[0];
        assert_eq!(project.language, TargetLanguage::Python);
        assert_eq!(class.attributes[0].visibility, Visibility::Public);
        assert_eq!(class.methods[0].test_cases[0].kind, TestKind::Success);
        assert_eq!(
            project.modules[0].relationships[0].kind,
            RelationshipKind::Association
        );
    }

    #[test]
    fn test_grid_positions_assigned() {
        let xml = r#"
            <uml-project name="P"><module name="m">
              <classes><class name="A"/><class name="B"/><class name="C"/></classes>
              <interfaces><interface name="I"/></interfaces>
              <enums><enum name="E"/></enums>
            </module></uml-project>"#;
        let project = read(xml).unwrap();
        let module = &project.modules[0];
        let options = GridOptions::default();
        assert_eq!(module.classes[0].position, options.origin);
        assert_eq!(
            module.interfaces[0].position,
            options.origin.translate(3.0 * options.spacing_x, 0.0)
        );
        assert_eq!(
            module.enums[0].position,
            options.origin.translate(0.0, options.spacing_y)
        );
    }

    #[test]
    fn test_leaf_text_keeps_surrounding_whitespace() {
        let xml = "<uml-project name=\"P\">\n  <description>Line one.\n</description>\n  <module name=\"m\">\n    <description>  indented</description>\n  </module>\n</uml-project>";
        let project = read(xml).unwrap();
        assert_eq!(project.description, "Line one.\n");
        assert_eq!(project.modules[0].description, "  indented");
    }

    #[test]
    fn test_empty_names_are_kept() {
        let project = read(r#"<uml-project name="" version=""><module name=""/></uml-project>"#).unwrap();
        assert_eq!(project.name, "");
        assert_eq!(project.version, "");
        assert_eq!(project.modules[0].name, "");
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let xml = r#"<uml-project name="a &amp; b"><description>x &lt; y</description></uml-project>"#;
        let project = read(xml).unwrap();
        assert_eq!(project.name, "a & b");
        assert_eq!(project.description, "x < y");
    }
}
