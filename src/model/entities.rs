//! Entity declarations: classes, interfaces, enums and structs.
//!
//! `extends` and `implements` hold *names*, not identifiers. Resolution
//! against declared names is the validator's job; nothing here guarantees
//! that a referenced name exists or is unique.

use super::kinds::EntityKind;
use super::members::{Attribute, EnumValue, InterfaceMethod, Method};
use crate::base::{EntityId, Position};

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub is_abstract: bool,
    /// Name of the base class, if any.
    pub extends: Option<String>,
    /// Names of implemented interfaces.
    pub implements: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
    pub position: Position,
}

impl Class {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_abstract: false,
            extends: None,
            implements: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
            position: Position::ORIGIN,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn with_implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// An interface declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interface {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Names of extended interfaces.
    pub extends: Vec<String>,
    pub methods: Vec<InterfaceMethod>,
    pub position: Position,
}

impl Interface {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            extends: Vec::new(),
            methods: Vec::new(),
            position: Position::ORIGIN,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_extends(mut self, base: impl Into<String>) -> Self {
        self.extends.push(base.into());
        self
    }

    pub fn with_method(mut self, method: InterfaceMethod) -> Self {
        self.methods.push(method);
        self
    }
}

/// An enum declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enum {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub values: Vec<EnumValue>,
    pub position: Position,
}

impl Enum {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            values: Vec::new(),
            position: Position::ORIGIN,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }
}

/// A plain data structure declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Struct {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub fields: Vec<Attribute>,
    pub position: Position,
}

impl Struct {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
            position: Position::ORIGIN,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_field(mut self, field: Attribute) -> Self {
        self.fields.push(field);
        self
    }
}

/// A borrowed, kind-erased view over any entity.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Class(&'a Class),
    Interface(&'a Interface),
    Enum(&'a Enum),
    Struct(&'a Struct),
}

impl<'a> EntityRef<'a> {
    pub fn id(&self) -> &'a EntityId {
        match self {
            EntityRef::Class(c) => &c.id,
            EntityRef::Interface(i) => &i.id,
            EntityRef::Enum(e) => &e.id,
            EntityRef::Struct(s) => &s.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            EntityRef::Class(c) => &c.name,
            EntityRef::Interface(i) => &i.name,
            EntityRef::Enum(e) => &e.name,
            EntityRef::Struct(s) => &s.name,
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            EntityRef::Class(c) => &c.description,
            EntityRef::Interface(i) => &i.description,
            EntityRef::Enum(e) => &e.description,
            EntityRef::Struct(s) => &s.description,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Class(_) => EntityKind::Class,
            EntityRef::Interface(_) => EntityKind::Interface,
            EntityRef::Enum(_) => EntityKind::Enum,
            EntityRef::Struct(_) => EntityKind::Struct,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            EntityRef::Class(c) => c.position,
            EntityRef::Interface(i) => i.position,
            EntityRef::Enum(e) => e.position,
            EntityRef::Struct(s) => s.position,
        }
    }

    /// Number of members: attributes + methods, methods, values or fields.
    pub fn member_count(&self) -> usize {
        match self {
            EntityRef::Class(c) => c.attributes.len() + c.methods.len(),
            EntityRef::Interface(i) => i.methods.len(),
            EntityRef::Enum(e) => e.values.len(),
            EntityRef::Struct(s) => s.fields.len(),
        }
    }
}
