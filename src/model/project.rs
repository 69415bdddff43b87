//! Projects, modules and relationships.

use indexmap::{IndexMap, IndexSet};

use super::entities::{Class, EntityRef, Enum, Interface, Struct};
use super::kinds::{EntityKind, RelationshipKind, TargetLanguage};
use crate::base::{EntityId, ModuleId, Position, RelationshipId};

/// A typed, directed edge between two entity identifiers.
///
/// Endpoints may dangle (refer to an entity that no longer exists). Readers
/// must skip such edges rather than fail.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    pub id: RelationshipId,
    pub kind: RelationshipKind,
    pub from: EntityId,
    pub to: EntityId,
    pub description: Option<String>,
    pub cardinality: Option<String>,
}

impl Relationship {
    pub fn new(
        id: impl Into<RelationshipId>,
        kind: RelationshipKind,
        from: impl Into<EntityId>,
        to: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            from: from.into(),
            to: to.into(),
            description: None,
            cardinality: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_cardinality(mut self, cardinality: impl Into<String>) -> Self {
        self.cardinality = Some(cardinality.into());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A module: one diagram's worth of entities and the edges between them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    pub classes: Vec<Class>,
    pub interfaces: Vec<Interface>,
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub relationships: Vec<Relationship>,
}

impl Module {
    pub fn new(id: impl Into<ModuleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            classes: Vec::new(),
            interfaces: Vec::new(),
            enums: Vec::new(),
            structs: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_enum(mut self, value: Enum) -> Self {
        self.enums.push(value);
        self
    }

    pub fn with_struct(mut self, value: Struct) -> Self {
        self.structs.push(value);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Iterate all entities in declaration order: classes, interfaces,
    /// enums, then structs.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.classes
            .iter()
            .map(EntityRef::Class)
            .chain(self.interfaces.iter().map(EntityRef::Interface))
            .chain(self.enums.iter().map(EntityRef::Enum))
            .chain(self.structs.iter().map(EntityRef::Struct))
    }

    pub fn entity_count(&self) -> usize {
        self.classes.len() + self.interfaces.len() + self.enums.len() + self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0 && self.relationships.is_empty()
    }

    /// All entity ids, in declaration order.
    pub fn entity_ids(&self) -> IndexSet<EntityId> {
        self.entities().map(|e| e.id().clone()).collect()
    }

    /// All relationship ids, dangling ones included.
    pub fn relationship_ids(&self) -> IndexSet<RelationshipId> {
        self.relationships.iter().map(|r| r.id.clone()).collect()
    }

    pub fn entity(&self, id: &EntityId) -> Option<EntityRef<'_>> {
        self.entities().find(|e| e.id() == id)
    }

    pub fn contains_entity(&self, id: &EntityId) -> bool {
        self.entity(id).is_some()
    }

    pub fn entity_name(&self, id: &EntityId) -> Option<&str> {
        self.entity(id).map(|e| e.name())
    }

    pub fn entity_kind(&self, id: &EntityId) -> Option<EntityKind> {
        self.entity(id).map(|e| e.kind())
    }

    /// Return a copy of this module with the given positions applied.
    /// Entities missing from `positions` keep their current position.
    pub fn with_positions(&self, positions: &IndexMap<EntityId, Position>) -> Module {
        let mut module = self.clone();
        for class in &mut module.classes {
            if let Some(p) = positions.get(&class.id) {
                class.position = *p;
            }
        }
        for interface in &mut module.interfaces {
            if let Some(p) = positions.get(&interface.id) {
                interface.position = *p;
            }
        }
        for value in &mut module.enums {
            if let Some(p) = positions.get(&value.id) {
                value.position = *p;
            }
        }
        for value in &mut module.structs {
            if let Some(p) = positions.get(&value.id) {
                value.position = *p;
            }
        }
        module
    }
}

/// A whole project: metadata plus an ordered list of modules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Project {
    pub name: String,
    /// Semantic version string, e.g. `1.0.0`.
    pub version: String,
    pub description: String,
    pub language: TargetLanguage,
    pub modules: Vec<Module>,
}

impl Project {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: String::new(),
            language: TargetLanguage::default(),
            modules: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.language = language;
        self
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    pub fn add_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    pub fn entity_count(&self) -> usize {
        self.modules.iter().map(Module::entity_count).sum()
    }
}
