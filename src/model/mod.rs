//! The class model: projects, modules, entities and relationships.
//!
//! The editor owns the canonical, mutable copy of this data. Every analysis
//! in this crate borrows an immutable snapshot and returns derived values;
//! only the interchange reader builds a brand-new [`Project`].
//!
//! ```text
//! Project
//! └── modules: Vec<Module>
//!     ├── classes / interfaces / enums / structs  (declaration order)
//!     └── relationships: Vec<Relationship>         (id-based edges)
//! ```

mod entities;
mod kinds;
mod members;
mod project;

pub use entities::{Class, EntityRef, Enum, Interface, Struct};
pub use kinds::{EntityKind, RelationshipKind, TargetLanguage, TestKind, Visibility};
pub use members::{
    Attribute, EnumValue, Hints, InterfaceMethod, Method, Parameter, TestCase, Throws,
};
pub use project::{Module, Project, Relationship};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{EntityId, Position};
    use indexmap::IndexMap;

    fn sample_module() -> Module {
        Module::new("m1", "shapes")
            .with_class(Class::new("c1", "Shape"))
            .with_interface(Interface::new("i1", "Drawable"))
            .with_enum(Enum::new("e1", "Color"))
            .with_struct(Struct::new("s1", "Point"))
            .with_class(Class::new("c2", "Circle").with_extends("Shape"))
    }

    #[test]
    fn test_entities_follow_declaration_order() {
        let module = sample_module();
        let names: Vec<_> = module.entities().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Shape", "Circle", "Drawable", "Color", "Point"]);
        assert_eq!(module.entity_count(), 5);
    }

    #[test]
    fn test_entity_lookup() {
        let module = sample_module();
        let id = EntityId::from("e1");
        assert_eq!(module.entity_name(&id), Some("Color"));
        assert_eq!(module.entity_kind(&id), Some(EntityKind::Enum));
        assert!(!module.contains_entity(&EntityId::from("missing")));
    }

    #[test]
    fn test_with_positions_leaves_original_untouched() {
        let module = sample_module();
        let mut positions = IndexMap::new();
        positions.insert(EntityId::from("s1"), Position::new(5.0, 6.0));

        let moved = module.with_positions(&positions);
        assert_eq!(moved.structs[0].position, Position::new(5.0, 6.0));
        assert_eq!(module.structs[0].position, Position::ORIGIN);
        assert_eq!(moved.classes[0].position, Position::ORIGIN);
    }

    #[test]
    fn test_member_count() {
        let class = Class::new("c", "C")
            .with_attribute(Attribute::new("a", "int"))
            .with_method(Method::new("m", "void"));
        assert_eq!(EntityRef::Class(&class).member_count(), 2);
        let value = Enum::new("e", "E").with_value(EnumValue::new("A", None));
        assert_eq!(EntityRef::Enum(&value).member_count(), 1);
    }
}
