#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! End-to-end scenarios that exercise several engines on one module.

use umlforge::base::constants::ISOLATED_COMPONENT_ID;
use umlforge::graph::{analyze_components, entities_for_component, relationships_for_component};
use umlforge::layout::{LayoutOptions, layout_component, layout_hierarchy};
use umlforge::model::{Class, Module, Relationship, RelationshipKind};
use umlforge::validate::{codes, validate_module};
use umlforge::{EntityId, Position};

fn animal_dog() -> Module {
    Module::new("m", "zoo")
        .with_class(Class::new("animal", "Animal").with_description("Base animal"))
        .with_class(
            Class::new("dog", "Dog")
                .with_description("A dog")
                .with_extends("Animal"),
        )
        .with_relationship(Relationship::new(
            "r1",
            RelationshipKind::Inheritance,
            "dog",
            "animal",
        ))
}

#[test]
fn test_animal_dog_validates_clean() {
    let report = validate_module(&animal_dog());
    assert_eq!(report.error_count(), 0);
    assert!(report.is_valid());
}

#[test]
fn test_animal_dog_levels() {
    let module = animal_dog();
    let layout = layout_hierarchy(&module, None, &LayoutOptions::default());

    assert_eq!(layout.level(&EntityId::from("animal")), Some(0));
    assert_eq!(layout.level(&EntityId::from("dog")), Some(1));
    assert_eq!(layout.roots, vec![EntityId::from("animal")]);

    let parent = layout.position(&EntityId::from("animal")).unwrap();
    let child = layout.position(&EntityId::from("dog")).unwrap();
    assert_eq!(parent.x, child.x);
    assert!(parent.y < child.y);
}

#[test]
fn test_animal_dog_single_component() {
    let module = animal_dog();
    let analysis = analyze_components(&module);

    assert_eq!(analysis.component_count(), 1);
    assert!(analysis.isolated.is_empty());

    let component = &analysis.components[0];
    assert_eq!(component.entity_ids.len(), 2);
    assert!(component.contains(&EntityId::from("animal")));
    assert!(component.contains(&EntityId::from("dog")));
    assert_eq!(component.name, "Animal");
}

#[test]
fn test_duplicate_shape_reports_second() {
    let module = Module::new("m", "shapes")
        .with_class(Class::new("s1", "Shape"))
        .with_class(Class::new("s2", "Shape"));
    let report = validate_module(&module);

    let dups = report.by_code(codes::DUPLICATE_NAME);
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].entity_id, EntityId::from("s2"));
}

#[test]
fn test_mutual_extension_is_one_cycle_and_lays_out() {
    let module = Module::new("m", "loop")
        .with_class(Class::new("a", "A").with_extends("B"))
        .with_class(Class::new("b", "B").with_extends("A"))
        .with_relationship(Relationship::new("r1", RelationshipKind::Inheritance, "a", "b"))
        .with_relationship(Relationship::new("r2", RelationshipKind::Inheritance, "b", "a"));

    let report = validate_module(&module);
    let cycles = report.by_code(codes::INHERITANCE_CYCLE);
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].message.contains('A'));
    assert!(cycles[0].message.contains('B'));

    let layout = layout_hierarchy(&module, None, &LayoutOptions::default());
    assert_eq!(layout.positions.len(), 2);
    for id in ["a", "b"] {
        let id = EntityId::from(id);
        assert!(layout.level(&id).is_some());
        assert!(layout.position(&id).is_some_and(|p| p.is_finite()));
    }
}

#[test]
fn test_component_filtered_layout() {
    let module = animal_dog()
        .with_class(Class::new("loner", "Loner"))
        .with_class(Class::new("x", "X"))
        .with_class(Class::new("y", "Y"))
        .with_relationship(Relationship::new("r2", RelationshipKind::Dependency, "x", "y"));
    let analysis = analyze_components(&module);
    let options = LayoutOptions::default().with_origin(Position::ORIGIN);

    assert_eq!(analysis.component_count(), 2);
    let isolated = entities_for_component(&module, Some(ISOLATED_COMPONENT_ID), &analysis);
    assert_eq!(isolated.len(), 1);
    assert!(relationships_for_component(&module, Some(ISOLATED_COMPONENT_ID), &analysis).is_empty());

    let first = analysis.components[0].id.as_str();
    let layout = layout_component(&module, Some(first), &analysis, &options);
    assert_eq!(layout.positions.len(), 2);

    let lone = layout_component(&module, Some(ISOLATED_COMPONENT_ID), &analysis, &options);
    assert_eq!(
        lone.position(&EntityId::from("loner")),
        Some(Position::new(options.node_spacing / 2.0, 0.0))
    );
}

#[cfg(feature = "interchange")]
#[test]
fn test_import_empty_module_document() {
    use umlforge::interchange::deserialize_project;

    let project =
        deserialize_project(r#"<uml-project name="P"><module name="m"/></uml-project>"#).unwrap();
    assert_eq!(project.modules.len(), 1);

    let module = &project.modules[0];
    assert_eq!(module.name, "m");
    assert!(module.is_empty());
    assert!(module.relationships.is_empty());
    assert!(validate_module(module).diagnostics.is_empty());
}
