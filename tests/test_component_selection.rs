#![allow(clippy::unwrap_used)]

use rstest::{fixture, rstest};
use umlforge::graph::{
    ComponentAnalysis, analyze_components, entities_for_component, relationships_for_component,
};
use umlforge::model::{Class, Enum, Interface, Module, Relationship, RelationshipKind, Struct};

/// Two linked groups, one isolated enum, one dangling edge.
///
/// ```text
/// Circle ──► Shape ──► IDrawable      Point ──► Size
///                                       └────► ghost (dangling)
/// Color
/// ```
#[fixture]
fn module() -> Module {
    Module::new("m", "shapes")
        .with_class(Class::new("shape", "Shape"))
        .with_class(Class::new("circle", "Circle"))
        .with_interface(Interface::new("drawable", "IDrawable"))
        .with_enum(Enum::new("color", "Color"))
        .with_struct(Struct::new("point", "Point"))
        .with_struct(Struct::new("size", "Size"))
        .with_relationship(Relationship::new(
            "r-inherit",
            RelationshipKind::Inheritance,
            "circle",
            "shape",
        ))
        .with_relationship(Relationship::new(
            "r-impl",
            RelationshipKind::Implementation,
            "shape",
            "drawable",
        ))
        .with_relationship(Relationship::new(
            "r-comp",
            RelationshipKind::Composition,
            "point",
            "size",
        ))
        .with_relationship(Relationship::new(
            "r-dangling",
            RelationshipKind::Association,
            "point",
            "ghost",
        ))
}

fn ids<I: IntoIterator<Item = S>, S: AsRef<str>>(items: I) -> Vec<String> {
    items.into_iter().map(|s| s.as_ref().to_string()).collect()
}

fn analysis(module: &Module) -> ComponentAnalysis {
    analyze_components(module)
}

#[rstest]
fn test_components_ordered_by_size(module: Module) {
    let analysis = analysis(&module);
    assert_eq!(analysis.component_count(), 2);
    assert_eq!(analysis.components[0].id, "component-0");
    assert_eq!(analysis.components[0].len(), 3);
    assert_eq!(analysis.components[1].id, "component-1");
    assert_eq!(analysis.components[1].len(), 2);
    assert_eq!(ids(analysis.isolated.iter()), vec!["color"]);
}

#[rstest]
fn test_representative_prefers_classes(module: Module) {
    let analysis = analysis(&module);
    // Shape has degree 2 and the class bonus.
    assert_eq!(analysis.components[0].name, "Shape");
    // Point and Size tie; the dangling edge adds no degree.
    assert_eq!(analysis.components[1].name, "Point");
}

#[rstest]
#[case::all(None, &["shape", "circle", "drawable", "color", "point", "size"])]
#[case::isolated(Some("isolated"), &["color"])]
#[case::largest(Some("component-0"), &["shape", "circle", "drawable"])]
#[case::second(Some("component-1"), &["point", "size"])]
#[case::unknown(Some("component-9"), &[])]
fn test_entities_for_component(
    module: Module,
    #[case] selection: Option<&str>,
    #[case] expected: &[&str],
) {
    let analysis = analysis(&module);
    let selected = entities_for_component(&module, selection, &analysis);
    assert_eq!(ids(selected.iter()), ids(expected.iter()));
}

#[rstest]
#[case::all(None, &["r-inherit", "r-impl", "r-comp", "r-dangling"])]
#[case::isolated(Some("isolated"), &[])]
#[case::largest(Some("component-0"), &["r-inherit", "r-impl"])]
#[case::second(Some("component-1"), &["r-comp"])]
#[case::unknown(Some("nope"), &[])]
fn test_relationships_for_component(
    module: Module,
    #[case] selection: Option<&str>,
    #[case] expected: &[&str],
) {
    let analysis = analysis(&module);
    let selected = relationships_for_component(&module, selection, &analysis);
    assert_eq!(ids(selected.iter()), ids(expected.iter()));
}

#[rstest]
fn test_self_loop_forms_singleton_component() {
    let module = Module::new("m", "m")
        .with_class(Class::new("node", "Node"))
        .with_relationship(Relationship::new(
            "r",
            RelationshipKind::Association,
            "node",
            "node",
        ));
    let analysis = analyze_components(&module);
    assert!(analysis.isolated.is_empty());
    assert_eq!(analysis.component_count(), 1);
    assert_eq!(ids(analysis.components[0].relationship_ids.iter()), vec!["r"]);
}
