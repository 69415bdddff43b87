#![allow(clippy::unwrap_used)]

use rstest::rstest;
use umlforge::model::{
    Attribute, Class, Enum, EnumValue, Interface, InterfaceMethod, Method, Module, Parameter,
    Project, Struct,
};
use umlforge::validate::{Severity, codes, validate_module, validate_project};

fn documented(class: Class) -> Class {
    class.with_description("documented")
}

/// Modules that trigger exactly one diagnostic with the given code.
#[rstest]
#[case::unresolved_extends(
    Module::new("m", "m").with_class(documented(
        Class::new("c", "Car").with_extends("Vehicle").with_attribute(Attribute::new("wheels", "int"))
    )),
    codes::UNRESOLVED_EXTENDS,
    Severity::Error
)]
#[case::unresolved_implements(
    Module::new("m", "m").with_class(documented(
        Class::new("c", "Car").with_implements("IMovable").with_attribute(Attribute::new("wheels", "int"))
    )),
    codes::UNRESOLVED_IMPLEMENTS,
    Severity::Error
)]
#[case::unresolved_interface_extends(
    Module::new("m", "m").with_interface(
        Interface::new("i", "IMovable")
            .with_description("moves")
            .with_extends("IThing")
            .with_method(InterfaceMethod::new("go", "void"))
    ),
    codes::UNRESOLVED_INTERFACE_EXTENDS,
    Severity::Error
)]
#[case::attribute_without_type(
    Module::new("m", "m").with_class(documented(
        Class::new("c", "Car").with_attribute(Attribute::new("wheels", " "))
    )),
    codes::MISSING_TYPE,
    Severity::Error
)]
#[case::interface_param_without_type(
    Module::new("m", "m").with_interface(
        Interface::new("i", "IMovable")
            .with_description("moves")
            .with_method(InterfaceMethod::new("go", "void").with_parameter(Parameter::new("speed", "")))
    ),
    codes::MISSING_TYPE,
    Severity::Error
)]
#[case::abstract_method_on_concrete_class(
    Module::new("m", "m").with_class(documented(
        Class::new("c", "Car").with_method(Method::new("drive", "void").abstract_())
    )),
    codes::ABSTRACT_METHOD_IN_CONCRETE_CLASS,
    Severity::Error
)]
#[case::duplicate_enum_value(
    Module::new("m", "m").with_enum(
        Enum::new("e", "Gear")
            .with_description("gears")
            .with_value(EnumValue::new("LOW", None))
            .with_value(EnumValue::new("LOW", None))
    ),
    codes::DUPLICATE_ENUM_VALUE,
    Severity::Error
)]
#[case::duplicate_struct_field(
    Module::new("m", "m").with_struct(
        Struct::new("s", "Point")
            .with_description("a point")
            .with_field(Attribute::new("x", "f64"))
            .with_field(Attribute::new("x", "f64"))
    ),
    codes::DUPLICATE_FIELD,
    Severity::Error
)]
#[case::method_without_return_type(
    Module::new("m", "m").with_class(documented(
        Class::new("c", "Car").with_method(Method::new("drive", ""))
    )),
    codes::MISSING_RETURN_TYPE,
    Severity::Warning
)]
#[case::empty_struct(
    Module::new("m", "m").with_struct(Struct::new("s", "Unit").with_description("nothing")),
    codes::EMPTY_ENTITY,
    Severity::Warning
)]
#[case::missing_description(
    Module::new("m", "m").with_enum(Enum::new("e", "Gear").with_value(EnumValue::new("LOW", None))),
    codes::MISSING_DESCRIPTION,
    Severity::Info
)]
fn test_single_diagnostic(
    #[case] module: Module,
    #[case] code: &str,
    #[case] severity: Severity,
) {
    let report = validate_module(&module);
    assert_eq!(report.diagnostics.len(), 1, "{:?}", report.diagnostics);
    assert_eq!(report.diagnostics[0].code, code);
    assert_eq!(report.diagnostics[0].severity, severity);
    assert_eq!(report.is_valid(), severity != Severity::Error);
}

#[rstest]
#[case::blank_extends_ignored(" ")]
#[case::empty_extends_ignored("")]
fn test_blank_extends_is_not_a_reference(#[case] base: &str) {
    let module = Module::new("m", "m").with_class(documented(
        Class::new("c", "Car")
            .with_extends(base)
            .with_attribute(Attribute::new("wheels", "int")),
    ));
    assert!(validate_module(&module).diagnostics.is_empty());
}

#[rstest]
fn test_repeated_implements_reports_missing_method_once() {
    let module = Module::new("m", "m")
        .with_interface(
            Interface::new("i", "IRun")
                .with_description("runs")
                .with_method(InterfaceMethod::new("run", "void")),
        )
        .with_class(documented(
            Class::new("c", "Job")
                .with_implements("IRun")
                .with_implements("IRun")
                .with_attribute(Attribute::new("id", "int")),
        ));
    let report = validate_module(&module);
    assert_eq!(report.by_code(codes::MISSING_INTERFACE_METHOD).len(), 1);
    assert!(report.is_valid());
}

#[rstest]
fn test_validation_is_idempotent() {
    let module = Module::new("m", "m")
        .with_class(Class::new("a", "A").with_extends("B"))
        .with_class(Class::new("b", "B").with_extends("A"))
        .with_class(Class::new("c", "A"))
        .with_struct(Struct::new("s", "S").with_field(Attribute::new("x", "")));
    assert_eq!(validate_module(&module), validate_module(&module));
}

#[rstest]
fn test_project_report_spans_modules() {
    let project = Project::new("p", "1.0.0")
        .with_module(Module::new("m1", "one").with_class(Class::new("a", "A").with_extends("Nope")))
        .with_module(Module::new("m2", "two").with_class(Class::new("b", "B").with_extends("Nope")));
    let report = validate_project(&project);
    let unresolved = report.by_code(codes::UNRESOLVED_EXTENDS);
    assert_eq!(unresolved.len(), 2);
    assert_eq!(unresolved[0].entity_id.as_str(), "a");
    assert_eq!(unresolved[1].entity_id.as_str(), "b");
    assert!(!report.is_valid());
}
