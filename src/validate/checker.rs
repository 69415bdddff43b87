//! Structural checks over one module.
//!
//! Checks run in a fixed order so repeated runs over the same snapshot
//! produce identical reports:
//!
//! 1. duplicate entity names
//! 2. class inheritance cycles
//! 3. `extends` / `implements` reference validity
//! 4. interface conformance
//! 5. completeness and style, entity by entity in declaration order

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::diagnostics::{Diagnostic, DiagnosticCollector, ValidationReport, codes};
use super::names::NameTable;
use crate::base::EntityId;
use crate::model::{
    Attribute, Class, EntityKind, EntityRef, Enum, Interface, Module, Parameter, Project, Struct,
};

/// Runs the structural checks over one module.
pub struct ModelValidator<'a> {
    module: &'a Module,
    names: NameTable<'a>,
    collector: DiagnosticCollector,
}

impl<'a> ModelValidator<'a> {
    /// Create a validator for `module`, building its name table.
    pub fn new(module: &'a Module) -> Self {
        Self {
            module,
            names: NameTable::build(module),
            collector: DiagnosticCollector::new(),
        }
    }

    /// Run every check in order.
    pub fn check_all(&mut self) {
        self.check_duplicate_names();
        self.check_inheritance_cycles();
        self.check_references();
        self.check_interface_conformance();
        self.check_completeness();
    }

    /// Every entity reusing an already-declared name gets one error.
    fn check_duplicate_names(&mut self) {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for entity in self.module.entities() {
            if seen.insert(entity.name()) {
                continue;
            }
            let first = self.names.first(entity.name()).unwrap_or(entity);
            self.collector.add(
                Diagnostic::error(
                    codes::DUPLICATE_NAME,
                    entity.id(),
                    entity.kind(),
                    format!(
                        "duplicate name '{}': already declared as {} '{}'",
                        entity.name(),
                        first.kind(),
                        first.id()
                    ),
                )
                .with_field("name"),
            );
        }
    }

    /// Walk each class's `extends` chain by name and report each cycle once.
    fn check_inheritance_cycles(&mut self) {
        let mut in_cycle: FxHashSet<&str> = FxHashSet::default();

        for class in &self.module.classes {
            if in_cycle.contains(class.name.as_str()) {
                continue;
            }

            let mut path: Vec<&str> = Vec::new();
            let mut visited: FxHashMap<&str, usize> = FxHashMap::default();
            let mut current: Option<&Class> = Some(class);

            while let Some(c) = current {
                let name = c.name.as_str();
                if in_cycle.contains(name) {
                    // Leads into a cycle that was already reported.
                    break;
                }
                if let Some(&start) = visited.get(name) {
                    let cycle = &path[start..];
                    let owner = self.names.class(cycle[0]).unwrap_or(c);
                    let mut rendered = cycle.join(" -> ");
                    rendered.push_str(" -> ");
                    rendered.push_str(cycle[0]);
                    self.collector.add(
                        Diagnostic::error(
                            codes::INHERITANCE_CYCLE,
                            &owner.id,
                            EntityKind::Class,
                            format!("inheritance cycle: {rendered}"),
                        )
                        .with_field("extends"),
                    );
                    in_cycle.extend(cycle.iter().copied());
                    break;
                }
                visited.insert(name, path.len());
                path.push(name);
                current = c
                    .extends
                    .as_deref()
                    .and_then(|base| self.names.class(base));
            }
        }
    }

    fn check_references(&mut self) {
        for class in &self.module.classes {
            if let Some(base) = non_blank(class.extends.as_deref()) {
                if self.names.class(base).is_none() {
                    let message = match self.names.interface(base) {
                        Some(_) => format!(
                            "class '{}' extends '{}', which is an interface, not a class",
                            class.name, base
                        ),
                        None => format!("class '{}' extends unknown class '{}'", class.name, base),
                    };
                    self.collector.add(
                        Diagnostic::error(
                            codes::UNRESOLVED_EXTENDS,
                            &class.id,
                            EntityKind::Class,
                            message,
                        )
                        .with_field("extends"),
                    );
                }
            }
            for name in &class.implements {
                if self.names.interface(name).is_none() {
                    self.collector.add(
                        Diagnostic::error(
                            codes::UNRESOLVED_IMPLEMENTS,
                            &class.id,
                            EntityKind::Class,
                            format!(
                                "class '{}' implements unknown interface '{}'",
                                class.name, name
                            ),
                        )
                        .with_field("implements"),
                    );
                }
            }
        }

        for interface in &self.module.interfaces {
            for name in &interface.extends {
                if self.names.interface(name).is_none() {
                    self.collector.add(
                        Diagnostic::error(
                            codes::UNRESOLVED_INTERFACE_EXTENDS,
                            &interface.id,
                            EntityKind::Interface,
                            format!(
                                "interface '{}' extends unknown interface '{}'",
                                interface.name, name
                            ),
                        )
                        .with_field("extends"),
                    );
                }
            }
        }
    }

    /// Method names only; signatures are not compared.
    fn check_interface_conformance(&mut self) {
        for class in &self.module.classes {
            let own: FxHashSet<&str> = class.methods.iter().map(|m| m.name.as_str()).collect();
            let mut checked: FxHashSet<&str> = FxHashSet::default();

            for name in &class.implements {
                if !checked.insert(name.as_str()) {
                    continue;
                }
                let Some(interface) = self.names.interface(name) else {
                    continue;
                };
                for method in &interface.methods {
                    if own.contains(method.name.as_str()) {
                        continue;
                    }
                    self.collector.add(
                        Diagnostic::warning(
                            codes::MISSING_INTERFACE_METHOD,
                            &class.id,
                            EntityKind::Class,
                            format!(
                                "class '{}' does not implement '{}.{}'",
                                class.name, interface.name, method.name
                            ),
                        )
                        .with_field(method.name.as_str()),
                    );
                }
            }
        }
    }

    fn check_completeness(&mut self) {
        let module = self.module;
        for entity in module.entities() {
            self.check_members_present(entity);
            self.check_description(entity);
            match entity {
                EntityRef::Class(class) => self.check_class_members(class),
                EntityRef::Interface(interface) => self.check_interface_members(interface),
                EntityRef::Enum(value) => self.check_enum_values(value),
                EntityRef::Struct(value) => self.check_struct_fields(value),
            }
        }
    }

    fn check_members_present(&mut self, entity: EntityRef<'_>) {
        if entity.member_count() > 0 {
            return;
        }
        let what = match entity.kind() {
            EntityKind::Class => "attributes or methods",
            EntityKind::Interface => "methods",
            EntityKind::Enum => "values",
            EntityKind::Struct => "fields",
        };
        self.collector.add(Diagnostic::warning(
            codes::EMPTY_ENTITY,
            entity.id(),
            entity.kind(),
            format!("{} '{}' has no {}", entity.kind(), entity.name(), what),
        ));
    }

    fn check_description(&mut self, entity: EntityRef<'_>) {
        if !entity.description().trim().is_empty() {
            return;
        }
        self.collector.add(
            Diagnostic::info(
                codes::MISSING_DESCRIPTION,
                entity.id(),
                entity.kind(),
                format!("{} '{}' has no description", entity.kind(), entity.name()),
            )
            .with_field("description"),
        );
    }

    fn check_class_members(&mut self, class: &Class) {
        for attribute in &class.attributes {
            self.check_attribute_type(&class.id, EntityKind::Class, attribute, "attribute");
        }
        for method in &class.methods {
            self.check_parameters(&class.id, EntityKind::Class, &method.name, &method.parameters);
            self.check_return_type(&class.id, EntityKind::Class, &method.name, &method.return_type);
            if method.is_abstract && !class.is_abstract {
                self.collector.add(
                    Diagnostic::error(
                        codes::ABSTRACT_METHOD_IN_CONCRETE_CLASS,
                        &class.id,
                        EntityKind::Class,
                        format!(
                            "abstract method '{}' declared on non-abstract class '{}'",
                            method.name, class.name
                        ),
                    )
                    .with_field(method.name.as_str()),
                );
            }
        }
    }

    fn check_interface_members(&mut self, interface: &Interface) {
        for method in &interface.methods {
            self.check_parameters(
                &interface.id,
                EntityKind::Interface,
                &method.name,
                &method.parameters,
            );
            self.check_return_type(
                &interface.id,
                EntityKind::Interface,
                &method.name,
                &method.return_type,
            );
        }
    }

    fn check_enum_values(&mut self, value: &Enum) {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for item in &value.values {
            if !seen.insert(item.name.as_str()) {
                self.collector.add(
                    Diagnostic::error(
                        codes::DUPLICATE_ENUM_VALUE,
                        &value.id,
                        EntityKind::Enum,
                        format!("enum '{}' declares value '{}' twice", value.name, item.name),
                    )
                    .with_field(item.name.as_str()),
                );
            }
        }
    }

    fn check_struct_fields(&mut self, value: &Struct) {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for field in &value.fields {
            self.check_attribute_type(&value.id, EntityKind::Struct, field, "field");
            if !seen.insert(field.name.as_str()) {
                self.collector.add(
                    Diagnostic::error(
                        codes::DUPLICATE_FIELD,
                        &value.id,
                        EntityKind::Struct,
                        format!("struct '{}' declares field '{}' twice", value.name, field.name),
                    )
                    .with_field(field.name.as_str()),
                );
            }
        }
    }

    fn check_attribute_type(
        &mut self,
        owner: &EntityId,
        kind: EntityKind,
        attribute: &Attribute,
        what: &str,
    ) {
        if !attribute.type_name.trim().is_empty() {
            return;
        }
        self.collector.add(
            Diagnostic::error(
                codes::MISSING_TYPE,
                owner,
                kind,
                format!("{} '{}' has no type", what, attribute.name),
            )
            .with_field(format!("{}.type", attribute.name)),
        );
    }

    fn check_parameters(
        &mut self,
        owner: &EntityId,
        kind: EntityKind,
        method: &str,
        parameters: &[Parameter],
    ) {
        for parameter in parameters {
            if !parameter.type_name.trim().is_empty() {
                continue;
            }
            self.collector.add(
                Diagnostic::error(
                    codes::MISSING_TYPE,
                    owner,
                    kind,
                    format!(
                        "parameter '{}' of method '{}' has no type",
                        parameter.name, method
                    ),
                )
                .with_field(format!("{}.{}.type", method, parameter.name)),
            );
        }
    }

    fn check_return_type(
        &mut self,
        owner: &EntityId,
        kind: EntityKind,
        method: &str,
        return_type: &str,
    ) {
        if !return_type.trim().is_empty() {
            return;
        }
        self.collector.add(
            Diagnostic::warning(
                codes::MISSING_RETURN_TYPE,
                owner,
                kind,
                format!("method '{method}' has no return type"),
            )
            .with_field(format!("{method}.returns")),
        );
    }

    /// Get the collected diagnostics.
    pub fn finish(mut self) -> ValidationReport {
        ValidationReport::new(self.collector.take())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate one module.
pub fn validate_module(module: &Module) -> ValidationReport {
    let mut validator = ModelValidator::new(module);
    validator.check_all();
    let report = validator.finish();
    debug!(
        module = %module.name,
        errors = report.error_count(),
        warnings = report.warning_count(),
        infos = report.info_count(),
        "module validated"
    );
    report
}

/// Validate every module of a project, concatenating results in module order.
pub fn validate_project(project: &Project) -> ValidationReport {
    let mut collector = DiagnosticCollector::new();
    for module in &project.modules {
        collector.extend(validate_module(module).diagnostics);
    }
    ValidationReport::new(collector.take())
}
