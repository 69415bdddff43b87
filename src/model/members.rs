//! Members of entities: attributes, methods and their contracts.

use super::kinds::{TestKind, Visibility};

/// A class attribute or struct field.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    /// Declared type. Empty means the type is missing.
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub default_value: Option<String>,
    pub description: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }
}

/// A method or interface-method parameter.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    pub type_name: String,
    pub optional: bool,
    pub default_value: Option<String>,
    pub description: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn optional(mut self, default_value: Option<&str>) -> Self {
        self.optional = true;
        self.default_value = default_value.map(str::to_string);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An exception a method may raise and the condition that raises it.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Throws {
    pub exception: String,
    pub condition: String,
}

impl Throws {
    pub fn new(exception: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            exception: exception.into(),
            condition: condition.into(),
        }
    }
}

/// Free-form implementation hints attached to a method.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hints {
    pub edge_cases: Vec<String>,
    pub performance: Vec<String>,
    pub style: Vec<String>,
    pub custom: Vec<String>,
}

impl Hints {
    pub fn is_empty(&self) -> bool {
        self.edge_cases.is_empty()
            && self.performance.is_empty()
            && self.style.is_empty()
            && self.custom.is_empty()
    }
}

/// A test case specification for a method.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestCase {
    pub name: String,
    pub kind: TestKind,
    pub description: String,
}

impl TestCase {
    pub fn new(name: impl Into<String>, kind: TestKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
        }
    }
}

/// A class method with its full contract.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_async: bool,
    pub is_abstract: bool,
    pub parameters: Vec<Parameter>,
    /// Declared return type. Empty means the return type is missing.
    pub return_type: String,
    pub return_description: String,
    pub description: String,
    pub preconditions: Vec<String>,
    pub postconditions: Vec<String>,
    pub throws: Vec<Throws>,
    pub hints: Hints,
    pub test_cases: Vec<TestCase>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A method signature declared on an interface. Carries no contract.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceMethod {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: String,
    pub description: String,
}

impl InterfaceMethod {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// One value of an enum.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub value: Option<String>,
    pub description: String,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
            description: String::new(),
        }
    }
}
