//! Enumerated attribute values of the class model.

use crate::base::constants::{CLASS_TYPE_BONUS, INTERFACE_TYPE_BONUS};

/// The four kinds of entity a module declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    Class,
    Interface,
    Enum,
    Struct,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Class => "class",
            EntityKind::Interface => "interface",
            EntityKind::Enum => "enum",
            EntityKind::Struct => "struct",
        }
    }

    /// Bonus added to an entity's edge count when picking a component's
    /// representative member.
    pub fn type_bonus(&self) -> usize {
        match self {
            EntityKind::Class => CLASS_TYPE_BONUS,
            EntityKind::Interface => INTERFACE_TYPE_BONUS,
            EntityKind::Enum | EntityKind::Struct => 0,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Type of a relationship edge.
///
/// For `Inheritance` and `Implementation` the edge's `from` endpoint is the
/// child and `to` is the base type or implemented interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RelationshipKind {
    Inheritance,
    Implementation,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "inheritance",
            RelationshipKind::Implementation => "implementation",
            RelationshipKind::Composition => "composition",
            RelationshipKind::Aggregation => "aggregation",
            RelationshipKind::Association => "association",
            RelationshipKind::Dependency => "dependency",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inheritance" => Some(RelationshipKind::Inheritance),
            "implementation" => Some(RelationshipKind::Implementation),
            "composition" => Some(RelationshipKind::Composition),
            "aggregation" => Some(RelationshipKind::Aggregation),
            "association" => Some(RelationshipKind::Association),
            "dependency" => Some(RelationshipKind::Dependency),
            _ => None,
        }
    }

    /// Whether this edge participates in the inheritance/implementation
    /// hierarchy used by the tree layout.
    pub fn is_hierarchical(&self) -> bool {
        matches!(
            self,
            RelationshipKind::Inheritance | RelationshipKind::Implementation
        )
    }
}

/// Expected outcome category of a method test case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TestKind {
    #[default]
    Success,
    Error,
    Edge,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Success => "success",
            TestKind::Error => "error",
            TestKind::Edge => "edge",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Some(TestKind::Success),
            "error" => Some(TestKind::Error),
            "edge" => Some(TestKind::Edge),
            _ => None,
        }
    }
}

/// Code-generation target of a project. Informational only to this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TargetLanguage {
    #[default]
    Python,
    TypeScript,
    Cpp,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Python => "python",
            TargetLanguage::TypeScript => "typescript",
            TargetLanguage::Cpp => "cpp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" => Some(TargetLanguage::Python),
            "typescript" => Some(TargetLanguage::TypeScript),
            "cpp" | "c++" => Some(TargetLanguage::Cpp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_kind_parse() {
        assert_eq!(
            RelationshipKind::parse("Inheritance"),
            Some(RelationshipKind::Inheritance)
        );
        assert_eq!(RelationshipKind::parse("uses"), None);
    }

    #[test]
    fn test_hierarchical_kinds() {
        assert!(RelationshipKind::Inheritance.is_hierarchical());
        assert!(RelationshipKind::Implementation.is_hierarchical());
        assert!(!RelationshipKind::Composition.is_hierarchical());
        assert!(!RelationshipKind::Dependency.is_hierarchical());
    }

    #[test]
    fn test_type_bonus_ordering() {
        assert!(EntityKind::Class.type_bonus() > EntityKind::Interface.type_bonus());
        assert!(EntityKind::Interface.type_bonus() > EntityKind::Enum.type_bonus());
        assert_eq!(EntityKind::Struct.type_bonus(), 0);
    }

    #[test]
    fn test_language_aliases() {
        assert_eq!(TargetLanguage::parse("c++"), Some(TargetLanguage::Cpp));
        assert_eq!(TargetLanguage::parse("TypeScript"), Some(TargetLanguage::TypeScript));
        assert_eq!(TargetLanguage::parse("cobol"), None);
    }
}
