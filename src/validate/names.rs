//! Name → entity lookup built once per validation pass.
//!
//! `extends` and `implements` are name references. Resolving them here,
//! instead of scanning the entity lists per reference, keeps every check
//! linear in the size of the module.

use rustc_hash::FxHashMap;

use crate::model::{Class, EntityRef, Interface, Module};

/// Declared names of one module. The first declaration of a name wins.
#[derive(Debug, Default)]
pub struct NameTable<'a> {
    any: FxHashMap<&'a str, EntityRef<'a>>,
    classes: FxHashMap<&'a str, &'a Class>,
    interfaces: FxHashMap<&'a str, &'a Interface>,
}

impl<'a> NameTable<'a> {
    pub fn build(module: &'a Module) -> Self {
        let mut table = Self::default();
        for entity in module.entities() {
            table.any.entry(entity.name()).or_insert(entity);
        }
        for class in &module.classes {
            table.classes.entry(class.name.as_str()).or_insert(class);
        }
        for interface in &module.interfaces {
            table
                .interfaces
                .entry(interface.name.as_str())
                .or_insert(interface);
        }
        table
    }

    /// The first entity of any kind declaring `name`.
    pub fn first(&self, name: &str) -> Option<EntityRef<'a>> {
        self.any.get(name).copied()
    }

    pub fn class(&self, name: &str) -> Option<&'a Class> {
        self.classes.get(name).copied()
    }

    pub fn interface(&self, name: &str) -> Option<&'a Interface> {
        self.interfaces.get(name).copied()
    }
}
