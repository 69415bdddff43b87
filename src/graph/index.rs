//! Undirected adjacency over a module's entities.
//!
//! Built once per analysis from the relationship list. Edges whose
//! endpoints are not both declared in the module are dropped here, so every
//! consumer downstream sees only well-formed edges.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::base::EntityId;
use crate::model::{EntityRef, Module, Relationship};

/// Adjacency index over one module snapshot.
#[derive(Debug, Clone)]
pub struct EntityGraphIndex<'a> {
    /// Entities in declaration order. The first declaration of an id wins.
    entities: IndexMap<EntityId, EntityRef<'a>>,
    /// Undirected neighbours. Self-loops list the entity as its own neighbour.
    adjacency: FxHashMap<EntityId, IndexSet<EntityId>>,
    /// Number of valid incident edges per entity. A self-loop counts once.
    degree: FxHashMap<EntityId, usize>,
    /// Relationships whose endpoints both exist, in declaration order.
    edges: Vec<&'a Relationship>,
}

impl<'a> EntityGraphIndex<'a> {
    pub fn build(module: &'a Module) -> Self {
        let mut entities = IndexMap::with_capacity(module.entity_count());
        for entity in module.entities() {
            entities.entry(entity.id().clone()).or_insert(entity);
        }

        let mut adjacency: FxHashMap<EntityId, IndexSet<EntityId>> = FxHashMap::default();
        let mut degree: FxHashMap<EntityId, usize> = FxHashMap::default();
        let mut edges = Vec::with_capacity(module.relationships.len());

        for rel in &module.relationships {
            if !entities.contains_key(&rel.from) || !entities.contains_key(&rel.to) {
                trace!(relationship = %rel.id, "dropping relationship with dangling endpoint");
                continue;
            }
            adjacency
                .entry(rel.from.clone())
                .or_default()
                .insert(rel.to.clone());
            adjacency
                .entry(rel.to.clone())
                .or_default()
                .insert(rel.from.clone());
            *degree.entry(rel.from.clone()).or_default() += 1;
            if !rel.is_self_loop() {
                *degree.entry(rel.to.clone()).or_default() += 1;
            }
            edges.push(rel);
        }

        Self {
            entities,
            adjacency,
            degree,
            edges,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'a>> + '_ {
        self.entities.values().copied()
    }

    pub fn entity(&self, id: &EntityId) -> Option<EntityRef<'a>> {
        self.entities.get(id).copied()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Dense index of an entity, usable with [`super::UnionFind`].
    pub fn index_of(&self, id: &EntityId) -> Option<usize> {
        self.entities.get_index_of(id)
    }

    pub fn id_at(&self, index: usize) -> Option<&EntityId> {
        self.entities.get_index(index).map(|(id, _)| id)
    }

    pub fn neighbors(&self, id: &EntityId) -> impl Iterator<Item = &EntityId> {
        self.adjacency.get(id).into_iter().flatten()
    }

    pub fn degree(&self, id: &EntityId) -> usize {
        self.degree.get(id).copied().unwrap_or(0)
    }

    /// An entity with no valid relationship at all.
    pub fn is_isolated(&self, id: &EntityId) -> bool {
        self.adjacency.get(id).is_none_or(|n| n.is_empty())
    }

    /// Relationships whose endpoints both exist, in declaration order.
    pub fn valid_relationships(&self) -> &[&'a Relationship] {
        &self.edges
    }
}
