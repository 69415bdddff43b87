//! Connected-component analysis for grouping related entities.
//!
//! Entities without any valid relationship are kept out of the regular
//! components and collected into one synthetic bucket with the reserved id
//! [`ISOLATED_COMPONENT_ID`]. An entity whose only relationship is a
//! self-loop is not isolated; it forms a singleton component that owns the
//! loop.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::index::EntityGraphIndex;
use super::union_find::UnionFind;
use crate::base::constants::{COMPONENT_ID_PREFIX, ISOLATED_COMPONENT_ID};
use crate::base::{EntityId, RelationshipId};
use crate::model::Module;

/// One connected group of entities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    /// `component-<n>`, numbered after sorting by size.
    pub id: String,
    /// Name of the representative member.
    pub name: String,
    pub representative: EntityId,
    pub entity_ids: IndexSet<EntityId>,
    /// Relationships with both endpoints inside this component.
    pub relationship_ids: IndexSet<RelationshipId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.entity_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entity_ids.contains(id)
    }
}

/// Result of [`analyze_components`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentAnalysis {
    /// Regular components, largest first.
    pub components: Vec<Component>,
    /// Entities with no relationships, in declaration order.
    pub isolated: IndexSet<EntityId>,
}

impl ComponentAnalysis {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Id of the component containing `entity`, or the isolated id.
    pub fn component_of(&self, entity: &EntityId) -> Option<&str> {
        if self.isolated.contains(entity) {
            return Some(ISOLATED_COMPONENT_ID);
        }
        self.components
            .iter()
            .find(|c| c.contains(entity))
            .map(|c| c.id.as_str())
    }
}

/// Partition a module's entities into connected components.
pub fn analyze_components(module: &Module) -> ComponentAnalysis {
    let index = EntityGraphIndex::build(module);
    let mut uf = UnionFind::new(index.entity_count());

    for rel in index.valid_relationships() {
        if let (Some(a), Some(b)) = (index.index_of(&rel.from), index.index_of(&rel.to)) {
            uf.union(a, b);
        }
    }

    let mut isolated = IndexSet::new();
    // root -> member indices, in first-encountered order
    let mut groups: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for (i, entity) in index.entities().enumerate() {
        if index.is_isolated(entity.id()) {
            isolated.insert(entity.id().clone());
            continue;
        }
        groups.entry(uf.find(i)).or_default().push(i);
    }

    let mut group_relationships: IndexMap<usize, IndexSet<RelationshipId>> = IndexMap::new();
    for rel in index.valid_relationships() {
        if let Some(a) = index.index_of(&rel.from) {
            group_relationships
                .entry(uf.find(a))
                .or_default()
                .insert(rel.id.clone());
        }
    }

    let mut components: Vec<Component> = groups
        .into_iter()
        .filter_map(|(root, members)| {
            let entity_ids: IndexSet<EntityId> = members
                .iter()
                .filter_map(|&i| index.id_at(i).cloned())
                .collect();
            let representative = pick_representative(&index, &entity_ids)?;
            let name = index
                .entity(&representative)
                .map(|e| e.name().to_string())
                .unwrap_or_default();
            Some(Component {
                id: String::new(),
                name,
                representative,
                entity_ids,
                relationship_ids: group_relationships.swap_remove(&root).unwrap_or_default(),
            })
        })
        .collect();

    // Stable: equal-sized components keep first-encountered order.
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    for (n, component) in components.iter_mut().enumerate() {
        component.id = format!("{COMPONENT_ID_PREFIX}{n}");
    }

    debug!(
        module = %module.name,
        components = components.len(),
        isolated = isolated.len(),
        "component analysis complete"
    );

    ComponentAnalysis {
        components,
        isolated,
    }
}

/// Highest `degree + type bonus` wins; ties go to the earliest declared.
fn pick_representative(index: &EntityGraphIndex<'_>, members: &IndexSet<EntityId>) -> Option<EntityId> {
    let mut best: Option<(&EntityId, usize)> = None;
    for id in members {
        let Some(entity) = index.entity(id) else {
            continue;
        };
        let score = index.degree(id) + entity.kind().type_bonus();
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((id, score));
        }
    }
    best.map(|(id, _)| id.clone())
}

/// Entity ids visible for a component selection.
///
/// `None` selects everything, [`ISOLATED_COMPONENT_ID`] selects the isolated
/// bucket, a known id selects that component and anything else selects
/// nothing.
pub fn entities_for_component(
    module: &Module,
    component_id: Option<&str>,
    analysis: &ComponentAnalysis,
) -> IndexSet<EntityId> {
    match component_id {
        None => module.entity_ids(),
        Some(ISOLATED_COMPONENT_ID) => analysis.isolated.clone(),
        Some(id) => analysis
            .component(id)
            .map(|c| c.entity_ids.clone())
            .unwrap_or_default(),
    }
}

/// Relationship ids visible for a component selection.
///
/// Mirrors [`entities_for_component`]; the isolated bucket never has any.
pub fn relationships_for_component(
    module: &Module,
    component_id: Option<&str>,
    analysis: &ComponentAnalysis,
) -> IndexSet<RelationshipId> {
    match component_id {
        None => module.relationship_ids(),
        Some(ISOLATED_COMPONENT_ID) => IndexSet::new(),
        Some(id) => analysis
            .component(id)
            .map(|c| c.relationship_ids.clone())
            .unwrap_or_default(),
    }
}
