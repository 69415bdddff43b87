//! Tree layout driven by inheritance and implementation edges.
//!
//! ## Algorithm
//!
//! 1. Restrict the module to the filtered entities and keep only
//!    inheritance/implementation edges between them (`from` = child,
//!    `to` = parent). Self-loops are ignored.
//! 2. Roots are entities without a parent. If every entity has a parent
//!    (cycles), every entity is treated as a root.
//! 3. Levels are assigned breadth-first from all roots at once; the first
//!    wave to reach a node wins. Unreached nodes go one level below the
//!    deepest observed level.
//! 4. Subtree widths are summed bottom-up, deepest level first.
//! 5. Coordinates are assigned top-down, then every parent is re-centred
//!    over its children, again deepest level first.
//!
//! The direction only decides which axis is "primary" (sibling spread).

use std::cmp::Ordering;
use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::options::{LayoutDirection, LayoutOptions};
use crate::base::{EntityId, Position};
use crate::graph::{ComponentAnalysis, EntityGraphIndex, entities_for_component};
use crate::model::Module;

/// Result of [`layout_hierarchy`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyLayout {
    /// One position per laid-out entity, in declaration order.
    pub positions: IndexMap<EntityId, Position>,
    /// Tree level per entity; roots are level 0.
    pub levels: IndexMap<EntityId, usize>,
    pub roots: Vec<EntityId>,
}

impl HierarchyLayout {
    pub fn position(&self, id: &EntityId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    pub fn level(&self, id: &EntityId) -> Option<usize> {
        self.levels.get(id).copied()
    }

    /// Number of levels in the layout.
    pub fn depth(&self) -> usize {
        self.levels.values().max().map_or(0, |max| max + 1)
    }
}

/// Parent/child adjacency over dense node indices.
struct Forest {
    nodes: IndexSet<EntityId>,
    parents: Vec<IndexSet<usize>>,
    children: Vec<IndexSet<usize>>,
}

impl Forest {
    fn build(module: &Module, filter: Option<&IndexSet<EntityId>>) -> Self {
        let index = EntityGraphIndex::build(module);
        let nodes: IndexSet<EntityId> = index
            .entities()
            .map(|e| e.id().clone())
            .filter(|id| filter.is_none_or(|f| f.contains(id)))
            .collect();

        let mut parents = vec![IndexSet::new(); nodes.len()];
        let mut children = vec![IndexSet::new(); nodes.len()];
        for rel in index.valid_relationships() {
            if !rel.kind.is_hierarchical() || rel.is_self_loop() {
                continue;
            }
            let (Some(child), Some(parent)) =
                (nodes.get_index_of(&rel.from), nodes.get_index_of(&rel.to))
            else {
                continue;
            };
            parents[child].insert(parent);
            children[parent].insert(child);
        }

        Self {
            nodes,
            parents,
            children,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn roots(&self) -> Vec<usize> {
        let roots: Vec<usize> = (0..self.len())
            .filter(|&i| self.parents[i].is_empty())
            .collect();
        if roots.is_empty() {
            // Every node has a parent, so the filtered graph is cyclic.
            (0..self.len()).collect()
        } else {
            roots
        }
    }

    /// Breadth-first levels from all roots at once.
    fn levels(&self, roots: &[usize]) -> Vec<usize> {
        let mut levels: Vec<Option<usize>> = vec![None; self.len()];
        let mut queue = VecDeque::with_capacity(self.len());
        for &root in roots {
            levels[root] = Some(0);
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            let next = levels[node].unwrap_or(0) + 1;
            for &child in &self.children[node] {
                if levels[child].is_none() {
                    levels[child] = Some(next);
                    queue.push_back(child);
                }
            }
        }

        let max_seen = levels.iter().flatten().copied().max().unwrap_or(0);
        levels
            .into_iter()
            .map(|level| level.unwrap_or(max_seen + 1))
            .collect()
    }

    /// Subtree widths in layout units, deepest level first.
    fn widths(&self, by_level: &[Vec<usize>]) -> Vec<usize> {
        let mut widths: Vec<Option<usize>> = vec![None; self.len()];
        for level in by_level.iter().rev() {
            for &node in level {
                let sum = self.children[node]
                    .iter()
                    .map(|&c| widths[c].unwrap_or(1))
                    .fold(0usize, usize::saturating_add);
                widths[node] = Some(sum.max(1));
            }
        }
        widths.into_iter().map(|w| w.unwrap_or(1)).collect()
    }
}

/// Lay out a module (or a filtered subset of it) as an inheritance forest.
///
/// Total over any input: cyclic hierarchies, dangling relationship
/// endpoints and filter ids that name no entity are all tolerated.
pub fn layout_hierarchy(
    module: &Module,
    filter: Option<&IndexSet<EntityId>>,
    options: &LayoutOptions,
) -> HierarchyLayout {
    let forest = Forest::build(module, filter);
    if forest.len() == 0 {
        return HierarchyLayout::default();
    }

    let roots = forest.roots();
    let levels = forest.levels(&roots);
    let depth = levels.iter().copied().max().unwrap_or(0) + 1;

    let mut by_level: Vec<Vec<usize>> = vec![Vec::new(); depth];
    for (node, &level) in levels.iter().enumerate() {
        by_level[level].push(node);
    }

    let widths = forest.widths(&by_level);

    let (origin_primary, origin_secondary) = match options.direction {
        LayoutDirection::TopToBottom => (options.origin.x, options.origin.y),
        LayoutDirection::LeftToRight => (options.origin.y, options.origin.x),
    };

    let mut primary: Vec<Option<f64>> = vec![None; forest.len()];
    let mut secondary = vec![0.0; forest.len()];

    for (level, members) in by_level.iter().enumerate() {
        let mut ordered = members.clone();
        // Follow the first positioned parent to keep siblings under their
        // parents; nodes without one go first, in declaration order.
        let keys: Vec<Option<f64>> = ordered
            .iter()
            .map(|&node| {
                forest.parents[node]
                    .iter()
                    .find_map(|&parent| primary[parent])
            })
            .collect();
        let key_of: IndexMap<usize, Option<f64>> = ordered.iter().copied().zip(keys).collect();
        ordered.sort_by(|a, b| compare_keys(key_of[a], key_of[b]));

        let mut offset = 0.0;
        for node in ordered {
            let width = widths[node] as f64;
            primary[node] = Some(origin_primary + (offset + width / 2.0) * options.node_spacing);
            secondary[node] = origin_secondary + level as f64 * options.level_spacing;
            offset += width;
        }
    }

    for members in by_level.iter().rev() {
        for &node in members {
            let (min, max) = forest.children[node]
                .iter()
                .filter_map(|&c| primary[c])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                    (lo.min(p), hi.max(p))
                });
            if min.is_finite() && max.is_finite() {
                primary[node] = Some((min + max) / 2.0);
            }
        }
    }

    let mut result = HierarchyLayout {
        roots: roots
            .iter()
            .map(|&r| forest.nodes[r].clone())
            .collect(),
        ..HierarchyLayout::default()
    };
    for (node, id) in forest.nodes.iter().enumerate() {
        let p = primary[node].unwrap_or(origin_primary);
        let s = secondary[node];
        let position = match options.direction {
            LayoutDirection::TopToBottom => Position::new(p, s),
            LayoutDirection::LeftToRight => Position::new(s, p),
        };
        result.positions.insert(id.clone(), position);
        result.levels.insert(id.clone(), levels[node]);
    }

    debug!(
        module = %module.name,
        nodes = forest.len(),
        roots = result.roots.len(),
        depth,
        "hierarchy layout complete"
    );

    result
}

/// Lay out the entities of one component selection.
///
/// `component_id` follows [`entities_for_component`]: `None` lays out the
/// whole module.
pub fn layout_component(
    module: &Module,
    component_id: Option<&str>,
    analysis: &ComponentAnalysis,
    options: &LayoutOptions,
) -> HierarchyLayout {
    let filter = entities_for_component(module, component_id, analysis);
    layout_hierarchy(module, Some(&filter), options)
}

fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}
