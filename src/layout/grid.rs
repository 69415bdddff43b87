//! Fixed-column grid placement, ignoring any hierarchy.

use indexmap::IndexMap;

use super::options::GridOptions;
use crate::base::{EntityId, Position};

/// Place entities row by row on a fixed-column grid, in iteration order.
pub fn grid_layout<'a, I>(ids: I, options: &GridOptions) -> IndexMap<EntityId, Position>
where
    I: IntoIterator<Item = &'a EntityId>,
{
    let columns = options.columns.max(1);
    let mut positions = IndexMap::new();
    for id in ids {
        if positions.contains_key(id) {
            continue;
        }
        let slot = positions.len();
        let col = (slot % columns) as f64;
        let row = (slot / columns) as f64;
        positions.insert(
            id.clone(),
            options
                .origin
                .translate(col * options.spacing_x, row * options.spacing_y),
        );
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<EntityId> {
        (0..n).map(|i| EntityId::new(format!("e{i}"))).collect()
    }

    #[test]
    fn test_wraps_after_column_count() {
        let ids = ids(5);
        let options = GridOptions::default()
            .with_origin(Position::ORIGIN)
            .with_spacing(10.0, 20.0);
        let positions = grid_layout(&ids, &options);

        assert_eq!(positions[&ids[0]], Position::new(0.0, 0.0));
        assert_eq!(positions[&ids[3]], Position::new(30.0, 0.0));
        assert_eq!(positions[&ids[4]], Position::new(0.0, 20.0));
    }

    #[test]
    fn test_zero_columns_is_single_column() {
        let ids = ids(3);
        let options = GridOptions::default()
            .with_columns(0)
            .with_origin(Position::ORIGIN)
            .with_spacing(10.0, 10.0);
        let positions = grid_layout(&ids, &options);
        assert_eq!(positions[&ids[2]], Position::new(0.0, 20.0));
    }

    #[test]
    fn test_duplicate_ids_keep_first_slot() {
        let a = EntityId::from("a");
        let b = EntityId::from("b");
        let positions = grid_layout([&a, &b, &a], &GridOptions::default());
        assert_eq!(positions.len(), 2);
        assert_eq!(positions.get_index_of(&b), Some(1));
    }
}
