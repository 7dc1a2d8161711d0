use derive_more::IsVariant;

use crate::{
    direction::CardinalDirs,
    tile::{Tile, TileId, TileIndex},
};

/// Decisions a tile carries about its neighbors, one include and one
/// exclude list per direction. Entries are indices into the same catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub included: [Vec<TileIndex>; 4],
    pub excluded: [Vec<TileIndex>; 4],
}

impl Neighbors {
    pub fn is_decided(&self, other: TileIndex, dir: CardinalDirs) -> bool {
        return self.included[dir].contains(&other) || self.excluded[dir].contains(&other);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        return self
            .included
            .iter()
            .chain(self.excluded.iter())
            .all(Vec::is_empty);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Decision {
    Allowed,
    Forbidden,
    Undecided,
}

/// Record `to` as allowed or forbidden next to `from` in `dir`, and the
/// mirrored entry on `to` in the opposite direction.
pub fn record(tiles: &mut [Tile], from: TileIndex, to: TileIndex, dir: CardinalDirs, allowed: bool) {
    record_one_way(tiles, from, to, dir, allowed);
    record_one_way(tiles, to, from, -dir, allowed);
}

fn record_one_way(tiles: &mut [Tile], from: TileIndex, to: TileIndex, dir: CardinalDirs, allowed: bool) {
    let neighbors = &mut tiles[from].neighbors;
    let list = if allowed {
        &mut neighbors.included[dir]
    } else {
        &mut neighbors.excluded[dir]
    };
    if !list.contains(&to) {
        list.push(to);
    }
    log::trace!(
        "{} {from} -> {dir:?} -> {to}",
        if allowed { "allowing" } else { "forbidding" }
    );
}

/// Read-only view of the adjacency relation stored on the tiles
#[derive(Debug, Clone, Copy)]
pub struct AdjacencyGraph<'t> {
    tiles: &'t [Tile],
}

impl<'t> AdjacencyGraph<'t> {
    pub fn new(tiles: &'t [Tile]) -> Self {
        return Self { tiles };
    }

    pub fn len(&self) -> usize {
        return self.tiles.len();
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_allowed(&self, from: TileIndex, to: TileIndex, dir: CardinalDirs) -> bool {
        return self.allowed_neighbors(from, dir).contains(&to);
    }

    pub fn is_forbidden(&self, from: TileIndex, to: TileIndex, dir: CardinalDirs) -> bool {
        return self.forbidden_neighbors(from, dir).contains(&to);
    }

    pub fn decision(&self, from: TileIndex, to: TileIndex, dir: CardinalDirs) -> Decision {
        if self.is_allowed(from, to, dir) {
            return Decision::Allowed;
        }
        if self.is_forbidden(from, to, dir) {
            return Decision::Forbidden;
        }
        return Decision::Undecided;
    }

    pub fn allowed_neighbors(&self, from: TileIndex, dir: CardinalDirs) -> &'t [TileIndex] {
        return self
            .tiles
            .get(from)
            .map(|tile| tile.neighbors.included[dir].as_slice())
            .unwrap_or(&[]);
    }

    pub fn forbidden_neighbors(&self, from: TileIndex, dir: CardinalDirs) -> &'t [TileIndex] {
        return self
            .tiles
            .get(from)
            .map(|tile| tile.neighbors.excluded[dir].as_slice())
            .unwrap_or(&[]);
    }

    /// Every allowed placement as `(anchor id, direction, neighbor id)`
    pub fn allowed_pairs(&self) -> impl Iterator<Item = (TileId, CardinalDirs, TileId)> + 't {
        let tiles = self.tiles;
        return tiles.iter().flat_map(move |tile| {
            CardinalDirs::iter().flat_map(move |&dir| {
                tile.neighbors.included[dir]
                    .iter()
                    .map(move |&to| (tile.id, dir, tiles[to].id))
            })
        });
    }

    /// Checks that every entry is mirrored on its neighbor, that no pair is
    /// both allowed and forbidden, and that no list holds duplicates or
    /// dangling indices.
    pub fn is_consistent(&self) -> bool {
        for (from, tile) in self.tiles.iter().enumerate() {
            for &dir in CardinalDirs::iter() {
                let included = &tile.neighbors.included[dir];
                let excluded = &tile.neighbors.excluded[dir];
                for (list, mirrored) in [(included, true), (excluded, false)] {
                    for (pos, &to) in list.iter().enumerate() {
                        if to >= self.tiles.len() || list[..pos].contains(&to) {
                            return false;
                        }
                        let back = &self.tiles[to].neighbors;
                        let back_list = if mirrored {
                            &back.included[-dir]
                        } else {
                            &back.excluded[-dir]
                        };
                        if !back_list.contains(&from) {
                            return false;
                        }
                    }
                }
                if included.iter().any(|to| excluded.contains(to)) {
                    return false;
                }
            }
        }
        return true;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tile::TileRect;
    use glam::UVec2;
    use std::{path::Path, sync::Arc};
    use CardinalDirs::*;

    fn tiles(count: u32) -> Vec<Tile> {
        let image: Arc<Path> = Arc::from(Path::new("tiles.png"));
        return (0..count)
            .map(|i| Tile::new(i + 1, image.clone(), TileRect::square(UVec2::new(i * 32, 0), 32)))
            .collect();
    }

    #[test]
    fn record_is_mirrored() {
        let mut tiles = tiles(2);
        record(&mut tiles, 0, 1, Down, true);
        let graph = AdjacencyGraph::new(&tiles);
        assert!(graph.is_allowed(0, 1, Down));
        assert!(graph.is_allowed(1, 0, Up));
        assert!(!graph.is_allowed(0, 1, Up));
        assert!(graph.is_consistent());
    }

    #[test]
    fn forbidden_is_mirrored() {
        let mut tiles = tiles(2);
        record(&mut tiles, 1, 0, Right, false);
        let graph = AdjacencyGraph::new(&tiles);
        assert_eq!(graph.decision(1, 0, Right), Decision::Forbidden);
        assert_eq!(graph.decision(0, 1, Left), Decision::Forbidden);
        assert_eq!(graph.decision(0, 1, Right), Decision::Undecided);
    }

    #[test]
    fn self_pairing_records_both_sides() {
        let mut tiles = tiles(1);
        record(&mut tiles, 0, 0, Left, true);
        assert_eq!(tiles[0].neighbors.included[Left], vec![0]);
        assert_eq!(tiles[0].neighbors.included[Right], vec![0]);
        assert!(AdjacencyGraph::new(&tiles).is_consistent());
    }

    #[test]
    fn recording_twice_keeps_one_entry() {
        let mut tiles = tiles(2);
        record(&mut tiles, 0, 1, Up, true);
        record(&mut tiles, 0, 1, Up, true);
        assert_eq!(tiles[0].neighbors.included[Up].len(), 1);
        assert_eq!(tiles[1].neighbors.included[Down].len(), 1);
    }

    #[test]
    fn one_sided_entry_is_inconsistent() {
        let mut tiles = tiles(2);
        tiles[0].neighbors.included[Down].push(1);
        assert!(!AdjacencyGraph::new(&tiles).is_consistent());
    }

    #[test]
    fn allowed_and_forbidden_is_inconsistent() {
        let mut tiles = tiles(2);
        record(&mut tiles, 0, 1, Down, true);
        record(&mut tiles, 0, 1, Down, false);
        assert!(!AdjacencyGraph::new(&tiles).is_consistent());
    }

    #[test]
    fn allowed_pairs_use_tile_ids() {
        let mut tiles = tiles(3);
        record(&mut tiles, 0, 2, Right, true);
        let mut pairs: Vec<_> = AdjacencyGraph::new(&tiles).allowed_pairs().collect();
        pairs.sort_by_key(|&(from, _, to)| (from, to));
        assert_eq!(pairs, vec![(1, Right, 3), (3, Left, 1)]);
    }

    #[test]
    fn out_of_range_queries_are_undecided() {
        let tiles = tiles(1);
        let graph = AdjacencyGraph::new(&tiles);
        assert!(graph.allowed_neighbors(4, Up).is_empty());
        assert!(graph.decision(4, 0, Up).is_undecided());
    }
}
