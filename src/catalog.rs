use derive_more::Deref;

use crate::{
    error::CatalogError,
    tile::{Tile, TileIndex},
};

/// The ordered working list of tiles that masks and pairings are edited on.
///
/// Neighbor lists refer to tiles by position, so the catalog only hands out
/// mutable slices and refuses to grow or shrink once pairing has started.
#[derive(Deref, Debug, Default, Clone)]
pub struct TileCatalog {
    #[deref]
    tiles: Vec<Tile>,
    locked: bool,
}

impl TileCatalog {
    pub fn new() -> Self {
        return Self::default();
    }

    /// Appends a copy of `tile`. Returns `Ok(false)` without touching the
    /// catalog when the tile is the reserved id 0 or its source rectangle is
    /// already present.
    pub fn push(&mut self, tile: Tile) -> Result<bool, CatalogError> {
        if self.locked {
            return Err(CatalogError::Locked);
        }
        if tile.is_ignored() {
            log::debug!("ignoring placeholder tile at {:?}", tile.rect.pos);
            return Ok(false);
        }
        if self.tiles.iter().any(|t| t.same_source(&tile)) {
            log::debug!("tile {} already selected", tile.id);
            return Ok(false);
        }
        let mut tile = tile;
        tile.neighbors.clear();
        log::debug!("selected tile {}", tile.id);
        self.tiles.push(tile);
        return Ok(true);
    }

    pub fn remove(&mut self, index: TileIndex) -> Result<Tile, CatalogError> {
        if self.locked {
            return Err(CatalogError::Locked);
        }
        if index >= self.tiles.len() {
            return Err(CatalogError::OutOfRange {
                index,
                len: self.tiles.len(),
            });
        }
        let tile = self.tiles.remove(index);
        log::debug!("removed tile {} from selection", tile.id);
        return Ok(tile);
    }

    pub fn clear(&mut self) -> Result<(), CatalogError> {
        if self.locked {
            return Err(CatalogError::Locked);
        }
        self.tiles.clear();
        return Ok(());
    }

    /// Mutable access to the tiles without the ability to reorder or resize
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        return &mut self.tiles;
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        return self.locked;
    }

    /// Drop every recorded pairing decision, keeping masks
    pub fn clear_adjacency(&mut self) {
        for tile in &mut self.tiles {
            tile.neighbors.clear();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tile::TileRect;
    use glam::UVec2;
    use std::{path::Path, sync::Arc};

    fn tile(id: u32, x: u32) -> Tile {
        return Tile::new(
            id,
            Arc::from(Path::new("tiles.png")),
            TileRect::square(UVec2::new(x, 0), 32),
        );
    }

    #[test]
    fn keeps_insertion_order() {
        let mut catalog = TileCatalog::new();
        for (id, x) in [(3, 64), (1, 0), (2, 32)] {
            assert!(catalog.push(tile(id, x)).unwrap());
        }
        let ids: Vec<u32> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_source_is_silently_ignored() {
        let mut catalog = TileCatalog::new();
        assert!(catalog.push(tile(1, 0)).unwrap());
        assert!(!catalog.push(tile(7, 0)).unwrap());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn placeholder_tile_is_ignored() {
        let mut catalog = TileCatalog::new();
        assert!(!catalog.push(tile(0, 0)).unwrap());
        assert!(catalog.is_empty());
    }

    #[test]
    fn remove_by_position() {
        let mut catalog = TileCatalog::new();
        catalog.push(tile(1, 0)).unwrap();
        catalog.push(tile(2, 32)).unwrap();
        assert_eq!(catalog.remove(0).unwrap().id, 1);
        assert_eq!(catalog[0].id, 2);
        assert!(matches!(
            catalog.remove(5),
            Err(CatalogError::OutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn locked_catalog_refuses_changes() {
        let mut catalog = TileCatalog::new();
        catalog.push(tile(1, 0)).unwrap();
        catalog.lock();
        assert!(matches!(catalog.push(tile(2, 32)), Err(CatalogError::Locked)));
        assert!(matches!(catalog.remove(0), Err(CatalogError::Locked)));
        assert!(matches!(catalog.clear(), Err(CatalogError::Locked)));
        catalog.tiles_mut()[0].non_solid = true;
        assert!(catalog[0].non_solid);
        catalog.unlock();
        assert!(catalog.push(tile(2, 32)).unwrap());
    }
}
