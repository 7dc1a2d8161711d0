use crate::{
    direction::CardinalDirs,
    tile::{Mask, Tile, TileIndex},
};

/// Cursor over the working tiles for editing edge masks and solidity.
///
/// Holds no tiles itself; every edit takes the slice it applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskAssignment {
    current: TileIndex,
}

impl MaskAssignment {
    pub fn new() -> Self {
        return Self::default();
    }

    pub fn current(&self) -> TileIndex {
        return self.current;
    }

    pub fn current_tile<'t>(&self, tiles: &'t [Tile]) -> Option<&'t Tile> {
        return tiles.get(self.current);
    }

    /// Pulls the cursor back into `[0, count - 1]` after the list shrank
    pub fn clamp(&mut self, count: usize) {
        self.current = self.current.min(count.saturating_sub(1));
    }

    pub fn has_next(&self, count: usize) -> bool {
        return self.current + 1 < count;
    }

    pub fn has_prev(&self) -> bool {
        return self.current > 0;
    }

    pub fn next_tile(&mut self, count: usize) {
        if self.has_next(count) {
            self.current += 1;
            log::debug!("mask cursor -> {}", self.current);
        }
    }

    pub fn prev_tile(&mut self) {
        if self.has_prev() {
            self.current -= 1;
            log::debug!("mask cursor -> {}", self.current);
        }
    }

    pub fn cycle_mask(&self, tiles: &mut [Tile], dir: CardinalDirs) -> Option<Mask> {
        let tile = tiles.get_mut(self.current)?;
        tile.masks[dir].cycle();
        log::debug!("tile {} mask {} = {}", tile.id, dir.name(), tile.masks[dir].value());
        return Some(tile.masks[dir]);
    }

    pub fn toggle_non_solid(&self, tiles: &mut [Tile]) -> Option<bool> {
        let tile = tiles.get_mut(self.current)?;
        tile.non_solid = !tile.non_solid;
        log::debug!("tile {} non_solid = {}", tile.id, tile.non_solid);
        return Some(tile.non_solid);
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
    fn cursor_does_not_wrap() {
        let mut cursor = MaskAssignment::new();
        cursor.prev_tile();
        assert_eq!(cursor.current(), 0);
        cursor.next_tile(2);
        cursor.next_tile(2);
        assert_eq!(cursor.current(), 1);
        assert!(!cursor.has_next(2));
        assert!(cursor.has_prev());
    }

    #[test]
    fn cycling_touches_only_one_side() {
        let mut tiles = tiles(2);
        let mut cursor = MaskAssignment::new();
        cursor.next_tile(tiles.len());
        assert_eq!(cursor.cycle_mask(&mut tiles, Right).map(Mask::value), Some(2));
        assert_eq!(tiles[1].masks[Right].value(), 2);
        assert_eq!(tiles[1].masks[Left], Mask::SOLID);
        assert_eq!(tiles[0].masks[Right], Mask::SOLID);
    }

    #[test]
    fn seven_cycles_return_to_start() {
        let mut tiles = tiles(1);
        let cursor = MaskAssignment::new();
        for _ in 0..7 {
            cursor.cycle_mask(&mut tiles, Up);
        }
        assert_eq!(tiles[0].masks[Up], Mask::SOLID);
    }

    #[test]
    fn toggle_solidity() {
        let mut tiles = tiles(1);
        let cursor = MaskAssignment::new();
        assert_eq!(cursor.toggle_non_solid(&mut tiles), Some(true));
        assert_eq!(cursor.toggle_non_solid(&mut tiles), Some(false));
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let mut tiles: Vec<Tile> = Vec::new();
        let mut cursor = MaskAssignment::new();
        cursor.next_tile(0);
        assert_eq!(cursor.current(), 0);
        assert!(cursor.cycle_mask(&mut tiles, Down).is_none());
        assert!(cursor.current_tile(&tiles).is_none());
    }

    #[test]
    fn clamp_after_shrink() {
        let mut cursor = MaskAssignment::new();
        cursor.next_tile(5);
        cursor.next_tile(5);
        cursor.next_tile(5);
        cursor.clamp(2);
        assert_eq!(cursor.current(), 1);
    }
}
