use derive_more::Deref;
use glam::UVec2;
use std::{path::Path, sync::Arc};

use crate::adjacency::Neighbors;

/// Identifier of a tile as exported by the tileset. 0 is reserved for "no tile"
pub type TileId = u32;

/// Position of a tile in the working [`crate::catalog::TileCatalog`]
pub type TileIndex = usize;

pub const IGNORED_TILE_ID: TileId = 0;

/// Directional edge tag of a tile, always within `1..=7`.
///
/// `1` asks for a solid neighbor on that side and `2` for a non-solid one.
/// The remaining values are bookkeeping only and never match a candidate.
#[derive(Deref, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask(u8);

impl Mask {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;
    pub const SOLID: Mask = Mask(1);
    pub const NON_SOLID: Mask = Mask(2);

    pub fn new(value: u8) -> Option<Self> {
        return (Self::MIN..=Self::MAX).contains(&value).then_some(Mask(value));
    }

    pub fn value(self) -> u8 {
        return self.0;
    }

    /// 1 -> 2 -> ... -> 7 -> 1
    pub fn cycle(&mut self) {
        self.0 = self.0 % Self::MAX + 1;
    }

    /// The mask an anchor edge needs to accept a neighbor of the given solidity
    pub fn wanted_for(non_solid: bool) -> Self {
        return if non_solid { Self::NON_SOLID } else { Self::SOLID };
    }

    pub fn accepts(self, neighbor_non_solid: bool) -> bool {
        return self == Self::wanted_for(neighbor_non_solid);
    }
}

impl Default for Mask {
    fn default() -> Self {
        return Self::SOLID;
    }
}

/// Pixel rectangle inside a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRect {
    pub pos: UVec2,
    pub size: UVec2,
}

impl TileRect {
    pub fn new(pos: UVec2, size: UVec2) -> Self {
        return Self { pos, size };
    }

    pub fn square(pos: UVec2, edge: u32) -> Self {
        return Self::new(pos, UVec2::splat(edge));
    }

    pub fn max(&self) -> UVec2 {
        return UVec2::new(
            self.pos.x.saturating_add(self.size.x),
            self.pos.y.saturating_add(self.size.y),
        );
    }

    pub fn contains(&self, other: &TileRect) -> bool {
        return other.pos.cmpge(self.pos).all() && other.max().cmple(self.max()).all();
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub image: Arc<Path>,
    pub rect: TileRect,
    pub masks: [Mask; 4],
    pub non_solid: bool,
    pub neighbors: Neighbors,
}

impl Tile {
    pub fn new(id: TileId, image: Arc<Path>, rect: TileRect) -> Self {
        return Self {
            id,
            image,
            rect,
            masks: Default::default(),
            non_solid: false,
            neighbors: Neighbors::default(),
        };
    }

    pub fn is_ignored(&self) -> bool {
        return self.id == IGNORED_TILE_ID;
    }

    /// Whether both tiles were cut from the same rectangle of the same image
    pub fn same_source(&self, other: &Tile) -> bool {
        return self.rect == other.rect && self.image == other.image;
    }
}

/// A rectangular block of tiles cut from one image at import time
#[derive(Debug, Clone)]
pub struct TileGroup {
    name: String,
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    image: Arc<Path>,
    region: TileRect,
}

impl TileGroup {
    pub fn new(
        name: String,
        width: u32,
        height: u32,
        tiles: Vec<Tile>,
        image: Arc<Path>,
        region: TileRect,
    ) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        return Self {
            name,
            width,
            height,
            tiles,
            image,
            region,
        };
    }

    pub fn name(&self) -> &str {
        return &self.name;
    }

    pub fn width(&self) -> u32 {
        return self.width;
    }

    pub fn height(&self) -> u32 {
        return self.height;
    }

    pub fn dimensions(&self) -> UVec2 {
        return UVec2::new(self.width, self.height);
    }

    pub fn tiles(&self) -> &[Tile] {
        return &self.tiles;
    }

    pub fn image(&self) -> &Arc<Path> {
        return &self.image;
    }

    pub fn region(&self) -> TileRect {
        return self.region;
    }

    /// Tile at a cell of the group grid
    pub fn tile_at(&self, cell: UVec2) -> Option<&Tile> {
        if cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        return self.tiles.get((cell.y * self.width + cell.x) as usize);
    }

    pub fn cell_of(&self, index: usize) -> UVec2 {
        let index = index as u32;
        return UVec2::new(index % self.width, index / self.width);
    }
}
