use glam::UVec2;
use std::{path::Path, sync::Arc};

use crate::{
    error::ImportError,
    tile::{Tile, TileGroup, TileId, TileRect},
};

/// Cuts a whole image into `tile_size` squares, numbered `1..=n` row by row
pub fn slice_image(path: &Path, tile_size: u32) -> Result<TileGroup, ImportError> {
    let dims = super::image_dimensions(path)?;
    return slice_grid(Arc::from(path), dims, tile_size);
}

pub fn slice_grid(image: Arc<Path>, image_dims: UVec2, tile_size: u32) -> Result<TileGroup, ImportError> {
    if tile_size == 0 {
        return Err(ImportError::InvalidField {
            key: "tile_size".into(),
            message: "must be positive".into(),
        });
    }
    if image_dims.x == 0 {
        return Err(ImportError::ZeroWidth);
    }
    if image_dims.y == 0 {
        return Err(ImportError::ZeroHeight);
    }
    if image_dims.x % tile_size != 0 || image_dims.y % tile_size != 0 {
        return Err(ImportError::DimensionsNotMultiple {
            width: image_dims.x,
            height: image_dims.y,
            tile_size,
        });
    }

    let tiles: Vec<Tile> = tile_locs(image_dims, tile_size)
        .into_iter()
        .enumerate()
        .map(|(i, loc)| {
            let id = (i + 1) as TileId;
            return Tile::new(id, image.clone(), TileRect::square(loc, tile_size));
        })
        .collect();

    let cells = image_dims / tile_size;
    let name = image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::info!("sliced {name} into {} tiles ({}x{})", tiles.len(), cells.x, cells.y);
    return Ok(TileGroup::new(
        name,
        cells.x,
        cells.y,
        tiles,
        image,
        TileRect::new(UVec2::ZERO, image_dims),
    ));
}

/// Top-left corners of every whole tile in row-major order
pub fn tile_locs<U: Into<UVec2>>(image_dims: U, tile_size: u32) -> Vec<UVec2> {
    let image_dims: UVec2 = image_dims.into();
    // trim edges
    let max = image_dims - (image_dims % tile_size);

    let num_tiles = (max.x / tile_size) * (max.y / tile_size);
    let mut locs = Vec::with_capacity(num_tiles as usize);

    for y in (0..max.y).step_by(tile_size as usize) {
        for x in (0..max.x).step_by(tile_size as usize) {
            locs.push(UVec2 { x, y });
        }
    }

    return locs;
}

#[cfg(test)]
mod test {
    use super::*;

    fn sheet() -> Arc<Path> {
        return Arc::from(Path::new("sheet.png"));
    }

    #[test]
    fn locs_are_row_major() {
        let locs = tile_locs(UVec2::new(64, 64), 32);
        assert_eq!(
            locs,
            vec![
                UVec2::new(0, 0),
                UVec2::new(32, 0),
                UVec2::new(0, 32),
                UVec2::new(32, 32)
            ]
        );
    }

    #[test]
    fn slices_exact_multiple() {
        let group = slice_grid(sheet(), UVec2::new(96, 64), 32).unwrap();
        assert_eq!(group.dimensions(), UVec2::new(3, 2));
        assert_eq!(group.tiles().len(), 6);
        let ids: Vec<TileId> = group.tiles().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(group.tiles()[4].rect, TileRect::square(UVec2::new(32, 32), 32));
        assert_eq!(group.name(), "sheet.png");
    }

    #[test]
    fn rejects_non_multiple() {
        match slice_grid(sheet(), UVec2::new(100, 64), 32) {
            Err(ImportError::DimensionsNotMultiple { width, height, tile_size }) => {
                assert_eq!((width, height, tile_size), (100, 64, 32));
            }
            other => panic!("expected dimension error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_image() {
        assert!(matches!(slice_grid(sheet(), UVec2::new(0, 32), 32), Err(ImportError::ZeroWidth)));
        assert!(matches!(slice_grid(sheet(), UVec2::new(32, 0), 32), Err(ImportError::ZeroHeight)));
    }

    #[test]
    fn slices_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");
        image::RgbaImage::new(64, 32).save(&path).unwrap();
        let group = slice_image(&path, 32).unwrap();
        assert_eq!(group.tiles().len(), 2);
        assert_eq!(&**group.image(), path.as_path());
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = slice_image(&dir.path().join("nope.png"), 32);
        assert!(matches!(result, Err(ImportError::Image { .. })));
    }
}
