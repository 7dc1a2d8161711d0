//! Reader for SuperTux `.strf` tileset descriptions.
//!
//! ```text
//! (supertux-tiles
//!   (tiles
//!     (width 2) (height 1)
//!     (ids 10 11)
//!     (offset 100)
//!     (images "tiles/ground.png"))
//!   (tiles
//!     (width 1) (height 1)
//!     (ids 7)
//!     (image (region "tiles/misc.png" 64 0 32 32))))
//! ```
//!
//! Every `tiles` entry becomes one [`TileGroup`]; an id of 0 marks a cell
//! that holds no tile.

use glam::UVec2;
use std::{fs, path::Path, sync::Arc};

use super::sexp::{self, Value};
use crate::{
    error::ImportError,
    tile::{Tile, TileGroup, TileId, TileRect, IGNORED_TILE_ID},
};

const ROOT_TAG: &str = "supertux-tiles";

/// Reads a tileset description and the headers of the images it names.
/// Relative image paths resolve against the description's directory.
pub fn load_tileset(path: &Path, tile_size: u32) -> Result<Vec<TileGroup>, ImportError> {
    let src = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let groups = parse_tileset(&src, base_dir, tile_size, super::image_dimensions)?;
    log::info!("imported {} tilegroups from {}", groups.len(), path.display());
    return Ok(groups);
}

/// Builds tilegroups from description text. `dimensions_of` reports the
/// pixel size of a referenced image.
pub fn parse_tileset<F>(
    src: &str,
    base_dir: &Path,
    tile_size: u32,
    mut dimensions_of: F,
) -> Result<Vec<TileGroup>, ImportError>
where
    F: FnMut(&Path) -> Result<UVec2, ImportError>,
{
    if tile_size == 0 {
        return Err(invalid("tile_size", "must be positive"));
    }
    let root = sexp::parse(src)?;
    if root.head() != Some(ROOT_TAG) {
        return Err(ImportError::NotATileset);
    }

    let mut groups = Vec::new();
    for entry in root.tail() {
        if entry.head() != Some("tiles") {
            continue;
        }
        if let Some(group) = parse_tiles(entry, base_dir, tile_size, &mut dimensions_of)? {
            groups.push(group);
        }
    }
    return Ok(groups);
}

fn parse_tiles<F>(
    entry: &Value,
    base_dir: &Path,
    tile_size: u32,
    dimensions_of: &mut F,
) -> Result<Option<TileGroup>, ImportError>
where
    F: FnMut(&Path) -> Result<UVec2, ImportError>,
{
    let ids = match entry.find("ids") {
        Some(ids) => ids
            .tail()
            .iter()
            .map(|id| {
                id.as_int()
                    .and_then(|id| u32::try_from(id).ok())
                    .ok_or_else(|| invalid("ids", format!("{id:?} is not a tile id")))
            })
            .collect::<Result<Vec<TileId>, _>>()?,
        None => Vec::new(),
    };
    let width = uint_field(entry, "width")?.unwrap_or(0);
    let height = uint_field(entry, "height")?.unwrap_or(0);
    let offset = int_field(entry, "offset")?.unwrap_or(0);

    let deprecated = match entry.find("deprecated") {
        Some(field) => field
            .tail()
            .first()
            .and_then(Value::as_bool)
            .ok_or_else(|| invalid("deprecated", "expected #t or #f"))?,
        None => false,
    };
    if deprecated {
        log::debug!("skipping deprecated tiles entry");
        return Ok(None);
    }

    if ids.is_empty() {
        return Err(ImportError::MissingIds);
    }
    if width == 0 {
        return Err(ImportError::ZeroWidth);
    }
    if height == 0 {
        return Err(ImportError::ZeroHeight);
    }
    let expected = width as usize * height as usize;
    if ids.len() != expected {
        return Err(ImportError::IdCountMismatch {
            ids: ids.len(),
            width,
            height,
            expected,
        });
    }

    let spec = entry
        .find("image")
        .or_else(|| entry.find("images"))
        .ok_or(ImportError::MissingImage)?;
    let (file, region) = parse_image_spec(spec)?;
    let image_path = base_dir.join(&file);
    let image_dims = dimensions_of(&image_path)?;

    // region should not exceed the image
    let region = region.unwrap_or(TileRect::new(UVec2::ZERO, image_dims));
    let room = UVec2::new(
        image_dims.x.saturating_sub(region.pos.x),
        image_dims.y.saturating_sub(region.pos.y),
    );
    let clamped = TileRect::new(region.pos, region.size.min(room));

    let image: Arc<Path> = Arc::from(image_path.as_path());
    let mut tiles = Vec::with_capacity(ids.len());
    for (i, &raw_id) in ids.iter().enumerate() {
        let cell = UVec2::new((i % width as usize) as u32, (i / width as usize) as u32);
        let rect = cell_rect(region.pos, cell, tile_size).ok_or_else(|| {
            ImportError::MalformedRegion(format!("tile {i} of {file} lies beyond the pixel range"))
        })?;
        let mut id = apply_offset(raw_id, offset)?;
        if id != IGNORED_TILE_ID && !clamped.contains(&rect) {
            log::warn!(
                "tile {id} at {:?} lies outside of {}, ignoring it",
                rect.pos,
                image_path.display()
            );
            id = IGNORED_TILE_ID;
        }
        tiles.push(Tile::new(id, image.clone(), rect));
    }

    let name = Path::new(&file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(file);
    return Ok(Some(TileGroup::new(name, width, height, tiles, image, clamped)));
}

/// `(images "foo.png" ...)` or `(images (region "foo.png" X Y W H))`.
/// The first usable item wins.
fn parse_image_spec(spec: &Value) -> Result<(String, Option<TileRect>), ImportError> {
    for item in spec.tail() {
        if let Some(file) = item.as_str() {
            return Ok((file.to_owned(), None));
        }
        match item.head() {
            Some("region") => return parse_region(item).map(|(file, rect)| (file, Some(rect))),
            Some("surface") => log::warn!("surfaces are not supported"),
            _ => log::warn!("expected string or list in images tag, got {item:?}"),
        }
    }
    return Err(ImportError::MissingImage);
}

fn parse_region(item: &Value) -> Result<(String, TileRect), ImportError> {
    let malformed = || ImportError::MalformedRegion(format!("{item:?}"));
    let args = item.tail();
    if args.len() != 5 {
        return Err(malformed());
    }
    let file = args[0].as_str().ok_or_else(malformed)?;
    let mut nums = [0u32; 4];
    for (num, arg) in nums.iter_mut().zip(&args[1..]) {
        *num = arg
            .as_int()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(malformed)?;
    }
    let [x, y, w, h] = nums;
    if x.checked_add(w).is_none() || y.checked_add(h).is_none() {
        return Err(malformed());
    }
    return Ok((file.to_owned(), TileRect::new(UVec2::new(x, y), UVec2::new(w, h))));
}

/// Pixel rect of `cell` in a grid starting at `origin`, if it is addressable
fn cell_rect(origin: UVec2, cell: UVec2, tile_size: u32) -> Option<TileRect> {
    let axis = |origin: u32, cell: u32| {
        let pos = cell.checked_mul(tile_size)?.checked_add(origin)?;
        pos.checked_add(tile_size)?;
        return Some(pos);
    };
    let pos = UVec2::new(axis(origin.x, cell.x)?, axis(origin.y, cell.y)?);
    return Some(TileRect::square(pos, tile_size));
}

fn apply_offset(id: TileId, offset: i64) -> Result<TileId, ImportError> {
    if id == IGNORED_TILE_ID {
        return Ok(id);
    }
    return TileId::try_from(i64::from(id) + offset)
        .map_err(|_| invalid("offset", format!("moves id {id} out of range")));
}

fn int_field(entry: &Value, key: &str) -> Result<Option<i64>, ImportError> {
    let Some(field) = entry.find(key) else {
        return Ok(None);
    };
    return field
        .tail()
        .first()
        .and_then(Value::as_int)
        .map(Some)
        .ok_or_else(|| invalid(key, "expected an integer"));
}

fn uint_field(entry: &Value, key: &str) -> Result<Option<u32>, ImportError> {
    return int_field(entry, key)?
        .map(|n| u32::try_from(n).map_err(|_| invalid(key, format!("{n} is out of range"))))
        .transpose();
}

fn invalid(key: &str, message: impl Into<String>) -> ImportError {
    return ImportError::InvalidField {
        key: key.to_owned(),
        message: message.into(),
    };
}
