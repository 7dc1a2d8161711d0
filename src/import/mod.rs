//! Turning images and tileset descriptions into [`crate::tile::TileGroup`]s.
//!
//! Importers only read image headers; decoding pixels is left to whoever
//! draws the tiles.

pub mod grid;
pub mod sexp;
pub mod tileset;

use glam::UVec2;
use std::path::Path;

use crate::error::ImportError;

pub use grid::{slice_grid, slice_image};
pub use tileset::{load_tileset, parse_tileset};

/// Size of an image on disk in pixels
pub fn image_dimensions(path: &Path) -> Result<UVec2, ImportError> {
    let (width, height) = image::image_dimensions(path).map_err(|source| ImportError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    return Ok(UVec2::new(width, height));
}
