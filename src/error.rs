use std::path::PathBuf;
use thiserror::Error;

use crate::tile::TileIndex;

/// Reasons an image or tileset description could not be imported.
/// An import that fails leaves the session as it was.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("file is not a supertux tiles file")]
    NotATileset,
    #[error("no ids specified")]
    MissingIds,
    #[error("width is zero")]
    ZeroWidth,
    #[error("height is zero")]
    ZeroHeight,
    #[error("number of ids ({ids}) and dimensions of image ({width}x{height} = {expected}) differ")]
    IdCountMismatch {
        ids: usize,
        width: u32,
        height: u32,
        expected: usize,
    },
    #[error("malformed region spec: {0}")]
    MalformedRegion(String),
    #[error("invalid value for `{key}`: {message}")]
    InvalidField { key: String, message: String },
    #[error("no usable image specified")]
    MissingImage,
    #[error("image size {width}x{height} is not a multiple of the tile size {tile_size}")]
    DimensionsNotMultiple {
        width: u32,
        height: u32,
        tile_size: u32,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("tiles cannot be added or removed once pairing has started")]
    Locked,
    #[error("tile {index} out of range (have {len})")]
    OutOfRange { index: TileIndex, len: usize },
}

/// Refusals reported back to the user; the session state is unchanged
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no tilegroup selected")]
    NoTilegroupSelected,
    #[error("some tiles must exist for autotiles to be created")]
    NoTiles,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
