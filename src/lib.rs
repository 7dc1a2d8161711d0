//! Building autotile adjacency rules out of hand-picked tiles.
//!
//! Tiles are imported into [`tile::TileGroup`]s, picked into a
//! [`catalog::TileCatalog`], given edge masks, and then paired up by the
//! [`pairing::PairingEngine`] until every neighbor relation is decided.
//! [`session::Session`] ties the stages together for a front end.

pub mod adjacency;
pub mod catalog;
pub mod config;
pub mod direction;
pub mod error;
pub mod import;
pub mod masks;
pub mod pairing;
pub mod session;
pub mod tile;

pub use adjacency::{AdjacencyGraph, Decision};
pub use catalog::TileCatalog;
pub use config::Config;
pub use direction::CardinalDirs;
pub use pairing::{Pairing, PairingEngine, Step};
pub use session::{Command, Session, Stage};
pub use tile::{Mask, Tile, TileGroup, TileId, TileIndex};
