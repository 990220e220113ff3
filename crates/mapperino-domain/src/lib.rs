//! Domain models and services: tile grid, splitting, naming and map commands

pub mod model;
pub mod service;

pub use model::grid::tile_size_for;
pub use model::{render_commands, MapCommand, Tile, TileGrid, TileNaming, TilePlacement};
pub use service::{split, split_file, split_image, split_image_by_tile_size};
