//! Domain model types

pub mod command;
pub mod grid;
pub mod naming;
pub mod tile;

pub use command::{render_commands, MapCommand};
pub use grid::TileGrid;
pub use naming::TileNaming;
pub use tile::{Tile, TilePlacement};
