//! Domain services

pub mod splitter;

pub use splitter::{split, split_file, split_image, split_image_by_tile_size};
