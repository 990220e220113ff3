//! Cropped tiles

use image::DynamicImage;
use serde::Serialize;

/// One square crop of the source image
#[derive(Debug, Clone)]
pub struct Tile {
    /// Position in grid iteration order
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub image: DynamicImage,
}

impl Tile {
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn placement(&self) -> TilePlacement {
        TilePlacement {
            index: self.index,
            x: self.x,
            y: self.y,
            size: self.size(),
        }
    }
}

/// Where a tile sits in the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TilePlacement {
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub size: u32,
}
