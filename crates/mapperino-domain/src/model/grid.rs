//! Tile grid geometry

use mapperino_types::{Error, Result, SplitMode};

/// Derive the tile edge length for a split mode and a source width.
///
/// `Count(n)` divides the width with integer division, so the last column
/// may be narrower than the others once cropped against the source.
pub fn tile_size_for(mode: SplitMode, width: u32) -> Result<u32> {
    match mode {
        SplitMode::Count(0) => Err(Error::InvalidSplit(
            "tile count must be at least 1".to_string(),
        )),
        SplitMode::Count(count) => match width / count {
            0 => Err(Error::InvalidSplit(format!(
                "cannot split a {} px wide image into {} tiles",
                width, count
            ))),
            size => Ok(size),
        },
        SplitMode::TileSize(0) => Err(Error::InvalidSplit(
            "tile size must be at least 1 px".to_string(),
        )),
        SplitMode::TileSize(size) => Ok(size),
    }
}

/// Square tile grid laid over a `width x height` image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: u32,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, tile_size: u32) -> Result<Self> {
        if tile_size == 0 {
            return Err(Error::InvalidSplit(
                "tile size must be at least 1 px".to_string(),
            ));
        }
        Ok(Self {
            width,
            height,
            tile_size,
        })
    }

    pub fn from_mode(width: u32, height: u32, mode: SplitMode) -> Result<Self> {
        Self::new(width, height, tile_size_for(mode, width)?)
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.tile_size)
    }

    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.tile_size)
    }

    pub fn len(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-left corners of every tile.
    ///
    /// X is the outer axis: a whole column is walked top to bottom before
    /// moving right.
    pub fn origins(&self) -> impl Iterator<Item = (u32, u32)> {
        let height = self.height;
        let step = self.tile_size as usize;
        (0..self.width)
            .step_by(step)
            .flat_map(move |x| (0..height).step_by(step).map(move |y| (x, y)))
    }
}
