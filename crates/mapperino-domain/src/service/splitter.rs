//! Image splitting on a square tile grid

use std::path::Path;

use image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel};
use mapperino_types::{Error, Result, SplitMode};
use tracing::debug;

use crate::model::{Tile, TileGrid};

/// Split an image file into `count` tiles along its width
pub fn split_image(path: &Path, count: u32) -> Result<Vec<Tile>> {
    split_file(path, SplitMode::Count(count))
}

/// Split an image file into tiles of `tile_size` pixels
pub fn split_image_by_tile_size(path: &Path, tile_size: u32) -> Result<Vec<Tile>> {
    split_file(path, SplitMode::TileSize(tile_size))
}

pub fn split_file(path: &Path, mode: SplitMode) -> Result<Vec<Tile>> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let img = image::open(path)?;
    split(&img, mode)
}

/// Crop `img` on the grid derived from `mode`.
///
/// Every tile is `tile_size x tile_size`; pixels past the right or bottom
/// edge of the source are left zeroed.
pub fn split(img: &DynamicImage, mode: SplitMode) -> Result<Vec<Tile>> {
    let (width, height) = img.dimensions();
    let grid = TileGrid::from_mode(width, height, mode)?;
    debug!(
        width,
        height,
        tile_size = grid.tile_size(),
        columns = grid.columns(),
        rows = grid.rows(),
        "computed tile grid"
    );

    let tiles = grid
        .origins()
        .enumerate()
        .map(|(index, (x, y))| Tile {
            index,
            x,
            y,
            image: crop_padded(img, x, y, grid.tile_size()),
        })
        .collect();
    Ok(tiles)
}

fn crop_padded(img: &DynamicImage, x: u32, y: u32, size: u32) -> DynamicImage {
    let w = size.min(img.width() - x);
    let h = size.min(img.height() - y);
    let region = img.crop_imm(x, y, w, h);
    if w == size && h == size {
        return region;
    }

    // Pad in the source's own pixel type so 16-bit and float samples survive
    match region {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(pad(&buf, size)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(pad(&buf, size)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(pad(&buf, size)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(pad(&buf, size)),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(pad(&buf, size)),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(pad(&buf, size)),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(pad(&buf, size)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(pad(&buf, size)),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(pad(&buf, size)),
        DynamicImage::ImageRgba32F(buf) => DynamicImage::ImageRgba32F(pad(&buf, size)),
        other => DynamicImage::ImageRgba32F(pad(&other.to_rgba32f(), size)),
    }
}

/// Copy `buf` into the top-left corner of a zeroed `size x size` buffer
fn pad<P: Pixel>(
    buf: &ImageBuffer<P, Vec<P::Subpixel>>,
    size: u32,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    let mut out = ImageBuffer::new(size, size);
    imageops::replace(&mut out, buf, 0, 0);
    out
}
