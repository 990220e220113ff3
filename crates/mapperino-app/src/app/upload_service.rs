//! Upload Service - stage every tile, upload it, record its map command
//!
//! Tiles are processed strictly in grid order, one at a time:
//! 1. Save the tile into the staging directory
//! 2. Upload it under its remote name
//! 3. Turn the returned URL into a `/mapcreate` command

use std::path::{Path, PathBuf};

use mapperino_domain::{MapCommand, Tile, TileNaming, TilePlacement};
use mapperino_infra::{UploadRequest, Uploader};
use mapperino_types::Result;
use serde::Serialize;
use tempfile::TempDir;
use tracing::{debug, info};

/// Progress report emitted after each finished upload
#[derive(Debug, Clone, Copy)]
pub struct UploadProgress<'a> {
    pub index: usize,
    /// Tiles uploaded so far, this one included
    pub completed: usize,
    pub total: usize,
    pub remote_name: &'a str,
}

pub type ProgressCallback<'a> = &'a dyn Fn(&UploadProgress<'_>);

/// Directory holding the encoded tiles
pub enum Staging {
    /// Removed when dropped
    Temporary(TempDir),
    /// User-supplied, left in place
    Kept(PathBuf),
}

impl Staging {
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("mapperino-").tempdir()?;
        Ok(Staging::Temporary(dir))
    }

    pub fn keep(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Staging::Kept(dir))
    }

    pub fn path(&self) -> &Path {
        match self {
            Staging::Temporary(dir) => dir.path(),
            Staging::Kept(dir) => dir,
        }
    }

    fn save(&self, tile: &Tile, naming: &TileNaming) -> Result<PathBuf> {
        let path = self.path().join(naming.staged_name(tile.index));
        tile.image.save(&path)?;
        Ok(path)
    }
}

/// Write every tile into the staging directory without uploading
pub fn stage_tiles(tiles: &[Tile], naming: &TileNaming, staging: &Staging) -> Result<Vec<PathBuf>> {
    tiles.iter().map(|tile| staging.save(tile, naming)).collect()
}

/// Upload all tiles and return one command per tile, in tile order
pub async fn upload_tiles<U: Uploader>(
    uploader: &U,
    tiles: &[Tile],
    naming: &TileNaming,
    staging: &Staging,
    progress: Option<ProgressCallback<'_>>,
) -> Result<Vec<MapCommand>> {
    let total = tiles.len();
    info!(
        service = %uploader.service(),
        tiles = total,
        staging = %staging.path().display(),
        "uploading tiles"
    );

    let mut commands = Vec::with_capacity(total);
    for (position, tile) in tiles.iter().enumerate() {
        let remote_name = naming.remote_name(tile.index);
        let path = staging.save(tile, naming)?;
        let url = uploader
            .upload(&UploadRequest {
                path: &path,
                remote_name: &remote_name,
                folder: naming.folder(),
            })
            .await?;
        debug!(index = tile.index, %url, "tile uploaded");
        commands.push(MapCommand::new(url));

        if let Some(cb) = progress {
            cb(&UploadProgress {
                index: tile.index,
                completed: position + 1,
                total,
                remote_name: &remote_name,
            });
        }
    }

    Ok(commands)
}

/// Dry-run description of one tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTile {
    #[serde(flatten)]
    pub placement: TilePlacement,
    pub remote_name: String,
}

pub fn plan_tiles(tiles: &[Tile], naming: &TileNaming) -> Vec<PlannedTile> {
    tiles
        .iter()
        .map(|tile| PlannedTile {
            placement: tile.placement(),
            remote_name: naming.remote_name(tile.index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn tiles(count: usize) -> Vec<Tile> {
        (0..count)
            .map(|index| Tile {
                index,
                x: index as u32 * 8,
                y: 0,
                image: DynamicImage::ImageRgb8(RgbImage::new(8, 8)),
            })
            .collect()
    }

    #[test]
    fn test_plan_tiles() {
        let naming = TileNaming::new("map.png".to_string());
        let plan = plan_tiles(&tiles(2), &naming);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].remote_name, "MapperinoTool_1_map.png");
        assert_eq!(plan[1].placement.x, 8);
        assert_eq!(plan[1].placement.size, 8);
    }

    #[test]
    fn test_planned_tile_json_is_flat() {
        let naming = TileNaming::new("map.png".to_string());
        let plan = plan_tiles(&tiles(1), &naming);
        let json = serde_json::to_value(&plan[0]).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["size"], 8);
        assert_eq!(json["remote_name"], "MapperinoTool_0_map.png");
    }

    #[test]
    fn test_temporary_staging_removed_on_drop() {
        let staging = Staging::temporary().unwrap();
        let path = staging.path().to_path_buf();
        assert!(path.is_dir());
        drop(staging);
        assert!(!path.exists());
    }

    #[test]
    fn test_kept_staging_survives() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("tiles");
        let naming = TileNaming::new("map.png".to_string());

        let staging = Staging::keep(dir.clone()).unwrap();
        let written = stage_tiles(&tiles(3), &naming, &staging).unwrap();
        drop(staging);

        assert_eq!(written.len(), 3);
        assert!(dir.join("0_map.png").is_file());
        assert!(dir.join("2_map.png").is_file());
    }
}
