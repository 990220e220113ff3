//! File and object names derived from the source image

use std::path::Path;

use mapperino_types::{Error, Result};

const REMOTE_PREFIX: &str = "MapperinoTool";

/// Names used for staged tile files and uploaded objects.
///
/// The base name is the source file name with spaces replaced by `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileNaming {
    image_name: String,
    folder: String,
}

impl TileNaming {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().replace(' ', "_"))
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::FileNotFound(path.display().to_string()))?;
        Ok(Self::new(file_name))
    }

    pub fn new(image_name: String) -> Self {
        let folder = Path::new(&image_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| image_name.clone());
        Self { image_name, folder }
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    /// Folder the tiles are grouped under on services that support it
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn staged_name(&self, index: usize) -> String {
        format!("{}_{}", index, self.image_name)
    }

    pub fn remote_name(&self, index: usize) -> String {
        format!("{}_{}_{}", REMOTE_PREFIX, index, self.image_name)
    }
}
