//! Core types shared across the mapperino crates

mod error;

pub use error::*;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Image hosting service that receives the tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Imgur,
    S3,
    Cloudinary,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Imgur => "imgur",
            Service::S3 => "s3",
            Service::Cloudinary => "cloudinary",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// How the tile edge length is derived from the source image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum SplitMode {
    /// Number of tiles along the width; edge = width / count
    Count(u32),
    /// Explicit tile edge in pixels
    TileSize(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names_match_cli_values() {
        for service in Service::value_variants() {
            let value = service.to_possible_value().unwrap();
            assert_eq!(value.get_name(), service.name());
        }
    }

    #[test]
    fn test_service_serde_lowercase() {
        let json = serde_json::to_string(&Service::Cloudinary).unwrap();
        assert_eq!(json, "\"cloudinary\"");
    }
}
