//! Application use cases

pub mod upload_service;

pub use upload_service::{
    plan_tiles, stage_tiles, upload_tiles, PlannedTile, ProgressCallback, Staging, UploadProgress,
};
