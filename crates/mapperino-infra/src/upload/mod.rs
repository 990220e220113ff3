//! Upload clients.
//!
//! Each backend turns a staged tile file into a public URL. All HTTP traffic
//! to the hosting services lives under this module; the pipeline only talks
//! to the [`Uploader`] trait.

mod cloudinary;
mod imgur;
mod s3;
pub mod sigv4;

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use mapperino_types::{Result, Service};

pub use cloudinary::{CloudinaryClient, CloudinaryCredentials};
pub use imgur::ImgurClient;
pub use s3::{AwsCredentials, S3Client, S3Settings};

const USER_AGENT: &str = concat!("mapperino/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// One staged tile ready for upload
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// Local file holding the encoded tile
    pub path: &'a Path,
    /// Object name on the remote service
    pub remote_name: &'a str,
    /// Grouping folder, used by services that support one
    pub folder: &'a str,
}

/// Something that can publish a tile and hand back its URL
pub trait Uploader {
    fn service(&self) -> Service;

    fn upload(&self, request: &UploadRequest<'_>) -> impl Future<Output = Result<String>>;
}

/// The client for whichever service was selected on the command line
pub enum UploadClient {
    Imgur(ImgurClient),
    S3(S3Client),
    Cloudinary(CloudinaryClient),
}

impl Uploader for UploadClient {
    fn service(&self) -> Service {
        match self {
            UploadClient::Imgur(_) => Service::Imgur,
            UploadClient::S3(_) => Service::S3,
            UploadClient::Cloudinary(_) => Service::Cloudinary,
        }
    }

    async fn upload(&self, request: &UploadRequest<'_>) -> Result<String> {
        match self {
            UploadClient::Imgur(client) => client.upload(request).await,
            UploadClient::S3(client) => client.upload(request).await,
            UploadClient::Cloudinary(client) => client.upload(request).await,
        }
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// MIME type guessed from the staged file extension
pub(crate) fn content_type(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tile".to_string())
}
