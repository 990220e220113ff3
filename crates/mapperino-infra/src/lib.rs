//! Infrastructure layer - HTTP clients for the supported image hosts

pub mod upload;

pub use upload::{
    AwsCredentials, CloudinaryClient, CloudinaryCredentials, ImgurClient, S3Client, S3Settings,
    UploadClient, UploadRequest, Uploader,
};
