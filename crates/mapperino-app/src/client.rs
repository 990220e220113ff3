//! Upload client selection

use mapperino_infra::{CloudinaryClient, ImgurClient, S3Client, S3Settings, UploadClient};
use mapperino_types::{Result, Service};

use crate::config::Config;

/// Build the client for `service`, failing early on missing credentials
pub fn open_upload_client(config: &Config, service: Service) -> Result<UploadClient> {
    let client = match service {
        Service::Imgur => UploadClient::Imgur(ImgurClient::new(config.imgur_client_id()?.to_string())?),
        Service::S3 => UploadClient::S3(S3Client::new(S3Settings {
            bucket: config.s3_bucket.clone(),
            region: config.s3_region.clone(),
            endpoint: config.s3_endpoint.clone(),
            credentials: config.aws_credentials()?,
        })?),
        Service::Cloudinary => {
            UploadClient::Cloudinary(CloudinaryClient::new(config.cloudinary_credentials()?)?)
        }
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapperino_infra::Uploader;
    use mapperino_types::{ConfigError, Error};

    #[test]
    fn test_missing_credentials_rejected() {
        let config = Config::default();
        for service in [Service::Imgur, Service::S3, Service::Cloudinary] {
            match open_upload_client(&config, service) {
                Err(Error::Config(ConfigError::MissingCredential { service: name, .. })) => {
                    assert_eq!(name, service.name())
                }
                Err(other) => panic!("Expected missing credential, got: {:?}", other),
                Ok(_) => panic!("Expected missing credential for {}", service),
            }
        }
    }

    #[test]
    fn test_client_matches_service() {
        let mut config = Config::default();
        config.imgur_client_id = Some("id".to_string());
        config.aws_access_key_id = Some("AKID".to_string());
        config.aws_secret_access_key = Some("secret".to_string());
        config.cloudinary_url = Some("cloudinary://k:s@demo".to_string());

        for service in [Service::Imgur, Service::S3, Service::Cloudinary] {
            let client = open_upload_client(&config, service).unwrap();
            assert_eq!(client.service(), service);
        }
    }
}
