//! Amazon S3 (and S3-compatible) object uploads

use std::collections::BTreeMap;

use chrono::Utc;
use mapperino_types::{ConfigError, Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use tracing::debug;

use super::sigv4::{self, CanonicalRequest, Signer};
use super::{content_type, http_client, UploadRequest};

const PUBLIC_READ: &str = "public-read";

#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    /// Overrides `https://s3.<region>.amazonaws.com`
    pub endpoint: Option<String>,
    pub credentials: AwsCredentials,
}

pub struct S3Client {
    client: reqwest::Client,
    settings: S3Settings,
    /// Endpoint root; its path (if any) prefixes every object path
    base: Url,
}

impl S3Client {
    pub fn new(settings: S3Settings) -> Result<Self> {
        let raw = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", settings.region));
        let base = Url::parse(raw.trim()).map_err(|e| {
            ConfigError::ParseError(format!("invalid S3 endpoint {}: {}", raw, e))
        })?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(ConfigError::ParseError(format!("S3 endpoint {} has no host", raw)).into());
        }

        Ok(Self {
            client: http_client()?,
            settings,
            base,
        })
    }

    /// Path-style object URL; its path is also the canonical URI
    pub fn object_url(&self, key: &str) -> Url {
        let path = format!(
            "{}/{}/{}",
            self.base.path().trim_end_matches('/'),
            sigv4::uri_encode(&self.settings.bucket, false),
            sigv4::uri_encode(key, true)
        );
        let mut url = self.base.clone();
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// Headers sent with a PUT to `url` and covered by its signature
    fn signed_headers(
        &self,
        url: &Url,
        mime: &str,
        payload_hash: &str,
        amz_date: String,
    ) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), mime.to_string());
        headers.insert("host".to_string(), host_header(url));
        headers.insert("x-amz-acl".to_string(), PUBLIC_READ.to_string());
        headers.insert("x-amz-content-sha256".to_string(), payload_hash.to_string());
        headers.insert("x-amz-date".to_string(), amz_date);
        if let Some(ref token) = self.settings.credentials.session_token {
            headers.insert("x-amz-security-token".to_string(), token.clone());
        }
        headers
    }

    pub async fn upload(&self, request: &UploadRequest<'_>) -> Result<String> {
        let data = tokio::fs::read(request.path).await?;
        let payload_hash = sigv4::sha256_hex(&data);
        let now = Utc::now();
        let url = self.object_url(request.remote_name);
        let headers = self.signed_headers(
            &url,
            content_type(request.path),
            &payload_hash,
            sigv4::amz_date(now),
        );

        let signer = Signer {
            access_key_id: &self.settings.credentials.access_key_id,
            secret_access_key: &self.settings.credentials.secret_access_key,
            region: &self.settings.region,
            service: "s3",
        };
        let authorization = signer.authorization(
            now,
            &CanonicalRequest {
                method: "PUT",
                uri: url.path(),
                query: "",
                headers: &headers,
                payload_hash: &payload_hash,
            },
        )?;

        debug!(%url, bytes = data.len(), "uploading tile to s3");

        // reqwest sets Host itself from the URL
        let mut builder = self.client.put(url.clone()).header(AUTHORIZATION, authorization);
        for (name, value) in headers.iter().filter(|(name, _)| name.as_str() != "host") {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.body(data).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upload {
                service: "s3",
                message: format!("{} {}", status, body.trim()),
            });
        }

        Ok(url.into())
    }
}

/// `Host` value as reqwest will send it: default ports are omitted
fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(endpoint: Option<&str>) -> S3Settings {
        S3Settings {
            bucket: "mapperino".to_string(),
            region: "eu-central-1".to_string(),
            endpoint: endpoint.map(str::to_string),
            credentials: AwsCredentials {
                access_key_id: "AKID".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: Some("token".to_string()),
            },
        }
    }

    #[test]
    fn test_default_endpoint_url() {
        let client = S3Client::new(settings(None)).unwrap();
        assert_eq!(
            client.object_url("MapperinoTool_0_castle.png").as_str(),
            "https://s3.eu-central-1.amazonaws.com/mapperino/MapperinoTool_0_castle.png"
        );
    }

    #[test]
    fn test_custom_endpoint() {
        let client = S3Client::new(settings(Some("http://localhost:9000/"))).unwrap();
        let url = client.object_url("a b.png");
        assert_eq!(url.as_str(), "http://localhost:9000/mapperino/a%20b.png");
        assert_eq!(host_header(&url), "localhost:9000");
    }

    #[test]
    fn test_signed_host_and_uri_match_sent_request() {
        let cases = [
            (None, "s3.eu-central-1.amazonaws.com", "/mapperino/a%20b.png"),
            (Some("https://gw.example.com/storage"), "gw.example.com", "/storage/mapperino/a%20b.png"),
            (Some("https://gw.example.com/storage/"), "gw.example.com", "/storage/mapperino/a%20b.png"),
            (Some("https://s3.example.com:443"), "s3.example.com", "/mapperino/a%20b.png"),
            (Some("http://127.0.0.1:9000"), "127.0.0.1:9000", "/mapperino/a%20b.png"),
        ];
        for (endpoint, host, path) in cases {
            let client = S3Client::new(settings(endpoint)).unwrap();
            let url = client.object_url("a b.png");
            let headers = client.signed_headers(&url, "image/png", "hash", "20240101T000000Z".to_string());

            let sent = client.client.put(url.clone()).build().unwrap();
            let wire_host = match sent.url().port() {
                Some(port) => format!("{}:{}", sent.url().host_str().unwrap(), port),
                None => sent.url().host_str().unwrap().to_string(),
            };
            assert_eq!(headers["host"], wire_host, "endpoint {:?}", endpoint);
            assert_eq!(headers["host"], host, "endpoint {:?}", endpoint);
            assert_eq!(sent.url().path(), url.path());
            assert_eq!(url.path(), path, "endpoint {:?}", endpoint);
        }
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(S3Client::new(settings(Some("not a url"))).is_err());
        assert!(S3Client::new(settings(Some("mailto:ops@example.com"))).is_err());
    }

    #[test]
    fn test_signed_headers_include_acl_and_token() {
        let client = S3Client::new(settings(None)).unwrap();
        let url = client.object_url("key.png");
        let headers = client.signed_headers(&url, "image/png", "hash", "20240101T000000Z".to_string());
        assert_eq!(headers.get("x-amz-acl").map(String::as_str), Some("public-read"));
        assert_eq!(headers.get("x-amz-security-token").map(String::as_str), Some("token"));
        assert_eq!(
            headers.get("host").map(String::as_str),
            Some("s3.eu-central-1.amazonaws.com")
        );
    }
}
