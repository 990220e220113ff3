//! AWS Signature Version 4 request signing

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use mapperino_types::{Error, Result};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Hex SHA-256 of an empty body
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Request parts covered by the signature.
///
/// Header names must already be lowercase; the map keeps them sorted.
#[derive(Debug)]
pub struct CanonicalRequest<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub query: &'a str,
    pub headers: &'a BTreeMap<String, String>,
    pub payload_hash: &'a str,
}

impl CanonicalRequest<'_> {
    pub fn signed_headers(&self) -> String {
        self.headers.keys().map(String::as_str).collect::<Vec<_>>().join(";")
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n{}\n{}\n", self.method, self.uri, self.query);
        for (name, value) in self.headers {
            out.push_str(name);
            out.push(':');
            out.push_str(value.trim());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.signed_headers());
        out.push('\n');
        out.push_str(self.payload_hash);
        out
    }
}

pub struct Signer<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
    pub service: &'a str,
}

impl Signer<'_> {
    /// Value for the `Authorization` header
    pub fn authorization(&self, now: DateTime<Utc>, request: &CanonicalRequest<'_>) -> Result<String> {
        let date = now.format("%Y%m%d").to_string();
        let scope = format!("{}/{}/{}/aws4_request", date, self.region, self.service);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            ALGORITHM,
            amz_date(now),
            scope,
            sha256_hex(request.render().as_bytes())
        );

        let key = self.signing_key(&date)?;
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        Ok(format!(
            "{} Credential={}/{},SignedHeaders={},Signature={}",
            ALGORITHM,
            self.access_key_id,
            scope,
            request.signed_headers(),
            signature
        ))
    }

    fn signing_key(&self, date: &str) -> Result<Vec<u8>> {
        let secret = format!("AWS4{}", self.secret_access_key);
        let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, self.service.as_bytes())?;
        hmac_sha256(&k_service, b"aws4_request")
    }
}

/// `x-amz-date` timestamp format
pub fn amz_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Percent-encode a path segment the way S3 expects.
///
/// Only `A-Z a-z 0-9 - . _ ~` pass through; `/` is kept when `keep_slash`.
pub fn uri_encode(input: &str, keep_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            b'/' if keep_slash => out.push('/'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| Error::Upload {
        service: "s3",
        message: format!("Invalid signing key: {}", e),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
