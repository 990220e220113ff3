//! Imgur anonymous image uploads

use mapperino_types::{Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use super::{content_type, file_name, http_client, UploadRequest};

const IMGUR_UPLOAD_URL: &str = "https://api.imgur.com/3/image";

#[derive(Debug, Deserialize)]
struct ImgurResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    status: u16,
    data: ImgurData,
}

#[derive(Debug, Deserialize)]
struct ImgurData {
    link: Option<String>,
    // Either a plain string or an object with a `message`
    error: Option<serde_json::Value>,
}

pub struct ImgurClient {
    client: reqwest::Client,
    client_id: String,
}

impl ImgurClient {
    pub fn new(client_id: String) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            client_id,
        })
    }

    pub async fn upload(&self, request: &UploadRequest<'_>) -> Result<String> {
        let data = tokio::fs::read(request.path).await?;
        debug!(title = request.remote_name, bytes = data.len(), "uploading tile to imgur");

        let form = Form::new()
            .text("type", "file")
            .text("title", request.remote_name.to_string())
            .part(
                "image",
                Part::bytes(data)
                    .file_name(file_name(request.path))
                    .mime_str(content_type(request.path))?,
            );

        let body = self
            .client
            .post(IMGUR_UPLOAD_URL)
            .header(AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .multipart(form)
            .send()
            .await?
            .text()
            .await?;

        parse_link(&body)
    }
}

/// Extract the image link from an upload response body
fn parse_link(body: &str) -> Result<String> {
    let resp: ImgurResponse = serde_json::from_str(body)?;
    match resp.data.link {
        Some(link) if resp.success => Ok(link),
        _ => {
            let reason = match resp.data.error {
                Some(serde_json::Value::String(msg)) => msg,
                Some(other) => other
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
                None => "no link in response".to_string(),
            };
            Err(Error::Upload {
                service: "imgur",
                message: format!("status {}: {}", resp.status, reason),
            })
        }
    }
}
