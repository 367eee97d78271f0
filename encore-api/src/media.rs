//! Media host upload client
//!
//! Thin pass-through to Cloudinary's unsigned upload endpoint. The service
//! never stores file bytes itself: the handler streams the multipart body
//! into memory, forwards it here, and returns the public URL plus whatever
//! metadata the host reports (dimensions, duration, format).
//!
//! Uploads are single-attempt; timeout and retry behavior is whatever the
//! HTTP client provides.

use encore_common::config::MediaHostConfig;
use encore_common::{Error, Result};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Upload target kind, selects the host-side endpoint and folder
#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    AlbumImage,
    Video,
    HeroVideo,
}

impl UploadKind {
    /// Host resource type segment
    fn resource_type(self) -> &'static str {
        match self {
            UploadKind::AlbumImage => "image",
            UploadKind::Video | UploadKind::HeroVideo => "video",
        }
    }

    /// Host-side folder
    fn folder(self) -> &'static str {
        match self {
            UploadKind::AlbumImage => "images/albums",
            UploadKind::Video => "videos",
            UploadKind::HeroVideo => "videos/hero",
        }
    }
}

/// Host response, passed through to the client
#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    pub url: String,
    pub public_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Raw upload response from the host
#[derive(Debug, Deserialize)]
struct HostUploadResponse {
    secure_url: String,
    public_id: String,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<f64>,
    format: Option<String>,
}

/// Media host client
#[derive(Clone)]
pub struct MediaHost {
    client: reqwest::Client,
    config: MediaHostConfig,
}

impl MediaHost {
    /// Create a client from configuration
    pub fn new(config: MediaHostConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload one file, returning the public URL and host metadata
    pub async fn upload(
        &self,
        kind: UploadKind,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<UploadResult> {
        let endpoint = format!(
            "https://api.cloudinary.com/v1_1/{}/{}/upload",
            self.config.cloud_name,
            kind.resource_type()
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("upload_preset", self.config.upload_preset.clone())
            .text("folder", kind.folder());

        let response = self
            .client
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Internal(format!("upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Internal(format!(
                "media host returned {}: {}",
                status, detail
            )));
        }

        let parsed: HostUploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("invalid upload response: {}", e)))?;

        Ok(UploadResult {
            url: parsed.secure_url,
            public_id: parsed.public_id,
            width: parsed.width,
            height: parsed.height,
            duration: parsed.duration,
            format: parsed.format,
        })
    }
}

/// Extensions accepted for upload (images and videos)
const ALLOWED_EXTENSIONS: [&str; 9] = [
    "jpeg", "jpg", "png", "gif", "webp", "mp4", "mov", "avi", "webm",
];

/// Check a file name against the accepted image/video extensions
pub fn is_allowed_file_name(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
