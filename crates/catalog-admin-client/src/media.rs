//! REST client for images and logos attached to catalog records.
//!
//! Every call returns the backend's `{success, ...}` envelope as JSON.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_admin_core::TokenStore;

use crate::error::{ClientError, Result};
use crate::http::{json_headers, read_envelope};

const UPLOAD_FAILED: &str = "Ошибка загрузки изображений";
const LIST_FAILED: &str = "Ошибка получения изображений";
const DELETE_FAILED: &str = "Ошибка удаления изображения";
const REORDER_FAILED: &str = "Ошибка обновления порядка";
const TOGGLE_FAILED: &str = "Ошибка переключения статуса";
const LOGO_UPLOAD_FAILED: &str = "Ошибка загрузки логотипа";
const LOGO_DELETE_FAILED: &str = "Ошибка удаления логотипа";

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the multipart part.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
    /// MIME type of the contents.
    pub mime_type: String,
}

impl UploadFile {
    /// Create an upload from in-memory contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self {
            mime_type: mime_for(path).to_string(),
            file_name,
            bytes,
        })
    }

    fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// New position of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOrder {
    /// Image id.
    pub id: String,
    /// New sort position.
    pub sort_order: i64,
}

#[derive(Serialize)]
struct ReorderRequest<'a> {
    images: &'a [ImageOrder],
}

#[derive(Serialize)]
struct LogoPath<'a> {
    path: &'a str,
}

/// Client for the image and logo endpoints of the data API.
#[derive(Debug, Clone)]
pub struct MediaClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl MediaClient {
    /// Create a client for the data API at `base_url` (e.g., `http://localhost:8000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: TokenStore) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, tokens)
    }

    /// Create a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        tokens: TokenStore,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `<base>/api/images/<id>[/<action>]` with the id escaped as one segment.
    fn image_url(&self, image_id: &str, action: Option<&str>) -> Result<Url> {
        if matches!(image_id, "" | "." | "..") {
            return Err(ClientError::InvalidUrl(format!("image id `{image_id}`")));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?;
            segments.pop_if_empty().extend(["api", "images", image_id]);
            if let Some(action) = action {
                segments.push(action);
            }
        }

        Ok(url)
    }

    /// Upload images for a record. `owner_type` is the backend model name
    /// (e.g., `App\Models\MebelProject`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) if the
    /// backend rejects the upload, or a transport error.
    pub async fn upload(
        &self,
        files: Vec<UploadFile>,
        owner_type: &str,
        owner_id: &str,
    ) -> Result<Value> {
        let count = files.len();
        let mut form = Form::new();
        for (index, file) in files.into_iter().enumerate() {
            form = form.part(format!("files[{index}]"), file.into_part()?);
        }
        let form = form
            .text("parentable_type", owner_type.to_string())
            .text("parentable_id", owner_id.to_string());

        tracing::debug!(count, owner_type = %owner_type, owner_id = %owner_id, "Uploading images");

        let response = self
            .client
            .post(self.url("/api/images/upload"))
            .headers(json_headers(&self.tokens, false)?)
            .multipart(form)
            .send()
            .await?;

        read_envelope(response, UPLOAD_FAILED).await
    }

    /// List the images of a record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) on a
    /// rejected call, or a transport error.
    pub async fn list(&self, owner_type: &str, owner_id: &str) -> Result<Value> {
        let response = self
            .client
            .get(self.url("/api/images"))
            .headers(json_headers(&self.tokens, true)?)
            .query(&[("parentable_type", owner_type), ("parentable_id", owner_id)])
            .send()
            .await?;

        read_envelope(response, LIST_FAILED).await
    }

    /// Delete an image.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) on a
    /// rejected call, or a transport error.
    pub async fn delete(&self, image_id: &str) -> Result<Value> {
        let response = self
            .client
            .delete(self.image_url(image_id, None)?)
            .headers(json_headers(&self.tokens, true)?)
            .send()
            .await?;

        read_envelope(response, DELETE_FAILED).await
    }

    /// Set the sort position of several images at once.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) on a
    /// rejected call, or a transport error.
    pub async fn reorder(&self, images: &[ImageOrder]) -> Result<Value> {
        let response = self
            .client
            .post(self.url("/api/images/reorder"))
            .headers(json_headers(&self.tokens, true)?)
            .json(&ReorderRequest { images })
            .send()
            .await?;

        read_envelope(response, REORDER_FAILED).await
    }

    /// Flip an image's active flag.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) on a
    /// rejected call, or a transport error.
    pub async fn toggle_active(&self, image_id: &str) -> Result<Value> {
        let response = self
            .client
            .patch(self.image_url(image_id, Some("toggle-active"))?)
            .headers(json_headers(&self.tokens, true)?)
            .send()
            .await?;

        read_envelope(response, TOGGLE_FAILED).await
    }

    /// Upload a logo. The envelope carries the stored path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) on a
    /// rejected call, or a transport error.
    pub async fn upload_logo(&self, file: UploadFile) -> Result<Value> {
        let form = Form::new().part("file", file.into_part()?);

        let response = self
            .client
            .post(self.url("/api/logos/upload"))
            .headers(json_headers(&self.tokens, false)?)
            .multipart(form)
            .send()
            .await?;

        read_envelope(response, LOGO_UPLOAD_FAILED).await
    }

    /// Delete a previously uploaded logo by its stored path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`](crate::ClientError::Request) on a
    /// rejected call, or a transport error.
    pub async fn delete_logo(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .delete(self.url("/api/logos"))
            .headers(json_headers(&self.tokens, true)?)
            .json(&LogoPath { path })
            .send()
            .await?;

        read_envelope(response, LOGO_DELETE_FAILED).await
    }
}
