// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the gallery server.
//!
//! [`GalleryClient`] wraps a `reqwest::Client` configured with a cookie store
//! (the server keys sessions on a cookie), a bounded redirect policy and a
//! request timeout. Each endpoint gets one async method making a single
//! attempt; retries are left to the user.
//!
//! # Endpoints
//!
//! | Method | Path | Method on client |
//! |---|---|---|
//! | GET | `/api/images` | [`GalleryClient::list_images`] |
//! | GET | `/api/images/:filename` | [`GalleryClient::fetch_bytes`] via [`GalleryClient::image_url`] |
//! | DELETE | `/api/delete/:filename` | [`GalleryClient::delete_image`] |
//! | GET | `/api/reset-session` | [`GalleryClient::reset_session`] |
//! | GET | `/api/status` | [`GalleryClient::status`] |
//! | GET | `/api/sync-cloudinary` | [`GalleryClient::sync_remote`] |
//! | GET | `/api/download`, `/api/download-pdf` | [`GalleryClient::download_to`] via [`GalleryClient::export_url`] |
//! | POST | `/api/upload` | [`GalleryClient::upload_image`] |

pub mod types;

pub use types::{Export, ResetReport, ServerStatus, SyncReport, UploadReport};

use crate::error::{ApiError, Error, Result};
use crate::gallery::ImageDescriptor;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Result type for calls that only touch the network.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

const USER_AGENT: &str = concat!("GalleryLens/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// Extensions accepted by the upload dialog.
pub const UPLOAD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Async client bound to one gallery server.
///
/// Cloning is cheap and clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct GalleryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GalleryClient {
    /// Builds a client for the server at `base_url`.
    ///
    /// The URL must be an absolute `http` or `https` address. A path prefix is
    /// allowed (e.g. `https://example.org/gallery/`) and is kept in front of
    /// every endpoint.
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded, so a file name containing `/` or
    /// spaces stays a single path segment.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the server's own route for one image.
    pub fn image_url(&self, filename: &str) -> ApiResult<Url> {
        self.endpoint(&["api", "images", filename])
    }

    /// URL the image should be displayed and saved from.
    ///
    /// Prefers the remote-hosted URL and falls back to the server route when
    /// it is missing or unparsable.
    pub fn source_url(&self, image: &ImageDescriptor) -> ApiResult<Url> {
        if let Some(remote) = image.remote_url() {
            match Url::parse(remote) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => return Ok(url),
                _ => tracing::warn!(
                    filename = %image.filename,
                    url = remote,
                    "ignoring unusable remote url, falling back to server route"
                ),
            }
        }
        self.image_url(&image.filename)
    }

    /// URL of a bulk export.
    pub fn export_url(&self, export: Export) -> ApiResult<Url> {
        self.endpoint(export.segments())
    }

    /// `GET /api/images`: the authoritative, ordered image list.
    pub async fn list_images(&self) -> ApiResult<Vec<ImageDescriptor>> {
        self.get_json(&["api", "images"]).await
    }

    /// `GET /api/sync-cloudinary`: asks the server to resync with remote storage.
    pub async fn sync_remote(&self) -> ApiResult<SyncReport> {
        self.get_json(&["api", "sync-cloudinary"]).await
    }

    /// `GET /api/status`: health and counters, informational only.
    pub async fn status(&self) -> ApiResult<ServerStatus> {
        self.get_json(&["api", "status"]).await
    }

    /// `GET /api/reset-session`: starts a fresh session view on the server.
    pub async fn reset_session(&self) -> ApiResult<ResetReport> {
        self.get_json(&["api", "reset-session"]).await
    }

    /// `DELETE /api/delete/:filename`.
    pub async fn delete_image(&self, filename: &str) -> ApiResult<()> {
        let url = self.endpoint(&["api", "delete", filename])?;
        let response = self.http.delete(url).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    /// Fetches a whole body into memory (image bytes for display).
    pub async fn fetch_bytes(&self, url: Url) -> ApiResult<Vec<u8>> {
        let response = ensure_success(self.http.get(url).send().await?)?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Streams a body to `destination` and returns the number of bytes written.
    ///
    /// A partially written file is removed when the transfer fails.
    pub async fn download_to(&self, url: Url, destination: &Path) -> Result<u64> {
        let result = self.stream_to_file(url, destination).await;
        if result.is_err() && destination.exists() {
            if let Err(e) = tokio::fs::remove_file(destination).await {
                tracing::warn!(path = %destination.display(), error = %e, "could not remove partial download");
            }
        }
        result
    }

    async fn stream_to_file(&self, url: Url, destination: &Path) -> Result<u64> {
        let response = ensure_success(self.http.get(url).send().await?)?;

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(ApiError::from)?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    /// `POST /api/upload` with the file at `path` as multipart field `image`.
    pub async fn upload_image(&self, path: &Path) -> Result<UploadReport> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Io(format!("not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for_path(path))
            .map_err(ApiError::from)?;
        let form = Form::new().part("image", part);

        let url = self.endpoint(&["api", "upload"])?;
        let response = ensure_success(self.http.post(url).multipart(form).send().await?)?;
        Ok(response.json::<UploadReport>().await.map_err(ApiError::from)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let response = ensure_success(self.http.get(url).send().await?)?;
        Ok(response.json::<T>().await?)
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| ApiError::InvalidUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            endpoint: response.url().path().to_string(),
        })
    }
}

/// Content type sent with an upload, derived from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn client(base: &str) -> GalleryClient {
        GalleryClient::new(base, Duration::from_secs(5)).expect("valid base url")
    }

    #[test]
    fn rejects_non_http_base_urls() {
        for raw in ["ftp://example.org", "not a url", "mailto:someone@example.org"] {
            let err = GalleryClient::new(raw, Duration::from_secs(1)).unwrap_err();
            assert!(matches!(err, ApiError::InvalidUrl(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn endpoint_joins_below_host_root() {
        let client = client("http://127.0.0.1:5000");
        let url = client.endpoint(&["api", "images"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/images");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = client("https://example.org/gallery/");
        let url = client.endpoint(&["api", "status"]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/gallery/api/status");
    }

    #[test]
    fn image_url_encodes_file_name_as_one_segment() {
        let client = client("http://localhost:5000");
        let url = client.image_url("board 1/a.png").unwrap();
        assert_eq!(url.path(), "/api/images/board%201%2Fa.png");
    }

    #[test]
    fn source_url_prefers_remote_url() {
        let client = client("http://localhost:5000");
        let image = ImageDescriptor::new("a.png")
            .with_cloudinary_url("https://res.cloudinary.com/demo/a.png");
        let url = client.source_url(&image).unwrap();
        assert_eq!(url.as_str(), "https://res.cloudinary.com/demo/a.png");
    }

    #[test]
    fn source_url_falls_back_to_server_route() {
        let client = client("http://localhost:5000");

        let plain = ImageDescriptor::new("a.png");
        assert_eq!(
            client.source_url(&plain).unwrap().as_str(),
            "http://localhost:5000/api/images/a.png"
        );

        let broken = ImageDescriptor::new("b.png").with_cloudinary_url("::nonsense::");
        assert_eq!(
            client.source_url(&broken).unwrap().as_str(),
            "http://localhost:5000/api/images/b.png"
        );
    }

    #[test]
    fn export_urls() {
        let client = client("http://localhost:5000");
        assert_eq!(
            client.export_url(Export::Archive).unwrap().path(),
            "/api/download"
        );
        assert_eq!(
            client.export_url(Export::Pdf).unwrap().path(),
            "/api/download-pdf"
        );
    }

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_for_path(&PathBuf::from("a.PNG")), "image/png");
        assert_eq!(mime_for_path(&PathBuf::from("b.jpeg")), "image/jpeg");
        assert_eq!(
            mime_for_path(&PathBuf::from("notes")),
            "application/octet-stream"
        );
    }
}
