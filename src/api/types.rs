// SPDX-License-Identifier: MPL-2.0
//! Response shapes returned by the gallery server.
//!
//! Every field is optional or defaulted: these payloads are informational and
//! the client must keep working when the server adds or drops fields.

use serde::Deserialize;

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerStatus {
    pub status: Option<String>,
    pub cloudinary_folder: Option<String>,
    pub alternative_folders: Vec<String>,
    pub total_image_count: Option<u64>,
    pub session_image_count: Option<u64>,
}

impl ServerStatus {
    /// Whether the server reports itself as online.
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

/// Body of `GET /api/sync-cloudinary`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncReport {
    pub message: Option<String>,
    pub image_count: Option<u64>,
}

/// Body of `GET /api/reset-session`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResetReport {
    pub message: Option<String>,
    pub new_start_time: Option<i64>,
}

/// Body of `POST /api/upload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UploadReport {
    pub message: Option<String>,
    pub filename: Option<String>,
    pub url: Option<String>,
}

/// Server-side bulk exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Export {
    /// Every session image packed in a zip archive.
    Archive,
    /// Every session image, one per page.
    Pdf,
}

impl Export {
    /// Path segments of the export endpoint, below the server base URL.
    pub fn segments(self) -> &'static [&'static str] {
        match self {
            Export::Archive => &["api", "download"],
            Export::Pdf => &["api", "download-pdf"],
        }
    }

    /// File name proposed in the save dialog.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Export::Archive => "images.zip",
            Export::Pdf => "images.pdf",
        }
    }

    /// Extension filter for the save dialog.
    pub fn extension(self) -> &'static str {
        match self {
            Export::Archive => "zip",
            Export::Pdf => "pdf",
        }
    }
}
