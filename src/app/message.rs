// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::{Export, ResetReport, ServerStatus, UploadReport};
use crate::error::Error;
use crate::gallery::{ImageDescriptor, RequestToken};
use crate::ui::gallery;
use crate::ui::notifications;
use iced::widget::image::Handle;
use iced::window;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Instant;

/// What a save dialog is choosing a destination for.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveTarget {
    /// One gallery image, fetched from `url`.
    Image { filename: String, url: Url },
    /// A server-side bulk export.
    Export(Export),
}

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Notification(notifications::NotificationMessage),
    /// Keyboard and window events from the runtime.
    RawEvent {
        window: window::Id,
        event: iced::Event,
    },
    /// Periodic background refresh.
    RefreshTick(Instant),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
    ImagesFetched {
        token: RequestToken,
        result: Result<Vec<ImageDescriptor>, Error>,
    },
    PreviewLoaded {
        filename: String,
        result: Result<Handle, Error>,
    },
    ThumbnailLoaded {
        filename: String,
        result: Result<Handle, Error>,
    },
    StatusFetched(Result<ServerStatus, Error>),
    DeleteConfirmed {
        filename: String,
        confirmed: bool,
    },
    DeleteCompleted {
        filename: String,
        result: Result<(), Error>,
    },
    ResetConfirmed(bool),
    ResetCompleted(Result<ResetReport, Error>),
    SaveDestinationChosen {
        target: SaveTarget,
        path: Option<PathBuf>,
    },
    DownloadCompleted {
        target: SaveTarget,
        path: PathBuf,
        result: Result<u64, Error>,
    },
    UploadFileChosen(Option<PathBuf>),
    UploadCompleted {
        path: PathBuf,
        result: Result<UploadReport, Error>,
    },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional server URL, used for this session instead of the configured one.
    pub server: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `GALLERY_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
