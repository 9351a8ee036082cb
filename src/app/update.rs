// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Pure selection changes are delegated to [`GalleryState`]; this module turns
//! their outcomes into side effects (requests, dialogs, scrolling, toasts).

use super::message::SaveTarget;
use super::{notifications, Message};
use crate::api::{Export, GalleryClient, ResetReport, ServerStatus, UploadReport, UPLOAD_EXTENSIONS};
use crate::config::{self, Config};
use crate::error::Error;
use crate::gallery::{
    GalleryState, ImageDescriptor, RefreshOutcome, RemovalOutcome, RequestSequencer,
    RequestToken,
};
use crate::i18n::fluent::I18n;
use crate::ui::gallery::{self, Preview, ServerHealth, Thumbnail, ThumbnailCache, THUMBNAIL_STRIP_ID};
use crate::ui::theming::ThemeMode;
use iced::widget::image::Handle;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::{operation, Id};
use iced::{event, keyboard, window, Task};
use std::path::{Path, PathBuf};

/// Key used for refresh failures; cleared once a refresh succeeds again.
const REFRESH_ERROR_KEY: &str = "notification-refresh-error";

/// Context for update operations containing mutable references to app state.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub config: &'a mut Config,
    pub client: Option<&'a GalleryClient>,
    pub gallery: &'a mut GalleryState,
    pub sequencer: &'a mut RequestSequencer,
    pub thumbnails: &'a mut ThumbnailCache,
    pub preview: &'a mut Preview,
    pub health: &'a mut ServerHealth,
    pub fullscreen: &'a mut bool,
    pub window_id: &'a mut Option<window::Id>,
    pub theme_mode: &'a mut ThemeMode,
    pub notifications: &'a mut notifications::Manager,
}

/// Keyboard shortcuts understood by the gallery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Previous,
    Next,
    Delete,
    ToggleFullscreen,
    ExitFullscreen,
    Refresh,
}

/// Maps a key press to a shortcut.
pub fn shortcut_for(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Shortcut> {
    use keyboard::key::Named;

    match key {
        keyboard::Key::Named(Named::ArrowLeft) => Some(Shortcut::Previous),
        keyboard::Key::Named(Named::ArrowRight) => Some(Shortcut::Next),
        keyboard::Key::Named(Named::Delete) if modifiers.command() => Some(Shortcut::Delete),
        keyboard::Key::Named(Named::F11) => Some(Shortcut::ToggleFullscreen),
        keyboard::Key::Named(Named::Escape) => Some(Shortcut::ExitFullscreen),
        keyboard::Key::Named(Named::F5) => Some(Shortcut::Refresh),
        keyboard::Key::Character(c) if modifiers.command() && c.as_str().eq_ignore_ascii_case("r") => {
            Some(Shortcut::Refresh)
        }
        _ => None,
    }
}

/// Handles a runtime event: remembers the window and dispatches shortcuts.
pub fn handle_raw_event(
    ctx: &mut UpdateContext<'_>,
    window: window::Id,
    event: &event::Event,
) -> Task<Message> {
    *ctx.window_id = Some(window);

    let event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event else {
        return Task::none();
    };

    match shortcut_for(key, *modifiers) {
        Some(Shortcut::Previous) => handle_gallery_message(ctx, gallery::Message::ShowPrevious),
        Some(Shortcut::Next) => handle_gallery_message(ctx, gallery::Message::ShowNext),
        Some(Shortcut::Delete) => handle_gallery_message(ctx, gallery::Message::DeleteRequested),
        Some(Shortcut::ToggleFullscreen) => {
            handle_gallery_message(ctx, gallery::Message::ToggleFullscreen)
        }
        Some(Shortcut::ExitFullscreen) => {
            update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), false)
        }
        Some(Shortcut::Refresh) => handle_refresh(ctx),
        None => Task::none(),
    }
}

/// Handles intents emitted by the gallery views.
pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
) -> Task<Message> {
    match message {
        gallery::Message::ThumbnailClicked(index) => handle_show_image(ctx, index),
        gallery::Message::ShowPrevious => {
            if ctx.gallery.show_previous() {
                sync_preview(ctx)
            } else {
                Task::none()
            }
        }
        gallery::Message::ShowNext => {
            if ctx.gallery.show_next() {
                sync_preview(ctx)
            } else {
                Task::none()
            }
        }
        gallery::Message::DeleteRequested => handle_delete_request(ctx),
        gallery::Message::SaveRequested => handle_save_request(ctx),
        gallery::Message::RefreshRequested => handle_refresh(ctx),
        gallery::Message::ExportRequested(export) => handle_export_request(ctx, export),
        gallery::Message::UploadRequested => handle_upload_request(ctx),
        gallery::Message::ResetRequested => handle_reset_request(ctx),
        gallery::Message::ToggleFullscreen => {
            let desired = !*ctx.fullscreen;
            update_fullscreen_mode(ctx.fullscreen, ctx.window_id.as_ref(), desired)
        }
        gallery::Message::CycleTheme => handle_cycle_theme(ctx),
    }
}

/// Shows the image at `index`; out-of-range indices are ignored.
pub fn handle_show_image(ctx: &mut UpdateContext<'_>, index: usize) -> Task<Message> {
    if !ctx.gallery.show(index) {
        tracing::debug!(index, len = ctx.gallery.len(), "ignoring out-of-range selection");
        return Task::none();
    }
    sync_preview(ctx)
}

// =============================================================================
// Refresh
// =============================================================================

/// Starts a refresh: remote sync, then the authoritative listing.
///
/// The listing is tagged with a fresh token so an older response arriving
/// late cannot overwrite it. Server status is fetched alongside.
pub fn handle_refresh(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(client) = ctx.client.cloned() else {
        return Task::none();
    };

    let token = ctx.sequencer.issue();
    tracing::debug!(token = token.value(), "refresh issued");

    let listing = Task::perform(fetch_listing(client.clone()), move |result| {
        Message::ImagesFetched { token, result }
    });
    Task::batch([listing, fetch_status(client)])
}

async fn fetch_listing(client: GalleryClient) -> Result<Vec<ImageDescriptor>, Error> {
    match client.sync_remote().await {
        Ok(report) => tracing::info!(
            message = report.message.as_deref().unwrap_or_default(),
            image_count = report.image_count,
            "remote sync finished"
        ),
        Err(err) => tracing::warn!(error = %err, "remote sync failed, listing anyway"),
    }
    Ok(client.list_images().await?)
}

/// Fetches `GET /api/status` for the status bar.
pub fn fetch_status(client: GalleryClient) -> Task<Message> {
    Task::perform(
        async move { client.status().await.map_err(Error::from) },
        Message::StatusFetched,
    )
}

/// Applies a listing unless a newer one was already applied.
pub fn handle_images_fetched(
    ctx: &mut UpdateContext<'_>,
    token: RequestToken,
    result: Result<Vec<ImageDescriptor>, Error>,
) -> Task<Message> {
    if !ctx.sequencer.accept(token) {
        tracing::debug!(token = token.value(), "discarding stale listing");
        return Task::none();
    }

    let images = match result {
        Ok(images) => images,
        Err(err) => {
            tracing::error!(error = %err, "could not load image list");
            ctx.notifications
                .push(notifications::Notification::error(REFRESH_ERROR_KEY).with_reason(&err));
            return Task::none();
        }
    };

    ctx.notifications.clear_key(REFRESH_ERROR_KEY);
    let outcome = ctx.gallery.replace_images(images);
    tracing::debug!(?outcome, len = ctx.gallery.len(), "listing applied");

    ctx.thumbnails.retain_listed(ctx.gallery.images());
    let mut tasks = vec![load_missing_thumbnails(ctx), sync_preview(ctx)];
    if outcome == RefreshOutcome::JumpedToNewest {
        tasks.push(operation::snap_to(
            Id::new(THUMBNAIL_STRIP_ID),
            RelativeOffset { x: 1.0, y: 0.0 },
        ));
    }
    Task::batch(tasks)
}

pub fn handle_status_fetched(
    ctx: &mut UpdateContext<'_>,
    result: Result<ServerStatus, Error>,
) -> Task<Message> {
    match result {
        Ok(status) => {
            tracing::info!(
                status = status.status.as_deref().unwrap_or_default(),
                session_images = status.session_image_count,
                total_images = status.total_image_count,
                "server status"
            );
            *ctx.health = ServerHealth::Reachable(status);
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not fetch server status");
            *ctx.health = ServerHealth::Unreachable;
        }
    }
    Task::none()
}

// =============================================================================
// Image loading
// =============================================================================

fn fetch_image(
    client: &GalleryClient,
    image: &ImageDescriptor,
) -> impl std::future::Future<Output = Result<Handle, Error>> + Send + 'static {
    let client = client.clone();
    let url = client.source_url(image);
    async move {
        let bytes = client.fetch_bytes(url?).await?;
        Ok(Handle::from_bytes(bytes))
    }
}

/// Starts thumbnail fetches for listed images with no cache entry.
fn load_missing_thumbnails(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(client) = ctx.client else {
        return Task::none();
    };

    let missing: Vec<ImageDescriptor> = ctx
        .thumbnails
        .missing(ctx.gallery.images())
        .into_iter()
        .cloned()
        .collect();

    let tasks: Vec<Task<Message>> = missing
        .iter()
        .map(|image| {
            ctx.thumbnails.mark_loading(&image.filename);
            let filename = image.filename.clone();
            Task::perform(fetch_image(client, image), move |result| {
                Message::ThumbnailLoaded { filename, result }
            })
        })
        .collect();

    Task::batch(tasks)
}

/// Points the preview at the current image.
///
/// Reuses a decoded thumbnail when one is cached and waits on an in-flight
/// thumbnail fetch instead of starting a second one.
fn sync_preview(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(image) = ctx.gallery.current().cloned() else {
        *ctx.preview = Preview::Hidden;
        return Task::none();
    };
    let filename = image.filename.clone();

    if ctx.preview.is_for(&filename) && !matches!(ctx.preview, Preview::Failed { .. }) {
        return Task::none();
    }

    if let Some(handle) = ctx.thumbnails.handle(&filename) {
        *ctx.preview = Preview::Ready { filename, handle };
        return Task::none();
    }

    let waiting_on_thumbnail = matches!(ctx.thumbnails.get(&filename), Some(Thumbnail::Loading));
    *ctx.preview = Preview::Loading {
        filename: filename.clone(),
    };
    if waiting_on_thumbnail {
        return Task::none();
    }

    let Some(client) = ctx.client else {
        return Task::none();
    };
    Task::perform(fetch_image(client, &image), move |result| {
        Message::PreviewLoaded { filename, result }
    })
}

pub fn handle_preview_loaded(
    ctx: &mut UpdateContext<'_>,
    filename: String,
    result: Result<Handle, Error>,
) -> Task<Message> {
    if !ctx.preview.is_for(&filename) {
        tracing::debug!(%filename, "discarding preview for a previous selection");
        return Task::none();
    }

    *ctx.preview = match result {
        Ok(handle) => {
            ctx.thumbnails.insert_ready(&filename, handle.clone());
            Preview::Ready { filename, handle }
        }
        Err(err) => {
            tracing::error!(%filename, error = %err, "could not load image");
            Preview::Failed { filename }
        }
    };
    Task::none()
}

pub fn handle_thumbnail_loaded(
    ctx: &mut UpdateContext<'_>,
    filename: String,
    result: Result<Handle, Error>,
) -> Task<Message> {
    if ctx.gallery.position_of(&filename).is_none() {
        tracing::debug!(%filename, "discarding thumbnail for an unlisted image");
        return Task::none();
    }

    let waiting = matches!(ctx.preview, Preview::Loading { .. }) && ctx.preview.is_for(&filename);
    match result {
        Ok(handle) => {
            if waiting {
                *ctx.preview = Preview::Ready {
                    filename: filename.clone(),
                    handle: handle.clone(),
                };
            }
            ctx.thumbnails.insert_ready(&filename, handle);
        }
        Err(err) => {
            tracing::warn!(%filename, error = %err, "could not load thumbnail");
            ctx.thumbnails.mark_failed(&filename);
            if waiting {
                *ctx.preview = Preview::Failed { filename };
            }
        }
    }
    Task::none()
}

// =============================================================================
// Delete and reset
// =============================================================================

async fn confirm(title: String, description: String) -> bool {
    let answer = rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show()
        .await;
    answer == rfd::MessageDialogResult::Yes
}

fn handle_delete_request(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(filename) = ctx.gallery.current().map(|image| image.filename.clone()) else {
        return Task::none();
    };

    let title = ctx.i18n.tr("confirm-delete-title");
    let body = ctx
        .i18n
        .tr_with_args("confirm-delete-body", &[("filename", filename.as_str())]);
    Task::perform(confirm(title, body), move |confirmed| {
        Message::DeleteConfirmed {
            filename,
            confirmed,
        }
    })
}

pub fn handle_delete_confirmed(
    ctx: &mut UpdateContext<'_>,
    filename: String,
    confirmed: bool,
) -> Task<Message> {
    if !confirmed {
        return Task::none();
    }
    let Some(client) = require_client(ctx) else {
        return Task::none();
    };

    Task::perform(
        {
            let filename = filename.clone();
            async move { client.delete_image(&filename).await.map_err(Error::from) }
        },
        move |result| Message::DeleteCompleted { filename, result },
    )
}

/// Removes the deleted image by name, so a list refreshed meanwhile is safe.
pub fn handle_delete_completed(
    ctx: &mut UpdateContext<'_>,
    filename: String,
    result: Result<(), Error>,
) -> Task<Message> {
    if let Err(err) = result {
        tracing::error!(%filename, error = %err, "could not delete image");
        ctx.notifications.push(
            notifications::Notification::error("notification-delete-error").with_reason(&err),
        );
        return Task::none();
    }

    tracing::info!(%filename, "image deleted");
    ctx.thumbnails.remove(&filename);
    match ctx.gallery.remove(&filename) {
        Some(RemovalOutcome::Selected(index)) => {
            tracing::debug!(index, "selection moved after delete");
        }
        Some(RemovalOutcome::Emptied) | None => {}
    }
    ctx.notifications.push(
        notifications::Notification::success("notification-delete-success")
            .with_arg("filename", filename),
    );
    sync_preview(ctx)
}

fn handle_reset_request(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let title = ctx.i18n.tr("confirm-reset-title");
    let body = ctx.i18n.tr("confirm-reset-body");
    Task::perform(confirm(title, body), Message::ResetConfirmed)
}

pub fn handle_reset_confirmed(ctx: &mut UpdateContext<'_>, confirmed: bool) -> Task<Message> {
    if !confirmed {
        return Task::none();
    }
    let Some(client) = require_client(ctx) else {
        return Task::none();
    };

    Task::perform(
        async move { client.reset_session().await.map_err(Error::from) },
        Message::ResetCompleted,
    )
}

/// Clears local state whatever the server answered, then re-reads status.
pub fn handle_reset_completed(
    ctx: &mut UpdateContext<'_>,
    result: Result<ResetReport, Error>,
) -> Task<Message> {
    match &result {
        Ok(report) => {
            tracing::info!(
                message = report.message.as_deref().unwrap_or_default(),
                new_start_time = report.new_start_time,
                "session reset"
            );
            ctx.notifications
                .push(notifications::Notification::success("notification-reset-success"));
        }
        Err(err) => {
            tracing::error!(error = %err, "could not reset session");
            ctx.notifications.push(
                notifications::Notification::error("notification-reset-error").with_reason(err),
            );
        }
    }

    ctx.gallery.clear();
    ctx.thumbnails.clear();
    *ctx.preview = Preview::Hidden;
    ctx.sequencer.invalidate();

    match ctx.client {
        Some(client) => fetch_status(client.clone()),
        None => Task::none(),
    }
}

// =============================================================================
// Save, export and upload
// =============================================================================

fn handle_save_request(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(image) = ctx.gallery.current().cloned() else {
        return Task::none();
    };
    let Some(client) = require_client(ctx) else {
        return Task::none();
    };

    let url = match client.source_url(&image) {
        Ok(url) => url,
        Err(err) => {
            let err = Error::from(err);
            tracing::error!(filename = %image.filename, error = %err, "no usable image url");
            ctx.notifications.push(
                notifications::Notification::error("notification-save-error").with_reason(&err),
            );
            return Task::none();
        }
    };

    let title = ctx.i18n.tr("dialog-save-title");
    let suggested = image.filename.clone();
    let target = SaveTarget::Image {
        filename: image.filename,
        url,
    };
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .set_file_name(suggested)
                .save_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        move |path| Message::SaveDestinationChosen { target, path },
    )
}

fn handle_export_request(ctx: &mut UpdateContext<'_>, export: Export) -> Task<Message> {
    if require_client(ctx).is_none() {
        return Task::none();
    }

    let title = ctx.i18n.tr("dialog-export-title");
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .set_file_name(export.default_file_name())
                .add_filter(export.extension(), &[export.extension()])
                .save_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        move |path| Message::SaveDestinationChosen {
            target: SaveTarget::Export(export),
            path,
        },
    )
}

pub fn handle_save_destination(
    ctx: &mut UpdateContext<'_>,
    target: SaveTarget,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        // Dialog cancelled
        return Task::none();
    };
    let Some(client) = require_client(ctx) else {
        return Task::none();
    };

    let url = match &target {
        SaveTarget::Image { url, .. } => Ok(url.clone()),
        SaveTarget::Export(export) => client.export_url(*export),
    };

    Task::perform(
        {
            let path = path.clone();
            async move { client.download_to(url?, &path).await }
        },
        move |result| Message::DownloadCompleted {
            target,
            path,
            result,
        },
    )
}

pub fn handle_download_completed(
    ctx: &mut UpdateContext<'_>,
    target: &SaveTarget,
    path: &Path,
    result: Result<u64, Error>,
) -> Task<Message> {
    let (success_key, error_key) = match target {
        SaveTarget::Image { .. } => ("notification-save-success", "notification-save-error"),
        SaveTarget::Export(_) => ("notification-download-success", "notification-download-error"),
    };

    match result {
        Ok(bytes) => {
            tracing::info!(path = %path.display(), bytes, ?target, "download saved");
            ctx.notifications.push(
                notifications::Notification::success(success_key)
                    .with_arg("path", path.display().to_string()),
            );
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, ?target, "download failed");
            ctx.notifications
                .push(notifications::Notification::error(error_key).with_reason(&err));
        }
    }
    Task::none()
}

fn handle_upload_request(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if require_client(ctx).is_none() {
        return Task::none();
    }

    let title = ctx.i18n.tr("dialog-upload-title");
    let filter = ctx.i18n.tr("dialog-filter-images");
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter(filter, UPLOAD_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        Message::UploadFileChosen,
    )
}

pub fn handle_upload_file_chosen(
    ctx: &mut UpdateContext<'_>,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };
    let Some(client) = require_client(ctx) else {
        return Task::none();
    };

    Task::perform(
        {
            let path = path.clone();
            async move { client.upload_image(&path).await }
        },
        move |result| Message::UploadCompleted { path, result },
    )
}

/// Reports the upload and refreshes, which jumps to the new image.
pub fn handle_upload_completed(
    ctx: &mut UpdateContext<'_>,
    path: &Path,
    result: Result<UploadReport, Error>,
) -> Task<Message> {
    match result {
        Ok(report) => {
            let filename = report.filename.clone().unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            tracing::info!(%filename, url = report.url.as_deref(), "image uploaded");
            ctx.notifications.push(
                notifications::Notification::success("notification-upload-success")
                    .with_arg("filename", filename),
            );
            handle_refresh(ctx)
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "upload failed");
            ctx.notifications.push(
                notifications::Notification::error("notification-upload-error").with_reason(&err),
            );
            Task::none()
        }
    }
}

// =============================================================================
// Window and preferences
// =============================================================================

/// Updates fullscreen mode to the desired state.
fn update_fullscreen_mode(
    fullscreen: &mut bool,
    window_id: Option<&window::Id>,
    desired: bool,
) -> Task<Message> {
    if *fullscreen == desired {
        return Task::none();
    }

    let Some(window_id) = window_id else {
        return Task::none();
    };

    *fullscreen = desired;
    let mode = if desired {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}

fn handle_cycle_theme(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let mode = ctx.theme_mode.next();
    *ctx.theme_mode = mode;
    ctx.config.general.theme_mode = mode;

    if let Err(err) = config::save(ctx.config) {
        tracing::warn!(error = %err, "could not save preferences");
        ctx.notifications.push(
            notifications::Notification::warning("notification-config-save-error")
                .with_reason(&err),
        );
    }
    Task::none()
}

/// Client for user-initiated actions; reports a toast when none is configured.
fn require_client(ctx: &mut UpdateContext<'_>) -> Option<GalleryClient> {
    if let Some(client) = ctx.client {
        return Some(client.clone());
    }
    ctx.notifications
        .push(notifications::Notification::error("notification-no-server"));
    None
}
