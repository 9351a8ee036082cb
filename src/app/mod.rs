// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery views and the
//! gallery server.
//!
//! The `App` struct wires together the gallery state, the HTTP client,
//! localization and preferences, and translates messages into side effects
//! like requests, dialogs or window mode changes.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message, SaveTarget};
pub use update::{shortcut_for, Shortcut};

use crate::api::GalleryClient;
use crate::gallery::{GalleryState, RequestSequencer};
use crate::i18n::fluent::I18n;
use crate::ui::gallery::{Preview, ServerHealth, ThumbnailCache};
use crate::ui::notifications;
use crate::ui::theming::ThemeMode;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    /// `None` when the configured server URL is unusable.
    client: Option<GalleryClient>,
    gallery: GalleryState,
    sequencer: RequestSequencer,
    thumbnails: ThumbnailCache,
    preview: Preview,
    health: ServerHealth,
    refresh_interval: Duration,
    fullscreen: bool,
    window_id: Option<window::Id>,
    theme_mode: ThemeMode,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("images", &self.gallery.len())
            .field("current", &self.gallery.current_index())
            .field("fullscreen", &self.fullscreen)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; flags are consumed on the first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        Self {
            i18n: I18n::default(),
            client: None,
            gallery: GalleryState::new(),
            sequencer: RequestSequencer::new(),
            thumbnails: ThumbnailCache::new(config.thumbnails.capacity()),
            preview: Preview::Hidden,
            health: ServerHealth::Unknown,
            refresh_interval: config.server.refresh_interval(),
            fullscreen: false,
            window_id: None,
            theme_mode: config.general.theme_mode,
            notifications: notifications::Manager::new(),
            config,
        }
    }
}

impl App {
    /// Loads preferences, connects the client and starts the first refresh.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let mut app = App {
            i18n,
            thumbnails: ThumbnailCache::new(config.thumbnails.capacity()),
            refresh_interval: config.server.refresh_interval(),
            theme_mode: config.general.theme_mode,
            ..Self::default()
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(&key));
        }

        // --server applies to this session only and is never written back
        let base_url = flags
            .server
            .as_deref()
            .unwrap_or_else(|| config.server.base_url())
            .to_string();
        match GalleryClient::new(&base_url, config.server.request_timeout()) {
            Ok(client) => {
                tracing::info!(server = %client.base_url(), "gallery server configured");
                app.client = Some(client);
            }
            Err(err) => {
                let err = crate::error::Error::from(err);
                tracing::error!(server = %base_url, error = %err, "unusable server url");
                app.notifications.push(
                    notifications::Notification::error("notification-invalid-server")
                        .with_arg("url", base_url),
                );
            }
        }
        app.config = config;

        let task = app.update(Message::Gallery(
            crate::ui::gallery::Message::RefreshRequested,
        ));
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.gallery.current() {
            Some(image) => format!("{} - {app_name}", image.filename),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_refresh_subscription(
                self.client.is_some(),
                self.refresh_interval,
            ),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            config: &mut self.config,
            client: self.client.as_ref(),
            gallery: &mut self.gallery,
            sequencer: &mut self.sequencer,
            thumbnails: &mut self.thumbnails,
            preview: &mut self.preview,
            health: &mut self.health,
            fullscreen: &mut self.fullscreen,
            window_id: &mut self.window_id,
            theme_mode: &mut self.theme_mode,
            notifications: &mut self.notifications,
        };

        match message {
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut ctx, gallery_message)
            }
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::RawEvent { window, event } => {
                update::handle_raw_event(&mut ctx, window, &event)
            }
            Message::RefreshTick(_instant) => update::handle_refresh(&mut ctx),
            Message::Tick(_instant) => {
                // Auto-dismiss expired toasts
                ctx.notifications.tick();
                Task::none()
            }
            Message::ImagesFetched { token, result } => {
                update::handle_images_fetched(&mut ctx, token, result)
            }
            Message::PreviewLoaded { filename, result } => {
                update::handle_preview_loaded(&mut ctx, filename, result)
            }
            Message::ThumbnailLoaded { filename, result } => {
                update::handle_thumbnail_loaded(&mut ctx, filename, result)
            }
            Message::StatusFetched(result) => update::handle_status_fetched(&mut ctx, result),
            Message::DeleteConfirmed {
                filename,
                confirmed,
            } => update::handle_delete_confirmed(&mut ctx, filename, confirmed),
            Message::DeleteCompleted { filename, result } => {
                update::handle_delete_completed(&mut ctx, filename, result)
            }
            Message::ResetConfirmed(confirmed) => {
                update::handle_reset_confirmed(&mut ctx, confirmed)
            }
            Message::ResetCompleted(result) => update::handle_reset_completed(&mut ctx, result),
            Message::SaveDestinationChosen { target, path } => {
                update::handle_save_destination(&mut ctx, target, path)
            }
            Message::DownloadCompleted {
                target,
                path,
                result,
            } => update::handle_download_completed(&mut ctx, &target, &path, result),
            Message::UploadFileChosen(path) => update::handle_upload_file_chosen(&mut ctx, path),
            Message::UploadCompleted { path, result } => {
                update::handle_upload_completed(&mut ctx, &path, result)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            gallery: &self.gallery,
            thumbnails: &self.thumbnails,
            preview: &self.preview,
            health: &self.health,
            refreshing: self.sequencer.has_pending(),
            fullscreen: self.fullscreen,
            theme_mode: self.theme_mode,
            notifications: &self.notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ResetReport, ServerStatus};
    use crate::error::{ApiError, Error};
    use crate::gallery::ImageDescriptor;
    use crate::ui::gallery::{self as gallery_ui, Thumbnail};
    use iced::widget::image::Handle;
    use iced::{event, keyboard};
    use std::time::Duration;

    fn descriptors(names: &[&str]) -> Vec<ImageDescriptor> {
        names.iter().map(|name| ImageDescriptor::new(*name)).collect()
    }

    fn handle() -> Handle {
        Handle::from_bytes(vec![0_u8; 4])
    }

    fn offline() -> Error {
        Error::Api(ApiError::Transport("connection refused".into()))
    }

    fn apply_listing(app: &mut App, names: &[&str]) {
        let token = app.sequencer.issue();
        let _ = app.update(Message::ImagesFetched {
            token,
            result: Ok(descriptors(names)),
        });
    }

    fn current_name(app: &App) -> Option<&str> {
        app.gallery.current().map(|image| image.filename.as_str())
    }

    fn key_press(named: keyboard::key::Named, modifiers: keyboard::Modifiers) -> Message {
        use keyboard::key::{Code, Named};

        let code = match named {
            Named::ArrowLeft => Code::ArrowLeft,
            Named::ArrowRight => Code::ArrowRight,
            Named::Escape => Code::Escape,
            _ => Code::F11,
        };
        Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                modified_key: keyboard::Key::Named(named),
                physical_key: keyboard::key::Physical::Code(code),
                location: keyboard::Location::Standard,
                modifiers,
                text: None,
                repeat: false,
            }),
        }
    }

    #[test]
    fn default_app_starts_empty_and_windowed() {
        let app = App::default();
        assert!(app.gallery.is_empty());
        assert!(matches!(app.preview, Preview::Hidden));
        assert!(!app.fullscreen);
        assert_eq!(app.refresh_interval, Duration::from_secs(55));
    }

    #[test]
    fn first_listing_selects_first_image() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);

        assert_eq!(app.gallery.current_index(), Some(0));
        assert!(app.preview.is_for("a.png"));
    }

    #[test]
    fn growing_listing_jumps_to_newest() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);
        apply_listing(&mut app, &["a.png", "b.png", "c.png"]);

        assert_eq!(current_name(&app), Some("c.png"));
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut app = App::default();
        let older = app.sequencer.issue();
        let newer = app.sequencer.issue();

        let _ = app.update(Message::ImagesFetched {
            token: newer,
            result: Ok(descriptors(&["a.png", "b.png", "c.png"])),
        });
        let _ = app.update(Message::ImagesFetched {
            token: older,
            result: Ok(descriptors(&["a.png"])),
        });

        assert_eq!(app.gallery.len(), 3);
        assert!(!app.sequencer.has_pending());
    }

    #[test]
    fn refresh_failure_keeps_state_and_notifies() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);

        let token = app.sequencer.issue();
        let _ = app.update(Message::ImagesFetched {
            token,
            result: Err(offline()),
        });

        assert_eq!(app.gallery.len(), 2);
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn successful_refresh_clears_refresh_error() {
        let mut app = App::default();
        let token = app.sequencer.issue();
        let _ = app.update(Message::ImagesFetched {
            token,
            result: Err(offline()),
        });
        assert!(app.notifications.has_notifications());

        apply_listing(&mut app, &["a.png"]);
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn thumbnail_click_out_of_range_is_ignored() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);

        let _ = app.update(Message::Gallery(gallery_ui::Message::ThumbnailClicked(2)));
        assert_eq!(app.gallery.current_index(), Some(0));

        let _ = app.update(Message::Gallery(gallery_ui::Message::ThumbnailClicked(1)));
        assert_eq!(app.gallery.current_index(), Some(1));
    }

    #[test]
    fn arrow_keys_step_within_bounds() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);

        let _ = app.update(key_press(
            keyboard::key::Named::ArrowLeft,
            keyboard::Modifiers::default(),
        ));
        assert_eq!(app.gallery.current_index(), Some(0));

        let _ = app.update(key_press(
            keyboard::key::Named::ArrowRight,
            keyboard::Modifiers::default(),
        ));
        assert_eq!(app.gallery.current_index(), Some(1));

        let _ = app.update(key_press(
            keyboard::key::Named::ArrowRight,
            keyboard::Modifiers::default(),
        ));
        assert_eq!(app.gallery.current_index(), Some(1));
    }

    #[test]
    fn raw_event_remembers_window() {
        let mut app = App::default();
        assert!(app.window_id.is_none());
        let _ = app.update(key_press(
            keyboard::key::Named::Escape,
            keyboard::Modifiers::default(),
        ));
        assert!(app.window_id.is_some());
        assert!(!app.fullscreen);
    }

    #[test]
    fn fullscreen_toggles_once_window_is_known() {
        let mut app = App::default();
        let _ = app.update(Message::Gallery(gallery_ui::Message::ToggleFullscreen));
        assert!(!app.fullscreen, "no window id yet");

        app.window_id = Some(window::Id::unique());
        let _ = app.update(Message::Gallery(gallery_ui::Message::ToggleFullscreen));
        assert!(app.fullscreen);

        let _ = app.update(key_press(
            keyboard::key::Named::Escape,
            keyboard::Modifiers::default(),
        ));
        assert!(!app.fullscreen);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png"]);

        let _ = app.update(Message::DeleteConfirmed {
            filename: "a.png".into(),
            confirmed: false,
        });
        assert_eq!(app.gallery.len(), 1);
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn completed_delete_removes_by_filename() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png", "c.png"]);
        // The list moved on while the request was in flight
        let _ = app.update(Message::Gallery(gallery_ui::Message::ThumbnailClicked(2)));

        let _ = app.update(Message::DeleteCompleted {
            filename: "a.png".into(),
            result: Ok(()),
        });

        let names: Vec<&str> = app
            .gallery
            .images()
            .iter()
            .map(|image| image.filename.as_str())
            .collect();
        assert_eq!(names, vec!["b.png", "c.png"]);
        assert_eq!(current_name(&app), Some("c.png"));
    }

    #[test]
    fn deleting_last_image_hides_detail() {
        let mut app = App::default();
        apply_listing(&mut app, &["only.png"]);

        let _ = app.update(Message::DeleteCompleted {
            filename: "only.png".into(),
            result: Ok(()),
        });

        assert!(app.gallery.is_empty());
        assert!(matches!(app.preview, Preview::Hidden));
    }

    #[test]
    fn failed_delete_keeps_image() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png"]);

        let _ = app.update(Message::DeleteCompleted {
            filename: "a.png".into(),
            result: Err(offline()),
        });

        assert_eq!(app.gallery.len(), 1);
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn reset_clears_state_even_on_failure() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);
        app.thumbnails.insert_ready("a.png", handle());

        let _ = app.update(Message::ResetCompleted(Err(offline())));

        assert!(app.gallery.is_empty());
        assert!(app.thumbnails.is_empty());
        assert!(matches!(app.preview, Preview::Hidden));
    }

    #[test]
    fn listing_in_flight_during_reset_is_dropped() {
        let mut app = App::default();
        let in_flight = app.sequencer.issue();

        let _ = app.update(Message::ResetCompleted(Ok(ResetReport::default())));
        let _ = app.update(Message::ImagesFetched {
            token: in_flight,
            result: Ok(descriptors(&["old.png"])),
        });

        assert!(app.gallery.is_empty());
    }

    #[test]
    fn preview_for_previous_selection_is_discarded() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png", "b.png"]);
        let _ = app.update(Message::Gallery(gallery_ui::Message::ShowNext));

        let _ = app.update(Message::PreviewLoaded {
            filename: "a.png".into(),
            result: Ok(handle()),
        });
        assert!(app.preview.handle().is_none());

        let _ = app.update(Message::PreviewLoaded {
            filename: "b.png".into(),
            result: Ok(handle()),
        });
        assert!(app.preview.handle().is_some());
    }

    #[test]
    fn thumbnail_failure_marks_placeholder_without_toast() {
        let mut app = App::default();
        apply_listing(&mut app, &["a.png"]);

        let _ = app.update(Message::ThumbnailLoaded {
            filename: "a.png".into(),
            result: Err(offline()),
        });

        assert!(matches!(app.thumbnails.get("a.png"), Some(Thumbnail::Failed)));
        assert!(!app.notifications.has_notifications());
    }

    #[test]
    fn status_drives_server_health() {
        let mut app = App::default();
        let status = ServerStatus {
            status: Some("online".into()),
            session_image_count: Some(4),
            ..ServerStatus::default()
        };

        let _ = app.update(Message::StatusFetched(Ok(status.clone())));
        assert_eq!(app.health, ServerHealth::Reachable(status));

        let _ = app.update(Message::StatusFetched(Err(offline())));
        assert_eq!(app.health, ServerHealth::Unreachable);
    }

    #[test]
    fn actions_without_server_notify() {
        let mut app = App::default();
        let _ = app.update(Message::ResetConfirmed(true));
        assert_eq!(app.notifications.visible_count(), 1);
    }

    #[test]
    fn title_shows_current_filename() {
        let mut app = App::default();
        assert_eq!(app.title(), app.i18n.tr("window-title"));

        apply_listing(&mut app, &["a.png"]);
        assert!(app.title().starts_with("a.png - "));
    }
}
