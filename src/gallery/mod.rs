// SPDX-License-Identifier: MPL-2.0
//! Gallery state and its pure transitions.
//!
//! `GalleryState` owns the ordered image list received from the server and the
//! index of the image shown in the detail panel. Every transition is a plain
//! method with no I/O, so the application layer decides which side effects
//! (fetches, scrolling, notifications) follow from the returned outcome.
//!
//! # Invariant
//!
//! `current` is `Some(i)` with `i < images.len()` whenever an image is shown,
//! and `None` whenever the list is empty (detail panel hidden).

pub mod sequence;

pub use sequence::{RequestSequencer, RequestToken};

use serde::{Deserialize, Serialize};

/// One image as described by the server's listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Server-assigned, unique file name.
    pub filename: String,
    /// Remote-hosted URL, preferred over the server's own image route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudinary_url: Option<String>,
    /// Upload time in Unix seconds, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ImageDescriptor {
    /// Creates a descriptor with only a file name.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            cloudinary_url: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_cloudinary_url(mut self, url: impl Into<String>) -> Self {
        self.cloudinary_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Returns the remote URL when it is present and non-blank.
    pub fn remote_url(&self) -> Option<&str> {
        self.cloudinary_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// What a list replacement did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list went from empty to non-empty; the first image is shown.
    ShowedFirst,
    /// The list grew; the newest (last) image is shown and the strip should
    /// scroll to its end.
    JumpedToNewest,
    /// Same or smaller list; selection kept (clamped into range).
    Replaced,
    /// The list is now empty; the detail panel is hidden.
    Emptied,
}

/// Selection after an image was removed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Another image is shown at this index.
    Selected(usize),
    /// No images remain; the detail panel is hidden.
    Emptied,
}

/// Ordered image list plus the index shown in the detail panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    images: Vec<ImageDescriptor>,
    current: Option<usize>,
}

impl GalleryState {
    /// Creates an empty gallery with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gallery from a server listing, applied like a first refresh.
    #[must_use]
    pub fn with_images(images: Vec<ImageDescriptor>) -> Self {
        let mut state = Self::new();
        state.replace_images(images);
        state
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Index of the image shown in the detail panel.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Descriptor of the image shown in the detail panel.
    pub fn current(&self) -> Option<&ImageDescriptor> {
        self.current.and_then(|index| self.images.get(index))
    }

    /// Whether the detail panel should be visible.
    pub fn is_detail_visible(&self) -> bool {
        self.current().is_some()
    }

    /// Previous is possible everywhere except the first image.
    pub fn has_previous(&self) -> bool {
        self.current.is_some_and(|index| index > 0)
    }

    /// Next is possible everywhere except the last image.
    pub fn has_next(&self) -> bool {
        self.current.is_some_and(|index| index + 1 < self.images.len())
    }

    /// Replaces the whole list with a fresh server listing.
    ///
    /// Growth from empty selects the first image, growth from a non-empty list
    /// selects the newest one, anything else keeps the selection clamped into
    /// the new range.
    pub fn replace_images(&mut self, images: Vec<ImageDescriptor>) -> RefreshOutcome {
        let previous_len = self.images.len();
        self.images = images;
        let len = self.images.len();

        if len == 0 {
            self.current = None;
            return RefreshOutcome::Emptied;
        }

        if len > previous_len {
            if previous_len == 0 {
                self.current = Some(0);
                return RefreshOutcome::ShowedFirst;
            }
            self.current = Some(len - 1);
            return RefreshOutcome::JumpedToNewest;
        }

        self.current = Some(self.current.map_or(0, |index| index.min(len - 1)));
        RefreshOutcome::Replaced
    }

    /// Shows the image at `index`. Out-of-range indices are ignored.
    ///
    /// Returns `true` when the selection is valid after the call.
    pub fn show(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Shows the image `delta` positions away from the current one.
    ///
    /// Steps that would leave the list (before the first or after the last
    /// image) leave the state untouched.
    pub fn step(&mut self, delta: isize) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        match current.checked_add_signed(delta) {
            Some(target) => self.show(target),
            None => false,
        }
    }

    pub fn show_previous(&mut self) -> bool {
        self.step(-1)
    }

    pub fn show_next(&mut self) -> bool {
        self.step(1)
    }

    /// Finds the position of an image by file name.
    pub fn position_of(&self, filename: &str) -> Option<usize> {
        self.images.iter().position(|image| image.filename == filename)
    }

    /// Removes an image after the server confirmed its deletion.
    ///
    /// The image is located by name so a listing that changed while the
    /// request was in flight cannot cause the wrong entry to be dropped.
    /// Returns `None` when the image is no longer in the list.
    pub fn remove(&mut self, filename: &str) -> Option<RemovalOutcome> {
        let removed = self.position_of(filename)?;
        self.images.remove(removed);

        if self.images.is_empty() {
            self.current = None;
            return Some(RemovalOutcome::Emptied);
        }

        let last = self.images.len() - 1;
        let next = match self.current {
            Some(current) if removed < current => current - 1,
            Some(current) => current.min(last),
            None => removed.min(last),
        };
        self.current = Some(next);
        Some(RemovalOutcome::Selected(next))
    }

    /// Drops every image and hides the detail panel.
    pub fn clear(&mut self) {
        self.images.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<ImageDescriptor> {
        (0..count)
            .map(|i| ImageDescriptor::new(format!("whiteboard_{i}.png")))
            .collect()
    }

    #[test]
    fn empty_gallery_hides_detail() {
        let state = GalleryState::new();
        assert!(state.is_empty());
        assert!(!state.is_detail_visible());
        assert_eq!(state.current_index(), None);
        assert!(!state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn growth_from_empty_selects_first() {
        let mut state = GalleryState::new();
        let outcome = state.replace_images(names(4));
        assert_eq!(outcome, RefreshOutcome::ShowedFirst);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn growth_selects_newest() {
        let mut state = GalleryState::with_images(names(2));
        let outcome = state.replace_images(names(5));
        assert_eq!(outcome, RefreshOutcome::JumpedToNewest);
        assert_eq!(state.current_index(), Some(4));
    }

    #[test]
    fn same_length_keeps_selection() {
        let mut state = GalleryState::with_images(names(3));
        assert!(state.show(1));
        let outcome = state.replace_images(names(3));
        assert_eq!(outcome, RefreshOutcome::Replaced);
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn shrinking_list_clamps_selection() {
        let mut state = GalleryState::with_images(names(5));
        assert!(state.show(4));
        let outcome = state.replace_images(names(2));
        assert_eq!(outcome, RefreshOutcome::Replaced);
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn empty_listing_hides_detail() {
        let mut state = GalleryState::with_images(names(2));
        assert_eq!(state.replace_images(Vec::new()), RefreshOutcome::Emptied);
        assert!(!state.is_detail_visible());
    }

    #[test]
    fn show_out_of_range_is_ignored() {
        let mut state = GalleryState::with_images(names(3));
        assert!(state.show(2));
        let before = state.clone();

        assert!(!state.show(3));
        assert_eq!(state, before);
    }

    #[test]
    fn stepping_before_first_is_ignored() {
        let mut state = GalleryState::with_images(names(3));
        let before = state.clone();
        assert!(!state.step(-1));
        assert_eq!(state, before);
    }

    #[test]
    fn stepping_past_last_is_ignored() {
        let mut state = GalleryState::with_images(names(3));
        assert!(state.show(2));
        assert!(!state.show_next());
        assert_eq!(state.current_index(), Some(2));
    }

    #[test]
    fn previous_and_next_availability_at_the_ends() {
        let mut state = GalleryState::with_images(names(3));
        assert!(!state.has_previous());
        assert!(state.has_next());

        assert!(state.show_next());
        assert!(state.has_previous());
        assert!(state.has_next());

        assert!(state.show_next());
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn single_image_disables_both_directions() {
        let state = GalleryState::with_images(names(1));
        assert!(!state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn removing_last_remaining_image_empties_gallery() {
        let mut state = GalleryState::with_images(names(1));
        let outcome = state.remove("whiteboard_0.png");
        assert_eq!(outcome, Some(RemovalOutcome::Emptied));
        assert!(state.is_empty());
        assert!(!state.is_detail_visible());
    }

    #[test]
    fn removing_current_tail_image_clamps_index() {
        let mut state = GalleryState::with_images(names(3));
        assert!(state.show(2));
        let outcome = state.remove("whiteboard_2.png");
        assert_eq!(outcome, Some(RemovalOutcome::Selected(1)));
        assert_eq!(state.current().map(|d| d.filename.as_str()), Some("whiteboard_1.png"));
    }

    #[test]
    fn removing_current_middle_image_shows_its_successor() {
        let mut state = GalleryState::with_images(names(3));
        assert!(state.show(1));
        assert_eq!(state.remove("whiteboard_1.png"), Some(RemovalOutcome::Selected(1)));
        assert_eq!(state.current().map(|d| d.filename.as_str()), Some("whiteboard_2.png"));
    }

    #[test]
    fn removing_an_earlier_image_keeps_the_same_image_selected() {
        let mut state = GalleryState::with_images(names(4));
        assert!(state.show(2));
        assert_eq!(state.remove("whiteboard_0.png"), Some(RemovalOutcome::Selected(1)));
        assert_eq!(state.current().map(|d| d.filename.as_str()), Some("whiteboard_2.png"));
    }

    #[test]
    fn removing_unknown_image_changes_nothing() {
        let mut state = GalleryState::with_images(names(2));
        let before = state.clone();
        assert_eq!(state.remove("missing.png"), None);
        assert_eq!(state, before);
    }

    #[test]
    fn clear_drops_everything() {
        let mut state = GalleryState::with_images(names(3));
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.current_index(), None);
    }

    #[test]
    fn remote_url_ignores_blank_values() {
        let blank = ImageDescriptor::new("a.png").with_cloudinary_url("  ");
        assert_eq!(blank.remote_url(), None);

        let hosted = ImageDescriptor::new("a.png").with_cloudinary_url("https://cdn/a.png");
        assert_eq!(hosted.remote_url(), Some("https://cdn/a.png"));
    }
}
