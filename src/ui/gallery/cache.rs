// SPDX-License-Identifier: MPL-2.0
//! Decoded thumbnail handles, keyed by file name.
//!
//! Bounded by an LRU policy: once the capacity is reached, the thumbnail used
//! least recently is evicted and fetched again if it scrolls back into use.

use crate::gallery::ImageDescriptor;
use iced::widget::image::Handle;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Load state of one thumbnail.
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

#[derive(Debug)]
pub struct ThumbnailCache {
    entries: LruCache<String, Thumbnail>,
}

impl ThumbnailCache {
    /// Creates a cache holding at most `capacity` thumbnails (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a thumbnail without changing its recency.
    pub fn get(&self, filename: &str) -> Option<&Thumbnail> {
        self.entries.peek(filename)
    }

    /// Decoded handle for `filename`, marking it as recently used.
    pub fn handle(&mut self, filename: &str) -> Option<Handle> {
        match self.entries.get(filename) {
            Some(Thumbnail::Ready(handle)) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn mark_loading(&mut self, filename: &str) {
        self.entries.put(filename.to_string(), Thumbnail::Loading);
    }

    pub fn insert_ready(&mut self, filename: &str, handle: Handle) {
        self.entries
            .put(filename.to_string(), Thumbnail::Ready(handle));
    }

    pub fn mark_failed(&mut self, filename: &str) {
        self.entries.put(filename.to_string(), Thumbnail::Failed);
    }

    pub fn remove(&mut self, filename: &str) {
        self.entries.pop(filename);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops entries for images no longer in `images`.
    pub fn retain_listed(&mut self, images: &[ImageDescriptor]) {
        let listed: HashSet<&str> = images.iter().map(|image| image.filename.as_str()).collect();
        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(filename, _)| !listed.contains(filename.as_str()))
            .map(|(filename, _)| filename.clone())
            .collect();
        for filename in stale {
            self.entries.pop(&filename);
        }
    }

    /// Images with no cache entry yet, newest first.
    ///
    /// At most `capacity` images are returned so a listing larger than the
    /// cache cannot evict its own fetches in a loop.
    pub fn missing<'a>(&self, images: &'a [ImageDescriptor]) -> Vec<&'a ImageDescriptor> {
        images
            .iter()
            .rev()
            .take(self.capacity())
            .filter(|image| !self.entries.contains(&image.filename))
            .collect()
    }
}
