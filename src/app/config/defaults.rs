// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Server**: Gallery server address, refresh cadence and request timeout
//! - **Thumbnails**: Thumbnail handle cache size

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Address of the gallery server when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Interval between automatic list refreshes (in seconds).
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 55;

/// Minimum automatic refresh interval (in seconds).
pub const MIN_REFRESH_INTERVAL_SECS: u64 = 5;

/// Maximum automatic refresh interval (in seconds).
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 3600;

/// Per-request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

// ==========================================================================
// Thumbnail Defaults
// ==========================================================================

/// Number of decoded thumbnail handles kept in memory.
pub const DEFAULT_THUMBNAIL_CACHE_CAPACITY: usize = 256;

/// Minimum thumbnail cache capacity.
pub const MIN_THUMBNAIL_CACHE_CAPACITY: usize = 16;

/// Maximum thumbnail cache capacity.
pub const MAX_THUMBNAIL_CACHE_CAPACITY: usize = 4096;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_interval_default_is_within_bounds() {
        assert!(DEFAULT_REFRESH_INTERVAL_SECS >= MIN_REFRESH_INTERVAL_SECS);
        assert!(DEFAULT_REFRESH_INTERVAL_SECS <= MAX_REFRESH_INTERVAL_SECS);
    }

    #[test]
    fn request_timeout_default_is_within_bounds() {
        assert!(DEFAULT_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
        assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn thumbnail_capacity_default_is_within_bounds() {
        assert!(DEFAULT_THUMBNAIL_CACHE_CAPACITY >= MIN_THUMBNAIL_CACHE_CAPACITY);
        assert!(DEFAULT_THUMBNAIL_CACHE_CAPACITY <= MAX_THUMBNAIL_CACHE_CAPACITY);
    }
}
