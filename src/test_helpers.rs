//! Shared test utilities for the gallery-tree test suite.
//!
//! Provides record builders, a small reference library, and lookup helpers
//! that panic with the available keys when something is missing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let albums = aggregate(&sample_library());
//! let movies = find_album(&albums, "/root/Movies");
//! assert_eq!(movies.stats.video_count, 3);
//! ```

use crate::album::{Album, AlbumMap};
use crate::types::{AlbumView, DisplayItem, MediaFile, MediaKind};

// =========================================================================
// Record builders
// =========================================================================

fn media(path: &str, size: u64, kind: MediaKind) -> MediaFile {
    MediaFile {
        size,
        ..MediaFile::new(path, kind)
    }
}

pub fn image(path: &str, size: u64) -> MediaFile {
    media(path, size, MediaKind::Image)
}

pub fn video(path: &str, size: u64) -> MediaFile {
    media(path, size, MediaKind::Video)
}

pub fn gif(path: &str, size: u64) -> MediaFile {
    media(path, size, MediaKind::Gif)
}

/// Set creation and modification times on a record.
pub fn dated(file: MediaFile, created: i64, modified: i64) -> MediaFile {
    MediaFile {
        created,
        modified,
        ..file
    }
}

/// The four-file library used throughout the docs:
///
/// ```text
/// /root/Movies/a.mp4             100
/// /root/Movies/b.mp4             200
/// /root/Movies/Empty/Deep/c.mp4  400
/// /root/Pics/d.png               800
/// ```
pub fn sample_library() -> Vec<MediaFile> {
    vec![
        video("/root/Movies/a.mp4", 100),
        video("/root/Movies/b.mp4", 200),
        video("/root/Movies/Empty/Deep/c.mp4", 400),
        image("/root/Pics/d.png", 800),
    ]
}

// =========================================================================
// Display item builders
// =========================================================================

pub fn file_item(file: MediaFile) -> DisplayItem {
    DisplayItem::File(file)
}

/// An album item taken from an aggregated map. Panics if missing.
pub fn album_item(albums: &AlbumMap, path: &str) -> DisplayItem {
    DisplayItem::Album(AlbumView::from(find_album(albums, path)))
}

// =========================================================================
// Lookups
// =========================================================================

/// Find an album by path. Panics if not found.
pub fn find_album<'a>(albums: &'a AlbumMap, path: &str) -> &'a Album {
    albums.get(path).unwrap_or_else(|| {
        let paths: Vec<&str> = albums.paths().collect();
        panic!("album '{path}' not found. Available: {paths:?}")
    })
}

/// Paths of a display list, in order.
pub fn item_paths(items: &[DisplayItem]) -> Vec<&str> {
    items.iter().map(DisplayItem::path).collect()
}

/// Paths of the album items of a display list, in order.
pub fn album_paths(items: &[DisplayItem]) -> Vec<&str> {
    items
        .iter()
        .filter(|item| item.is_album())
        .map(DisplayItem::path)
        .collect()
}

/// Paths of the file items of a display list, in order.
pub fn file_paths(items: &[DisplayItem]) -> Vec<&str> {
    items
        .iter()
        .filter(|item| item.is_file())
        .map(DisplayItem::path)
        .collect()
}
