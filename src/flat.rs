//! One-level (flat) projection.
//!
//! The root view lists every directory that holds files directly, regardless
//! of depth. Drilling into one of them lists its own files and nothing else:
//! sub-albums are not grouped in this mode.
//!
//! Unlike the [`tree`](crate::tree) view, intermediate populated directories
//! do not absorb their populated descendants here. `/root/Movies` and
//! `/root/Movies/Empty/Deep` are both listed side by side, although each still
//! carries its full subtree totals.

use crate::album::AlbumMap;
use crate::types::{AlbumView, DisplayItem};

/// Flat view: all populated albums when `target` is `None`, otherwise the
/// target's own files.
pub fn project(albums: &AlbumMap, target: Option<&str>) -> Vec<DisplayItem> {
    match target {
        None => albums
            .populated()
            .map(|album| DisplayItem::Album(AlbumView::from(album)))
            .collect(),
        Some(target) => albums
            .get(target)
            .map(|album| {
                album
                    .own_files
                    .iter()
                    .cloned()
                    .map(DisplayItem::File)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
