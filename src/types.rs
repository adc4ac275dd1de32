//! Shared types passed between the engine stages.
//!
//! [`MediaFile`] is what the media index produces; [`DisplayItem`] is what the
//! projectors, filter and sorter hand to the UI. Both are serialized verbatim
//! by the CLI (`records.json`, `view --json`), so field names are part of the
//! on-disk format.

use crate::album::{Album, AlbumStats};
use crate::path;
use serde::{Deserialize, Serialize};

/// Media kind reported by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Gif,
}

/// Storage volume a file lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    #[default]
    Primary,
    Secondary,
}

/// A single media file record.
///
/// Timestamps are unix milliseconds; `0` means unknown. Missing numeric fields
/// deserialize as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub modified: i64,
    pub kind: MediaKind,
    #[serde(default)]
    pub volume: Volume,
}

impl MediaFile {
    pub fn new(path: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            path: path.into(),
            size: 0,
            created: 0,
            modified: 0,
            kind,
            volume: Volume::Primary,
        }
    }

    /// File name (last path segment).
    pub fn name(&self) -> &str {
        path::name_of(&self.path)
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> String {
        path::extension_of(&self.path)
    }

    /// Directory holding this file, `None` for a bare name.
    pub fn parent(&self) -> Option<&str> {
        path::parent_of(&self.path)
    }

    /// True when any segment of the path starts with a dot.
    pub fn is_hidden(&self) -> bool {
        path::is_hidden(&self.path)
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    pub fn is_gif(&self) -> bool {
        self.kind == MediaKind::Gif
    }

    pub fn is_video_or_gif(&self) -> bool {
        matches!(self.kind, MediaKind::Video | MediaKind::Gif)
    }
}

/// An album as the UI sees it: aggregates only, no file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumView {
    pub path: String,
    pub name: String,
    /// Files directly inside this album (not counting descendants).
    pub own_file_count: usize,
    #[serde(flatten)]
    pub stats: AlbumStats,
}

impl From<&Album> for AlbumView {
    fn from(album: &Album) -> Self {
        Self {
            path: album.path.clone(),
            name: path::name_of(&album.path).to_string(),
            own_file_count: album.own_files.len(),
            stats: album.stats.clone(),
        }
    }
}

/// One entry of a display list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayItem {
    File(MediaFile),
    Album(AlbumView),
}

/// Identity of a display item: its variant plus its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKey<'a> {
    File(&'a str),
    Album(&'a str),
}

impl DisplayItem {
    pub fn path(&self) -> &str {
        match self {
            DisplayItem::File(file) => &file.path,
            DisplayItem::Album(album) => &album.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DisplayItem::File(file) => file.name(),
            DisplayItem::Album(album) => &album.name,
        }
    }

    pub fn key(&self) -> ItemKey<'_> {
        match self {
            DisplayItem::File(file) => ItemKey::File(&file.path),
            DisplayItem::Album(album) => ItemKey::Album(&album.path),
        }
    }

    pub fn is_album(&self) -> bool {
        matches!(self, DisplayItem::Album(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, DisplayItem::File(_))
    }
}
