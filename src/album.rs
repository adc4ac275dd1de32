//! Album aggregation.
//!
//! Turns a flat list of [`MediaFile`] records into the complete set of
//! directory albums, each annotated with statistics over its entire subtree.
//!
//! ## Algorithm
//!
//! ```text
//! 1. Group      files by parent directory      → one album per populated dir
//! 2. Complete   walk each album's ancestors    → empty albums fill the gaps
//! 3. Aggregate  walk each file's ancestor chain → subtree totals per album
//! ```
//!
//! Step 2 guarantees that a directory holding no media directly, but holding a
//! populated descendant, still exists as an album. The walk stops at
//! [`ROOT`](crate::path::ROOT), which only becomes an album if files live
//! directly inside it.
//!
//! Step 3 visits every file once per ancestor, so aggregation costs
//! O(files × depth) rather than comparing every album against every file.
//!
//! ## Thumbnails
//!
//! An album's thumbnail is its first non-hidden own file (input order). Albums
//! without a visible own file fall back to the first non-hidden file anywhere
//! beneath them. Hidden files are never used.

use crate::path::{self, ROOT};
use crate::types::{MediaFile, MediaKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;
use tracing::debug;

/// Aggregates over an album's subtree (own files plus all descendants).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumStats {
    pub total_size: u64,
    pub image_count: usize,
    pub video_count: usize,
    pub gif_count: usize,
    pub hidden_count: usize,
    pub visible_count: usize,
    /// Albums strictly beneath this one, at any depth.
    pub descendant_album_count: usize,
    /// Earliest known creation time; unknown (zero) timestamps are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earliest_creation: Option<i64>,
    /// Latest known modification time; unknown (zero) timestamps are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_modification: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

impl AlbumStats {
    /// Total number of files in the subtree.
    pub fn file_count(&self) -> usize {
        self.image_count + self.video_count + self.gif_count
    }

    /// Number of files of `kind` in the subtree.
    pub fn count_of(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Image => self.image_count,
            MediaKind::Video => self.video_count,
            MediaKind::Gif => self.gif_count,
        }
    }

    fn add_file(&mut self, file: &MediaFile) {
        self.total_size += file.size;
        match file.kind {
            MediaKind::Image => self.image_count += 1,
            MediaKind::Video => self.video_count += 1,
            MediaKind::Gif => self.gif_count += 1,
        }
        if file.is_hidden() {
            self.hidden_count += 1;
        } else {
            self.visible_count += 1;
        }
        if file.created > 0 {
            self.earliest_creation = Some(
                self.earliest_creation
                    .map_or(file.created, |t| t.min(file.created)),
            );
        }
        if file.modified > 0 {
            self.latest_modification = Some(
                self.latest_modification
                    .map_or(file.modified, |t| t.max(file.modified)),
            );
        }
    }
}

/// A directory node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub path: String,
    /// Files whose parent directory is exactly `path`, in input order.
    pub own_files: Vec<MediaFile>,
    pub stats: AlbumStats,
}

impl Album {
    fn empty(path: &str) -> Self {
        Self {
            path: path.to_string(),
            own_files: Vec::new(),
            stats: AlbumStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        path::name_of(&self.path)
    }

    /// True when the album holds files directly, not only through descendants.
    pub fn has_own_files(&self) -> bool {
        !self.own_files.is_empty()
    }
}

/// The complete album set, keyed and ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumMap {
    albums: BTreeMap<String, Album>,
}

impl AlbumMap {
    pub fn get(&self, path: &str) -> Option<&Album> {
        self.albums.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.albums.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Albums in path order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Album> {
        self.albums.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.albums.keys().map(String::as_str)
    }

    /// Albums strictly beneath `ancestor`, in path order.
    pub fn descendants_of<'a>(&'a self, ancestor: &'a str) -> impl Iterator<Item = &'a Album> {
        self.albums
            .values()
            .filter(move |album| path::is_descendant(&album.path, ancestor))
    }

    /// Albums that hold files directly, in path order.
    pub fn populated(&self) -> impl Iterator<Item = &Album> {
        self.albums.values().filter(|album| album.has_own_files())
    }

    /// `path` followed by its strict ancestors that exist as albums.
    ///
    /// The root sentinel only participates when it is itself an album.
    fn chain<'p>(&self, path: &'p str) -> Vec<&'p str> {
        let mut chain = vec![path];
        chain.extend(path::ancestors_of(path));
        if path != ROOT && self.albums.contains_key(ROOT) {
            chain.push(ROOT);
        }
        chain
    }
}

impl<'a> IntoIterator for &'a AlbumMap {
    type Item = &'a Album;
    type IntoIter = btree_map::Values<'a, String, Album>;

    fn into_iter(self) -> Self::IntoIter {
        self.albums.values()
    }
}

/// Directory that groups `file`. Bare names group under the root.
fn group_key(file: &MediaFile) -> &str {
    file.parent().unwrap_or(ROOT)
}

/// Build the complete, subtree-aggregated album set for `files`.
pub fn aggregate(files: &[MediaFile]) -> AlbumMap {
    let mut map = AlbumMap::default();
    if files.is_empty() {
        return map;
    }

    // Group by parent
    for file in files {
        let key = group_key(file);
        map.albums
            .entry(key.to_string())
            .or_insert_with(|| Album::empty(key))
            .own_files
            .push(file.clone());
    }

    // Complete every ancestor chain
    let populated: Vec<String> = map.albums.keys().cloned().collect();
    for album_path in &populated {
        for ancestor in path::ancestors_of(album_path) {
            if !map.albums.contains_key(ancestor) {
                map.albums
                    .insert(ancestor.to_string(), Album::empty(ancestor));
            }
        }
    }

    // Subtree totals and descendant thumbnails
    for file in files {
        let visible = !file.is_hidden();
        for album_path in map.chain(group_key(file)) {
            let album = map.albums.get_mut(album_path);
            debug_assert!(album.is_some(), "ancestor {album_path} missing");
            if let Some(album) = album {
                album.stats.add_file(file);
                if visible && album.stats.thumbnail_path.is_none() {
                    album.stats.thumbnail_path = Some(file.path.clone());
                }
            }
        }
    }

    // Descendant album counts
    let all_paths: Vec<String> = map.albums.keys().cloned().collect();
    for album_path in &all_paths {
        for ancestor in map.chain(album_path).into_iter().skip(1) {
            if let Some(album) = map.albums.get_mut(ancestor) {
                album.stats.descendant_album_count += 1;
            }
        }
    }

    // Own files win over descendants for the thumbnail
    for album in map.albums.values_mut() {
        if let Some(own) = album.own_files.iter().find(|f| !f.is_hidden()) {
            album.stats.thumbnail_path = Some(own.path.clone());
        }
    }

    debug!(
        files = files.len(),
        albums = map.len(),
        populated = populated.len(),
        "aggregated albums"
    );
    map
}
