//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Every entity (album or file) leads with its positional index and name,
//! followed by a short summary in parentheses. Full paths are secondary
//! context on indented `Source:` lines, so the output reads as an inventory
//! while staying traceable to the records.
//!
//! # Output Format
//!
//! ## Index
//!
//! ```text
//! Indexed 4 files under /root
//!     images: 1
//!     videos: 3
//!     gifs: 0
//!     hidden: 0
//! ```
//!
//! ## Albums
//!
//! ```text
//! 001 root (1 image, 3 videos · 1.5 KB)
//!     001 Movies (3 videos · 700 B)
//!         Thumbnail: a.mp4
//!         001 Empty (1 video · 400 B)
//!             001 Deep (1 video · 400 B)
//!                 Thumbnail: c.mp4
//!     002 Pics (1 image · 800 B)
//!         Thumbnail: d.png
//! ```
//!
//! ## View
//!
//! ```text
//! 001 Movies/ (3 videos · 700 B)
//!     Source: /root/Movies
//! 002 d.png (image · 800 B)
//!     Source: /root/Pics/d.png
//!
//! 1 album, 1 file
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::album::{AlbumMap, AlbumStats};
use crate::path::{self, ROOT};
use crate::types::{DisplayItem, MediaFile, MediaKind};
use std::collections::HashMap;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count with one decimal above 1 KB.
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// `"1 image, 3 videos"`; zero counts are left out.
fn media_counts(stats: &AlbumStats) -> String {
    let parts: Vec<String> = [
        (stats.image_count, "image"),
        (stats.video_count, "video"),
        (stats.gif_count, "gif"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, noun)| plural(count, noun))
    .collect();
    if parts.is_empty() {
        "empty".to_string()
    } else {
        parts.join(", ")
    }
}

fn album_summary(stats: &AlbumStats) -> String {
    format!("({} \u{b7} {})", media_counts(stats), format_size(stats.total_size))
}

fn file_summary(file: &MediaFile) -> String {
    let kind = match file.kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
        MediaKind::Gif => "gif",
    };
    let hidden = if file.is_hidden() { ", hidden" } else { "" };
    format!("({}{} \u{b7} {})", kind, hidden, format_size(file.size))
}

// ============================================================================
// Index output
// ============================================================================

/// Format the summary of an index run.
pub fn format_index_output(files: &[MediaFile], root: &str) -> Vec<String> {
    let count = |kind: MediaKind| files.iter().filter(|f| f.kind == kind).count();
    vec![
        format!("Indexed {} under {}", plural(files.len(), "file"), root),
        format!("    images: {}", count(MediaKind::Image)),
        format!("    videos: {}", count(MediaKind::Video)),
        format!("    gifs: {}", count(MediaKind::Gif)),
        format!("    hidden: {}", files.iter().filter(|f| f.is_hidden()).count()),
    ]
}

/// Print index output to stdout.
pub fn print_index_output(files: &[MediaFile], root: &str) {
    for line in format_index_output(files, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Album tree output
// ============================================================================

/// Format the full album set as an indented tree.
///
/// Siblings are numbered in path order; the shallowest albums sit at depth 0.
/// Thumbnails are shown by file name for albums that have one.
pub fn format_album_tree(albums: &AlbumMap) -> Vec<String> {
    let mut ordered: Vec<_> = albums.iter().collect();
    // Segment-wise order keeps every subtree contiguous
    ordered.sort_by(|a, b| a.path.split('/').cmp(b.path.split('/')));

    let min_depth = ordered
        .iter()
        .map(|album| path::depth_of(&album.path))
        .min()
        .unwrap_or(0);
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut lines = Vec::new();

    for album in ordered {
        let parent = path::parent_of(&album.path).unwrap_or(ROOT);
        let position = positions.entry(parent).or_insert(0);
        *position += 1;

        let base_indent = indent(path::depth_of(&album.path) - min_depth);
        lines.push(format!(
            "{}{} {} {}",
            base_indent,
            format_index(*position),
            album.name(),
            album_summary(&album.stats)
        ));
        if album.has_own_files()
            && let Some(thumbnail) = &album.stats.thumbnail_path
        {
            lines.push(format!(
                "{}    Thumbnail: {}",
                base_indent,
                path::name_of(thumbnail)
            ));
        }
    }
    lines
}

/// Print the album tree to stdout.
pub fn print_album_tree(albums: &AlbumMap) {
    for line in format_album_tree(albums) {
        println!("{}", line);
    }
}

// ============================================================================
// Display list output
// ============================================================================

/// Format a display list in its final order, followed by a totals line.
pub fn format_display_list(items: &[DisplayItem]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let header = match item {
            DisplayItem::Album(album) => format!(
                "{} {}/ {}",
                format_index(i + 1),
                album.name,
                album_summary(&album.stats)
            ),
            DisplayItem::File(file) => {
                format!("{} {} {}", format_index(i + 1), file.name(), file_summary(file))
            }
        };
        lines.push(header);
        lines.push(format!("    Source: {}", item.path()));
    }

    let albums = items.iter().filter(|item| item.is_album()).count();
    lines.push(String::new());
    lines.push(format!(
        "{}, {}",
        plural(albums, "album"),
        plural(items.len() - albums, "file")
    ));
    lines
}

/// Print a display list to stdout.
pub fn print_display_list(items: &[DisplayItem]) {
    for line in format_display_list(items) {
        println!("{}", line);
    }
}
