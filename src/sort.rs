//! Display list ordering.
//!
//! ```text
//! 1. stable sort by key
//! 2. reverse the whole sequence when descending
//! 3. stable partition by item type (albums-first / files-first)
//! ```
//!
//! The partition never re-sorts: each side keeps the order step 2 left it in.
//!
//! Sorting by extension only orders files. Albums keep their relative order
//! and are placed ahead of the extension-sorted files before the direction is
//! applied, so a descending extension sort puts them last.

use crate::config::{PlaceFirst, SortConfig, SortKey};
use crate::types::DisplayItem;
use rand::seq::SliceRandom;

fn created(item: &DisplayItem) -> i64 {
    match item {
        DisplayItem::File(file) => file.created,
        DisplayItem::Album(album) => album.stats.earliest_creation.unwrap_or(0),
    }
}

fn modified(item: &DisplayItem) -> i64 {
    match item {
        DisplayItem::File(file) => file.modified,
        DisplayItem::Album(album) => album.stats.latest_modification.unwrap_or(0),
    }
}

fn size(item: &DisplayItem) -> u64 {
    match item {
        DisplayItem::File(file) => file.size,
        DisplayItem::Album(album) => album.stats.total_size,
    }
}

/// Albums untouched, then files ordered by lowercase extension.
fn sort_by_extension(items: Vec<DisplayItem>) -> Vec<DisplayItem> {
    let (mut albums, mut files): (Vec<_>, Vec<_>) =
        items.into_iter().partition(DisplayItem::is_album);
    files.sort_by_cached_key(|item| match item {
        DisplayItem::File(file) => file.extension(),
        DisplayItem::Album(_) => String::new(),
    });
    albums.append(&mut files);
    albums
}

fn place_first(items: Vec<DisplayItem>, policy: PlaceFirst) -> Vec<DisplayItem> {
    let albums_first = match policy {
        PlaceFirst::None => return items,
        PlaceFirst::AlbumsFirst => true,
        PlaceFirst::FilesFirst => false,
    };
    let (mut first, mut rest): (Vec<_>, Vec<_>) = items
        .into_iter()
        .partition(|item| item.is_album() == albums_first);
    first.append(&mut rest);
    first
}

/// Order `items` according to `config`.
pub fn apply(mut items: Vec<DisplayItem>, config: &SortConfig) -> Vec<DisplayItem> {
    match config.key {
        SortKey::Created => items.sort_by_key(created),
        SortKey::Modified => items.sort_by_key(modified),
        SortKey::Size => items.sort_by_key(size),
        SortKey::Name => items.sort_by_cached_key(|item| item.name().to_lowercase()),
        SortKey::Extension => items = sort_by_extension(items),
        SortKey::Random => items.shuffle(&mut rand::rng()),
    }
    if config.descending {
        items.reverse();
    }
    place_first(items, config.place_first)
}
