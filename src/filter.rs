//! Display list filtering.
//!
//! Filtering runs in three steps:
//!
//! ```text
//! kinds       ⋃ { items matching K }  for every enabled K in image, video, gif
//! visibility  ⋃ { items matching V }  for every enabled V in hidden, visible
//! result      kinds ∩ visibility, minus disabled item types (files / albums)
//! ```
//!
//! A file matches a kind through its own kind; an album matches when its
//! subtree holds at least one file of that kind. Visibility works the same way
//! through `hidden_count` / `visible_count`. Each union is de-duplicated by item
//! identity, so an album holding both images and videos appears once.
//!
//! A category with nothing enabled contributes the empty set: turning off all
//! kinds empties the list instead of disabling the filter.
//!
//! The result keeps the order of the kind union: items matching images first
//! (in input order), then newly matched videos, then gifs. Re-applying the
//! same configuration reproduces the same list.

use crate::config::FilterConfig;
use crate::types::{DisplayItem, ItemKey, MediaKind};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Hidden,
    Visible,
}

fn matches_kind(item: &DisplayItem, kind: MediaKind) -> bool {
    match item {
        DisplayItem::File(file) => file.kind == kind,
        DisplayItem::Album(album) => album.stats.count_of(kind) > 0,
    }
}

fn matches_visibility(item: &DisplayItem, visibility: Visibility) -> bool {
    match (item, visibility) {
        (DisplayItem::File(file), Visibility::Hidden) => file.is_hidden(),
        (DisplayItem::File(file), Visibility::Visible) => !file.is_hidden(),
        (DisplayItem::Album(album), Visibility::Hidden) => album.stats.hidden_count > 0,
        (DisplayItem::Album(album), Visibility::Visible) => album.stats.visible_count > 0,
    }
}

fn type_allowed(item: &DisplayItem, config: &FilterConfig) -> bool {
    match item {
        DisplayItem::File(_) => config.files,
        DisplayItem::Album(_) => config.albums,
    }
}

/// Indices of items matching any of `selectors`, de-duplicated by identity,
/// in selector-then-input order.
fn union<S: Copy>(
    items: &[DisplayItem],
    selectors: &[S],
    matches: impl Fn(&DisplayItem, S) -> bool,
) -> Vec<usize> {
    let mut seen: HashSet<ItemKey<'_>> = HashSet::new();
    let mut picked = Vec::new();
    for &selector in selectors {
        for (idx, item) in items.iter().enumerate() {
            if matches(item, selector) && seen.insert(item.key()) {
                picked.push(idx);
            }
        }
    }
    picked
}

/// Filter `items` according to `config`.
pub fn apply(items: Vec<DisplayItem>, config: &FilterConfig) -> Vec<DisplayItem> {
    let kinds: Vec<MediaKind> = [
        (config.images, MediaKind::Image),
        (config.videos, MediaKind::Video),
        (config.gifs, MediaKind::Gif),
    ]
    .into_iter()
    .filter_map(|(enabled, kind)| enabled.then_some(kind))
    .collect();

    let visibilities: Vec<Visibility> = [
        (config.hidden, Visibility::Hidden),
        (config.visible, Visibility::Visible),
    ]
    .into_iter()
    .filter_map(|(enabled, visibility)| enabled.then_some(visibility))
    .collect();

    let by_kind = union(&items, &kinds, matches_kind);
    let by_visibility: HashSet<usize> = union(&items, &visibilities, matches_visibility)
        .into_iter()
        .collect();

    let keep: Vec<usize> = by_kind
        .into_iter()
        .filter(|idx| by_visibility.contains(idx))
        .filter(|&idx| type_allowed(&items[idx], config))
        .collect();

    let mut slots: Vec<Option<DisplayItem>> = items.into_iter().map(Some).collect();
    keep.into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
