//! Nested (branch) projection.
//!
//! Shows what lies beneath a target directory: the target's own files, plus
//! one album per populated branch below it.
//!
//! ## Branch Pruning
//!
//! Candidates are the albums strictly below the target that hold files
//! directly. A candidate survives only if no other candidate contains it, so
//! the shallowest populated directory on every branch wins and folds its
//! populated descendants into its own subtree totals. Empty intermediate
//! directories are never candidates, which collapses chains of them:
//!
//! ```text
//! A/               target
//! └── B/           no own files        → not a candidate
//!     └── C/       has files           → shown as "A/B/C"
//!
//! /root/           target
//! ├── Movies/      a.mp4 b.mp4         → shown, size = a + b + c
//! │   └── Empty/Deep/c.mp4             → contained by Movies, pruned
//! └── Pics/        d.png               → shown
//! ```
//!
//! A candidate's subtree lies entirely inside the target, so the aggregates
//! from [`aggregate`](crate::album::aggregate) already equal the
//! target-scoped ones.

use crate::album::{Album, AlbumMap};
use crate::path;
use crate::types::{AlbumView, DisplayItem};

/// Branch view below `target`, or below `root` when no target is given.
///
/// Albums come first in path order, then the target's own files in input
/// order.
pub fn project(albums: &AlbumMap, target: Option<&str>, root: &str) -> Vec<DisplayItem> {
    let target = target.unwrap_or(root);
    let branches = branches(albums, target);

    let mut items: Vec<DisplayItem> = branches
        .iter()
        .map(|album| DisplayItem::Album(AlbumView::from(*album)))
        .collect();
    if let Some(own) = albums.get(target) {
        items.extend(own.own_files.iter().cloned().map(DisplayItem::File));
    }
    items
}

/// Populated albums below `target` that have no populated ancestor below it.
pub fn branches<'a>(albums: &'a AlbumMap, target: &'a str) -> Vec<&'a Album> {
    let survivors: Vec<&Album> = albums
        .descendants_of(target)
        .filter(|album| album.has_own_files())
        .filter(|album| !has_populated_ancestor(albums, &album.path, target))
        .collect();

    debug_assert!(
        survivors.iter().all(|a| survivors
            .iter()
            .all(|b| !path::is_descendant(&a.path, &b.path))),
        "overlapping branches under {target}"
    );
    survivors
}

/// True when a populated album sits between `album_path` and `target`.
fn has_populated_ancestor(albums: &AlbumMap, album_path: &str, target: &str) -> bool {
    path::ancestors_of(album_path)
        .into_iter()
        .take_while(|ancestor| *ancestor != target)
        .any(|ancestor| albums.get(ancestor).is_some_and(Album::has_own_files))
}
