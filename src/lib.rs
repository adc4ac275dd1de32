//! # Gallery Tree
//!
//! Turns a flat list of media records (images, videos, gifs) into albums and
//! builds the display lists a gallery browser shows. Every directory that holds
//! media, directly or further down, is an album carrying totals for its whole
//! subtree: file counts per kind, byte size, date extremes and a thumbnail.
//!
//! # Architecture: Records In, Display List Out
//!
//! ```text
//! 1. Index      media dir  →  records.json   (filesystem → MediaFile records)
//! 2. Aggregate  records    →  AlbumMap       (directory → subtree totals)
//! 3. View       AlbumMap   →  display list   (project → filter → sort)
//! ```
//!
//! Only the index stage touches the disk. Aggregation and every view stage are
//! pure functions over in-memory values, so the whole engine is tested without
//! a filesystem and a gallery can be rebuilt from scratch on every refresh.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`index`] | Walks a media directory into `MediaFile` records; reads and writes `records.json` |
//! | [`album`] | Groups records by directory and aggregates subtree totals into an `AlbumMap` |
//! | [`flat`] | Flat projection: every populated album, or one album's own files |
//! | [`tree`] | Tree projection: the shallowest populated album on each branch below a target |
//! | [`filter`] | Kind, visibility and item-type selectors |
//! | [`sort`] | Stable ordering by key, direction and albums/files-first placement |
//! | [`view`] | The pipeline gluing projection, filter and sort; owns [`Gallery`] |
//! | [`config`] | `gallery.toml` loading, merging and validation |
//! | [`types`] | Records and display items shared by every stage |
//! | [`path`] | `/`-separated path helpers: parents, ancestors, containment |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Paths Are Strings
//!
//! Records identify media by absolute `/`-separated path strings rather than
//! `std::path::PathBuf`. Albums are keyed by those strings in a `BTreeMap`, so
//! iteration order is deterministic and every parent lookup is a map lookup.
//!
//! ## Rebuild, Don't Patch
//!
//! A refresh re-aggregates everything from the new records. Aggregation is a
//! single walk up each file's ancestor chain (`O(files × depth)`), which is cheap
//! next to reading the records, and it means no stale totals can survive.
//!
//! ## Stable Sorting
//!
//! Every sort is stable and the albums/files-first step is a stable partition,
//! so items with equal keys keep the order the projection produced them in.

pub mod album;
pub mod config;
pub mod filter;
pub mod flat;
pub mod index;
pub mod output;
pub mod path;
pub mod sort;
pub mod tree;
pub mod types;
pub mod view;

pub use album::{Album, AlbumMap, AlbumStats, aggregate};
pub use config::GalleryConfig;
pub use types::{AlbumView, DisplayItem, MediaFile, MediaKind, Volume};
pub use view::Gallery;

#[cfg(test)]
pub(crate) mod test_helpers;
