//! The display pipeline.
//!
//! ```text
//! records ─ search ─→ aggregate ─→ flat | tree ─→ filter ─→ sort ─→ display list
//! ```
//!
//! [`Gallery`] owns one refresh worth of records together with their album
//! set. A refresh replaces both at once; nothing from the previous refresh
//! survives except through equal paths. Views without a search query reuse the
//! stored album set; a search narrows the records first and aggregates the
//! narrowed set, so album totals only count matching files.

use crate::album::{self, AlbumMap};
use crate::config::{GalleryConfig, ViewMode};
use crate::types::{DisplayItem, MediaFile};
use crate::{filter, flat, path, sort, tree};
use std::borrow::Cow;
use tracing::{debug, info};

/// Records whose path contains `query`, ignoring case.
///
/// A blank query keeps everything. Otherwise the query is matched as given,
/// surrounding spaces included.
pub fn search<'a>(files: &'a [MediaFile], query: &str) -> Cow<'a, [MediaFile]> {
    if query.trim().is_empty() {
        return Cow::Borrowed(files);
    }
    let needle = query.to_lowercase();
    Cow::Owned(
        files
            .iter()
            .filter(|file| file.path.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

/// Project, filter and sort an already aggregated album set.
pub fn display(albums: &AlbumMap, config: &GalleryConfig) -> Vec<DisplayItem> {
    let target = config.view.target.as_deref().map(path::normalize);
    let projected = match config.view.mode {
        ViewMode::Flat => flat::project(albums, target),
        ViewMode::Tree => tree::project(albums, target, path::normalize(&config.root)),
    };
    let projected_len = projected.len();
    let filtered = filter::apply(projected, &config.filter);
    let filtered_len = filtered.len();
    let items = sort::apply(filtered, &config.sort);

    debug!(
        mode = ?config.view.mode,
        target = target.unwrap_or("-"),
        projected = projected_len,
        filtered = filtered_len,
        sort = ?config.sort.key,
        "built display list"
    );
    items
}

/// Run the whole pipeline over raw records.
pub fn build(files: &[MediaFile], config: &GalleryConfig) -> Vec<DisplayItem> {
    let files = match config.view.search.as_deref() {
        Some(query) => search(files, query),
        None => Cow::Borrowed(files),
    };
    display(&album::aggregate(&files), config)
}

/// One refresh worth of records and the album set built from them.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    files: Vec<MediaFile>,
    albums: AlbumMap,
}

impl Gallery {
    pub fn new(files: Vec<MediaFile>) -> Self {
        let albums = album::aggregate(&files);
        Self { files, albums }
    }

    /// Replace the records and rebuild every album from scratch.
    pub fn refresh(&mut self, files: Vec<MediaFile>) {
        *self = Self::new(files);
        info!(
            files = self.files.len(),
            albums = self.albums.len(),
            "gallery refreshed"
        );
    }

    pub fn files(&self) -> &[MediaFile] {
        &self.files
    }

    pub fn albums(&self) -> &AlbumMap {
        &self.albums
    }

    /// Build the display list for `config`.
    pub fn view(&self, config: &GalleryConfig) -> Vec<DisplayItem> {
        match config.view.search.as_deref() {
            Some(query) if !query.trim().is_empty() => {
                let matching = search(&self.files, query);
                debug!(query, matching = matching.len(), "search narrowed records");
                display(&album::aggregate(&matching), config)
            }
            _ => display(&self.albums, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterConfig, PlaceFirst, SortConfig, SortKey};
    use crate::test_helpers::*;

    fn tree_config(target: Option<&str>) -> GalleryConfig {
        let mut config = GalleryConfig::default();
        config.view.mode = ViewMode::Tree;
        config.view.target = target.map(String::from);
        config
    }

    #[test]
    fn flat_root_view_lists_three_albums() {
        let items = build(&sample_library(), &GalleryConfig::default());
        // Sorted by name: Deep, Movies, Pics
        assert_eq!(
            item_paths(&items),
            vec!["/root/Movies/Empty/Deep", "/root/Movies", "/root/Pics"]
        );
    }

    #[test]
    fn tree_view_folds_nested_branches() {
        let items = build(&sample_library(), &tree_config(Some("/root")));
        assert_eq!(item_paths(&items), vec!["/root/Movies", "/root/Pics"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let files = sample_library();
        let found = search(&files, "movies/EMPTY");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "/root/Movies/Empty/Deep/c.mp4");
    }

    #[test]
    fn search_keeps_surrounding_spaces() {
        let files = sample_library();
        assert!(search(&files, " Deep").is_empty());
        assert!(search(&files, "Deep ").is_empty());
        assert_eq!(search(&files, "/deep").len(), 1);

        let files = vec![image("/a/Summer 2024/x.jpg", 1)];
        assert_eq!(search(&files, " 2024").len(), 1);
    }

    #[test]
    fn gallery_search_keeps_surrounding_spaces() {
        let gallery = Gallery::new(sample_library());
        let mut config = GalleryConfig::default();
        config.view.search = Some(" Pics".into());
        assert!(gallery.view(&config).is_empty());
    }

    #[test]
    fn unnormalized_target_matches_album_keys() {
        let mut config = tree_config(Some("/root/"));
        assert_eq!(
            item_paths(&build(&sample_library(), &config)),
            vec!["/root/Movies", "/root/Pics"]
        );

        config.view.mode = ViewMode::Flat;
        config.view.target = Some("/root/Movies/".into());
        assert_eq!(
            item_paths(&build(&sample_library(), &config)),
            vec!["/root/Movies/a.mp4", "/root/Movies/b.mp4"]
        );

        let mut config = tree_config(None);
        config.root = "/root/".into();
        assert_eq!(
            item_paths(&build(&sample_library(), &config)),
            vec!["/root/Movies", "/root/Pics"]
        );
    }

    #[test]
    fn blank_search_borrows_everything() {
        let files = sample_library();
        assert!(matches!(search(&files, "  "), Cow::Borrowed(_)));
    }

    #[test]
    fn search_narrows_album_totals() {
        let mut config = tree_config(Some("/root"));
        config.view.search = Some("a.mp4".into());
        let items = build(&sample_library(), &config);

        assert_eq!(item_paths(&items), vec!["/root/Movies"]);
        let DisplayItem::Album(movies) = &items[0] else {
            panic!("expected album");
        };
        assert_eq!(movies.stats.total_size, 100);
    }

    #[test]
    fn filter_and_sort_are_applied() {
        let mut config = GalleryConfig::default();
        config.view.target = Some("/root/Movies".into());
        config.sort = SortConfig {
            key: SortKey::Size,
            descending: true,
            place_first: PlaceFirst::None,
        };
        let items = build(&sample_library(), &config);
        assert_eq!(
            item_paths(&items),
            vec!["/root/Movies/b.mp4", "/root/Movies/a.mp4"]
        );

        config.filter = FilterConfig {
            videos: false,
            ..FilterConfig::default()
        };
        assert!(build(&sample_library(), &config).is_empty());
    }

    #[test]
    fn hidden_media_excluded_by_default() {
        let files = vec![image("/a/.trash/x.jpg", 1), image("/a/y.jpg", 1)];
        let items = build(&files, &GalleryConfig::default());
        assert_eq!(item_paths(&items), vec!["/a"]);

        let mut config = GalleryConfig::default();
        config.filter.hidden = true;
        let items = build(&files, &config);
        assert_eq!(item_paths(&items), vec!["/a/.trash", "/a"]);
    }

    #[test]
    fn gallery_view_matches_build() {
        let gallery = Gallery::new(sample_library());
        for config in [GalleryConfig::default(), tree_config(Some("/root"))] {
            assert_eq!(gallery.view(&config), build(gallery.files(), &config));
        }
    }

    #[test]
    fn gallery_search_reaggregates() {
        let gallery = Gallery::new(sample_library());
        let mut config = GalleryConfig::default();
        config.view.search = Some("PICS".into());
        assert_eq!(item_paths(&gallery.view(&config)), vec!["/root/Pics"]);
        // The stored album set is untouched
        assert_eq!(gallery.albums().len(), 5);
    }

    #[test]
    fn refresh_replaces_everything() {
        let mut gallery = Gallery::new(sample_library());
        gallery.refresh(vec![image("/other/z.jpg", 3)]);

        assert_eq!(gallery.files().len(), 1);
        assert_eq!(gallery.albums().paths().collect::<Vec<_>>(), vec!["/other"]);
    }

    #[test]
    fn empty_gallery_gives_empty_view() {
        let gallery = Gallery::default();
        assert!(gallery.view(&tree_config(None)).is_empty());
    }
}
