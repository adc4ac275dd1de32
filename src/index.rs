//! Filesystem media index.
//!
//! Produces the [`MediaFile`] records the engine consumes by walking a
//! directory tree. This is the only module that touches the disk besides
//! config loading; everything downstream works on the records alone.
//!
//! ## What Gets Indexed
//!
//! - Regular files whose extension is a known image, gif or video extension
//!   (case-insensitive). Everything else is ignored.
//! - Hidden directories and dotfiles are included; the engine decides what
//!   to show.
//! - Symlinks are not followed.
//!
//! Metadata (size, creation and modification time) is read in parallel on the
//! rayon pool. Platforms without creation times report `0` (unknown). Files
//! that disappear between listing and reading are skipped with a warning.
//!
//! ## Records File
//!
//! `index` stores its result as `records.json`, a versioned
//! [`RecordManifest`] the other commands load back. Bump
//! [`RECORDS_VERSION`] when the record layout changes.

use crate::config::IndexConfig;
use crate::path;
use crate::types::{MediaFile, MediaKind, Volume};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Records file version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// Version of the records file format.
pub const RECORDS_VERSION: u32 = 1;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "heic", "heif", "bmp", "tiff", "tif", "avif",
];
const GIF_EXTENSIONS: &[&str] = &["gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "3gp", "avi", "m4v"];

/// On-disk form of an index run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordManifest {
    pub version: u32,
    pub files: Vec<MediaFile>,
}

/// Media kind for a path, judged by extension.
pub fn kind_for(path: &str) -> Option<MediaKind> {
    let ext = path::extension_of(path);
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if GIF_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Gif)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Volume for `file_path`: secondary when it lies beneath a secondary root.
pub fn volume_for(file_path: &str, secondary_roots: &[String]) -> Volume {
    let secondary = secondary_roots
        .iter()
        .map(|root| root.trim_end_matches('/'))
        .any(|root| root.is_empty() || path::is_descendant(file_path, root));
    if secondary {
        Volume::Secondary
    } else {
        Volume::Primary
    }
}

fn unix_millis(time: io::Result<SystemTime>) -> i64 {
    time.ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

fn read_record(file_path: String, kind: MediaKind, config: &IndexConfig) -> Option<MediaFile> {
    let metadata = match fs::metadata(&file_path) {
        Ok(m) => m,
        Err(err) => {
            warn!(path = %file_path, error = %err, "skipping unreadable file");
            return None;
        }
    };
    let volume = volume_for(&file_path, &config.secondary_roots);
    Some(MediaFile {
        size: metadata.len(),
        created: unix_millis(metadata.created()),
        modified: unix_millis(metadata.modified()),
        volume,
        ..MediaFile::new(file_path, kind)
    })
}

/// Walk `root` and return one record per media file, sorted by path.
///
/// Record paths are absolute: `root` is canonicalized before walking.
pub fn scan_media(root: &Path, config: &IndexConfig) -> Result<Vec<MediaFile>, IndexError> {
    if !root.is_dir() {
        return Err(IndexError::NotADirectory(root.to_path_buf()));
    }
    let root = root.canonicalize()?;

    let mut candidates: Vec<(String, MediaKind)> = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_path = entry.path().to_string_lossy().into_owned();
        if let Some(kind) = kind_for(&file_path) {
            candidates.push((file_path, kind));
        }
    }
    debug!(root = %root.display(), candidates = candidates.len(), "walked media tree");

    let mut files: Vec<MediaFile> = candidates
        .into_par_iter()
        .filter_map(|(file_path, kind)| read_record(file_path, kind, config))
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    info!(
        root = %root.display(),
        files = files.len(),
        hidden = files.iter().filter(|f| f.is_hidden()).count(),
        "indexed media"
    );
    Ok(files)
}

/// Write `files` as a versioned records file.
pub fn save_records(path: &Path, files: &[MediaFile]) -> Result<(), IndexError> {
    let manifest = RecordManifest {
        version: RECORDS_VERSION,
        files: files.to_vec(),
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&manifest)?)?;
    Ok(())
}

/// Read a records file written by [`save_records`].
pub fn load_records(path: &Path) -> Result<Vec<MediaFile>, IndexError> {
    let content = fs::read_to_string(path)?;
    let manifest: RecordManifest = serde_json::from_str(&content)?;
    if manifest.version != RECORDS_VERSION {
        return Err(IndexError::Version {
            found: manifest.version,
            expected: RECORDS_VERSION,
        });
    }
    Ok(manifest.files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, bytes: usize) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0u8; bytes]).unwrap();
    }

    /// Temp dirs default to a `.tmp` prefix, which would hide every record.
    fn workspace() -> TempDir {
        tempfile::Builder::new()
            .prefix("gallery-index")
            .tempdir()
            .unwrap()
    }

    fn names(files: &[MediaFile]) -> Vec<&str> {
        files.iter().map(MediaFile::name).collect()
    }

    #[test]
    fn kind_by_extension() {
        assert_eq!(kind_for("/a/x.JPG"), Some(MediaKind::Image));
        assert_eq!(kind_for("/a/x.gif"), Some(MediaKind::Gif));
        assert_eq!(kind_for("/a/x.Mp4"), Some(MediaKind::Video));
        assert_eq!(kind_for("/a/x.txt"), None);
        assert_eq!(kind_for("/a/README"), None);
    }

    #[test]
    fn volume_from_secondary_roots() {
        let roots = vec!["/storage/sdcard1/".to_string()];
        assert_eq!(volume_for("/storage/sdcard1/DCIM/a.jpg", &roots), Volume::Secondary);
        assert_eq!(volume_for("/storage/sdcard10/a.jpg", &roots), Volume::Primary);
        assert_eq!(volume_for("/storage/emulated/0/a.jpg", &[]), Volume::Primary);
    }

    #[test]
    fn scan_finds_media_only() {
        let tmp = workspace();
        touch(tmp.path(), "Pics/a.jpg", 10);
        touch(tmp.path(), "Pics/notes.txt", 10);
        touch(tmp.path(), "Movies/b.mp4", 20);
        touch(tmp.path(), "Movies/Deep/c.gif", 30);

        let files = scan_media(tmp.path(), &IndexConfig::default()).unwrap();
        assert_eq!(names(&files), vec!["c.gif", "b.mp4", "a.jpg"]);
        assert_eq!(files[0].kind, MediaKind::Gif);
        assert_eq!(files[0].size, 30);
        assert_eq!(files[1].kind, MediaKind::Video);
    }

    #[test]
    fn scan_includes_hidden_directories() {
        let tmp = workspace();
        touch(tmp.path(), ".thumbnails/x.jpg", 1);
        touch(tmp.path(), "Pics/.secret.png", 1);
        touch(tmp.path(), "Pics/shown.png", 1);

        let files = scan_media(tmp.path(), &IndexConfig::default()).unwrap();
        assert_eq!(names(&files), vec!["x.jpg", ".secret.png", "shown.png"]);
        assert!(files[0].is_hidden());
        assert!(files[1].is_hidden());
        assert!(!files[2].is_hidden());
    }

    #[test]
    fn scan_paths_are_absolute() {
        let tmp = workspace();
        touch(tmp.path(), "Pics/a.jpg", 1);

        let files = scan_media(tmp.path(), &IndexConfig::default()).unwrap();
        let root = tmp.path().canonicalize().unwrap();
        assert!(files[0].path.starts_with(root.to_str().unwrap()));
        assert!(files[0].path.ends_with("Pics/a.jpg"));
        assert!(files[0].modified > 0);
    }

    #[test]
    fn scan_tags_secondary_volume() {
        let tmp = workspace();
        touch(tmp.path(), "internal/a.jpg", 1);
        touch(tmp.path(), "sdcard/b.jpg", 1);
        let sd = tmp.path().canonicalize().unwrap().join("sdcard");
        let config = IndexConfig {
            secondary_roots: vec![sd.to_string_lossy().into_owned()],
            ..IndexConfig::default()
        };

        let files = scan_media(tmp.path(), &config).unwrap();
        assert_eq!(files[0].volume, Volume::Primary);
        assert_eq!(files[1].volume, Volume::Secondary);
    }

    #[test]
    fn scan_missing_directory_is_error() {
        let tmp = workspace();
        let result = scan_media(&tmp.path().join("absent"), &IndexConfig::default());
        assert!(matches!(result, Err(IndexError::NotADirectory(_))));
    }

    #[test]
    fn records_survive_save_and_load() {
        let tmp = workspace();
        touch(tmp.path(), "Pics/a.jpg", 5);
        let files = scan_media(tmp.path(), &IndexConfig::default()).unwrap();

        let records = tmp.path().join("out/records.json");
        save_records(&records, &files).unwrap();
        assert_eq!(load_records(&records).unwrap(), files);
    }

    #[test]
    fn records_version_mismatch_is_error() {
        let tmp = workspace();
        let records = tmp.path().join("records.json");
        fs::write(&records, r#"{"version": 99, "files": []}"#).unwrap();

        assert!(matches!(
            load_records(&records),
            Err(IndexError::Version { found: 99, .. })
        ));
    }

    #[test]
    fn records_missing_metadata_defaults_to_zero() {
        let tmp = workspace();
        let records = tmp.path().join("records.json");
        fs::write(
            &records,
            r#"{"version": 1, "files": [{"path": "/a/b.jpg", "kind": "image"}]}"#,
        )
        .unwrap();

        let files = load_records(&records).unwrap();
        assert_eq!(files[0].size, 0);
        assert_eq!(files[0].created, 0);
        assert_eq!(files[0].volume, Volume::Primary);
    }
}
