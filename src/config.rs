//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `gallery.toml`. Stock defaults are
//! serialized to a TOML table, the user file is merged on top key by key, and
//! the result is deserialized with unknown keys rejected.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! root = "/"                # Gallery root used by the tree view without a target
//!
//! [view]
//! mode = "flat"             # "flat" or "tree"
//! # target = "/storage/DCIM"  # Drill-down directory
//! # search = "holiday"        # Case-insensitive path filter
//!
//! [filter]
//! images = true
//! videos = true
//! gifs = true
//! hidden = false
//! visible = true
//! files = true
//! albums = true
//!
//! [sort]
//! key = "name"              # created, modified, name, extension, size, random
//! descending = false
//! place_first = "albums-first"  # none, albums-first, files-first
//!
//! [index]
//! secondary_roots = []      # Directories whose files live on the secondary volume
//! max_processes = 4         # Max parallel metadata readers (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [sort]
//! key = "size"
//! descending = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Which projector builds the display list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One level: every populated directory, or one directory's own files
    #[default]
    Flat,
    /// Branches: the shallowest populated directory on each branch below the target
    Tree,
}

/// Sort key for display lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation time (albums: earliest creation in the subtree)
    Created,
    /// Modification time (albums: latest modification in the subtree)
    Modified,
    /// Case-insensitive name
    #[default]
    Name,
    /// File extension; albums keep their order ahead of files
    Extension,
    /// Size in bytes (albums: subtree total)
    Size,
    /// Unseeded shuffle
    Random,
}

/// Which item type, if any, goes to the front after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceFirst {
    None,
    #[default]
    AlbumsFirst,
    FilesFirst,
}

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have defaults. User files need only specify the values they
/// want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Gallery root used by the tree view when no target is set.
    pub root: String,
    /// Projection mode and scope.
    pub view: ViewConfig,
    /// Kind, visibility and item-type selectors.
    pub filter: FilterConfig,
    /// Ordering of the display list.
    pub sort: SortConfig,
    /// Media index settings (CLI only).
    pub index: IndexConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            root: path::ROOT.to_string(),
            view: ViewConfig::default(),
            filter: FilterConfig::default(),
            sort: SortConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Strip trailing slashes from every configured path.
    pub fn normalize(&mut self) {
        self.root = path::normalize(&self.root).to_string();
        if let Some(target) = &mut self.view.target {
            *target = path::normalize(target).to_string();
        }
        for root in &mut self.index.secondary_roots {
            *root = path::normalize(root).to_string();
        }
    }

    /// Validate that every configured path is absolute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "root must be an absolute path, got '{}'",
                self.root
            )));
        }
        if let Some(target) = &self.view.target
            && !target.starts_with('/')
        {
            return Err(ConfigError::Validation(format!(
                "view.target must be an absolute path, got '{target}'"
            )));
        }
        if let Some(bad) = self
            .index
            .secondary_roots
            .iter()
            .find(|root| !root.starts_with('/'))
        {
            return Err(ConfigError::Validation(format!(
                "index.secondary_roots entries must be absolute paths, got '{bad}'"
            )));
        }
        Ok(())
    }
}

/// Projection mode and drill-down scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub mode: ViewMode,
    /// Directory to drill into. Absent means the root view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Case-insensitive substring every listed path must contain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Kind, visibility and item-type selectors.
///
/// Within the kind and visibility groups the enabled selectors are unioned;
/// a group with nothing enabled filters out everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub images: bool,
    pub videos: bool,
    pub gifs: bool,
    pub hidden: bool,
    pub visible: bool,
    pub files: bool,
    pub albums: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            images: true,
            videos: true,
            gifs: true,
            hidden: false,
            visible: true,
            files: true,
            albums: true,
        }
    }
}

/// Ordering of the display list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    pub key: SortKey,
    pub descending: bool,
    pub place_first: PlaceFirst,
}

/// Media index settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Files beneath these directories are tagged as secondary-volume media.
    pub secondary_roots: Vec<String>,
    /// Maximum number of parallel metadata readers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &IndexConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(GalleryConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let mut config: GalleryConfig = merged.try_into()?;
    config.normalize();
    config.validate()?;
    Ok(config)
}

/// Load config from the TOML file at `path`.
///
/// A missing file yields the stock defaults. An existing file is merged on
/// top of the defaults, checked for unknown keys, and validated.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Tree Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Gallery root. The tree view lists branches below this directory when no
# target is set. Must be an absolute path.
root = "/"

# ---------------------------------------------------------------------------
# View
# ---------------------------------------------------------------------------
[view]
# "flat": every directory holding media, one level deep.
# "tree": the shallowest populated directory on each branch below the target.
mode = "flat"

# Directory to drill into. Omit for the root view.
# target = "/storage/emulated/0/DCIM"

# Only list paths containing this text (case-insensitive).
# search = "holiday"

# ---------------------------------------------------------------------------
# Filter
# ---------------------------------------------------------------------------
# Kinds are unioned: an album passes if it holds any enabled kind.
# Disabling every kind (or both visibility options) empties the list.
[filter]
images = true
videos = true
gifs = true

# Hidden media lives under a path segment starting with a dot.
hidden = false
visible = true

# Item types to keep.
files = true
albums = true

# ---------------------------------------------------------------------------
# Sort
# ---------------------------------------------------------------------------
[sort]
# created, modified, name, extension, size, random
key = "name"
descending = false

# none, albums-first, files-first
place_first = "albums-first"

# ---------------------------------------------------------------------------
# Index
# ---------------------------------------------------------------------------
[index]
# Files beneath these directories are tagged as secondary-volume media.
secondary_roots = []

# Maximum parallel metadata readers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
