//! Path helpers shared by every stage of the engine.
//!
//! Paths are plain `/`-separated strings, never `std::path::Path`: records come
//! from a media index that already normalized them, and the engine must behave
//! identically on every platform. A path never carries a trailing slash except
//! for the filesystem root itself.
//!
//! ## Root Sentinel
//!
//! [`ROOT`] (`/`) terminates every upward walk. [`parent_of`] returns `None`
//! for the root and for bare names without a separator, so ancestor walks
//! always stop, even for malformed input.
//!
//! ## Containment
//!
//! Containment is segment-aware: `/a/b` contains `/a/b/c` but not `/a/bc`.

/// The filesystem root. Ancestor walks stop here.
pub const ROOT: &str = "/";

/// Parent directory of `path`.
///
/// - `"/root/Pics/d.png"` → `Some("/root/Pics")`
/// - `"/d.png"` → `Some("/")`
/// - `"/"` → `None`
/// - `"d.png"` → `None`
pub fn parent_of(path: &str) -> Option<&str> {
    if path == ROOT {
        return None;
    }
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(0) => Some(ROOT),
        Some(idx) => Some(&trimmed[..idx]),
        None => None,
    }
}

/// Last segment of `path`. The root's name is the root itself.
pub fn name_of(path: &str) -> &str {
    if path == ROOT {
        return ROOT;
    }
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Lowercased extension of the last segment, without the dot.
///
/// Dotfiles without a further dot (`.nomedia`) have no extension.
pub fn extension_of(path: &str) -> String {
    let name = name_of(path);
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx + 1..].to_lowercase(),
    }
}

/// Strict ancestors of `path`, nearest first, excluding the root sentinel.
///
/// `"/a/b/c"` yields `["/a/b", "/a"]`.
pub fn ancestors_of(path: &str) -> Vec<&str> {
    let mut chain = Vec::new();
    let mut current = parent_of(path);
    while let Some(parent) = current {
        if parent == ROOT {
            break;
        }
        chain.push(parent);
        current = parent_of(parent);
    }
    chain
}

/// True when `path` lies strictly beneath `ancestor`.
pub fn is_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return path.starts_with('/') && path != ROOT;
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

/// True when any segment of `path` starts with a dot.
pub fn is_hidden(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}

/// `path` without trailing slashes. Slashes alone normalize to the root.
///
/// Album keys never end in `/`, so configured paths pass through here before
/// they are compared against them.
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        ROOT
    } else {
        trimmed
    }
}

/// Number of segments below the root: `/` is 0, `/a` is 1, `/a/b` is 2.
pub fn depth_of(path: &str) -> usize {
    path.split('/').filter(|segment| !segment.is_empty()).count()
}
