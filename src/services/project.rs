//! Project root discovery.
//!
//! The search root is the closest ancestor of the starting directory that
//! carries a version-control or project marker. When no marker is found the
//! starting directory itself is used.
//!
//! ```ignore
//! use globscope::services::project::detect_project_root;
//!
//! let root = detect_project_root(Utf8Path::new("/work/project/src/bin"));
//! assert_eq!(root, Utf8PathBuf::from("/work/project"));
//! ```

use camino::{Utf8Path, Utf8PathBuf};

/// Files or directories that mark a project root, checked in this order
pub const PROJECT_MARKERS: [&str; 5] = [".git", ".hg", ".svn", "Cargo.toml", ".projectile"];

/// Find the marker that makes `dir` a project root, if any
pub fn find_marker(dir: &Utf8Path) -> Option<&'static str> {
    PROJECT_MARKERS
        .into_iter()
        .find(|marker| dir.join(marker).exists())
}

/// Walk upward from `start` to the nearest directory containing a project marker
pub fn detect_project_root(start: &Utf8Path) -> Utf8PathBuf {
    for dir in start.ancestors() {
        if let Some(marker) = find_marker(dir) {
            tracing::info!("Detected project root {} (marker: {})", dir, marker);
            return dir.to_path_buf();
        }
    }

    tracing::info!("No project marker above {}, searching from it directly", start);
    start.to_path_buf()
}
