use std::path::{Path, PathBuf};

use crate::foundation::error::{TroopError, TroopResult};

/// Byte source for catalog-relative layer images.
///
/// This is the seam between the exporter and wherever sprite bytes live;
/// tests substitute in-memory sources with arbitrary completion timing.
pub trait LayerSource: Sync {
    /// Fetch the raw encoded bytes for a catalog-relative path.
    fn fetch(&self, rel_path: &str) -> TroopResult<Vec<u8>>;
}

#[derive(Clone, Debug)]
/// Filesystem-backed layer source rooted at the wardrobe assets directory.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source resolving catalog paths beneath `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative sprite paths.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LayerSource for FsSource {
    fn fetch(&self, rel_path: &str) -> TroopResult<Vec<u8>> {
        let norm = normalize_rel_path(rel_path)?;
        let path = self.root.join(Path::new(&norm));
        std::fs::read(&path)
            .map_err(|e| TroopError::load(format!("read layer '{}': {e}", path.display())))
    }
}

/// Normalize and validate catalog-relative sprite paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> TroopResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(TroopError::load("layer paths must be relative"));
    }
    if s.is_empty() {
        return Err(TroopError::load("layer path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(TroopError::load("layer paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(TroopError::load("layer path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
