//! Sandboxed document store.

use crate::error::{StoreError, StoreResult};
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::instrument;

/// Metadata for an opened source document.
///
/// Existence and root containment have been verified; `modified` feeds the
/// preview cache key so stale entries become unreachable after a rewrite.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Resolves external identifiers against an immutable storage root.
///
/// All resolved paths are descendants of the root. Identifier validation
/// is purely string-level; rejected identifiers never touch the
/// filesystem. Symlink escapes, which strings cannot reveal, are caught at
/// open time by a canonical-ancestry check.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a raw relative-path identifier.
    ///
    /// Strips exactly one leading separator if present, rejects any
    /// identifier containing a parent-directory segment or a home
    /// reference, and joins the remainder onto the root. Rejection is a
    /// hard stop with no filesystem access.
    pub fn resolve_relative(&self, identifier: &str) -> StoreResult<PathBuf> {
        let trimmed = identifier
            .strip_prefix('/')
            .or_else(|| identifier.strip_prefix('\\'))
            .unwrap_or(identifier);
        validate_identifier(trimmed)?;
        Ok(self.root.join(trimmed))
    }

    /// Resolve a period+filename identifier to `root/period/filename`.
    ///
    /// Both components get the same traversal validation as raw paths. A
    /// missing period directory is not detected here; it surfaces as
    /// source-unavailable at open time.
    pub fn resolve_period(&self, period: &str, filename: &str) -> StoreResult<PathBuf> {
        validate_identifier(period)?;
        validate_identifier(filename)?;
        Ok(self.root.join(period).join(filename))
    }

    /// Open a resolved path, verifying existence and root containment.
    #[instrument(skip(self))]
    pub async fn open(&self, path: &Path) -> StoreResult<SourceFile> {
        let metadata = fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.display().to_string())
            } else {
                StoreError::Io(e)
            }
        })?;

        if !metadata.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }

        // Canonicalize both ends off the async runtime; a symlink inside
        // the root can point anywhere.
        let root = self.root.clone();
        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || verify_containment(&root, &target))
            .await
            .map_err(|e| StoreError::Io(std::io::Error::other(format!("join failed: {e}"))))??;

        Ok(SourceFile {
            path: path.to_path_buf(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }

    /// Read the full source document.
    #[instrument(skip(self))]
    pub async fn read(&self, path: &Path) -> StoreResult<Bytes> {
        let data = fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.display().to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    /// Verify the storage root exists and is a directory.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> StoreResult<()> {
        let metadata = fs::metadata(&self.root).await.map_err(|e| {
            StoreError::Io(std::io::Error::new(
                e.kind(),
                format!("storage root not accessible: {e}"),
            ))
        })?;

        if !metadata.is_dir() {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("storage root is not a directory: {:?}", self.root),
            )));
        }

        Ok(())
    }
}

/// String-level identifier validation. Performs no filesystem access.
fn validate_identifier(identifier: &str) -> StoreResult<()> {
    if identifier.is_empty() {
        return Err(StoreError::InvalidPath("empty identifier".to_string()));
    }
    if identifier.contains('~') {
        return Err(StoreError::InvalidPath(format!(
            "home reference not allowed: {identifier}"
        )));
    }
    if identifier.contains("..") {
        return Err(StoreError::InvalidPath(format!(
            "path traversal not allowed: {identifier}"
        )));
    }
    for component in Path::new(identifier).components() {
        match component {
            Component::Normal(_) => {}
            _ => {
                return Err(StoreError::InvalidPath(format!(
                    "contains unsafe path component: {identifier}"
                )));
            }
        }
    }
    Ok(())
}

/// Canonicalize an existing path and verify it stays under the root.
fn verify_containment(root: &Path, path: &Path) -> StoreResult<()> {
    let root_canonical = root.canonicalize().map_err(|e| {
        StoreError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to canonicalize root: {e}"),
        ))
    })?;
    let canonical = path.canonicalize().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound(path.display().to_string())
        } else {
            StoreError::Io(e)
        }
    })?;
    if !canonical.starts_with(&root_canonical) {
        return Err(StoreError::InvalidPath(format!(
            "resolved path escapes storage root: {}",
            path.display()
        )));
    }
    Ok(())
}
