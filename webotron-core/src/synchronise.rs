//! Directory-to-bucket synchronisation.
//!
//! Walks a local directory tree and uploads every regular file to a bucket,
//! keyed by its path relative to the root. This is a one-way push: objects are
//! created or overwritten, never deleted, so running it twice against an
//! unchanged tree leaves the bucket in the same state as running it once.
//!
//! # Responsibilities
//! - Resolve the user-supplied root (`~` expansion, canonical absolute path)
//! - Traverse with an explicit stack of pending directories (no recursion)
//! - Upload regular files only; symlinks, devices, sockets and fifos are skipped
//! - Fail fast: the first I/O or upload error ends the run and is returned unchanged
//!
//! # Navigation
//! - Main entrypoint: [`synchronise`]
//! - Supporting items: [`resolve_root`], [`SyncReport`]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::contract::{BucketStore, StorageError};
use crate::upload::upload_file;

/// Outcome of a successful synchronisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub bucket: String,
    /// Objects uploaded, in upload order.
    pub uploaded: Vec<UploadedObject>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedObject {
    pub key: String,
    pub content_type: String,
}

/// Expand a leading `~` and canonicalise `pathname`.
///
/// Fails if the path does not exist or is not a directory.
pub fn resolve_root(pathname: &Path) -> io::Result<PathBuf> {
    let expanded = expand_home(pathname);
    let root = fs::canonicalize(&expanded).map_err(|e| {
        error!(path = %expanded.display(), error = %e, "Sync root cannot be resolved");
        io::Error::new(
            e.kind(),
            format!("cannot resolve {}: {e}", expanded.display()),
        )
    })?;

    if !root.is_dir() {
        error!(path = %root.display(), "Sync root is not a directory");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", root.display()),
        ));
    }

    debug!(root = %root.display(), "Resolved sync root");
    Ok(root)
}

fn expand_home(pathname: &Path) -> PathBuf {
    let mut components = pathname.components();
    match components.next() {
        Some(first) if first.as_os_str() == "~" => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(components.as_path()),
            None => pathname.to_path_buf(),
        },
        _ => pathname.to_path_buf(),
    }
}

/// Upload every regular file under `root` to `bucket`.
///
/// `root` should already be resolved (see [`resolve_root`]). Entries within a
/// directory are visited in file-name order; files of a directory are uploaded
/// before its sub-directories are entered.
pub async fn synchronise<S>(
    store: &S,
    root: &Path,
    bucket: &str,
) -> Result<SyncReport, StorageError>
where
    S: BucketStore + ?Sized,
{
    info!(root = %root.display(), bucket, "[SYNC] Starting directory synchronisation");

    let mut uploaded = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        debug!(dir = %dir.display(), "[SYNC] Visiting directory");
        let mut entries = fs::read_dir(&dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type()?;

            if file_type.is_dir() {
                subdirs.push(path);
            } else if file_type.is_file() {
                let key = relative_key(root, &path)?;
                let content_type = upload_file(store, bucket, &path, &key).await?;
                uploaded.push(UploadedObject {
                    key,
                    content_type: content_type.to_string(),
                });
            } else {
                debug!(path = %path.display(), "[SYNC] Skipping entry that is neither file nor directory");
            }
        }

        // Reversed so the stack pops sub-directories in name order.
        pending.extend(subdirs.into_iter().rev());
    }

    info!(bucket, count = uploaded.len(), "[SYNC] Synchronisation complete");
    Ok(SyncReport {
        bucket: bucket.to_string(),
        uploaded,
    })
}

/// Object key for `path`: its path relative to `root`, platform separators kept.
fn relative_key(root: &Path, path: &Path) -> Result<String, StorageError> {
    let relative = path.strip_prefix(root)?;
    match relative.to_str() {
        Some(key) => Ok(key.to_string()),
        None => {
            error!(path = %path.display(), "[SYNC][ERROR] Path is not valid UTF-8");
            Err(format!("path is not valid UTF-8: {}", path.display()).into())
        }
    }
}
