use std::path::PathBuf;

use thiserror::Error;

/// Typed failure kinds for filesystem operations.
/// `anyhow` handles top-level CLI errors; these cover the expected cases
/// bulk operations record per item, with the exact wording reports carry.
#[derive(Debug, Error)]
pub enum ReclaimError {
    /// Target path vanished between scan and action
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Access control blocked a read or delete, after any elevated retry
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while removing a path
    #[error("Error cleaning {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deletion refused for a protected system or home path
    #[error("Protected path, refusing to remove: {}", .path.display())]
    Protected { path: PathBuf },

    /// Backup directory has no readable manifest
    #[error("Backup info file not found in {}", .dir.display())]
    ManifestMissing { dir: PathBuf },

    /// A manifest entry points at a backup copy that no longer exists
    #[error("Backup file not found: {}", .path.display())]
    BackupMissing { path: PathBuf },

    /// Category name not present in the catalog
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}
