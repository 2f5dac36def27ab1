use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::common::config::Config;
use crate::common::errors::ReclaimError;
use crate::scanner::walker;

/// Side-car file describing what a backup directory contains.
pub const MANIFEST_FILE: &str = "backup_info.json";

const BACKUP_PREFIX: &str = "reclaim-backup-";

/// Record of one backup run, written next to the copies themselves so
/// a backup directory stays restorable on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupManifest {
    /// Creation time, persisted as Unix seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub files: Vec<BackupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupEntry {
    pub original: PathBuf,
    pub backup: PathBuf,
}

impl BackupManifest {
    /// Save the manifest into `dir` as pretty-printed JSON.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).context("Failed to serialize backup info")?;
        std::fs::write(&manifest_path, &json)
            .with_context(|| format!("Failed to write backup info: {}", manifest_path.display()))?;
        Ok(())
    }

    /// Load the manifest from `dir`. A directory without one is not a
    /// backup we made, so this is a hard error.
    pub fn load(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(ReclaimError::ManifestMissing { dir: dir.to_path_buf() }.into());
        }

        let contents = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read backup info: {}", manifest_path.display()))?;
        let manifest: BackupManifest = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse backup info: {}", manifest_path.display()))?;
        Ok(manifest)
    }
}

/// Flatten an absolute path into a single file name that cannot
/// collide with another flattened path or escape the backup directory.
pub fn flatten_name(path: &Path) -> String {
    path.display()
        .to_string()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect()
}

/// Copy the given files into a fresh timestamped backup directory and
/// return its path. Sources that vanished or are not regular files are
/// skipped; the manifest only lists copies that actually exist.
pub fn create_backup(paths: &[PathBuf], config: &Config) -> Result<PathBuf> {
    let now = Utc::now();
    let dir = config
        .backup_parent()
        .join(format!("{}{}", BACKUP_PREFIX, now.format("%Y%m%d-%H%M%S")));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create backup dir: {}", dir.display()))?;

    let mut manifest = BackupManifest {
        timestamp: now,
        files: Vec::new(),
    };

    for path in paths {
        if !path.is_file() {
            debug!("skipping backup of {} (not a regular file)", path.display());
            continue;
        }

        let backup_path = dir.join(flatten_name(path));
        match std::fs::copy(path, &backup_path) {
            Ok(_) => manifest.files.push(BackupEntry {
                original: path.clone(),
                backup: backup_path,
            }),
            Err(e) => warn!("could not back up {}: {}", path.display(), e),
        }
    }

    manifest.save(&dir)?;
    debug!("backed up {} files to {}", manifest.files.len(), dir.display());
    Ok(dir)
}

/// Outcome of a restore run. Individual misses are collected, not fatal.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RestoreResult {
    pub restored: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// Copy every file listed in a backup directory's manifest back to its
/// original location, recreating parent directories as needed.
pub fn restore_backup(dir: &Path) -> Result<RestoreResult> {
    let manifest = BackupManifest::load(dir)?;
    let mut result = RestoreResult::default();

    for entry in &manifest.files {
        if !entry.backup.exists() {
            result.errors.push(
                ReclaimError::BackupMissing {
                    path: entry.backup.clone(),
                }
                .to_string(),
            );
            continue;
        }

        if let Some(parent) = entry.original.parent() {
            if !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.errors.push(format!(
                        "Failed to create parent dir '{}': {}",
                        parent.display(),
                        e
                    ));
                    continue;
                }
            }
        }

        match std::fs::copy(&entry.backup, &entry.original) {
            Ok(_) => result.restored.push(entry.original.clone()),
            Err(e) => result.errors.push(format!(
                "Failed to restore '{}': {}",
                entry.original.display(),
                e
            )),
        }
    }

    Ok(result)
}

/// Summary info about an existing backup directory (for listing).
#[derive(Debug, Clone, Serialize)]
pub struct BackupSummary {
    pub dir: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub file_count: usize,
    pub total_bytes: u64,
}

/// List backup directories under the configured parent, most recent
/// first. Directories without a readable manifest are ignored.
pub fn list_backups(config: &Config) -> Result<Vec<BackupSummary>> {
    let parent = config.backup_parent();
    if !parent.exists() {
        return Ok(Vec::new());
    }

    let mut backups = Vec::new();

    for entry in std::fs::read_dir(&parent)
        .with_context(|| format!("Failed to read backup parent: {}", parent.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(BACKUP_PREFIX) {
            continue;
        }

        if let Ok(manifest) = BackupManifest::load(&path) {
            let total_bytes = walker::dir_size(&path);
            backups.push(BackupSummary {
                dir: path,
                timestamp: manifest.timestamp,
                file_count: manifest.files.len(),
                total_bytes,
            });
        }
    }

    backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(backups)
}

/// Most recent backup directory, if any exist.
pub fn most_recent_backup(config: &Config) -> Result<Option<PathBuf>> {
    let backups = list_backups(config)?;
    Ok(backups.into_iter().next().map(|b| b.dir))
}
