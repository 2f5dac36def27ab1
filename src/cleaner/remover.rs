use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::common::config::Config;
use crate::common::errors::ReclaimError;
use crate::common::safety;
use crate::duplicates::{scorer, DuplicateGroup};
use crate::scanner::walker;

/// Outcome of a batch removal. One entry per path that was actually
/// removed; failures land in `errors` and never abort the batch.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CleanupResult {
    pub cleaned_files: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub freed_space: u64,
}

impl CleanupResult {
    pub fn merge(&mut self, other: CleanupResult) {
        self.cleaned_files.extend(other.cleaned_files);
        self.errors.extend(other.errors);
        self.freed_space += other.freed_space;
    }
}

/// Remove the given files and directories permanently.
///
/// Each path is handled independently: a missing path, a protected
/// path, or a filesystem error turns into one error string and the
/// batch moves on. Sizes are captured before removal so `freed_space`
/// reflects what was actually reclaimed.
pub fn clean_files(paths: &[PathBuf], config: &Config) -> CleanupResult {
    let mut result = CleanupResult::default();

    for path in paths {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                result
                    .errors
                    .push(ReclaimError::NotFound { path: path.clone() }.to_string());
                continue;
            }
            Err(e) => {
                result.errors.push(
                    ReclaimError::Io {
                        path: path.clone(),
                        source: e,
                    }
                    .to_string(),
                );
                continue;
            }
        };

        if safety::is_protected(path) || config.is_excluded(path) {
            warn!("refusing to remove protected path: {}", path.display());
            result
                .errors
                .push(ReclaimError::Protected { path: path.clone() }.to_string());
            continue;
        }

        let is_dir = meta.is_dir();
        let size = if is_dir { walker::dir_size(path) } else { meta.len() };

        match remove_path(path, is_dir) {
            Ok(()) => {
                debug!("removed {}", path.display());
                result.cleaned_files.push(path.clone());
                result.freed_space += size;
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                // One retry through the shell so locked system files on
                // Windows get a second chance. Elsewhere this is final.
                if try_elevated_remove(path, is_dir) {
                    debug!("removed {} (elevated)", path.display());
                    result.cleaned_files.push(path.clone());
                    result.freed_space += size;
                } else {
                    result
                        .errors
                        .push(ReclaimError::PermissionDenied { path: path.clone() }.to_string());
                }
            }
            Err(e) => {
                result.errors.push(
                    ReclaimError::Io {
                        path: path.clone(),
                        source: e,
                    }
                    .to_string(),
                );
            }
        }
    }

    result
}

fn remove_path(path: &Path, is_dir: bool) -> std::io::Result<()> {
    if is_dir {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

#[cfg(windows)]
fn try_elevated_remove(path: &Path, is_dir: bool) -> bool {
    use std::process::Command;

    let output = if is_dir {
        Command::new("cmd")
            .args(["/c", "rmdir", "/s", "/q"])
            .arg(path)
            .output()
    } else {
        Command::new("cmd")
            .args(["/c", "del", "/f", "/q"])
            .arg(path)
            .output()
    };

    output.map(|o| o.status.success()).unwrap_or(false) && !path.exists()
}

#[cfg(not(windows))]
fn try_elevated_remove(_path: &Path, _is_dir: bool) -> bool {
    false
}

/// Outcome of removing redundant copies from duplicate groups.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DuplicateCleanupResult {
    pub removed_files: Vec<PathBuf>,
    pub kept_files: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub space_freed: u64,
}

/// Delete every file in each group except the scored keeper.
///
/// When a confirmation hook is supplied it is asked once per group
/// with the chosen keeper; a declined group is left untouched.
pub fn remove_duplicates(
    groups: &[DuplicateGroup],
    config: &Config,
    mut confirm: Option<&mut dyn FnMut(&DuplicateGroup, &PathBuf) -> bool>,
) -> DuplicateCleanupResult {
    let mut result = DuplicateCleanupResult::default();

    for group in groups {
        let keep = match scorer::choose_keep(group) {
            Some(keep) => keep.path.clone(),
            None => continue,
        };

        if let Some(hook) = confirm.as_deref_mut() {
            if !hook(group, &keep) {
                debug!("skipping group {} on user request", group.fingerprint);
                continue;
            }
        }

        let removal = clean_files(&scorer::files_to_remove(group), config);
        result.kept_files.push(keep);
        result.space_freed += removal.freed_space;
        result.removed_files.extend(removal.cleaned_files);
        result.errors.extend(removal.errors);
    }

    result
}
