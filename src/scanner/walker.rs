use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::catalog::{CategorySpec, FileRecord};

/// Expand ~ shorthand and glob wildcards into concrete paths.
/// Bad patterns are reported and skipped, never fatal.
pub fn expand_patterns(patterns: &[String], errors: &mut Vec<String>) -> Vec<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let mut expanded = Vec::new();

    for pattern in patterns {
        let resolved = if let Some(rest) = pattern.strip_prefix("~/") {
            home.join(rest).display().to_string()
        } else {
            pattern.clone()
        };

        if resolved.contains('*') {
            match glob::glob(&resolved) {
                Ok(entries) => {
                    for entry in entries {
                        match entry {
                            Ok(path) => expanded.push(path),
                            Err(e) => debug!("glob entry unreadable under {}: {}", resolved, e),
                        }
                    }
                }
                Err(e) => {
                    warn!("bad pattern {}: {}", pattern, e);
                    errors.push(format!("Bad pattern {}: {}", pattern, e));
                }
            }
        } else {
            expanded.push(PathBuf::from(resolved));
        }
    }

    expanded
}

/// Walk one expanded root and collect the files the category's policy
/// admits. A root that is itself a file is sampled directly, bypassing
/// the name-based exclusions. Returns true if the result cap cut the
/// walk short.
pub fn collect_files(root: &Path, spec: &CategorySpec, records: &mut Vec<FileRecord>) -> bool {
    let policy = &spec.policy;

    if !root.exists() {
        return false;
    }

    if root.is_file() {
        if let Ok(meta) = root.metadata() {
            if policy.stat_ok(&meta) {
                records.push(FileRecord::new(root.to_path_buf(), &meta, spec));
            }
        }
        return false;
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .max_depth(policy.max_depth)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || policy.descends(&e.file_name().to_string_lossy())
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // Unreadable subtrees are simply omitted
                debug!("walk error under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if records.len() >= policy.cap {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };

        if policy.admits(&name, &meta) {
            records.push(FileRecord::new(entry.path().to_path_buf(), &meta, spec));
        }
    }

    false
}

/// Total size of a directory subtree
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().map(|m| m.len()).unwrap_or(0))
        .sum()
}
