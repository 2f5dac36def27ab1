pub mod hasher;
pub mod scorer;

pub use hasher::{CacheStats, ContentHasher};
pub use scorer::{choose_keep, files_to_remove, score_candidate};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::common::config::Config;
use crate::scanner::{Category, FileRecord};

/// Directories never searched for duplicates: build artifacts and
/// dependency trees produce huge, uninteresting matches
const SKIP_DIRS: &[&str] = &["__pycache__", "node_modules", ".git", ".svn", "venv", "env"];

/// Scratch suffixes excluded from duplicate detection
const SCRATCH_SUFFIXES: &[&str] = &[".tmp", ".temp", ".swp"];

/// Media, document, archive, and installer extensions worth comparing.
/// Files with no extension at all also pass.
const ALLOWED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp", // images
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", // video
    "mp3", "wav", "flac", "aac", "ogg", "wma", // audio
    "pdf", "doc", "docx", "txt", "rtf", // documents
    "zip", "rar", "7z", "tar", "gz", // archives
    "exe", "msi", "deb", "rpm", "iso", "img", // installers
];

/// A set of files sharing a size and a content fingerprint.
/// Always has at least two members. For files above the hasher's
/// large-file threshold the fingerprint is sampled, so membership
/// carries a small false-positive risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub fingerprint: String,
    pub size_bytes: u64,
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Bytes reclaimable if all but one member were removed
    pub fn wasted_bytes(&self) -> u64 {
        self.files.len().saturating_sub(1) as u64 * self.size_bytes
    }
}

struct Candidate {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
    accessed: Option<SystemTime>,
}

impl Candidate {
    fn into_record(self) -> FileRecord {
        FileRecord {
            path: self.path,
            size_bytes: self.size,
            modified: Some(self.modified),
            accessed: self.accessed,
            category: Category::Duplicate,
            description: "Duplicate file".to_string(),
        }
    }
}

/// Two-phase duplicate detection: bucket by exact size, then by
/// content fingerprint within multi-member size buckets. Grouping by
/// size first means the expensive hashing step never touches a file
/// whose size is unique.
pub struct DuplicateFinder {
    hasher: ContentHasher,
}

impl DuplicateFinder {
    pub fn new(hasher: ContentHasher) -> Self {
        Self { hasher }
    }

    pub fn with_defaults() -> Self {
        Self::new(ContentHasher::with_defaults())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ContentHasher::new(
            config.large_file_threshold_bytes(),
            config.sample_region_bytes(),
        ))
    }

    /// Find groups of content-identical files under `root`, sorted by
    /// projected reclaimable bytes descending
    pub fn find_duplicates(&mut self, root: &Path, min_size: u64) -> Result<Vec<DuplicateGroup>> {
        anyhow::ensure!(root.is_dir(), "not a directory: {}", root.display());

        let candidates = collect_candidates(root, min_size);
        debug!(candidates = candidates.len(), "collected duplicate candidates");

        let mut by_size: HashMap<u64, Vec<Candidate>> = HashMap::new();
        for candidate in candidates {
            by_size.entry(candidate.size).or_default().push(candidate);
        }
        by_size.retain(|_, v| v.len() > 1);

        let mut groups = Vec::new();
        for (size, bucket) in by_size {
            let mut by_hash: HashMap<String, Vec<Candidate>> = HashMap::new();
            for candidate in bucket {
                match self
                    .hasher
                    .fingerprint(&candidate.path, candidate.size, candidate.modified)
                {
                    Ok(fingerprint) => by_hash.entry(fingerprint).or_default().push(candidate),
                    Err(e) => {
                        // Unhashable files drop out of grouping, never abort it
                        debug!(path = %candidate.path.display(), "skipping unhashable file: {}", e);
                    }
                }
            }
            by_hash.retain(|_, v| v.len() > 1);

            for (fingerprint, members) in by_hash {
                groups.push(DuplicateGroup {
                    fingerprint,
                    size_bytes: size,
                    files: members.into_iter().map(Candidate::into_record).collect(),
                });
            }
        }

        // Largest projected savings first; fingerprint as a stable tie-break
        groups.sort_by(|a, b| {
            b.wasted_bytes()
                .cmp(&a.wasted_bytes())
                .then_with(|| a.fingerprint.cmp(&b.fingerprint))
        });
        Ok(groups)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.hasher.cache_stats()
    }

    pub fn clear_cache(&mut self) {
        self.hasher.clear_cache()
    }
}

/// Total bytes reclaimable across groups if one copy of each were kept
pub fn calculate_savings(groups: &[DuplicateGroup]) -> u64 {
    groups.iter().map(|g| g.wasted_bytes()).sum()
}

/// Collect comparison candidates: walk once, skipping hidden and
/// build/VCS directories, scratch files, and anything below the size
/// floor or outside the extension allow-list
fn collect_candidates(root: &Path, min_size: u64) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !e.file_type().is_dir() || {
                let name = e.file_name().to_string_lossy();
                !name.starts_with('.') && !SKIP_DIRS.contains(&name.as_ref())
            }
        })
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || SCRATCH_SUFFIXES.iter().any(|s| name.ends_with(s)) {
            continue;
        }
        if !extension_allowed(entry.path()) {
            continue;
        }

        let meta = match entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };
        if meta.len() < min_size || meta.len() == 0 {
            continue;
        }
        let modified = match meta.modified() {
            Ok(m) => m,
            Err(_) => continue,
        };

        candidates.push(Candidate {
            path: entry.path().to_path_buf(),
            size: meta.len(),
            modified,
            accessed: meta.accessed().ok(),
        });
    }

    candidates
}

fn extension_allowed(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allow_list() {
        assert!(extension_allowed(Path::new("/d/photo.JPG")));
        assert!(extension_allowed(Path::new("/d/movie.mkv")));
        assert!(extension_allowed(Path::new("/d/archive.tar")));
        assert!(extension_allowed(Path::new("/d/README")), "no extension passes");
        assert!(!extension_allowed(Path::new("/d/notes.md")));
        assert!(!extension_allowed(Path::new("/d/lib.so")));
    }

    #[test]
    fn test_wasted_bytes_of_empty_group() {
        let group = DuplicateGroup {
            fingerprint: "f".to_string(),
            size_bytes: 1000,
            files: vec![],
        };
        assert_eq!(group.wasted_bytes(), 0);
    }
}
