use std::fs::Metadata;
use std::time::{Duration, SystemTime};

/// Well-known filenames that must never be proposed for removal
pub const DEFAULT_SKIP_NAMES: &[&str] = &["core", "lost+found"];

/// Suffixes marking coordination or in-use files
pub const DEFAULT_SKIP_SUFFIXES: &[&str] = &[".lock", ".pid", ".socket"];

/// Live browser database artifacts; removing these corrupts open profiles
pub const BROWSER_SKIP_NAMES: &[&str] = &[
    "core", "lost+found", "LOCK", "index", "data_0", "data_1", "data_2", "data_3",
];

pub const BROWSER_SKIP_SUFFIXES: &[&str] = &[".lock", ".pid", ".socket", ".db-wal", ".db-shm"];

/// Files touched within this window are treated as in use
pub const RECENT_GRACE: Duration = Duration::from_secs(3600);

/// Per-category file admission policy. The walker itself knows nothing
/// about categories or platforms; the catalog builds one of these per
/// category and the scanner applies it.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    /// Walk depth cap relative to each expanded pattern root
    pub max_depth: usize,

    /// Skip files modified more recently than this many days ago
    pub min_age_days: Option<u32>,

    /// Skip files smaller than this many bytes
    pub min_size: u64,

    /// Temp-like roots: files touched within the last hour are always
    /// excluded, whatever the other rules say
    pub recent_grace: bool,

    /// Exact filenames excluded from results
    pub skip_names: &'static [&'static str],

    /// Filename suffixes excluded from results
    pub skip_suffixes: &'static [&'static str],

    /// Directory names the walk never descends into (platform denylist
    /// plus category-specific entries, composed by the catalog)
    pub skip_dirs: &'static [&'static str],

    /// Soft result cap per scan; hitting it marks the scan truncated
    pub cap: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            max_depth: 3,
            min_age_days: None,
            min_size: 0,
            recent_grace: false,
            skip_names: DEFAULT_SKIP_NAMES,
            skip_suffixes: DEFAULT_SKIP_SUFFIXES,
            skip_dirs: &[],
            cap: 300,
        }
    }
}

impl FilterPolicy {
    /// Name-based checks: hidden files, excluded names, excluded suffixes
    pub fn name_ok(&self, name: &str) -> bool {
        !name.starts_with('.')
            && !self.skip_names.contains(&name)
            && !self.skip_suffixes.iter().any(|s| name.ends_with(s))
    }

    /// Metadata-based checks: size floor, age floor, in-use grace window.
    /// Applied to every candidate, including single-file patterns.
    pub fn stat_ok(&self, meta: &Metadata) -> bool {
        if meta.len() < self.min_size {
            return false;
        }

        let age = match meta.modified() {
            Ok(modified) => SystemTime::now().duration_since(modified).unwrap_or_default(),
            Err(_) => return false,
        };

        if self.recent_grace && age < RECENT_GRACE {
            return false;
        }
        if let Some(days) = self.min_age_days {
            if age.as_secs() < u64::from(days) * 86_400 {
                return false;
            }
        }

        true
    }

    /// Full admission test for a file found during a directory walk
    pub fn admits(&self, name: &str, meta: &Metadata) -> bool {
        self.name_ok(name) && self.stat_ok(meta)
    }

    /// Whether the walk may descend into a directory with this name
    pub fn descends(&self, name: &str) -> bool {
        !name.starts_with('.') && !self.skip_dirs.contains(&name)
    }
}
