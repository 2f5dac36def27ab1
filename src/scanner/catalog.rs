use std::fs::Metadata;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::filter::{FilterPolicy, BROWSER_SKIP_NAMES, BROWSER_SKIP_SUFFIXES};
use crate::common::errors::ReclaimError;

// ─── Core types ───────────────────────────────────────────────────────────────

/// Cleanup category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TempFiles,
    UserCache,
    SystemLogs,
    OldDownloads,
    BrowserCache,
    Thumbnails,
    CrashDumps,
    DevCache,
    AppCache,
    /// Produced by the duplicate finder, not by catalog scans
    Duplicate,
}

impl Category {
    /// Short name used on the command line and in config files
    pub fn slug(&self) -> &'static str {
        match self {
            Category::TempFiles => "temp",
            Category::UserCache => "cache",
            Category::SystemLogs => "logs",
            Category::OldDownloads => "downloads",
            Category::BrowserCache => "browser",
            Category::Thumbnails => "thumbnails",
            Category::CrashDumps => "crash-dumps",
            Category::DevCache => "dev-cache",
            Category::AppCache => "app-cache",
            Category::Duplicate => "duplicate",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::TempFiles => write!(f, "Temporary Files"),
            Category::UserCache => write!(f, "User Cache"),
            Category::SystemLogs => write!(f, "System Logs"),
            Category::OldDownloads => write!(f, "Old Downloads"),
            Category::BrowserCache => write!(f, "Browser Cache"),
            Category::Thumbnails => write!(f, "Thumbnails"),
            Category::CrashDumps => write!(f, "Crash Dumps"),
            Category::DevCache => write!(f, "Developer Cache"),
            Category::AppCache => write!(f, "Application Cache"),
            Category::Duplicate => write!(f, "Duplicate"),
        }
    }
}

/// A single file flagged by a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub category: Category,
    pub description: String,
}

impl FileRecord {
    pub fn new(path: PathBuf, meta: &Metadata, spec: &CategorySpec) -> Self {
        Self {
            path,
            size_bytes: meta.len(),
            modified: meta.modified().ok(),
            accessed: meta.accessed().ok(),
            category: spec.category,
            description: spec.description.to_string(),
        }
    }
}

/// Aggregate result of one scan invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the scan was performed
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// How long the scan took in seconds
    pub duration_secs: f64,

    /// All files flagged for cleanup
    pub records: Vec<FileRecord>,

    /// Total reclaimable bytes
    pub total_bytes: u64,

    /// Result caps were hit; the record list is not exhaustive
    pub truncated: bool,

    /// Per-pattern errors encountered during the scan
    pub errors: Vec<String>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            duration_secs: 0.0,
            records: Vec::new(),
            total_bytes: 0,
            truncated: false,
            errors: Vec::new(),
        }
    }

    /// Recalculate the byte total from the record list
    pub fn recalculate(&mut self) {
        self.total_bytes = self.records.iter().map(|r| r.size_bytes).sum();
    }

    /// Per-category (count, bytes) totals, largest first
    pub fn totals_by_category(&self) -> Vec<(Category, usize, u64)> {
        let mut totals: Vec<(Category, usize, u64)> = Vec::new();
        for record in &self.records {
            match totals.iter_mut().find(|(c, _, _)| *c == record.category) {
                Some((_, count, bytes)) => {
                    *count += 1;
                    *bytes += record.size_bytes;
                }
                None => totals.push((record.category, 1, record.size_bytes)),
            }
        }
        totals.sort_by(|a, b| b.2.cmp(&a.2));
        totals
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

/// One category's scan definition: where to look and what to admit
#[derive(Debug, Clone)]
pub struct CategorySpec {
    pub category: Category,
    pub description: &'static str,
    /// Path patterns with ~ shorthand; * segments are glob-expanded
    pub patterns: Vec<String>,
    pub policy: FilterPolicy,
}

/// The platform's category→patterns table, selected once at startup.
/// Everything downstream works against this map and never asks which
/// platform it is running on.
#[derive(Debug, Clone)]
pub struct PathCatalog {
    specs: Vec<CategorySpec>,
}

impl PathCatalog {
    /// Build the catalog for the current platform
    pub fn for_platform() -> Self {
        let specs = if cfg!(windows) {
            windows_specs()
        } else {
            unix_specs()
        };
        Self { specs }
    }

    /// Build a catalog from explicit specs instead of the platform table
    pub fn from_specs(specs: Vec<CategorySpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[CategorySpec] {
        &self.specs
    }

    /// Look up a category by its slug
    pub fn get(&self, slug: &str) -> Result<&CategorySpec, ReclaimError> {
        self.specs
            .iter()
            .find(|s| s.category.slug() == slug)
            .ok_or_else(|| ReclaimError::UnknownCategory(slug.to_string()))
    }
}

// Directory names the temp walk never enters: user-service state that
// deleting breaks running sessions.
const UNIX_TEMP_SKIP_DIRS: &[&str] = &["systemd", "dbus", "fontconfig", "pulse", "snap-private-tmp"];

// Cache subtrees that are state, not cache, despite living in ~/.cache
const UNIX_CACHE_SKIP_DIRS: &[&str] = &[
    "dconf",
    "gstreamer-1.0",
    "mesa_shader_cache",
    "fontconfig",
    "thumbnails",
];

const WINDOWS_SKIP_DIRS: &[&str] = &[
    "System Volume Information",
    "$RECYCLE.BIN",
    "Windows",
    "Program Files",
    "Program Files (x86)",
    "WinSxS",
];

/// Category table for Unix-like systems
fn unix_specs() -> Vec<CategorySpec> {
    vec![
        CategorySpec {
            category: Category::TempFiles,
            description: "Temporary files and trash",
            patterns: vec![
                "/tmp".into(),
                "/var/tmp".into(),
                "~/.cache".into(),
                "~/.local/share/Trash/files".into(),
                "~/.local/share/recently-used.xbel".into(),
            ],
            policy: FilterPolicy {
                recent_grace: true,
                skip_dirs: UNIX_TEMP_SKIP_DIRS,
                cap: 500,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::UserCache,
            description: "Browser and package manager cache files",
            patterns: vec![
                "~/.cache/google-chrome".into(),
                "~/.cache/chromium".into(),
                "~/.cache/mozilla".into(),
                "~/.cache/microsoft-edge".into(),
                "~/.cache/opera".into(),
                "~/.cache/vivaldi".into(),
                "~/.cache/pip".into(),
                "~/.cache/yarn".into(),
                "~/.cache/composer".into(),
            ],
            policy: FilterPolicy {
                min_size: 1024,
                skip_dirs: UNIX_CACHE_SKIP_DIRS,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::SystemLogs,
            description: "System log files older than a week",
            patterns: vec![
                "/var/log/*.log".into(),
                "/var/log/*.log.*".into(),
                "/var/log/syslog.*".into(),
                "~/.xsession-errors".into(),
                "~/.xsession-errors.old".into(),
            ],
            policy: FilterPolicy {
                max_depth: 1,
                min_age_days: Some(7),
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::OldDownloads,
            description: "Downloads untouched for 30 days",
            patterns: vec!["~/Downloads".into()],
            policy: FilterPolicy {
                max_depth: 1,
                min_age_days: Some(30),
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::BrowserCache,
            description: "Browser cache files",
            patterns: vec![
                "~/.cache/google-chrome/Default/Cache".into(),
                "~/.cache/chromium/Default/Cache".into(),
                "~/.cache/mozilla/firefox/*/cache2".into(),
                "~/.config/microsoft-edge/Default/Cache".into(),
            ],
            policy: FilterPolicy {
                max_depth: 2,
                min_size: 1024,
                skip_names: BROWSER_SKIP_NAMES,
                skip_suffixes: BROWSER_SKIP_SUFFIXES,
                cap: 150,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::Thumbnails,
            description: "Thumbnail cache files",
            patterns: vec!["~/.thumbnails".into(), "~/.cache/thumbnails".into()],
            policy: FilterPolicy::default(),
        },
        CategorySpec {
            category: Category::CrashDumps,
            description: "Crash dump and error report files",
            patterns: vec!["/var/crash".into(), "~/.local/share/apport".into()],
            policy: FilterPolicy {
                max_depth: 2,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::DevCache,
            description: "Development tool caches",
            patterns: vec![
                "~/.npm/_cacache".into(),
                "~/.cargo/registry/cache".into(),
                "~/.gradle/caches/modules-2".into(),
                "~/.m2/repository".into(),
                "~/.cache/go-build".into(),
            ],
            policy: FilterPolicy {
                min_size: 1024,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::AppCache,
            description: "Desktop application caches",
            patterns: vec![
                "~/.cache/spotify".into(),
                "~/.config/discord/Cache".into(),
                "~/.config/Code/Cache".into(),
                "~/.config/Code/CachedData".into(),
                "~/.local/share/Steam/appcache/httpcache".into(),
            ],
            policy: FilterPolicy::default(),
        },
    ]
}

/// Category table for Windows
fn windows_specs() -> Vec<CategorySpec> {
    vec![
        CategorySpec {
            category: Category::TempFiles,
            description: "Temporary files",
            patterns: vec![
                "~/AppData/Local/Temp".into(),
                "C:/Windows/Temp".into(),
            ],
            policy: FilterPolicy {
                recent_grace: true,
                skip_dirs: WINDOWS_SKIP_DIRS,
                cap: 500,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::UserCache,
            description: "Package manager cache files",
            patterns: vec![
                "~/AppData/Local/pip/cache".into(),
                "~/AppData/Local/npm-cache".into(),
                "~/AppData/Local/Yarn/Cache".into(),
                "~/AppData/Local/go-build".into(),
                "~/AppData/Local/Composer".into(),
            ],
            policy: FilterPolicy {
                min_size: 1024,
                skip_dirs: WINDOWS_SKIP_DIRS,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::SystemLogs,
            description: "System log files older than a week",
            patterns: vec![
                "C:/Windows/Logs/CBS/*.log".into(),
                "C:/Windows/Temp/*.log".into(),
            ],
            policy: FilterPolicy {
                max_depth: 1,
                min_age_days: Some(7),
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::OldDownloads,
            description: "Downloads untouched for 30 days",
            patterns: vec!["~/Downloads".into()],
            policy: FilterPolicy {
                max_depth: 1,
                min_age_days: Some(30),
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::BrowserCache,
            description: "Browser cache files",
            patterns: vec![
                "~/AppData/Local/Google/Chrome/User Data/Default/Cache".into(),
                "~/AppData/Local/Microsoft/Edge/User Data/Default/Cache".into(),
                "~/AppData/Local/BraveSoftware/Brave-Browser/User Data/Default/Cache".into(),
                "~/AppData/Roaming/Opera Software/Opera Stable/Cache".into(),
                "~/AppData/Local/Mozilla/Firefox/Profiles/*/cache2".into(),
            ],
            policy: FilterPolicy {
                max_depth: 2,
                min_size: 1024,
                skip_names: BROWSER_SKIP_NAMES,
                skip_suffixes: BROWSER_SKIP_SUFFIXES,
                cap: 150,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::Thumbnails,
            description: "Explorer thumbnail cache files",
            patterns: vec![
                "~/AppData/Local/Microsoft/Windows/Explorer/thumbcache_*.db".into(),
            ],
            policy: FilterPolicy {
                max_depth: 1,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::CrashDumps,
            description: "Crash dump files",
            patterns: vec![
                "~/AppData/Local/CrashDumps".into(),
                "C:/Windows/Minidump".into(),
            ],
            policy: FilterPolicy {
                max_depth: 2,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::DevCache,
            description: "Development tool caches",
            patterns: vec![
                "~/AppData/Local/npm-cache/_cacache".into(),
                "~/.cargo/registry/cache".into(),
                "~/.gradle/caches/modules-2".into(),
                "~/.m2/repository".into(),
            ],
            policy: FilterPolicy {
                min_size: 1024,
                ..FilterPolicy::default()
            },
        },
        CategorySpec {
            category: Category::AppCache,
            description: "Desktop application caches",
            patterns: vec![
                "~/AppData/Local/Spotify/Storage".into(),
                "~/AppData/Roaming/discord/Cache".into(),
                "~/AppData/Roaming/Microsoft/Teams/Cache".into(),
                "~/AppData/Roaming/Code/Cache".into(),
            ],
            policy: FilterPolicy {
                skip_dirs: WINDOWS_SKIP_DIRS,
                ..FilterPolicy::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_present_once() {
        let catalog = PathCatalog::for_platform();
        let mut seen = std::collections::HashSet::new();
        for spec in catalog.specs() {
            assert!(
                seen.insert(spec.category),
                "category {} defined twice",
                spec.category
            );
            assert!(!spec.patterns.is_empty(), "{} has no patterns", spec.category);
            assert!(!spec.description.is_empty());
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_slug_lookup() {
        let catalog = PathCatalog::for_platform();
        assert_eq!(catalog.get("temp").unwrap().category, Category::TempFiles);
        assert_eq!(catalog.get("browser").unwrap().category, Category::BrowserCache);
        assert!(matches!(
            catalog.get("nonexistent"),
            Err(ReclaimError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_temp_policy_has_grace_window() {
        let catalog = PathCatalog::for_platform();
        let temp = catalog.get("temp").unwrap();
        assert!(temp.policy.recent_grace);
        assert_eq!(temp.policy.cap, 500);
    }

    #[test]
    fn test_age_floors() {
        let catalog = PathCatalog::for_platform();
        assert_eq!(catalog.get("logs").unwrap().policy.min_age_days, Some(7));
        assert_eq!(catalog.get("downloads").unwrap().policy.min_age_days, Some(30));
    }

    #[test]
    fn test_report_totals() {
        let mut report = ScanReport::new();
        let spec = CategorySpec {
            category: Category::TempFiles,
            description: "Temporary files",
            patterns: vec![],
            policy: FilterPolicy::default(),
        };
        for size in [10u64, 20, 30] {
            report.records.push(FileRecord {
                path: PathBuf::from(format!("/tmp/f{}", size)),
                size_bytes: size,
                modified: None,
                accessed: None,
                category: spec.category,
                description: spec.description.to_string(),
            });
        }
        report.recalculate();
        assert_eq!(report.total_bytes, 60);

        let totals = report.totals_by_category();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0], (Category::TempFiles, 3, 60));
    }
}
