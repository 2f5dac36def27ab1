pub mod catalog;
pub mod filter;
pub mod walker;

pub use catalog::{Category, CategorySpec, FileRecord, PathCatalog, ScanReport};
pub use filter::FilterPolicy;

use std::time::Instant;

use anyhow::Result;
use tracing::debug;

/// Callback receiving scan progress as a monotonically increasing
/// 0–100 percentage. Best-effort: zero-result scans may never fire it.
pub type ProgressFn<'a> = dyn FnMut(u8) + 'a;

/// Walks the catalog's patterns and produces cleanup candidates.
/// Synchronous; assumes at most one scan runs at a time.
pub struct DirectoryScanner {
    catalog: PathCatalog,
}

impl DirectoryScanner {
    pub fn new(catalog: PathCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PathCatalog {
        &self.catalog
    }

    /// Scan a single category by slug
    pub fn scan_category(
        &self,
        slug: &str,
        progress: Option<&mut ProgressFn>,
    ) -> Result<ScanReport> {
        let spec = self.catalog.get(slug)?;
        Ok(self.scan_specs(std::slice::from_ref(spec), progress))
    }

    /// Scan several categories by slug. Unknown slugs fail up front,
    /// before any filesystem work happens.
    pub fn scan_categories(
        &self,
        slugs: &[String],
        progress: Option<&mut ProgressFn>,
    ) -> Result<ScanReport> {
        let specs = slugs
            .iter()
            .map(|slug| self.catalog.get(slug).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.scan_specs(&specs, progress))
    }

    /// Scan every category in the catalog
    pub fn scan_all(&self, progress: Option<&mut ProgressFn>) -> ScanReport {
        self.scan_specs(self.catalog.specs(), progress)
    }

    fn scan_specs(
        &self,
        specs: &[CategorySpec],
        mut progress: Option<&mut ProgressFn>,
    ) -> ScanReport {
        let start = Instant::now();
        let mut report = ScanReport::new();

        // Progress is pattern-granular, which keeps it monotone
        let total_patterns = specs.iter().map(|s| s.patterns.len()).sum::<usize>().max(1);
        let mut done_patterns = 0usize;
        let mut last_pct = 0u8;

        for spec in specs {
            let mut records = Vec::new();
            let mut truncated = false;

            for pattern in &spec.patterns {
                if !truncated {
                    let roots =
                        walker::expand_patterns(std::slice::from_ref(pattern), &mut report.errors);
                    for root in &roots {
                        if walker::collect_files(root, spec, &mut records) {
                            truncated = true;
                            break;
                        }
                    }
                }

                done_patterns += 1;
                let pct = ((done_patterns * 100) / total_patterns) as u8;
                if pct > last_pct && !(records.is_empty() && report.records.is_empty()) {
                    if let Some(cb) = progress.as_mut() {
                        cb(pct);
                    }
                    last_pct = pct;
                }
            }

            debug!(
                category = %spec.category,
                records = records.len(),
                truncated,
                "category scanned"
            );
            report.truncated |= truncated;
            report.records.extend(records);
        }

        if last_pct < 100 && !report.records.is_empty() {
            if let Some(cb) = progress.as_mut() {
                cb(100);
            }
        }

        // Sort by size descending
        report.records.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        report.recalculate();
        report.duration_secs = start.elapsed().as_secs_f64();
        report
    }
}
