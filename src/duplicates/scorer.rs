use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::DuplicateGroup;
use crate::scanner::FileRecord;

/// Substrings that mark a filename as a copy of something else
const COPY_MARKERS: &[&str] = &["_copy", "_duplicate", "(1)", "(2)"];

/// Score one group member; higher means more worth keeping.
///
/// Additive heuristics: +10 outside scratch space, +5 under a user
/// home, up to +20 for shallow paths, up to +10 for recent
/// modification (in 30-day steps), +5 for a name without copy markers.
pub fn score_candidate(file: &FileRecord) -> i64 {
    let path_str = file.path.display().to_string();
    let mut score = 0i64;

    if !under_temp_dir(&file.path) {
        score += 10;
    }

    if path_str.contains("/home/") || path_str.contains("/Users/") {
        score += 5;
    }

    let depth = path_str.matches(std::path::MAIN_SEPARATOR).count() as i64;
    score += (20 - depth).max(0);

    if let Some(modified) = file.modified {
        score += (10 - age_days(modified) / 30).max(0);
    }

    if let Some(name) = file.path.file_name().and_then(|n| n.to_str()) {
        if !COPY_MARKERS.iter().any(|m| name.contains(m)) {
            score += 5;
        }
    }

    score
}

/// Pick the member to keep: highest score, ties broken by
/// lexicographically smallest path so the choice is stable run to run.
pub fn choose_keep(group: &DuplicateGroup) -> Option<&FileRecord> {
    group.files.iter().max_by(|a, b| {
        score_candidate(a)
            .cmp(&score_candidate(b))
            .then_with(|| b.path.cmp(&a.path))
    })
}

/// Every member except the keeper
pub fn files_to_remove(group: &DuplicateGroup) -> Vec<PathBuf> {
    match choose_keep(group) {
        Some(keep) => group
            .files
            .iter()
            .filter(|f| f.path != keep.path)
            .map(|f| f.path.clone())
            .collect(),
        None => Vec::new(),
    }
}

fn age_days(modified: SystemTime) -> i64 {
    SystemTime::now()
        .duration_since(modified)
        .map(|d| (d.as_secs() / 86_400) as i64)
        .unwrap_or(0)
}

fn under_temp_dir(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(
            c.as_os_str().to_str(),
            Some("tmp" | "temp" | "Temp" | "TEMP")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Category;

    fn record(path: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from(path),
            size_bytes: 2000,
            modified: Some(SystemTime::now()),
            accessed: None,
            category: Category::Duplicate,
            description: "Duplicate file".to_string(),
        }
    }

    fn group(paths: &[&str]) -> DuplicateGroup {
        DuplicateGroup {
            fingerprint: "abc123".to_string(),
            size_bytes: 2000,
            files: paths.iter().map(|p| record(p)).collect(),
        }
    }

    #[test]
    fn test_shallower_path_wins() {
        let g = group(&["/data/b/a.txt", "/data/a.txt"]);
        assert_eq!(choose_keep(&g).unwrap().path, PathBuf::from("/data/a.txt"));
        assert_eq!(files_to_remove(&g), vec![PathBuf::from("/data/b/a.txt")]);
    }

    #[test]
    fn test_temp_location_loses() {
        let g = group(&["/tmp/report.pdf", "/data/report.pdf"]);
        assert_eq!(
            choose_keep(&g).unwrap().path,
            PathBuf::from("/data/report.pdf")
        );
    }

    #[test]
    fn test_home_location_preferred() {
        let g = group(&["/srv/x/report.pdf", "/home/x/report.pdf"]);
        assert_eq!(
            choose_keep(&g).unwrap().path,
            PathBuf::from("/home/x/report.pdf")
        );
    }

    #[test]
    fn test_copy_marker_loses() {
        for copy in ["/data/report_copy.pdf", "/data/report_duplicate.pdf", "/data/report(1).pdf"] {
            let g = group(&[copy, "/data/report0000.pdf"]);
            assert_eq!(
                choose_keep(&g).unwrap().path,
                PathBuf::from("/data/report0000.pdf"),
                "{} should lose to the unmarked name",
                copy
            );
        }
    }

    #[test]
    fn test_tie_breaks_lexicographically() {
        let g = group(&["/data/b.txt", "/data/a.txt", "/data/c.txt"]);
        assert_eq!(choose_keep(&g).unwrap().path, PathBuf::from("/data/a.txt"));
    }

    #[test]
    fn test_stale_file_scores_lower() {
        let mut old = record("/data/old.txt");
        old.modified = Some(SystemTime::now() - std::time::Duration::from_secs(120 * 86_400));
        let fresh = record("/data/new.txt");
        assert!(score_candidate(&fresh) > score_candidate(&old));
    }

    #[test]
    fn test_empty_group_has_no_keeper() {
        let g = DuplicateGroup {
            fingerprint: String::new(),
            size_bytes: 0,
            files: Vec::new(),
        };
        assert!(choose_keep(&g).is_none());
        assert!(files_to_remove(&g).is_empty());
    }
}
