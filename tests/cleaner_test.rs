use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::TempDir;

use reclaim::cleaner::{self, backup};
use reclaim::common::config::Config;
use reclaim::duplicates::DuplicateGroup;
use reclaim::scanner::{Category, FileRecord};

const PAYLOAD: &[u8] = b"file body used across the cleanup fixtures";

fn record(path: &Path) -> FileRecord {
    FileRecord {
        path: path.to_path_buf(),
        size_bytes: PAYLOAD.len() as u64,
        modified: Some(SystemTime::now()),
        accessed: None,
        category: Category::Duplicate,
        description: "Duplicate file".to_string(),
    }
}

fn group_of(paths: &[&Path]) -> DuplicateGroup {
    DuplicateGroup {
        fingerprint: "test-fingerprint".to_string(),
        size_bytes: PAYLOAD.len() as u64,
        files: paths.iter().map(|p| record(p)).collect(),
    }
}

// ─── clean_files tests ────────────────────────────────────────────────────────

#[test]
fn test_clean_files_removes_and_counts() {
    let dir = TempDir::new().unwrap();
    let f1 = dir.path().join("junk1.txt");
    let f2 = dir.path().join("junk2.txt");
    std::fs::write(&f1, "hello").unwrap(); // 5
    std::fs::write(&f2, "world!").unwrap(); // 6

    let result = cleaner::clean_files(&[f1.clone(), f2.clone()], &Config::default());

    assert_eq!(result.cleaned_files, vec![f1.clone(), f2.clone()]);
    assert!(result.errors.is_empty());
    assert_eq!(result.freed_space, 11);
    assert!(!f1.exists());
    assert!(!f2.exists());
}

#[test]
fn test_clean_files_removes_directory_trees() {
    let dir = TempDir::new().unwrap();
    let junk = dir.path().join("junkdir");
    std::fs::create_dir_all(junk.join("nested")).unwrap();
    std::fs::write(junk.join("a.txt"), "abc").unwrap(); // 3
    std::fs::write(junk.join("nested").join("b.txt"), "defg").unwrap(); // 4

    let result = cleaner::clean_files(&[junk.clone()], &Config::default());

    assert_eq!(result.cleaned_files, vec![junk.clone()]);
    assert_eq!(result.freed_space, 7, "Directory size is the subtree sum");
    assert!(!junk.exists());
}

#[test]
fn test_clean_files_reports_missing_path() {
    let missing = PathBuf::from("/nonexistent/reclaim-test/file.txt");
    let result = cleaner::clean_files(&[missing], &Config::default());

    assert!(result.cleaned_files.is_empty());
    assert_eq!(result.freed_space, 0);
    assert_eq!(
        result.errors,
        vec!["File not found: /nonexistent/reclaim-test/file.txt".to_string()]
    );
}

#[test]
fn test_clean_files_continues_past_errors() {
    let dir = TempDir::new().unwrap();
    let real = dir.path().join("real.txt");
    std::fs::write(&real, "data").unwrap();
    let missing = PathBuf::from("/nonexistent/reclaim-test/gone.txt");

    let result = cleaner::clean_files(&[missing, real.clone()], &Config::default());

    assert_eq!(result.cleaned_files, vec![real.clone()]);
    assert_eq!(result.errors.len(), 1);
    assert!(!real.exists(), "The batch keeps going after a failure");
}

#[test]
#[cfg(unix)]
fn test_clean_files_refuses_protected_roots() {
    let target = PathBuf::from("/usr");
    let result = cleaner::clean_files(&[target.clone()], &Config::default());

    assert!(result.cleaned_files.is_empty());
    assert_eq!(
        result.errors,
        vec!["Protected path, refusing to remove: /usr".to_string()]
    );
    assert!(target.exists(), "Protected paths are never touched");
}

#[test]
fn test_clean_files_honors_exclusion_list() {
    let dir = TempDir::new().unwrap();
    let precious = dir.path().join("precious-notes.txt");
    std::fs::write(&precious, "do not remove").unwrap();

    let config = Config {
        exclude_paths: vec!["precious".to_string()],
        ..Config::default()
    };
    let result = cleaner::clean_files(&[precious.clone()], &config);

    assert!(result.cleaned_files.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Protected path, refusing to remove:"));
    assert!(precious.exists());
}

// ─── remove_duplicates tests ──────────────────────────────────────────────────

#[test]
fn test_remove_duplicates_keeps_scored_winner() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let shallow = dir.path().join("doc.txt");
    let deep = dir.path().join("nested").join("doc.txt");
    std::fs::write(&shallow, PAYLOAD).unwrap();
    std::fs::write(&deep, PAYLOAD).unwrap();

    let groups = vec![group_of(&[&shallow, &deep])];
    let result = cleaner::remove_duplicates(&groups, &Config::default(), None);

    assert_eq!(result.kept_files, vec![shallow.clone()]);
    assert_eq!(result.removed_files, vec![deep.clone()]);
    assert_eq!(result.space_freed, PAYLOAD.len() as u64);
    assert!(result.errors.is_empty());
    assert!(shallow.exists(), "The keeper must survive");
    assert!(!deep.exists());
}

#[test]
fn test_remove_duplicates_declined_group_is_untouched() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    std::fs::write(&a, PAYLOAD).unwrap();
    std::fs::write(&b, PAYLOAD).unwrap();

    let groups = vec![group_of(&[&a, &b])];
    let mut decline = |_: &DuplicateGroup, _: &PathBuf| false;
    let result = cleaner::remove_duplicates(&groups, &Config::default(), Some(&mut decline));

    assert!(result.removed_files.is_empty());
    assert!(result.kept_files.is_empty());
    assert_eq!(result.space_freed, 0);
    assert!(a.exists());
    assert!(b.exists());
}

#[test]
fn test_remove_duplicates_hook_sees_the_keeper() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let shallow = dir.path().join("doc.txt");
    let deep = dir.path().join("nested").join("doc.txt");
    std::fs::write(&shallow, PAYLOAD).unwrap();
    std::fs::write(&deep, PAYLOAD).unwrap();

    let groups = vec![group_of(&[&shallow, &deep])];
    let mut seen = Vec::new();
    let mut accept = |_: &DuplicateGroup, keep: &PathBuf| {
        seen.push(keep.clone());
        true
    };
    let result = cleaner::remove_duplicates(&groups, &Config::default(), Some(&mut accept));
    drop(accept);

    assert_eq!(seen, vec![shallow.clone()]);
    assert_eq!(result.removed_files, vec![deep]);
}

// ─── Backup and restore tests ─────────────────────────────────────────────────

fn backup_config(parent: &TempDir) -> Config {
    Config {
        backup_dir: Some(parent.path().to_path_buf()),
        ..Config::default()
    }
}

#[test]
fn test_flatten_name() {
    assert_eq!(backup::flatten_name(Path::new("/var/log/app.log")), "_var_log_app.log");
    assert_eq!(backup::flatten_name(Path::new("C:\\Users\\x.txt")), "C__Users_x.txt");
}

#[test]
fn test_backup_and_restore_round_trip() {
    let work = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let config = backup_config(&parent);

    let f1 = work.path().join("first.txt");
    let f2 = work.path().join("second.txt");
    std::fs::write(&f1, "alpha").unwrap();
    std::fs::write(&f2, "beta").unwrap();

    let dir = backup::create_backup(&[f1.clone(), f2.clone()], &config).unwrap();
    assert!(dir.starts_with(parent.path()));
    assert!(dir.join(backup::MANIFEST_FILE).exists());
    assert!(dir.join(backup::flatten_name(&f1)).exists());

    std::fs::remove_file(&f1).unwrap();
    std::fs::remove_file(&f2).unwrap();

    let result = backup::restore_backup(&dir).unwrap();
    assert_eq!(result.restored, vec![f1.clone(), f2.clone()]);
    assert!(result.errors.is_empty());
    assert_eq!(std::fs::read_to_string(&f1).unwrap(), "alpha");
    assert_eq!(std::fs::read_to_string(&f2).unwrap(), "beta");
}

#[test]
fn test_backup_skips_vanished_sources() {
    let work = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let config = backup_config(&parent);

    let real = work.path().join("real.txt");
    std::fs::write(&real, "kept").unwrap();
    let missing = work.path().join("already-gone.txt");

    let dir = backup::create_backup(&[real, missing], &config).unwrap();
    let manifest = backup::BackupManifest::load(&dir).unwrap();

    assert_eq!(manifest.files.len(), 1, "Only real copies belong in the manifest");
}

#[test]
fn test_restore_without_manifest_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = backup::restore_backup(dir.path()).unwrap_err();
    assert!(err.to_string().contains("Backup info file not found in"));
}

#[test]
fn test_restore_reports_missing_backup_copy() {
    let work = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let config = backup_config(&parent);

    let f1 = work.path().join("first.txt");
    let f2 = work.path().join("second.txt");
    std::fs::write(&f1, "alpha").unwrap();
    std::fs::write(&f2, "beta").unwrap();

    let dir = backup::create_backup(&[f1.clone(), f2.clone()], &config).unwrap();
    let manifest = backup::BackupManifest::load(&dir).unwrap();
    std::fs::remove_file(&manifest.files[0].backup).unwrap();

    let result = backup::restore_backup(&dir).unwrap();
    assert_eq!(result.restored, vec![f2]);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Backup file not found:"));
}

#[test]
fn test_restore_recreates_parent_dirs() {
    let work = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let config = backup_config(&parent);

    let nested = work.path().join("a").join("b").join("deep.txt");
    std::fs::create_dir_all(nested.parent().unwrap()).unwrap();
    std::fs::write(&nested, "buried").unwrap();

    let dir = backup::create_backup(&[nested.clone()], &config).unwrap();
    std::fs::remove_dir_all(work.path().join("a")).unwrap();

    let result = backup::restore_backup(&dir).unwrap();
    assert_eq!(result.restored, vec![nested.clone()]);
    assert_eq!(std::fs::read_to_string(&nested).unwrap(), "buried");
}

#[test]
fn test_list_backups_and_most_recent() {
    let work = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let config = backup_config(&parent);

    let f1 = work.path().join("first.txt");
    let f2 = work.path().join("second.txt");
    std::fs::write(&f1, "alpha").unwrap();
    std::fs::write(&f2, "beta").unwrap();

    let dir = backup::create_backup(&[f1, f2], &config).unwrap();

    let backups = backup::list_backups(&config).unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].dir, dir);
    assert_eq!(backups[0].file_count, 2);
    assert!(backups[0].total_bytes >= 9, "Copies plus manifest take space");

    assert_eq!(backup::most_recent_backup(&config).unwrap(), Some(dir));
}

#[test]
fn test_list_backups_with_no_parent_dir() {
    let parent = TempDir::new().unwrap();
    let config = Config {
        backup_dir: Some(parent.path().join("never-created")),
        ..Config::default()
    };

    assert!(backup::list_backups(&config).unwrap().is_empty());
    assert_eq!(backup::most_recent_backup(&config).unwrap(), None);
}
