use std::path::Path;

/// Roots that must NEVER be deleted under any circumstances.
/// This is a safety net against bugs in catalog patterns.
#[cfg(unix)]
const PROTECTED_ROOTS: &[&str] = &[
    "/", "/usr", "/etc", "/bin", "/sbin", "/lib", "/boot", "/var", "/opt", "/home", "/root",
    "/proc", "/sys", "/dev",
];

#[cfg(windows)]
const PROTECTED_ROOTS: &[&str] = &[
    "C:\\",
    "C:\\Windows",
    "C:\\Program Files",
    "C:\\Program Files (x86)",
    "C:\\ProgramData",
    "C:\\Users",
];

/// Directories under home that must never be deleted as a whole.
/// Files inside them can still match scan filters.
const PROTECTED_HOME_DIRS: &[&str] = &[
    "Desktop",
    "Documents",
    "Downloads",
    "Pictures",
    "Music",
    "Videos",
    ".ssh",
    ".gnupg",
];

/// Check if a path is protected and must never be deleted
pub fn is_protected(path: &Path) -> bool {
    if PROTECTED_ROOTS.iter().any(|p| Path::new(p) == path) {
        return true;
    }

    if let Some(home) = dirs::home_dir() {
        if path == home {
            return true;
        }
        if PROTECTED_HOME_DIRS.iter().any(|d| home.join(d) == path) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_system_roots_protected() {
        assert!(is_protected(Path::new("/")));
        assert!(is_protected(Path::new("/usr")));
        assert!(is_protected(Path::new("/etc")));
        assert!(is_protected(Path::new("/home")));
    }

    #[test]
    fn test_home_dirs_protected() {
        if let Some(home) = dirs::home_dir() {
            assert!(is_protected(&home));
            assert!(is_protected(&home.join("Documents")));
            assert!(is_protected(&home.join("Downloads")));
            assert!(is_protected(&home.join(".ssh")));
        }
    }

    #[test]
    fn test_files_inside_protected_dirs_are_not() {
        if let Some(home) = dirs::home_dir() {
            assert!(!is_protected(&home.join("Downloads/old-installer.deb")));
            assert!(!is_protected(&home.join(".cache/thumbnails/x.png")));
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_tmp_not_protected() {
        assert!(!is_protected(Path::new("/tmp/somefile")));
        assert!(!is_protected(Path::new("/var/tmp/scratch")));
    }
}
