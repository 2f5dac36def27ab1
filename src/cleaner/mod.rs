pub mod backup;
pub mod remover;

pub use backup::{
    create_backup, list_backups, most_recent_backup, restore_backup, BackupEntry, BackupManifest,
    BackupSummary, RestoreResult,
};
pub use remover::{clean_files, remove_duplicates, CleanupResult, DuplicateCleanupResult};
