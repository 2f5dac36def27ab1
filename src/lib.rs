//! # Reclaim
//!
//! A category-driven disk cleanup and duplicate-file utility.
//!
//! Reclaim scans well-known junk locations (temp files, caches, stale
//! logs, old downloads) and removes them safely. It features:
//!
//! - **Category Scans**: platform-aware path tables with per-category
//!   age, size, and depth filters
//! - **Duplicate Detection**: size buckets plus SHA-256 content
//!   fingerprints, with sampled hashing for very large files
//! - **Safety-First**: protected-path refusal, dry-run, optional
//!   backups with one-command restore
//! - **CLI as Unix Citizen**: JSON output, pipe-friendly
//! - **100% Offline**: zero telemetry, no accounts, no cloud

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod duplicates;
pub mod scanner;
