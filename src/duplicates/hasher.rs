use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Read chunk for incremental hashing
pub const HASH_CHUNK_SIZE: usize = 8 * 1024;

/// Default ceiling for full-content hashing (100 MiB)
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Default size of each sampled region (ten chunks)
pub const DEFAULT_SAMPLE_REGION: u64 = 10 * HASH_CHUNK_SIZE as u64;

#[derive(Debug, Clone)]
struct CacheEntry {
    size: u64,
    modified: SystemTime,
    fingerprint: String,
}

/// Counters for one hasher lifetime
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Two-tier content fingerprinting with a staleness-aware cache.
///
/// Files up to the large-file threshold are hashed in full and the
/// fingerprint is ground truth for equality. Larger files are
/// fingerprinted from three sampled regions (head, middle, tail), which
/// is fast but can call two files equal when they differ only outside
/// the sampled windows. That approximation is intentional; callers that
/// cannot accept it should raise the threshold.
///
/// The cache is keyed by path and validated against (size, mtime): a
/// stale entry is never returned, it is recomputed and overwritten.
/// Not synchronized; one operation at a time.
pub struct ContentHasher {
    large_file_threshold: u64,
    sample_region: u64,
    cache: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl ContentHasher {
    pub fn new(large_file_threshold: u64, sample_region: u64) -> Self {
        Self {
            large_file_threshold,
            sample_region,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_LARGE_FILE_THRESHOLD, DEFAULT_SAMPLE_REGION)
    }

    /// Fingerprint a file, consulting the cache first. `size` and
    /// `modified` come from the caller's stat so a cache hit touches
    /// the filesystem not at all.
    pub fn fingerprint(&mut self, path: &Path, size: u64, modified: SystemTime) -> Result<String> {
        if let Some(entry) = self.cache.get(path) {
            if entry.size == size && entry.modified == modified {
                self.hits += 1;
                return Ok(entry.fingerprint.clone());
            }
        }
        self.misses += 1;

        let fingerprint = if size <= self.large_file_threshold {
            full_hash(path)?
        } else {
            debug!(path = %path.display(), size, "sampling large file");
            sampled_hash(path, size, self.sample_region)?
        };

        self.cache.insert(
            path.to_path_buf(),
            CacheEntry {
                size,
                modified,
                fingerprint: fingerprint.clone(),
            },
        );
        Ok(fingerprint)
    }

    /// Drop every cached fingerprint and reset the counters
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Compute the full SHA-256 of a file, reading in fixed-size chunks
pub fn full_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();

    let mut buffer = [0u8; HASH_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash three regions of a large file: the head (capped at a third of
/// the file), a window centered on the midpoint, and the tail.
fn sampled_hash(path: &Path, size: u64, region: u64) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();

    let regions = [
        (0u64, region.min(size / 3)),
        ((size / 2).saturating_sub(region / 2), region),
        (size.saturating_sub(region), region),
    ];

    let mut buffer = [0u8; HASH_CHUNK_SIZE];
    for (offset, len) in regions {
        file.seek(SeekFrom::Start(offset))?;
        let mut remaining = len;
        while remaining > 0 {
            let want = remaining.min(HASH_CHUNK_SIZE as u64) as usize;
            let n = file.read(&mut buffer[..want])?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            remaining -= n as u64;
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}
