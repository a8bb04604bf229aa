//! Optional memoization of export payloads.
//!
//! Payloads are keyed by a SHA-256 digest of the frame's content plus the
//! format and sheet name, and expire after a time-to-live. Removing the cache
//! only costs speed: a miss always falls through to serialization.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use polars::prelude::{AnyValue, DataFrame};
use sha2::{Digest, Sha256};
use survey_common::any_to_string;
use survey_model::ExportFormat;
use tracing::debug;

use crate::error::Result;

pub use survey_model::DEFAULT_CACHE_TTL;

/// Identifies one cached payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub digest: String,
    pub format: ExportFormat,
    pub sheet_name: String,
}

impl CacheKey {
    pub fn new(df: &DataFrame, format: ExportFormat, sheet_name: &str) -> Result<Self> {
        Ok(Self {
            digest: content_digest(df)?,
            format,
            sheet_name: sheet_name.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
struct CachedPayload {
    bytes: Vec<u8>,
    stored_at: Instant,
}

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Payload cache with time-to-live eviction.
#[derive(Debug, Clone)]
pub struct ExportCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CachedPayload>,
    stats: CacheStats,
}

impl ExportCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the payload for `key` unless it expired; expired entries are
    /// removed.
    pub fn get(&mut self, key: &CacheKey) -> Option<&[u8]> {
        let expired = self
            .entries
            .get(key)
            .map(|payload| payload.stored_at.elapsed() >= self.ttl);
        match expired {
            Some(false) => {
                self.stats.hits += 1;
                debug!(format = %key.format, digest = %key.digest, "export cache hit");
                self.entries.get(key).map(|payload| payload.bytes.as_slice())
            }
            Some(true) => {
                self.entries.remove(key);
                self.stats.misses += 1;
                debug!(format = %key.format, digest = %key.digest, "export cache entry expired");
                None
            }
            None => {
                self.stats.misses += 1;
                debug!(format = %key.format, digest = %key.digest, "export cache miss");
                None
            }
        }
    }

    /// Stores a payload after dropping every expired entry.
    pub fn insert(&mut self, key: CacheKey, bytes: Vec<u8>) {
        let purged = self.purge_expired();
        if purged > 0 {
            debug!(purged, remaining = self.entries.len(), "purged expired export payloads");
        }
        self.entries.insert(
            key,
            CachedPayload {
                bytes,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, payload| payload.stored_at.elapsed() < ttl);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ExportCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Hex SHA-256 over column names, dtypes and every cell.
///
/// Every text field is length-prefixed so cell boundaries cannot shift, and
/// nulls hash differently from empty strings.
pub fn content_digest(df: &DataFrame) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update((df.width() as u64).to_le_bytes());
    hasher.update((df.height() as u64).to_le_bytes());

    for column in df.get_columns() {
        update_field(&mut hasher, column.name().as_bytes());
        update_field(&mut hasher, column.dtype().to_string().as_bytes());
        for idx in 0..column.len() {
            match column.get(idx)? {
                AnyValue::Null => hasher.update([0x00]),
                value => {
                    hasher.update([0x01]);
                    update_field(&mut hasher, any_to_string(value).as_bytes());
                }
            }
        }
    }

    Ok(hex::encode(hasher.finalize()))
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
