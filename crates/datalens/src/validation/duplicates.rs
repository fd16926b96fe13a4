//! Approximate duplicate-row counting.

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::input::{scalar, Dataset};

/// Count rows whose leading `key_columns` values repeat an earlier row.
///
/// Only the first few columns are fingerprinted, so rows that differ further
/// right are still counted. This is an estimate, not exact deduplication.
pub fn estimate_duplicate_rows(dataset: &Dataset, key_columns: usize) -> usize {
    let width = key_columns.min(dataset.column_count());
    if width == 0 {
        return 0;
    }

    let mut seen: HashSet<[u8; 32]> = HashSet::with_capacity(dataset.row_count());
    let mut duplicates = 0;

    for row in &dataset.rows {
        let mut hasher = Sha256::new();
        for value in row.iter().take(width) {
            if let Some(text) = scalar::as_text(value) {
                hasher.update(text.as_bytes());
            }
            hasher.update([0x1f]);
        }
        let fingerprint: [u8; 32] = hasher.finalize().into();

        if !seen.insert(fingerprint) {
            duplicates += 1;
        }
    }

    duplicates
}
