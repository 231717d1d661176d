//! The keyed store: a thread-safe mapping from sequence id to encoded
//! record, matching the `DashMap`-backed cache shape used throughout the
//! storage layer this crate descends from.

use dashmap::DashMap;

use crate::codec::tagged::{self, Hint};
use crate::record::EncodedRecord;

#[derive(Default)]
pub struct SequenceStore {
    records: DashMap<String, EncodedRecord>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Insert an already-encoded record, silently overwriting any existing
    /// entry under the same key (last writer wins).
    pub fn insert_encoded(&self, key: String, value: EncodedRecord) {
        self.records.insert(key, value);
    }

    /// Decode and return the sequence for `key`, or `None` if absent.
    /// Distinguishes "absent" from "empty sequence" explicitly rather than
    /// conflating the two.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.get(key).map(|entry| match entry.value() {
            EncodedRecord::FastaPayload(data) => {
                String::from_utf8_lossy(&tagged::decode(data)).into_owned()
            }
            EncodedRecord::FastqPayload { sequence, .. } => {
                String::from_utf8_lossy(&tagged::decode(sequence)).into_owned()
            }
        })
    }

    /// Decode and return `{sequence, quality}` for a FASTQ record, or
    /// `None` if absent or the record is a FASTA payload.
    pub fn get_fastq(&self, key: &str) -> Option<(String, String)> {
        self.records.get(key).and_then(|entry| match entry.value() {
            EncodedRecord::FastqPayload { sequence, quality } => {
                let seq = String::from_utf8_lossy(&tagged::decode(sequence)).into_owned();
                let qual = String::from_utf8_lossy(&tagged::decode(quality)).into_owned();
                Some((seq, qual))
            }
            EncodedRecord::FastaPayload(_) => None,
        })
    }

    /// Encode `value` via the generic content-classifying hint and insert
    /// it under `key`.
    pub fn set(&self, key: impl Into<String>, value: &str) {
        let encoded = tagged::encode(value.as_bytes(), Hint::Generic);
        self.records
            .insert(key.into(), EncodedRecord::FastaPayload(encoded));
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn stored_size(&self, key: &str) -> usize {
        self.records
            .get(key)
            .map(|entry| entry.value().stored_size())
            .unwrap_or(0)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn clear(&self) {
        self.records.clear();
    }

    /// Replace the contents of `self` with the contents of `other` in one
    /// shot. Used by the snapshot readers so a truncated/corrupt snapshot
    /// never leaves a partially-populated store behind: the reader parses
    /// into a scratch store first and only swaps it in once parsing has
    /// fully succeeded.
    pub fn replace_with(&self, other: SequenceStore) {
        self.records.clear();
        for (key, value) in other.records.into_iter() {
            self.records.insert(key, value);
        }
    }

    /// Visit every stored `(id, encoded record)` pair, short-circuiting on
    /// the first error. Used by the snapshot writers, which need to walk
    /// the whole store once while writing fallibly.
    pub fn try_for_each<E>(
        &self,
        mut f: impl FnMut(&str, &EncodedRecord) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        for entry in self.records.iter() {
            f(entry.key(), entry.value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = SequenceStore::new();
        store.set("k", "GATTACA");
        assert_eq!(store.get("k").as_deref(), Some("GATTACA"));
    }

    #[test]
    fn missing_key_returns_none() {
        let store = SequenceStore::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn stored_size_reflects_encoded_payload() {
        let store = SequenceStore::new();
        store.set("k", "GATTACA");
        // 1 tag + 8 header (L, k) + 2 packed bytes for 7 bases
        assert_eq!(store.stored_size("k"), 11);
        assert_eq!(store.stored_size("missing"), 0);
    }

    #[test]
    fn duplicate_key_last_writer_wins() {
        let store = SequenceStore::new();
        store.set("k", "AAAA");
        store.set("k", "CCCC");
        assert_eq!(store.get("k").as_deref(), Some("CCCC"));
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn fastq_record_round_trips_sequence_and_quality() {
        let store = SequenceStore::new();
        let seq = tagged::encode(b"GATTACA", Hint::Generic);
        let qual = tagged::encode(b"!''*.~~", Hint::QualityScore);
        store.insert_encoded(
            "seq1".to_string(),
            EncodedRecord::FastqPayload {
                sequence: seq,
                quality: qual,
            },
        );
        let (s, q) = store.get_fastq("seq1").unwrap();
        assert_eq!(s, "GATTACA");
        assert_eq!(q, "!''*.~~");
    }

    #[test]
    fn concurrent_writers_all_land() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(SequenceStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.set(&format!("k{i}"), "GATTACA");
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.size(), 16);
    }
}
