//! `Cache`: the public façade tying the keyed store, ingest, and snapshot
//! save/restore together.

use parking_lot::Mutex;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::parse::orchestrator;
use crate::record::DetectedFormat;
use crate::snapshot::{self, RestoredVersion};
use crate::store::SequenceStore;

/// Which path most recently populated the store, governing which
/// snapshot version `save` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopulationSource {
    Empty,
    Set,
    Ingest,
}

/// A read-only summary of cache state, cheap to take without holding up
/// writers (mirrors the `IndexStats`/`StorageStats` shape used elsewhere
/// in this codebase's storage layer).
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub record_count: usize,
    pub detected_format: Option<DetectedFormat>,
}

struct Meta {
    detected_format: Option<DetectedFormat>,
    source: PopulationSource,
}

pub struct Cache {
    store: SequenceStore,
    config: Config,
    meta: Mutex<Meta>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            store: SequenceStore::new(),
            config,
            meta: Mutex::new(Meta {
                detected_format: None,
                source: PopulationSource::Empty,
            }),
        }
    }

    /// Populate the store from a FASTA or FASTQ file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let outcome = orchestrator::ingest(path.as_ref(), &self.store, &self.config)?;
        let mut meta = self.meta.lock();
        meta.detected_format = Some(outcome.detected_format);
        meta.source = PopulationSource::Ingest;
        Ok(outcome.skipped_records)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    pub fn get_fastq(&self, key: &str) -> Option<(String, String)> {
        self.store.get_fastq(key)
    }

    pub fn set(&self, key: impl Into<String>, value: &str) {
        self.store.set(key, value);
        let mut meta = self.meta.lock();
        meta.source = PopulationSource::Set;
    }

    pub fn size(&self) -> usize {
        self.store.size()
    }

    pub fn stored_size(&self, key: &str) -> usize {
        self.store.stored_size(key)
    }

    pub fn stats(&self) -> CacheStats {
        let meta = self.meta.lock();
        CacheStats {
            record_count: self.store.size(),
            detected_format: meta.detected_format,
        }
    }

    /// Serialize the store to a binary snapshot. Writes v1 "TRAC" if the
    /// store was last populated via `set`, v2 "SMRT" if via `load_file`.
    pub fn save(&self) -> Result<Vec<u8>> {
        let meta = self.meta.lock();
        let mut buf = Vec::new();
        match meta.source {
            PopulationSource::Set | PopulationSource::Empty => {
                snapshot::v1::write(&self.store, &mut buf)?;
            }
            PopulationSource::Ingest => {
                let format = meta.detected_format.unwrap_or(DetectedFormat::DnaFasta);
                snapshot::v2::write(&self.store, format, &mut buf)?;
            }
        }
        Ok(buf)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let data = self.save()?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Replace the store in place from a binary snapshot, auto-detecting
    /// the version from the first 4 bytes. A read error is fatal to the
    /// restore: the store is left empty rather than partially populated
    /// or unchanged.
    pub fn restore(&self, data: &[u8]) -> Result<()> {
        let version = match snapshot::restore(data, &self.store) {
            Ok(version) => version,
            Err(err) => {
                self.store.clear();
                let mut meta = self.meta.lock();
                meta.source = PopulationSource::Empty;
                meta.detected_format = None;
                return Err(err);
            }
        };
        let mut meta = self.meta.lock();
        match version {
            RestoredVersion::V1 => {
                meta.source = PopulationSource::Set;
                meta.detected_format = None;
            }
            RestoredVersion::V2(format) => {
                meta.source = PopulationSource::Ingest;
                meta.detected_format = Some(format);
            }
        }
        Ok(())
    }

    pub fn restore_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let data = std::fs::read(path)?;
        self.restore(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(contents: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(ext)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn s1_fasta_ingest_end_to_end() {
        let file = write_fixture(
            ">seq1 desc\nGATTACA\n>seq2\nCGCGCGCGCGCGCGCGCGCGCGCGCGCG\n",
            ".fasta",
        );
        let cache = Cache::new();
        cache.load_file(file.path()).unwrap();
        assert_eq!(cache.size(), 2);
        assert_eq!(cache.get("seq1").as_deref(), Some("GATTACA"));
        assert_eq!(
            cache.get("seq2").as_deref(),
            Some("CGCGCGCGCGCGCGCGCGCGCGCGCGCG")
        );
    }

    #[test]
    fn s2_fastq_ingest_end_to_end() {
        let file = write_fixture(
            "@seq1\nGATTACA\n+\n!''*.~~\n@seq2\nTTAACCGG\n+\n!''*+,-.\n",
            ".fastq",
        );
        let cache = Cache::new();
        cache.load_file(file.path()).unwrap();
        assert_eq!(cache.size(), 2);
        let (seq, qual) = cache.get_fastq("seq1").unwrap();
        assert_eq!(seq, "GATTACA");
        assert_eq!(qual, "!''*.~~");
        let (seq2, qual2) = cache.get_fastq("seq2").unwrap();
        assert_eq!(seq2, "TTAACCGG");
        assert_eq!(qual2, "!''*+,-.");
    }

    #[test]
    fn s5_save_via_set_round_trips_as_v1() {
        let cache = Cache::new();
        cache.set("k1", "GATTACA");
        cache.set("k2", "CGCGCGCG");
        let snapshot = cache.save().unwrap();
        assert_eq!(&snapshot[0..4], b"TRAC");

        let restored = Cache::new();
        restored.restore(&snapshot).unwrap();
        assert_eq!(restored.size(), 2);
        assert_eq!(restored.get("k1").as_deref(), Some("GATTACA"));
        assert_eq!(restored.get("k2").as_deref(), Some("CGCGCGCG"));
    }

    #[test]
    fn s6_save_via_load_file_round_trips_as_v2() {
        let file = write_fixture(">seq1\nGATTACA\n", ".fasta");
        let cache = Cache::new();
        cache.load_file(file.path()).unwrap();
        let snapshot = cache.save().unwrap();
        assert_eq!(&snapshot[0..4], b"SMRT");

        let restored = Cache::new();
        restored.restore(&snapshot).unwrap();
        assert_eq!(restored.size(), 1);
        assert_eq!(restored.get("seq1").as_deref(), Some("GATTACA"));
    }

    #[test]
    fn empty_first_line_is_rejected() {
        let file = write_fixture("", ".fasta");
        let cache = Cache::new();
        let err = cache.load_file(file.path()).unwrap_err();
        assert!(matches!(err, crate::error::TracEonError::EmptyInput));
    }

    #[test]
    fn unknown_sentinel_is_rejected() {
        let file = write_fixture("not a sequence file\n", ".fasta");
        let cache = Cache::new();
        let err = cache.load_file(file.path()).unwrap_err();
        assert!(matches!(err, crate::error::TracEonError::UnknownFormat));
    }

    #[test]
    fn missing_file_is_open_failed() {
        let cache = Cache::new();
        let err = cache.load_file("/definitely/not/a/real/path.fasta").unwrap_err();
        assert!(matches!(err, crate::error::TracEonError::OpenFailed));
    }

    #[test]
    fn stats_reports_detected_format_after_fasta_ingest() {
        let file = write_fixture(">seq1\nGATTACA\n", ".fasta");
        let cache = Cache::new();
        cache.load_file(file.path()).unwrap();
        let stats = cache.stats();
        assert_eq!(stats.record_count, 1);
        assert_eq!(stats.detected_format, Some(DetectedFormat::DnaFasta));
    }

    #[test]
    fn corrupt_snapshot_clears_the_cache_instead_of_leaving_a_partial_restore() {
        let cache = Cache::new();
        cache.set("pre_existing", "GATTACA");
        assert_eq!(cache.size(), 1);

        // A v1 header claiming 3 records but with only one record's worth
        // of bytes following it: the second record's key length prefix is
        // truncated.
        let mut corrupt = Vec::new();
        corrupt.extend_from_slice(b"TRAC");
        corrupt.push(2);
        corrupt.extend_from_slice(&3u64.to_le_bytes());
        corrupt.extend_from_slice(&1u32.to_le_bytes());
        corrupt.push(b'k');
        corrupt.push(0); // rec_type = FASTA
        corrupt.extend_from_slice(&0u32.to_le_bytes()); // zero-length payload

        let err = cache.restore(&corrupt).unwrap_err();
        assert!(matches!(err, crate::error::TracEonError::SnapshotCorrupt(_)));
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.get("pre_existing"), None);
    }

    #[test]
    fn parallel_ingest_of_large_file_matches_sequential_record_set() {
        let mut contents = String::new();
        for i in 0..5000 {
            contents.push_str(&format!(">seq{i}\nACGTACGTACGTACGTACGTACGTACGT\n"));
        }
        let file = write_fixture(&contents, ".fasta");

        let mut small_config = Config::default();
        small_config.parallel_threshold_bytes = 1024;
        let parallel_cache = Cache::with_config(small_config);
        parallel_cache.load_file(file.path()).unwrap();

        let mut large_threshold = Config::default();
        large_threshold.parallel_threshold_bytes = u64::MAX;
        let sequential_cache = Cache::with_config(large_threshold);
        sequential_cache.load_file(file.path()).unwrap();

        assert_eq!(parallel_cache.size(), sequential_cache.size());
        assert_eq!(parallel_cache.size(), 5000);
        for i in [0, 1, 2499, 4999] {
            let key = format!("seq{i}");
            assert_eq!(parallel_cache.get(&key), sequential_cache.get(&key));
        }
    }
}
