//! Parser orchestrator: format sniffing, mode selection, thread fan-out,
//! and merge into the shared store.

use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::classify::classify_first;
use crate::codec::tagged::{self, Hint};
use crate::config::Config;
use crate::error::{Result, TracEonError};
use crate::parse::boundary::{fasta_boundaries, fastq_boundaries};
use crate::parse::line_source::{FileLineSource, LineSource};
use crate::parse::{fasta, fastq};
use crate::record::{DetectedFormat, EncodedRecord, Record};
use crate::store::SequenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Fasta,
    Fastq,
}

/// What ingest learned about the file, beyond populating the store.
pub struct IngestOutcome {
    pub detected_format: DetectedFormat,
    pub skipped_records: usize,
}

pub fn ingest(path: &Path, store: &SequenceStore, config: &Config) -> Result<IngestOutcome> {
    let is_gzip = path.extension().and_then(|e| e.to_str()) == Some("gz");

    let mut source = FileLineSource::open(path)?;
    let mut first_line = String::new();
    if !source.next_line(&mut first_line)? || first_line.is_empty() {
        return Err(TracEonError::EmptyInput);
    }
    let format = match first_line.as_bytes().first() {
        Some(b'>') => SourceFormat::Fasta,
        Some(b'@') => SourceFormat::Fastq,
        _ => return Err(TracEonError::UnknownFormat),
    };

    let file_size = std::fs::metadata(path)?.len();
    let use_parallel = !is_gzip && file_size >= config.parallel_threshold_bytes;

    let (records, skipped) = if use_parallel {
        tracing::debug!(file_size, "parallel ingest selected");
        ingest_parallel(path, format, config)?
    } else {
        tracing::debug!(file_size, is_gzip, "sequential ingest selected");
        ingest_sequential(source, first_line, format)?
    };

    let detected_format = records
        .first()
        .map(|r| classify_first(r.sequence.as_bytes(), r.is_fastq()))
        .unwrap_or(DetectedFormat::DnaFasta);

    for record in records {
        insert_record(store, record, config)?;
    }

    Ok(IngestOutcome {
        detected_format,
        skipped_records: skipped,
    })
}

fn insert_record(store: &SequenceStore, record: Record, config: &Config) -> Result<()> {
    if config.strict_duplicate_ids && store.contains_key(&record.id) {
        return Err(TracEonError::DuplicateId(record.id));
    }
    let encoded = if record.is_fastq() {
        EncodedRecord::FastqPayload {
            sequence: tagged::encode(record.sequence.as_bytes(), Hint::Generic),
            quality: tagged::encode(record.quality.as_bytes(), Hint::QualityScore),
        }
    } else {
        EncodedRecord::FastaPayload(tagged::encode(record.sequence.as_bytes(), Hint::Generic))
    };
    store.insert_encoded(record.id, encoded);
    Ok(())
}

fn ingest_sequential(
    mut source: FileLineSource,
    first_line: String,
    format: SourceFormat,
) -> Result<(Vec<Record>, usize)> {
    let mut buffer = String::new();
    buffer.push_str(&first_line);
    buffer.push('\n');

    let mut line = String::new();
    while source.next_line(&mut line)? {
        buffer.push_str(&line);
        buffer.push('\n');
    }

    Ok(match format {
        SourceFormat::Fasta => (fasta::parse_chunk(buffer.as_bytes()), 0),
        SourceFormat::Fastq => {
            let result = fastq::parse_chunk(buffer.as_bytes());
            if result.skipped > 0 {
                tracing::warn!(count = result.skipped, "skipped malformed FASTQ records");
            }
            (result.records, result.skipped)
        }
    })
}

fn ingest_parallel(
    path: &Path,
    format: SourceFormat,
    config: &Config,
) -> Result<(Vec<Record>, usize)> {
    let file = File::open(path).map_err(|_| TracEonError::OpenFailed)?;
    // SAFETY: the file is not modified concurrently by this process; each
    // worker below only reads its own `[start, end)` slice of the mapping.
    let mmap = unsafe { Mmap::map(&file)? };
    let data: &[u8] = &mmap;

    let worker_count = config.resolved_worker_threads();
    let boundaries = match format {
        SourceFormat::Fasta => fasta_boundaries(data, worker_count),
        SourceFormat::Fastq => fastq_boundaries(data, worker_count),
    };

    tracing::debug!(workers = boundaries.len().saturating_sub(1), "spans discovered");

    let results: Vec<(Vec<Record>, usize)> = boundaries
        .par_windows(2)
        .map(|window| {
            let start = window[0];
            let end = window[1];
            let span = &data[start..end];
            tracing::debug!(start, end, "worker span");
            match format {
                SourceFormat::Fasta => (fasta::parse_chunk(span), 0),
                SourceFormat::Fastq => {
                    let result = fastq::parse_chunk(span);
                    (result.records, result.skipped)
                }
            }
        })
        .collect();

    let mut all_records = Vec::new();
    let mut total_skipped = 0;
    for (records, skipped) in results {
        all_records.extend(records);
        total_skipped += skipped;
    }
    if total_skipped > 0 {
        tracing::warn!(count = total_skipped, "skipped malformed records across all workers");
    }

    Ok((all_records, total_skipped))
}
