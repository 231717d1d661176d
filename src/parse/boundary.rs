//! Record-start boundary discovery for parallel ingest.
//!
//! The FASTA case is the easy one: a record always starts right after a
//! newline, so boundary discovery just needs to snap an approximate
//! position forward to the next `>` that follows a newline.
//!
//! FASTQ is the trap: a quality line can itself start with `@`, so
//! "newline then `@`" is ambiguous. This module always pre-scans the whole
//! file once, validating the full 4-line shape of every candidate record,
//! and partitions the resulting list of *verified* start offsets among
//! workers instead of trusting an unverified scan — quality bytes can
//! coincide with the header sentinel.

/// Find `worker_count + 1` offsets spanning `data`, each a verified FASTA
/// record start, with offset 0 at the file start and the last offset at
/// `data.len()`.
pub fn fasta_boundaries(data: &[u8], worker_count: usize) -> Vec<usize> {
    let worker_count = worker_count.max(1);
    let len = data.len();
    if len == 0 {
        return vec![0, 0];
    }

    let mut boundaries = vec![0usize];
    for i in 1..worker_count {
        let approx = (len / worker_count) * i;
        if let Some(start) = next_fasta_record_start(data, approx) {
            if start > *boundaries.last().unwrap() && start < len {
                boundaries.push(start);
            }
        }
    }
    boundaries.push(len);
    boundaries.dedup();
    boundaries
}

fn next_fasta_record_start(data: &[u8], from: usize) -> Option<usize> {
    let mut pos = from.min(data.len());
    while pos < data.len() {
        if data[pos] == b'>' && (pos == 0 || data[pos - 1] == b'\n') {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Pre-scan the whole buffer and return every verified FASTQ record start
/// offset, in ascending order. A start is verified when the 4-line group
/// beginning there has an `@`-header, a `+`-line, and matching
/// sequence/quality lengths.
pub fn verified_fastq_starts(data: &[u8]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut offset = 0usize;
    let mut line_offsets_and_lens = Vec::new();

    for raw in data.split_inclusive(|&b| b == b'\n') {
        let content_len = raw.len() - if raw.last() == Some(&b'\n') { 1 } else { 0 };
        let content_len = if content_len > 0 && raw[content_len - 1] == b'\r' {
            content_len - 1
        } else {
            content_len
        };
        line_offsets_and_lens.push((offset, content_len));
        offset += raw.len();
    }

    let mut i = 0;
    while i + 3 < line_offsets_and_lens.len() {
        let (h_off, h_len) = line_offsets_and_lens[i];
        let (_, seq_len) = line_offsets_and_lens[i + 1];
        let (p_off, p_len) = line_offsets_and_lens[i + 2];
        let (_, qual_len) = line_offsets_and_lens[i + 3];

        let header_byte = (h_len > 0).then(|| data[h_off]);
        let plus_byte = (p_len > 0).then(|| data[p_off]);

        if header_byte == Some(b'@') && plus_byte == Some(b'+') && seq_len == qual_len {
            starts.push(h_off);
            i += 4;
        } else {
            i += 1;
        }
    }

    starts
}

/// Partition the verified FASTQ start offsets into `worker_count` spans
/// covering `[0, data.len())`. Falls back to a single span if fewer
/// records than workers were found.
pub fn fastq_boundaries(data: &[u8], worker_count: usize) -> Vec<usize> {
    let worker_count = worker_count.max(1);
    let starts = verified_fastq_starts(data);
    let len = data.len();

    if starts.is_empty() {
        return vec![0, len];
    }

    let effective_workers = worker_count.min(starts.len());
    let mut boundaries = Vec::with_capacity(effective_workers + 1);
    boundaries.push(0usize);

    let records_per_worker = starts.len().div_ceil(effective_workers);
    for w in 1..effective_workers {
        let idx = w * records_per_worker;
        if idx < starts.len() {
            boundaries.push(starts[idx]);
        }
    }
    boundaries.push(len);
    boundaries.dedup();
    boundaries
}
