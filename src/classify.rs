//! Content classifier. Applied only to the first stored record after
//! ingest to set the cache-wide detected format tag.

use crate::record::DetectedFormat;

const NUCLEOTIDE_ALPHABET: &[u8] = b"ATGCUNatgcun";

/// Of the alphabetic characters in `s`, the fraction that are in
/// `{A,T,G,C,U,N}` (case-insensitive). Requires at least one alphabetic
/// character; returns `false` otherwise.
pub fn is_nucleotide(s: &[u8]) -> bool {
    let alphabetic_count = s.iter().filter(|c| c.is_ascii_alphabetic()).count();
    if alphabetic_count == 0 {
        return false;
    }
    let nucleotide_count = s
        .iter()
        .filter(|c| c.is_ascii_alphabetic() && NUCLEOTIDE_ALPHABET.contains(*c))
        .count();
    (nucleotide_count as f64) / (alphabetic_count as f64) > 0.80
}

pub fn has_rna(s: &[u8]) -> bool {
    s.iter().any(|&c| c == b'U' || c == b'u')
}

/// Classify the first stored record into one of the six detected-format
/// tags. `is_fastq` distinguishes the FASTA/FASTQ halves of the tag set.
pub fn classify_first(sequence: &[u8], is_fastq: bool) -> DetectedFormat {
    if is_nucleotide(sequence) {
        if has_rna(sequence) {
            if is_fastq {
                DetectedFormat::RnaFastq
            } else {
                DetectedFormat::RnaFasta
            }
        } else if is_fastq {
            DetectedFormat::DnaFastq
        } else {
            DetectedFormat::DnaFasta
        }
    } else if is_fastq {
        DetectedFormat::ProteinFastq
    } else {
        DetectedFormat::ProteinFasta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_dna_is_nucleotide() {
        assert!(is_nucleotide(b"GATTACAGATTACA"));
    }

    #[test]
    fn pure_protein_is_not_nucleotide() {
        assert!(!is_nucleotide(b"MKVLATVLLLAVFGEL"));
    }

    #[test]
    fn empty_alphabetic_content_is_not_nucleotide() {
        assert!(!is_nucleotide(b"123456"));
    }

    #[test]
    fn rna_detected_by_presence_of_u() {
        assert!(has_rna(b"ACGU"));
        assert!(!has_rna(b"ACGT"));
    }

    #[test]
    fn classify_dna_fasta() {
        assert_eq!(classify_first(b"GATTACA", false), DetectedFormat::DnaFasta);
    }

    #[test]
    fn classify_rna_fastq() {
        assert_eq!(classify_first(b"ACGU", true), DetectedFormat::RnaFastq);
    }

    #[test]
    fn classify_protein_fasta() {
        assert_eq!(
            classify_first(b"MKVLATVLLLAVFGEL", false),
            DetectedFormat::ProteinFasta
        );
    }
}
