//! Type-tagged encoder façade. A single entry point used by both the
//! keyed store (`set`) and the v1 snapshot writer.

use super::{nucleotide, quality};
use crate::classify::is_nucleotide;

const TAG_NUCLEOTIDE: u8 = 0x01;
const TAG_QUALITY: u8 = 0x12;
const TAG_PLAIN: u8 = 0x21;

/// Which codec family to prefer. `QualityScore` always wins; `Generic`
/// defers to content classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Generic,
    QualityScore,
}

pub fn encode(bytes: &[u8], hint: Hint) -> Vec<u8> {
    match hint {
        Hint::QualityScore => {
            let mut out = Vec::with_capacity(1 + bytes.len());
            out.push(TAG_QUALITY);
            out.extend(quality::encode(bytes));
            out
        }
        Hint::Generic if is_nucleotide(bytes) => {
            let mut out = Vec::with_capacity(1 + bytes.len());
            out.push(TAG_NUCLEOTIDE);
            out.extend(nucleotide::encode(bytes));
            out
        }
        Hint::Generic => {
            let mut out = Vec::with_capacity(1 + bytes.len());
            out.push(TAG_PLAIN);
            out.extend_from_slice(bytes);
            out
        }
    }
}

pub fn decode(bytes: &[u8]) -> Vec<u8> {
    match bytes.split_first() {
        Some((&TAG_NUCLEOTIDE, rest)) => nucleotide::decode(rest),
        Some((&TAG_QUALITY, rest)) => quality::decode(rest),
        Some((&TAG_PLAIN, rest)) => rest.to_vec(),
        _ => Vec::new(),
    }
}
