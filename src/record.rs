use serde::{Deserialize, Serialize};

/// One decoded sequence record, before it is tagged and packed into the
/// store (see `codec::tagged`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The first whitespace-delimited token after the sentinel, sentinel
    /// stripped. Always non-empty.
    pub id: String,
    /// IUPAC letters, possibly mixed case, possibly containing `N`.
    pub sequence: String,
    /// ASCII 33-126. Empty for FASTA records.
    pub quality: String,
}

impl Record {
    pub fn fasta(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            quality: String::new(),
        }
    }

    pub fn fastq(
        id: impl Into<String>,
        sequence: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
            quality: quality.into(),
        }
    }

    pub fn is_fastq(&self) -> bool {
        !self.quality.is_empty()
    }
}

/// The encoded form stored under a key. The first byte of every payload
/// vector is the type tag from `codec::tagged`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedRecord {
    FastaPayload(Vec<u8>),
    FastqPayload { sequence: Vec<u8>, quality: Vec<u8> },
}

impl EncodedRecord {
    pub fn stored_size(&self) -> usize {
        match self {
            EncodedRecord::FastaPayload(data) => data.len(),
            EncodedRecord::FastqPayload { sequence, quality } => sequence.len() + quality.len(),
        }
    }
}

/// Process-wide tag set by the classifier after the first stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DetectedFormat {
    DnaFasta = 0,
    RnaFasta = 1,
    ProteinFasta = 2,
    DnaFastq = 3,
    RnaFastq = 4,
    ProteinFastq = 5,
}

impl DetectedFormat {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::DnaFasta),
            1 => Some(Self::RnaFasta),
            2 => Some(Self::ProteinFasta),
            3 => Some(Self::DnaFastq),
            4 => Some(Self::RnaFastq),
            5 => Some(Self::ProteinFastq),
            _ => None,
        }
    }
}
