// TracEon - in-memory cache for biological sequence data (FASTA/FASTQ)
// Global clippy configuration

#![warn(clippy::all)]
#![warn(clippy::correctness)]
#![warn(clippy::suspicious)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::style)]

// Allow some pedantic lints that don't add value
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::new_without_default)]

pub mod cache;
pub mod classify;
pub mod codec;
pub mod config;
pub mod error;
pub mod parse;
pub mod record;
pub mod snapshot;
pub mod store;

pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{Result, TracEonError};
pub use record::{DetectedFormat, EncodedRecord, Record};
