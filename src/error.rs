use thiserror::Error;

/// Errors the core engine can return.
///
/// Per-record parse failures inside a chunk are *not* represented here —
/// those are recovered locally by the chunk parser (the bad record is
/// skipped and counted) rather than surfaced as an `Err`.
#[derive(Error, Debug)]
pub enum TracEonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open input")]
    OpenFailed,

    #[error("input is empty")]
    EmptyInput,

    #[error("first line begins with neither '>' nor '@'")]
    UnknownFormat,

    #[error("snapshot is corrupt: {0}")]
    SnapshotCorrupt(String),

    #[error("unsupported snapshot version: {0}")]
    SnapshotVersion(u8),

    #[error("unrecognized snapshot magic bytes")]
    SnapshotMagic,

    #[error("duplicate id {0:?} rejected by strict mode")]
    DuplicateId(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TracEonError>;
