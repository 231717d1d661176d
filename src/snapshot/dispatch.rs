//! Magic-byte dispatch between the two snapshot versions. The restore
//! path reads 4 bytes and dispatches on their value directly, rather
//! than probing by attempting a parse and inspecting the failure.

use crate::error::{Result, TracEonError};
use crate::record::DetectedFormat;
use crate::store::SequenceStore;

use super::{v1, v2};

pub enum RestoredVersion {
    V1,
    V2(DetectedFormat),
}

pub fn restore(data: &[u8], store: &SequenceStore) -> Result<RestoredVersion> {
    if data.len() < 4 {
        return Err(TracEonError::SnapshotCorrupt("file shorter than magic".into()));
    }

    if &data[0..4] == v1::MAGIC {
        v1::read(data, store)?;
        Ok(RestoredVersion::V1)
    } else {
        let format = v2::read(data, store)?;
        Ok(RestoredVersion::V2(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tagged::{self, Hint};
    use crate::record::EncodedRecord;

    #[test]
    fn dispatches_v1_on_trac_magic() {
        let store = SequenceStore::new();
        store.set("k", "GATTACA");
        let mut buf = Vec::new();
        v1::write(&store, &mut buf).unwrap();

        let restored = SequenceStore::new();
        let version = restore(&buf, &restored).unwrap();
        assert!(matches!(version, RestoredVersion::V1));
        assert_eq!(restored.get("k").as_deref(), Some("GATTACA"));
    }

    #[test]
    fn dispatches_v2_on_smrt_magic() {
        let store = SequenceStore::new();
        store.insert_encoded(
            "k".to_string(),
            EncodedRecord::FastaPayload(tagged::encode(b"GATTACA", Hint::Generic)),
        );
        let mut buf = Vec::new();
        v2::write(&store, DetectedFormat::DnaFasta, &mut buf).unwrap();

        let restored = SequenceStore::new();
        let version = restore(&buf, &restored).unwrap();
        assert!(matches!(version, RestoredVersion::V2(DetectedFormat::DnaFasta)));
        assert_eq!(restored.get("k").as_deref(), Some("GATTACA"));
    }

    #[test]
    fn short_file_is_corrupt_not_magic() {
        let store = SequenceStore::new();
        let err = restore(b"TR", &store).unwrap_err();
        assert!(matches!(err, TracEonError::SnapshotCorrupt(_)));
    }
}
