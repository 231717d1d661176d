//! v2 "SMRT" snapshot format: the parser-driven layout used when the
//! store was populated purely by file ingest. Sequence and quality bytes
//! are written plain (uncompressed) — SMRT trades space for write/read
//! speed.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read};

use crate::codec::tagged::{self, Hint};
use crate::error::{Result, TracEonError};
use crate::record::{DetectedFormat, EncodedRecord};
use crate::store::SequenceStore;

pub const MAGIC: &[u8; 4] = b"SMRT";

pub fn write(store: &SequenceStore, format: DetectedFormat, out: &mut Vec<u8>) -> Result<()> {
    out.extend_from_slice(MAGIC);
    out.push(format.to_byte());
    out.write_u64::<LittleEndian>(store.size() as u64)?;

    store.try_for_each(|id, value| -> Result<()> {
        out.write_u32::<LittleEndian>(id.len() as u32)?;
        out.extend_from_slice(id.as_bytes());

        match value {
            EncodedRecord::FastaPayload(data) => {
                let seq = tagged::decode(data);
                out.write_u32::<LittleEndian>(seq.len() as u32)?;
                out.extend_from_slice(&seq);
                out.write_u32::<LittleEndian>(0)?;
            }
            EncodedRecord::FastqPayload { sequence, quality } => {
                let seq = tagged::decode(sequence);
                let qual = tagged::decode(quality);
                out.write_u32::<LittleEndian>(seq.len() as u32)?;
                out.extend_from_slice(&seq);
                out.write_u32::<LittleEndian>(qual.len() as u32)?;
                out.extend_from_slice(&qual);
            }
        }
        Ok(())
    })?;

    Ok(())
}

pub fn read(data: &[u8], store: &SequenceStore) -> Result<DetectedFormat> {
    let mut cursor = Cursor::new(data);

    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated magic".into()))?;
    if &magic != MAGIC {
        return Err(TracEonError::SnapshotMagic);
    }

    let format_byte = cursor
        .read_u8()
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated format byte".into()))?;
    let format = DetectedFormat::from_byte(format_byte).ok_or(TracEonError::SnapshotMagic)?;

    let record_count = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated record count".into()))?;

    // Parse into a scratch store so a truncated/corrupt record part-way
    // through never leaves `store` holding a partial snapshot.
    let scratch = SequenceStore::new();
    for _ in 0..record_count {
        let id_len = read_u32(&mut cursor)?;
        let id = read_bytes(&mut cursor, id_len as usize)?;
        let id = String::from_utf8_lossy(&id).into_owned();

        let seq_len = read_u32(&mut cursor)?;
        let seq = read_bytes(&mut cursor, seq_len as usize)?;

        let qual_len = read_u32(&mut cursor)?;
        let qual = read_bytes(&mut cursor, qual_len as usize)?;

        if qual_len == 0 {
            let encoded = tagged::encode(&seq, Hint::Generic);
            scratch.insert_encoded(id, EncodedRecord::FastaPayload(encoded));
        } else {
            let sequence = tagged::encode(&seq, Hint::Generic);
            let quality = tagged::encode(&qual, Hint::QualityScore);
            scratch.insert_encoded(id, EncodedRecord::FastqPayload { sequence, quality });
        }
    }

    store.replace_with(scratch);
    Ok(format)
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated length prefix".into()))
}

fn read_bytes(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    cursor
        .read_exact(&mut buf)
        .map_err(|_| TracEonError::SnapshotCorrupt("length prefix reads past end".into()))?;
    Ok(buf)
}
