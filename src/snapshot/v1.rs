//! v1 "TRAC" snapshot format: the older, store-driven layout. Payloads
//! are written exactly as the store holds them — already type-tagged by
//! `codec::tagged`.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

use crate::error::{Result, TracEonError};
use crate::record::EncodedRecord;
use crate::store::SequenceStore;

pub const MAGIC: &[u8; 4] = b"TRAC";
const VERSION: u8 = 2;

pub fn write(store: &SequenceStore, out: &mut Vec<u8>) -> Result<()> {
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.write_u64::<LittleEndian>(store.size() as u64)?;

    store.try_for_each(|key, value| -> Result<()> {
        out.write_u32::<LittleEndian>(key.len() as u32)?;
        out.extend_from_slice(key.as_bytes());

        match value {
            EncodedRecord::FastaPayload(data) => {
                out.write_u8(0)?;
                out.write_u32::<LittleEndian>(data.len() as u32)?;
                out.extend_from_slice(data);
            }
            EncodedRecord::FastqPayload { sequence, quality } => {
                out.write_u8(1)?;
                out.write_u32::<LittleEndian>(sequence.len() as u32)?;
                out.extend_from_slice(sequence);
                out.write_u32::<LittleEndian>(quality.len() as u32)?;
                out.extend_from_slice(quality);
            }
        }
        Ok(())
    })?;

    Ok(())
}

pub fn read(data: &[u8], store: &SequenceStore) -> Result<()> {
    let mut cursor = Cursor::new(data);

    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated magic".into()))?;
    if &magic != MAGIC {
        return Err(TracEonError::SnapshotMagic);
    }

    let version = cursor
        .read_u8()
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated version".into()))?;
    if version != VERSION {
        return Err(TracEonError::SnapshotVersion(version));
    }

    let record_count = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| TracEonError::SnapshotCorrupt("truncated record count".into()))?;

    // Parse into a scratch store so a truncated/corrupt record part-way
    // through never leaves `store` holding a partial snapshot.
    let scratch = SequenceStore::new();
    for _ in 0..record_count {
        let key_len = read_u32(&mut cursor)?;
        let key = read_bytes(&mut cursor, key_len as usize)?;
        let key = String::from_utf8_lossy(&key).into_owned();

        let rec_type = cursor
            .read_u8()
            .map_err(|_| TracEonError::SnapshotCorrupt("truncated record type".into()))?;

        match rec_type {
            0 => {
                let data_len = read_u32(&mut cursor)?;
                let data = read_bytes(&mut cursor, data_len as usize)?;
                scratch.insert_encoded(key, EncodedRecord::FastaPayload(data));
            }
            1 => {
                let seq_len = read_u32(&mut cursor)?;
                let sequence = read_bytes(&mut cursor, seq_len as usize)?;
                let qual_len = read_u32(&mut cursor)?;
                let quality = read_bytes(&mut cursor, qual_len as usize)?;
                scratch.insert_encoded(key, EncodedRecord::FastqPayload { sequence, quality });
            }
            other => {
                return Err(TracEonError::SnapshotCorrupt(format!(
                    "unknown record type byte {other}"
                )))
            }
        }
    }

    store.replace_with(scratch);
    Ok(())
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
