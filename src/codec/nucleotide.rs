//! 2-bit nucleotide codec with an N-position side table.
//!
//! Layout (no outer type tag — the caller in `codec::tagged` prepends one):
//!
//! ```text
//! [0..4)   original length L, big-endian u32
//! [4..8)   N count k, big-endian u32
//! [8..8+ceil(L/4))   packed 2-bit codes, MSB-first within each byte
//! [.. +4k)           positions of every 'N', little-endian u32, ascending
//! ```
//!
//! The length headers are big-endian while the N-position table is
//! little-endian; this asymmetry is historical and must be preserved for
//! snapshot compatibility.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

fn base_to_code(c: u8) -> u8 {
    match c {
        b'A' | b'a' => 0b00,
        b'C' | b'c' => 0b01,
        b'G' | b'g' => 0b10,
        b'T' | b't' | b'U' | b'u' => 0b11,
        _ => 0b00,
    }
}

fn code_to_base(code: u8) -> u8 {
    match code & 0b11 {
        0b00 => b'A',
        0b01 => b'C',
        0b10 => b'G',
        _ => b'T',
    }
}

pub fn encode(sequence: &[u8]) -> Vec<u8> {
    let len = sequence.len();
    let n_positions: Vec<u32> = sequence
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == b'N' || c == b'n')
        .map(|(i, _)| i as u32)
        .collect();

    let packed_len = len.div_ceil(4);
    let mut out = Vec::with_capacity(8 + packed_len + n_positions.len() * 4);

    let mut header = [0u8; 8];
    BigEndian::write_u32(&mut header[0..4], len as u32);
    BigEndian::write_u32(&mut header[4..8], n_positions.len() as u32);
    out.extend_from_slice(&header);

    let mut packed = vec![0u8; packed_len];
    for (i, &c) in sequence.iter().enumerate() {
        let code = base_to_code(c);
        let byte_idx = i / 4;
        let shift = (3 - (i % 4)) * 2;
        packed[byte_idx] |= code << shift;
    }
    out.extend_from_slice(&packed);

    for pos in n_positions {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, pos);
        out.extend_from_slice(&buf);
    }

    out
}

pub fn decode(data: &[u8]) -> Vec<u8> {
    if data.len() < 8 {
        return Vec::new();
    }
    let len = BigEndian::read_u32(&data[0..4]) as usize;
    let n_count = BigEndian::read_u32(&data[4..8]) as usize;
    let packed_len = len.div_ceil(4);

    let packed_start = 8;
    let packed_end = packed_start + packed_len;
    if data.len() < packed_end {
        return Vec::new();
    }
    let packed = &data[packed_start..packed_end];

    let mut sequence = Vec::with_capacity(len);
    for i in 0..len {
        let byte = packed[i / 4];
        let shift = (3 - (i % 4)) * 2;
        let code = (byte >> shift) & 0b11;
        sequence.push(code_to_base(code));
    }

    let n_table_start = packed_end;
    let n_table_end = n_table_start + n_count * 4;
    if data.len() >= n_table_end {
        for chunk in data[n_table_start..n_table_end].chunks_exact(4) {
            let pos = LittleEndian::read_u32(chunk) as usize;
            if pos < sequence.len() {
                sequence[pos] = b'N';
            }
        }
    }

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_plain_acgt() {
        let seq = b"GATTACA";
        assert_eq!(decode(&encode(seq)), seq);
    }

    #[test]
    fn round_trips_with_n_positions_preserved() {
        let seq = b"ACGTNNACGT";
        assert_eq!(decode(&encode(seq)), seq);
    }

    #[test]
    fn lowercase_collapses_to_uppercase() {
        let seq = b"acgtn";
        assert_eq!(decode(&encode(seq)), b"ACGTN");
    }

    #[test]
    fn u_is_not_recoverable_and_decodes_as_t() {
        let seq = b"ACGU";
        assert_eq!(decode(&encode(seq)), b"ACGT");
    }

    #[test]
    fn length_exactly_divisible_by_four_has_no_padding_tail() {
        let seq = b"ACGTACGT";
        let encoded = encode(seq);
        // 8 header bytes + 2 packed bytes, no N positions
        assert_eq!(encoded.len(), 10);
        assert_eq!(decode(&encoded), seq);
    }

    #[test]
    fn single_base_uses_one_packed_byte() {
        let seq = b"A";
        let encoded = encode(seq);
        assert_eq!(encoded.len(), 9); // 8 header + 1 packed byte
        assert_eq!(decode(&encoded), seq);
    }

    #[test]
    fn zero_bases_has_no_packed_region() {
        let seq: &[u8] = b"";
        let encoded = encode(seq);
        assert_eq!(encoded.len(), 8);
        assert_eq!(decode(&encoded), seq);
    }

    #[test]
    fn non_iupac_letters_are_lost_but_do_not_panic() {
        let seq = b"ACGTRYKM";
        let decoded = decode(&encode(seq));
        assert_eq!(decoded.len(), seq.len());
    }
}
