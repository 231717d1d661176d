//! FASTA chunk parser. Consumes a byte slice assumed to start at a `>`
//! header; produces the records found in it.

use crate::record::Record;

pub fn parse_chunk(data: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_sequence = String::new();

    let flush = |id: &mut Option<String>, seq: &mut String, out: &mut Vec<Record>| {
        if let Some(id) = id.take() {
            out.push(Record::fasta(id, std::mem::take(seq)));
        }
    };

    for raw_line in data.split(|&b| b == b'\n') {
        let line = strip_cr(raw_line);
        if line.is_empty() {
            continue;
        }
        if line[0] == b'>' {
            flush(&mut current_id, &mut current_sequence, &mut records);
            let header = &line[1..];
            let id_end = header
                .iter()
                .position(|&b| b == b' ' || b == b'\t')
                .unwrap_or(header.len());
            current_id = Some(String::from_utf8_lossy(&header[..id_end]).into_owned());
        } else if current_id.is_some() {
            current_sequence.push_str(&String::from_utf8_lossy(line));
        }
    }
    flush(&mut current_id, &mut current_sequence, &mut records);

    records
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.last() == Some(&b'\r') {
        &line[..line.len() - 1]
    } else {
        line
    }
}
