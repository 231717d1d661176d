//! FASTQ chunk parser. Consumes a byte slice assumed to start at an `@`
//! header; reads lines in strict groups of four. A group is
//! accepted only if the header begins with `@`, the `+`-line begins with
//! `+`, and the sequence and quality lines have equal length; otherwise
//! the group is skipped and scanning resumes at the next line.

use crate::record::Record;

pub struct ParseResult {
    pub records: Vec<Record>,
    pub skipped: usize,
}

pub fn parse_chunk(data: &[u8]) -> ParseResult {
    let lines: Vec<&[u8]> = data.split(|&b| b == b'\n').map(strip_cr).collect();
    // A trailing empty slice from a final newline is not a line.
    let lines: Vec<&[u8]> = if lines.last() == Some(&&b""[..]) {
        lines[..lines.len() - 1].to_vec()
    } else {
        lines
    };

    let mut records = Vec::new();
    let mut skipped = 0;
    let mut i = 0;

    while i < lines.len() {
        if lines[i].is_empty() {
            i += 1;
            continue;
        }
        if i + 3 >= lines.len() {
            break;
        }
        let header = lines[i];
        let sequence = lines[i + 1];
        let plus = lines[i + 2];
        let quality = lines[i + 3];

        if header.first() == Some(&b'@') && plus.first() == Some(&b'+') && sequence.len() == quality.len() {
            let id_end = header[1..]
                .iter()
                .position(|&b| b == b' ' || b == b'\t')
                .map(|p| p + 1)
                .unwrap_or(header.len());
            let id = String::from_utf8_lossy(&header[1..id_end]).into_owned();
            records.push(Record::fastq(
                id,
                String::from_utf8_lossy(sequence).into_owned(),
                String::from_utf8_lossy(quality).into_owned(),
            ));
            i += 4;
        } else {
            skipped += 1;
            i += 1;
        }
    }

    ParseResult { records, skipped }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.last() == Some(&b'\r') {
        &line[..line.len() - 1]
    } else {
        line
    }
}
