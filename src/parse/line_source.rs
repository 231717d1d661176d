//! A forward-only line source over a file, dispatching on a `.gz` suffix
//! to decide whether to decompress on the fly.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, TracEonError};

/// A single-use, forward-only, non-seekable line source. Trailing `\r`
/// and `\n` are stripped before a line is returned.
pub trait LineSource {
    fn next_line(&mut self, buf: &mut String) -> Result<bool>;
    fn is_open(&self) -> bool;
}

enum Inner {
    Plain(BufReader<File>),
    Gzip(BufReader<GzDecoder<File>>),
}

pub struct FileLineSource {
    inner: Inner,
    open: bool,
}

impl FileLineSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|_| TracEonError::OpenFailed)?;

        let inner = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Inner::Gzip(BufReader::new(GzDecoder::new(file)))
        } else {
            Inner::Plain(BufReader::new(file))
        };

        Ok(Self { inner, open: true })
    }
}

fn strip_eol(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl LineSource for FileLineSource {
    fn next_line(&mut self, buf: &mut String) -> Result<bool> {
        buf.clear();
        let bytes_read = match &mut self.inner {
            Inner::Plain(r) => r.read_line(buf)?,
            Inner::Gzip(r) => r.read_line(buf)?,
        };
        if bytes_read == 0 {
            self.open = false;
            return Ok(false);
        }
        strip_eol(buf);
        Ok(true)
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
