//! Trace Loader.
//!
//! Reads Valgrind-style memory traces line by line and yields parsed
//! [`AccessEvent`]s. Lines that cannot be parsed are logged and skipped, so
//! the simulator only ever sees well-formed events. Blank lines are skipped
//! silently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::{AccessEvent, TraceError};

/// Lazy iterator over the events of a trace.
///
/// Yields `Err` only for I/O failures; malformed lines are dropped.
pub struct TraceReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    skipped: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Number of lines read so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            self.line_no += 1;
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.line_no -= 1;
                    return None;
                }
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(TraceError::Read {
                        line: self.line_no,
                        source,
                    }))
                }
            }

            let line = match std::str::from_utf8(&self.buf) {
                Ok(text) => text.trim(),
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("skipping trace line {} (not valid UTF-8: {})", self.line_no, e);
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }
            match line.parse::<AccessEvent>() {
                Ok(event) => return Some(Ok(event)),
                Err(e) => {
                    self.skipped += 1;
                    log::warn!("skipping trace line {} ({}): {:?}", self.line_no, e, line);
                }
            }
        }
    }
}

/// Opens a trace file for lazy reading.
pub fn open_trace<P: AsRef<Path>>(path: P) -> Result<TraceReader<BufReader<File>>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("reading trace {}", path.display());
    Ok(TraceReader::new(BufReader::new(file)))
}

/// Reads every event of a trace file into memory.
pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<AccessEvent>, TraceError> {
    open_trace(path)?.collect()
}

/// Parses every event of an in-memory trace, skipping malformed lines.
pub fn parse_trace(text: &str) -> Vec<AccessEvent> {
    TraceReader::new(text.as_bytes())
        .filter_map(Result::ok)
        .collect()
}
