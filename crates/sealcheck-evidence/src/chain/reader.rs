//! JSONL reader for the audit chain log.
//!
//! One JSON object per line. Blank (or whitespace-only) lines are skipped.
//! Any other line that is not a complete [`ChainRecord`] is fatal: the
//! verifier never guesses defaults for a damaged record.

use crate::chain::record::ChainRecord;
use crate::error::{ErrorCode, VerifyError, VerifyResult};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Iterator over chain records, parsed lazily one line at a time.
pub struct ChainRecords<R: BufRead> {
    reader: R,
    line: Vec<u8>,
    line_number: usize,
    records: usize,
    max_line_bytes: usize,
    max_records: usize,
    done: bool,
}

impl<R: BufRead> ChainRecords<R> {
    pub fn new(reader: R, max_line_bytes: usize, max_records: usize) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_number: 0,
            records: 0,
            max_line_bytes,
            max_records,
            done: false,
        }
    }

    /// Fill `self.line` with the next line, without its terminator.
    ///
    /// Returns `false` at end of input. A line longer than `max_line_bytes`
    /// fails as soon as the limit is crossed, before it is buffered whole.
    fn next_line(&mut self) -> VerifyResult<bool> {
        self.line.clear();
        let mut seen_any = false;
        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(VerifyError::from(e)
                        .with_context(format!("chain log line {}", self.line_number + 1)))
                }
            };
            if chunk.is_empty() {
                if seen_any {
                    self.line_number += 1;
                }
                return Ok(seen_any);
            }
            seen_any = true;

            let (take, newline) = match chunk.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos, true),
                None => (chunk.len(), false),
            };
            if self.line.len() + take > self.max_line_bytes {
                return Err(VerifyError::new(
                    ErrorCode::LimitLineBytes,
                    format!(
                        "chain log line {} exceeds {} bytes",
                        self.line_number + 1,
                        self.max_line_bytes
                    ),
                ));
            }
            self.line.extend_from_slice(&chunk[..take]);
            self.reader.consume(take + usize::from(newline));

            if newline {
                self.line_number += 1;
                return Ok(true);
            }
        }
    }

    fn read_record(&mut self) -> Option<VerifyResult<ChainRecord>> {
        loop {
            match self.next_line() {
                Ok(false) => return None,
                Ok(true) => {}
                Err(e) => return Some(Err(e)),
            }

            let line = match std::str::from_utf8(&self.line) {
                Ok(s) => s.trim(),
                Err(e) => {
                    return Some(Err(VerifyError::new(
                        ErrorCode::ChainRecordInvalid,
                        format!("invalid chain record at line {}: {}", self.line_number, e),
                    )))
                }
            };
            if line.is_empty() {
                continue;
            }

            if self.records >= self.max_records {
                return Some(Err(VerifyError::new(
                    ErrorCode::LimitRecords,
                    format!("chain log exceeds {} records", self.max_records),
                )));
            }
            self.records += 1;

            let result = ChainRecord::from_json(line).map_err(|e| {
                VerifyError::new(
                    ErrorCode::ChainRecordInvalid,
                    format!("invalid chain record at line {}: {}", self.line_number, e),
                )
                .with_source(e)
            });
            return Some(result);
        }
    }
}

impl<R: BufRead> Iterator for ChainRecords<R> {
    type Item = VerifyResult<ChainRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.read_record();
        // Errors are terminal.
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

/// Open the chain log at `path` for streaming.
pub fn open_chain_log(
    path: &Path,
    max_line_bytes: usize,
    max_records: usize,
) -> VerifyResult<ChainRecords<BufReader<File>>> {
    let file = File::open(path).map_err(|e| {
        VerifyError::from(e).with_context(format!("cannot open {}", path.display()))
    })?;
    Ok(ChainRecords::new(
        BufReader::new(file),
        max_line_bytes,
        max_records,
    ))
}

/// Read every record of the chain log into memory, in file order.
pub fn load_chain_log(
    path: &Path,
    max_line_bytes: usize,
    max_records: usize,
) -> VerifyResult<Vec<ChainRecord>> {
    open_chain_log(path, max_line_bytes, max_records)?.collect()
}
