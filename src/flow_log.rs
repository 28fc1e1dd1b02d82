use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{FlowTagError, Result};

/// The only flow log version this tool understands.
pub const SUPPORTED_VERSION: &str = "2";

/// Number of fields every version 2 record carries.
pub const MIN_FIELDS: usize = 14;

const DSTPORT_FIELD: usize = 6;
const PROTOCOL_FIELD: usize = 7;

/// The part of a flow log record the report needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord {
    pub port_destination: i64,
    pub protocol: i64,
}

impl FlowRecord {
    /// Validates one raw flow log line.
    ///
    /// ### Arguments
    ///
    /// * `line_number` - The 1-based line number, used for error reporting.
    /// * `line` - The raw line as read from the file.
    ///
    /// ### Returns
    ///
    /// The destination port and protocol number, `None` for a blank line, or
    /// the first rule the line breaks.
    pub fn parse(line_number: usize, line: &str) -> Result<Option<FlowRecord>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return Err(FlowTagError::Format {
                line: line_number,
                fields: fields.len(),
            });
        }

        if fields[0] != SUPPORTED_VERSION {
            return Err(FlowTagError::Version {
                line: line_number,
                version: fields[0].to_string(),
            });
        }

        let port_destination = fields[DSTPORT_FIELD].parse::<i64>();
        let protocol = fields[PROTOCOL_FIELD].parse::<i64>();
        match (port_destination, protocol) {
            (Ok(port_destination), Ok(protocol)) => Ok(Some(FlowRecord {
                port_destination,
                protocol,
            })),
            _ => Err(FlowTagError::Parse { line: line_number }),
        }
    }
}

/// Streams the non-blank lines of a flow log with their 1-based line numbers.
///
/// `\n`, `\r\n` and a bare `\r` all end a line. Undecodable bytes are
/// replaced rather than rejected.
pub struct FlowLogReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
    // The previous line ended on `\r`; a leading `\n` belongs to it.
    after_cr: bool,
}

impl FlowLogReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening the flow logs file: {:?} ...", path);
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => FlowTagError::FlowLogNotFound {
                path: path.to_path_buf(),
            },
            _ => FlowTagError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Ok(FlowLogReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FlowLogReader<R> {
    pub fn new(reader: R) -> Self {
        FlowLogReader {
            reader,
            buf: Vec::new(),
            line_number: 0,
            after_cr: false,
        }
    }

    /// Fills `buf` with the next line, without its terminator. Returns
    /// `false` at end of input.
    fn read_line_bytes(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let mut read_any = false;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(read_any);
            }

            if std::mem::take(&mut self.after_cr) && available[0] == b'\n' {
                self.reader.consume(1);
                continue;
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.after_cr = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                    read_any = true;
                }
            }
        }
    }

    fn next_line(&mut self) -> io::Result<Option<(usize, String)>> {
        loop {
            if !self.read_line_bytes()? {
                return Ok(None);
            }
            self.line_number += 1;

            let line = String::from_utf8_lossy(&self.buf);
            if !line.trim().is_empty() {
                return Ok(Some((self.line_number, line.into_owned())));
            }
        }
    }
}

impl<R: BufRead> Iterator for FlowLogReader<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
