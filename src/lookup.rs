use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use log::debug;

use crate::error::{FlowTagError, Result};

/// Key of a lookup entry: destination port and lowercase protocol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub port: i64,
    pub protocol: String,
}

impl LookupKey {
    pub fn new(port: i64, protocol: impl Into<String>) -> Self {
        LookupKey {
            port,
            protocol: protocol.into(),
        }
    }
}

/// Tags by (port, protocol), built once from the lookup CSV.
#[derive(Debug, Default)]
pub struct LookupTable {
    entries: HashMap<LookupKey, String>,
}

impl LookupTable {
    /// Loads the lookup CSV at `path`.
    ///
    /// Fails when the file cannot be opened or when no line yields an entry.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Opening the lookup file: {:?} ...", path);
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => FlowTagError::LookupNotFound {
                path: path.to_path_buf(),
            },
            _ => FlowTagError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let table = Self::from_reader(file).map_err(|source| FlowTagError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if table.is_empty() {
            return Err(FlowTagError::EmptyLookup {
                path: path.to_path_buf(),
            });
        }

        debug!("Loaded {} lookup entries from {:?}", table.len(), path);
        Ok(table)
    }

    /// Parses `dstport,protocol,tag` lines, skipping blank lines, `#`
    /// comments and rows without a usable port.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);

        let mut table = LookupTable::default();
        let mut record = ByteRecord::new();
        while rdr.read_byte_record(&mut record).map_err(io::Error::from)? {
            let line = record.position().map_or(0, |p| p.line());
            match parse_entry(&record) {
                Some((key, tag)) => {
                    table.entries.insert(key, tag);
                }
                None => debug!("Skipping lookup line {}", line),
            }
        }

        Ok(table)
    }

    pub fn get(&self, port: i64, protocol: &str) -> Option<&str> {
        self.entries
            .get(&LookupKey::new(port, protocol))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(record: &ByteRecord) -> Option<(LookupKey, String)> {
    if record.len() < 3 {
        return None;
    }

    let field = |i: usize| String::from_utf8_lossy(&record[i]).trim().to_string();

    let port = field(0).parse::<i64>().ok()?;
    let protocol = field(1).to_lowercase();
    let tag = field(2);

    Some((LookupKey::new(port, protocol), tag))
}
