use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a report run.
///
/// Malformed lookup lines never surface here, they are skipped while loading.
#[derive(Error, Debug)]
pub enum FlowTagError {
    #[error("Lookup file '{}' not found.", path.display())]
    LookupNotFound { path: PathBuf },

    #[error("Flow logs file '{}' not found.", path.display())]
    FlowLogNotFound { path: PathBuf },

    #[error("Cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("The lookup table is empty. Please provide a valid lookup CSV ('{}').", path.display())]
    EmptyLookup { path: PathBuf },

    /// Flow-log line with fewer fields than version 2 requires.
    #[error("line {line}: Wrong formatting in flow log. Only {fields} fields found.")]
    Format { line: usize, fields: usize },

    #[error("line {line}: Unsupported version '{version}'. Only version 2 is allowed.")]
    Version { line: usize, version: String },

    #[error("line {line}: Cannot parse dstport/protocol as integers.")]
    Parse { line: usize },

    #[error("Cannot write output file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration file '{}' not found.", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Cannot load configuration file '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
}

pub type Result<T> = std::result::Result<T, FlowTagError>;
