use std::path::Path;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{FlowTagError, Result};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// The flow logs file to read (version 2 records)
    pub flow_logs_file: String,

    /// The CSV file mapping dstport,protocol to a tag
    pub lookup_csv_file: String,

    /// The file the report is written to
    pub output_file: String,

    /// Optional TOML file with additional protocol names
    #[clap(long)]
    pub config_file: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    /// Protocol numbers to name on top of icmp, tcp and udp
    #[serde(default)]
    pub protocols: Vec<ProtocolEntry>,
}

impl ConfigFile {
    /// Reads the TOML file at `path`. A missing file is an error and is
    /// never created.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FlowTagError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        confy::load_path::<ConfigFile>(path).map_err(|source| FlowTagError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProtocolEntry {
    pub number: i64,
    pub name: String,
}
