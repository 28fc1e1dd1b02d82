use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    aggregator::Aggregator,
    error::{FlowTagError, Result},
};
use log::debug;

pub struct ReportWriter<W: Write> {
    writer: BufWriter<W>,
}

impl ReportWriter<File> {
    /// Creates (or truncates) the report file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| FlowTagError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(ReportWriter::new(file))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        ReportWriter {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes both sections of the report in first-seen order.
    pub fn write_report(&mut self, aggregator: &Aggregator) -> std::io::Result<()> {
        debug!("Writing tag counts to output");
        writeln!(self.writer, "Tag Counts:")?;
        writeln!(self.writer, "Tag,Count")?;
        for (tag, count) in aggregator.tag_counts.iter() {
            writeln!(self.writer, "{},{}", tag, count)?;
        }
        writeln!(self.writer)?;

        debug!("Writing port/protocol counts to output");
        writeln!(self.writer, "Port/Protocol Combination Counts:")?;
        writeln!(self.writer, "Port,Protocol,Count")?;
        for (key, count) in aggregator.port_protocol_counts.iter() {
            writeln!(self.writer, "{},{},{}", key.port, key.protocol, count)?;
        }
        Ok(())
    }

    /// Flushes the buffered report and hands back the inner writer.
    pub fn flush_and_close(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}
