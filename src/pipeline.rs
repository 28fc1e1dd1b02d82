use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::{
    aggregator::Aggregator,
    error::{FlowTagError, Result},
    flow_log::{FlowLogReader, FlowRecord},
    lookup::LookupTable,
    output::ReportWriter,
    protocol::ProtocolResolver,
};

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub flows: u64,
    pub tags: usize,
    pub port_protocols: usize,
}

impl ReportSummary {
    fn of(aggregator: &Aggregator) -> Self {
        ReportSummary {
            flows: aggregator.flow_count(),
            tags: aggregator.tag_counts.len(),
            port_protocols: aggregator.port_protocol_counts.len(),
        }
    }
}

/// Runs every flow log line through validation, protocol resolution and tag
/// lookup. Stops at the first invalid line.
pub fn aggregate_flows<R: BufRead>(
    lines: FlowLogReader<R>,
    path: &Path,
    lookup: &LookupTable,
    resolver: &ProtocolResolver,
) -> Result<Aggregator> {
    let mut aggregator = Aggregator::new();

    for line in lines {
        let (line_number, line) = line.map_err(|source| FlowTagError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(record) = FlowRecord::parse(line_number, &line)? else {
            continue;
        };

        let protocol = resolver.resolve(record.protocol);
        let tag = lookup.get(record.port_destination, &protocol);
        aggregator.record(record.port_destination, &protocol, tag);
    }

    debug!("Aggregated {} flows from {:?}", aggregator.flow_count(), path);
    Ok(aggregator)
}

/// One report run over files on disk.
pub struct Pipeline {
    pub flow_logs_file: PathBuf,
    pub lookup_csv_file: PathBuf,
    pub output_file: PathBuf,
    pub resolver: ProtocolResolver,
}

impl Pipeline {
    /// Loads the lookup table and aggregates the flow log, without writing
    /// anything.
    pub fn aggregate(&self) -> Result<Aggregator> {
        let lookup = LookupTable::load(&self.lookup_csv_file)?;
        let lines = FlowLogReader::open(&self.flow_logs_file)?;
        aggregate_flows(lines, &self.flow_logs_file, &lookup, &self.resolver)
    }

    pub fn write(&self, aggregator: &Aggregator) -> Result<ReportSummary> {
        let write_error = |source| FlowTagError::Write {
            path: self.output_file.clone(),
            source,
        };

        let mut writer = ReportWriter::create(&self.output_file)?;
        writer.write_report(aggregator).map_err(write_error)?;
        writer.flush_and_close().map_err(write_error)?;

        let summary = ReportSummary::of(aggregator);
        info!(
            "Report: {} flows, {} tags, {} port/protocol combinations",
            summary.flows, summary.tags, summary.port_protocols
        );
        Ok(summary)
    }
}
