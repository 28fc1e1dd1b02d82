mod aggregator;
mod args;
mod error;
mod flow_log;
mod lookup;
mod output;
mod pipeline;
mod protocol;
mod tests;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use args::{Cli, ConfigFile};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::{debug, info};
use pipeline::Pipeline;
use protocol::ProtocolResolver;

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            debug!("Argument error: {}", e);
            println!("Error: Missing arguments.");
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let output_path = std::path::absolute(&cli.output_file)
        .with_context(|| format!("cannot resolve output path '{}'", cli.output_file))?;
    println!("Will write results to: {}", output_path.display());

    let resolver = match &cli.config_file {
        Some(config_path) => {
            let config = ConfigFile::load(Path::new(config_path))?;
            debug!("Loaded {} extra protocol names", config.protocols.len());
            ProtocolResolver::with_extra(&config.protocols)
        }
        None => ProtocolResolver::new(),
    };

    let pipeline = Pipeline {
        flow_logs_file: PathBuf::from(&cli.flow_logs_file),
        lookup_csv_file: PathBuf::from(&cli.lookup_csv_file),
        output_file: PathBuf::from(&cli.output_file),
        resolver,
    };

    let start = Instant::now();
    let aggregator = pipeline.aggregate()?;

    println!("Writing results to: {}", output_path.display());
    pipeline.write(&aggregator)?;
    println!("Output successfully written.");

    info!("Duration: {:.4} seconds", start.elapsed().as_secs_f64());
    Ok(())
}
