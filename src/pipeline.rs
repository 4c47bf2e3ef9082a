// pipeline.rs
use anyhow::{Context, Result};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use crate::aggregate;
use crate::config::{ExportConfig, NETWORK_FILE_NAME, PARTICIPANTS_FILE_NAME};
use crate::ingest;
use crate::json_writer;
use crate::network;
use crate::summary::{self, NetworkSummary};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub files_processed: usize,
    pub participants: usize,
    pub links: usize,
    pub participants_path: PathBuf,
    pub network_path: PathBuf,
    pub summary: NetworkSummary,
}

/// Reads every participants CSV in the source directory and writes the
/// participant list and the co-participation network.
pub fn run(config: &ExportConfig) -> Result<RunReport> {
    fs::create_dir_all(&config.dest_dir)
        .with_context(|| format!("Failed to create destination directory {:?}", config.dest_dir))?;

    info!("Source data directory: {:?}", config.source_dir);
    info!("Destination data directory: {:?}", config.dest_dir);
    let listing = ingest::list_directory(&config.source_dir)?;
    info!("Source directory contents: {:?}", listing);

    let files = ingest::find_participant_files(&config.source_dir, &config.file_prefix, &config.file_suffix)?;
    let rows = ingest::read_all_rows(&files)?;

    let participant_stats = aggregate::aggregate_rows(&rows);
    let (participants, name_to_id) = aggregate::build_participants(&participant_stats);

    let participants_path = json_writer::write_participants(&config.dest_dir, PARTICIPANTS_FILE_NAME, &participants)?;

    let network = network::build_network(&participants, &rows, &name_to_id)?;
    let network_path = json_writer::write_network(&config.dest_dir, NETWORK_FILE_NAME, &network)?;

    let network_summary = NetworkSummary::from_graph(&network);
    summary::log_summary(&network_summary);

    Ok(RunReport {
        files_processed: files.len(),
        participants: participants.len(),
        links: network.links.len(),
        participants_path,
        network_path,
        summary: network_summary,
    })
}

/// Runs the conversion and reports success as a flag. Failures are logged
/// with the working directory and its contents; nothing propagates.
pub fn convert_csv_to_json(config: &ExportConfig) -> bool {
    match run(config) {
        Ok(report) => {
            info!(
                "Conversion finished: {} files, {} participants, {} links.",
                report.files_processed, report.participants, report.links
            );
            true
        }
        Err(e) => {
            error!("Error converting CSV to JSON: {:#}", e);
            match std::env::current_dir() {
                Ok(cwd) => {
                    error!("Current directory: {:?}", cwd);
                    match ingest::list_directory(&cwd) {
                        Ok(listing) => error!("Directory contents: {:?}", listing),
                        Err(list_err) => error!("Could not list current directory: {:#}", list_err),
                    }
                }
                Err(cwd_err) => error!("Could not determine current directory: {}", cwd_err),
            }
            false
        }
    }
}
