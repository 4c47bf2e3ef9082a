use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use std::env;
use std::fs;
use std::path::PathBuf;

use space_network::config::ExportConfig;
use space_network::env_loader;
use space_network::models::NetworkGraph;
use space_network::summary::{self, NetworkSummary};

fn main() -> Result<()> {
    env_loader::load_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting network summary...");

    // Network file from command line args or the configured destination
    let args: Vec<String> = env::args().collect();
    let network_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        ExportConfig::from_env().network_path()
    };

    let text = fs::read_to_string(&network_path)
        .with_context(|| format!("Failed to read network data from {:?}", network_path))?;
    let network: NetworkGraph = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse network data in {:?}", network_path))?;

    let network_summary = NetworkSummary::from_graph(&network);
    summary::log_summary(&network_summary);

    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    println!("{}", summary::render_report(&network_summary, &generated_at));

    Ok(())
}
