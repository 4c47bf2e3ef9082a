use log::info;

use space_network::config::ExportConfig;
use space_network::env_loader;
use space_network::pipeline;

fn main() {
    env_loader::load_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting participants CSV to JSON conversion.");
    let config = ExportConfig::from_env();

    if !pipeline::convert_csv_to_json(&config) {
        std::process::exit(1);
    }
}
