use log::{info, warn};
use std::path::Path;

const ENV_PATHS: [&str; 3] = [".env", ".env.local", "../.env"];

/// Loads the first `.env` file found in the usual places.
/// Variables already present in the process environment win.
pub fn load_env() {
    let mut loaded_env = false;
    for path in ENV_PATHS.iter() {
        if Path::new(path).exists() {
            match dotenvy::from_path(path) {
                Ok(()) => {
                    info!("Loaded environment variables from {}", path);
                    loaded_env = true;
                    break;
                }
                Err(e) => {
                    warn!("Failed to load environment from {}: {}", path, e);
                }
            }
        }
    }
    if !loaded_env {
        info!("No .env file found, using environment variables from system");
    }
}
