// config.rs
use log::info;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_PREFIX: &str = "participants_";
pub const DEFAULT_FILE_SUFFIX: &str = ".csv";
pub const PARTICIPANTS_FILE_NAME: &str = "participants_data.json";
pub const NETWORK_FILE_NAME: &str = "network_data.json";

/// Where the conversion reads CSV files from and writes JSON documents to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub file_prefix: String,
    pub file_suffix: String,
}

impl ExportConfig {
    /// Default layout relative to the tool's own directory:
    /// CSV files live in the `data` directory two levels above it,
    /// JSON documents go into its own `data` subdirectory.
    pub fn from_layout(anchor: &Path) -> Self {
        ExportConfig {
            source_dir: anchor.join("..").join("..").join("data"),
            dest_dir: anchor.join("data"),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
        }
    }

    /// Builds the configuration from environment variables, falling back
    /// to the default layout for anything unset.
    pub fn from_env() -> Self {
        let anchor = std::env::var("SPACE_NETWORK_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        let mut config = ExportConfig::from_layout(&anchor);

        if let Ok(dir) = std::env::var("SPACE_NETWORK_SOURCE_DIR") {
            config.source_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("SPACE_NETWORK_DEST_DIR") {
            config.dest_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = std::env::var("SPACE_NETWORK_FILE_PREFIX") {
            config.file_prefix = prefix;
        }
        if let Ok(suffix) = std::env::var("SPACE_NETWORK_FILE_SUFFIX") {
            config.file_suffix = suffix;
        }

        info!(
            "Export Config: Source={:?}, Dest={:?}, Pattern={}*{}",
            config.source_dir, config.dest_dir, config.file_prefix, config.file_suffix
        );
        config
    }

    pub fn participants_path(&self) -> PathBuf {
        self.dest_dir.join(PARTICIPANTS_FILE_NAME)
    }

    pub fn network_path(&self) -> PathBuf {
        self.dest_dir.join(NETWORK_FILE_NAME)
    }
}
