pub mod aggregate;
pub mod config;
pub mod env_loader;
pub mod ingest;
pub mod json_writer;
pub mod models;
pub mod network;
pub mod pipeline;
pub mod summary;
