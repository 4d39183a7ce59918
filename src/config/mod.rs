//! Optional configuration file handling and run-settings resolution.
mod loader;
mod types;


pub use loader::load_config;
pub use types::{ConfigFile, RunConfig};
