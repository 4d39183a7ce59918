//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::HarnessArgs;
pub use types::PositiveUsize;

pub(crate) use defaults::{DEFAULT_POOL_WIDTH, DEFAULT_SAMPLES, DEFAULT_TARGET_URL};
