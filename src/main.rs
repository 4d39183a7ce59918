mod args;
mod cases;
mod config;
mod dispatch;
mod entry;
mod error;
mod logger;
mod probe;
mod sinks;
mod stats;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
