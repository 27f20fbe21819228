//! Command-line interface for orgstream.

mod commands;

pub use commands::{parse_cli, run_with_cli, Cli};
