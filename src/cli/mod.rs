//! CLI argument parsing for where-to-move.

mod args;

pub use args::{parse_args, print_usage, CliConfig, ParseOutcome, VERSION};
