//! CLI argument parsing and configuration.

use std::io;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration from CLI arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    pub questions_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub offline: bool,
}

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
pub enum ParseOutcome {
    Run(CliConfig),
    Help,
    Version,
}

/// Print usage information
pub fn print_usage() {
    eprintln!("Where to Move - Discover your perfect city through a card-swiping quiz");
    eprintln!();
    eprintln!("Usage: where-to-move [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --questions <FILE>  Load questions from a JSON file instead of the built-in set");
    eprintln!("  --api-key <KEY>     Maps API key (overrides WHERE_TO_MOVE_MAPS_API_KEY)");
    eprintln!("  --offline           Disable the map background");
    eprintln!("  -h, --help          Show this help message");
    eprintln!("  -V, --version       Show version");
    eprintln!();
    eprintln!("Controls:");
    eprintln!("  ←/→ or n/y   Swipe the card (No/Yes)");
    eprintln!("  Enter        Commit a partial swipe");
    eprintln!("  a            Show/hide your answers on the results screen");
    eprintln!("  r            Try again");
    eprintln!("  s            Share result");
    eprintln!("  q / Esc      Quit");
}

fn missing_value(flag: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("Missing value for {}", flag),
    )
}

/// Parse CLI arguments (without the program name)
pub fn parse_args<I>(args: I) -> io::Result<ParseOutcome>
where
    I: IntoIterator<Item = String>,
{
    let mut config = CliConfig::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseOutcome::Help),
            "-V" | "--version" => return Ok(ParseOutcome::Version),
            "--offline" => config.offline = true,
            "--questions" => {
                let value = args.next().ok_or_else(|| missing_value("--questions"))?;
                config.questions_path = Some(PathBuf::from(value));
            }
            "--api-key" => {
                let value = args.next().ok_or_else(|| missing_value("--api-key"))?;
                config.api_key = Some(value);
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unknown argument: {}", arg),
                ));
            }
        }
    }

    Ok(ParseOutcome::Run(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> io::Result<ParseOutcome> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_runs_with_defaults() {
        assert_eq!(parse(&[]).unwrap(), ParseOutcome::Run(CliConfig::default()));
    }

    #[test]
    fn test_all_options() {
        let outcome = parse(&["--questions", "q.json", "--api-key", "abc", "--offline"]).unwrap();
        assert_eq!(
            outcome,
            ParseOutcome::Run(CliConfig {
                questions_path: Some(PathBuf::from("q.json")),
                api_key: Some("abc".to_string()),
                offline: true,
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), ParseOutcome::Help);
        assert_eq!(parse(&["--version"]).unwrap(), ParseOutcome::Version);
    }

    #[test]
    fn test_missing_value() {
        let err = parse(&["--questions"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("--questions"));
    }

    #[test]
    fn test_unknown_argument() {
        let err = parse(&["--fast"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown argument: --fast");
    }
}
