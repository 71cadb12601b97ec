//! Command-line interface for xkbdata
//!
//! Usage:
//!   xkbdata parse [`<path>`|-] [--start `<rule>`] [--format `<format>`]  - Parse a file or stdin and print it
//!   xkbdata list-formats                                                 - List all available output formats
//!
//! Defaults come from `XKBDATA_LOG_LEVEL`, `XKBDATA_FORMAT` and `XKBDATA_START`;
//! flags take precedence.

use clap::{Arg, ArgMatches, Command};
use std::io::Read;
use std::process::ExitCode;

use xkbdata::config::Config;
use xkbdata::logging::init_logging;
use xkbdata::processor::{
    available_formats, process_file, process_source, ProcessingError, ProcessingSpec,
};

fn cli() -> Command {
    Command::new("xkbdata")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting XKB keyboard description files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level: trace, debug, info, warn or error"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print it in the chosen format")
                .arg(
                    Arg::new("path")
                        .help("Path to the XKB file, or '-' for stdin")
                        .default_value("-")
                        .index(1),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .short('s')
                        .help("Start rule: keymap, statement or expression"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'ast-treeviz', 'token-simple')"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    // global flags given after the subcommand land in the subcommand's matches
    let log_level = matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>("log-level"))
        .or_else(|| matches.get_one::<String>("log-level"))
        .map(String::as_str);
    let (format, start) = match matches.subcommand() {
        Some(("parse", parse_matches)) => (
            parse_matches.get_one::<String>("format").map(String::as_str),
            parse_matches.get_one::<String>("start").map(String::as_str),
        ),
        _ => (None, None),
    };

    let config = match Config::from_env().and_then(|c| c.apply_overrides(log_level, format, start))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches, &config),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            ExitCode::SUCCESS
        }
        _ => ExitCode::FAILURE,
    }
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches, config: &Config) -> ExitCode {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");

    match run_parse(path, config) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_parse(path: &str, config: &Config) -> Result<String, ProcessingError> {
    let spec = ProcessingSpec::from_string(&config.format)?;
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(|source| ProcessingError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        process_source(&source, &spec, config.start)
    } else {
        process_file(path, &spec, config.start)
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
