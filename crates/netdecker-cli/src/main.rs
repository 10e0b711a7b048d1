mod cli;
mod formats_cmd;
mod lines_cmd;
mod parse_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only the deck list.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Parse {
            ref file,
            ref cards,
            ref format,
            ref aliases,
            ref output,
            y_tolerance,
        } => parse_cmd::run(
            file,
            cards,
            format,
            aliases.as_deref(),
            output,
            y_tolerance,
        ),
        cli::Commands::Lines {
            ref file,
            ref output,
            y_tolerance,
        } => lines_cmd::run(file, output, y_tolerance),
        cli::Commands::Formats => formats_cmd::run(),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
