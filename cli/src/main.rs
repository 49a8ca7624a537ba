//! ocglayers CLI - report PDF optional content layers as JSON
//!
//! Prints exactly one JSON object on stdout. Extraction and argument
//! failures are part of that payload and exit with status 0; only a missing
//! input path exits non-zero. `--help` and `--version` print their usual text.
//! Logs go to stderr (`RUST_LOG=debug`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;

use ocglayers::{extract_file_with_options, render_result, Error, ExtractOptions, JsonFormat};

#[derive(Parser)]
#[command(name = "ocglayers")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Report the optional content layers of a PDF or .ai file as JSON",
    long_about = None
)]
struct Cli {
    /// Input PDF or PDF-compatible .ai file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Page to segment (1-indexed)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let message = argument_error_message(&e);
            log::warn!("{}", message);
            let result = Err(Error::InvalidArgument(message));
            println!("{}", render_result(&result, JsonFormat::Compact));
            return ExitCode::SUCCESS;
        }
    };
    let format = if cli.pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let Some(input) = cli.input else {
        eprintln!("{}", "Usage: ocglayers <FILE>".yellow());
        eprintln!("       ocglayers --help for more information");
        println!("{}", render_result(&Err(Error::MissingArgument), format));
        return ExitCode::FAILURE;
    };

    log::debug!("extracting layers from {}", input.display());
    let options = ExtractOptions::new().with_page(cli.page);
    let result = extract_file_with_options(&input, options);
    if let Err(e) = &result {
        log::warn!("{}: {}", input.display(), e);
    }

    println!("{}", render_result(&result, format));
    ExitCode::SUCCESS
}

/// First line of a clap error without its `error: ` prefix.
fn argument_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}
