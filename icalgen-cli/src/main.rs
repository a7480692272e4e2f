mod commands;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;

use crate::commands::generate::{GenerateArgs, Outcome};
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "icalgen", version)]
#[command(about = "Generate an iCalendar (.ics) file from a JSON calendar description")]
struct Cli {
    /// JSON calendar description to read
    #[arg(short, long)]
    source_file: PathBuf,

    /// Log debug output, including the generated calendar
    #[arg(short, long)]
    debug: bool,

    /// Where to write the calendar (default: the source path with a .ics extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Alternate schema definition (overrides the configured one)
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load()?;
    logging::init(cli.debug, &settings.log_filter);

    let args = GenerateArgs {
        source_file: cli.source_file,
        output: cli.output,
        schema: cli.schema.or_else(|| settings.schema_path()),
    };

    // Rejected input has been reported; that is not a failed run
    match commands::generate::run(&args)? {
        Outcome::Written(path) => debug!(path = %path.display(), "calendar written"),
        Outcome::Rejected(failure) => debug!(errors = failure.errors.len(), "source rejected"),
    }

    Ok(())
}
