use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icalgen_core::{CalendarBuilder, Generated, Generator, SchemaValidator, ValidationFailure};
use owo_colors::OwoColorize;
use serde_json::Value;
use tracing::{debug, error};

const SOURCE_EXT: &str = "json";
const OUTPUT_EXT: &str = "ics";

pub struct GenerateArgs {
    pub source_file: PathBuf,
    pub output: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

/// What a run did.
#[derive(Debug)]
pub enum Outcome {
    Written(PathBuf),
    Rejected(ValidationFailure),
}

pub fn run(args: &GenerateArgs) -> Result<Outcome> {
    check_source(&args.source_file)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.source_file));

    println!(
        "{}",
        format!("Generating {} from {}", output.display(), args.source_file.display()).cyan()
    );

    let contents = std::fs::read_to_string(&args.source_file)
        .with_context(|| format!("Failed to read {}", args.source_file.display()))?;
    let json: Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", args.source_file.display()))?;

    let custom = args.schema.as_deref().map(load_schema).transpose()?;
    let schema = match custom {
        Some(ref schema) => schema,
        None => SchemaValidator::embedded()?,
    };

    let generator = Generator::with_schema(schema, CalendarBuilder::new());

    match generator.generate(&json)? {
        Generated::Calendar(ics) => {
            debug!("generated calendar:\n{ics}");
            std::fs::write(&output, ics)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!(
                "{}",
                format!(
                    "Successfully generated the iCalendar file at {}",
                    output.display()
                )
                .green()
            );
            Ok(Outcome::Written(output))
        }
        Generated::Invalid(failure) => {
            println!(
                "{}",
                format!(
                    "Failed to generate the iCalendar file due to invalid JSON data in '{}'.",
                    args.source_file.display()
                )
                .red()
            );
            println!("Please correct the JSON data and try again.");

            let details = serde_json::to_string_pretty(&failure.errors)
                .unwrap_or_else(|_| format!("{:?}", failure.errors));
            error!("{}\n{details}", failure.message);

            Ok(Outcome::Rejected(failure))
        }
    }
}

fn check_source(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("sourceFile does not exist: {}", path.display());
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXT));
    if !is_json {
        anyhow::bail!(
            "sourceFile does not have a '.{SOURCE_EXT}' extension: {}",
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
    }

    Ok(())
}

/// The source path with its extension swapped for `.ics`.
fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXT)
}

fn load_schema(path: &Path) -> Result<SchemaValidator> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    let schema = SchemaValidator::from_json_str(&contents)
        .with_context(|| format!("Invalid schema {}", path.display()))?;

    debug!(path = %path.display(), "loaded schema definition");
    Ok(schema)
}
