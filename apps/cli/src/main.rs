//! Javelin CLI
//!
//! Thin driver around `javelin-codegen`: reads a descriptor JSON file, renders
//! Java binding classes, and writes one file per type.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use javelin_codegen::generators::GeneratorConfig;

#[derive(Parser)]
#[command(name = "javelin", about = "Generate Java RPC binding classes from descriptor JSON")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render all descriptors in a JSON file into Java sources
    Generate {
        /// Descriptor JSON file (a sequence of type descriptors)
        #[arg(long)]
        input: PathBuf,

        /// Directory the generated `.java` files are written to
        #[arg(long)]
        out_dir: PathBuf,

        /// File whose contents are emitted as the header of every module
        #[arg(long)]
        copyright_file: Option<PathBuf>,

        /// Product token used in generated `@since` tags
        #[arg(long, default_value = "API")]
        since_prefix: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(failed_types) if failed_types == 0 => ExitCode::SUCCESS,
        Ok(failed_types) => {
            error!(failed_types, "generation finished with failures");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<usize> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            input,
            out_dir,
            copyright_file,
            since_prefix,
        } => {
            let copyright_header = copyright_file
                .map(|path| {
                    fs::read_to_string(&path)
                        .with_context(|| format!("reading header {}", path.display()))
                        .map(|text| text.trim_end().to_string())
                })
                .transpose()?;

            let config = GeneratorConfig {
                copyright_header,
                since_prefix,
            };

            let output = javelin_codegen::generate_java_from_json(&input, &out_dir, config)?;

            info!(
                modules = output.modules.len(),
                failures = output.failures.len(),
                out_dir = %out_dir.display(),
                "generation complete"
            );
            for failure in &output.failures {
                error!(name = %failure.type_name, "{}", failure.error);
            }
            Ok(output.failures.len())
        }
    }
}
