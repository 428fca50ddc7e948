//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod schema;
mod session;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use crate::config::{load_config, PropanimConfig};
use crate::error::GenerateError;
use crate::form::{FormSnapshot, RawValue};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Propanim - Generate animation-with-props snippets from form input
#[derive(Parser)]
#[command(name = "propanim")]
#[command(about = "Propanim - Generate play_animation snippets and live-preview options")]
#[command(version)]
pub struct Cli {
    /// Config file (default: discover propanim.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where a form snapshot comes from
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Form snapshot JSON file ("-" for stdin).
    /// If omitted without --set, the form is read from stdin
    pub form: Option<PathBuf>,

    /// Set a field by id, e.g. --set dict=missfbi1 --set prop_0_model=prop_cup
    #[arg(long = "set", value_name = "ID=VALUE")]
    pub set: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the snippet for a form
    Generate {
        #[command(flatten)]
        form: FormArgs,

        /// Print the generation result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the snippet to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the live-preview options object for a form
    Options {
        #[command(flatten)]
        form: FormArgs,

        /// Single-line JSON regardless of config
        #[arg(long)]
        compact: bool,
    },

    /// List the animation and prop field schemas
    Schema {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bridge host events on stdin to notifications on stdout (JSON lines)
    Session,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Generate { form, json, output } => {
            generate::run_generate(&config, &form, json, output.as_deref())
        }
        Commands::Options { form, compact } => generate::run_options(&config, &form, compact),
        Commands::Schema { json } => schema::run_schema(json),
        Commands::Session => session::run_session(&config),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    // A subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split an `id=value` assignment.
pub(crate) fn parse_assignment(assignment: &str) -> Result<(&str, RawValue), GenerateError> {
    match assignment.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => Ok((id.trim(), RawValue::from(value))),
        _ => Err(GenerateError::Assignment(assignment.to_string())),
    }
}

fn read_form_source(path: &Path) -> Result<FormSnapshot, GenerateError> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(FormSnapshot::from_json(&json)?)
}

/// Assemble the form snapshot described by `args`.
pub(crate) fn read_form(args: &FormArgs) -> Result<FormSnapshot, GenerateError> {
    let assignments =
        args.set.iter().map(|s| parse_assignment(s)).collect::<Result<Vec<_>, _>>()?;

    match &args.form {
        None if !assignments.is_empty() => Ok(FormSnapshot::from_field_ids(assignments)),
        source => {
            let mut form = read_form_source(source.as_deref().unwrap_or(Path::new("-")))?;
            for (id, value) in assignments {
                if !form.set_field_id(id, value)? {
                    tracing::warn!(field = id, "ignoring unknown field");
                }
            }
            Ok(form)
        }
    }
}

/// Exit code for a form that could not be read
pub(crate) fn form_error(e: &GenerateError) -> ExitCode {
    eprintln!("Error: {}", e);
    match e {
        GenerateError::Assignment(_)
        | GenerateError::PropIndex { .. }
        | GenerateError::Io(_)
        | GenerateError::Form(_) => {
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Serialize for output honoring `[output] pretty`.
pub(crate) fn to_json<T: serde::Serialize>(
    config: &PropanimConfig,
    value: &T,
) -> Result<String, serde_json::Error> {
    if config.output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
