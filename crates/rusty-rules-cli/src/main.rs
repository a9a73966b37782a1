mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rusty-rules")]
#[command(version, about = "Validate request payloads against a rule file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sanitize and validate a payload
    Check {
        /// Rule file (TOML)
        #[arg(short, long, default_value = "validation.toml")]
        rules: PathBuf,

        /// Payload file; reads stdin when omitted
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Payload is an urlencoded form body instead of JSON
        #[arg(long)]
        form: bool,

        /// Print the sanitized data and errors as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the rules loaded from a rule file
    Rules {
        /// Rule file (TOML)
        #[arg(short, long, default_value = "validation.toml")]
        rules: PathBuf,
    },

    /// Print the sanitized form of a value
    Sanitize {
        /// Raw value
        value: String,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            rules,
            data,
            form,
            json,
        } => {
            let valid = commands::check::execute(&rules, data.as_deref(), form, json)?;
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Rules { rules } => {
            commands::rules::execute(&rules)?;
        }
        Commands::Sanitize { value } => {
            commands::sanitize::execute(&value);
        }
    }

    Ok(ExitCode::SUCCESS)
}
