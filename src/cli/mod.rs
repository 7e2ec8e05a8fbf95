pub mod render;
pub mod shell;

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::CalculatorSession;
use crate::config::{ConfigPaths, Settings};
use crate::io::{export_items_csv, export_json};

/// costcalc - Business cost calculator
#[derive(Parser)]
#[command(name = "costcalc")]
#[command(about = "Compare yearly and monthly business expenses against expected revenue")]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to config.json in the config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show both expense lists and the summary
    Summary {
        /// JSON file to load first
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Export the data as JSON, or the line items as CSV
    Export {
        /// JSON file to load first
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Copy the data as JSON to the clipboard
    Copy {
        /// JSON file to load first
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Start an interactive session
    Shell {
        /// JSON file to load first
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Export document with totals
    Json,
    /// One row per expense item
    Csv,
}

impl Cli {
    fn load_settings(&self) -> Result<Settings> {
        let settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load(&ConfigPaths::new()?)?,
        };
        Ok(settings)
    }

    pub async fn run(self) -> Result<()> {
        let settings = self.load_settings().context("Failed to load settings")?;
        init_logging(self.verbose, &settings.log_level);

        let mut session = CalculatorSession::from_settings(&settings);

        match self.command {
            Commands::Summary { input } => {
                load_input(&mut session, input.as_deref()).await?;
                let stdout = stdout();
                let mut out = stdout.lock();
                render::write_ledger(
                    &mut out,
                    session.ledger(),
                    &session.summary(),
                    session.currency(),
                )?;
            }

            Commands::Export {
                input,
                output,
                format,
            } => {
                load_input(&mut session, input.as_deref()).await?;
                run_export_command(&session, output.as_deref(), format)?;
            }

            Commands::Copy { input } => {
                load_input(&mut session, input.as_deref()).await?;
                session.copy_to_clipboard().await?;
                eprintln!("Copied data to {}", session.clipboard().describe());
            }

            Commands::Shell { input } => {
                if let Some(path) = input {
                    let note = session.import_file_notify(&path).await;
                    println!("{}", note);
                }
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let mut out = stdout();
                shell::run_shell(&mut session, stdin, &mut out).await?;
            }
        }

        Ok(())
    }
}

/// Logging goes to stderr. RUST_LOG wins, then --verbose, then the configured level.
pub fn init_logging(verbose: bool, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { default_level })
    });

    // A subscriber may already be installed (e.g. by tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn load_input(session: &mut CalculatorSession, input: Option<&Path>) -> Result<()> {
    if let Some(path) = input {
        let summary = session
            .import_file(path)
            .await
            .with_context(|| format!("Failed to import {}", path.display()))?;
        info!(fields = ?summary.accepted_fields(), "loaded input");
    }
    Ok(())
}

fn run_export_command(
    session: &CalculatorSession,
    output: Option<&Path>,
    format: ExportFormat,
) -> Result<()> {
    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(stdout()),
    };

    match format {
        ExportFormat::Json => {
            export_json(session.ledger(), writer)?;
            if let Some(path) = output {
                eprintln!("Exported data to {}", path.display());
            }
        }
        ExportFormat::Csv => {
            let count = export_items_csv(session.ledger(), writer)?;
            if output.is_some() {
                eprintln!("Exported {} expenses", count);
            }
        }
    }
    Ok(())
}
