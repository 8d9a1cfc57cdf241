// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `prepare` — processes an annotated file into feature records
//   2. `parse`   — inspects how a single annotated line is split
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ParseArgs, PrepareArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "absa-prep",
    version = "0.1.0",
    about = "Parse [ASP]-annotated text into fixed-shape ABSA model inputs."
)]
pub struct Cli {
    /// The subcommand to run (prepare or parse)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => Self::run_prepare(args),
            Commands::Parse(args)   => Self::run_parse(args),
        }
    }

    /// Handles the `prepare` subcommand.
    /// Converts CLI args into PrepareSettings and hands off to Layer 2.
    fn run_prepare(args: PrepareArgs) -> Result<()> {
        use crate::application::prepare_use_case::PrepareUseCase;

        tracing::info!("Preparing features from: {}", args.input);

        let use_case = PrepareUseCase::new(args.into_settings()?);
        let count = use_case.execute()?;

        println!("Prepared {count} feature record(s).");
        Ok(())
    }

    /// Handles the `parse` subcommand.
    /// Prints the per-aspect samples and a summary of each record.
    fn run_parse(args: ParseArgs) -> Result<()> {
        use crate::application::inspect_use_case::InspectUseCase;

        let use_case = InspectUseCase::new(args.config.parse()?);
        let inspection = use_case.inspect(&args.text)?;

        if inspection.samples.is_empty() {
            println!("No aspects found.");
            return Ok(());
        }

        for (sample, record) in inspection.samples.iter().zip(&inspection.records) {
            println!("sample:   {sample}");
            println!("aspect:   {}", record.aspect);
            println!(
                "polarity: {}",
                record.polarity.as_deref().unwrap_or("(unlabeled)")
            );
            if let Some([start, end]) = record.aspect_boundary {
                println!("boundary: tokens {start}..={end}");
            }
            println!();
        }
        Ok(())
    }
}
