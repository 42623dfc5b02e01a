//! Command-line interface for surreal-pojo
//!
//! # Usage Examples
//!
//! ```bash
//! # Plain JSON to SurrealQL
//! echo '{"id":{"tb":"thing","id":1},"loc":{"type":"Point","coordinates":[2,1]}}' \
//!   | surreal-pojo to-surql
//!
//! # Canonical plain JSON
//! surreal-pojo normalize --input records.jsonl --jsonl --pretty
//!
//! # Validate a JSONL file; exits non-zero if any line fails
//! SURREAL_POJO_MAX_DEPTH=64 surreal-pojo check --input records.jsonl --jsonl
//! ```

use clap::{Parser, Subcommand};
use surreal_pojo::{ConvertOpts, InputOpts};

#[derive(Parser)]
#[command(name = "surreal-pojo")]
#[command(about = "A tool for converting SurrealDB values to and from plain JSON")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert plain JSON documents to SurrealDB values and print them as SurrealQL
    ToSurql {
        #[command(flatten)]
        input: InputOpts,

        #[command(flatten)]
        convert: ConvertOpts,
    },
    /// Round-trip plain JSON documents through SurrealDB values and print the result
    Normalize {
        #[command(flatten)]
        input: InputOpts,

        #[command(flatten)]
        convert: ConvertOpts,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Report documents that cannot be converted to SurrealDB values
    Check {
        #[command(flatten)]
        input: InputOpts,

        #[command(flatten)]
        convert: ConvertOpts,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::ToSurql { input, convert } => {
            let documents = surreal_pojo::read_documents(&input)?;
            surreal_pojo::to_surql(&documents, &convert.config(), &mut out)?;
        }
        Commands::Normalize {
            input,
            convert,
            pretty,
        } => {
            let documents = surreal_pojo::read_documents(&input)?;
            surreal_pojo::normalize(&documents, &convert.config(), pretty, &mut out)?;
        }
        Commands::Check { input, convert } => {
            let documents = surreal_pojo::read_documents(&input)?;
            let report = surreal_pojo::check(&documents, &convert.config(), &mut out)?;
            if !report.is_ok() {
                anyhow::bail!(
                    "{} of {} documents failed to convert",
                    report.failures.len(),
                    report.total
                );
            }
        }
    }

    tracing::info!("Done");
    Ok(())
}
